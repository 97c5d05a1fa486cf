//! String-backed enumerations that round-trip values this crate does not know yet.

// self
use crate::_prelude::*;

macro_rules! def_label {
	(
		$(#[$meta:meta])*
		$name:ident default $default:ident {
			$(
				$(#[$variant_meta:meta])*
				$variant:ident => $wire:literal
			),+ $(,)?
		}
	) => {
		$(#[$meta])*
		#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
		#[serde(from = "String", into = "String")]
		pub enum $name {
			$(
				$(#[$variant_meta])*
				$variant,
			)+
			/// Value not modeled by this crate, kept verbatim.
			Other(String),
		}
		impl $name {
			/// Returns the wire representation.
			pub fn as_str(&self) -> &str {
				match self {
					$(Self::$variant => $wire,)+
					Self::Other(value) => value.as_str(),
				}
			}
		}
		impl Default for $name {
			fn default() -> Self {
				Self::$default
			}
		}
		impl From<String> for $name {
			fn from(value: String) -> Self {
				match value.as_str() {
					$($wire => Self::$variant,)+
					_ => Self::Other(value),
				}
			}
		}
		impl From<$name> for String {
			fn from(value: $name) -> Self {
				match value {
					$name::Other(value) => value,
					known => known.as_str().to_owned(),
				}
			}
		}
		impl FromStr for $name {
			type Err = std::convert::Infallible;

			fn from_str(s: &str) -> Result<Self, Self::Err> {
				Ok(Self::from(s.to_owned()))
			}
		}
		impl Display for $name {
			fn fmt(&self, f: &mut Formatter) -> FmtResult {
				f.write_str(self.as_str())
			}
		}
	};
}

def_label! {
	/// How LeanIX delivers events to the subscriber.
	DeliveryType default Push {
		/// LeanIX calls the target URL.
		Push => "PUSH",
		/// The subscriber polls for events.
		Pull => "PULL",
	}
}

def_label! {
	/// Workspaces whose events reach the subscription.
	WorkspaceConstraint default Any {
		/// Events from every workspace.
		Any => "ANY",
	}
}

def_label! {
	/// Shape of the delivered payload.
	PayloadMode default Default {
		/// Event delivered as-is.
		Default => "DEFAULT",
		/// Event wrapped in delivery metadata.
		WrappedEvent => "WRAPPED_EVENT",
	}
}
