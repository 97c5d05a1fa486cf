//! Webhook subscription model and the response envelope wrapping it.

pub mod envelope;
pub mod label;

pub use envelope::*;
pub use label::*;

// crates.io
use serde::Deserializer;
// self
use crate::_prelude::*;

/// Ordered group of event tags; order within the group is significant.
pub type TagSet = Vec<String>;

/// Webhook subscription as stored by LeanIX.
///
/// `id` is absent until the service persists the subscription. Fields the service may omit or
/// return as `null` decode to their defaults, which lets an empty `data` object surface as a
/// missing subscription instead of a decode failure.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct WebhookSubscription {
	/// Service-assigned id; `None` before creation.
	#[serde(skip_serializing_if = "Option::is_none")]
	pub id: Option<String>,
	/// User-supplied name.
	#[serde(deserialize_with = "null_as_default")]
	pub identifier: String,
	/// Delivery channel; declarative resources always use [`DeliveryType::Push`].
	#[serde(deserialize_with = "null_as_default")]
	pub delivery_type: DeliveryType,
	/// Event filters, kept in the order supplied.
	#[serde(deserialize_with = "null_as_default")]
	pub tag_sets: Vec<TagSet>,
	/// Workspace the events originate from.
	#[serde(deserialize_with = "null_as_default")]
	pub workspace_id: String,
	/// Delivery target.
	#[serde(deserialize_with = "null_as_default")]
	pub target_url: String,
	/// HTTP method used for deliveries.
	#[serde(deserialize_with = "null_as_default")]
	pub target_method: String,
	/// `Authorization` header attached to deliveries.
	#[serde(deserialize_with = "null_as_default")]
	pub authorization_header: String,
	/// Transform evaluated by LeanIX before delivery; opaque to this client.
	#[serde(deserialize_with = "null_as_default")]
	pub callback: String,
	/// Keep delivering after target errors.
	#[serde(deserialize_with = "null_as_default")]
	pub ignore_error: bool,
	/// Workspace filter.
	#[serde(deserialize_with = "null_as_default")]
	pub workspace_constraint: WorkspaceConstraint,
	/// Payload shape.
	#[serde(deserialize_with = "null_as_default")]
	pub payload_mode: PayloadMode,
	/// Whether deliveries are enabled.
	#[serde(deserialize_with = "null_as_default")]
	pub active: bool,
}
impl WebhookSubscription {
	/// Returns the id when it is present and non-empty.
	pub fn persisted_id(&self) -> Option<&str> {
		self.id.as_deref().filter(|id| !id.is_empty())
	}
}

fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
	D: Deserializer<'de>,
	T: Default + Deserialize<'de>,
{
	Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}
