//! Response envelope returned by every subscription endpoint call.

// self
use crate::{_prelude::*, subscription::WebhookSubscription};

/// Raw `{ status, data }` wrapper.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubscriptionEnvelope {
	/// Service status label (e.g. `Ok`).
	#[serde(default)]
	pub status: String,
	/// Subscription payload, `null` when the service has nothing to return.
	#[serde(default)]
	pub data: Option<WebhookSubscription>,
}
impl SubscriptionEnvelope {
	/// Classifies the envelope.
	///
	/// Only a payload carrying a non-empty id counts as a usable subscription.
	pub fn into_outcome(self) -> EnvelopeOutcome {
		match self.data {
			Some(subscription) if subscription.persisted_id().is_some() =>
				EnvelopeOutcome::Ok(subscription),
			_ => EnvelopeOutcome::Missing { status: self.status },
		}
	}
}

/// Tagged view of a decoded envelope.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum EnvelopeOutcome {
	/// The service returned a persisted subscription.
	Ok(WebhookSubscription),
	/// No subscription, or one without an id; the resource changed out of band.
	Missing {
		/// Envelope status label.
		status: String,
	},
}
