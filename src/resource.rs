//! Reconcile-to-desired-state adapter for declarative tooling.
//!
//! [`SubscriptionConfig`] mirrors the declarative schema (snake_case fields, defaults applied by
//! serde). [`SubscriptionResource`] drives the client through the usual lifecycle: create new
//! resources, refresh observed state (a resource changed out of band reads as gone), update on
//! drift, and delete on removal.

// self
use crate::{
	_prelude::*,
	client::{LeanixClient, SubscriptionOperation},
	subscription::{DeliveryType, PayloadMode, TagSet, WebhookSubscription, WorkspaceConstraint},
};

/// Desired state of one webhook subscription.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubscriptionConfig {
	/// Subscription name.
	pub identifier: String,
	/// Delivery target.
	pub target_url: String,
	/// HTTP method used for deliveries.
	pub target_method: String,
	/// Source workspace; empty when unset.
	#[serde(default)]
	pub workspace_id: String,
	/// `Authorization` header attached to deliveries; empty when unset.
	#[serde(default)]
	pub authorization_header: String,
	/// Delivery transform; empty when unset.
	#[serde(default)]
	pub callback: String,
	/// Workspace filter, `ANY` by default.
	#[serde(default)]
	pub workspace_constraint: WorkspaceConstraint,
	/// Payload shape, `DEFAULT` by default.
	#[serde(default)]
	pub payload_mode: PayloadMode,
	/// Enabled unless set otherwise.
	#[serde(default = "enabled")]
	pub active: bool,
	/// Ignore target errors unless set otherwise.
	#[serde(default = "enabled")]
	pub ignore_error: bool,
	/// Event filters.
	#[serde(default)]
	pub tag_sets: Vec<TagSet>,
}
impl SubscriptionConfig {
	/// Creates a config with schema defaults for every optional field.
	pub fn new(
		identifier: impl Into<String>,
		target_url: impl Into<String>,
		target_method: impl Into<String>,
	) -> Self {
		Self {
			identifier: identifier.into(),
			target_url: target_url.into(),
			target_method: target_method.into(),
			workspace_id: String::new(),
			authorization_header: String::new(),
			callback: String::new(),
			workspace_constraint: WorkspaceConstraint::default(),
			payload_mode: PayloadMode::default(),
			active: true,
			ignore_error: true,
			tag_sets: Vec::new(),
		}
	}

	/// Adds one tag set.
	pub fn with_tag_set<I, S>(mut self, tags: I) -> Self
	where
		I: IntoIterator<Item = S>,
		S: Into<String>,
	{
		self.tag_sets.push(tags.into_iter().map(Into::into).collect());

		self
	}

	/// Builds the request payload; declarative subscriptions are always push deliveries.
	pub fn to_subscription(&self, id: Option<String>) -> WebhookSubscription {
		WebhookSubscription {
			id,
			identifier: self.identifier.clone(),
			delivery_type: DeliveryType::Push,
			tag_sets: self.tag_sets.clone(),
			workspace_id: self.workspace_id.clone(),
			target_url: self.target_url.clone(),
			target_method: self.target_method.clone(),
			authorization_header: self.authorization_header.clone(),
			callback: self.callback.clone(),
			ignore_error: self.ignore_error,
			workspace_constraint: self.workspace_constraint.clone(),
			payload_mode: self.payload_mode.clone(),
			active: self.active,
		}
	}

	/// Captures observed state from a subscription returned by the service.
	pub fn from_subscription(subscription: &WebhookSubscription) -> Self {
		Self {
			identifier: subscription.identifier.clone(),
			target_url: subscription.target_url.clone(),
			target_method: subscription.target_method.clone(),
			workspace_id: subscription.workspace_id.clone(),
			authorization_header: subscription.authorization_header.clone(),
			callback: subscription.callback.clone(),
			workspace_constraint: subscription.workspace_constraint.clone(),
			payload_mode: subscription.payload_mode.clone(),
			active: subscription.active,
			ignore_error: subscription.ignore_error,
			tag_sets: subscription.tag_sets.clone(),
		}
	}

	/// Compares two configs treating tag sets as a set; order inside each tag set still counts.
	pub fn matches(&self, other: &Self) -> bool {
		let mut ours = self.tag_sets.clone();
		let mut theirs = other.tag_sets.clone();

		ours.sort();
		ours.dedup();
		theirs.sort();
		theirs.dedup();

		ours == theirs
			&& self.identifier == other.identifier
			&& self.target_url == other.target_url
			&& self.target_method == other.target_method
			&& self.workspace_id == other.workspace_id
			&& self.authorization_header == other.authorization_header
			&& self.callback == other.callback
			&& self.workspace_constraint == other.workspace_constraint
			&& self.payload_mode == other.payload_mode
			&& self.active == other.active
			&& self.ignore_error == other.ignore_error
	}
}

fn enabled() -> bool {
	true
}

/// Tracked state of a subscription managed by the adapter.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ResourceState {
	/// Service-assigned id.
	pub id: String,
	/// Last observed configuration.
	pub config: SubscriptionConfig,
}
impl ResourceState {
	fn observed(subscription: WebhookSubscription) -> Result<Self> {
		let config = SubscriptionConfig::from_subscription(&subscription);
		let id = subscription
			.id
			.filter(|id| !id.is_empty())
			.ok_or(Error::MissingId { operation: SubscriptionOperation::Read })?;

		Ok(Self { id, config })
	}
}

/// Lifecycle driver binding declarative configs to a [`LeanixClient`].
#[derive(Clone, Copy, Debug)]
pub struct SubscriptionResource<'a> {
	client: &'a LeanixClient,
}
impl<'a> SubscriptionResource<'a> {
	/// Wraps `client`.
	pub fn new(client: &'a LeanixClient) -> Self {
		Self { client }
	}

	/// Creates the subscription described by `desired`.
	pub async fn create(&self, desired: &SubscriptionConfig) -> Result<ResourceState> {
		let created = self.client.create_webhook_subscription(&desired.to_subscription(None)).await?;

		ResourceState::observed(created)
	}

	/// Refreshes observed state; `Ok(None)` means the subscription no longer exists.
	pub async fn read(&self, id: &str) -> Result<Option<ResourceState>> {
		match self.client.read_webhook_subscription(id).await {
			Ok(subscription) => ResourceState::observed(subscription).map(Some),
			Err(e) if e.is_out_of_band_change() => Ok(None),
			Err(e) => Err(e),
		}
	}

	/// Pushes `desired` to the subscription tracked under `id`.
	pub async fn update(&self, id: &str, desired: &SubscriptionConfig) -> Result<ResourceState> {
		if id.is_empty() {
			return Err(Error::MissingId { operation: SubscriptionOperation::Update });
		}

		let updated = self
			.client
			.update_webhook_subscription(&desired.to_subscription(Some(id.to_owned())))
			.await?;

		ResourceState::observed(updated)
	}

	/// Deletes the subscription tracked under `id`.
	pub async fn delete(&self, id: &str) -> Result<()> {
		self.client.delete_webhook_subscription(id).await.map(|_| ())
	}

	/// Moves the remote subscription from `current` towards `desired`.
	///
	/// - no state, desired config: create
	/// - state, desired config: refresh, then recreate if gone or update on drift
	/// - state, no desired config: delete
	///
	/// Returns the state to track afterwards.
	pub async fn reconcile(
		&self,
		current: Option<&ResourceState>,
		desired: Option<&SubscriptionConfig>,
	) -> Result<Option<ResourceState>> {
		match (current, desired) {
			(None, None) => Ok(None),
			(None, Some(desired)) => self.create(desired).await.map(Some),
			(Some(current), None) => {
				self.delete(&current.id).await?;

				Ok(None)
			},
			(Some(current), Some(desired)) => match self.read(&current.id).await? {
				None => self.create(desired).await.map(Some),
				Some(observed) if observed.config.matches(desired) => Ok(Some(observed)),
				Some(observed) => self.update(&observed.id, desired).await.map(Some),
			},
		}
	}
}

#[cfg(test)]
mod tests {
	// self
	use super::*;

	#[test]
	fn schema_defaults_apply_when_fields_are_omitted() {
		let config: SubscriptionConfig = serde_json::from_str(
			"{\"identifier\":\"hook\",\"target_url\":\"https://example.com\",\"target_method\":\"POST\"}",
		)
		.expect("Minimal config should decode.");

		assert_eq!(config, SubscriptionConfig::new("hook", "https://example.com", "POST"));
		assert!(config.active);
		assert!(config.ignore_error);
		assert_eq!(config.workspace_constraint, WorkspaceConstraint::Any);
		assert_eq!(config.payload_mode, PayloadMode::Default);
	}

	#[test]
	fn to_subscription_forces_push_delivery() {
		let config = SubscriptionConfig::new("hook", "https://example.com", "POST")
			.with_tag_set(["pathfinder", "FACT_SHEET_UPDATED"]);
		let subscription = config.to_subscription(Some("id".into()));

		assert_eq!(subscription.delivery_type, DeliveryType::Push);
		assert_eq!(subscription.id.as_deref(), Some("id"));
		assert_eq!(SubscriptionConfig::from_subscription(&subscription), config);
	}

	#[test]
	fn matches_ignores_tag_set_order_but_not_tag_order() {
		let base = SubscriptionConfig::new("hook", "https://example.com", "POST")
			.with_tag_set(["pathfinder", "FACT_SHEET_UPDATED"])
			.with_tag_set(["pathfinder", "FACT_SHEET_ARCHIVED"]);
		let reordered_sets = SubscriptionConfig::new("hook", "https://example.com", "POST")
			.with_tag_set(["pathfinder", "FACT_SHEET_ARCHIVED"])
			.with_tag_set(["pathfinder", "FACT_SHEET_UPDATED"]);
		let reordered_tags = SubscriptionConfig::new("hook", "https://example.com", "POST")
			.with_tag_set(["FACT_SHEET_UPDATED", "pathfinder"])
			.with_tag_set(["pathfinder", "FACT_SHEET_ARCHIVED"]);

		assert!(base.matches(&reordered_sets));
		assert!(!base.matches(&reordered_tags));
		assert!(!base.matches(&SubscriptionConfig { active: false, ..reordered_sets }));
	}
}
