//! Webhook subscription CRUD calls.
//!
//! All four operations share one exchange path: validate the id locally, fetch the
//! `Authorization` value from the credential cache, send a single request, decode the
//! [`SubscriptionEnvelope`], and accept it only when it carries a subscription with a non-empty
//! id. Anything else becomes [`Error::OutOfBandChange`].

// crates.io
use reqwest::{
	Method,
	header::{AUTHORIZATION, CONTENT_TYPE},
};
// self
use crate::{
	_prelude::*,
	client::{LeanixClient, SubscriptionOperation},
	error::DecodeError,
	obs::{self, OperationKind},
	subscription::{EnvelopeOutcome, SubscriptionEnvelope, WebhookSubscription},
};

const JSON: &str = "application/json";

impl LeanixClient {
	/// Creates `subscription` and returns the persisted copy, including its new id.
	pub async fn create_webhook_subscription(
		&self,
		subscription: &WebhookSubscription,
	) -> Result<WebhookSubscription> {
		const OPERATION: SubscriptionOperation = SubscriptionOperation::Create;

		obs::observe(OperationKind::from(OPERATION), "create_webhook_subscription", async {
			let body = serde_json::to_vec(subscription).map_err(Error::Encode)?;

			self.exchange(OPERATION, None, Some(body), &subscription.identifier).await
		})
		.await
	}

	/// Reads the subscription stored under `id`.
	pub async fn read_webhook_subscription(&self, id: &str) -> Result<WebhookSubscription> {
		const OPERATION: SubscriptionOperation = SubscriptionOperation::Read;

		obs::observe(OperationKind::from(OPERATION), "read_webhook_subscription", async {
			let id = require_id(OPERATION, Some(id))?;

			self.exchange(OPERATION, Some(id), None, id).await
		})
		.await
	}

	/// Replaces the subscription stored under `subscription.id`.
	pub async fn update_webhook_subscription(
		&self,
		subscription: &WebhookSubscription,
	) -> Result<WebhookSubscription> {
		const OPERATION: SubscriptionOperation = SubscriptionOperation::Update;

		obs::observe(OperationKind::from(OPERATION), "update_webhook_subscription", async {
			let id = require_id(OPERATION, subscription.id.as_deref())?;
			let body = serde_json::to_vec(subscription).map_err(Error::Encode)?;

			self.exchange(OPERATION, Some(id), Some(body), &subscription.identifier).await
		})
		.await
	}

	/// Deletes the subscription stored under `id` and returns the service's last copy of it.
	pub async fn delete_webhook_subscription(&self, id: &str) -> Result<WebhookSubscription> {
		const OPERATION: SubscriptionOperation = SubscriptionOperation::Delete;

		obs::observe(OperationKind::from(OPERATION), "delete_webhook_subscription", async {
			let id = require_id(OPERATION, Some(id))?;

			self.exchange(OPERATION, Some(id), None, id).await
		})
		.await
	}

	async fn exchange(
		&self,
		operation: SubscriptionOperation,
		id: Option<&str>,
		body: Option<Vec<u8>>,
		subject: &str,
	) -> Result<WebhookSubscription> {
		let url = self.subscription_url(id)?;
		let authorization = self.credentials.authorization_header().await?;
		let mut request =
			self.http_client.request(method_of(operation), url).header(AUTHORIZATION, authorization);

		if let Some(body) = body {
			request = request.header(CONTENT_TYPE, JSON).body(body);
		}

		let response = self.http_client.execute("subscription", request).await?;
		let envelope = response.decode::<SubscriptionEnvelope>().map_err(|source| {
			DecodeError::SubscriptionResponse { operation, source, status: response.status }
		})?;

		match envelope.into_outcome() {
			EnvelopeOutcome::Ok(subscription) => Ok(subscription),
			EnvelopeOutcome::Missing { status } =>
				Err(Error::OutOfBandChange { operation, subject: subject.to_owned(), status }),
		}
	}
}

fn method_of(operation: SubscriptionOperation) -> Method {
	match operation {
		SubscriptionOperation::Create => Method::POST,
		SubscriptionOperation::Read => Method::GET,
		SubscriptionOperation::Update => Method::PUT,
		SubscriptionOperation::Delete => Method::DELETE,
	}
}

fn require_id(operation: SubscriptionOperation, id: Option<&str>) -> Result<&str> {
	id.filter(|id| !id.is_empty()).ok_or(Error::MissingId { operation })
}
