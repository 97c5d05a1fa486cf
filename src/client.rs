//! Authenticated LeanIX client owning the credential cache and the shared transport.

mod subscriptions;

// self
use crate::{
	_prelude::*,
	auth::{Credential, CredentialCache},
	config::ClientConfig,
	error::ConfigError,
	http::{self, ReqwestHttpClient},
};

/// CRUD operation performed against the subscription endpoint.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum SubscriptionOperation {
	/// `POST /services/webhooks/v1/subscriptions`.
	Create,
	/// `GET /services/webhooks/v1/subscriptions/{id}`.
	Read,
	/// `PUT /services/webhooks/v1/subscriptions/{id}`.
	Update,
	/// `DELETE /services/webhooks/v1/subscriptions/{id}`.
	Delete,
}
impl SubscriptionOperation {
	/// Returns the lowercase verb used in error messages.
	pub const fn as_str(self) -> &'static str {
		match self {
			Self::Create => "create",
			Self::Read => "read",
			Self::Update => "update",
			Self::Delete => "delete",
		}
	}

	/// Past participle describing the likely out-of-band change.
	pub const fn out_of_band_hint(self) -> &'static str {
		match self {
			Self::Create | Self::Update => "created",
			Self::Read | Self::Delete => "deleted",
		}
	}
}
impl Display for SubscriptionOperation {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str(self.as_str())
	}
}

/// LeanIX API client for webhook subscriptions.
///
/// Every CRUD call first asks the owned [`CredentialCache`] for an `Authorization` value, so the
/// token exchange happens once per client, on first use. The client is `Send + Sync`; share it
/// behind an [`Arc`] to issue calls from several tasks.
pub struct LeanixClient {
	http_client: ReqwestHttpClient,
	credentials: CredentialCache,
	subscriptions_endpoint: Url,
}
impl LeanixClient {
	/// Webhook subscription collection path below the service root.
	pub const SUBSCRIPTIONS_PATH: [&'static str; 4] = ["services", "webhooks", "v1", "subscriptions"];

	/// Creates a client whose transport applies the configured timeout.
	pub fn new(config: ClientConfig) -> Result<Self> {
		let http_client = ReqwestHttpClient::with_timeout(config.timeout)?;

		Self::with_http_client(config, http_client)
	}

	/// Creates a client that reuses a caller-provided transport.
	///
	/// `config.timeout` is not applied; configure it on the supplied client instead.
	pub fn with_http_client(config: ClientConfig, http_client: ReqwestHttpClient) -> Result<Self> {
		let ClientConfig { base_url, api_token, .. } = config;
		let credentials = CredentialCache::new(http_client.clone(), &base_url, api_token)?;
		let subscriptions_endpoint = http::api_url(&base_url, Self::SUBSCRIPTIONS_PATH)?;

		Ok(Self { http_client, credentials, subscriptions_endpoint })
	}

	/// Returns the `Authorization` value used for API calls, exchanging the API token on first use.
	pub async fn authorization_header(&self) -> Result<String> {
		self.credentials.authorization_header().await
	}

	/// Returns the memoized credential, exchanging the API token on first use.
	pub async fn credential(&self) -> Result<Credential> {
		self.credentials.credential().await
	}

	/// Drops the memoized credential; the next call performs a fresh exchange.
	pub async fn invalidate_credential(&self) -> bool {
		self.credentials.invalidate().await
	}

	/// Owned credential cache.
	pub fn credentials(&self) -> &CredentialCache {
		&self.credentials
	}

	fn subscription_url(&self, id: Option<&str>) -> Result<Url, ConfigError> {
		match id {
			Some(id) => http::api_url(&self.subscriptions_endpoint, [id]),
			None => Ok(self.subscriptions_endpoint.clone()),
		}
	}
}
impl Debug for LeanixClient {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_struct("LeanixClient")
			.field("subscriptions_endpoint", &self.subscriptions_endpoint.as_str())
			.field("credentials", &self.credentials)
			.finish()
	}
}
