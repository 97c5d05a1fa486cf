//! Memoizing credential cache with a singleflight token exchange.
//!
//! [`CredentialCache`] trades the configured API token for an access token at most once per
//! instance. The whole check → fetch → memoize sequence runs under one async lock, so
//! concurrent callers either read the memoized credential or wait behind the single in-flight
//! exchange. A failed exchange stores nothing and the next caller starts over.
//!
//! Memoized credentials are trusted until [`CredentialCache::invalidate`] is called; there is no
//! expiry tracking.

// self
use crate::{
	_prelude::*,
	auth::{Credential, TokenResponse, TokenSecret},
	error::{ConfigError, DecodeError},
	http::{self, ReqwestHttpClient},
	obs::{self, OperationKind},
};

/// Lazily exchanges an API token for an access credential and memoizes the result.
pub struct CredentialCache {
	http_client: ReqwestHttpClient,
	token_endpoint: Url,
	api_token: TokenSecret,
	slot: AsyncMutex<Option<Credential>>,
}
impl CredentialCache {
	/// Basic-auth username paired with the API token.
	pub const API_TOKEN_USER: &'static str = "apitoken";
	/// Token endpoint path below the service root.
	pub const TOKEN_PATH: [&'static str; 5] = ["services", "mtm", "v1", "oauth2", "token"];

	/// Creates an empty cache that exchanges `api_token` against `base_url`.
	pub fn new(
		http_client: ReqwestHttpClient,
		base_url: &Url,
		api_token: TokenSecret,
	) -> Result<Self, ConfigError> {
		let token_endpoint = http::api_url(base_url, Self::TOKEN_PATH)?;

		Ok(Self { http_client, token_endpoint, api_token, slot: AsyncMutex::new(None) })
	}

	/// Returns the `Authorization` header value, exchanging the API token on first use.
	pub async fn authorization_header(&self) -> Result<String> {
		self.credential().await.map(|credential| credential.header_value())
	}

	/// Returns the memoized credential, exchanging the API token on first use.
	pub async fn credential(&self) -> Result<Credential> {
		let mut slot = self.slot.lock().await;

		if let Some(credential) = slot.as_ref() {
			return Ok(credential.clone());
		}

		let credential =
			obs::observe(OperationKind::TokenExchange, "credential_cache", self.exchange()).await?;

		obs::credential_memoized(&credential.token_type);

		*slot = Some(credential.clone());

		Ok(credential)
	}

	/// Drops the memoized credential so the next call exchanges again.
	///
	/// Waits for an in-flight exchange to finish first. Returns whether a credential was held.
	pub async fn invalidate(&self) -> bool {
		let had_credential = self.slot.lock().await.take().is_some();

		obs::credential_invalidated(had_credential);

		had_credential
	}

	/// Reports whether a credential is memoized; `false` while an exchange is in flight.
	pub fn is_cached(&self) -> bool {
		self.slot.try_lock().is_some_and(|slot| slot.is_some())
	}

	/// Token endpoint this cache exchanges against.
	pub fn token_endpoint(&self) -> &Url {
		&self.token_endpoint
	}

	async fn exchange(&self) -> Result<Credential> {
		let request = self
			.http_client
			.post(self.token_endpoint.clone())
			.basic_auth(Self::API_TOKEN_USER, Some(self.api_token.expose()))
			.form(&[("grant_type", "client_credentials")]);
		let response = self.http_client.execute("token", request).await?;
		let payload = response
			.decode::<TokenResponse>()
			.map_err(|source| DecodeError::TokenResponse { source, status: response.status })?;

		Ok(Credential::new(payload.token_type, payload.access_token))
	}
}
impl Debug for CredentialCache {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_struct("CredentialCache")
			.field("token_endpoint", &self.token_endpoint.as_str())
			.field("api_token", &self.api_token)
			.field("cached", &self.is_cached())
			.finish()
	}
}
