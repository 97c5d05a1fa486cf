//! Client configuration: base URL, API token, and transport timeout.

// std
use std::time::Duration;
// self
use crate::{_prelude::*, auth::TokenSecret, error::ConfigError};

/// Environment variable holding the LeanIX service URL.
pub const ENV_URL: &str = "LEANIX_URL";
/// Environment variable holding the LeanIX API token.
pub const ENV_API_TOKEN: &str = "LEANIX_API_TOKEN";
/// Legacy environment variable accepted when [`ENV_API_TOKEN`] is unset.
pub const ENV_AUTH_HEADER: &str = "LEANIX_AUTH_HEADER";

/// Resolved settings for a [`LeanixClient`](crate::client::LeanixClient).
#[derive(Clone, Debug)]
pub struct ClientConfig {
	/// Service root; API paths are appended to it.
	pub base_url: Url,
	/// Long-lived API token traded for an access token.
	pub api_token: TokenSecret,
	/// Per-request timeout applied by the default transport.
	pub timeout: Duration,
}
impl ClientConfig {
	/// Public LeanIX endpoint used when no base URL is configured.
	pub const DEFAULT_BASE_URL: &'static str = "https://svc.leanix.net";
	/// Default per-request timeout.
	pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

	/// Creates a builder seeded with the provided API token.
	pub fn builder(api_token: impl Into<String>) -> ClientConfigBuilder {
		ClientConfigBuilder::new(api_token)
	}

	/// Loads settings from the process environment.
	///
	/// See [`ClientConfig::from_lookup`] for the resolution order.
	pub fn from_env() -> Result<Self, ConfigError> {
		Self::from_lookup(|key| std::env::var(key).ok())
	}

	/// Resolves settings through `lookup`.
	///
	/// `LEANIX_URL` overrides the default base URL; the API token comes from `LEANIX_API_TOKEN`,
	/// falling back to `LEANIX_AUTH_HEADER`. Blank values count as unset.
	pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
	where
		F: Fn(&str) -> Option<String>,
	{
		let non_blank = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());
		let api_token = non_blank(ENV_API_TOKEN)
			.or_else(|| non_blank(ENV_AUTH_HEADER))
			.ok_or(ConfigError::MissingApiToken)?;
		let mut builder = Self::builder(api_token);

		if let Some(url) = non_blank(ENV_URL) {
			builder = builder.base_url_str(&url)?;
		}

		builder.build()
	}
}

/// Builder for [`ClientConfig`] values.
#[derive(Debug)]
pub struct ClientConfigBuilder {
	api_token: String,
	base_url: Option<Url>,
	timeout: Duration,
}
impl ClientConfigBuilder {
	fn new(api_token: impl Into<String>) -> Self {
		Self { api_token: api_token.into(), base_url: None, timeout: ClientConfig::DEFAULT_TIMEOUT }
	}

	/// Overrides the service root.
	pub fn base_url(mut self, url: Url) -> Self {
		self.base_url = Some(url);

		self
	}

	/// Parses and sets the service root.
	pub fn base_url_str(self, url: &str) -> Result<Self, ConfigError> {
		let url = Url::parse(url).map_err(|source| ConfigError::InvalidBaseUrl { source })?;

		Ok(self.base_url(url))
	}

	/// Overrides the per-request timeout (defaults to 10 seconds).
	pub fn timeout(mut self, timeout: Duration) -> Self {
		self.timeout = timeout;

		self
	}

	/// Validates the settings and produces a [`ClientConfig`].
	pub fn build(self) -> Result<ClientConfig, ConfigError> {
		if self.api_token.trim().is_empty() {
			return Err(ConfigError::MissingApiToken);
		}

		let base_url = match self.base_url {
			Some(url) => url,
			None => Url::parse(ClientConfig::DEFAULT_BASE_URL)
				.map_err(|source| ConfigError::InvalidBaseUrl { source })?,
		};

		if base_url.cannot_be_a_base() {
			return Err(ConfigError::BaseUrlCannotBeABase { url: base_url.into() });
		}

		Ok(ClientConfig {
			base_url,
			api_token: TokenSecret::new(self.api_token),
			timeout: self.timeout,
		})
	}
}

#[cfg(test)]
mod tests {
	// std
	use std::collections::HashMap;
	// self
	use super::*;

	fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
		let map = pairs
			.iter()
			.map(|(key, value)| ((*key).to_owned(), (*value).to_owned()))
			.collect::<HashMap<_, _>>();

		move |key: &str| map.get(key).cloned()
	}

	#[test]
	fn builder_applies_defaults() {
		let config = ClientConfig::builder("token").build().expect("Default config should build.");

		assert_eq!(config.base_url.as_str(), "https://svc.leanix.net/");
		assert_eq!(config.timeout, Duration::from_secs(10));
		assert_eq!(config.api_token.expose(), "token");
	}

	#[test]
	fn builder_rejects_blank_tokens_and_opaque_urls() {
		let err = ClientConfig::builder("  ").build().expect_err("Blank tokens must be rejected.");

		assert!(matches!(err, ConfigError::MissingApiToken));

		let err = ClientConfig::builder("token")
			.base_url_str("mailto:ops@example.com")
			.expect("Mailto URLs parse successfully.")
			.build()
			.expect_err("Opaque URLs must be rejected.");

		assert!(matches!(err, ConfigError::BaseUrlCannotBeABase { .. }));

		let err = ClientConfig::builder("token")
			.base_url_str("not a url")
			.expect_err("Garbage base URLs must fail to parse.");

		assert!(matches!(err, ConfigError::InvalidBaseUrl { .. }));
	}

	#[test]
	fn lookup_prefers_api_token_over_legacy_variable() {
		let config = ClientConfig::from_lookup(lookup_from(&[
			(ENV_URL, "https://eu.leanix.net"),
			(ENV_API_TOKEN, "primary"),
			(ENV_AUTH_HEADER, "legacy"),
		]))
		.expect("Lookup config should build.");

		assert_eq!(config.base_url.as_str(), "https://eu.leanix.net/");
		assert_eq!(config.api_token.expose(), "primary");

		let config = ClientConfig::from_lookup(lookup_from(&[
			(ENV_API_TOKEN, ""),
			(ENV_AUTH_HEADER, "legacy"),
		]))
		.expect("Legacy variable should be accepted.");

		assert_eq!(config.base_url.as_str(), "https://svc.leanix.net/");
		assert_eq!(config.api_token.expose(), "legacy");
	}

	#[test]
	fn lookup_without_token_fails() {
		let err = ClientConfig::from_lookup(lookup_from(&[(ENV_URL, "https://eu.leanix.net")]))
			.expect_err("Missing tokens must be reported.");

		assert!(matches!(err, ConfigError::MissingApiToken));
	}
}
