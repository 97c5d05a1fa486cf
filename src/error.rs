//! Client-level error types shared across the credential cache, CRUD calls, and adapters.

// self
use crate::{_prelude::*, client::SubscriptionOperation};

/// Client-wide result type alias returning [`Error`] by default.
pub type Result<T, E = Error> = std::result::Result<T, E>;

type BoxError = Box<dyn StdError + Send + Sync>;

/// Structured JSON failure carrying the path of the offending field.
pub type JsonPathError = serde_path_to_error::Error<serde_json::Error>;

/// Canonical client error exposed by public APIs.
#[derive(Debug, ThisError)]
pub enum Error {
	/// Local configuration problem.
	#[error(transparent)]
	Config(#[from] ConfigError),
	/// Transport failure (DNS, TCP, TLS, timeout).
	#[error(transparent)]
	Transport(#[from] TransportError),
	/// Response body could not be decoded.
	#[error(transparent)]
	Decode(#[from] DecodeError),
	/// Request body could not be serialized.
	#[error("Subscription could not be serialized.")]
	Encode(#[source] serde_json::Error),

	/// The response envelope carried no usable subscription.
	///
	/// The remote resource is missing or was altered by someone else; adapters treat this as
	/// "not found".
	#[error(
		"Failed to {operation} subscription '{subject}'. Maybe it was already {} outside of this client?",
		.operation.out_of_band_hint()
	)]
	OutOfBandChange {
		/// Operation that observed the change.
		operation: SubscriptionOperation,
		/// Subscription identifier (create/update) or id (read/delete) involved.
		subject: String,
		/// Envelope status reported by the service.
		status: String,
	},
	/// A subscription id is required but absent or empty.
	#[error("A subscription id is required to {operation} a subscription.")]
	MissingId {
		/// Operation rejected before any request was sent.
		operation: SubscriptionOperation,
	},
}
impl Error {
	/// Returns `true` when the error signals a resource changed outside of this client.
	pub fn is_out_of_band_change(&self) -> bool {
		matches!(self, Self::OutOfBandChange { .. })
	}
}

/// Configuration and validation failures raised while building a client.
#[derive(Debug, ThisError)]
pub enum ConfigError {
	/// HTTP client could not be constructed.
	#[error("HTTP client could not be constructed.")]
	HttpClientBuild {
		/// Underlying transport builder failure.
		#[source]
		source: BoxError,
	},
	/// Base URL cannot be parsed.
	#[error("Base URL is invalid.")]
	InvalidBaseUrl {
		/// Underlying parsing failure.
		#[source]
		source: url::ParseError,
	},
	/// Base URL cannot carry path segments (e.g. `mailto:`).
	#[error("Base URL `{url}` cannot be used as a base for API paths.")]
	BaseUrlCannotBeABase {
		/// Offending URL.
		url: String,
	},
	/// API token is empty or whitespace.
	#[error("LeanIX API token is missing.")]
	MissingApiToken,
}
impl ConfigError {
	/// Wraps a transport's builder failure inside [`ConfigError`].
	pub fn http_client_build(src: impl 'static + Send + Sync + StdError) -> Self {
		Self::HttpClientBuild { source: Box::new(src) }
	}
}

/// Transport-level failures (network, timeout).
#[derive(Debug, ThisError)]
pub enum TransportError {
	/// Underlying HTTP client reported a network failure.
	#[error("Network error occurred while calling the {endpoint} endpoint.")]
	Network {
		/// Endpoint label (`token` or `subscription`).
		endpoint: &'static str,
		/// Transport-specific network error.
		#[source]
		source: BoxError,
	},
	/// Request exceeded the configured timeout.
	#[error("Request timed out while calling the {endpoint} endpoint.")]
	Timeout {
		/// Endpoint label (`token` or `subscription`).
		endpoint: &'static str,
		/// Transport-specific timeout error.
		#[source]
		source: BoxError,
	},
}
impl TransportError {
	/// Classifies a reqwest failure raised while calling `endpoint`.
	pub fn from_reqwest(endpoint: &'static str, e: ReqwestError) -> Self {
		if e.is_timeout() {
			Self::Timeout { endpoint, source: Box::new(e) }
		} else {
			Self::Network { endpoint, source: Box::new(e) }
		}
	}
}

/// Malformed or unexpected JSON returned by the service.
#[derive(Debug, ThisError)]
pub enum DecodeError {
	/// Token endpoint response could not be parsed.
	#[error("Token endpoint returned malformed JSON (HTTP {status}).")]
	TokenResponse {
		/// Structured parsing failure.
		#[source]
		source: JsonPathError,
		/// HTTP status code of the response.
		status: u16,
	},
	/// Subscription endpoint response could not be parsed.
	#[error("Subscription endpoint returned malformed JSON during {operation} (HTTP {status}).")]
	SubscriptionResponse {
		/// Operation whose response failed to decode.
		operation: SubscriptionOperation,
		/// Structured parsing failure.
		#[source]
		source: JsonPathError,
		/// HTTP status code of the response.
		status: u16,
	},
}

#[cfg(test)]
mod tests {
	// self
	use super::*;

	#[test]
	fn out_of_band_messages_name_operation_and_subject() {
		let created = Error::OutOfBandChange {
			operation: SubscriptionOperation::Create,
			subject: "hook".into(),
			status: "Ok".into(),
		};
		let deleted = Error::OutOfBandChange {
			operation: SubscriptionOperation::Delete,
			subject: "id-1".into(),
			status: "Ok".into(),
		};

		assert_eq!(
			created.to_string(),
			"Failed to create subscription 'hook'. Maybe it was already created outside of this client?"
		);
		assert_eq!(
			deleted.to_string(),
			"Failed to delete subscription 'id-1'. Maybe it was already deleted outside of this client?"
		);
		assert!(created.is_out_of_band_change());
	}

	#[test]
	fn missing_id_is_not_an_out_of_band_change() {
		let err = Error::MissingId { operation: SubscriptionOperation::Update };

		assert_eq!(err.to_string(), "A subscription id is required to update a subscription.");
		assert!(!err.is_out_of_band_change());
	}
}
