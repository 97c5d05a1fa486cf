//! Async LeanIX client for webhook subscriptions: memoized client-credentials tokens behind a
//! singleflight lock, typed subscription envelopes, and a reconcile adapter for declarative tools.

#![deny(clippy::all, missing_docs, unused_crate_dependencies)]

pub mod auth;
pub mod client;
pub mod config;
pub mod error;
pub mod http;
pub mod obs;
pub mod resource;
pub mod subscription;
#[cfg(any(test, feature = "test"))]
pub mod _preludet {
	//! Convenience re-exports and helpers for tests; enabled via `cfg(test)` or the `test` crate
	//! feature.

	pub use crate::_prelude::*;

	// self
	use crate::{client::LeanixClient, config::ClientConfig};

	/// API token shared by tests that stub the token endpoint.
	pub const TEST_API_TOKEN: &str = "aVQEzWKwE2sSp3rhVKWwaVQEzWKwE2sSp3rhVKWw";

	/// Builds a client whose base URL points at a stub server.
	pub fn test_client(base_url: &str) -> LeanixClient {
		let config = ClientConfig::builder(TEST_API_TOKEN)
			.base_url_str(base_url)
			.and_then(|builder| builder.build())
			.expect("Failed to build client configuration for tests.");

		LeanixClient::new(config).expect("Failed to build LeanIX client for tests.")
	}
}

mod _prelude {
	pub use std::{
		error::Error as StdError,
		fmt::{Debug, Display, Formatter, Result as FmtResult},
		future::Future,
		str::FromStr,
		sync::Arc,
	};

	pub use async_lock::Mutex as AsyncMutex;
	pub use reqwest::{Client as ReqwestClient, Error as ReqwestError};
	pub use serde::{Deserialize, Serialize};
	pub use thiserror::Error as ThisError;
	pub use time::OffsetDateTime;
	pub use url::Url;

	pub use crate::error::{Error, Result};
}

pub use reqwest;
pub use url;
#[cfg(test)] use {base64 as _, color_eyre as _, httpmock as _, tokio as _};
