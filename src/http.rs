//! Transport primitives shared by the token exchange and the subscription calls.
//!
//! [`ReqwestHttpClient`] owns the connection pool; it carries no state that affects correctness so
//! it is cloned freely between the credential cache and the CRUD paths. [`RawResponse`] buffers the
//! body so decoding happens after the connection is released and decode failures can report the
//! HTTP status alongside the JSON path.

// std
use std::{ops::Deref, time::Duration};
// crates.io
use reqwest::RequestBuilder;
use serde::de::DeserializeOwned;
// self
use crate::{
	_prelude::*,
	error::{ConfigError, JsonPathError, TransportError},
};

/// Thin wrapper around [`ReqwestClient`] so shared HTTP behavior lives in one place.
#[derive(Clone, Debug, Default)]
pub struct ReqwestHttpClient(pub ReqwestClient);
impl ReqwestHttpClient {
	/// Wraps an existing reqwest [`ReqwestClient`].
	pub fn with_client(client: ReqwestClient) -> Self {
		Self(client)
	}

	/// Builds a client whose requests fail after `timeout`.
	pub fn with_timeout(timeout: Duration) -> Result<Self, ConfigError> {
		let client =
			ReqwestClient::builder().timeout(timeout).build().map_err(ConfigError::http_client_build)?;

		Ok(Self(client))
	}

	/// Sends `request` and buffers the response body.
	///
	/// `endpoint` labels transport failures (`token` or `subscription`).
	pub(crate) async fn execute(
		&self,
		endpoint: &'static str,
		request: RequestBuilder,
	) -> Result<RawResponse, TransportError> {
		let response =
			request.send().await.map_err(|e| TransportError::from_reqwest(endpoint, e))?;
		let status = response.status().as_u16();
		let body =
			response.bytes().await.map_err(|e| TransportError::from_reqwest(endpoint, e))?.to_vec();

		Ok(RawResponse { status, body })
	}
}
impl AsRef<ReqwestClient> for ReqwestHttpClient {
	fn as_ref(&self) -> &ReqwestClient {
		&self.0
	}
}
impl Deref for ReqwestHttpClient {
	type Target = ReqwestClient;

	fn deref(&self) -> &Self::Target {
		&self.0
	}
}

/// Appends `segments` to `base`, percent-encoding each one.
pub(crate) fn api_url<'a, I>(base: &Url, segments: I) -> Result<Url, ConfigError>
where
	I: IntoIterator<Item = &'a str>,
{
	let mut url = base.clone();

	url.path_segments_mut()
		.map_err(|_| ConfigError::BaseUrlCannotBeABase { url: base.to_string() })?
		.pop_if_empty()
		.extend(segments);

	Ok(url)
}

/// Buffered HTTP response.
#[derive(Clone, Debug)]
pub(crate) struct RawResponse {
	pub(crate) status: u16,
	pub(crate) body: Vec<u8>,
}
impl RawResponse {
	/// Decodes the body, reporting the JSON path of the first failure.
	pub(crate) fn decode<T>(&self) -> Result<T, JsonPathError>
	where
		T: DeserializeOwned,
	{
		let mut de = serde_json::Deserializer::from_slice(&self.body);

		serde_path_to_error::deserialize(&mut de)
	}
}
