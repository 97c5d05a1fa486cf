//! Access credentials returned by the LeanIX token endpoint.

// self
use crate::_prelude::*;

/// Secret string that never reaches `Debug`/`Display` output.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TokenSecret(String);
impl TokenSecret {
	/// Wraps a secret value.
	pub fn new(value: impl Into<String>) -> Self {
		Self(value.into())
	}

	/// Returns the raw secret. Callers must avoid logging this string.
	pub fn expose(&self) -> &str {
		&self.0
	}
}
impl Debug for TokenSecret {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str("TokenSecret(<redacted>)")
	}
}
impl Display for TokenSecret {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str("<redacted>")
	}
}

/// Token endpoint payload.
#[derive(Clone, Debug, Deserialize)]
pub(crate) struct TokenResponse {
	pub(crate) access_token: TokenSecret,
	pub(crate) token_type: String,
}

/// Memoized access token plus the label the service issued it under.
#[derive(Clone)]
pub struct Credential {
	/// Token kind exactly as returned by the service (e.g. `Bearer`).
	pub token_type: String,
	/// Opaque access token.
	pub access_token: TokenSecret,
	/// When the exchange completed. Informational; the cache never expires credentials.
	pub issued_at: OffsetDateTime,
}
impl Credential {
	/// Builds a credential stamped with the current time.
	pub fn new(token_type: impl Into<String>, access_token: TokenSecret) -> Self {
		Self { token_type: token_type.into(), access_token, issued_at: OffsetDateTime::now_utc() }
	}

	/// Returns the `Authorization` header value, `"<token_type> <access_token>"`.
	pub fn header_value(&self) -> String {
		format!("{} {}", self.token_type, self.access_token.expose())
	}
}
impl Debug for Credential {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_struct("Credential")
			.field("token_type", &self.token_type)
			.field("access_token", &self.access_token)
			.field("issued_at", &self.issued_at)
			.finish()
	}
}
