//! Credential exchange: redacted secrets, composed authorization values, and the memoizing cache.

pub mod cache;
pub mod credential;

pub use cache::*;
pub use credential::*;
