//! Optional observability helpers for client operations.
//!
//! # Feature Flags
//!
//! - Enable `tracing` to emit structured spans named `leanix_client.operation` with the
//!   `operation` and `stage` (call site) fields.
//! - Enable `metrics` to increment the `leanix_client_operation_total` counter for every
//!   attempt/success/failure, labeled by `operation` + `outcome`.

mod counter;
mod span;

pub use counter::*;
pub use span::*;

// self
use crate::{_prelude::*, client::SubscriptionOperation};

/// Network operations observed by the client.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum OperationKind {
	/// API token to access token exchange.
	TokenExchange,
	/// Subscription CRUD call.
	Subscription(SubscriptionOperation),
}
impl OperationKind {
	/// Returns a stable label suitable for span or metric fields.
	pub const fn as_str(self) -> &'static str {
		match self {
			OperationKind::TokenExchange => "token_exchange",
			OperationKind::Subscription(SubscriptionOperation::Create) => "create_subscription",
			OperationKind::Subscription(SubscriptionOperation::Read) => "read_subscription",
			OperationKind::Subscription(SubscriptionOperation::Update) => "update_subscription",
			OperationKind::Subscription(SubscriptionOperation::Delete) => "delete_subscription",
		}
	}
}
impl From<SubscriptionOperation> for OperationKind {
	fn from(operation: SubscriptionOperation) -> Self {
		Self::Subscription(operation)
	}
}
impl Display for OperationKind {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str(self.as_str())
	}
}

/// Outcome labels recorded for each attempt.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum OperationOutcome {
	/// Entry to a client operation.
	Attempt,
	/// Successful completion.
	Success,
	/// Failure propagated back to the caller.
	Failure,
}
impl OperationOutcome {
	/// Returns a stable label suitable for span or metric fields.
	pub const fn as_str(self) -> &'static str {
		match self {
			OperationOutcome::Attempt => "attempt",
			OperationOutcome::Success => "success",
			OperationOutcome::Failure => "failure",
		}
	}
}
impl Display for OperationOutcome {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str(self.as_str())
	}
}

/// Runs `fut` inside an operation span and records attempt + outcome counters.
pub async fn observe<T, Fut>(kind: OperationKind, stage: &'static str, fut: Fut) -> Result<T>
where
	Fut: Future<Output = Result<T>>,
{
	let span = OperationSpan::new(kind, stage);

	record_operation_outcome(kind, OperationOutcome::Attempt);

	let result = span.instrument(fut).await;

	match &result {
		Ok(_) => record_operation_outcome(kind, OperationOutcome::Success),
		Err(_) => record_operation_outcome(kind, OperationOutcome::Failure),
	}

	result
}

#[cfg(test)]
mod tests {
	// self
	use super::*;

	#[test]
	fn labels_are_stable() {
		assert_eq!(OperationKind::TokenExchange.as_str(), "token_exchange");
		assert_eq!(
			OperationKind::from(SubscriptionOperation::Update).to_string(),
			"update_subscription"
		);
		assert_eq!(OperationOutcome::Failure.to_string(), "failure");
	}

	#[tokio::test]
	async fn observe_passes_results_through() {
		let ok = observe(OperationKind::TokenExchange, "test", async { Ok(7) }).await;
		let err = observe::<(), _>(
			OperationKind::from(SubscriptionOperation::Delete),
			"test",
			async { Err(Error::MissingId { operation: SubscriptionOperation::Delete }) },
		)
		.await;

		assert_eq!(ok.expect("Successful futures should pass through."), 7);
		assert!(matches!(err, Err(Error::MissingId { .. })));
	}
}
