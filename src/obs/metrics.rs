// self
use crate::obs::{MiddlewareKind, MiddlewareOutcome};

/// Token lifecycle event implied by `outcome`, if any.
pub const fn token_event(outcome: MiddlewareOutcome) -> Option<&'static str> {
	match outcome {
		MiddlewareOutcome::Dispatched => Some("issued"),
		MiddlewareOutcome::Revoked => Some("revoked"),
		MiddlewareOutcome::Skipped | MiddlewareOutcome::Anonymous | MiddlewareOutcome::Failure =>
			None,
	}
}

/// Counts one middleware pass, plus the token event it produced.
///
/// With the `metrics` feature this feeds `jwt_dispatch_middleware_total{middleware, outcome}` and
/// `jwt_dispatch_tokens_total{event}` on the global recorder; otherwise it does nothing.
pub fn record_middleware_outcome(kind: MiddlewareKind, outcome: MiddlewareOutcome) {
	#[cfg(feature = "metrics")]
	{
		metrics::counter!(
			"jwt_dispatch_middleware_total",
			"middleware" => kind.as_str(),
			"outcome" => outcome.as_str()
		)
		.increment(1);

		if let Some(event) = token_event(outcome) {
			metrics::counter!("jwt_dispatch_tokens_total", "event" => event).increment(1);
		}
	}
	#[cfg(not(feature = "metrics"))]
	{
		let _ = (kind, outcome);
	}
}
