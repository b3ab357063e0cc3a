//! Optional observability helpers for middleware passes.
//!
//! # Feature Flags
//!
//! - Enable `tracing` to emit structured spans named `jwt_dispatch.middleware` with the
//!   `middleware` and `stage` fields, plus a `token` field holding the fingerprint of any token
//!   minted or revoked inside the span.
//! - Enable `metrics` to increment the `jwt_dispatch_middleware_total` counter for every pass,
//!   labeled by `middleware` + `outcome`, and `jwt_dispatch_tokens_total` labeled by `event`
//!   (`issued` or `revoked`).

mod metrics;
mod tracing;

pub use metrics::*;
pub use tracing::*;

// self
use crate::_prelude::*;

/// Middleware kinds observed by the crate.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum MiddlewareKind {
	/// Response-side token dispatch.
	TokenDispatcher,
	/// Request-side token revocation.
	RevocationManager,
}
impl MiddlewareKind {
	/// Returns a stable label suitable for span or metric fields.
	pub const fn as_str(self) -> &'static str {
		match self {
			MiddlewareKind::TokenDispatcher => "token_dispatcher",
			MiddlewareKind::RevocationManager => "revocation_manager",
		}
	}
}
impl Display for MiddlewareKind {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str(self.as_str())
	}
}

/// Outcome labels recorded for each pass.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum MiddlewareOutcome {
	/// Request did not match any configured path or rule.
	Skipped,
	/// Request matched but carried no identity (or no token to revoke).
	Anonymous,
	/// A token was minted and attached to the response.
	Dispatched,
	/// A presented token was handed to the revocation strategy.
	Revoked,
	/// Failure propagated back to the caller.
	Failure,
}
impl MiddlewareOutcome {
	/// Returns a stable label suitable for span or metric fields.
	pub const fn as_str(self) -> &'static str {
		match self {
			MiddlewareOutcome::Skipped => "skipped",
			MiddlewareOutcome::Anonymous => "anonymous",
			MiddlewareOutcome::Dispatched => "dispatched",
			MiddlewareOutcome::Revoked => "revoked",
			MiddlewareOutcome::Failure => "failure",
		}
	}
}
impl Display for MiddlewareOutcome {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str(self.as_str())
	}
}
