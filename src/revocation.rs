//! Revocation strategy contract, built-in in-memory strategies, and the revocation middleware.
//!
//! A strategy is the collaborator that tracks issued tokens for later invalidation. The
//! dispatcher only ever calls [`RevocationStrategy::after_dispatch`]; decoding paths call
//! [`is_revoked`](RevocationStrategy::is_revoked) and the
//! [`RevocationManager`] calls [`revoke`](RevocationStrategy::revoke).

pub mod allowlist;
pub mod denylist;
pub mod manager;

pub use allowlist::Allowlist;
pub use denylist::Denylist;
pub use manager::RevocationManager;

// self
use crate::{
	_prelude::*,
	auth::{JwtPayload, JwtSubject},
	codec::IssuedToken,
};

/// Strategy hook that tracks issued tokens and answers revocation queries.
///
/// Implementors are required to be `Send + Sync` and own whatever locking they need; the
/// middleware shares a single instance across concurrently handled exchanges. Failures are never
/// recovered locally and propagate to the caller as [`Error::Revocation`].
pub trait RevocationStrategy
where
	Self: Send + Sync,
{
	/// Returns `true` if the token described by `payload` must be rejected.
	fn is_revoked(&self, payload: &JwtPayload) -> Result<bool, RevocationError>;

	/// Invalidates the token described by `payload`.
	fn revoke(&self, payload: &JwtPayload) -> Result<(), RevocationError>;

	/// Notifies the strategy that `token` was just dispatched to `identity`.
	///
	/// The default implementation does nothing, which is enough for deny-style strategies.
	fn after_dispatch(
		&self,
		_identity: &dyn JwtSubject,
		_token: &IssuedToken,
	) -> Result<(), RevocationError> {
		Ok(())
	}
}

/// Error type produced by [`RevocationStrategy`] implementations.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, ThisError)]
pub enum RevocationError {
	/// Backend-level failure for the strategy's storage.
	#[error("Revocation backend failure: {message}.")]
	Backend {
		/// Human-readable error payload.
		message: String,
	},
}

/// Strategy that never revokes anything; the default when none is configured.
#[derive(Clone, Copy, Debug, Default)]
pub struct NullStrategy;
impl Display for NullStrategy {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str("null-revocation-strategy")
	}
}
impl RevocationStrategy for NullStrategy {
	fn is_revoked(&self, _payload: &JwtPayload) -> Result<bool, RevocationError> {
		Ok(false)
	}

	fn revoke(&self, _payload: &JwtPayload) -> Result<(), RevocationError> {
		Ok(())
	}
}
