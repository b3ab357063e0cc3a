//! Contract implemented by authenticated identities that can receive a dispatched token.

// self
use crate::{
	_prelude::*,
	auth::{JwtPayload, TokenSecret},
};

/// An authenticated identity resolved by the upstream authentication layer.
///
/// Only [`jwt_subject`](Self::jwt_subject) is required. Override
/// [`jwt_payload`](Self::jwt_payload) to add claims (they take precedence over the defaults) and
/// [`on_jwt_dispatch`](Self::on_jwt_dispatch) to observe each token minted for the identity.
pub trait JwtSubject
where
	Self: Send + Sync + Debug,
{
	/// Value stamped into the `sub` claim.
	fn jwt_subject(&self) -> String;

	/// Extra claims merged into the payload after the defaults.
	fn jwt_payload(&self) -> Map<String, Value> {
		Map::new()
	}

	/// Called once per dispatched token, before the revocation strategy runs.
	fn on_jwt_dispatch(&self, _token: &TokenSecret, _payload: &JwtPayload) {}
}
