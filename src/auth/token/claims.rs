//! Claims carried by dispatched tokens.

// self
use crate::{
	_prelude::*,
	auth::{Jti, TokenScope},
};

/// Decoded JWT payload.
///
/// Registered claims are typed; anything contributed by
/// [`JwtSubject::jwt_payload`](crate::auth::JwtSubject::jwt_payload) lands in `extra`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct JwtPayload {
	/// Subject of the token.
	pub sub: String,
	/// Scope the token was issued for.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub scp: Option<TokenScope>,
	/// Audience taken from the dispatch request, if any.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub aud: Option<String>,
	/// Issued-at instant (Unix seconds).
	pub iat: i64,
	/// Expiry instant (Unix seconds).
	pub exp: i64,
	/// Unique token identifier used by revocation strategies.
	pub jti: Jti,
	/// Issuer, when configured.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub iss: Option<String>,
	/// Additional claims.
	#[serde(flatten)]
	pub extra: Map<String, Value>,
}
impl JwtPayload {
	/// Returns `true` once `instant` reaches the `exp` claim.
	pub fn is_expired_at(&self, instant: OffsetDateTime) -> bool {
		instant.unix_timestamp() >= self.exp
	}

	/// Remaining lifetime relative to `instant`; zero once expired.
	pub fn remaining_at(&self, instant: OffsetDateTime) -> Duration {
		let remaining = Duration::seconds(self.exp - instant.unix_timestamp());

		if remaining.is_negative() { Duration::ZERO } else { remaining }
	}
}
