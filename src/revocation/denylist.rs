//! Thread-safe in-memory denylist keyed by `jti`.

// self
use crate::{
	_prelude::*,
	auth::{Jti, JwtPayload},
	revocation::{RevocationError, RevocationStrategy},
};

type DenyMap = Arc<RwLock<HashMap<Jti, i64>>>;

/// Revokes tokens by remembering their `jti` until the token would have expired anyway.
///
/// Clones share state, so one instance can back several configurations.
#[derive(Clone, Debug, Default)]
pub struct Denylist(DenyMap);
impl Denylist {
	/// Number of denied identifiers currently held.
	pub fn len(&self) -> usize {
		self.0.read().len()
	}

	/// Returns `true` if nothing has been revoked (or everything was purged).
	pub fn is_empty(&self) -> bool {
		self.0.read().is_empty()
	}

	/// Returns `true` if `jti` is denied.
	pub fn contains(&self, jti: &str) -> bool {
		self.0.read().contains_key(jti)
	}

	/// Drops entries whose tokens expired at or before `instant`; returns how many were removed.
	pub fn purge_expired(&self, instant: OffsetDateTime) -> usize {
		let cutoff = instant.unix_timestamp();
		let mut guard = self.0.write();
		let before = guard.len();

		guard.retain(|_, exp| *exp > cutoff);

		before - guard.len()
	}
}
impl RevocationStrategy for Denylist {
	fn is_revoked(&self, payload: &JwtPayload) -> Result<bool, RevocationError> {
		Ok(self.contains(&payload.jti))
	}

	fn revoke(&self, payload: &JwtPayload) -> Result<(), RevocationError> {
		self.0.write().insert(payload.jti.clone(), payload.exp);

		Ok(())
	}
}

#[cfg(test)]
mod tests {
	// self
	use super::*;

	fn payload(jti: &str, exp: i64) -> JwtPayload {
		JwtPayload {
			sub: "42".into(),
			scp: None,
			aud: None,
			iat: 0,
			exp,
			jti: Jti::new(jti).expect("Jti fixture should be valid."),
			iss: None,
			extra: Map::new(),
		}
	}

	#[test]
	fn revoke_then_lookup() {
		let denylist = Denylist::default();
		let revoked = payload("jti-1", 100);
		let untouched = payload("jti-2", 100);

		denylist.revoke(&revoked).expect("Revocation should succeed.");

		assert!(denylist.is_revoked(&revoked).expect("Lookup should succeed."));
		assert!(!denylist.is_revoked(&untouched).expect("Lookup should succeed."));
		assert_eq!(denylist.len(), 1);
	}

	#[test]
	fn clones_share_state() {
		let denylist = Denylist::default();
		let clone = denylist.clone();

		clone.revoke(&payload("jti-1", 100)).expect("Revocation should succeed.");

		assert!(denylist.contains("jti-1"));
	}

	#[test]
	fn purge_drops_only_expired_entries() {
		let denylist = Denylist::default();

		denylist.revoke(&payload("old", 100)).expect("Revocation should succeed.");
		denylist.revoke(&payload("fresh", 300)).expect("Revocation should succeed.");

		let instant =
			OffsetDateTime::from_unix_timestamp(200).expect("Timestamp fixture should be valid.");

		assert_eq!(denylist.purge_expired(instant), 1);
		assert!(!denylist.contains("old"));
		assert!(denylist.contains("fresh"));
	}
}
