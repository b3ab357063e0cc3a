//! Thread-safe in-memory allowlist of dispatched tokens per subject.

// self
use crate::{
	_prelude::*,
	auth::{Jti, JwtPayload, JwtSubject},
	codec::IssuedToken,
	revocation::{RevocationError, RevocationStrategy},
};

type AllowMap = Arc<RwLock<HashMap<String, HashMap<Jti, i64>>>>;

/// Accepts only tokens recorded at dispatch time; anything else counts as revoked.
///
/// Clones share state, so one instance can back several configurations.
#[derive(Clone, Debug, Default)]
pub struct Allowlist(AllowMap);
impl Allowlist {
	/// Identifiers currently allowed for `subject`, in no particular order.
	pub fn tokens_for(&self, subject: &str) -> Vec<Jti> {
		self.0
			.read()
			.get(subject)
			.map(|tokens| tokens.keys().cloned().collect())
			.unwrap_or_default()
	}

	/// Revokes every token issued to `subject` (sign out everywhere); returns how many were dropped.
	pub fn revoke_all(&self, subject: &str) -> usize {
		self.0.write().remove(subject).map(|tokens| tokens.len()).unwrap_or(0)
	}

	/// Drops entries whose tokens expired at or before `instant`; returns how many were removed.
	pub fn purge_expired(&self, instant: OffsetDateTime) -> usize {
		let cutoff = instant.unix_timestamp();
		let mut guard = self.0.write();
		let mut removed = 0;

		guard.retain(|_, tokens| {
			let before = tokens.len();

			tokens.retain(|_, exp| *exp > cutoff);
			removed += before - tokens.len();

			!tokens.is_empty()
		});

		removed
	}

	fn allow_now(map: &AllowMap, payload: &JwtPayload) {
		map.write()
			.entry(payload.sub.clone())
			.or_default()
			.insert(payload.jti.clone(), payload.exp);
	}

	fn revoke_now(map: &AllowMap, payload: &JwtPayload) {
		let mut guard = map.write();

		if let Some(tokens) = guard.get_mut(&payload.sub) {
			tokens.remove(&payload.jti);

			if tokens.is_empty() {
				guard.remove(&payload.sub);
			}
		}
	}
}
impl RevocationStrategy for Allowlist {
	fn is_revoked(&self, payload: &JwtPayload) -> Result<bool, RevocationError> {
		let guard = self.0.read();
		let allowed =
			guard.get(&payload.sub).is_some_and(|tokens| tokens.contains_key(&payload.jti));

		Ok(!allowed)
	}

	fn revoke(&self, payload: &JwtPayload) -> Result<(), RevocationError> {
		Self::revoke_now(&self.0, payload);

		Ok(())
	}

	fn after_dispatch(
		&self,
		_identity: &dyn JwtSubject,
		token: &IssuedToken,
	) -> Result<(), RevocationError> {
		Self::allow_now(&self.0, &token.payload);

		Ok(())
	}
}

#[cfg(test)]
mod tests {
	// self
	use super::*;
	use crate::{_preludet::TestUser, auth::TokenSecret};

	fn issued(sub: &str, jti: &str, exp: i64) -> IssuedToken {
		IssuedToken {
			token: TokenSecret::new(format!("token-{jti}")),
			payload: JwtPayload {
				sub: sub.into(),
				scp: None,
				aud: None,
				iat: 0,
				exp,
				jti: Jti::new(jti).expect("Jti fixture should be valid."),
				iss: None,
				extra: Map::new(),
			},
		}
	}

	#[test]
	fn tokens_are_revoked_until_dispatched() {
		let allowlist = Allowlist::default();
		let token = issued("42", "jti-1", 100);

		assert!(allowlist.is_revoked(&token.payload).expect("Lookup should succeed."));

		allowlist
			.after_dispatch(&TestUser::new("42"), &token)
			.expect("Recording a dispatch should succeed.");

		assert!(!allowlist.is_revoked(&token.payload).expect("Lookup should succeed."));
		assert_eq!(allowlist.tokens_for("42"), vec![token.payload.jti.clone()]);
	}

	#[test]
	fn revoke_removes_single_token_and_empty_subjects() {
		let allowlist = Allowlist::default();
		let user = TestUser::new("42");
		let first = issued("42", "jti-1", 100);
		let second = issued("42", "jti-2", 100);

		allowlist.after_dispatch(&user, &first).expect("Dispatch should be recorded.");
		allowlist.after_dispatch(&user, &second).expect("Dispatch should be recorded.");
		allowlist.revoke(&first.payload).expect("Revocation should succeed.");

		assert!(allowlist.is_revoked(&first.payload).expect("Lookup should succeed."));
		assert!(!allowlist.is_revoked(&second.payload).expect("Lookup should succeed."));

		allowlist.revoke(&second.payload).expect("Revocation should succeed.");

		assert!(allowlist.tokens_for("42").is_empty());
		assert_eq!(allowlist.revoke_all("42"), 0);
	}

	#[test]
	fn jti_is_scoped_to_subject() {
		let allowlist = Allowlist::default();
		let token = issued("42", "jti-1", 100);

		allowlist.after_dispatch(&TestUser::new("42"), &token).expect("Dispatch should record.");

		let mut forged = token.payload.clone();

		forged.sub = "43".into();

		assert!(allowlist.is_revoked(&forged).expect("Lookup should succeed."));
	}

	#[test]
	fn revoke_all_and_purge() {
		let allowlist = Allowlist::default();
		let user = TestUser::new("42");

		allowlist.after_dispatch(&user, &issued("42", "old", 100)).expect("Dispatch should record.");
		allowlist.after_dispatch(&user, &issued("42", "new", 300)).expect("Dispatch should record.");
		allowlist
			.after_dispatch(&TestUser::new("7"), &issued("7", "other", 100))
			.expect("Dispatch should record.");

		let instant =
			OffsetDateTime::from_unix_timestamp(200).expect("Timestamp fixture should be valid.");

		assert_eq!(allowlist.purge_expired(instant), 2);
		assert!(allowlist.tokens_for("7").is_empty());
		assert_eq!(allowlist.revoke_all("42"), 1);
	}
}
