//! Token verification for presented bearer tokens.

// crates.io
use jsonwebtoken::{Algorithm, DecodingKey, Validation};
// self
use crate::{_prelude::*, auth::JwtPayload, revocation::RevocationStrategy};

/// Verifies signature, algorithm, expiry, issuer, and (optionally) audience.
#[derive(Clone)]
pub struct TokenDecoder {
	key: DecodingKey,
	algorithm: Algorithm,
	issuer: Option<String>,
	leeway_secs: u64,
}
impl TokenDecoder {
	const DEFAULT_LEEWAY_SECS: u64 = 0;

	/// Creates a decoder; `issuer`, when set, must match the `iss` claim exactly.
	pub fn new(algorithm: Algorithm, key: DecodingKey, issuer: Option<String>) -> Self {
		Self { key, algorithm, issuer, leeway_secs: Self::DEFAULT_LEEWAY_SECS }
	}

	/// Overrides the clock-skew leeway applied to `exp` (defaults to zero).
	pub fn with_leeway(mut self, leeway: Duration) -> Self {
		self.leeway_secs = leeway.whole_seconds().max(0) as u64;

		self
	}

	/// Decodes and verifies `token`; `aud`, when supplied, must match the `aud` claim.
	pub fn decode(&self, token: &str, aud: Option<&str>) -> Result<JwtPayload> {
		let mut validation = Validation::new(self.algorithm);

		validation.leeway = self.leeway_secs;
		validation.set_required_spec_claims(&["exp", "sub"]);

		if let Some(issuer) = &self.issuer {
			validation.set_issuer(&[issuer]);
		}

		match aud {
			Some(aud) => validation.set_audience(&[aud]),
			None => validation.validate_aud = false,
		}

		jsonwebtoken::decode::<JwtPayload>(token, &self.key, &validation)
			.map(|data| data.claims)
			.map_err(|source| Error::Decode { source })
	}

	/// Decodes `token` and rejects it with [`Error::Revoked`] if `strategy` reports it revoked.
	pub fn decode_unrevoked(
		&self,
		token: &str,
		aud: Option<&str>,
		strategy: &dyn RevocationStrategy,
	) -> Result<JwtPayload> {
		let payload = self.decode(token, aud)?;

		if strategy.is_revoked(&payload)? {
			return Err(Error::Revoked);
		}

		Ok(payload)
	}
}
impl Debug for TokenDecoder {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_struct("TokenDecoder")
			.field("key", &"<redacted>")
			.field("algorithm", &self.algorithm)
			.field("issuer", &self.issuer)
			.field("leeway_secs", &self.leeway_secs)
			.finish()
	}
}
