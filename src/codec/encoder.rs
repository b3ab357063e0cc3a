//! Token minting for authenticated identities.

// crates.io
use jsonwebtoken::{Algorithm, EncodingKey, Header};
// self
use crate::{
	_prelude::*,
	auth::{Jti, JwtPayload, JwtSubject, TokenScope, TokenSecret},
};

/// Encoded token plus the payload it carries.
#[derive(Clone, Debug)]
pub struct IssuedToken {
	/// Encoded JWT; callers must avoid logging it.
	pub token: TokenSecret,
	/// Claims signed into the token.
	pub payload: JwtPayload,
}

/// Signs payloads for identities using the configured key and lifetime.
#[derive(Clone)]
pub struct TokenEncoder {
	key: EncodingKey,
	algorithm: Algorithm,
	expiration: Duration,
	issuer: Option<String>,
}
impl TokenEncoder {
	/// Creates an encoder; `expiration` is the lifetime stamped into every token.
	pub fn new(
		algorithm: Algorithm,
		key: EncodingKey,
		expiration: Duration,
		issuer: Option<String>,
	) -> Self {
		Self { key, algorithm, expiration, issuer }
	}

	/// Signing algorithm.
	pub fn algorithm(&self) -> Algorithm {
		self.algorithm
	}

	/// Lifetime of minted tokens.
	pub fn expiration(&self) -> Duration {
		self.expiration
	}

	/// Mints a token for `identity` at the current instant.
	pub fn encode(
		&self,
		identity: &dyn JwtSubject,
		scope: Option<&TokenScope>,
		aud: Option<&str>,
	) -> Result<IssuedToken> {
		self.encode_at(identity, scope, aud, OffsetDateTime::now_utc())
	}

	/// Mints a token for `identity` as if issued at `now`.
	///
	/// Default claims (`sub`, `scp`, `aud`, `iat`, `exp`, `jti`, `iss`) are written first; claims
	/// from [`JwtSubject::jwt_payload`] are merged on top and win on conflict.
	pub fn encode_at(
		&self,
		identity: &dyn JwtSubject,
		scope: Option<&TokenScope>,
		aud: Option<&str>,
		now: OffsetDateTime,
	) -> Result<IssuedToken> {
		let iat = now.unix_timestamp();
		let defaults = JwtPayload {
			sub: identity.jwt_subject(),
			scp: scope.cloned(),
			aud: aud.map(str::to_owned),
			iat,
			exp: iat.checked_add(self.expiration.whole_seconds()).ok_or(Error::ExpiryOverflow)?,
			jti: Jti::generate(),
			iss: self.issuer.clone(),
			extra: Map::new(),
		};
		let mut claims = match serde_json::to_value(defaults)? {
			Value::Object(map) => map,
			_ => Map::new(),
		};

		claims.extend(identity.jwt_payload());

		let payload = JwtPayload::deserialize(&Value::Object(claims))?;
		let token = jsonwebtoken::encode(&Header::new(self.algorithm), &payload, &self.key)
			.map_err(|source| Error::Encode { source })?;

		Ok(IssuedToken { token: TokenSecret::new(token), payload })
	}
}
impl Debug for TokenEncoder {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_struct("TokenEncoder")
			.field("key", &"<redacted>")
			.field("algorithm", &self.algorithm)
			.field("expiration", &self.expiration)
			.field("issuer", &self.issuer)
			.finish()
	}
}
