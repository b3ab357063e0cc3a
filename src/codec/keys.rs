//! Key material parsing for the supported algorithm families.

// crates.io
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey};
// self
use crate::{_prelude::*, error::ConfigError};

/// Parses an algorithm name (`HS256`, `RS256`, `EdDSA`, ...).
pub fn parse_algorithm(name: &str) -> Result<Algorithm, ConfigError> {
	Algorithm::from_str(name.trim())
		.map_err(|_| ConfigError::UnsupportedAlgorithm { name: name.to_owned() })
}

/// Builds the signing key: raw secret bytes for HMAC, PEM private key otherwise.
pub fn encoding_key(algorithm: Algorithm, material: &str) -> Result<EncodingKey, ConfigError> {
	let pem = material.trim().as_bytes();
	let parsed = match algorithm {
		Algorithm::HS256 | Algorithm::HS384 | Algorithm::HS512 =>
			return Ok(EncodingKey::from_secret(material.as_bytes())),
		Algorithm::RS256
		| Algorithm::RS384
		| Algorithm::RS512
		| Algorithm::PS256
		| Algorithm::PS384
		| Algorithm::PS512 => EncodingKey::from_rsa_pem(pem),
		Algorithm::ES256 | Algorithm::ES384 => EncodingKey::from_ec_pem(pem),
		Algorithm::EdDSA => EncodingKey::from_ed_pem(pem),
	};

	parsed.map_err(|source| ConfigError::InvalidKey { algorithm, source })
}

/// Builds the verification key: raw secret bytes for HMAC, PEM public key otherwise.
pub fn decoding_key(algorithm: Algorithm, material: &str) -> Result<DecodingKey, ConfigError> {
	let pem = material.trim().as_bytes();
	let parsed = match algorithm {
		Algorithm::HS256 | Algorithm::HS384 | Algorithm::HS512 =>
			return Ok(DecodingKey::from_secret(material.as_bytes())),
		Algorithm::RS256
		| Algorithm::RS384
		| Algorithm::RS512
		| Algorithm::PS256
		| Algorithm::PS384
		| Algorithm::PS512 => DecodingKey::from_rsa_pem(pem),
		Algorithm::ES256 | Algorithm::ES384 => DecodingKey::from_ec_pem(pem),
		Algorithm::EdDSA => DecodingKey::from_ed_pem(pem),
	};

	parsed.map_err(|source| ConfigError::InvalidKey { algorithm, source })
}
