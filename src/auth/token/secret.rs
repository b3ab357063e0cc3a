//! Encoded JWT wrapper that keeps the raw token out of logs.

// crates.io
use base64::{Engine as _, engine::general_purpose::URL_SAFE_NO_PAD};
use sha2::{Digest, Sha256};
// self
use crate::_prelude::*;

/// Encoded JWT as it travels in a header.
///
/// `Debug` prints only the [`fingerprint`](Self::fingerprint) and `Display` prints nothing
/// useful, so the value can sit inside structs that get logged.
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct TokenSecret(String);
impl TokenSecret {
	const FINGERPRINT_LEN: usize = 12;

	/// Wraps an encoded token.
	pub fn new(token: impl Into<String>) -> Self {
		Self(token.into())
	}

	/// Raw encoded token. Never log the returned string.
	pub fn expose(&self) -> &str {
		&self.0
	}

	/// Short SHA-256 based label that correlates a token across log lines without revealing it.
	pub fn fingerprint(&self) -> String {
		let mut label = URL_SAFE_NO_PAD.encode(Sha256::digest(self.0.as_bytes()));

		label.truncate(Self::FINGERPRINT_LEN);

		label
	}
}
impl Debug for TokenSecret {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		write!(f, "TokenSecret({})", self.fingerprint())
	}
}
impl Display for TokenSecret {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str("<redacted jwt>")
	}
}

#[cfg(test)]
mod tests {
	// self
	use super::*;

	#[test]
	fn formatting_never_reveals_the_token() {
		let token = TokenSecret::new("header.payload.signature");
		let debug = format!("{token:?}");

		assert_eq!(debug, format!("TokenSecret({})", token.fingerprint()));
		assert!(!debug.contains("payload"));
		assert_eq!(token.to_string(), "<redacted jwt>");
	}

	#[test]
	fn fingerprint_distinguishes_tokens() {
		let a = TokenSecret::new("header.payload.signature");
		let c = TokenSecret::new("header.payload.other");

		assert_eq!(a.fingerprint(), TokenSecret::new(a.expose()).fingerprint());
		assert_ne!(a.fingerprint(), c.fingerprint());
		assert_eq!(a.fingerprint().len(), 12);
	}
}
