//! Validated claim identifiers (`jti`, `scp`).

// std
use std::{borrow::Borrow, ops::Deref};
// crates.io
use base64::{Engine as _, engine::general_purpose::URL_SAFE_NO_PAD};
use rand::Rng;
// self
use crate::_prelude::*;

/// Error returned when a claim identifier is rejected.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, ThisError)]
pub enum IdentifierError {
	/// The claim value was empty.
	#[error("`{claim}` claim cannot be empty.")]
	Empty {
		/// Claim name.
		claim: &'static str,
	},
	/// The claim value contains a character outside visible ASCII.
	#[error("`{claim}` claim contains the disallowed character {found:?}.")]
	InvalidCharacter {
		/// Claim name.
		claim: &'static str,
		/// First offending character.
		found: char,
	},
	/// The claim value is longer than allowed.
	#[error("`{claim}` claim exceeds {max} bytes.")]
	TooLong {
		/// Claim name.
		claim: &'static str,
		/// Maximum permitted length in bytes.
		max: usize,
	},
}

macro_rules! claim_id {
	($(#[$meta:meta])* $name:ident { claim: $claim:literal, max_len: $max:expr }) => {
		$(#[$meta])*
		#[derive(Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
		#[serde(try_from = "String", into = "String")]
		pub struct $name(String);
		impl $name {
			/// Claim this identifier is carried in.
			pub const CLAIM: &'static str = $claim;
			/// Maximum length in bytes.
			pub const MAX_LEN: usize = $max;

			/// Validates and wraps `value`.
			pub fn new(value: impl Into<String>) -> Result<Self, IdentifierError> {
				let value = value.into();

				check_claim(Self::CLAIM, Self::MAX_LEN, &value)?;

				Ok(Self(value))
			}
		}
		impl TryFrom<String> for $name {
			type Error = IdentifierError;

			fn try_from(value: String) -> Result<Self, Self::Error> {
				Self::new(value)
			}
		}
		impl From<$name> for String {
			fn from(id: $name) -> Self {
				id.0
			}
		}
		impl Deref for $name {
			type Target = str;

			fn deref(&self) -> &str {
				&self.0
			}
		}
		impl AsRef<str> for $name {
			fn as_ref(&self) -> &str {
				self
			}
		}
		impl Borrow<str> for $name {
			fn borrow(&self) -> &str {
				self
			}
		}
		impl Debug for $name {
			fn fmt(&self, f: &mut Formatter) -> FmtResult {
				write!(f, "{}={}", Self::CLAIM, self.0)
			}
		}
		impl Display for $name {
			fn fmt(&self, f: &mut Formatter) -> FmtResult {
				Display::fmt(&self.0, f)
			}
		}
	};
}

claim_id! {
	/// Unique token identifier carried in the `jti` claim; revocation strategies key on it.
	Jti { claim: "jti", max_len: 128 }
}
claim_id! {
	/// Scope label carried in the `scp` claim (for example `user` or `admin`).
	TokenScope { claim: "scp", max_len: 64 }
}
impl Jti {
	const ENTROPY_BYTES: usize = 16;

	/// Generates a fresh identifier from 128 random bits, base64url encoded without padding.
	pub fn generate() -> Self {
		let mut bytes = [0_u8; Self::ENTROPY_BYTES];

		rand::rng().fill(&mut bytes);

		Self(URL_SAFE_NO_PAD.encode(bytes))
	}
}

fn check_claim(claim: &'static str, max: usize, value: &str) -> Result<(), IdentifierError> {
	if value.is_empty() {
		return Err(IdentifierError::Empty { claim });
	}
	if let Some(found) = value.chars().find(|c| !c.is_ascii_graphic()) {
		return Err(IdentifierError::InvalidCharacter { claim, found });
	}
	if value.len() > max {
		return Err(IdentifierError::TooLong { claim, max });
	}

	Ok(())
}
