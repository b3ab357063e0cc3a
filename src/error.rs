//! Crate-level error types shared by the dispatcher, codec, and revocation strategies.

// self
use crate::_prelude::*;

/// Crate-wide result type alias returning [`Error`] by default.
pub type Result<T, E = Error> = std::result::Result<T, E>;

/// Canonical error exposed by public APIs.
#[derive(Debug, ThisError)]
pub enum Error {
	/// Local configuration problem.
	#[error(transparent)]
	Config(#[from] ConfigError),
	/// Revocation strategy failure, propagated unchanged from the collaborator.
	#[error("{0}")]
	Revocation(
		#[from]
		#[source]
		crate::revocation::RevocationError,
	),

	/// Token could not be signed.
	#[error("Token could not be encoded.")]
	Encode {
		/// Underlying signing failure.
		#[source]
		source: jsonwebtoken::errors::Error,
	},
	/// Presented token failed signature, expiry, issuer, or audience checks.
	#[error("Token could not be decoded.")]
	Decode {
		/// Underlying verification failure.
		#[source]
		source: jsonwebtoken::errors::Error,
	},
	/// Encoded payload could not be converted to or from JSON claims.
	#[error("Token claims are malformed.")]
	Claims(#[from] serde_json::Error),
	/// Minted token cannot be represented as a header value.
	#[error("Token cannot be used as a header value.")]
	InvalidHeaderValue(#[from] http::header::InvalidHeaderValue),
	/// Expiry instant does not fit in a Unix timestamp.
	#[error("Token expiry overflows the timestamp range.")]
	ExpiryOverflow,
	/// Presented token has been revoked and must not be reused.
	#[error("Token has been revoked.")]
	Revoked,
}

/// Configuration and validation failures raised while assembling a [`Config`](crate::config::Config).
#[derive(Debug, ThisError)]
pub enum ConfigError {
	/// Signing secret is empty.
	#[error("Signing secret cannot be empty.")]
	EmptySecret,
	/// Key material could not be parsed for the configured algorithm.
	#[error("Key material is invalid for the {algorithm:?} algorithm.")]
	InvalidKey {
		/// Algorithm the key was parsed for.
		algorithm: jsonwebtoken::Algorithm,
		/// Underlying parsing failure.
		#[source]
		source: jsonwebtoken::errors::Error,
	},
	/// Algorithm name is not recognized.
	#[error("Unsupported signing algorithm: {name}.")]
	UnsupportedAlgorithm {
		/// Algorithm name as supplied.
		name: String,
	},
	/// Configured scope is not a valid claim identifier.
	#[error("Configured scope is invalid.")]
	InvalidScope(#[from] crate::auth::IdentifierError),
	/// Token expiration must be strictly positive.
	#[error("Token expiration must be positive.")]
	NonPositiveExpiration,
	/// Token expiration exceeds the supported maximum.
	#[error("Token expiration cannot exceed {max_secs} seconds.")]
	ExpirationTooLong {
		/// Maximum permitted lifetime in seconds.
		max_secs: i64,
	},
	/// Header name is not a valid HTTP header name.
	#[error("Header name `{name}` is invalid.")]
	InvalidHeaderName {
		/// Header name as supplied.
		name: String,
		/// Underlying parsing failure.
		#[source]
		source: http::header::InvalidHeaderName,
	},
	/// HTTP method in a request rule is invalid.
	#[error("HTTP method `{method}` is invalid.")]
	InvalidMethod {
		/// Method as supplied.
		method: String,
		/// Underlying parsing failure.
		#[source]
		source: http::method::InvalidMethod,
	},
	/// Path pattern is not a valid regular expression.
	#[error("Path pattern `{pattern}` is invalid.")]
	InvalidPattern {
		/// Pattern as supplied.
		pattern: String,
		/// Underlying regex failure.
		#[source]
		source: regex::Error,
	},
	/// Configuration file could not be parsed.
	#[error("Configuration file is malformed.")]
	File {
		/// Structured parsing failure naming the offending field.
		#[source]
		source: serde_path_to_error::Error<serde_json::Error>,
	},
}
