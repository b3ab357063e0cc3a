//! Immutable middleware configuration and its builder.
//!
//! A [`Config`] is assembled once (programmatically via [`Config::builder`] or from JSON via
//! [`Config::from_json_str`]) and shared read-only by every middleware instance.

pub mod file;
pub mod paths;

pub use file::*;
pub use paths::*;

// crates.io
use http::header::AUTHORIZATION;
use jsonwebtoken::Algorithm;
// self
use crate::{
	_prelude::*,
	auth::TokenScope,
	codec::{self, TokenDecoder, TokenEncoder},
	error::ConfigError,
	revocation::{NullStrategy, RevocationStrategy},
};

/// Configuration consumed by [`TokenDispatcher`](crate::dispatch::TokenDispatcher) and
/// [`RevocationManager`](crate::revocation::RevocationManager).
#[derive(Clone)]
pub struct Config {
	/// Paths that receive a token on any method once an identity is present.
	pub response_token_paths: Vec<PathMatcher>,
	/// Method-qualified rules that also receive a token.
	pub dispatch_requests: Vec<RequestRule>,
	/// Method-qualified rules whose presented token gets revoked.
	pub revocation_requests: Vec<RequestRule>,
	/// Header carrying the token on both requests and responses.
	pub token_header: HeaderName,
	/// Request header whose value becomes the `aud` claim.
	pub aud_header: Option<HeaderName>,
	/// Scope stamped into the `scp` claim.
	pub scope: Option<TokenScope>,
	/// Collaborator notified of dispatches and asked to revoke.
	pub revocation_strategy: Arc<dyn RevocationStrategy>,
	/// Signs dispatched tokens.
	pub encoder: TokenEncoder,
	/// Verifies presented tokens.
	pub decoder: TokenDecoder,
}
impl Config {
	/// Creates a builder seeded with the signing secret (HMAC secret or PEM private key).
	pub fn builder(secret: impl Into<String>) -> ConfigBuilder {
		ConfigBuilder::new(secret)
	}

	/// Parses a JSON [`ConfigFile`] and builds a config around `strategy`.
	pub fn from_json_str(
		json: &str,
		strategy: Arc<dyn RevocationStrategy>,
	) -> Result<Self, ConfigError> {
		ConfigFile::from_json_str(json)?.into_config(strategy)
	}

	/// Returns `true` if a request with `method` on `path` should receive a token.
	pub fn is_dispatch_request(&self, method: &Method, path: &str) -> bool {
		self.response_token_paths.iter().any(|matcher| matcher.matches(path))
			|| self.dispatch_requests.iter().any(|rule| rule.matches(method, path))
	}

	/// Returns `true` if a request with `method` on `path` should revoke its token.
	pub fn is_revocation_request(&self, method: &Method, path: &str) -> bool {
		self.revocation_requests.iter().any(|rule| rule.matches(method, path))
	}

	/// Reads the audience for `headers` from the configured audience header, if any.
	pub fn audience<'a>(&self, headers: &'a HeaderMap) -> Option<&'a str> {
		let name = self.aud_header.as_ref()?;

		headers.get(name)?.to_str().ok().map(str::trim).filter(|aud| !aud.is_empty())
	}
}
impl Debug for Config {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_struct("Config")
			.field("response_token_paths", &self.response_token_paths)
			.field("dispatch_requests", &self.dispatch_requests)
			.field("revocation_requests", &self.revocation_requests)
			.field("token_header", &self.token_header)
			.field("aud_header", &self.aud_header)
			.field("scope", &self.scope)
			.field("revocation_strategy", &"<dyn RevocationStrategy>")
			.field("encoder", &self.encoder)
			.field("decoder", &self.decoder)
			.finish()
	}
}

/// Builder for [`Config`] values.
pub struct ConfigBuilder {
	secret: String,
	decoding_secret: Option<String>,
	algorithm: Algorithm,
	expiration: Duration,
	issuer: Option<String>,
	token_header: String,
	aud_header: Option<String>,
	scope: Option<TokenScope>,
	response_token_paths: Vec<PathMatcher>,
	dispatch_requests: Vec<RequestRule>,
	revocation_requests: Vec<RequestRule>,
	revocation_strategy: Arc<dyn RevocationStrategy>,
}
impl ConfigBuilder {
	/// Longest token lifetime accepted by [`build`](Self::build).
	pub const MAX_EXPIRATION: Duration = Duration::days(366);

	const DEFAULT_EXPIRATION: Duration = Duration::hours(1);

	/// Creates a builder with HS256, a one hour lifetime, the `Authorization` header, and the
	/// [`NullStrategy`].
	pub fn new(secret: impl Into<String>) -> Self {
		Self {
			secret: secret.into(),
			decoding_secret: None,
			algorithm: Algorithm::HS256,
			expiration: Self::DEFAULT_EXPIRATION,
			issuer: None,
			token_header: AUTHORIZATION.as_str().to_owned(),
			aud_header: None,
			scope: None,
			response_token_paths: Vec::new(),
			dispatch_requests: Vec::new(),
			revocation_requests: Vec::new(),
			revocation_strategy: Arc::new(NullStrategy),
		}
	}

	/// Sets a separate verification key (PEM public key for asymmetric algorithms).
	pub fn decoding_secret(mut self, secret: impl Into<String>) -> Self {
		self.decoding_secret = Some(secret.into());

		self
	}

	/// Overrides the signing algorithm.
	pub fn algorithm(mut self, algorithm: Algorithm) -> Self {
		self.algorithm = algorithm;

		self
	}

	/// Overrides the token lifetime.
	pub fn expiration(mut self, expiration: Duration) -> Self {
		self.expiration = expiration;

		self
	}

	/// Sets the `iss` claim stamped on minted tokens and required on presented ones.
	pub fn issuer(mut self, issuer: impl Into<String>) -> Self {
		self.issuer = Some(issuer.into());

		self
	}

	/// Overrides the header carrying tokens (defaults to `Authorization`).
	pub fn token_header(mut self, name: impl Into<String>) -> Self {
		self.token_header = name.into();

		self
	}

	/// Sets the request header whose value becomes the `aud` claim.
	pub fn aud_header(mut self, name: impl Into<String>) -> Self {
		self.aud_header = Some(name.into());

		self
	}

	/// Sets the scope stamped into the `scp` claim.
	pub fn scope(mut self, scope: TokenScope) -> Self {
		self.scope = Some(scope);

		self
	}

	/// Allow-lists a single response token path.
	pub fn response_token_path(mut self, matcher: impl Into<PathMatcher>) -> Self {
		self.response_token_paths.push(matcher.into());

		self
	}

	/// Allow-lists multiple response token paths.
	pub fn response_token_paths<I>(mut self, matchers: I) -> Self
	where
		I: IntoIterator,
		I::Item: Into<PathMatcher>,
	{
		self.response_token_paths.extend(matchers.into_iter().map(Into::into));

		self
	}

	/// Adds a method-qualified dispatch rule.
	pub fn dispatch_request(mut self, rule: RequestRule) -> Self {
		self.dispatch_requests.push(rule);

		self
	}

	/// Adds a method-qualified revocation rule.
	pub fn revocation_request(mut self, rule: RequestRule) -> Self {
		self.revocation_requests.push(rule);

		self
	}

	/// Overrides the revocation strategy.
	pub fn revocation_strategy(mut self, strategy: Arc<dyn RevocationStrategy>) -> Self {
		self.revocation_strategy = strategy;

		self
	}

	/// Consumes the builder and validates the resulting config.
	pub fn build(self) -> Result<Config, ConfigError> {
		if self.secret.trim().is_empty() {
			return Err(ConfigError::EmptySecret);
		}
		if !self.expiration.is_positive() {
			return Err(ConfigError::NonPositiveExpiration);
		}
		if self.expiration > Self::MAX_EXPIRATION {
			return Err(ConfigError::ExpirationTooLong {
				max_secs: Self::MAX_EXPIRATION.whole_seconds(),
			});
		}

		let encoding_key = codec::encoding_key(self.algorithm, &self.secret)?;
		let decoding_key = codec::decoding_key(
			self.algorithm,
			self.decoding_secret.as_deref().unwrap_or(&self.secret),
		)?;
		let token_header = parse_header_name(&self.token_header)?;
		let aud_header = self.aud_header.as_deref().map(parse_header_name).transpose()?;

		Ok(Config {
			response_token_paths: self.response_token_paths,
			dispatch_requests: self.dispatch_requests,
			revocation_requests: self.revocation_requests,
			token_header,
			aud_header,
			scope: self.scope,
			revocation_strategy: self.revocation_strategy,
			encoder: TokenEncoder::new(
				self.algorithm,
				encoding_key,
				self.expiration,
				self.issuer.clone(),
			),
			decoder: TokenDecoder::new(self.algorithm, decoding_key, self.issuer),
		})
	}
}

fn parse_header_name(name: &str) -> Result<HeaderName, ConfigError> {
	HeaderName::from_str(name.trim())
		.map_err(|source| ConfigError::InvalidHeaderName { name: name.to_owned(), source })
}
