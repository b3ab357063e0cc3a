//! Serializable configuration file format.

// self
use crate::{
	_prelude::*,
	auth::TokenScope,
	codec,
	config::{Config, ConfigBuilder, PathMatcher, RequestRule},
	error::ConfigError,
	revocation::RevocationStrategy,
};

/// JSON configuration mirroring [`ConfigBuilder`].
///
/// Path specs use the [`PathMatcher`] string syntax. `response-token-paths` accepts either a
/// single string or a list; an absent list allow-lists nothing.
#[derive(Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case", deny_unknown_fields)]
pub struct ConfigFile {
	/// HMAC secret or PEM private key.
	pub secret: String,
	/// Optional PEM public key for asymmetric algorithms.
	#[serde(default)]
	pub decoding_secret: Option<String>,
	/// Algorithm name (defaults to `HS256`).
	#[serde(default)]
	pub algorithm: Option<String>,
	/// Token lifetime in seconds (defaults to 3600).
	#[serde(default)]
	pub expiration_secs: Option<i64>,
	/// Issuer claim.
	#[serde(default)]
	pub issuer: Option<String>,
	/// Header carrying tokens (defaults to `Authorization`).
	#[serde(default)]
	pub token_header: Option<String>,
	/// Request header supplying the audience claim.
	#[serde(default)]
	pub aud_header: Option<String>,
	/// Scope stamped into the `scp` claim.
	#[serde(default)]
	pub scope: Option<String>,
	/// Allow-listed response token paths.
	#[serde(default)]
	pub response_token_paths: PathList,
	/// Method-qualified dispatch rules.
	#[serde(default)]
	pub dispatch_requests: Vec<RequestRuleFile>,
	/// Method-qualified revocation rules.
	#[serde(default)]
	pub revocation_requests: Vec<RequestRuleFile>,
}
impl ConfigFile {
	/// Parses JSON, reporting the path of the offending field on failure.
	pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
		let de = &mut serde_json::Deserializer::from_str(json);

		serde_path_to_error::deserialize(de).map_err(|source| ConfigError::File { source })
	}

	/// Converts the file into a validated [`Config`] using `strategy`.
	pub fn into_config(self, strategy: Arc<dyn RevocationStrategy>) -> Result<Config, ConfigError> {
		let mut builder = ConfigBuilder::new(self.secret).revocation_strategy(strategy);

		if let Some(secret) = self.decoding_secret {
			builder = builder.decoding_secret(secret);
		}
		if let Some(name) = self.algorithm {
			builder = builder.algorithm(codec::parse_algorithm(&name)?);
		}
		if let Some(secs) = self.expiration_secs {
			builder = builder.expiration(Duration::seconds(secs));
		}
		if let Some(issuer) = self.issuer {
			builder = builder.issuer(issuer);
		}
		if let Some(name) = self.token_header {
			builder = builder.token_header(name);
		}
		if let Some(name) = self.aud_header {
			builder = builder.aud_header(name);
		}
		if let Some(scope) = self.scope {
			builder = builder.scope(TokenScope::new(scope)?);
		}

		for spec in self.response_token_paths.into_vec() {
			builder = builder.response_token_path(spec.parse::<PathMatcher>()?);
		}
		for rule in self.dispatch_requests {
			builder = builder.dispatch_request(rule.parse()?);
		}
		for rule in self.revocation_requests {
			builder = builder.revocation_request(rule.parse()?);
		}

		builder.build()
	}
}

impl Debug for ConfigFile {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_struct("ConfigFile")
			.field("secret", &"<redacted>")
			.field("decoding_secret", &self.decoding_secret.as_ref().map(|_| "<redacted>"))
			.field("algorithm", &self.algorithm)
			.field("expiration_secs", &self.expiration_secs)
			.field("issuer", &self.issuer)
			.field("token_header", &self.token_header)
			.field("aud_header", &self.aud_header)
			.field("scope", &self.scope)
			.field("response_token_paths", &self.response_token_paths)
			.field("dispatch_requests", &self.dispatch_requests)
			.field("revocation_requests", &self.revocation_requests)
			.finish()
	}
}

/// One path spec or a list of them.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PathList {
	/// A single path spec.
	One(String),
	/// Several path specs.
	Many(Vec<String>),
}
impl PathList {
	/// Flattens into a list of specs.
	pub fn into_vec(self) -> Vec<String> {
		match self {
			Self::One(spec) => vec![spec],
			Self::Many(specs) => specs,
		}
	}
}
impl Default for PathList {
	fn default() -> Self {
		Self::Many(Vec::new())
	}
}

/// Serialized form of a [`RequestRule`].
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RequestRuleFile {
	/// HTTP method, case-insensitive.
	pub method: String,
	/// Path spec.
	pub path: String,
}
impl RequestRuleFile {
	/// Parses into a [`RequestRule`].
	pub fn parse(&self) -> Result<RequestRule, ConfigError> {
		RequestRule::parse(&self.method, &self.path)
	}
}
