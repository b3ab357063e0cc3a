//! Path matching strategies and method-qualified request rules.

// crates.io
use regex::Regex;
// self
use crate::{_prelude::*, error::ConfigError};

/// Strategy used to decide whether a request path is allow-listed.
///
/// String specs parse as follows: `prefix:/api` builds [`PathMatcher::Prefix`],
/// `regex:^/v[0-9]+/sign_in$` builds [`PathMatcher::Pattern`], and anything else is an
/// [`PathMatcher::Exact`] match.
#[derive(Clone, Debug)]
pub enum PathMatcher {
	/// Path must equal the value byte for byte.
	Exact(String),
	/// Path must equal the value or continue it with a `/` segment.
	Prefix(String),
	/// Path must fully match the (anchored) regular expression.
	Pattern(Regex),
}
impl PathMatcher {
	const PATTERN_TAG: &'static str = "regex:";
	const PREFIX_TAG: &'static str = "prefix:";

	/// Builds an exact matcher.
	pub fn exact(path: impl Into<String>) -> Self {
		Self::Exact(path.into())
	}

	/// Builds a segment-aware prefix matcher.
	pub fn prefix(path: impl Into<String>) -> Self {
		Self::Prefix(path.into())
	}

	/// Builds a pattern matcher; the expression is anchored at both ends.
	///
	/// Explicit `^`/`$` anchors are accepted; an escaped `\$` stays a literal dollar sign.
	pub fn pattern(pattern: &str) -> Result<Self, ConfigError> {
		let anchored = format!("^(?:{})$", strip_anchors(pattern));

		Regex::new(&anchored)
			.map(Self::Pattern)
			.map_err(|source| ConfigError::InvalidPattern { pattern: pattern.to_owned(), source })
	}

	/// Returns `true` if `path` is matched.
	pub fn matches(&self, path: &str) -> bool {
		match self {
			Self::Exact(expected) => path == expected,
			Self::Prefix(prefix) if prefix.ends_with('/') => path.starts_with(prefix.as_str()),
			Self::Prefix(prefix) => path
				.strip_prefix(prefix.as_str())
				.is_some_and(|rest| rest.is_empty() || rest.starts_with('/')),
			Self::Pattern(regex) => regex.is_match(path),
		}
	}
}
impl From<&str> for PathMatcher {
	fn from(path: &str) -> Self {
		Self::exact(path)
	}
}
impl From<String> for PathMatcher {
	fn from(path: String) -> Self {
		Self::Exact(path)
	}
}
impl FromStr for PathMatcher {
	type Err = ConfigError;

	fn from_str(spec: &str) -> Result<Self, Self::Err> {
		if let Some(pattern) = spec.strip_prefix(Self::PATTERN_TAG) {
			Self::pattern(pattern)
		} else if let Some(prefix) = spec.strip_prefix(Self::PREFIX_TAG) {
			Ok(Self::prefix(prefix))
		} else {
			Ok(Self::exact(spec))
		}
	}
}
impl Display for PathMatcher {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		match self {
			Self::Exact(path) => f.write_str(path),
			Self::Prefix(prefix) => write!(f, "{}{prefix}", Self::PREFIX_TAG),
			Self::Pattern(regex) => write!(f, "{}{}", Self::PATTERN_TAG, regex.as_str()),
		}
	}
}

fn strip_anchors(pattern: &str) -> &str {
	let body = pattern.strip_prefix('^').unwrap_or(pattern);

	match body.strip_suffix('$') {
		// An odd run of backslashes before `$` escapes it.
		Some(rest) if rest.chars().rev().take_while(|c| *c == '\\').count() % 2 == 0 => rest,
		_ => body,
	}
}

/// A method + path pair that selects requests for dispatch or revocation.
#[derive(Clone, Debug)]
pub struct RequestRule {
	/// HTTP method the request must use.
	pub method: Method,
	/// Path matcher the request path must satisfy.
	pub path: PathMatcher,
}
impl RequestRule {
	/// Creates a rule for `method` on `path`.
	pub fn new(method: Method, path: impl Into<PathMatcher>) -> Self {
		Self { method, path: path.into() }
	}

	/// Parses a rule from its textual method and path spec.
	pub fn parse(method: &str, path: &str) -> Result<Self, ConfigError> {
		let method = Method::from_bytes(method.trim().to_ascii_uppercase().as_bytes())
			.map_err(|source| ConfigError::InvalidMethod { method: method.to_owned(), source })?;

		Ok(Self { method, path: path.parse()? })
	}

	/// Returns `true` if both method and path match.
	pub fn matches(&self, method: &Method, path: &str) -> bool {
		&self.method == method && self.path.matches(path)
	}
}

#[cfg(test)]
mod tests {
	// self
	use super::*;

	#[test]
	fn exact_matches_only_identical_paths() {
		let matcher = PathMatcher::exact("/sign_in");

		assert!(matcher.matches("/sign_in"));
		assert!(!matcher.matches("/sign_in/"));
		assert!(!matcher.matches("/another_path"));
	}

	#[test]
	fn prefix_is_segment_aware() {
		let matcher = PathMatcher::prefix("/api");

		assert!(matcher.matches("/api"));
		assert!(matcher.matches("/api/sign_in"));
		assert!(!matcher.matches("/apix"));

		let slashed = PathMatcher::prefix("/api/");

		assert!(slashed.matches("/api/sign_in"));
		assert!(!slashed.matches("/api"));
	}

	#[test]
	fn pattern_is_anchored() {
		let matcher = PathMatcher::pattern("/v[0-9]+/sign_in")
			.expect("Pattern fixture should compile successfully.");

		assert!(matcher.matches("/v2/sign_in"));
		assert!(!matcher.matches("/prefix/v2/sign_in"));
		assert!(!matcher.matches("/v2/sign_in/extra"));
		assert!(PathMatcher::pattern("^/explicit$")
			.expect("Explicit anchors should be accepted.")
			.matches("/explicit"));
	}

	#[test]
	fn escaped_dollar_is_not_an_anchor() {
		let literal =
			"regex:/price\\$".parse::<PathMatcher>().expect("Escaped dollar should compile.");

		assert!(literal.matches("/price$"));
		assert!(!literal.matches("/price"));

		let anchored =
			PathMatcher::pattern("/price\\\\$").expect("Escaped backslash then anchor should compile.");

		assert!(anchored.matches("/price\\"));
		assert!(!anchored.matches("/price\\$"));
	}

	#[test]
	fn specs_parse_by_tag() {
		let parse = |spec: &str| spec.parse::<PathMatcher>().expect("Spec should parse.");

		assert!(matches!(parse("/sign_in"), PathMatcher::Exact(path) if path == "/sign_in"));
		assert!(matches!(parse("prefix:/api"), PathMatcher::Prefix(path) if path == "/api"));
		assert!(matches!(parse("regex:/a|/b"), PathMatcher::Pattern(_)));
		assert!(matches!(
			"regex:(".parse::<PathMatcher>(),
			Err(ConfigError::InvalidPattern { pattern, .. }) if pattern == "("
		));
		assert_eq!(parse("prefix:/api").to_string(), "prefix:/api");
	}

	#[test]
	fn request_rules_match_method_and_path() {
		let rule = RequestRule::parse("post", "/sign_out").expect("Rule fixture should parse.");

		assert!(rule.matches(&Method::POST, "/sign_out"));
		assert!(!rule.matches(&Method::GET, "/sign_out"));
		assert!(!rule.matches(&Method::POST, "/sign_in"));
		assert!(RequestRule::parse("BAD METHOD", "/x").is_err());
	}
}
