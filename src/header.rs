//! Bearer header formatting and parsing.

// self
use crate::{_prelude::*, auth::TokenSecret};

/// Authorization scheme used for dispatched tokens.
pub const BEARER_SCHEME: &str = "Bearer";

/// Formats `token` as a `Bearer <token>` header value, flagged sensitive so HTTP stacks skip it
/// in debug output.
pub fn bearer_value(token: &TokenSecret) -> Result<HeaderValue> {
	let mut value = HeaderValue::from_str(&format!("{BEARER_SCHEME} {}", token.expose()))?;

	value.set_sensitive(true);

	Ok(value)
}

/// Extracts the bearer token from header `name`, if present and well-formed.
///
/// The scheme is matched case-insensitively; an empty credential is treated as absent.
pub fn bearer_token(headers: &HeaderMap, name: &HeaderName) -> Option<TokenSecret> {
	let raw = headers.get(name)?.to_str().ok()?.trim();
	let (scheme, credential) = raw.split_once(' ')?;

	if !scheme.eq_ignore_ascii_case(BEARER_SCHEME) {
		return None;
	}

	let credential = credential.trim();

	if credential.is_empty() { None } else { Some(TokenSecret::new(credential)) }
}
