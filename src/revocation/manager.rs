//! Request-side middleware that revokes the presented token on allow-listed requests.

// self
use crate::{
	_prelude::*,
	auth::JwtPayload,
	config::Config,
	dispatch::Exchange,
	header,
	obs::{self, MiddlewareKind, MiddlewareOutcome, MiddlewareSpan},
};

/// Hands the bearer token of matching requests (typically sign-out) to the revocation strategy.
///
/// Tokens that fail verification are ignored; there is nothing to revoke.
#[derive(Clone, Debug)]
pub struct RevocationManager {
	config: Arc<Config>,
}
impl RevocationManager {
	/// Env key set to `true` on every exchange the manager handles.
	pub const ENV_KEY: &'static str = "revocation_manager.processed";

	/// Creates a manager around `config`.
	pub fn new(config: impl Into<Arc<Config>>) -> Self {
		Self { config: config.into() }
	}

	/// Shared configuration.
	pub fn config(&self) -> &Config {
		&self.config
	}

	/// Runs one revocation pass over `exchange`, returning the payload that was revoked.
	pub fn handle(&self, exchange: &mut Exchange) -> Result<Option<JwtPayload>> {
		let span = MiddlewareSpan::new(MiddlewareKind::RevocationManager, "handle").entered();

		exchange.mark_processed(Self::ENV_KEY);

		if !self.config.is_revocation_request(&exchange.method, &exchange.path) {
			record(MiddlewareOutcome::Skipped);

			return Ok(None);
		}

		let Some(token) = header::bearer_token(&exchange.request_headers, &self.config.token_header)
		else {
			record(MiddlewareOutcome::Anonymous);

			return Ok(None);
		};

		span.record_token(&token);

		let aud = self.config.audience(&exchange.request_headers);
		let payload = match self.config.decoder.decode(token.expose(), aud) {
			Ok(payload) => payload,
			Err(_) => {
				record(MiddlewareOutcome::Skipped);

				return Ok(None);
			},
		};

		if let Err(e) = self.config.revocation_strategy.revoke(&payload) {
			record(MiddlewareOutcome::Failure);

			return Err(e.into());
		}

		record(MiddlewareOutcome::Revoked);

		Ok(Some(payload))
	}
}

fn record(outcome: MiddlewareOutcome) {
	obs::record_middleware_outcome(MiddlewareKind::RevocationManager, outcome);
}

#[cfg(test)]
mod tests {
	// crates.io
	use http::header::AUTHORIZATION;
	// self
	use super::*;
	use crate::{
		_preludet::*,
		config::RequestRule,
		dispatch::TokenDispatcher,
		revocation::{Denylist, RevocationError, RevocationStrategy},
	};

	fn config(strategy: Arc<dyn RevocationStrategy>) -> Arc<Config> {
		Arc::new(
			Config::builder(TEST_SECRET)
				.response_token_path("/sign_in")
				.revocation_request(RequestRule::new(Method::DELETE, "/sign_out"))
				.revocation_strategy(strategy)
				.build()
				.expect("Revocation test configuration should build."),
		)
	}

	fn sign_in(config: &Arc<Config>) -> HeaderValue {
		let mut exchange = get_exchange("/sign_in", Some(TestUser::new("42")));

		TokenDispatcher::new(config.clone())
			.handle(&mut exchange)
			.expect("Sign-in dispatch should succeed.");

		exchange.response_headers[AUTHORIZATION].clone()
	}

	fn sign_out(value: HeaderValue) -> Exchange {
		Exchange::new(Method::DELETE, "/sign_out").with_request_header(AUTHORIZATION, value)
	}

	#[derive(Debug)]
	struct BrokenStore;
	impl RevocationStrategy for BrokenStore {
		fn is_revoked(&self, _payload: &JwtPayload) -> Result<bool, RevocationError> {
			Ok(false)
		}

		fn revoke(&self, _payload: &JwtPayload) -> Result<(), RevocationError> {
			Err(RevocationError::Backend { message: "write refused".into() })
		}
	}

	#[test]
	fn revokes_presented_token() {
		let denylist = Denylist::default();
		let config = config(Arc::new(denylist.clone()));
		let mut exchange = sign_out(sign_in(&config));
		let payload = RevocationManager::new(config)
			.handle(&mut exchange)
			.expect("Revocation should succeed.")
			.expect("Presented token should be revoked.");

		assert_eq!(payload.sub, "42");
		assert!(denylist.contains(&payload.jti));
		assert!(exchange.is_processed(RevocationManager::ENV_KEY));
	}

	#[test]
	fn skips_non_matching_requests_and_missing_tokens() {
		let denylist = Denylist::default();
		let config = config(Arc::new(denylist.clone()));
		let manager = RevocationManager::new(config.clone());
		let mut wrong_method = Exchange::new(Method::GET, "/sign_out")
			.with_request_header(AUTHORIZATION, sign_in(&config));
		let mut no_token = Exchange::new(Method::DELETE, "/sign_out");

		assert!(manager.handle(&mut wrong_method).expect("Skipping should succeed.").is_none());
		assert!(manager.handle(&mut no_token).expect("Anonymous pass should succeed.").is_none());
		assert!(wrong_method.is_processed(RevocationManager::ENV_KEY));
		assert!(no_token.is_processed(RevocationManager::ENV_KEY));
		assert!(denylist.is_empty());
	}

	#[test]
	fn ignores_undecodable_tokens() {
		let config = config(Arc::new(BrokenStore));
		let mut exchange = sign_out(HeaderValue::from_static("Bearer not.a.jwt"));

		assert!(
			RevocationManager::new(config)
				.handle(&mut exchange)
				.expect("Garbage tokens should be ignored.")
				.is_none()
		);
	}

	#[test]
	fn strategy_failure_propagates() {
		let config = config(Arc::new(BrokenStore));
		let mut exchange = sign_out(sign_in(&config));
		let err = RevocationManager::new(config)
			.handle(&mut exchange)
			.expect_err("Strategy failure must propagate.");

		assert!(matches!(err, Error::Revocation(RevocationError::Backend { .. })));
		assert!(exchange.is_processed(RevocationManager::ENV_KEY));
	}
}
