//! Response-side token dispatch.
//!
//! [`TokenDispatcher::handle`] always marks the exchange as processed, then, when the request is
//! allow-listed and an identity is present, mints a token, attaches it to the response header,
//! and notifies the revocation strategy exactly once.

pub mod exchange;

pub use exchange::*;

// self
use crate::{
	_prelude::*,
	auth::JwtSubject,
	codec::IssuedToken,
	config::Config,
	header,
	obs::{self, MiddlewareKind, MiddlewareOutcome, MiddlewareSpan, MiddlewareSpanGuard},
};

/// Middleware that attaches a freshly minted JWT to allow-listed responses.
///
/// Cheap to clone; the [`Config`] is shared read-only between clones and threads.
#[derive(Clone, Debug)]
pub struct TokenDispatcher {
	config: Arc<Config>,
}
impl TokenDispatcher {
	/// Env key set to `true` on every exchange the dispatcher handles.
	pub const ENV_KEY: &'static str = "token_dispatcher.processed";

	/// Creates a dispatcher around `config`.
	pub fn new(config: impl Into<Arc<Config>>) -> Self {
		Self { config: config.into() }
	}

	/// Shared configuration.
	pub fn config(&self) -> &Config {
		&self.config
	}

	/// Runs one dispatch pass over `exchange`.
	///
	/// Returns the issued token when one was attached. Encoding and strategy failures propagate
	/// unchanged; the processed marker is set before anything can fail. Calling this twice on the
	/// same exchange dispatches twice.
	pub fn handle(&self, exchange: &mut Exchange) -> Result<Option<IssuedToken>> {
		let span = MiddlewareSpan::new(MiddlewareKind::TokenDispatcher, "handle").entered();

		exchange.mark_processed(Self::ENV_KEY);

		if !self.config.is_dispatch_request(&exchange.method, &exchange.path) {
			record(MiddlewareOutcome::Skipped);

			return Ok(None);
		}

		let Some(identity) = exchange.identity.clone() else {
			record(MiddlewareOutcome::Anonymous);

			return Ok(None);
		};

		match self.dispatch(exchange, identity.as_ref(), &span) {
			Ok(issued) => {
				record(MiddlewareOutcome::Dispatched);

				Ok(Some(issued))
			},
			Err(e) => {
				record(MiddlewareOutcome::Failure);

				Err(e)
			},
		}
	}

	fn dispatch(
		&self,
		exchange: &mut Exchange,
		identity: &dyn JwtSubject,
		span: &MiddlewareSpanGuard,
	) -> Result<IssuedToken> {
		let aud = self.config.audience(&exchange.request_headers);
		let issued = self.config.encoder.encode(identity, self.config.scope.as_ref(), aud)?;

		span.record_token(&issued.token);
		exchange
			.response_headers
			.insert(self.config.token_header.clone(), header::bearer_value(&issued.token)?);
		identity.on_jwt_dispatch(&issued.token, &issued.payload);
		self.config.revocation_strategy.after_dispatch(identity, &issued)?;

		Ok(issued)
	}
}

fn record(outcome: MiddlewareOutcome) {
	obs::record_middleware_outcome(MiddlewareKind::TokenDispatcher, outcome);
}
