// self
use crate::{_prelude::*, auth::TokenSecret, obs::MiddlewareKind};

/// A span builder used by middleware passes.
#[derive(Clone, Debug)]
pub struct MiddlewareSpan {
	#[cfg(feature = "tracing")]
	span: tracing::Span,
}
impl MiddlewareSpan {
	/// Creates a new span tagged with the provided middleware kind + stage.
	pub fn new(kind: MiddlewareKind, stage: &'static str) -> Self {
		#[cfg(feature = "tracing")]
		{
			let span = tracing::info_span!(
				"jwt_dispatch.middleware",
				middleware = kind.as_str(),
				stage,
				token = tracing::field::Empty
			);

			Self { span }
		}
		#[cfg(not(feature = "tracing"))]
		{
			let _ = (kind, stage);

			Self {}
		}
	}

	/// Enters the span; middleware passes are synchronous so the guard lives for the whole pass.
	pub fn entered(self) -> MiddlewareSpanGuard {
		#[cfg(feature = "tracing")]
		{
			MiddlewareSpanGuard { guard: self.span.entered() }
		}
		#[cfg(not(feature = "tracing"))]
		{
			let _ = self;

			MiddlewareSpanGuard {}
		}
	}
}

/// RAII guard returned by [`MiddlewareSpan::entered`].
pub struct MiddlewareSpanGuard {
	#[cfg(feature = "tracing")]
	guard: tracing::span::EnteredSpan,
}
impl MiddlewareSpanGuard {
	/// Records the fingerprint of `token` on the span; the secret itself never reaches the logs.
	pub fn record_token(&self, token: &TokenSecret) {
		#[cfg(feature = "tracing")]
		{
			self.guard.record("token", token.fingerprint().as_str());
			tracing::debug!("token fingerprint recorded");
		}
		#[cfg(not(feature = "tracing"))]
		{
			let _ = token;
		}
	}
}
impl Debug for MiddlewareSpanGuard {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str("MiddlewareSpanGuard(..)")
	}
}
