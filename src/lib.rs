//! Response-side JWT dispatch for HTTP services: mint a token for the authenticated identity on
//! allow-listed paths, attach it to the response, and let a pluggable revocation strategy track
//! what was issued.
//!
//! The crate is framework-agnostic: host adapters translate their request/response pair into an
//! [`Exchange`](dispatch::Exchange), run the [`TokenDispatcher`](dispatch::TokenDispatcher) (and
//! optionally the [`RevocationManager`](revocation::RevocationManager)) over it, and copy the
//! response headers back.

#![deny(clippy::all, missing_docs, unused_crate_dependencies)]

pub mod auth;
pub mod codec;
pub mod config;
pub mod dispatch;
pub mod error;
pub mod header;
pub mod obs;
pub mod revocation;
#[cfg(any(test, feature = "test"))]
pub mod _preludet {
	//! Convenience re-exports and helpers for integration tests; enabled via `cfg(test)` or the
	//! `test` crate feature.

	pub use crate::_prelude::*;

	// self
	use crate::{
		auth::{JwtSubject, TokenSecret},
		codec::IssuedToken,
		config::{Config, PathMatcher},
		dispatch::Exchange,
		revocation::{RevocationError, RevocationStrategy},
	};

	/// Shared HMAC secret used by test configurations.
	pub const TEST_SECRET: &str = "test-secret-that-is-long-enough-for-hs256";

	/// Minimal identity fixture that signs in with a fixed subject.
	#[derive(Clone, Debug)]
	pub struct TestUser {
		/// Subject stamped into the `sub` claim.
		pub id: String,
		/// Extra claims merged into the payload.
		pub claims: Map<String, Value>,
	}
	impl TestUser {
		/// Creates a user with the provided subject and no extra claims.
		pub fn new(id: impl Into<String>) -> Self {
			Self { id: id.into(), claims: Map::new() }
		}

		/// Adds an extra claim to the payload.
		pub fn with_claim(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
			self.claims.insert(key.into(), value.into());

			self
		}
	}
	impl JwtSubject for TestUser {
		fn jwt_subject(&self) -> String {
			self.id.clone()
		}

		fn jwt_payload(&self) -> Map<String, Value> {
			self.claims.clone()
		}
	}

	/// Strategy double that records every `after_dispatch` call and never revokes.
	#[derive(Clone, Debug, Default)]
	pub struct RecordingStrategy {
		dispatched: Arc<Mutex<Vec<(String, TokenSecret)>>>,
		fail_with: Option<String>,
	}
	impl RecordingStrategy {
		/// Builds a strategy whose `after_dispatch` always fails with the provided message.
		pub fn failing(message: impl Into<String>) -> Self {
			Self { fail_with: Some(message.into()), ..Default::default() }
		}

		/// Number of `after_dispatch` invocations observed so far.
		pub fn dispatch_count(&self) -> usize {
			self.dispatched.lock().len()
		}

		/// Subject/token pairs observed so far, in call order.
		pub fn dispatched(&self) -> Vec<(String, TokenSecret)> {
			self.dispatched.lock().clone()
		}
	}
	impl RevocationStrategy for RecordingStrategy {
		fn is_revoked(&self, _payload: &crate::auth::JwtPayload) -> Result<bool, RevocationError> {
			Ok(false)
		}

		fn revoke(&self, _payload: &crate::auth::JwtPayload) -> Result<(), RevocationError> {
			Ok(())
		}

		fn after_dispatch(
			&self,
			identity: &dyn JwtSubject,
			token: &IssuedToken,
		) -> Result<(), RevocationError> {
			if let Some(message) = &self.fail_with {
				return Err(RevocationError::Backend { message: message.clone() });
			}

			self.dispatched.lock().push((identity.jwt_subject(), token.token.clone()));

			Ok(())
		}
	}

	/// Builds a config allow-listing `/sign_in` backed by the provided strategy.
	pub fn sign_in_config(strategy: Arc<dyn RevocationStrategy>) -> Config {
		Config::builder(TEST_SECRET)
			.response_token_path(PathMatcher::exact("/sign_in"))
			.revocation_strategy(strategy)
			.build()
			.expect("Sign-in test configuration should build successfully.")
	}

	/// Builds a `GET` exchange for `path`, signed in as `user` when provided.
	pub fn get_exchange(path: &str, user: Option<TestUser>) -> Exchange {
		let exchange = Exchange::new(Method::GET, path);

		match user {
			Some(user) => exchange.with_identity(Arc::new(user)),
			None => exchange,
		}
	}
}

mod _prelude {
	pub use std::{
		collections::{BTreeMap, HashMap},
		fmt::{Debug, Display, Formatter, Result as FmtResult},
		str::FromStr,
		sync::Arc,
	};

	pub use http::{HeaderMap, HeaderName, HeaderValue, Method};
	pub use parking_lot::{Mutex, RwLock};
	pub use serde::{Deserialize, Serialize};
	pub use serde_json::{Map, Value};
	pub use thiserror::Error as ThisError;
	pub use time::{Duration, OffsetDateTime};

	pub use crate::error::{Error, Result};
}

pub use http;
pub use jsonwebtoken;
#[cfg(test)] use {color_eyre as _, tokio as _};
