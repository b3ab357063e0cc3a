//! The request/response pair flowing through the middleware.

// self
use crate::{_prelude::*, auth::JwtSubject};

/// One request/response cycle as seen by the middleware.
///
/// Host adapters build it from their request (see [`Exchange::from_request`]), attach the
/// identity resolved by upstream authentication, run the middleware, then copy
/// [`response_headers`](Self::response_headers) onto the outgoing response.
#[derive(Clone, Debug)]
pub struct Exchange {
	/// Request method.
	pub method: Method,
	/// Request path, without query string.
	pub path: String,
	/// Request headers.
	pub request_headers: HeaderMap,
	/// Identity resolved upstream; `None` when authentication did not succeed.
	pub identity: Option<Arc<dyn JwtSubject>>,
	/// Side-channel slots shared with downstream collaborators (processed markers live here).
	pub env: BTreeMap<String, Value>,
	/// Headers to add to the outgoing response.
	pub response_headers: HeaderMap,
}
impl Exchange {
	/// Creates an anonymous exchange for `method` on `path`.
	pub fn new(method: Method, path: impl Into<String>) -> Self {
		Self {
			method,
			path: path.into(),
			request_headers: HeaderMap::new(),
			identity: None,
			env: BTreeMap::new(),
			response_headers: HeaderMap::new(),
		}
	}

	/// Captures method, path, and headers from an `http` request.
	pub fn from_request<B>(request: &http::Request<B>) -> Self {
		let mut exchange = Self::new(request.method().clone(), request.uri().path());

		exchange.request_headers = request.headers().clone();

		exchange
	}

	/// Attaches the authenticated identity.
	pub fn with_identity(mut self, identity: Arc<dyn JwtSubject>) -> Self {
		self.identity = Some(identity);

		self
	}

	/// Adds a request header.
	pub fn with_request_header(mut self, name: HeaderName, value: HeaderValue) -> Self {
		self.request_headers.insert(name, value);

		self
	}

	/// Sets the processed marker stored under `key`.
	pub fn mark_processed(&mut self, key: &str) {
		self.env.insert(key.to_owned(), Value::Bool(true));
	}

	/// Returns `true` if the marker under `key` is set.
	pub fn is_processed(&self, key: &str) -> bool {
		matches!(self.env.get(key), Some(Value::Bool(true)))
	}

	/// Copies the collected response headers onto `response`, replacing existing values.
	pub fn apply_to_response<B>(&self, response: &mut http::Response<B>) {
		let headers = response.headers_mut();

		for (name, value) in &self.response_headers {
			headers.insert(name.clone(), value.clone());
		}
	}
}
