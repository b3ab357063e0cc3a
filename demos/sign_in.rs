//! Demonstrates wiring the dispatcher and revocation manager around plain `http` types.
//!
//! 1. Build a [`Config`] allow-listing `/sign_in` and revoking on `DELETE /sign_out`.
//! 2. Share an in-memory [`Allowlist`] so only dispatched tokens stay valid.
//! 3. Run the dispatcher for a signed-in user and copy the header onto the response.
//! 4. Present the token on sign-out and confirm the allowlist forgets it.

// std
use std::sync::Arc;
// crates.io
use color_eyre::{Result, eyre::eyre};
use serde_json::{Map, Value, json};
// self
use jwt_dispatch::{
	auth::{JwtSubject, TokenScope},
	config::{Config, RequestRule},
	dispatch::{Exchange, TokenDispatcher},
	http::{Method, Request, Response, header::AUTHORIZATION},
	revocation::{Allowlist, RevocationManager, RevocationStrategy},
};

#[derive(Debug)]
struct Member {
	id: u64,
	plan: &'static str,
}
impl JwtSubject for Member {
	fn jwt_subject(&self) -> String {
		self.id.to_string()
	}

	fn jwt_payload(&self) -> Map<String, Value> {
		let mut claims = Map::new();

		claims.insert("plan".into(), json!(self.plan));

		claims
	}
}

fn main() -> Result<()> {
	color_eyre::install()?;

	let allowlist = Allowlist::default();
	let strategy: Arc<dyn RevocationStrategy> = Arc::new(allowlist.clone());
	let config = Arc::new(
		Config::builder("demo-secret-with-enough-entropy")
			.scope(TokenScope::new("user")?)
			.aud_header("JWT-AUD")
			.response_token_path("/sign_in")
			.revocation_request(RequestRule::parse("DELETE", "/sign_out")?)
			.revocation_strategy(strategy)
			.build()?,
	);
	let dispatcher = TokenDispatcher::new(config.clone());
	let manager = RevocationManager::new(config.clone());
	let request =
		Request::builder().method(Method::POST).uri("/sign_in").header("jwt-aud", "ios").body(())?;
	let mut exchange =
		Exchange::from_request(&request).with_identity(Arc::new(Member { id: 42, plan: "pro" }));
	let issued = dispatcher.handle(&mut exchange)?.ok_or_else(|| eyre!("no token dispatched"))?;
	let mut response = Response::new(());

	exchange.apply_to_response(&mut response);

	println!("dispatched token {} to subject {}", issued.token.fingerprint(), issued.payload.sub);
	println!("allowed tokens for 42: {}", allowlist.tokens_for("42").len());

	let header = response.headers()[AUTHORIZATION].clone();
	let sign_out = Request::builder()
		.method(Method::DELETE)
		.uri("/sign_out")
		.header(AUTHORIZATION, header)
		.header("jwt-aud", "ios")
		.body(())?;
	let mut exchange = Exchange::from_request(&sign_out);
	let revoked = manager.handle(&mut exchange)?.ok_or_else(|| eyre!("no token revoked"))?;

	println!("revoked jti {}", revoked.jti);
	println!("allowed tokens for 42: {}", allowlist.tokens_for("42").len());

	Ok(())
}
