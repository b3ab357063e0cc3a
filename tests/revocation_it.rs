#![cfg(feature = "test")]

// crates.io
use http::header::AUTHORIZATION;
// self
use jwt_dispatch::{
	_preludet::*,
	auth::JwtPayload,
	config::Config,
	dispatch::{Exchange, TokenDispatcher},
	revocation::{Allowlist, Denylist, RevocationManager, RevocationStrategy},
};

fn sign_in_out_config(strategy: Arc<dyn RevocationStrategy>) -> Arc<Config> {
	let config = Config::from_json_str(
		&format!(
			r#"{{
				"secret": "{TEST_SECRET}",
				"response-token-paths": ["/sign_in"],
				"revocation-requests": [{{ "method": "delete", "path": "/sign_out" }}]
			}}"#
		),
		strategy,
	)
	.expect("JSON config fixture should build.");

	Arc::new(config)
}

fn sign_in(config: &Arc<Config>, user: &str) -> HeaderValue {
	let mut exchange = get_exchange("/sign_in", Some(TestUser::new(user)));

	TokenDispatcher::new(config.clone())
		.handle(&mut exchange)
		.expect("Sign-in should succeed.")
		.expect("Sign-in should dispatch a token.");

	exchange.response_headers[AUTHORIZATION].clone()
}

fn sign_out(config: &Arc<Config>, header: HeaderValue) -> Option<JwtPayload> {
	let mut exchange =
		Exchange::new(Method::DELETE, "/sign_out").with_request_header(AUTHORIZATION, header);
	let revoked = RevocationManager::new(config.clone())
		.handle(&mut exchange)
		.expect("Sign-out should succeed.");

	assert!(exchange.is_processed(RevocationManager::ENV_KEY));

	revoked
}

fn token_of(header: &HeaderValue) -> &str {
	header
		.to_str()
		.ok()
		.and_then(|value| value.strip_prefix("Bearer "))
		.expect("Header should carry a bearer token.")
}

#[test]
fn denylist_rejects_signed_out_tokens() {
	let denylist = Denylist::default();
	let config = sign_in_out_config(Arc::new(denylist.clone()));
	let kept = sign_in(&config, "42");
	let dropped = sign_in(&config, "42");

	assert!(sign_out(&config, dropped.clone()).is_some());
	assert_eq!(denylist.len(), 1);
	assert!(matches!(
		config.decoder.decode_unrevoked(token_of(&dropped), None, &denylist),
		Err(Error::Revoked)
	));

	config
		.decoder
		.decode_unrevoked(token_of(&kept), None, &denylist)
		.expect("Other sessions should stay valid.");
}

#[test]
fn allowlist_tracks_dispatch_and_sign_out() {
	let allowlist = Allowlist::default();
	let config = sign_in_out_config(Arc::new(allowlist.clone()));
	let header = sign_in(&config, "42");

	assert_eq!(allowlist.tokens_for("42").len(), 1);
	config
		.decoder
		.decode_unrevoked(token_of(&header), None, &allowlist)
		.expect("Dispatched token should be allowed.");

	let revoked = sign_out(&config, header.clone()).expect("Token should be revoked.");

	assert_eq!(revoked.sub, "42");
	assert!(allowlist.tokens_for("42").is_empty());
	assert!(matches!(
		config.decoder.decode_unrevoked(token_of(&header), None, &allowlist),
		Err(Error::Revoked)
	));
}

#[test]
fn foreign_tokens_are_ignored() {
	let denylist = Denylist::default();
	let config = sign_in_out_config(Arc::new(denylist.clone()));
	let other = sign_in_out_config(Arc::new(Denylist::default()));
	let foreign = Config::builder("a-completely-different-secret")
		.response_token_path("/sign_in")
		.build()
		.map(Arc::new)
		.expect("Foreign config should build.");

	assert!(sign_out(&config, sign_in(&foreign, "42")).is_none());
	assert!(sign_out(&config, HeaderValue::from_static("Basic dXNlcjpwYXNz")).is_none());
	assert!(sign_out(&config, sign_in(&other, "42")).is_some(), "Same secret verifies.");
	assert_eq!(denylist.len(), 1);
}

#[test]
fn non_matching_requests_leave_strategy_untouched() {
	let denylist = Denylist::default();
	let config = sign_in_out_config(Arc::new(denylist.clone()));
	let header = sign_in(&config, "42");
	let mut exchange =
		Exchange::new(Method::POST, "/sign_out").with_request_header(AUTHORIZATION, header);

	assert!(
		RevocationManager::new(config)
			.handle(&mut exchange)
			.expect("Skipping should succeed.")
			.is_none()
	);
	assert!(exchange.is_processed(RevocationManager::ENV_KEY));
	assert!(denylist.is_empty());
}
