use std::rc::Rc;

use futures::executor::block_on;

use crate::config::ClientConfig;
use crate::nav::guard::RouteTarget;
use crate::net::transport::fake::{FakeTransport, http_error, ok_json};
use crate::state::session::SessionCtx;

use super::AppCtx;

const USER_BODY: &str = r#"{
    "name": "Alice",
    "email": "alice@example.com",
    "username": "alice",
    "profile": "",
    "is_superuser": true,
    "role": "admin"
}"#;

#[test]
fn bootstrap_builds_on_native() {
    let ctx = AppCtx::bootstrap();
    assert_eq!(ctx.session.access_token(), "");
    assert!(ctx.notices.is_empty());
    assert!(!ctx.auth.is_authenticated());
}

#[test]
fn with_parts_shares_one_session_everywhere() {
    let transport = Rc::new(FakeTransport::new(|req| {
        assert_eq!(req.header("Authorization"), Some("Bearer tok"));
        ok_json(USER_BODY)
    }));
    let ctx = AppCtx::with_parts(
        ClientConfig::new("/api"),
        SessionCtx::in_memory(),
        transport,
    );

    ctx.session.set_access_token("tok");
    let user = block_on(ctx.api.fetch_current_user()).unwrap();
    assert_eq!(user.username, "alice");
}

#[test]
fn login_then_navigate_end_to_end() {
    let transport = Rc::new(FakeTransport::new(|req| {
        if req.url == "/api/auth/login" {
            return ok_json(r#"{"access_token":"a1","refresh_token":"r1"}"#);
        }
        if req.url == "/api/auth/current" && req.header("Authorization") == Some("Bearer a1") {
            return ok_json(USER_BODY);
        }
        http_error(401, "missing token")
    }));
    let ctx = AppCtx::with_parts(
        ClientConfig::new("/api"),
        SessionCtx::in_memory(),
        transport,
    );

    block_on(ctx.api.login("alice", "hunter2")).unwrap();
    let decision = block_on(ctx.guard.before_navigate(&RouteTarget::parse("/")));

    assert!(decision.is_proceed());
    assert!(ctx.auth.is_authenticated());
    assert_eq!(ctx.session.refresh_token(), "r1");
}

#[test]
fn logout_clears_session_and_identity() {
    let transport = Rc::new(FakeTransport::new(|req| {
        if req.url == "/api/auth/login" {
            return ok_json(r#"{"access_token":"a1","refresh_token":"r1"}"#);
        }
        if req.header("Authorization") == Some("Bearer a1") {
            return ok_json(USER_BODY);
        }
        http_error(401, "missing token")
    }));
    let ctx = AppCtx::with_parts(
        ClientConfig::new("/api"),
        SessionCtx::in_memory(),
        transport,
    );

    block_on(ctx.api.login("alice", "hunter2")).unwrap();
    let decision = block_on(ctx.guard.before_navigate(&RouteTarget::parse("/")));
    assert!(decision.is_proceed());
    assert!(ctx.auth.is_authenticated());

    ctx.logout();

    assert_eq!(ctx.session.access_token(), "");
    assert_eq!(ctx.session.refresh_token(), "");
    assert!(!ctx.auth.is_authenticated());
}
