use std::cell::RefCell;
use std::rc::Rc;

use futures::executor::block_on;
use futures::future::{LocalBoxFuture, join, ready};

use crate::config::ClientConfig;
use crate::net::error::Error;
use crate::net::middleware::{InboundStage, Outcome, OutboundStage};
use crate::net::request::{PendingRequest, Response};
use crate::net::transport::fake::{FakeTransport, http_error, ok_json};
use crate::state::notices::Notices;
use crate::state::session::{Session, SessionCtx};

use super::HttpClient;

struct Harness {
    session: SessionCtx,
    notices: Notices,
    transport: Rc<FakeTransport>,
    client: HttpClient,
}

fn standard_client(
    access: &str,
    refresh: &str,
    responder: impl Fn(&PendingRequest) -> Result<Response, Error> + 'static,
) -> Harness {
    let session = SessionCtx::in_memory();
    session.set_session(&Session {
        access_token: access.into(),
        refresh_token: refresh.into(),
    });
    let notices = Notices::default();
    let transport = Rc::new(FakeTransport::new(responder));
    let client = HttpClient::standard(
        &ClientConfig::new("/api"),
        &session,
        &notices,
        transport.clone(),
    );
    Harness {
        session,
        notices,
        transport,
        client,
    }
}

// =============================================================
// Bearer injection
// =============================================================

#[test]
fn bearer_header_attached_exactly_once() {
    let harness = standard_client("tok", "", |req| {
        assert_eq!(req.header("Authorization"), Some("Bearer tok"));
        ok_json("{}")
    });

    let result = block_on(harness.client.request(PendingRequest::get("/api/things")));
    assert!(result.is_ok());

    let sent = &harness.transport.calls_to("/api/things")[0];
    let auth_headers = sent
        .headers
        .iter()
        .filter(|(name, _)| name.eq_ignore_ascii_case("authorization"))
        .count();
    assert_eq!(auth_headers, 1);
}

#[test]
fn empty_access_token_sends_unauthenticated() {
    let harness = standard_client("", "", |req| {
        assert_eq!(req.header("Authorization"), None);
        ok_json("{}")
    });

    let result = block_on(harness.client.request(PendingRequest::get("/api/things")));
    assert!(result.is_ok());
}

#[test]
fn session_token_overrides_caller_set_header() {
    let harness = standard_client("tok", "", |_| ok_json("{}"));

    let request = PendingRequest::get("/api/things").with_bearer("manual");
    let result = block_on(harness.client.request(request));
    assert!(result.is_ok());

    let sent = &harness.transport.calls_to("/api/things")[0];
    assert_eq!(sent.header("Authorization"), Some("Bearer tok"));
    let auth_headers = sent
        .headers
        .iter()
        .filter(|(name, _)| name.eq_ignore_ascii_case("authorization"))
        .count();
    assert_eq!(auth_headers, 1);
}

// =============================================================
// Silent refresh through the full chain
// =============================================================

#[test]
fn expired_token_refreshes_and_retries_transparently() {
    let harness = standard_client("stale", "r1", |req| {
        if req.url == "/api/auth/refresh" {
            return ok_json(r#"{"access_token":"fresh"}"#);
        }
        if req.header("Authorization") == Some("Bearer fresh") {
            return ok_json(r#"{"data":1}"#);
        }
        http_error(401, "expired")
    });

    let result = block_on(harness.client.request(PendingRequest::get("/api/things")));

    assert_eq!(result.unwrap().body, r#"{"data":1}"#);
    assert_eq!(harness.session.access_token(), "fresh");
    assert_eq!(harness.transport.calls_to("/api/auth/refresh").len(), 1);
    assert_eq!(harness.transport.calls_to("/api/things").len(), 2);
    assert!(harness.notices.is_empty());
}

#[test]
fn concurrent_requests_share_one_refresh() {
    let harness = standard_client("stale", "r1", |req| {
        if req.url == "/api/auth/refresh" {
            return ok_json(r#"{"access_token":"fresh"}"#);
        }
        if req.header("Authorization") == Some("Bearer fresh") {
            return ok_json("{}");
        }
        http_error(401, "expired")
    });

    let first = harness.client.request(PendingRequest::get("/api/a"));
    let second = harness.client.request(PendingRequest::get("/api/b"));
    let (a, b) = block_on(join(first, second));

    assert!(a.is_ok());
    assert!(b.is_ok());
    assert_eq!(harness.transport.calls_to("/api/auth/refresh").len(), 1);
}

#[test]
fn second_401_after_refresh_never_cascades() {
    let harness = standard_client("stale", "r1", |req| {
        if req.url == "/api/auth/refresh" {
            return ok_json(r#"{"access_token":"fresh"}"#);
        }
        http_error(401, "still expired")
    });

    let result = block_on(harness.client.request(PendingRequest::get("/api/things")));

    // One exchange, one retry, and the retry's 401 comes back unreported.
    assert!(matches!(result, Err(Error::Http { status: 401, .. })));
    assert_eq!(harness.transport.calls_to("/api/auth/refresh").len(), 1);
    assert_eq!(harness.transport.calls_to("/api/things").len(), 2);
    assert!(harness.notices.is_empty());
}

// =============================================================
// Reporting
// =============================================================

#[test]
fn non_401_failure_reports_exactly_one_notice() {
    let harness = standard_client("tok", "r1", |_| http_error(500, "boom"));

    let result = block_on(harness.client.request(PendingRequest::get("/api/things")));

    assert!(matches!(result, Err(Error::Http { status: 500, .. })));
    let listed = harness.notices.list();
    assert_eq!(listed.len(), 1);
    assert_eq!(listed[0].text, "Request failed with 500: boom");
}

#[test]
fn unrecovered_401_is_never_reported() {
    let harness = standard_client("stale", "", |_| http_error(401, "expired"));

    let result = block_on(harness.client.request(PendingRequest::get("/api/things")));

    assert!(matches!(result, Err(Error::Http { status: 401, .. })));
    assert!(harness.notices.is_empty());
}

#[test]
fn failed_refresh_keeps_401_unreported() {
    let harness = standard_client("stale", "bad", |_| http_error(401, "expired"));

    let result = block_on(harness.client.request(PendingRequest::get("/api/things")));

    assert!(matches!(result, Err(Error::Http { status: 401, .. })));
    assert!(harness.notices.is_empty());
    assert_eq!(harness.session.refresh_token(), "");
}

// =============================================================
// Custom stage composition
// =============================================================

struct TagStage;

impl OutboundStage for TagStage {
    fn apply(&self, request: &mut PendingRequest) {
        request.set_header("X-Client", "bamboo");
    }
}

struct MarkStage {
    label: &'static str,
    seen: Rc<RefCell<Vec<&'static str>>>,
}

impl InboundStage for MarkStage {
    fn process(&self, outcome: Outcome) -> LocalBoxFuture<'static, Outcome> {
        self.seen.borrow_mut().push(self.label);
        Box::pin(ready(outcome))
    }
}

#[test]
fn custom_stages_run_in_declaration_order() {
    let seen = Rc::new(RefCell::new(Vec::new()));
    let transport = Rc::new(FakeTransport::new(|_| ok_json("{}")));
    let client = HttpClient::new(transport.clone())
        .with_outbound(TagStage)
        .with_inbound(MarkStage {
            label: "first",
            seen: Rc::clone(&seen),
        })
        .with_inbound(MarkStage {
            label: "second",
            seen: Rc::clone(&seen),
        });

    let result = block_on(client.request(PendingRequest::get("/x")));

    assert!(result.is_ok());
    assert_eq!(*seen.borrow(), vec!["first", "second"]);
    assert_eq!(
        transport.calls_to("/x")[0].header("X-Client"),
        Some("bamboo")
    );
}
