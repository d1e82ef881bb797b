use super::*;

// =============================================================
// Status and classification
// =============================================================

#[test]
fn status_present_only_for_http_errors() {
    let http = Error::Http { status: 500, body: String::new() };
    assert_eq!(http.status(), Some(500));
    assert_eq!(Error::Network("offline".to_owned()).status(), None);
    assert_eq!(Error::RefreshExhausted.status(), None);
}

#[test]
fn is_unauthorized_matches_401_only() {
    assert!(Error::Http { status: 401, body: String::new() }.is_unauthorized());
    assert!(!Error::Http { status: 403, body: String::new() }.is_unauthorized());
    assert!(!Error::Network("offline".to_owned()).is_unauthorized());
}

// =============================================================
// Body message extraction
// =============================================================

#[test]
fn http_message_reads_message_field() {
    let err = Error::Http {
        status: 404,
        body: r#"{"message": "not found"}"#.to_owned(),
    };
    assert_eq!(err.http_message(), Some("not found".to_owned()));
}

#[test]
fn http_message_none_for_malformed_or_missing_body() {
    let plain = Error::Http { status: 500, body: "<html>oops</html>".to_owned() };
    assert_eq!(plain.http_message(), None);

    let wrong_shape = Error::Http { status: 500, body: r#"{"detail": "x"}"#.to_owned() };
    assert_eq!(wrong_shape.http_message(), None);

    assert_eq!(Error::Network("offline".to_owned()).http_message(), None);
}

// =============================================================
// Display
// =============================================================

#[test]
fn display_includes_message_when_present() {
    let err = Error::Http {
        status: 400,
        body: r#"{"message": "bad request"}"#.to_owned(),
    };
    assert_eq!(err.to_string(), "HTTP 400: bad request");
}

#[test]
fn display_is_status_only_without_message() {
    let err = Error::Http { status: 502, body: String::new() };
    assert_eq!(err.to_string(), "HTTP 502");
}

#[test]
fn display_for_network_and_refresh() {
    assert_eq!(Error::Network("offline".to_owned()).to_string(), "network error: offline");
    assert_eq!(Error::RefreshExhausted.to_string(), "refresh token missing or rejected");
}
