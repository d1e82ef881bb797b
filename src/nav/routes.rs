//! Route classification and query-string helpers.

#[cfg(test)]
#[path = "routes_test.rs"]
mod routes_test;

/// Client route of the login page.
pub const LOGIN_ROUTE: &str = "/login";

/// Where an authenticated user lands when no better destination is known.
pub const DEFAULT_ROUTE: &str = "/";

/// Query parameter carrying the destination to restore after login.
pub const NEXT_PARAM: &str = "next";

/// Routes reachable without a session.
pub const PUBLIC_ROUTES: &[&str] = &[LOGIN_ROUTE];

/// Normalize a path for comparison: trailing slashes are insignificant,
/// except that the root stays `/`.
#[must_use]
pub fn normalize(path: &str) -> &str {
    let trimmed = path.trim_end_matches('/');
    if trimmed.is_empty() { DEFAULT_ROUTE } else { trimmed }
}

/// Whether `path` is reachable without authentication.
#[must_use]
pub fn is_public(path: &str) -> bool {
    let path = normalize(path);
    PUBLIC_ROUTES.iter().any(|route| *route == path)
}

/// Serialize query pairs into a form-encoded string, without a leading `?`.
#[must_use]
pub fn encode_query(pairs: &[(&str, &str)]) -> String {
    let mut serializer = form_urlencoded::Serializer::new(String::new());
    for (name, value) in pairs {
        serializer.append_pair(name, value);
    }
    serializer.finish()
}

/// First value for `name` in a raw query string, percent-decoded.
#[must_use]
pub fn query_value(query: &str, name: &str) -> Option<String> {
    for (key, value) in form_urlencoded::parse(query.as_bytes()) {
        if key == name {
            return Some(value.into_owned());
        }
    }
    None
}
