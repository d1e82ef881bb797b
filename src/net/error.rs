//! Failure taxonomy for the request pipeline.
//!
//! ERROR HANDLING
//! ==============
//! Every failure a caller can observe is one of three shapes: the server
//! answered with a non-2xx status, no usable response arrived at all, or the
//! refresh path ran out of credentials. Errors are `Clone` so the shared
//! refresh future can fan the same result out to every waiter.

#[cfg(test)]
#[path = "error_test.rs"]
mod error_test;

/// A failed request as seen by pipeline callers.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    /// The request produced no usable response (transport failure,
    /// unreachable server, or a body that could not be decoded).
    #[error("network error: {0}")]
    Network(String),

    /// The server responded with a failure status. `body` is the raw
    /// response payload; the backend's error shape is `{"message": "..."}`.
    #[error("{}", http_error_text(.status, .body))]
    Http { status: u16, body: String },

    /// The refresh token is empty or was rejected by the refresh exchange.
    #[error("refresh token missing or rejected")]
    RefreshExhausted,
}

impl Error {
    /// HTTP status code, if the server responded at all.
    #[must_use]
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Http { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Whether this failure is an authentication rejection.
    #[must_use]
    pub fn is_unauthorized(&self) -> bool {
        self.status() == Some(401)
    }

    /// Best-effort human message extracted from the error body.
    #[must_use]
    pub fn http_message(&self) -> Option<String> {
        match self {
            Self::Http { body, .. } => parse_message(body),
            _ => None,
        }
    }
}

/// Pull the `message` field out of a JSON error body.
fn parse_message(body: &str) -> Option<String> {
    let value: serde_json::Value = serde_json::from_str(body).ok()?;
    value.get("message")?.as_str().map(str::to_owned)
}

fn http_error_text(status: &u16, body: &str) -> String {
    match parse_message(body) {
        Some(message) => format!("HTTP {status}: {message}"),
        None => format!("HTTP {status}"),
    }
}
