//! Request capture and response types.
//!
//! A [`PendingRequest`] is an opaque capture of everything needed to reissue
//! a request unchanged — method, URL, headers, body. The refresh coordinator
//! holds one across the token exchange and replays it at most once with a
//! rewritten `Authorization` header.

#[cfg(test)]
#[path = "request_test.rs"]
mod request_test;

use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::net::error::Error;

/// HTTP method of a captured request.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Method {
    Get,
    Post,
    Put,
    Patch,
    Delete,
}

impl Method {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Get => "GET",
            Self::Post => "POST",
            Self::Put => "PUT",
            Self::Patch => "PATCH",
            Self::Delete => "DELETE",
        }
    }
}

/// A captured outbound request, reissuable as-is.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PendingRequest {
    pub method: Method,
    pub url: String,
    pub headers: Vec<(String, String)>,
    pub body: Option<String>,
}

impl PendingRequest {
    #[must_use]
    pub fn new(method: Method, url: impl Into<String>) -> Self {
        Self { method, url: url.into(), headers: Vec::new(), body: None }
    }

    #[must_use]
    pub fn get(url: impl Into<String>) -> Self {
        Self::new(Method::Get, url)
    }

    #[must_use]
    pub fn post(url: impl Into<String>) -> Self {
        Self::new(Method::Post, url)
    }

    /// Attach a JSON body and the matching content type.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Network`] if the value cannot be serialized.
    pub fn json<T: Serialize>(mut self, value: &T) -> Result<Self, Error> {
        let raw = serde_json::to_string(value)
            .map_err(|err| Error::Network(format!("request body: {err}")))?;
        self.body = Some(raw);
        self.set_header("Content-Type", "application/json");
        Ok(self)
    }

    /// Set a header, replacing any existing value for the same
    /// (case-insensitive) name. A header name therefore never repeats.
    pub fn set_header(&mut self, name: &str, value: impl Into<String>) {
        let value = value.into();
        for (existing, slot) in &mut self.headers {
            if existing.eq_ignore_ascii_case(name) {
                *slot = value;
                return;
            }
        }
        self.headers.push((name.to_owned(), value));
    }

    /// Look up a header value by case-insensitive name.
    #[must_use]
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(existing, _)| existing.eq_ignore_ascii_case(name))
            .map(|(_, value)| value.as_str())
    }

    /// Overwrite the `Authorization` header with a bearer credential.
    pub fn set_bearer(&mut self, token: &str) {
        self.set_header("Authorization", format!("Bearer {token}"));
    }

    /// Builder form of [`Self::set_bearer`].
    #[must_use]
    pub fn with_bearer(mut self, token: &str) -> Self {
        self.set_bearer(token);
        self
    }
}

/// A successful (2xx) response.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Response {
    pub status: u16,
    pub body: String,
}

impl Response {
    /// Decode the body as JSON.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Network`] if the body is not valid JSON for `T`.
    pub fn json<T: DeserializeOwned>(&self) -> Result<T, Error> {
        serde_json::from_str(&self.body)
            .map_err(|err| Error::Network(format!("response body: {err}")))
    }
}
