//! Transport seam between the request pipeline and the browser fetch API.
//!
//! Client-side (hydrate): real HTTP calls via `gloo-net`.
//! Server-side (SSR): stub returning an error since network calls are
//! only meaningful in the browser.
//!
//! The [`Transport`] trait exists so the pipeline, the refresh coordinator
//! and the tests all talk to the same seam. Production wires in
//! [`BrowserTransport`]; tests wire in a scripted fake.

#![allow(clippy::unused_async)]

#[cfg(test)]
#[path = "transport_test.rs"]
mod transport_test;

use futures::future::LocalBoxFuture;

use crate::net::error::Error;
use crate::net::request::{PendingRequest, Response};

/// Delivers a captured request and produces its raw outcome.
///
/// `2xx` statuses resolve to `Ok`; any other status resolves to
/// [`Error::Http`] carrying the status and body. Failures before a status
/// line exists (DNS, refused connection, aborted fetch) resolve to
/// [`Error::Network`].
pub trait Transport {
    fn send(&self, request: PendingRequest) -> LocalBoxFuture<'static, Result<Response, Error>>;
}

/// Transport backed by the browser `fetch` API.
#[derive(Clone, Copy, Debug, Default)]
pub struct BrowserTransport;

impl Transport for BrowserTransport {
    fn send(&self, request: PendingRequest) -> LocalBoxFuture<'static, Result<Response, Error>> {
        Box::pin(send_browser(request))
    }
}

#[cfg(feature = "hydrate")]
async fn send_browser(request: PendingRequest) -> Result<Response, Error> {
    use crate::net::request::Method;

    let mut builder = match request.method {
        Method::Get => gloo_net::http::Request::get(&request.url),
        Method::Post => gloo_net::http::Request::post(&request.url),
        Method::Put => gloo_net::http::Request::put(&request.url),
        Method::Patch => gloo_net::http::Request::patch(&request.url),
        Method::Delete => gloo_net::http::Request::delete(&request.url),
    };
    for (name, value) in &request.headers {
        builder = builder.header(name, value);
    }

    let resp = match request.body {
        Some(body) => builder
            .body(body)
            .map_err(|e| Error::Network(e.to_string()))?
            .send()
            .await
            .map_err(|e| Error::Network(e.to_string()))?,
        None => builder
            .send()
            .await
            .map_err(|e| Error::Network(e.to_string()))?,
    };

    let status = resp.status();
    let body = resp.text().await.map_err(|e| Error::Network(e.to_string()))?;
    if (200..300).contains(&status) {
        Ok(Response { status, body })
    } else {
        Err(Error::Http { status, body })
    }
}

#[cfg(not(feature = "hydrate"))]
async fn send_browser(request: PendingRequest) -> Result<Response, Error> {
    let _ = request;
    Err(Error::Network("not available on server".to_owned()))
}
