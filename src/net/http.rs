//! The HTTP client core: an explicit stage chain over a transport.
//!
//! ARCHITECTURE
//! ============
//! Every send walks the same path:
//!
//! ```text
//! caller -> outbound stages -> transport -> inbound stages -> caller
//!            (bearer)                        (log, refresh, report)
//! ```
//!
//! The chain is an ordered list owned by the client, so tests can compose
//! custom stages over a fake transport and production code gets the
//! [`HttpClient::standard`] wiring. Inbound order carries semantics: the log
//! stage sees the raw outcome, the refresh stage may replace it by retrying,
//! and the report stage only sees failures nothing upstream could fix.

#[cfg(test)]
#[path = "http_test.rs"]
mod http_test;

use std::rc::Rc;

use futures::future::{LocalBoxFuture, ready};

use crate::config::ClientConfig;
use crate::net::error::Error;
use crate::net::middleware::{InboundStage, Outcome, OutboundStage};
use crate::net::refresh::{RefreshCoordinator, RefreshStage};
use crate::net::request::{PendingRequest, Response};
use crate::net::transport::Transport;
use crate::state::notices::Notices;
use crate::state::session::SessionCtx;

/// A configured client instance: transport plus stage chain.
pub struct HttpClient {
    transport: Rc<dyn Transport>,
    outbound: Vec<Box<dyn OutboundStage>>,
    inbound: Vec<Box<dyn InboundStage>>,
}

impl HttpClient {
    /// A client with empty stage chains. Stages are added with
    /// [`Self::with_outbound`] / [`Self::with_inbound`] in the order they
    /// should run.
    #[must_use]
    pub fn new(transport: Rc<dyn Transport>) -> Self {
        Self {
            transport,
            outbound: Vec::new(),
            inbound: Vec::new(),
        }
    }

    /// The production wiring: bearer injection outbound; failure logging,
    /// silent 401 refresh, and user-facing reporting inbound.
    #[must_use]
    pub fn standard(
        config: &ClientConfig,
        session: &SessionCtx,
        notices: &Notices,
        transport: Rc<dyn Transport>,
    ) -> Self {
        let coordinator = RefreshCoordinator::new(
            config.clone(),
            session.clone(),
            Rc::clone(&transport),
        );
        Self::new(transport)
            .with_outbound(BearerStage::new(session.clone()))
            .with_inbound(LogStage)
            .with_inbound(RefreshStage::new(coordinator))
            .with_inbound(ReportStage::new(notices.clone()))
    }

    #[must_use]
    pub fn with_outbound(mut self, stage: impl OutboundStage + 'static) -> Self {
        self.outbound.push(Box::new(stage));
        self
    }

    #[must_use]
    pub fn with_inbound(mut self, stage: impl InboundStage + 'static) -> Self {
        self.inbound.push(Box::new(stage));
        self
    }

    /// Send a request through the full stage chain.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Http`] for any non-2xx response that the inbound
    /// stages could not recover, and [`Error::Network`] when no response
    /// arrived at all.
    pub async fn request(&self, mut request: PendingRequest) -> Result<Response, Error> {
        for stage in &self.outbound {
            stage.apply(&mut request);
        }

        log::debug!("{} {}", request.method.as_str(), request.url);
        let result = self.transport.send(request.clone()).await;

        let mut outcome = Outcome { request, result };
        for stage in &self.inbound {
            outcome = stage.process(outcome).await;
        }
        outcome.result
    }
}

/// Outbound stage attaching the session's access token as a bearer
/// credential. An empty token sends the request unauthenticated; a token set
/// by the caller is overwritten, so the header appears exactly once either
/// way.
pub struct BearerStage {
    session: SessionCtx,
}

impl BearerStage {
    #[must_use]
    pub fn new(session: SessionCtx) -> Self {
        Self { session }
    }
}

impl OutboundStage for BearerStage {
    fn apply(&self, request: &mut PendingRequest) {
        let token = self.session.access_token();
        if !token.is_empty() {
            request.set_bearer(&token);
        }
    }
}

/// Inbound stage logging every failure before any recovery runs.
pub struct LogStage;

impl InboundStage for LogStage {
    fn process(&self, outcome: Outcome) -> LocalBoxFuture<'static, Outcome> {
        if let Err(err) = &outcome.result {
            log::warn!(
                "{} {} failed: {err}",
                outcome.request.method.as_str(),
                outcome.request.url
            );
        }
        Box::pin(ready(outcome))
    }
}

/// Inbound stage surfacing unrecovered failures to the notice queue.
/// 401s are excluded: the refresh stage already had its chance, and the
/// navigation guard owns the user-facing side of auth expiry.
pub struct ReportStage {
    notices: Notices,
}

impl ReportStage {
    #[must_use]
    pub fn new(notices: Notices) -> Self {
        Self { notices }
    }
}

impl InboundStage for ReportStage {
    fn process(&self, outcome: Outcome) -> LocalBoxFuture<'static, Outcome> {
        if let Err(err) = &outcome.result {
            if !err.is_unauthorized() {
                self.notices.report(err);
            }
        }
        Box::pin(ready(outcome))
    }
}
