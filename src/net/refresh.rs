//! Silent token refresh and one-shot retry.
//!
//! DESIGN
//! ======
//! A 401 means the access token expired. The coordinator spends the refresh
//! token on `POST <base>/auth/refresh`, stores the minted access token, and
//! reissues the captured request exactly once with the new credential. The
//! retry goes straight to the transport, not back through the stage chain,
//! so a second 401 terminates instead of recursing.
//!
//! The exchange is single-flighted through the session context: concurrent
//! 401 handlers join one shared exchange future and all observe the same
//! minted token. The exchange clears its own slot as its final step, so the
//! next failure cycle starts fresh.
//!
//! Failure here is never surfaced directly. When the exchange cannot mint a
//! token, the refresh token is dropped from the session (it is spent or
//! invalid) and the caller gets the *original* 401 back.

#[cfg(test)]
#[path = "refresh_test.rs"]
mod refresh_test;

use std::rc::Rc;

use futures::future::{LocalBoxFuture, ready};

use crate::config::ClientConfig;
use crate::net::api::REFRESH_PATH;
use crate::net::error::Error;
use crate::net::middleware::{InboundStage, Outcome};
use crate::net::request::{PendingRequest, Response};
use crate::net::transport::Transport;
use crate::net::types::RefreshResponse;
use crate::state::session::SessionCtx;

/// Resolves 401s by minting a fresh access token and retrying once.
#[derive(Clone)]
pub struct RefreshCoordinator {
    config: ClientConfig,
    session: SessionCtx,
    transport: Rc<dyn Transport>,
}

impl RefreshCoordinator {
    #[must_use]
    pub fn new(config: ClientConfig, session: SessionCtx, transport: Rc<dyn Transport>) -> Self {
        Self { config, session, transport }
    }

    /// Resolve a 401 outcome: refresh, retry the captured request once, and
    /// return the retry's result. If no token can be minted, `original`
    /// comes back unchanged.
    ///
    /// # Errors
    ///
    /// Returns the original failure when the refresh path is exhausted, or
    /// whatever error the single retry produced.
    pub async fn refresh_and_retry(
        &self,
        request: PendingRequest,
        original: Error,
    ) -> Result<Response, Error> {
        match self.fresh_access_token().await {
            Ok(token) => {
                let retry = request.with_bearer(&token);
                log::debug!(
                    "retrying {} {} with refreshed token",
                    retry.method.as_str(),
                    retry.url
                );
                self.transport.send(retry).await
            }
            Err(_) => Err(original),
        }
    }

    /// Join the in-flight exchange, or start one.
    async fn fresh_access_token(&self) -> Result<String, Error> {
        let shared = self.session.join_refresh(|| {
            log::debug!("starting token refresh exchange");
            Box::pin(exchange(
                self.session.clone(),
                Rc::clone(&self.transport),
                self.config.endpoint(REFRESH_PATH),
            ))
        });
        shared.await
    }
}

/// One refresh exchange. Owns its inputs so the future is `'static` and can
/// be shared across every waiter of the current flight.
async fn exchange(
    session: SessionCtx,
    transport: Rc<dyn Transport>,
    url: String,
) -> Result<String, Error> {
    let result = mint_token(&session, transport.as_ref(), &url).await;
    match &result {
        Ok(_) => log::debug!("token refresh succeeded"),
        Err(err) => {
            log::warn!("token refresh failed: {err}");
            session.clear_refresh_token();
        }
    }
    session.finish_refresh();
    result
}

async fn mint_token(
    session: &SessionCtx,
    transport: &dyn Transport,
    url: &str,
) -> Result<String, Error> {
    let refresh_token = session.refresh_token();
    if refresh_token.is_empty() {
        return Err(Error::RefreshExhausted);
    }

    let request = PendingRequest::post(url).with_bearer(&refresh_token);
    let response = transport.send(request).await?;
    let minted: RefreshResponse = response.json()?;
    if minted.access_token.is_empty() {
        return Err(Error::RefreshExhausted);
    }

    session.set_access_token(&minted.access_token);
    Ok(minted.access_token)
}

/// Inbound stage delegating 401 outcomes to the coordinator. Everything
/// else passes through untouched.
pub struct RefreshStage {
    coordinator: RefreshCoordinator,
}

impl RefreshStage {
    #[must_use]
    pub fn new(coordinator: RefreshCoordinator) -> Self {
        Self { coordinator }
    }
}

impl InboundStage for RefreshStage {
    fn process(&self, outcome: Outcome) -> LocalBoxFuture<'static, Outcome> {
        let Outcome { request, result } = outcome;
        let original = match result {
            Err(err) if err.is_unauthorized() => err,
            other => return Box::pin(ready(Outcome { request, result: other })),
        };

        let coordinator = self.coordinator.clone();
        Box::pin(async move {
            let result = coordinator.refresh_and_retry(request.clone(), original).await;
            Outcome { request, result }
        })
    }
}
