//! Typed endpoint calls for the auth-backed API.
//!
//! Thin wrappers over [`HttpClient`]: each call builds the request, sends it
//! through the full stage chain (bearer injection and silent refresh
//! included), and decodes the JSON body into its wire type.
//!
//! ERROR HANDLING
//! ==============
//! Callers get `Result` outputs; a 401 reaching them here means the refresh
//! path was already exhausted, so views can treat it as "logged out" without
//! second-guessing.

#[cfg(test)]
#[path = "api_test.rs"]
mod api_test;

use std::rc::Rc;

use crate::config::ClientConfig;
use crate::net::error::Error;
use crate::net::http::HttpClient;
use crate::net::request::PendingRequest;
use crate::net::types::{AuthResponse, CurrentUser, LoginRequest};
use crate::state::session::{Session, SessionCtx};

/// Endpoint path for the credential login exchange.
pub const LOGIN_PATH: &str = "auth/login";
/// Endpoint path for the refresh-token exchange.
pub const REFRESH_PATH: &str = "auth/refresh";
/// Endpoint path for the authenticated identity fetch.
pub const CURRENT_USER_PATH: &str = "auth/current";

/// Typed API surface handed to views and the navigation guard.
#[derive(Clone)]
pub struct Api {
    http: Rc<HttpClient>,
    config: ClientConfig,
    session: SessionCtx,
}

impl Api {
    #[must_use]
    pub fn new(http: Rc<HttpClient>, config: ClientConfig, session: SessionCtx) -> Self {
        Self {
            http,
            config,
            session,
        }
    }

    /// Exchange credentials for a token pair and persist it as the session.
    ///
    /// # Errors
    ///
    /// Returns the server's rejection (typically a 401 for bad credentials)
    /// or a decode failure. The session is only written on success.
    pub async fn login(&self, username: &str, password: &str) -> Result<(), Error> {
        let request = PendingRequest::post(self.config.endpoint(LOGIN_PATH))
            .json(&LoginRequest { username, password })?;
        let response = self.http.request(request).await?;
        let tokens: AuthResponse = response.json()?;

        self.session.set_session(&Session {
            access_token: tokens.access_token,
            refresh_token: tokens.refresh_token,
        });
        log::debug!("login succeeded for {username}");
        Ok(())
    }

    /// Fetch the authenticated user's identity.
    ///
    /// # Errors
    ///
    /// Returns a 401 when no valid session exists even after a refresh
    /// attempt.
    pub async fn fetch_current_user(&self) -> Result<CurrentUser, Error> {
        let request = PendingRequest::get(self.config.endpoint(CURRENT_USER_PATH));
        let response = self.http.request(request).await?;
        response.json()
    }

    /// Drop the persisted session. Client-side only: the backend keeps no
    /// session state to invalidate.
    pub fn logout(&self) {
        self.session.clear();
        log::debug!("session cleared");
    }
}
