//! Application bootstrap: one bundle wiring every shared handle together.
//!
//! SYSTEM CONTEXT
//! ==============
//! The host view layer builds one [`AppCtx`] at startup and hands its
//! pieces down to pages and components. Everything here is plain injectable
//! state; rendering and routing stay outside this crate. The browser build
//! additionally installs console logging and panic reporting.

#[cfg(test)]
#[path = "app_test.rs"]
mod app_test;

use std::rc::Rc;

use crate::config::ClientConfig;
use crate::nav::guard::NavigationGuard;
use crate::net::api::Api;
use crate::net::http::HttpClient;
use crate::net::transport::{BrowserTransport, Transport};
use crate::state::auth::AuthCtx;
use crate::state::notices::Notices;
use crate::state::session::SessionCtx;

/// Shared handles for one running client application.
pub struct AppCtx {
    pub config: ClientConfig,
    pub session: SessionCtx,
    pub auth: AuthCtx,
    pub notices: Notices,
    pub http: Rc<HttpClient>,
    pub api: Api,
    pub guard: NavigationGuard,
}

impl AppCtx {
    /// Browser bootstrap: console logging and panic reporting, the
    /// `localStorage`-backed session, and the fetch transport.
    #[must_use]
    pub fn bootstrap() -> Self {
        init_logging();
        Self::with_parts(
            ClientConfig::from_build_env(),
            SessionCtx::browser(),
            Rc::new(BrowserTransport),
        )
    }

    /// Assemble a context from explicit parts. Tests inject a memory-backed
    /// session and a scripted transport through here.
    #[must_use]
    pub fn with_parts(
        config: ClientConfig,
        session: SessionCtx,
        transport: Rc<dyn Transport>,
    ) -> Self {
        let auth = AuthCtx::default();
        let notices = Notices::default();
        let http = Rc::new(HttpClient::standard(&config, &session, &notices, transport));
        let api = Api::new(Rc::clone(&http), config.clone(), session.clone());
        let guard = NavigationGuard::new(api.clone(), auth.clone(), notices.clone());
        Self {
            config,
            session,
            auth,
            notices,
            http,
            api,
            guard,
        }
    }

    /// Clear the persisted session and the cached identity.
    pub fn logout(&self) {
        self.api.logout();
        self.auth.clear_user();
    }
}

fn init_logging() {
    #[cfg(feature = "hydrate")]
    {
        console_error_panic_hook::set_once();
        let _ = console_log::init_with_level(log::Level::Debug);
    }
}
