//! Navigation guard: fresh identity evidence before every route transition.
//!
//! DESIGN
//! ======
//! The guard never navigates by itself. It evaluates an attempted transition
//! and returns a [`NavigationDecision`] for the host router to apply, so the
//! decision logic stays free of any routing framework and runs under native
//! tests.
//!
//! Every call consults the identity endpoint through the shared client —
//! which may silently refresh an expired token on the way — and rebuilds the
//! cached user from the answer. No state is trusted across navigations.
//!
//! Only a 401 on a protected route redirects. Any other failure proceeds:
//! a flaky backend must not lock the user out of pages that will themselves
//! surface the problem.

#[cfg(test)]
#[path = "guard_test.rs"]
mod guard_test;

use crate::nav::routes::{self, DEFAULT_ROUTE, LOGIN_ROUTE, NEXT_PARAM};
use crate::net::api::Api;
use crate::state::auth::AuthCtx;
use crate::state::notices::Notices;

/// Notice shown when an unauthenticated user hits a protected route.
pub const LOGIN_REQUIRED_NOTICE: &str = "You need to log in.";

/// A navigation destination: path plus raw query string (no `?`).
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RouteTarget {
    pub path: String,
    pub query: String,
}

impl RouteTarget {
    #[must_use]
    pub fn new(path: impl Into<String>, query: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            query: query.into(),
        }
    }

    /// Split a full path like `/boards?tab=2` into path and query.
    #[must_use]
    pub fn parse(full_path: &str) -> Self {
        match full_path.split_once('?') {
            Some((path, query)) => Self::new(path, query),
            None => Self::new(full_path, ""),
        }
    }

    /// The full path including the query string, as a router consumes it.
    #[must_use]
    pub fn full_path(&self) -> String {
        if self.query.is_empty() {
            self.path.clone()
        } else {
            format!("{}?{}", self.path, self.query)
        }
    }

    /// First value of a query parameter, percent-decoded.
    #[must_use]
    pub fn query_value(&self, name: &str) -> Option<String> {
        routes::query_value(&self.query, name)
    }
}

/// What the host router should do with an attempted navigation.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum NavigationDecision {
    Proceed,
    Redirect(RouteTarget),
}

impl NavigationDecision {
    #[must_use]
    pub fn is_proceed(&self) -> bool {
        matches!(self, Self::Proceed)
    }

    /// Redirect destination as a full path, if any.
    #[must_use]
    pub fn redirect_to(&self) -> Option<String> {
        match self {
            Self::Proceed => None,
            Self::Redirect(target) => Some(target.full_path()),
        }
    }
}

/// Evaluates route transitions against live session state.
pub struct NavigationGuard {
    api: Api,
    auth: AuthCtx,
    notices: Notices,
}

impl NavigationGuard {
    #[must_use]
    pub fn new(api: Api, auth: AuthCtx, notices: Notices) -> Self {
        Self { api, auth, notices }
    }

    /// Decide an attempted navigation to `target`.
    pub async fn before_navigate(&self, target: &RouteTarget) -> NavigationDecision {
        self.auth.set_loading(true);
        let fetched = self.api.fetch_current_user().await;
        self.auth.set_loading(false);

        match fetched {
            Ok(user) => {
                log::debug!("navigation allowed for {}", user.username);
                self.auth.set_user(user);
                if routes::normalize(&target.path) == LOGIN_ROUTE {
                    // Logged in already; send them where they meant to go.
                    let destination = next_destination(target);
                    return NavigationDecision::Redirect(RouteTarget::parse(&destination));
                }
                NavigationDecision::Proceed
            }
            Err(err) => {
                self.auth.clear_user();
                if err.is_unauthorized() && !routes::is_public(&target.path) {
                    log::debug!("unauthenticated navigation to {}; redirecting", target.path);
                    self.notices.warning(LOGIN_REQUIRED_NOTICE);
                    let query = routes::encode_query(&[(NEXT_PARAM, &target.full_path())]);
                    return NavigationDecision::Redirect(RouteTarget::new(LOGIN_ROUTE, query));
                }
                NavigationDecision::Proceed
            }
        }
    }
}

/// Destination to restore once login is unnecessary. Only same-site
/// absolute paths are honored; anything else falls back to the default
/// route.
fn next_destination(target: &RouteTarget) -> String {
    target
        .query_value(NEXT_PARAM)
        .filter(|next| next.starts_with('/') && !next.starts_with("//"))
        .unwrap_or_else(|| DEFAULT_ROUTE.to_owned())
}
