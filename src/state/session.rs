//! Persisted bearer credentials and the shared session context.
//!
//! SYSTEM CONTEXT
//! ==============
//! The session is the single source of truth for both tokens. Every outbound
//! request reads it; only the refresh coordinator and explicit login/logout
//! actions write it. Persistence goes through the [`SessionStore`] trait so
//! the browser build keeps credentials in `localStorage` while native builds
//! and tests use an in-memory store.
//!
//! CONCURRENCY
//! ===========
//! [`SessionCtx`] also owns the single-flight slot for the token refresh
//! exchange. Concurrent 401 handlers join the same shared exchange future
//! instead of racing their own, so the refresh token is spent at most once
//! per failure cycle and a slow duplicate can never overwrite a fresh access
//! token with a stale one.

#[cfg(test)]
#[path = "session_test.rs"]
mod session_test;

use std::cell::RefCell;
use std::rc::Rc;

use futures::FutureExt;
use futures::future::{LocalBoxFuture, Shared};
use serde::{Deserialize, Serialize};

use crate::net::error::Error;
use crate::util::storage;

/// `localStorage` key holding the serialized session.
pub const SESSION_STORAGE_KEY: &str = "bamboo-state";

/// Persisted token pair.
///
/// Serialized as camelCase JSON (`accessToken` / `refreshToken`) so sessions
/// written by earlier clients keep loading. Missing fields default to empty,
/// which reads as "not logged in" rather than a load failure.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Session {
    pub access_token: String,
    pub refresh_token: String,
}

impl Session {
    #[must_use]
    pub fn has_access_token(&self) -> bool {
        !self.access_token.is_empty()
    }

    #[must_use]
    pub fn has_refresh_token(&self) -> bool {
        !self.refresh_token.is_empty()
    }
}

/// Persistence backend for the session.
pub trait SessionStore {
    fn load(&self) -> Session;
    fn save(&self, session: &Session);
    fn clear(&self);
}

/// In-memory store for native builds and tests.
#[derive(Default)]
pub struct MemoryStore {
    session: RefCell<Session>,
}

impl SessionStore for MemoryStore {
    fn load(&self) -> Session {
        self.session.borrow().clone()
    }

    fn save(&self, session: &Session) {
        *self.session.borrow_mut() = session.clone();
    }

    fn clear(&self) {
        *self.session.borrow_mut() = Session::default();
    }
}

/// Store backed by browser `localStorage` under [`SESSION_STORAGE_KEY`].
/// Off the browser all operations degrade to an empty session.
#[derive(Clone, Copy, Debug, Default)]
pub struct BrowserStore;

impl SessionStore for BrowserStore {
    fn load(&self) -> Session {
        storage::load_json(SESSION_STORAGE_KEY).unwrap_or_default()
    }

    fn save(&self, session: &Session) {
        storage::save_json(SESSION_STORAGE_KEY, session);
    }

    fn clear(&self) {
        storage::remove(SESSION_STORAGE_KEY);
    }
}

/// The refresh exchange as a boxed future resolving to a new access token.
pub type RefreshFuture = LocalBoxFuture<'static, Result<String, Error>>;

/// A [`RefreshFuture`] fanned out to every concurrent waiter.
pub type SharedRefresh = Shared<RefreshFuture>;

/// Cheaply cloneable handle over the session store plus the single-flight
/// refresh slot. All clones observe the same tokens and the same in-flight
/// exchange.
#[derive(Clone)]
pub struct SessionCtx {
    inner: Rc<SessionInner>,
}

struct SessionInner {
    store: Box<dyn SessionStore>,
    in_flight: RefCell<Option<SharedRefresh>>,
}

impl SessionCtx {
    #[must_use]
    pub fn new(store: Box<dyn SessionStore>) -> Self {
        Self {
            inner: Rc::new(SessionInner {
                store,
                in_flight: RefCell::new(None),
            }),
        }
    }

    /// Context over an in-memory store. The default for native builds and
    /// tests.
    #[must_use]
    pub fn in_memory() -> Self {
        Self::new(Box::new(MemoryStore::default()))
    }

    /// Context over browser `localStorage`.
    #[must_use]
    pub fn browser() -> Self {
        Self::new(Box::new(BrowserStore))
    }

    #[must_use]
    pub fn session(&self) -> Session {
        self.inner.store.load()
    }

    #[must_use]
    pub fn access_token(&self) -> String {
        self.session().access_token
    }

    #[must_use]
    pub fn refresh_token(&self) -> String {
        self.session().refresh_token
    }

    /// Replace the whole persisted session (login path).
    pub fn set_session(&self, session: &Session) {
        self.inner.store.save(session);
    }

    /// Overwrite only the access token, keeping the refresh token.
    pub fn set_access_token(&self, token: &str) {
        let mut session = self.session();
        session.access_token = token.to_owned();
        self.inner.store.save(&session);
    }

    /// Drop the refresh token, keeping the access token. Called when a
    /// refresh exchange fails and the token is known to be spent or invalid.
    pub fn clear_refresh_token(&self) {
        let mut session = self.session();
        session.refresh_token = String::new();
        self.inner.store.save(&session);
    }

    /// Drop the persisted session entirely (logout path).
    pub fn clear(&self) {
        self.inner.store.clear();
    }

    /// Join the in-flight refresh exchange, or install the future built by
    /// `make` as the new flight. Exactly one flight exists at a time; every
    /// caller between install and [`Self::finish_refresh`] receives a clone
    /// of the same shared future.
    #[must_use]
    pub fn join_refresh(&self, make: impl FnOnce() -> RefreshFuture) -> SharedRefresh {
        let mut slot = self.inner.in_flight.borrow_mut();
        if let Some(existing) = slot.as_ref() {
            return existing.clone();
        }
        let shared = make().shared();
        *slot = Some(shared.clone());
        shared
    }

    /// Clear the in-flight slot so the next 401 starts a fresh exchange.
    /// Called by the exchange future itself as its final step.
    pub fn finish_refresh(&self) {
        self.inner.in_flight.borrow_mut().take();
    }
}
