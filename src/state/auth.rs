//! In-memory identity state for the signed-in user.
//!
//! SYSTEM CONTEXT
//! ==============
//! The navigation guard rewrites this state on every identity fetch. Views
//! read it for identity-dependent rendering; the session store, not this
//! cache, is what survives a reload.

#[cfg(test)]
#[path = "auth_test.rs"]
mod auth_test;

use std::cell::RefCell;
use std::rc::Rc;

use crate::net::types::CurrentUser;

/// Authentication state tracking the current user and loading status.
///
/// Transient by design: it is rebuilt from the identity endpoint on every
/// navigation, so losing it on reload costs nothing.
#[derive(Clone, Debug, Default)]
pub struct AuthState {
    pub user: Option<CurrentUser>,
    pub loading: bool,
}

/// Shared handle over [`AuthState`]. The navigation guard writes it on every
/// identity fetch; views read it.
#[derive(Clone, Default)]
pub struct AuthCtx {
    inner: Rc<RefCell<AuthState>>,
}

impl AuthCtx {
    #[must_use]
    pub fn state(&self) -> AuthState {
        self.inner.borrow().clone()
    }

    #[must_use]
    pub fn user(&self) -> Option<CurrentUser> {
        self.inner.borrow().user.clone()
    }

    #[must_use]
    pub fn is_authenticated(&self) -> bool {
        self.inner.borrow().user.is_some()
    }

    #[must_use]
    pub fn is_loading(&self) -> bool {
        self.inner.borrow().loading
    }

    pub fn set_user(&self, user: CurrentUser) {
        self.inner.borrow_mut().user = Some(user);
    }

    pub fn clear_user(&self) {
        self.inner.borrow_mut().user = None;
    }

    pub fn set_loading(&self, loading: bool) {
        self.inner.borrow_mut().loading = loading;
    }
}
