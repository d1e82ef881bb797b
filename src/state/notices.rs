//! User-facing notice queue (transient snackbar-style messages).
//!
//! SYSTEM CONTEXT
//! ==============
//! The request pipeline reports unrecovered failures here and the navigation
//! guard posts its "log in first" hint. The view layer renders whatever
//! [`Notices::list`] returns and may dismiss entries early; in the browser
//! every notice also dismisses itself after [`NOTICE_DISMISS_MS`].
//!
//! 401 failures never reach this queue. They are either resolved silently by
//! the refresh path or turned into a login redirect by the guard.

#[cfg(test)]
#[path = "notices_test.rs"]
mod notices_test;

use std::cell::RefCell;
use std::rc::Rc;

use uuid::Uuid;

use crate::net::error::Error;

/// How long a notice stays visible in the browser before auto-dismissing.
pub const NOTICE_DISMISS_MS: u64 = 5000;

/// Severity of a notice.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum NoticeLevel {
    Warning,
    Error,
}

/// A transient user-visible message.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Notice {
    pub id: Uuid,
    pub level: NoticeLevel,
    pub text: String,
}

/// Shared notice queue surfaced to the view layer.
#[derive(Clone, Default)]
pub struct Notices {
    inner: Rc<RefCell<Vec<Notice>>>,
}

impl Notices {
    /// Push a notice and schedule its auto-dismiss.
    pub fn push(&self, level: NoticeLevel, text: impl Into<String>) {
        let id = Uuid::new_v4();
        self.inner.borrow_mut().push(Notice {
            id,
            level,
            text: text.into(),
        });
        self.schedule_dismiss(id);
    }

    pub fn warning(&self, text: impl Into<String>) {
        self.push(NoticeLevel::Warning, text);
    }

    pub fn error(&self, text: impl Into<String>) {
        self.push(NoticeLevel::Error, text);
    }

    /// Report a request failure in the wording the UI uses for snackbars.
    pub fn report(&self, error: &Error) {
        self.error(report_text(error));
    }

    pub fn dismiss(&self, id: Uuid) {
        self.inner.borrow_mut().retain(|notice| notice.id != id);
    }

    #[must_use]
    pub fn list(&self) -> Vec<Notice> {
        self.inner.borrow().clone()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.inner.borrow().len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.inner.borrow().is_empty()
    }

    fn schedule_dismiss(&self, id: Uuid) {
        #[cfg(feature = "hydrate")]
        {
            let notices = self.clone();
            wasm_bindgen_futures::spawn_local(async move {
                gloo_timers::future::sleep(std::time::Duration::from_millis(NOTICE_DISMISS_MS))
                    .await;
                notices.dismiss(id);
            });
        }
        #[cfg(not(feature = "hydrate"))]
        {
            let _ = id;
        }
    }
}

/// Format an error the way the UI presents request failures: the HTTP status
/// (or `unknown` when none exists) plus the best available detail.
#[must_use]
pub fn report_text(error: &Error) -> String {
    match error {
        Error::Http { status, .. } => {
            let detail = error
                .http_message()
                .unwrap_or_else(|| "no further detail".to_owned());
            format!("Request failed with {status}: {detail}")
        }
        Error::Network(message) => format!("Request failed with unknown: {message}"),
        Error::RefreshExhausted => format!("Request failed with unknown: {error}"),
    }
}
