//! Shared client-side state modules.
//!
//! DESIGN
//! ======
//! State is split by domain (`session`, `auth`, `notices`) so individual
//! consumers can depend on small focused models. Every model is wrapped in a
//! cheaply cloneable `Rc`-backed handle that callers receive by injection —
//! there are no ambient globals, which keeps every piece constructible in
//! isolation for tests.

pub mod auth;
pub mod notices;
pub mod session;
