//! Networking modules for the authenticated request pipeline.
//!
//! SYSTEM CONTEXT
//! ==============
//! `http` owns the client core and its middleware chain, `refresh` recovers
//! 401s through the token-refresh exchange, `api` exposes the typed
//! endpoints, `transport` is the browser/native seam, and `types`/`error`/
//! `request` define the shared wire schema.

pub mod api;
pub mod error;
pub mod http;
pub mod middleware;
pub mod refresh;
pub mod request;
pub mod transport;
pub mod types;
