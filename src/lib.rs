//! Authenticated request pipeline for the bamboo admin console.
//!
//! This crate is compiled to WebAssembly and runs in the browser. It owns the
//! client's auth nucleus: a typed HTTP client that attaches bearer
//! credentials on the way out, silently refreshes an expired access token on
//! a 401 and replays the failed request once, a persisted session store, a
//! navigation guard that decides redirects around the login flow, and a
//! notice queue for user-facing failures. The host view layer is responsible
//! only for rendering, wiring its router to [`nav::guard::NavigationGuard`],
//! and displaying [`state::notices`] entries.
//!
//! All pipeline logic is browser-free and tested natively; the `gloo-net`
//! transport, `localStorage` persistence, and console logging are gated
//! behind the `hydrate` feature and compile to inert stubs elsewhere.
//!
//! ## Module layout
//!
//! | Module | Role |
//! |--------|------|
//! | [`net`] | HTTP client core, middleware chain, refresh coordinator, typed endpoints |
//! | [`state`] | Session store, current-user cache, user-facing notices |
//! | [`nav`] | Route table and the pre-navigation guard |
//! | [`config`] | Base API URL configuration |
//! | [`app`] | Context bundle wiring everything together for the host |
//! | [`util`] | Browser `localStorage` helpers |

pub mod app;
pub mod config;
pub mod nav;
pub mod net;
pub mod state;
pub mod util;
