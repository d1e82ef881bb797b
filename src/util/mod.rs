//! Small browser-facing utilities shared across the crate.

pub mod storage;
