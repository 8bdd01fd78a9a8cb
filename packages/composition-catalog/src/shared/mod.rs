//! Shared module - Common types used by every feature
//!
//! Handles, tokens and the crate error type. No async or I/O here.

pub mod models;

pub use models::*;
