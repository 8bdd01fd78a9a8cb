//! Common test utilities for composition-catalog
//!
//! Shared marker names, module fixtures and population helpers for the
//! integration tests.


pub use fixtures::*;
