//! Test utilities for Foodgram services.
//!
//! Provides `MockAuth` identity headers and sample media payloads.
//! Import in `#[cfg(test)]` blocks and `tests/` only, never in production code.

pub mod auth;
pub mod media;
