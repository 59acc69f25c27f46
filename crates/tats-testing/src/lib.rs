//! Test utilities for Tats services.
//!
//! Provides the `MockAuth` identity-header builder and the golden-fixture
//! loader. Import in `#[cfg(test)]` blocks and dev-dependencies only — never
//! in production code.

pub mod auth;
pub mod fixture;
