//! Shared test utilities available to both unit and integration tests.
//!
//! Enabled via `#[cfg(test)]` (unit tests) or the `testkit` feature
//! (integration tests).
//!
//! # Modules
//!
//! - [`domain`] - Builders for aggregates, upload sets and fixed clocks.
//! - [`config`] - Instant-delay configs, temp config files, and dashboards
//!   wired for deterministic tests.

pub mod config;
pub mod domain;
