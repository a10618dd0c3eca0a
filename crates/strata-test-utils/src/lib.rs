//! Shared test utilities for the Strata workspace.
//!
//! This crate provides standardised fixtures to eliminate duplication
//! across crate test suites. It is a dev-dependency only and never published.
//!
//! # Modules
//!
//! - [`project`]: [`TestProject`] builder for temporary configuration trees
//! - [`plugins`]: a small set of deterministic sample plugins
//! - [`logging`]: opt-in tracing output for tests

pub mod logging;
pub mod plugins;
pub mod project;

pub use project::TestProject;
