//! WOD Core - download logic for the Waymo Open Dataset fetcher.
//!
//! This crate contains all fetch logic with zero CLI dependencies:
//! scene-list resolution, remote path templating, the copy-tool wrapper,
//! and the bounded-concurrency fetch orchestrator.

pub mod config;
pub mod fetch;
pub mod index;
pub mod logging;
pub mod models;
pub mod remote;

/// Returns the crate version.
pub fn version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
