//! Integration Tests
//!
//! End-to-end tests against real image files on disk:
//! - Materialization: pixels and labels from decoded PNGs
//! - Configuration: reader.toml loading and path resolution
//! - Chunks: residency hooks through the public facade

#[path = "../common/mod.rs"]
mod common;

mod chunks;
mod configuration;
mod materialization;
