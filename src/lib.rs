//! Semantic version and dependency management for package.json manifests
//!
//! # Modules
//!
//! - [`version`]: `major.minor.patch` parsing, normalization and text rendering
//! - [`manifest`]: manifest model, package.json codec and document lifecycle
//! - [`export`]: version data file synced from a manifest
//! - [`config`]: tool configuration and data directories
//! - [`logging`]: tracing subscriber setup for the binary

pub mod config;
pub mod export;
pub mod logging;
pub mod manifest;
pub mod version;
