//! Version layer
//!
//! # Modules
//!
//! - [`semantic`]: `major.minor.patch` parsing with normalization of malformed input
//! - [`text`]: substitution of a version into display text
//! - [`engine`]: engine release strings used when seeding a new manifest

pub mod engine;
pub mod semantic;
pub mod text;

pub use semantic::{COMPONENT_COUNT, ParsedVersion, Version, normalize_version, parse_version};
pub use text::{DEFAULT_VERSION_KEY, TemplateError, render_version_text};
