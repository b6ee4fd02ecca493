//! Manifest layer
//! - types.rs: ManifestInfo and the defaults used to seed a new manifest
//! - dependencies.rs: self-describing dependency entries and their object form
//! - codec.rs: package.json text <-> ManifestInfo
//! - store.rs: file access trait and its file system implementation
//! - document.rs: ManifestDocument lifecycle (bind, load, edit, save)
//! - error.rs: ManifestError

pub mod codec;
pub mod dependencies;
pub mod document;
pub mod error;
pub mod store;
pub mod types;

pub use codec::{deserialize_manifest, serialize_manifest, serialize_transport};
pub use dependencies::DependencyEntry;
pub use document::{DocumentState, ManifestDocument};
pub use error::ManifestError;
pub use store::{FsStore, ManifestStore};
pub use types::{ManifestDefaults, ManifestInfo, Sample};
