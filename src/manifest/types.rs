//! Manifest data model

use serde::{Deserialize, Serialize};

use crate::version::engine::release_prefix;

/// Contents of a package.json manifest.
///
/// `dependencies` holds self-describing entries (`name: version`). The field
/// is always serialized, as an empty collection when there are none.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ManifestInfo {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub display_name: Option<String>,
    pub version: String,
    /// Minimum engine release, e.g. "2018.2". A patch suffix breaks newer package managers.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub unity: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub author: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub homepage: Option<String>,
    pub dependencies: Vec<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub keywords: Vec<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub samples: Vec<Sample>,
}

/// Optional importable part of a package
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Sample {
    pub display_name: String,
    pub description: String,
    pub path: String,
}

/// Values from the host environment used to fill a manifest that does not exist yet
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ManifestDefaults {
    /// Application identifier, used as the package name
    pub identifier: String,
    pub version: String,
    /// Full engine release such as "2018.2.0f2"
    pub engine_version: Option<String>,
}

impl ManifestInfo {
    /// Fill fields that are still empty from `defaults`. Populated fields are kept.
    pub fn apply_defaults(&mut self, defaults: &ManifestDefaults) {
        if self.name.is_empty() {
            self.name = defaults.identifier.clone();
        }
        if self.version.is_empty() {
            self.version = defaults.version.clone();
        }
        if self.unity.as_deref().is_none_or(str::is_empty) {
            self.unity = defaults
                .engine_version
                .as_deref()
                .map(release_prefix)
                .filter(|prefix| !prefix.is_empty());
        }
    }
}
