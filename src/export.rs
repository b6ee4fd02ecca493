//! Version data file kept in sync with a manifest
//!
//! The file holds the manifest in its transport form (dependencies as an
//! array of `name: version` strings) so runtime code can read the version
//! without the package.json conversion.

use std::path::Path;

use tracing::info;

use crate::manifest::codec::{deserialize_manifest, serialize_transport};
use crate::manifest::error::ManifestError;
use crate::manifest::store::ManifestStore;
use crate::manifest::types::ManifestInfo;

/// Write `info` to `path` in transport form
pub fn export_version_data<S: ManifestStore>(
    store: &S,
    path: &Path,
    info: &ManifestInfo,
) -> Result<(), ManifestError> {
    let text = serialize_transport(info)?;
    store
        .write(path, &text)
        .map_err(|source| ManifestError::Io {
            path: path.to_path_buf(),
            source,
        })?;

    info!("Exported version {} to {}", info.version, path.display());
    Ok(())
}

/// Read a version data file written by [`export_version_data`]
pub fn load_version_data<S: ManifestStore>(
    store: &S,
    path: &Path,
) -> Result<ManifestInfo, ManifestError> {
    if !store.exists(path) {
        return Err(ManifestError::NotFound(path.to_path_buf()));
    }

    let text = store
        .read_to_string(path)
        .map_err(|source| ManifestError::Io {
            path: path.to_path_buf(),
            source,
        })?;
    deserialize_manifest(&text)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::manifest::store::FsStore;
    use tempfile::TempDir;

    #[test]
    fn export_then_load_returns_same_info() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("StreamingAssets/VersionData.json");
        let info = ManifestInfo {
            name: "com.example.game".to_string(),
            version: "1.4.2".to_string(),
            dependencies: vec!["com.unity.standardevents: 1.0.13".to_string()],
            ..Default::default()
        };

        export_version_data(&FsStore, &path, &info).unwrap();

        let text = std::fs::read_to_string(&path).unwrap();
        assert!(text.contains(r#""com.unity.standardevents: 1.0.13""#));
        assert_eq!(load_version_data(&FsStore, &path).unwrap(), info);
    }

    #[test]
    fn load_version_data_reports_missing_file() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("VersionData.json");

        let error = load_version_data(&FsStore, &path).unwrap_err();
        assert!(matches!(error, ManifestError::NotFound(_)));
    }
}
