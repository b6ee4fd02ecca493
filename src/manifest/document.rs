//! A manifest bound to an optional file, with its parsed version

use std::path::{Path, PathBuf};

use tracing::{debug, info};

use crate::manifest::codec::{deserialize_manifest, serialize_manifest};
use crate::manifest::error::ManifestError;
use crate::manifest::store::{FsStore, ManifestStore};
use crate::manifest::types::{ManifestDefaults, ManifestInfo};
use crate::version::{Version, normalize_version};

/// Lifecycle of a [`ManifestDocument`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentState {
    /// No file and no contents
    Unbound,
    /// A file path is set but has not been parsed yet
    Bound,
    /// Contents match the last read
    Loaded,
    /// Contents were edited and not yet written
    Dirty,
    /// Contents match the last write
    Saved,
}

/// Owns a package.json path (optional for in-memory documents), its
/// contents, and the numeric form of its version.
///
/// Nothing is written implicitly; call [`save`](Self::save) or
/// [`increment_patch`](Self::increment_patch).
#[derive(Debug)]
pub struct ManifestDocument<S: ManifestStore = FsStore> {
    store: S,
    path: Option<PathBuf>,
    info: ManifestInfo,
    version: Version,
    state: DocumentState,
}

impl ManifestDocument<FsStore> {
    /// Read and parse the manifest at `path` from the file system
    pub fn open(path: impl Into<PathBuf>) -> Result<Self, ManifestError> {
        Self::open_with(FsStore, path)
    }
}

impl<S: ManifestStore> ManifestDocument<S> {
    /// An unbound, empty document
    pub fn new(store: S) -> Self {
        Self {
            store,
            path: None,
            info: ManifestInfo::default(),
            version: Version::default(),
            state: DocumentState::Unbound,
        }
    }

    pub fn open_with(store: S, path: impl Into<PathBuf>) -> Result<Self, ManifestError> {
        let mut document = Self::new(store);
        document.bind(path);
        document.load()?;
        Ok(document)
    }

    /// An in-memory document parsed from `text`, with no file to save to
    pub fn from_text(store: S, text: &str) -> Result<Self, ManifestError> {
        let mut document = Self::new(store);
        document.set_info(deserialize_manifest(text)?);
        document.state = DocumentState::Loaded;
        Ok(document)
    }

    /// Write a new manifest to `path`, filling empty fields from `defaults`.
    /// An existing file is overwritten.
    pub fn create(
        store: S,
        path: impl Into<PathBuf>,
        mut info: ManifestInfo,
        defaults: &ManifestDefaults,
    ) -> Result<Self, ManifestError> {
        info.apply_defaults(defaults);

        let mut document = Self::new(store);
        document.bind(path);
        document.set_info(info);
        document.state = DocumentState::Dirty;
        document.save()?;
        Ok(document)
    }

    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    pub fn state(&self) -> DocumentState {
        self.state
    }

    pub fn info(&self) -> &ManifestInfo {
        &self.info
    }

    pub fn version(&self) -> Version {
        self.version
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Point the document at `path`.
    ///
    /// A different path drops the current contents so the next
    /// [`load`](Self::load) re-parses. The same path is a no-op.
    pub fn bind(&mut self, path: impl Into<PathBuf>) {
        let path = path.into();
        if self.path.as_ref() == Some(&path) {
            return;
        }

        debug!("Binding manifest document to {}", path.display());
        self.path = Some(path);
        self.info = ManifestInfo::default();
        self.version = Version::default();
        self.state = DocumentState::Bound;
    }

    /// Drop the file path and contents
    pub fn unbind(&mut self) {
        self.path = None;
        self.info = ManifestInfo::default();
        self.version = Version::default();
        self.state = DocumentState::Unbound;
    }

    /// Read and parse the bound file, replacing the current contents.
    ///
    /// On a parse failure the document is reset to [`DocumentState::Unbound`].
    pub fn load(&mut self) -> Result<(), ManifestError> {
        let path = self.require_path("the manifest can be loaded")?.to_path_buf();
        if !self.store.exists(&path) {
            return Err(ManifestError::NotFound(path));
        }

        let text = self
            .store
            .read_to_string(&path)
            .map_err(|source| ManifestError::Io {
                path: path.clone(),
                source,
            })?;

        match deserialize_manifest(&text) {
            Ok(info) => {
                self.set_info(info);
                self.state = DocumentState::Loaded;
                debug!("Loaded {} version {}", path.display(), self.version);
                Ok(())
            }
            Err(e) => {
                self.unbind();
                Err(e)
            }
        }
    }

    /// Edit the manifest contents. The version string is re-normalized afterwards.
    pub fn update<F>(&mut self, edit: F)
    where
        F: FnOnce(&mut ManifestInfo),
    {
        edit(&mut self.info);
        self.version = normalize_version(&mut self.info.version);
        self.state = DocumentState::Dirty;
    }

    /// Replace the version string; malformed input is normalized
    pub fn set_version(&mut self, version: &str) -> Version {
        self.update(|info| info.version = version.to_string());
        self.version
    }

    /// Increment the patch component and write the manifest.
    ///
    /// Fails with [`ManifestError::MissingFileTarget`] when no file is bound
    /// and [`ManifestError::NotLoaded`] when the bound file was never parsed.
    /// Contents change only after the write succeeds.
    pub fn increment_patch(&mut self) -> Result<Version, ManifestError> {
        let path = self.require_loaded("the version can be incremented")?;

        let next = self.version.bump_patch();
        let mut info = self.info.clone();
        info.version = next.to_string();
        self.write(path, &info)?;

        info!(
            "App version now {} replacing previous version {} in {}",
            info.version,
            self.info.version,
            path.display()
        );
        self.info = info;
        self.version = next;
        self.state = DocumentState::Saved;
        Ok(next)
    }

    /// Serialize the contents and write them to the bound file
    pub fn save(&mut self) -> Result<(), ManifestError> {
        let path = self.require_loaded("a save can be completed")?;
        self.write(path, &self.info)?;

        debug!("Saved {}", path.display());
        self.state = DocumentState::Saved;
        Ok(())
    }

    fn write(&self, path: &Path, info: &ManifestInfo) -> Result<(), ManifestError> {
        let text = serialize_manifest(info)?;
        self.store
            .write(path, &text)
            .map_err(|source| ManifestError::Io {
                path: path.to_path_buf(),
                source,
            })
    }

    fn set_info(&mut self, mut info: ManifestInfo) {
        self.version = normalize_version(&mut info.version);
        self.info = info;
    }

    fn require_path(&self, action: &'static str) -> Result<&Path, ManifestError> {
        self.path
            .as_deref()
            .ok_or(ManifestError::MissingFileTarget { action })
    }

    /// The bound path, provided the document holds parsed or edited contents
    fn require_loaded(&self, action: &'static str) -> Result<&Path, ManifestError> {
        let path = self.require_path(action)?;
        match self.state {
            DocumentState::Unbound | DocumentState::Bound => Err(ManifestError::NotLoaded {
                path: path.to_path_buf(),
                action,
            }),
            DocumentState::Loaded | DocumentState::Dirty | DocumentState::Saved => Ok(path),
        }
    }
}
