//! File access used by manifest documents

use std::fs;
use std::path::Path;

#[cfg(test)]
use mockall::automock;

/// Read/write access to manifest text
#[cfg_attr(test, automock)]
pub trait ManifestStore {
    fn exists(&self, path: &Path) -> bool;

    fn read_to_string(&self, path: &Path) -> std::io::Result<String>;

    /// Replace the contents of `path`, creating the file if needed
    fn write(&self, path: &Path, contents: &str) -> std::io::Result<()>;
}

/// [`ManifestStore`] backed by the local file system
#[derive(Debug, Clone, Copy, Default)]
pub struct FsStore;

impl ManifestStore for FsStore {
    fn exists(&self, path: &Path) -> bool {
        path.is_file()
    }

    fn read_to_string(&self, path: &Path) -> std::io::Result<String> {
        fs::read_to_string(path)
    }

    fn write(&self, path: &Path, contents: &str) -> std::io::Result<()> {
        if let Some(parent) = path.parent()
            && !parent.as_os_str().is_empty()
        {
            fs::create_dir_all(parent)?;
        }
        fs::write(path, contents)
    }
}
