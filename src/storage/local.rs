use crate::storage::traits::{FileStore, StorageError, StorageResult};
use crate::url::storage_path_for;
use std::fs;
use std::path::PathBuf;
use url::Url;

/// File store backed by a directory on the local filesystem
#[derive(Debug, Clone)]
pub struct LocalFileStore {
    root: PathBuf,
}

impl LocalFileStore {
    /// Creates a store rooted at `root`
    ///
    /// The root itself is created lazily together with the first host directory.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Returns where `link` would be stored, without touching the filesystem
    pub fn path_for(&self, link: &Url) -> StorageResult<PathBuf> {
        let relative = storage_path_for(link)?.relative();
        Ok(self.root.join(relative))
    }
}

impl FileStore for LocalFileStore {
    fn store(&self, link: &Url, bytes: &[u8]) -> StorageResult<PathBuf> {
        let storage_path = storage_path_for(link)?;
        let host_dir = self.root.join(&storage_path.host);

        // Pre-existing directories are fine
        fs::create_dir_all(&host_dir).map_err(|source| StorageError::CreateDir {
            path: host_dir.clone(),
            source,
        })?;

        let target = host_dir.join(&storage_path.file_name);
        fs::write(&target, bytes).map_err(|source| StorageError::Write {
            path: target.clone(),
            source,
        })?;

        Ok(target)
    }
}
