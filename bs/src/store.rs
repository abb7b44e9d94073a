//! Core BlobStore implementation

use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use fs2::FileExt;
use tracing::{debug, info};

use crate::BLOB_EXTENSION;
use crate::error::StoreError;

const LOCK_FILE: &str = ".lock";

/// Check that a key is safe to use as a file stem
pub fn validate_key(key: &str) -> Result<(), StoreError> {
    let valid = !key.is_empty()
        && !key.starts_with('.')
        && key
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '_' | '-' | '.'));

    if valid {
        Ok(())
    } else {
        debug!(%key, "validate_key: rejected");
        Err(StoreError::InvalidKey(key.to_string()))
    }
}

/// Directory-backed key/value store for text blobs
#[derive(Debug, Clone)]
pub struct BlobStore {
    base_path: PathBuf,
}

impl BlobStore {
    /// Open or create a blob store at the given path
    pub fn open(path: impl AsRef<Path>) -> Result<Self, StoreError> {
        let base_path = path.as_ref().to_path_buf();
        fs::create_dir_all(&base_path).map_err(|e| StoreError::io(&base_path, e))?;
        debug!(?base_path, "Opened blob store");
        Ok(Self { base_path })
    }

    /// Directory holding the blobs
    pub fn path(&self) -> &Path {
        &self.base_path
    }

    /// File path a key is stored at
    pub fn blob_path(&self, key: &str) -> Result<PathBuf, StoreError> {
        validate_key(key)?;
        Ok(self.base_path.join(format!("{}.{}", key, BLOB_EXTENSION)))
    }

    /// Read the value stored under `key`, if any
    pub fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        let path = self.blob_path(key)?;
        match fs::read_to_string(&path) {
            Ok(content) => {
                debug!(%key, bytes = content.len(), "get: hit");
                Ok(Some(content))
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                debug!(%key, "get: miss");
                Ok(None)
            }
            Err(e) => Err(StoreError::io(path, e)),
        }
    }

    /// Replace the value stored under `key`
    ///
    /// The value is written to a temp file and renamed into place while the
    /// store lock is held, so readers never observe a partial write.
    pub fn put(&self, key: &str, value: &str) -> Result<(), StoreError> {
        let path = self.blob_path(key)?;
        let _lock = self.lock()?;

        let tmp_path = path.with_extension(format!("{}.tmp", BLOB_EXTENSION));
        let mut tmp = fs::File::create(&tmp_path).map_err(|e| StoreError::io(&tmp_path, e))?;
        tmp.write_all(value.as_bytes())
            .and_then(|_| tmp.sync_all())
            .map_err(|e| StoreError::io(&tmp_path, e))?;
        fs::rename(&tmp_path, &path).map_err(|e| StoreError::io(&path, e))?;

        debug!(%key, bytes = value.len(), "put: stored");
        Ok(())
    }

    /// Remove `key`, returning whether it existed
    pub fn remove(&self, key: &str) -> Result<bool, StoreError> {
        let path = self.blob_path(key)?;
        let _lock = self.lock()?;

        match fs::remove_file(&path) {
            Ok(()) => {
                info!(%key, "Removed blob");
                Ok(true)
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(false),
            Err(e) => Err(StoreError::io(path, e)),
        }
    }

    /// List stored keys in sorted order
    pub fn keys(&self) -> Result<Vec<String>, StoreError> {
        let entries = fs::read_dir(&self.base_path).map_err(|e| StoreError::io(&self.base_path, e))?;

        let mut keys = Vec::new();
        for entry in entries {
            let entry = entry.map_err(|e| StoreError::io(&self.base_path, e))?;
            let path = entry.path();
            if path.extension().map(|e| e == BLOB_EXTENSION).unwrap_or(false)
                && let Some(stem) = path.file_stem().and_then(|s| s.to_str())
            {
                keys.push(stem.to_string());
            }
        }

        keys.sort();
        Ok(keys)
    }

    /// Take the store-wide write lock; released when the file is dropped
    fn lock(&self) -> Result<fs::File, StoreError> {
        let lock_path = self.base_path.join(LOCK_FILE);
        let file = fs::OpenOptions::new()
            .create(true)
            .truncate(false)
            .write(true)
            .open(&lock_path)
            .map_err(|e| StoreError::io(&lock_path, e))?;
        FileExt::lock_exclusive(&file).map_err(|e| StoreError::io(&lock_path, e))?;
        Ok(file)
    }
}
