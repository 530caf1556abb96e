// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Directory-backed key-value store for native hosts.
//!
//! Each key maps to `<dir>/<key>.json`. Writes go to a temporary file that
//! is renamed over the old one, so a reader never sees a half-written list.

use super::{KeyValueStore, StorageError};
use crate::config::Config;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone)]
pub struct FileStore {
    dir: PathBuf,
}

impl FileStore {
    /// Use `dir` for storage. The directory is created on first write.
    pub fn new<P: AsRef<Path>>(dir: P) -> Self {
        Self {
            dir: dir.as_ref().to_path_buf(),
        }
    }

    /// Store configured via `WORKOUT_STORE_DIR`, if any.
    pub fn from_config(config: &Config) -> Option<Self> {
        config.store_dir.as_ref().map(Self::new)
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn path_for(&self, key: &str) -> Result<PathBuf, StorageError> {
        let valid = !key.is_empty()
            && key
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_');
        if !valid {
            return Err(StorageError::InvalidKey(key.to_string()));
        }
        Ok(self.dir.join(format!("{key}.json")))
    }
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        let path = self.path_for(key)?;
        match fs::read_to_string(&path) {
            Ok(contents) => Ok(Some(contents)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(StorageError::Io(format!("{}: {}", path.display(), e))),
        }
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        let path = self.path_for(key)?;
        fs::create_dir_all(&self.dir)
            .map_err(|e| StorageError::Io(format!("{}: {}", self.dir.display(), e)))?;

        let tmp = path.with_extension("json.tmp");
        fs::write(&tmp, value)
            .map_err(|e| StorageError::Io(format!("{}: {}", tmp.display(), e)))?;
        fs::rename(&tmp, &path)
            .map_err(|e| StorageError::Io(format!("{}: {}", path.display(), e)))?;

        tracing::debug!(path = %path.display(), bytes = value.len(), "Wrote store entry");
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), StorageError> {
        let path = self.path_for(key)?;
        match fs::remove_file(&path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(StorageError::Io(format!("{}: {}", path.display(), e))),
        }
    }
}
