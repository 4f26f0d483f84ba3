//! # File Store
//!
//! `RegistryStore` persisted to a single bincode file. Saves write a sibling
//! temporary file and rename it over the target, so a crash mid-save leaves
//! the previous snapshot intact.

use crate::domain::snapshot::RegistrySnapshot;
use crate::ports::outbound::RegistryStore;
use shared_types::StorageError;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// File-backed implementation of `RegistryStore`.
#[derive(Debug, Clone)]
pub struct FileRegistryStore {
    path: PathBuf,
}

impl FileRegistryStore {
    /// Creates a store at `path`. Nothing is read or written until used.
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    /// Target file path.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn temp_path(&self) -> PathBuf {
        let mut name = self.path.file_name().unwrap_or_default().to_os_string();
        name.push(".tmp");
        self.path.with_file_name(name)
    }
}

impl RegistryStore for FileRegistryStore {
    fn load(&self) -> Result<Option<RegistrySnapshot>, StorageError> {
        if !self.path.exists() {
            info!(path = %self.path.display(), "No registry state file, starting empty");
            return Ok(None);
        }
        let bytes = fs::read(&self.path)?;
        let snapshot: RegistrySnapshot = bincode::deserialize(&bytes)
            .map_err(|e| StorageError::Serialization(e.to_string()))?;
        info!(
            path = %self.path.display(),
            bytes = bytes.len(),
            properties = snapshot.properties.len(),
            "Loaded registry state"
        );
        Ok(Some(snapshot))
    }

    fn save(&self, snapshot: &RegistrySnapshot) -> Result<(), StorageError> {
        let bytes =
            bincode::serialize(snapshot).map_err(|e| StorageError::Serialization(e.to_string()))?;

        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }
        let temp = self.temp_path();
        {
            let mut file = fs::File::create(&temp)?;
            file.write_all(&bytes)?;
            file.sync_all()?;
        }
        fs::rename(&temp, &self.path)?;

        debug!(path = %self.path.display(), bytes = bytes.len(), "Flushed registry state");
        Ok(())
    }
}
