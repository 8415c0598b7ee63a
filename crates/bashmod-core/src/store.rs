//! Installed-module state, persisted as a JSON sidecar in the install directory.
//!
//! The sidecar maps module id to [`InstalledRecord`]. Every mutation rewrites
//! the whole document (temp file + rename), so the file on disk always
//! matches the in-memory map. There is no locking: two processes mutating the
//! same install directory can lose updates.

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use bashmod_schema::{ExportSet, InstalledRecord};
use thiserror::Error;

use crate::parser;
use crate::paths::sidecar_path;

#[derive(Error, Debug)]
pub enum StoreError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Installed-state file {} is corrupt: {source}", .path.display())]
    Corrupt {
        path: PathBuf,
        source: serde_json::Error,
    },

    #[error("Failed to serialize installed state: {0}")]
    Serialize(serde_json::Error),
}

/// Source of truth for which modules are installed.
#[derive(Debug)]
pub struct InstallationStore {
    install_dir: PathBuf,
    sidecar: PathBuf,
    records: BTreeMap<String, InstalledRecord>,
}

impl InstallationStore {
    /// Open (creating if needed) the install directory and load its sidecar.
    ///
    /// A relative directory is resolved against the current working directory
    /// once, here, so every recorded path is absolute. A missing sidecar is an
    /// empty store.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Io`] if the directory cannot be created or the
    /// sidecar cannot be read, and [`StoreError::Corrupt`] if it is not a
    /// valid state document.
    pub fn open(install_dir: impl Into<PathBuf>) -> Result<Self, StoreError> {
        let install_dir = std::path::absolute(install_dir.into())?;
        fs::create_dir_all(&install_dir)?;
        let sidecar = sidecar_path(&install_dir);

        let records = if sidecar.exists() {
            let content = fs::read_to_string(&sidecar)?;
            serde_json::from_str(&content).map_err(|source| StoreError::Corrupt {
                path: sidecar.clone(),
                source,
            })?
        } else {
            BTreeMap::new()
        };

        Ok(Self {
            install_dir,
            sidecar,
            records,
        })
    }

    pub fn install_dir(&self) -> &Path {
        &self.install_dir
    }

    pub fn sidecar_path(&self) -> &Path {
        &self.sidecar
    }

    /// All installed records, ordered by id.
    pub fn list(&self) -> Vec<InstalledRecord> {
        self.records.values().cloned().collect()
    }

    pub fn get(&self, id: &str) -> Option<&InstalledRecord> {
        self.records.get(id)
    }

    pub fn is_installed(&self, id: &str) -> bool {
        self.records.contains_key(id)
    }

    pub fn installed_version(&self, id: &str) -> Option<&str> {
        self.records.get(id).map(|r| r.version.as_str())
    }

    /// Insert or overwrite the record for `id` and persist immediately.
    ///
    /// # Errors
    ///
    /// Returns an error if the sidecar cannot be written. The in-memory map
    /// is left unchanged in that case.
    pub fn record(
        &mut self,
        id: &str,
        version: &str,
        path: &Path,
        timestamp: &str,
    ) -> Result<(), StoreError> {
        let record = InstalledRecord {
            id: id.to_string(),
            version: version.to_string(),
            installed_path: path.to_path_buf(),
            installed_at: timestamp.to_string(),
        };

        let mut next = self.records.clone();
        next.insert(id.to_string(), record);
        self.persist(&next)?;
        self.records = next;
        Ok(())
    }

    /// Remove the record for `id`. Returns `true` iff a record existed.
    ///
    /// # Errors
    ///
    /// Returns an error if the sidecar cannot be written.
    pub fn erase(&mut self, id: &str) -> Result<bool, StoreError> {
        if !self.records.contains_key(id) {
            return Ok(false);
        }

        let mut next = self.records.clone();
        next.remove(id);
        self.persist(&next)?;
        self.records = next;
        Ok(true)
    }

    /// Re-derive exports from the scripts actually present on disk.
    ///
    /// Looks only at `*.sh` files directly in the install directory, skipping
    /// dotfiles. Files that cannot be read are skipped. Keys are file stems.
    ///
    /// # Errors
    ///
    /// Returns an error if the install directory cannot be listed.
    pub fn rescan(&self) -> Result<BTreeMap<String, ExportSet>, StoreError> {
        let mut exports = BTreeMap::new();
        if !self.install_dir.exists() {
            return Ok(exports);
        }

        for entry in fs::read_dir(&self.install_dir)? {
            let path = entry?.path();
            if !is_script(&path) {
                continue;
            }
            let Some(stem) = path.file_stem().and_then(|s| s.to_str()) else {
                continue;
            };

            match fs::read_to_string(&path) {
                Ok(content) => {
                    exports.insert(stem.to_string(), parser::parse(&content));
                }
                Err(e) => {
                    tracing::warn!(path = %path.display(), error = %e, "skipping unreadable script");
                }
            }
        }

        Ok(exports)
    }

    fn persist(&self, records: &BTreeMap<String, InstalledRecord>) -> Result<(), StoreError> {
        let content = serde_json::to_string_pretty(records).map_err(StoreError::Serialize)?;

        // Atomic write: write to temp file, then rename
        let temp_path = self.sidecar.with_extension("json.tmp");
        fs::write(&temp_path, content)?;
        fs::rename(&temp_path, &self.sidecar)?;
        Ok(())
    }
}

fn is_script(path: &Path) -> bool {
    let hidden = path
        .file_name()
        .and_then(|n| n.to_str())
        .is_none_or(|n| n.starts_with('.'));
    !hidden && path.is_file() && path.extension().is_some_and(|ext| ext == "sh")
}
