//! Install and uninstall modules as plain file operations.
//!
//! A module's primary script lands at `<install_dir>/<id>.sh`; auxiliary
//! files go under `<install_dir>/<id>/`. New content is staged beside the
//! live files and renamed into place, and state is recorded only after every
//! file has landed.

use std::path::{Component, Path};
use std::sync::Arc;

use bashmod_schema::{InstalledRecord, Module, ModuleFile};
use futures::future::try_join_all;
use thiserror::Error;

use crate::Reporter;
use crate::fetch::{FetchError, Fetcher};
use crate::paths::{aux_dir, script_path};
use crate::store::{InstallationStore, StoreError};

#[derive(Error, Debug)]
pub enum InstallError {
    #[error("Download failed: {0}")]
    Fetch(#[from] FetchError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("{0}")]
    Store(#[from] StoreError),

    #[error("Refusing to write outside the install directory: {0}")]
    UnsafePath(String),
}

/// Applies install/uninstall actions to the filesystem and the store.
pub struct Installer {
    store: InstallationStore,
    fetcher: Arc<dyn Fetcher>,
    reporter: Arc<dyn Reporter>,
}

impl std::fmt::Debug for Installer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Installer")
            .field("store", &self.store)
            .finish_non_exhaustive()
    }
}

impl Installer {
    pub fn new(
        store: InstallationStore,
        fetcher: Arc<dyn Fetcher>,
        reporter: Arc<dyn Reporter>,
    ) -> Self {
        Self {
            store,
            fetcher,
            reporter,
        }
    }

    pub fn store(&self) -> &InstallationStore {
        &self.store
    }

    /// Download and install `module`, overwriting any previous install of
    /// the same id.
    ///
    /// # Errors
    ///
    /// Fails on unsafe ids or file paths, download errors, and write errors.
    /// No state is recorded unless every file was written.
    pub async fn install(&mut self, module: &Module) -> Result<InstalledRecord, InstallError> {
        self.reporter.installing(&module.id, &module.version);
        match self.install_inner(module).await {
            Ok(record) => {
                tracing::info!(id = %module.id, version = %module.version, source = %module.source, "installed");
                self.reporter.done(&module.id, &module.version, "installed");
                Ok(record)
            }
            Err(e) => {
                self.reporter.failed(&module.id, &e.to_string());
                Err(e)
            }
        }
    }

    async fn install_inner(&mut self, module: &Module) -> Result<InstalledRecord, InstallError> {
        check_id(&module.id)?;
        for file in &module.files {
            check_relative(&file.path)?;
        }

        let fetcher = &self.fetcher;
        let (script, aux_contents) = futures::try_join!(
            fetcher.fetch_content(&module.url),
            try_join_all(module.files.iter().map(|f| fetcher.fetch_content(&f.url))),
        )?;

        let install_dir = self.store.install_dir().to_path_buf();
        let target = script_path(&install_dir, &module.id);
        let aux_root = aux_dir(&install_dir, &module.id);
        let staged_script = install_dir.join(format!(".{}.sh.tmp", module.id));
        let staging = install_dir.join(format!(".{}.staging", module.id));

        if let Err(e) = stage(&staged_script, &staging, &script, &module.files, aux_contents).await
        {
            discard(&staged_script, &staging).await;
            return Err(e);
        }

        if aux_root.exists() {
            tokio::fs::remove_dir_all(&aux_root).await?;
        }
        if !module.files.is_empty() {
            tokio::fs::rename(&staging, &aux_root).await?;
        }
        tokio::fs::rename(&staged_script, &target).await?;

        let installed_at = chrono::Utc::now().to_rfc3339_opts(chrono::SecondsFormat::Secs, true);
        self.store
            .record(&module.id, &module.version, &target, &installed_at)?;

        Ok(InstalledRecord {
            id: module.id.clone(),
            version: module.version.clone(),
            installed_path: target,
            installed_at,
        })
    }

    /// Remove an installed module. Returns `false` if `id` is not installed.
    ///
    /// Files that were already deleted by hand are tolerated; the record is
    /// always erased.
    ///
    /// # Errors
    ///
    /// Returns an error if an existing file cannot be removed or the store
    /// cannot be written.
    pub fn uninstall(&mut self, id: &str) -> Result<bool, InstallError> {
        let Some(record) = self.store.get(id).cloned() else {
            return Ok(false);
        };
        self.reporter.removing(id);

        let script = if check_id(id).is_ok() {
            let aux_root = aux_dir(self.store.install_dir(), id);
            if aux_root.is_dir() {
                std::fs::remove_dir_all(&aux_root)?;
            }
            script_path(self.store.install_dir(), id)
        } else {
            record.installed_path.clone()
        };
        if script.exists() {
            std::fs::remove_file(&script)?;
        } else if record.installed_path.is_absolute() && record.installed_path.is_file() {
            std::fs::remove_file(&record.installed_path)?;
        }

        self.store.erase(id)?;
        tracing::info!(id, version = %record.version, "uninstalled");
        self.reporter.done(id, &record.version, "removed");
        Ok(true)
    }
}

fn check_id(id: &str) -> Result<(), InstallError> {
    if id.is_empty() || id.starts_with('.') || id.contains(['/', '\\']) {
        return Err(InstallError::UnsafePath(id.to_string()));
    }
    Ok(())
}

/// Write the new script and auxiliary files next to the live ones, under
/// dotted names the rescan skips.
async fn stage(
    staged_script: &Path,
    staging: &Path,
    script: &str,
    files: &[ModuleFile],
    contents: Vec<String>,
) -> Result<(), InstallError> {
    discard(staged_script, staging).await;

    tokio::fs::write(staged_script, script).await?;
    set_script_permissions(staged_script).await?;

    for (file, content) in files.iter().zip(contents) {
        let dest = staging.join(&file.path);
        if let Some(parent) = dest.parent() {
            tokio::fs::create_dir_all(parent).await?;
        }
        tokio::fs::write(&dest, content).await?;
    }
    Ok(())
}

async fn discard(staged_script: &Path, staging: &Path) {
    let _ = tokio::fs::remove_file(staged_script).await;
    let _ = tokio::fs::remove_dir_all(staging).await;
}

fn check_relative(path: &str) -> Result<(), InstallError> {
    let p = Path::new(path);
    let safe = p.components().any(|c| matches!(c, Component::Normal(_)))
        && p.components()
            .all(|c| matches!(c, Component::Normal(_) | Component::CurDir))
        && matches!(p.components().next_back(), Some(Component::Normal(_)));
    if safe {
        Ok(())
    } else {
        Err(InstallError::UnsafePath(path.to_string()))
    }
}

#[cfg(unix)]
async fn set_script_permissions(path: &Path) -> std::io::Result<()> {
    use std::os::unix::fs::PermissionsExt;
    tokio::fs::set_permissions(path, std::fs::Permissions::from_mode(0o644)).await
}

#[cfg(not(unix))]
async fn set_script_permissions(_path: &Path) -> std::io::Result<()> {
    Ok(())
}
