use dirs::home_dir;
use std::path::{Path, PathBuf};

/// Default install directory before `~` expansion.
pub const DEFAULT_INSTALL_DIR: &str = "~/.bashrc.d";

/// File name of the installed-state sidecar inside the install directory.
pub const SIDECAR_FILE: &str = ".bashmod-installed.json";

/// Expand a leading `~` or `~/` to the user's home directory.
///
/// Paths that do not start with `~`, or a home directory that cannot be
/// resolved, leave the input unchanged.
pub fn expand_home(path: &str) -> PathBuf {
    if path == "~" {
        if let Some(home) = home_dir() {
            return home;
        }
    } else if let Some(rest) = path.strip_prefix("~/") {
        if let Some(home) = home_dir() {
            return home.join(rest);
        }
    }
    PathBuf::from(path)
}

/// Returns the configuration directory (`~/.config/bashmod`), or None if the
/// user's home cannot be resolved.
pub fn try_config_dir() -> Option<PathBuf> {
    home_dir().map(|h| h.join(".config").join("bashmod"))
}

/// Config file path: `$BASHMOD_CONFIG`, else `~/.config/bashmod/config.toml`.
pub fn config_path() -> Option<PathBuf> {
    if let Ok(val) = std::env::var("BASHMOD_CONFIG") {
        return Some(PathBuf::from(val));
    }
    try_config_dir().map(|d| d.join("config.toml"))
}

/// Sidecar path for an install directory.
pub fn sidecar_path(install_dir: &Path) -> PathBuf {
    install_dir.join(SIDECAR_FILE)
}

/// Primary script path for a module id.
pub fn script_path(install_dir: &Path, id: &str) -> PathBuf {
    install_dir.join(format!("{id}.sh"))
}

/// Directory holding a module's auxiliary files.
pub fn aux_dir(install_dir: &Path, id: &str) -> PathBuf {
    install_dir.join(id)
}
