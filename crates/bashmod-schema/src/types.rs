use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::exports::{ExportKind, ExportSet};

/// A catalog entry: one installable shell module as advertised by a registry.
///
/// `id` is only unique within a single source. Installation state is keyed by
/// `id` alone, while the catalog distinguishes entries by
/// `(source, id, version)`; see [`Module::catalog_key`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Module {
    /// Module identifier (e.g. "git-tools").
    pub id: String,
    /// One-line human description.
    pub description: String,
    /// Version string, compared for equality only.
    pub version: String,
    /// Location of the primary script.
    pub url: String,
    /// Free-form grouping (e.g. "git", "prompt").
    pub category: String,
    /// Label of the registry this entry came from.
    pub source: String,
    /// Ids of modules this one expects to be present. Informational only.
    #[serde(default)]
    pub dependencies: Vec<String>,
    /// Symbols the registry declares for this module, if any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub exports: Option<ExportSet>,
    /// Auxiliary files installed alongside the primary script.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub files: Vec<ModuleFile>,
}

impl Module {
    /// Catalog identity rendered as `source|id|version`.
    ///
    /// A pipe is used as the separator because source labels may contain `:`.
    pub fn catalog_key(&self) -> String {
        format!("{}|{}|{}", self.source, self.id, self.version)
    }

    /// Declared exports, or an empty set when the registry declared none.
    pub fn exports_or_empty(&self) -> ExportSet {
        self.exports.clone().unwrap_or_default()
    }
}

/// An auxiliary file of a multi-file module.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ModuleFile {
    /// Path relative to the module's install directory.
    pub path: String,
    /// Where to download the file from.
    pub url: String,
}

/// Two or more modules defining the same symbol of the same kind.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Conflict {
    /// The colliding symbol name.
    pub name: String,
    /// Kind of the colliding symbol.
    #[serde(rename = "type")]
    pub kind: ExportKind,
    /// Owning module ids: sorted, unique, at least two.
    pub modules: Vec<String>,
}

/// Durable proof that a module is present on disk.
///
/// This is the per-module value stored in the install directory's sidecar file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InstalledRecord {
    /// Module identifier.
    pub id: String,
    /// Version that was installed.
    pub version: String,
    /// Absolute path of the primary script.
    pub installed_path: PathBuf,
    /// ISO-8601 install timestamp.
    pub installed_at: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn module(source: &str, id: &str, version: &str) -> Module {
        Module {
            id: id.to_string(),
            description: String::new(),
            version: version.to_string(),
            url: format!("https://example.com/{id}.sh"),
            category: "misc".to_string(),
            source: source.to_string(),
            dependencies: vec![],
            exports: None,
            files: vec![],
        }
    }

    #[test]
    fn catalog_key_keeps_colons_in_source() {
        let m = module("gh:acme/dots", "git-tools", "1.2");
        assert_eq!(m.catalog_key(), "gh:acme/dots|git-tools|1.2");
    }

    #[test]
    fn missing_exports_is_empty_not_null() {
        let m = module("local", "x", "1");
        assert!(m.exports_or_empty().is_empty());
    }

    #[test]
    fn conflict_serializes_kind_as_type() {
        let c = Conflict {
            name: "gs".to_string(),
            kind: ExportKind::Alias,
            modules: vec!["git-extra".to_string(), "git-tools".to_string()],
        };
        let json = serde_json::to_value(&c).unwrap();
        assert_eq!(json["type"], "alias");
        assert_eq!(json["modules"][0], "git-extra");
    }

    #[test]
    fn installed_record_uses_sidecar_field_names() {
        let record = InstalledRecord {
            id: "git-tools".to_string(),
            version: "1.0".to_string(),
            installed_path: PathBuf::from("/home/u/.bashrc.d/git-tools.sh"),
            installed_at: "2024-01-01T00:00:00Z".to_string(),
        };
        let json = serde_json::to_value(&record).unwrap();
        assert_eq!(json["installed_path"], "/home/u/.bashrc.d/git-tools.sh");
        assert_eq!(json["installed_at"], "2024-01-01T00:00:00Z");
    }
}
