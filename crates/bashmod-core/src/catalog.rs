//! Queries over the merged catalog and its relation to installed state.

use std::collections::{BTreeMap, BTreeSet};

use bashmod_schema::{ExportSet, Module};

use crate::store::InstallationStore;

/// Installation status of a catalog entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModuleStatus {
    /// Not installed.
    Available,
    /// Installed at exactly this entry's version.
    Installed,
    /// Installed, but at a different version than this entry.
    UpdateAvailable,
}

/// Status of `module` relative to the store. Versions compare for equality only.
pub fn status(module: &Module, store: &InstallationStore) -> ModuleStatus {
    match store.installed_version(&module.id) {
        None => ModuleStatus::Available,
        Some(v) if v == module.version => ModuleStatus::Installed,
        Some(_) => ModuleStatus::UpdateAvailable,
    }
}

/// Sort for display by `(id, version, source)`.
pub fn sort_catalog(modules: &mut [Module]) {
    modules.sort_by(|a, b| {
        (&a.id, &a.version, &a.source).cmp(&(&b.id, &b.version, &b.source))
    });
}

/// Case-insensitive substring match on id, description or category.
pub fn search<'a>(modules: &'a [Module], query: &str) -> Vec<&'a Module> {
    let q = query.to_lowercase();
    modules
        .iter()
        .filter(|m| {
            m.id.to_lowercase().contains(&q)
                || m.description.to_lowercase().contains(&q)
                || m.category.to_lowercase().contains(&q)
        })
        .collect()
}

/// Sorted, unique categories.
pub fn categories(modules: &[Module]) -> Vec<String> {
    modules
        .iter()
        .map(|m| m.category.clone())
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}

/// Find the entry with catalog identity `(source, id, version)`.
pub fn find_by_key<'a>(
    modules: &'a [Module],
    source: &str,
    id: &str,
    version: &str,
) -> Option<&'a Module> {
    modules
        .iter()
        .find(|m| m.source == source && m.id == id && m.version == version)
}

/// Why [`select`] could not pick exactly one entry.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SelectError {
    #[error("Module '{0}' not found in any registry")]
    NotFound(String),

    #[error("Module '{id}' is offered by several registries; pick one with --source: {}", .candidates.join(", "))]
    Ambiguous { id: String, candidates: Vec<String> },
}

/// Narrow the catalog to one entry for `id`, optionally filtered by source
/// label and version.
///
/// # Errors
///
/// [`SelectError::NotFound`] if nothing matches, [`SelectError::Ambiguous`]
/// (listing catalog keys) if more than one entry does.
pub fn select<'a>(
    modules: &'a [Module],
    id: &str,
    source: Option<&str>,
    version: Option<&str>,
) -> Result<&'a Module, SelectError> {
    let matches: Vec<&Module> = modules
        .iter()
        .filter(|m| m.id == id)
        .filter(|m| source.is_none_or(|s| m.source == s))
        .filter(|m| version.is_none_or(|v| m.version == v))
        .collect();

    match matches.as_slice() {
        [] => Err(SelectError::NotFound(id.to_string())),
        [one] => Ok(one),
        many => {
            let mut candidates: Vec<String> = many.iter().map(|m| m.catalog_key()).collect();
            candidates.sort();
            Err(SelectError::Ambiguous {
                id: id.to_string(),
                candidates,
            })
        }
    }
}

/// Installed catalog entries, one per installed id.
///
/// When an id is offered by several sources, the entry whose version matches
/// the installed version wins; otherwise the first in `(id, version, source)`
/// order.
pub fn installed_modules(modules: &[Module], store: &InstallationStore) -> Vec<Module> {
    let mut sorted: Vec<Module> = modules
        .iter()
        .filter(|m| store.is_installed(&m.id))
        .cloned()
        .collect();
    sort_catalog(&mut sorted);

    let mut picked: BTreeMap<String, Module> = BTreeMap::new();
    for m in sorted {
        let replace = match picked.get(&m.id) {
            None => true,
            Some(existing) => status(&m, store) == ModuleStatus::Installed
                && status(existing, store) != ModuleStatus::Installed,
        };
        if replace {
            picked.insert(m.id.clone(), m);
        }
    }
    picked.into_values().collect()
}

/// Exports of every installed module, for conflict checks.
///
/// On-disk content wins: each installed id with a script in the install
/// directory uses the rescanned exports. Installed ids whose script is gone
/// fall back to the exports their catalog entry declares.
///
/// # Errors
///
/// Returns an error if the install directory cannot be listed.
pub fn installed_exports(
    modules: &[Module],
    store: &InstallationStore,
) -> Result<BTreeMap<String, ExportSet>, crate::store::StoreError> {
    let mut scanned = store.rescan()?;
    let mut exports = BTreeMap::new();

    for record in store.list() {
        if let Some(set) = scanned.remove(&record.id) {
            exports.insert(record.id, set);
        }
    }
    for m in installed_modules(modules, store) {
        if exports.contains_key(&m.id) {
            continue;
        }
        if let Some(declared) = m.exports {
            exports.insert(m.id, declared);
        }
    }
    Ok(exports)
}

/// Exports of installed modules as declared by the registries only.
pub fn declared_exports(
    modules: &[Module],
    store: &InstallationStore,
) -> BTreeMap<String, ExportSet> {
    installed_modules(modules, store)
        .into_iter()
        .filter_map(|m| m.exports.map(|e| (m.id, e)))
        .collect()
}
