//! Cross-module conflict detection over exported shell symbols.

use std::collections::{BTreeMap, BTreeSet};

use bashmod_schema::{Conflict, ExportKind, ExportSet, Module};

/// Sentinel printed when there is nothing to report.
pub const NO_CONFLICTS: &str = "No conflicts detected.";

/// Detect symbols defined by two or more distinct modules.
///
/// Modules without declared exports contribute nothing. The result is sorted
/// by `(kind, name)` and each conflict lists its module ids sorted, so the
/// output does not depend on input order.
pub fn detect(modules: &[Module]) -> Vec<Conflict> {
    detect_exports(
        modules
            .iter()
            .filter_map(|m| m.exports.as_ref().map(|e| (m.id.as_str(), e))),
    )
}

/// Detect conflicts over arbitrary `(module id, exports)` pairs.
///
/// Used for on-disk rescans, where there is no catalog [`Module`] to hang the
/// exports on. The same id appearing twice is merged, never a conflict with
/// itself.
pub fn detect_exports<'a, I>(entries: I) -> Vec<Conflict>
where
    I: IntoIterator<Item = (&'a str, &'a ExportSet)>,
{
    let mut owners: BTreeMap<(ExportKind, &'a str), BTreeSet<&'a str>> = BTreeMap::new();

    for (id, exports) in entries {
        for kind in ExportKind::ALL {
            for name in exports.names(kind) {
                owners
                    .entry((kind, name.as_str()))
                    .or_default()
                    .insert(id);
            }
        }
    }

    // BTreeMap iteration already yields (kind, name) order.
    owners
        .into_iter()
        .filter(|(_, ids)| ids.len() > 1)
        .map(|((kind, name), ids)| Conflict {
            name: name.to_string(),
            kind,
            modules: ids.into_iter().map(str::to_string).collect(),
        })
        .collect()
}

/// Render conflicts as a human-readable report.
pub fn format_conflicts(conflicts: &[Conflict]) -> String {
    if conflicts.is_empty() {
        return NO_CONFLICTS.to_string();
    }

    let mut lines = vec![format!("Found {} conflict(s):\n", conflicts.len())];
    for conflict in conflicts {
        lines.push(format!(
            "  • {} '{}' in: {}",
            conflict.kind,
            conflict.name,
            conflict.modules.join(", ")
        ));
    }
    lines.join("\n")
}
