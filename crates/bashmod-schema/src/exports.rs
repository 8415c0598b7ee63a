use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Shell-level symbols a module defines, partitioned by kind.
///
/// Each collection is a `BTreeSet`, so names are unique and iterate in sorted
/// order. A kind with no symbols is an empty set, never absent.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ExportSet {
    /// Names introduced with `alias NAME=`.
    #[serde(default)]
    pub aliases: BTreeSet<String>,
    /// Names introduced with `NAME() {` or `function NAME() {`.
    #[serde(default)]
    pub functions: BTreeSet<String>,
    /// Names introduced with `export NAME=`.
    #[serde(default)]
    pub variables: BTreeSet<String>,
}

impl ExportSet {
    /// Create an empty export set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Return the names of the given kind.
    pub fn names(&self, kind: ExportKind) -> &BTreeSet<String> {
        match kind {
            ExportKind::Alias => &self.aliases,
            ExportKind::Function => &self.functions,
            ExportKind::Variable => &self.variables,
        }
    }

    /// Add a name under the given kind. Returns `false` if it was already present.
    pub fn insert(&mut self, kind: ExportKind, name: impl Into<String>) -> bool {
        let set = match kind {
            ExportKind::Alias => &mut self.aliases,
            ExportKind::Function => &mut self.functions,
            ExportKind::Variable => &mut self.variables,
        };
        set.insert(name.into())
    }

    /// True when no symbol of any kind is present.
    pub fn is_empty(&self) -> bool {
        self.aliases.is_empty() && self.functions.is_empty() && self.variables.is_empty()
    }
}

/// The kind of an exported shell symbol.
///
/// The declaration order is the sort order used for conflict reports.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExportKind {
    /// A shell alias.
    Alias,
    /// A shell function.
    Function,
    /// An exported environment variable.
    Variable,
}

impl ExportKind {
    /// Every kind, in report order.
    pub const ALL: [ExportKind; 3] = [Self::Alias, Self::Function, Self::Variable];

    /// Lowercase name used in reports and JSON.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Alias => "alias",
            Self::Function => "function",
            Self::Variable => "variable",
        }
    }
}

impl std::fmt::Display for ExportKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
