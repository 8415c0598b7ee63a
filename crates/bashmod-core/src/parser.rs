//! Static extraction of shell exports from script text.
//!
//! This is a lexical scan, not a shell parser. Trailing `#` comments are
//! dropped only on lines that contain no quote character, so a `#` inside a
//! quoted string is never mistaken for a comment. The price is that comments
//! on lines with any quote are kept, and may contribute matches.

use std::sync::LazyLock;

use bashmod_schema::{ExportKind, ExportSet};
use regex::Regex;

static ALIAS_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?m)^\s*alias\s+([a-zA-Z0-9_-]+)=").expect("valid regex"));

static FUNCTION_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?m)^\s*(?:function\s+)?([a-zA-Z0-9_-]+)\s*\(\s*\)\s*\{").expect("valid regex")
});

// Shell variable names cannot contain hyphens.
static EXPORT_VAR_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?m)^\s*export\s+([a-zA-Z0-9_]+)=").expect("valid regex"));

/// Extract aliases, functions and exported variables from a shell script.
///
/// Never fails: malformed input yields a partial or empty [`ExportSet`].
pub fn parse(script: &str) -> ExportSet {
    let cleaned = strip_comments(script);

    let mut exports = ExportSet::new();
    for (kind, re) in [
        (ExportKind::Alias, &*ALIAS_RE),
        (ExportKind::Function, &*FUNCTION_RE),
        (ExportKind::Variable, &*EXPORT_VAR_RE),
    ] {
        for caps in re.captures_iter(&cleaned) {
            exports.insert(kind, &caps[1]);
        }
    }
    exports
}

fn strip_comments(script: &str) -> String {
    script
        .split('\n')
        .map(|line| {
            if line.contains('"') || line.contains('\'') {
                line
            } else {
                line.split('#').next().unwrap_or_default()
            }
        })
        .collect::<Vec<_>>()
        .join("\n")
}
