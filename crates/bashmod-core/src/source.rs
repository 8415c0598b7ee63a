//! Registry sources and their human-readable labels.
//!
//! Labels disambiguate modules that share an id but come from different
//! registries. Two distinct sources can still collapse to the same label
//! (e.g. two branches of the same GitHub repository); modules from both then
//! appear under one label.

use std::path::{Path, PathBuf};

use reqwest::Url;

use crate::paths::expand_home;

const REGISTRY_FILE: &str = "registry.json";

/// Hosts whose first two path segments are `<owner>/<repo>`.
const GITHUB_HOSTS: &[&str] = &["raw.githubusercontent.com", "github.com", "www.github.com"];

/// Where a registry document is read from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SourceKind {
    /// Fetched over HTTP(S).
    Remote(String),
    /// Read from the local filesystem (`~` already expanded).
    Local(PathBuf),
}

/// A configured registry source with its derived label.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegistrySource {
    /// The source exactly as configured.
    pub raw: String,
    /// Remote URL or local path.
    pub kind: SourceKind,
    /// Stable display label, see [`label`].
    pub label: String,
}

impl RegistrySource {
    /// Classify a raw source string and derive its label.
    pub fn new(raw: impl Into<String>) -> Self {
        let raw = raw.into();
        let kind = if is_http(&raw) {
            SourceKind::Remote(raw.clone())
        } else {
            SourceKind::Local(expand_home(&raw))
        };
        let label = label(&raw);
        Self { raw, kind, label }
    }

    /// True for HTTP(S) sources.
    pub fn is_remote(&self) -> bool {
        matches!(self.kind, SourceKind::Remote(_))
    }
}

impl std::fmt::Display for RegistrySource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.raw)
    }
}

/// True when `location` starts with an `http://` or `https://` scheme, in any case.
pub(crate) fn is_http(location: &str) -> bool {
    ["http://", "https://"].iter().any(|scheme| {
        location
            .get(..scheme.len())
            .is_some_and(|prefix| prefix.eq_ignore_ascii_case(scheme))
    })
}

/// Derive the display label for a registry source.
///
/// Deterministic and total:
///
/// - local paths: `~` expanded and a trailing `registry.json` removed;
/// - GitHub URLs: `gh:<owner>/<repo>`;
/// - other URLs: `<host><path>` with a trailing `registry.json` removed.
///
/// # Example
///
/// ```
/// use bashmod_core::source::label;
///
/// assert_eq!(
///     label("https://raw.githubusercontent.com/acme/dots/main/registry.json"),
///     "gh:acme/dots"
/// );
/// assert_eq!(label("https://example.com/mods/registry.json"), "example.com/mods");
/// ```
pub fn label(source: &str) -> String {
    if is_http(source) {
        url_label(source)
    } else {
        path_label(source)
    }
}

fn path_label(source: &str) -> String {
    let path = expand_home(source);
    let trimmed: &Path = if path.file_name().is_some_and(|n| n == REGISTRY_FILE) {
        path.parent().unwrap_or_else(|| Path::new(""))
    } else {
        &path
    };

    let text = trimmed.to_string_lossy();
    if text.is_empty() {
        ".".to_string()
    } else {
        text.into_owned()
    }
}

fn url_label(source: &str) -> String {
    let Ok(url) = Url::parse(source) else {
        return source.to_string();
    };
    let Some(host) = url.host_str() else {
        return source.to_string();
    };

    if GITHUB_HOSTS.contains(&host) {
        let mut segments = url.path().split('/').filter(|s| !s.is_empty());
        if let (Some(owner), Some(repo)) = (segments.next(), segments.next()) {
            return format!("gh:{owner}/{repo}");
        }
    }

    let authority = match url.port() {
        Some(port) => format!("{host}:{port}"),
        None => host.to_string(),
    };

    let path = url.path();
    let remaining = path
        .strip_suffix("/registry.json")
        .or_else(|| path.strip_suffix(REGISTRY_FILE))
        .unwrap_or(path)
        .trim_end_matches('/');

    if remaining.is_empty() {
        authority
    } else {
        format!("{authority}{remaining}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_github_raw_url() {
        assert_eq!(
            label("https://raw.githubusercontent.com/acme/dots/main/registry.json"),
            "gh:acme/dots"
        );
    }

    #[test]
    fn test_github_web_url() {
        assert_eq!(
            label("https://github.com/acme/dots/blob/main/registry.json"),
            "gh:acme/dots"
        );
        assert_eq!(label("https://github.com//acme//dots"), "gh:acme/dots");
    }

    #[test]
    fn test_github_host_without_repo_falls_through() {
        assert_eq!(label("https://github.com/acme"), "github.com/acme");
    }

    #[test]
    fn test_generic_host_strips_registry_file() {
        assert_eq!(label("https://example.com/mods/registry.json"), "example.com/mods");
        assert_eq!(label("https://example.com/registry.json"), "example.com");
        assert_eq!(label("https://example.com/mods-registry.json"), "example.com/mods-");
        assert_eq!(label("http://example.com"), "example.com");
        assert_eq!(label("https://example.com/other.json"), "example.com/other.json");
    }

    #[test]
    fn test_port_kept_in_label() {
        assert_eq!(
            label("http://127.0.0.1:8080/registry.json"),
            "127.0.0.1:8080"
        );
    }

    #[test]
    fn test_scheme_is_case_insensitive() {
        let source = RegistrySource::new("HTTPS://Example.com/mods/registry.json");
        assert!(source.is_remote());
        assert_eq!(source.label, "example.com/mods");
        assert!(is_http("Http://x/a.sh"));
        assert!(!is_http("httpfoo/registry.json"));
        assert!(!is_http("h"));
    }

    #[test]
    fn test_local_paths() {
        assert_eq!(label("/srv/mods/registry.json"), "/srv/mods");
        assert_eq!(label("/srv/mods"), "/srv/mods");
        assert_eq!(label("registry.json"), ".");
        assert_eq!(label("/srv/mods/other.json"), "/srv/mods/other.json");
    }

    #[test]
    fn test_local_home_expansion() {
        if let Some(home) = dirs::home_dir() {
            let expected = home.join("mods").to_string_lossy().into_owned();
            assert_eq!(label("~/mods/registry.json"), expected);
        }
    }

    #[test]
    fn test_label_is_deterministic() {
        let src = "https://example.org/a/b/registry.json";
        assert_eq!(label(src), label(src));
        assert_eq!(RegistrySource::new(src).label, label(src));
    }

    #[test]
    fn test_distinct_sources_distinct_labels() {
        assert_ne!(
            label("https://example.com/a/registry.json"),
            label("https://example.com/b/registry.json")
        );
        assert_ne!(
            label("https://raw.githubusercontent.com/acme/dots/main/registry.json"),
            label("https://raw.githubusercontent.com/other/dots/main/registry.json")
        );
    }

    #[test]
    fn test_source_kind() {
        assert!(RegistrySource::new("https://example.com/registry.json").is_remote());
        let local = RegistrySource::new("/tmp/registry.json");
        assert_eq!(local.kind, SourceKind::Local(PathBuf::from("/tmp/registry.json")));
    }
}
