//! Multi-source registry aggregation.
//!
//! Every configured source is fetched and validated independently. A failing
//! source turns into a warning and never aborts its siblings; only when no
//! source at all could be loaded does aggregation fail.

use std::sync::Arc;

use bashmod_schema::{Module, RegistryDocument, SchemaError};
use futures::future::join_all;
use thiserror::Error;

use crate::fetch::{FetchError, Fetcher};
use crate::source::RegistrySource;

#[derive(Error, Debug)]
pub enum RegistryError {
    #[error("{0}")]
    Fetch(#[from] FetchError),

    #[error("{0}")]
    Schema(#[from] SchemaError),

    #[error("Failed to load any registry:\n{}", .warnings.join("\n"))]
    AllSourcesFailed { warnings: Vec<String> },
}

/// The merged catalog plus non-fatal per-source failures.
///
/// Module order is unspecified; sort explicitly before display.
#[derive(Debug, Default)]
pub struct AggregateResult {
    pub modules: Vec<Module>,
    pub warnings: Vec<String>,
}

/// Fetches and merges registry documents through an injected [`Fetcher`].
#[derive(Clone)]
pub struct Registry {
    fetcher: Arc<dyn Fetcher>,
}

impl std::fmt::Debug for Registry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Registry").finish_non_exhaustive()
    }
}

impl Registry {
    pub fn new(fetcher: Arc<dyn Fetcher>) -> Self {
        Self { fetcher }
    }

    /// Load a single source and tag its modules with the source label.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError::Fetch`] when the document cannot be
    /// retrieved and [`RegistryError::Schema`] when it fails validation.
    pub async fn fetch_source(&self, source: &RegistrySource) -> Result<Vec<Module>, RegistryError> {
        let text = self.fetcher.fetch_source(source).await?;
        let document = RegistryDocument::from_json(&text)?;
        let modules = document.into_modules(&source.label);
        tracing::debug!(
            source = %source.raw,
            label = %source.label,
            count = modules.len(),
            "loaded registry"
        );
        Ok(modules)
    }

    /// Load every source concurrently and merge the results.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError::AllSourcesFailed`] when at least one source
    /// was configured and none of them loaded.
    pub async fn fetch(&self, sources: &[RegistrySource]) -> Result<AggregateResult, RegistryError> {
        let results = join_all(sources.iter().map(|s| self.fetch_source(s))).await;

        let mut aggregate = AggregateResult::default();
        let mut loaded = 0usize;
        for (source, result) in sources.iter().zip(results) {
            match result {
                Ok(modules) => {
                    loaded += 1;
                    aggregate.modules.extend(modules);
                }
                Err(e) => {
                    tracing::warn!(source = %source.raw, error = %e, "registry source failed");
                    aggregate
                        .warnings
                        .push(format!("Failed to load {}: {e}", source.raw));
                }
            }
        }

        if loaded == 0 && !aggregate.warnings.is_empty() {
            return Err(RegistryError::AllSourcesFailed {
                warnings: aggregate.warnings,
            });
        }

        Ok(aggregate)
    }
}
