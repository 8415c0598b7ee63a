//! Shared command context.
//!
//! Groups the configuration, resolved sources and fetch capability every
//! command needs, built once in `main` from the config file and CLI flags.

use std::fmt;
use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context as _, Result};
use bashmod_core::catalog::sort_catalog;
use bashmod_core::fetch::{Fetcher, HttpFetcher};
use bashmod_core::installer::Installer;
use bashmod_core::paths::expand_home;
use bashmod_core::registry::Registry;
use bashmod_core::source::RegistrySource;
use bashmod_core::store::InstallationStore;
use bashmod_core::{Config, Reporter};
use bashmod_schema::Module;

use crate::Cli;
use crate::ui::Output;

#[derive(Clone)]
pub struct Context {
    pub sources: Vec<RegistrySource>,
    pub install_dir: PathBuf,
    pub fetcher: Arc<dyn Fetcher>,
    pub output: Output,
}

impl fmt::Debug for Context {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Context")
            .field("sources", &self.sources)
            .field("install_dir", &self.install_dir)
            .finish_non_exhaustive()
    }
}

impl Context {
    /// Load the config file and apply `--registry` / `--install-dir`.
    pub fn from_cli(cli: &Cli) -> Result<Self> {
        let config = Config::load().context("Failed to load configuration")?;
        let fetcher = HttpFetcher::new().context("Failed to initialise HTTP client")?;
        Ok(Self::new(&config, cli, Arc::new(fetcher)))
    }

    pub fn new(config: &Config, cli: &Cli, fetcher: Arc<dyn Fetcher>) -> Self {
        let sources = if cli.registries.is_empty() {
            config.registry_sources()
        } else {
            cli.registries.iter().map(RegistrySource::new).collect()
        };
        let install_dir = cli.install_dir.as_ref().map_or_else(
            || config.install_dir(),
            |dir| expand_home(&dir.to_string_lossy()),
        );

        tracing::debug!(
            sources = sources.len(),
            install_dir = %install_dir.display(),
            "context ready"
        );

        Self {
            sources,
            install_dir,
            fetcher,
            output: Output::new(cli.quiet),
        }
    }

    pub fn open_store(&self) -> Result<InstallationStore> {
        InstallationStore::open(&self.install_dir).with_context(|| {
            format!(
                "Failed to open install directory {}",
                self.install_dir.display()
            )
        })
    }

    /// Fetch every source and return the merged catalog sorted for display.
    ///
    /// Per-source failures are printed as warnings.
    pub async fn load_catalog(&self) -> Result<Vec<Module>> {
        let registry = Registry::new(self.fetcher.clone());
        let aggregate = registry.fetch(&self.sources).await?;

        for warning in &aggregate.warnings {
            self.output.warning(warning);
        }

        let mut modules = aggregate.modules;
        sort_catalog(&mut modules);
        Ok(modules)
    }

    pub fn installer(&self) -> Result<Installer> {
        Ok(Installer::new(
            self.open_store()?,
            self.fetcher.clone(),
            Arc::new(self.output.clone()),
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    #[test]
    fn test_cli_flags_override_config() {
        let config = Config {
            registries: vec!["https://example.com/registry.json".to_string()],
            install_dir: "/from/config".to_string(),
            ..Config::default()
        };

        let cli = Cli::parse_from(["bashmod", "sources"]);
        let fetcher = Arc::new(HttpFetcher::new().unwrap());
        let ctx = Context::new(&config, &cli, fetcher.clone());
        assert_eq!(ctx.sources.len(), 1);
        assert_eq!(ctx.install_dir, PathBuf::from("/from/config"));

        let cli = Cli::parse_from([
            "bashmod",
            "--registry",
            "/srv/mods/registry.json",
            "--install-dir",
            "/from/flag",
            "sources",
        ]);
        let ctx = Context::new(&config, &cli, fetcher);
        assert_eq!(ctx.sources[0].label, "/srv/mods");
        assert_eq!(ctx.install_dir, PathBuf::from("/from/flag"));
    }

    #[test]
    fn test_install_dir_flag_expands_home() {
        let home = expand_home("~");
        if home == PathBuf::from("~") {
            return;
        }
        let cli = Cli::parse_from(["bashmod", "--install-dir", "~/.shell.d", "sources"]);
        let ctx = Context::new(
            &Config::default(),
            &cli,
            Arc::new(HttpFetcher::new().unwrap()),
        );
        assert_eq!(ctx.install_dir, home.join(".shell.d"));
    }
}
