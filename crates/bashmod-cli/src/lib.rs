//! bashmod - shell module manager
#![allow(missing_docs)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::doc_markdown)]
//!
//! Installs user-contributed shell snippets from one or more registries into
//! `~/.bashrc.d` and reports aliases, functions and variables that collide
//! between installed modules.
//!
//! # Directory Layout
//!
//! ```text
//! ~/.bashrc.d/
//! ├── git-tools.sh              # Primary script per module
//! ├── git-tools/                # Auxiliary files, if the module has any
//! └── .bashmod-installed.json   # Installed-state sidecar
//! ```

pub mod cmd;
pub mod context;
pub mod ui;

pub use bashmod_core::USER_AGENT;

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Split `id@version` into its parts.
///
/// # Example
///
/// ```
/// use bashmod_cli::split_spec;
///
/// assert_eq!(split_spec("git-tools@1.2"), ("git-tools", Some("1.2")));
/// assert_eq!(split_spec("prompt"), ("prompt", None));
/// assert_eq!(split_spec("prompt@"), ("prompt", None));
/// ```
pub fn split_spec(spec: &str) -> (&str, Option<&str>) {
    match spec.split_once('@') {
        Some((id, version)) if !version.is_empty() => (id, Some(version)),
        Some((id, _)) => (id, None),
        None => (spec, None),
    }
}

#[derive(Debug, Parser)]
#[command(name = "bashmod")]
#[command(author, version, about = "bashmod - shell configuration modules")]
pub struct Cli {
    /// Registry URL or path, replaces the configured sources (repeatable)
    #[arg(long = "registry", short = 'r', global = true, value_name = "URL|PATH")]
    pub registries: Vec<String>,

    /// Install directory (default: ~/.bashrc.d)
    #[arg(long, global = true, env = "BASHMOD_INSTALL_DIR")]
    pub install_dir: Option<PathBuf>,

    /// Suppress non-essential output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// List available modules
    List {
        /// Only show installed modules
        #[arg(long)]
        installed: bool,
        /// Only show modules in this category
        #[arg(long, short)]
        category: Option<String>,
        /// Print the catalog as JSON
        #[arg(long)]
        json: bool,
    },
    /// Search modules by id, description or category
    Search {
        /// Search query
        query: String,
    },
    /// Show module details and exports
    Info {
        /// Module id
        id: String,
        /// Registry label to pick from when several offer the module
        #[arg(long, short)]
        source: Option<String>,
    },
    /// Install modules
    Install {
        /// Module id(s): id, id@1.0, or a source|id|version catalog key
        #[arg(required = true)]
        modules: Vec<String>,
        /// Registry label to install from
        #[arg(long, short)]
        source: Option<String>,
    },
    /// Remove installed modules
    Remove {
        /// Module id(s)
        #[arg(required = true)]
        modules: Vec<String>,
    },
    /// Report symbols defined by more than one installed module
    Conflicts {
        /// Use the exports registries declare instead of scanning installed scripts
        #[arg(long)]
        declared: bool,
        /// Print conflicts as JSON
        #[arg(long)]
        json: bool,
    },
    /// Check installed modules against the registries
    Status,
    /// Show configured registry sources and their labels
    Sources,
    /// List module categories
    Categories,
    /// Generate shell completions
    Completions {
        /// Shell to generate completions for
        shell: clap_complete::Shell,
    },
}
