//! Status command: installed modules against the current catalog

use anyhow::Result;
use bashmod_core::Reporter;
use bashmod_core::catalog::installed_exports;
use bashmod_core::conflicts::detect_exports;
use bashmod_schema::{InstalledRecord, Module};
use crossterm::style::Stylize;

use crate::context::Context;
use crate::ui::theme::fit;

/// How an installed module relates to what the registries offer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Health {
    /// A catalog entry matches the installed version.
    UpToDate,
    /// Only other versions are offered.
    Outdated(Vec<String>),
    /// No configured registry offers this id.
    Orphaned,
    /// Recorded as installed, but the script is gone.
    Missing,
}

/// Classify one installed record against the catalog.
pub fn health(record: &InstalledRecord, catalog: &[Module]) -> Health {
    if !record.installed_path.exists() {
        return Health::Missing;
    }
    let offered: Vec<&Module> = catalog.iter().filter(|m| m.id == record.id).collect();
    if offered.is_empty() {
        return Health::Orphaned;
    }
    if offered.iter().any(|m| m.version == record.version) {
        return Health::UpToDate;
    }
    let mut versions: Vec<String> = offered.iter().map(|m| m.version.clone()).collect();
    versions.sort();
    versions.dedup();
    Health::Outdated(versions)
}

/// Check installed modules against the registries.
pub async fn status(ctx: &Context) -> Result<()> {
    let store = ctx.open_store()?;
    let records = store.list();

    let catalog = match ctx.load_catalog().await {
        Ok(modules) => Some(modules),
        Err(e) => {
            ctx.output.warning(&format!("{e:#}"));
            None
        }
    };

    let theme = ctx.output.theme();
    let lw = theme.layout.label_width;

    println!();
    println!("{}", "bashmod status".dark_grey());
    println!();
    println!("{:<lw$}{}", "Version:", env!("CARGO_PKG_VERSION"));
    println!("{:<lw$}{}", "Install dir:", store.install_dir().display());
    println!("{:<lw$}{} configured", "Registries:", ctx.sources.len());
    match &catalog {
        Some(modules) => println!("{:<lw$}{} available", "Catalog:", modules.len()),
        None => println!("{:<lw$}{}", "Catalog:", "unavailable".red()),
    }
    println!("{:<lw$}{} installed", "Modules:", records.len());

    let exports = installed_exports(catalog.as_deref().unwrap_or_default(), &store)?;
    let conflicts = detect_exports(exports.iter().map(|(id, e)| (id.as_str(), e)));
    println!("{:<lw$}{}", "Conflicts:", conflicts.len());

    if records.is_empty() {
        println!();
        return Ok(());
    }

    let catalog = catalog.unwrap_or_default();
    let mut attention = 0usize;
    println!();
    for record in &records {
        let (icon, color, note) = match health(record, &catalog) {
            Health::UpToDate => (theme.icons.success, theme.colors.success, String::new()),
            Health::Outdated(versions) => {
                attention += 1;
                (
                    theme.icons.update,
                    theme.colors.warning,
                    format!("->  {}", versions.join(", ")),
                )
            }
            Health::Orphaned => (
                theme.icons.info,
                theme.colors.secondary,
                "not in any registry".to_string(),
            ),
            Health::Missing => {
                attention += 1;
                (
                    theme.icons.error,
                    theme.colors.error,
                    "script missing, reinstall or remove".to_string(),
                )
            }
        };
        println!(
            "  {} {} {} {}",
            icon.with(color),
            fit(&record.id, theme.layout.id_width).with(theme.colors.module_id),
            fit(&record.version, theme.layout.version_width).with(theme.colors.version),
            note.with(theme.colors.secondary)
        );
    }

    println!();
    if attention == 0 {
        println!("{}", "All installed modules are up to date".dark_grey());
    } else {
        println!(
            "{}",
            format!("{attention} module(s) need attention").dark_grey()
        );
    }
    println!();
    Ok(())
}
