//! Info command

use anyhow::{Result, bail};
use bashmod_core::catalog::{ModuleStatus, status};
use bashmod_schema::{ExportKind, Module};
use crossterm::style::Stylize;

use crate::context::Context;

/// Show every catalog entry for `id` (narrowed by `source` if given),
/// including declared exports and local install state.
pub async fn info(ctx: &Context, id: &str, source: Option<&str>) -> Result<()> {
    let store = ctx.open_store()?;
    let catalog = ctx.load_catalog().await?;

    let entries: Vec<&Module> = catalog
        .iter()
        .filter(|m| m.id == id)
        .filter(|m| source.is_none_or(|s| m.source == s))
        .collect();

    let record = store.get(id);
    if entries.is_empty() && record.is_none() {
        bail!("Module '{id}' not found");
    }

    let lw = ctx.output.theme().layout.label_width;

    for module in &entries {
        println!();
        println!(
            "  {} {}",
            module.id.as_str().white().bold(),
            module.version.as_str().dark_grey()
        );
        if !module.description.is_empty() {
            println!("  {}", module.description);
        }
        println!();
        println!("  {:<lw$}{}", "source", module.source);
        println!("  {:<lw$}{}", "category", module.category);
        println!("  {:<lw$}{}", "url", module.url);
        if !module.dependencies.is_empty() {
            println!("  {:<lw$}{}", "requires", module.dependencies.join(", "));
        }
        for file in &module.files {
            println!("  {:<lw$}{} <- {}", "file", file.path, file.url);
        }

        let exports = module.exports_or_empty();
        if exports.is_empty() {
            println!("  {:<lw$}{}", "exports", "none declared".dark_grey());
        }
        for kind in ExportKind::ALL {
            let names = exports.names(kind);
            if names.is_empty() {
                continue;
            }
            let label = match kind {
                ExportKind::Alias => "aliases",
                ExportKind::Function => "functions",
                ExportKind::Variable => "variables",
            };
            let joined: Vec<&str> = names.iter().map(String::as_str).collect();
            println!("  {:<lw$}{}", label, joined.join(", "));
        }

        match status(module, &store) {
            ModuleStatus::Available => {}
            ModuleStatus::Installed => println!("  {:<lw$}{}", "status", "installed".green()),
            ModuleStatus::UpdateAvailable => println!(
                "  {:<lw$}{}",
                "status",
                format!(
                    "installed {}, registry has {}",
                    store.installed_version(id).unwrap_or("?"),
                    module.version
                )
                .yellow()
            ),
        }
    }

    if let Some(record) = record {
        if entries.is_empty() {
            println!();
            println!(
                "  {} {}",
                record.id.as_str().white().bold(),
                record.version.as_str().dark_grey()
            );
            println!("  {}", "not offered by any configured registry".dark_grey());
            println!();
        }
        println!("  {:<lw$}{}", "path", record.installed_path.display());
        println!("  {:<lw$}{}", "installed", format_timestamp(&record.installed_at));
    }
    println!();

    Ok(())
}

/// Render an RFC 3339 timestamp as a local date, or pass it through.
fn format_timestamp(raw: &str) -> String {
    chrono::DateTime::parse_from_rfc3339(raw).map_or_else(
        |_| raw.to_string(),
        |dt| {
            dt.with_timezone(&chrono::Local)
                .format("%Y-%m-%d %H:%M")
                .to_string()
        },
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_timestamp_passes_through_unparseable() {
        assert_eq!(format_timestamp("2024-01-01T00:00:00"), "2024-01-01T00:00:00");
        assert_eq!(format_timestamp(""), "");
    }

    #[test]
    fn test_format_timestamp_renders_rfc3339() {
        let rendered = format_timestamp("2024-05-01T10:00:00Z");
        assert!(rendered.starts_with("2024-05-0"), "{rendered}");
        assert_eq!(rendered.len(), "2024-05-01 10:00".len());
    }
}
