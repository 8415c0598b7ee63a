//! List command

use anyhow::Result;
use bashmod_core::catalog::{ModuleStatus, status};
use bashmod_schema::Module;

use crate::context::Context;
use crate::ui::list::{print_list_footer, print_list_header, print_list_row};

/// List catalog entries, optionally only installed ones or one category.
pub async fn list(ctx: &Context, installed: bool, category: Option<&str>, json: bool) -> Result<()> {
    let store = ctx.open_store()?;
    let catalog = ctx.load_catalog().await?;

    let modules: Vec<&Module> = catalog
        .iter()
        .filter(|m| category.is_none_or(|c| m.category.eq_ignore_ascii_case(c)))
        .filter(|m| !installed || status(m, &store) != ModuleStatus::Available)
        .collect();

    if json {
        println!("{}", serde_json::to_string_pretty(&modules)?);
        return Ok(());
    }

    if modules.is_empty() {
        println!();
        if installed {
            println!("  No modules installed.");
            println!("  Run 'bashmod install <module>' to get started.");
        } else {
            println!("  No modules found.");
        }
        return Ok(());
    }

    print_list_header(if installed {
        "Installed modules"
    } else {
        "Available modules"
    });
    for module in &modules {
        print_list_row(module, status(module, &store));
    }
    print_list_footer(modules.len(), "modules total");

    Ok(())
}
