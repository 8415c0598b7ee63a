//! Categories command

use anyhow::Result;
use bashmod_core::catalog;
use crossterm::style::Stylize;

use crate::context::Context;
use crate::ui::list::{print_list_footer, print_list_header};
use crate::ui::theme::fit;

/// Print each category with the number of catalog entries in it.
pub async fn categories(ctx: &Context) -> Result<()> {
    let modules = ctx.load_catalog().await?;
    let categories = catalog::categories(&modules);

    if categories.is_empty() {
        println!();
        println!("  No categories found.");
        return Ok(());
    }

    let theme = ctx.output.theme();
    print_list_header("Categories");
    for category in &categories {
        let count = modules.iter().filter(|m| &m.category == category).count();
        println!(
            "  {} {}",
            fit(category, theme.layout.id_width).with(theme.colors.module_id),
            count.to_string().with(theme.colors.secondary)
        );
    }
    print_list_footer(categories.len(), "categories");

    Ok(())
}
