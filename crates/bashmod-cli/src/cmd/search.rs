//! Search command

use anyhow::Result;
use bashmod_core::catalog::{self, status};

use crate::context::Context;
use crate::ui::list::{print_list_footer, print_list_row};

/// Search the merged catalog by id, description or category.
pub async fn search(ctx: &Context, query: &str) -> Result<()> {
    use crossterm::style::Stylize;

    let start = std::time::Instant::now();
    let store = ctx.open_store()?;
    let catalog = ctx.load_catalog().await?;
    let results = catalog::search(&catalog, query);

    let theme = ctx.output.theme();

    if results.is_empty() {
        println!();
        println!(
            "  {} No modules found matching '{}'",
            theme.icons.info.blue(),
            query.white()
        );
        println!();
        return Ok(());
    }

    println!();
    for module in &results {
        print_list_row(module, status(module, &store));
    }

    let elapsed = start.elapsed();
    print_list_footer(
        results.len(),
        &format!("matches, elapsed {:.2}s", elapsed.as_secs_f64()),
    );

    Ok(())
}
