//! Sources command

use anyhow::Result;
use crossterm::style::Stylize;

use crate::context::Context;
use crate::ui::list::print_list_header;
use crate::ui::theme::fit;

/// Show every configured registry source with its label and kind.
pub fn sources(ctx: &Context) -> Result<()> {
    let theme = ctx.output.theme();

    print_list_header("Registry sources");
    for source in &ctx.sources {
        let kind = if source.is_remote() { "remote" } else { "local" };
        println!(
            "  {} {} {}",
            fit(&source.label, theme.layout.source_width).with(theme.colors.module_id),
            fit(kind, 6).with(theme.colors.secondary),
            source.raw.as_str().with(theme.colors.secondary)
        );
    }
    println!();
    println!(
        "{}",
        format!("Install directory: {}", ctx.install_dir.display()).dark_grey()
    );
    println!();

    Ok(())
}
