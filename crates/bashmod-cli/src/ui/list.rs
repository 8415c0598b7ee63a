//! Catalog row formatting shared by `list`, `search` and `status`.

use bashmod_core::catalog::ModuleStatus;
use bashmod_schema::Module;
use crossterm::style::{Color, Stylize};

use super::theme::{Theme, fit};

/// Print a section title with blank lines around it.
pub fn print_list_header(title: &str) {
    let theme = Theme::default();
    println!();
    println!("{}", title.with(theme.colors.header));
    println!();
}

/// Print one catalog entry: status, id, version, source label, description.
pub fn print_list_row(module: &Module, status: ModuleStatus) {
    let theme = Theme::default();
    let (icon, color) = status_icon(&theme, status);

    println!(
        "  {} {} {} {} {}",
        icon.with(color),
        fit(&module.id, theme.layout.id_width).with(theme.colors.module_id),
        fit(&module.version, theme.layout.version_width).with(theme.colors.version),
        fit(&module.source, theme.layout.source_width).with(theme.colors.secondary),
        module.description.as_str().with(theme.colors.secondary)
    );
}

/// Print the closing count line.
pub fn print_list_footer(count: usize, noun: &str) {
    println!();
    println!("{}", format!("{count} {noun}").dark_grey());
    println!();
}

fn status_icon(theme: &Theme, status: ModuleStatus) -> (&'static str, Color) {
    match status {
        ModuleStatus::Available => (" ", theme.colors.secondary),
        ModuleStatus::Installed => (theme.icons.success, theme.colors.success),
        ModuleStatus::UpdateAvailable => (theme.icons.update, theme.colors.warning),
    }
}
