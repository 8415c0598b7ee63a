//! Terminal output
//!
//! - [`theme`] - Colors, icons, and column widths
//! - [`output`] - [`Reporter`](bashmod_core::Reporter) implementation used by commands
//! - [`list`] - Catalog row formatting

pub mod list;
pub mod output;
pub mod theme;

pub use output::Output;
pub use theme::Theme;
