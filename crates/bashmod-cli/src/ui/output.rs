//! Line-oriented terminal reporter.
//!
//! Progress and results go to stdout; warnings and errors go to stderr so
//! piping `bashmod list` keeps only the catalog.

use bashmod_core::Reporter;
use crossterm::style::Stylize;

use super::theme::{Theme, fit};

/// A cloneable handle commands use for all user-facing messages.
#[derive(Debug, Clone, Default)]
pub struct Output {
    theme: Theme,
    quiet: bool,
}

impl Output {
    pub fn new(quiet: bool) -> Self {
        Self {
            theme: Theme::default(),
            quiet,
        }
    }

    pub fn theme(&self) -> &Theme {
        &self.theme
    }

    /// Prints `count` module(s) followed by `status`.
    pub fn summary_plain(&self, count: usize, status: &str) {
        let msg = format!(
            "{} module{} {}",
            count,
            if count == 1 { "" } else { "s" },
            status
        );
        self.success(&msg);
    }

    fn row(&self, icon: &str, color: crossterm::style::Color, id: &str, tail: &str) {
        let layout = &self.theme.layout;
        println!(
            "  {} {} {}",
            icon.with(color),
            fit(id, layout.id_width).with(self.theme.colors.module_id),
            tail.with(self.theme.colors.secondary)
        );
    }
}

impl Reporter for Output {
    fn section(&self, title: &str) {
        if self.quiet {
            return;
        }
        println!();
        println!("{}", title.with(self.theme.colors.header));
        println!();
    }

    fn installing(&self, id: &str, version: &str) {
        if self.quiet {
            return;
        }
        self.row(self.theme.icons.active, self.theme.colors.active, id, version);
    }

    fn removing(&self, id: &str) {
        if self.quiet {
            return;
        }
        self.row(self.theme.icons.active, self.theme.colors.active, id, "removing");
    }

    fn done(&self, id: &str, version: &str, detail: &str) {
        if self.quiet {
            return;
        }
        self.row(
            self.theme.icons.success,
            self.theme.colors.success,
            id,
            &format!("{} {detail}", fit(version, self.theme.layout.version_width)),
        );
    }

    fn failed(&self, id: &str, reason: &str) {
        eprintln!(
            "  {} {} {}",
            self.theme.icons.error.with(self.theme.colors.error),
            fit(id, self.theme.layout.id_width).with(self.theme.colors.module_id),
            reason.with(self.theme.colors.error)
        );
    }

    fn info(&self, msg: &str) {
        if self.quiet {
            return;
        }
        println!("  {} {}", self.theme.icons.info.blue(), msg);
    }

    fn success(&self, msg: &str) {
        if self.quiet {
            return;
        }
        println!(
            "  {} {}",
            self.theme.icons.success.with(self.theme.colors.success),
            msg
        );
    }

    fn warning(&self, msg: &str) {
        eprintln!(
            "  {} {}",
            self.theme.icons.warning.with(self.theme.colors.warning),
            msg.with(self.theme.colors.warning)
        );
    }
}
