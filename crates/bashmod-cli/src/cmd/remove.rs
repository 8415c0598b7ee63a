//! Remove command

use anyhow::{Context as _, Result};
use bashmod_core::Reporter;

use crate::context::Context;

/// Remove installed modules. Unknown ids are reported and skipped.
pub fn remove(ctx: &Context, ids: &[String]) -> Result<()> {
    let mut installer = ctx.installer()?;
    let output = &ctx.output;

    output.section("Removing");

    let mut removed = 0usize;
    for id in ids {
        let existed = installer
            .uninstall(id)
            .with_context(|| format!("Failed to remove '{id}'"))?;
        if existed {
            removed += 1;
        } else {
            output.warning(&format!("'{id}' is not installed"));
        }
    }

    println!();
    output.summary_plain(removed, "removed");
    Ok(())
}
