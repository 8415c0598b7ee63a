//! Conflicts command

use anyhow::Result;
use bashmod_core::Reporter;
use bashmod_core::catalog::{declared_exports, installed_exports};
use bashmod_core::conflicts::{detect_exports, format_conflicts};

use crate::context::Context;

/// Report symbols defined by more than one installed module.
///
/// By default installed scripts are rescanned; `declared` uses registry
/// metadata instead. A registry outage only matters for the declared path
/// and for installed modules whose script has gone missing.
pub async fn conflicts(ctx: &Context, declared: bool, json: bool) -> Result<()> {
    let store = ctx.open_store()?;

    let catalog = if declared {
        ctx.load_catalog().await?
    } else {
        match ctx.load_catalog().await {
            Ok(modules) => modules,
            Err(e) => {
                ctx.output.warning(&format!("{e:#}"));
                Vec::new()
            }
        }
    };

    let exports = if declared {
        declared_exports(&catalog, &store)
    } else {
        installed_exports(&catalog, &store)?
    };
    let conflicts = detect_exports(exports.iter().map(|(id, e)| (id.as_str(), e)));

    if json {
        println!("{}", serde_json::to_string_pretty(&conflicts)?);
    } else {
        println!("{}", format_conflicts(&conflicts));
    }
    Ok(())
}
