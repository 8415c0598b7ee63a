//! Install command

use anyhow::{Result, bail};
use bashmod_core::Reporter;
use bashmod_core::catalog::{SelectError, find_by_key, installed_exports, select};
use bashmod_core::conflicts::{detect_exports, format_conflicts};

use crate::context::Context;
use bashmod_schema::Module;

use crate::split_spec;

/// Install one or more modules given as `id`, `id@version` or a full
/// `source|id|version` catalog key.
///
/// Every requested module is attempted; the command fails afterwards if any
/// of them did.
pub async fn install(ctx: &Context, specs: &[String], source: Option<&str>) -> Result<()> {
    let start = std::time::Instant::now();
    let catalog = ctx.load_catalog().await?;
    let mut installer = ctx.installer()?;
    let output = &ctx.output;

    output.section("Installing");

    let mut installed = 0usize;
    let mut failed = 0usize;
    for spec in specs {
        let id = spec_id(spec);
        let module = match resolve(&catalog, spec, source) {
            Ok(m) => m,
            Err(e) => {
                output.failed(id, &e.to_string());
                failed += 1;
                continue;
            }
        };

        for dep in &module.dependencies {
            let requested = specs.iter().any(|s| spec_id(s) == dep.as_str());
            if !requested && !installer.store().is_installed(dep) {
                output.warning(&format!("'{id}' expects '{dep}', which is not installed"));
            }
        }

        if let Some(current) = installer.store().installed_version(id)
            && current != module.version
        {
            output.info(&format!("Replacing {id} {current} with {}", module.version));
        }

        match installer.install(module).await {
            Ok(_) => installed += 1,
            Err(e) => {
                tracing::debug!(id, error = %e, "install failed");
                failed += 1;
            }
        }
    }

    if installed > 0 {
        let exports = installed_exports(&catalog, installer.store())?;
        let conflicts = detect_exports(exports.iter().map(|(id, e)| (id.as_str(), e)));
        if !conflicts.is_empty() {
            println!();
            output.warning(&format_conflicts(&conflicts));
        }
    }

    println!();
    output.summary_plain(installed, &format!("installed in {:.2}s", start.elapsed().as_secs_f64()));

    if failed > 0 {
        bail!("{failed} module(s) failed to install");
    }
    Ok(())
}

/// Pick the catalog entry a spec names. A `source|id|version` key is an exact
/// lookup; anything else goes through [`select`].
fn resolve<'a>(
    catalog: &'a [Module],
    spec: &str,
    source: Option<&str>,
) -> Result<&'a Module, SelectError> {
    if let Some((key_source, id, version)) = split_key(spec) {
        return find_by_key(catalog, key_source, id, version)
            .ok_or_else(|| SelectError::NotFound(spec.to_string()));
    }
    let (id, version) = split_spec(spec);
    select(catalog, id, source, version)
}

fn split_key(spec: &str) -> Option<(&str, &str, &str)> {
    let (rest, version) = spec.rsplit_once('|')?;
    let (source, id) = rest.rsplit_once('|')?;
    Some((source, id, version))
}

fn spec_id(spec: &str) -> &str {
    split_key(spec).map_or_else(|| split_spec(spec).0, |(_, id, _)| id)
}
