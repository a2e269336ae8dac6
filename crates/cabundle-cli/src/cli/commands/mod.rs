//! CLI command handlers. Each command is in its own file.

mod checksum;
mod docs;
mod update;

pub use checksum::run_checksum;
pub use docs::{run_completions, run_man};
pub use update::run_update;

use super::TargetArgs;
use cabundle_core::config::{CabundleConfig, Deployment};
use cabundle_core::locate;
use cabundle_core::{ExtConfig, UpdateError};
use std::path::PathBuf;

/// Local CA file for `target`: explicit `--ca-file`, else deployment lookup.
pub(crate) fn resolve_target(
    cfg: &CabundleConfig,
    target: &TargetArgs,
) -> Result<PathBuf, UpdateError> {
    if let Some(path) = &target.ca_file {
        return Ok(path.clone());
    }
    let mut ext = ExtConfig::from(cfg);
    if target.override_path.is_some() {
        ext.set_override_path(target.override_path.clone());
    }
    let deployment = if target.packaged {
        Deployment::Packaged
    } else {
        cfg.deployment
    };
    locate::locate_bundle(deployment, &ext, cfg.bundle_path.as_deref())
}
