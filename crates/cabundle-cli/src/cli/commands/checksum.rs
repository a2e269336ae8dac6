//! Checksum command: SHA-256 of the local CA bundle.

use super::resolve_target;
use crate::cli::TargetArgs;
use anyhow::{Context, Result};
use cabundle_core::config::CabundleConfig;
use cabundle_core::{checksum, locate};

/// Compute and print SHA-256 of the resolved CA file.
pub fn run_checksum(cfg: &CabundleConfig, target: &TargetArgs) -> Result<()> {
    let path = locate::resolve_existing(&resolve_target(cfg, target)?)?;
    let digest =
        checksum::sha256_path(&path).with_context(|| format!("read {}", path.display()))?;
    println!("{}  {}", digest, path.display());
    Ok(())
}
