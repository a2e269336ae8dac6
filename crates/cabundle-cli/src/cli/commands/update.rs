//! `cabundle update` – compare against upstream and refresh the CA bundle.

use super::resolve_target;
use crate::cli::TargetArgs;
use anyhow::Result;
use cabundle_core::config::CabundleConfig;
use cabundle_core::transport::{CurlTransport, RequestOptions};
use cabundle_core::{CertificateUpdater, Endpoints, UpdateOutcome};
use std::path::Path;

pub fn run_update(
    cfg: &CabundleConfig,
    target: &TargetArgs,
    force: bool,
    save_checksum: Option<&Path>,
) -> Result<()> {
    if force {
        tracing::debug!("--force given; the checksum comparison still decides");
    }
    let local = resolve_target(cfg, target)?;

    let transport = CurlTransport::new(RequestOptions::from(cfg));
    let mut updater = CertificateUpdater::new(transport, Endpoints::from(cfg));
    if let Some(path) = save_checksum {
        updater = updater.save_checksum_to(path);
    }

    match updater.check_and_update(&local)? {
        UpdateOutcome::UpToDate { path, digest } => {
            println!("CA bundle up to date: {}", path.display());
            println!("  sha256: {}", digest);
        }
        UpdateOutcome::Updated {
            path,
            previous_digest,
            remote_digest,
            bytes_written,
            ..
        } => {
            println!("CA bundle updated: {} ({} bytes)", path.display(), bytes_written);
            println!("  old sha256: {}", previous_digest);
            println!("  new sha256: {}", remote_digest);
        }
    }
    Ok(())
}
