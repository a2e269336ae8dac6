//! Checksum compare and conditional re-download of the local CA bundle.
//!
//! One GET for the remote checksum, one local hash; on mismatch a HEAD and a
//! GET of the bundle, then an in-place overwrite stamped with the remote
//! modification time. No retries: the first failed request aborts the run
//! before anything is written.

use crate::checksum;
use crate::config::CabundleConfig;
use crate::error::UpdateError;
use crate::locate;
use crate::transport::{Response, Transport};
use chrono::{DateTime, Utc};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::time::{Duration, SystemTime, UNIX_EPOCH};

/// Remote resources consulted by the updater.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Endpoints {
    pub checksum_url: String,
    pub bundle_url: String,
}

impl From<&CabundleConfig> for Endpoints {
    fn from(cfg: &CabundleConfig) -> Self {
        Self {
            checksum_url: cfg.checksum_url.clone(),
            bundle_url: cfg.bundle_url.clone(),
        }
    }
}

/// Result of a successful [`CertificateUpdater::check_and_update`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UpdateOutcome {
    /// Local digest already matches upstream; nothing was written.
    UpToDate { path: PathBuf, digest: String },
    /// Local file was overwritten with the upstream bundle.
    Updated {
        path: PathBuf,
        previous_digest: String,
        remote_digest: String,
        /// Applied as the file's mtime when positive.
        remote_time: Option<i64>,
        bytes_written: u64,
    },
}

pub struct CertificateUpdater<T> {
    transport: T,
    endpoints: Endpoints,
    save_checksum: Option<PathBuf>,
}

impl<T: Transport> CertificateUpdater<T> {
    pub fn new(transport: T, endpoints: Endpoints) -> Self {
        Self {
            transport,
            endpoints,
            save_checksum: None,
        }
    }

    /// Also write the raw checksum resource to `path` on every run.
    pub fn save_checksum_to(mut self, path: impl Into<PathBuf>) -> Self {
        self.save_checksum = Some(path.into());
        self
    }

    pub fn check_and_update(&mut self, local: &Path) -> Result<UpdateOutcome, UpdateError> {
        let path = locate::resolve_existing(local)?;
        tracing::info!("local CA file: {}", path.display());

        let remote_digest = self.fetch_remote_digest()?;
        let local_digest = checksum::sha256_path(&path).map_err(|e| UpdateError::io(&path, e))?;

        if local_digest == remote_digest {
            tracing::info!("CA bundle is up to date");
            return Ok(UpdateOutcome::UpToDate {
                path,
                digest: local_digest,
            });
        }

        let probe = self.transport.head(&self.endpoints.bundle_url)?;
        tracing::info!("fetching CA bundle {}", self.endpoints.bundle_url);
        tracing::info!("  - remote modified: {}", format_epoch(probe.filetime));
        tracing::info!("  - local modified:  {}", format_local_mtime(&path));
        tracing::info!("  - local sha256:    {}", local_digest);

        let bundle = self.transport.get(&self.endpoints.bundle_url)?;
        write_stamped(&path, &bundle)?;
        tracing::info!(
            "CA bundle updated: {} bytes written to {}",
            bundle.body.len(),
            path.display()
        );

        Ok(UpdateOutcome::Updated {
            path,
            previous_digest: local_digest,
            remote_digest,
            remote_time: bundle.positive_filetime(),
            bytes_written: bundle.body.len() as u64,
        })
    }

    fn fetch_remote_digest(&mut self) -> Result<String, UpdateError> {
        let resp = self.transport.get(&self.endpoints.checksum_url)?;
        if let Some(save) = &self.save_checksum {
            write_stamped(save, &resp)?;
        }
        let digest = checksum::remote_digest(&resp.body);

        tracing::info!("fetched CA checksum {}", self.endpoints.checksum_url);
        tracing::info!("  - remote modified: {}", format_epoch(resp.filetime));
        tracing::info!("  - remote sha256:   {}", digest);

        Ok(digest)
    }
}

/// Overwrite `path` with the response body, then copy the remote time onto it.
fn write_stamped(path: &Path, resp: &Response) -> Result<(), UpdateError> {
    fs::write(path, &resp.body).map_err(|e| UpdateError::io(path, e))?;
    if let Some(secs) = resp.positive_filetime() {
        set_mtime(path, secs).map_err(|e| UpdateError::io(path, e))?;
    }
    Ok(())
}

fn set_mtime(path: &Path, secs: i64) -> io::Result<()> {
    let f = fs::OpenOptions::new().write(true).open(path)?;
    f.set_modified(UNIX_EPOCH + Duration::from_secs(secs as u64))
}

fn format_epoch(secs: Option<i64>) -> String {
    secs.filter(|s| *s > 0)
        .and_then(|s| DateTime::<Utc>::from_timestamp(s, 0))
        .map(|t| t.format("%Y-%m-%d %H:%M:%S").to_string())
        .unwrap_or_else(|| "unknown".to_string())
}

fn format_local_mtime(path: &Path) -> String {
    fs::metadata(path)
        .and_then(|m| m.modified())
        .map(|t: SystemTime| DateTime::<Utc>::from(t).format("%Y-%m-%d %H:%M:%S").to_string())
        .unwrap_or_else(|_| "unknown".to_string())
}
