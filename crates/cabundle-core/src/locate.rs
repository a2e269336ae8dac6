//! Which local CA file to update.
//!
//! Loose deployments update the configured bundled file. Packaged
//! deployments cannot write inside their archive and must be given an
//! override path through [`ExtConfig`].

use crate::config::{CabundleConfig, Deployment};
use crate::error::UpdateError;
use std::path::{Path, PathBuf};

/// Startup-time overrides, built once and passed to [`locate_bundle`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExtConfig {
    built_ca_file_path: Option<PathBuf>,
}

impl ExtConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_override_path(&mut self, path: Option<PathBuf>) {
        self.built_ca_file_path = path;
    }

    pub fn override_path(&self) -> Option<&Path> {
        self.built_ca_file_path.as_deref()
    }
}

impl From<&CabundleConfig> for ExtConfig {
    fn from(cfg: &CabundleConfig) -> Self {
        Self {
            built_ca_file_path: cfg.override_path.clone(),
        }
    }
}

/// Path of the CA file for `deployment`, before existence checks.
pub fn locate_bundle(
    deployment: Deployment,
    ext: &ExtConfig,
    bundled: Option<&Path>,
) -> Result<PathBuf, UpdateError> {
    match deployment {
        Deployment::Packaged => ext
            .override_path()
            .map(Path::to_path_buf)
            .ok_or(UpdateError::UnsupportedPackaged),
        Deployment::Loose => bundled.map(Path::to_path_buf).ok_or_else(|| {
            UpdateError::MissingDependency("no bundle_path configured".to_string())
        }),
    }
}

/// Absolute, symlink-free form of `path`; `MissingFile` if it does not exist.
pub fn resolve_existing(path: &Path) -> Result<PathBuf, UpdateError> {
    match path.canonicalize() {
        Ok(abs) if abs.is_file() => Ok(abs),
        Ok(abs) => Err(UpdateError::MissingFile(abs)),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            Err(UpdateError::MissingFile(path.to_path_buf()))
        }
        Err(e) => Err(UpdateError::io(path, e)),
    }
}
