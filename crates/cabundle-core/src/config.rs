use anyhow::{bail, Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

pub const DEFAULT_CHECKSUM_URL: &str = "https://curl.se/ca/cacert.pem.sha256";
pub const DEFAULT_BUNDLE_URL: &str = "https://curl.se/ca/cacert.pem";

/// How the program is deployed; decides where the local CA file lives.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Deployment {
    /// Loose files on disk: the CA file is `bundle_path`.
    #[default]
    Loose,
    /// Single packaged archive: the CA file must come from an override path.
    Packaged,
}

/// Global configuration loaded from `~/.config/cabundle/config.toml`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CabundleConfig {
    /// Endpoint serving `<sha256-hex>  cacert.pem`.
    pub checksum_url: String,
    /// Endpoint serving the PEM bundle itself.
    pub bundle_url: String,
    /// Maximum redirects followed per request.
    pub max_redirects: u32,
    /// Connect timeout per request, in seconds.
    pub connect_timeout_secs: u64,
    /// Whole-transfer timeout per request, in seconds.
    pub timeout_secs: u64,
    /// Trust store used to verify the endpoints (None = libcurl system default).
    #[serde(default)]
    pub ca_info: Option<PathBuf>,
    /// Bundled CA file for loose deployments.
    #[serde(default)]
    pub bundle_path: Option<PathBuf>,
    #[serde(default)]
    pub deployment: Deployment,
    /// CA file used when `deployment = "packaged"`.
    #[serde(default)]
    pub override_path: Option<PathBuf>,
}

impl Default for CabundleConfig {
    fn default() -> Self {
        Self {
            checksum_url: DEFAULT_CHECKSUM_URL.to_string(),
            bundle_url: DEFAULT_BUNDLE_URL.to_string(),
            max_redirects: 3,
            connect_timeout_secs: 30,
            timeout_secs: 300,
            ca_info: None,
            bundle_path: None,
            deployment: Deployment::Loose,
            override_path: None,
        }
    }
}

impl CabundleConfig {
    pub fn connect_timeout(&self) -> Duration {
        Duration::from_secs(self.connect_timeout_secs)
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// Checks that both endpoints are absolute http(s) URLs.
    pub fn validate(&self) -> Result<()> {
        for (name, raw) in [
            ("checksum_url", &self.checksum_url),
            ("bundle_url", &self.bundle_url),
        ] {
            let parsed = url::Url::parse(raw).with_context(|| format!("{} is not a URL", name))?;
            if !matches!(parsed.scheme(), "http" | "https") {
                bail!("{} must be http or https, got {}", name, parsed.scheme());
            }
        }
        if self.timeout_secs == 0 {
            bail!("timeout_secs must be positive");
        }
        Ok(())
    }
}

pub fn config_path() -> Result<PathBuf> {
    let xdg_dirs = xdg::BaseDirectories::with_prefix("cabundle")?;
    Ok(xdg_dirs.place_config_file("config.toml")?)
}

/// Load configuration from disk, creating a default file if none exists.
pub fn load_or_init() -> Result<CabundleConfig> {
    load_or_init_at(&config_path()?)
}

pub fn load_or_init_at(path: &Path) -> Result<CabundleConfig> {
    if !path.exists() {
        let default_cfg = CabundleConfig::default();
        let toml = toml::to_string_pretty(&default_cfg)?;
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(path, toml)?;
        tracing::info!("created default config at {}", path.display());
        return Ok(default_cfg);
    }

    let data = fs::read_to_string(path).with_context(|| format!("read {}", path.display()))?;
    let cfg: CabundleConfig =
        toml::from_str(&data).with_context(|| format!("parse {}", path.display()))?;
    cfg.validate()?;
    Ok(cfg)
}
