//! HTTP transport for the updater.
//!
//! The updater only needs two request shapes: a GET returning the body and
//! a HEAD returning metadata. Both report the remote file time when the
//! server provides one (`Last-Modified`).

mod easy;

pub use easy::CurlTransport;

use crate::config::CabundleConfig;
use crate::error::UpdateError;
use std::path::PathBuf;
use std::time::Duration;

/// libcurl settings shared by every request of one run.
#[derive(Debug, Clone)]
pub struct RequestOptions {
    pub max_redirects: u32,
    /// Trust store for peer verification; None = libcurl's system default.
    pub ca_info: Option<PathBuf>,
    pub connect_timeout: Duration,
    pub timeout: Duration,
}

impl Default for RequestOptions {
    fn default() -> Self {
        Self::from(&CabundleConfig::default())
    }
}

impl From<&CabundleConfig> for RequestOptions {
    fn from(cfg: &CabundleConfig) -> Self {
        Self {
            max_redirects: cfg.max_redirects,
            ca_info: cfg.ca_info.clone(),
            connect_timeout: cfg.connect_timeout(),
            timeout: cfg.timeout(),
        }
    }
}

/// Body and metadata of a completed request.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Response {
    /// Empty for HEAD.
    pub body: Vec<u8>,
    /// Remote modification time in seconds since the Unix epoch, if known.
    pub filetime: Option<i64>,
}

impl Response {
    /// Remote time only when strictly positive.
    pub fn positive_filetime(&self) -> Option<i64> {
        self.filetime.filter(|t| *t > 0)
    }
}

/// Blocking request executor. Implemented by [`CurlTransport`] and by test doubles.
pub trait Transport {
    fn get(&mut self, url: &str) -> Result<Response, UpdateError>;
    fn head(&mut self, url: &str) -> Result<Response, UpdateError>;
}

impl<T: Transport + ?Sized> Transport for &mut T {
    fn get(&mut self, url: &str) -> Result<Response, UpdateError> {
        (**self).get(url)
    }

    fn head(&mut self, url: &str) -> Result<Response, UpdateError> {
        (**self).head(url)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn positive_filetime_filters_zero_and_negative() {
        let mut r = Response::default();
        assert_eq!(r.positive_filetime(), None);
        r.filetime = Some(0);
        assert_eq!(r.positive_filetime(), None);
        r.filetime = Some(-1);
        assert_eq!(r.positive_filetime(), None);
        r.filetime = Some(1_700_000_000);
        assert_eq!(r.positive_filetime(), Some(1_700_000_000));
    }

    #[test]
    fn options_follow_config() {
        let cfg = CabundleConfig {
            max_redirects: 7,
            ca_info: Some("/etc/ssl/certs/ca-certificates.crt".into()),
            timeout_secs: 12,
            ..CabundleConfig::default()
        };
        let opts = RequestOptions::from(&cfg);
        assert_eq!(opts.max_redirects, 7);
        assert_eq!(opts.timeout, Duration::from_secs(12));
        assert!(opts.ca_info.is_some());
    }

    #[test]
    fn default_options_cap_redirects_at_three() {
        assert_eq!(RequestOptions::default().max_redirects, 3);
    }
}
