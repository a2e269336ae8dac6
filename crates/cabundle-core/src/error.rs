//! Error kinds reported by bundle location and the certificate updater.

use std::path::PathBuf;
use thiserror::Error;

/// Failure of a `cabundle` operation.
///
/// The first three variants are the "expected" conditions the CLI reports
/// with exit status 1; transport and I/O failures map to 2.
#[derive(Error, Debug)]
pub enum UpdateError {
    /// No bundled CA file is known for a loose (non-packaged) deployment.
    #[error("missing CA bundle: {0}")]
    MissingDependency(String),

    /// The resolved local CA file does not exist.
    #[error("missing certificate {}", .0.display())]
    MissingFile(PathBuf),

    /// Running as a packaged deployment without an override path.
    #[error("packaged deployment requires an override path for the CA file")]
    UnsupportedPackaged,

    /// libcurl failure or non-2xx response; `detail` carries the transport text.
    #[error("request failed: {url}: {detail}")]
    Transport { url: String, detail: String },

    /// Local file read/write failure.
    #[error("{}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl UpdateError {
    pub(crate) fn transport(url: &str, detail: impl ToString) -> Self {
        UpdateError::Transport {
            url: url.to_string(),
            detail: detail.to_string(),
        }
    }

    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        UpdateError::Io {
            path: path.into(),
            source,
        }
    }

    /// Process exit status for this error.
    pub fn exit_code(&self) -> i32 {
        match self {
            UpdateError::MissingDependency(_)
            | UpdateError::MissingFile(_)
            | UpdateError::UnsupportedPackaged => 1,
            UpdateError::Transport { .. } | UpdateError::Io { .. } => 2,
        }
    }
}
