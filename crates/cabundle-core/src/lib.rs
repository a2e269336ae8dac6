pub mod config;
pub mod logging;

pub mod checksum;
pub mod error;
pub mod locate;
pub mod transport;
pub mod updater;

pub use error::UpdateError;
pub use locate::ExtConfig;
pub use updater::{CertificateUpdater, Endpoints, UpdateOutcome};
