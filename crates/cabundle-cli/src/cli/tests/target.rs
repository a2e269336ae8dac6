//! Tests for CA file resolution from flags and config.

use crate::cli::commands::resolve_target;
use crate::cli::TargetArgs;
use cabundle_core::config::{CabundleConfig, Deployment};
use cabundle_core::UpdateError;
use std::path::PathBuf;

fn cfg() -> CabundleConfig {
    CabundleConfig {
        bundle_path: Some("/usr/share/cabundle/cacert.pem".into()),
        ..CabundleConfig::default()
    }
}

#[test]
fn explicit_ca_file_wins() {
    let target = TargetArgs {
        ca_file: Some("/tmp/mine.pem".into()),
        packaged: true,
        ..TargetArgs::default()
    };
    assert_eq!(
        resolve_target(&cfg(), &target).unwrap(),
        PathBuf::from("/tmp/mine.pem")
    );
}

#[test]
fn loose_deployment_uses_bundle_path() {
    assert_eq!(
        resolve_target(&cfg(), &TargetArgs::default()).unwrap(),
        PathBuf::from("/usr/share/cabundle/cacert.pem")
    );
}

#[test]
fn loose_without_bundle_path_is_missing_dependency() {
    let err = resolve_target(&CabundleConfig::default(), &TargetArgs::default()).unwrap_err();
    assert!(matches!(err, UpdateError::MissingDependency(_)));
    assert_eq!(err.exit_code(), 1);
}

#[test]
fn packaged_flag_needs_override() {
    let target = TargetArgs {
        packaged: true,
        ..TargetArgs::default()
    };
    assert!(matches!(
        resolve_target(&cfg(), &target),
        Err(UpdateError::UnsupportedPackaged)
    ));
}

#[test]
fn packaged_flag_with_cli_override() {
    let target = TargetArgs {
        packaged: true,
        override_path: Some("/opt/app/cacert.pem".into()),
        ..TargetArgs::default()
    };
    assert_eq!(
        resolve_target(&cfg(), &target).unwrap(),
        PathBuf::from("/opt/app/cacert.pem")
    );
}

#[test]
fn packaged_config_uses_configured_override() {
    let cfg = CabundleConfig {
        deployment: Deployment::Packaged,
        override_path: Some("/srv/cacert.pem".into()),
        ..cfg()
    };
    assert_eq!(
        resolve_target(&cfg, &TargetArgs::default()).unwrap(),
        PathBuf::from("/srv/cacert.pem")
    );
}
