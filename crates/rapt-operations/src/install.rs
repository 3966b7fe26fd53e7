use tracing::debug;

use crate::{
    error::Result,
    exec::run_combined,
    types::{target_names, Package},
};

/// Install the given packages (`apt-get install -y`).
///
/// One combined invocation; success or failure is all-or-nothing as
/// reported by the tool.
pub fn install(packages: &[Package]) -> Result<String> {
    let mut args = vec!["install".to_string(), "-y".to_string()];
    args.extend(target_names(packages)?);
    debug!(count = packages.len(), "installing packages");
    run_combined("apt-get", args)
}

/// Report what installing the given packages would do, without changing
/// system state (`--dry-run`).
pub fn install_dry(packages: &[Package]) -> Result<String> {
    let mut args = vec![
        "install".to_string(),
        "-y".to_string(),
        "--dry-run".to_string(),
    ];
    args.extend(target_names(packages)?);
    debug!(count = packages.len(), "dry-run installing packages");
    run_combined("apt-get", args)
}
