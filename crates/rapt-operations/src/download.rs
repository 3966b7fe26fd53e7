use std::path::Path;

use rapt_utils::fs::ensure_dir_exists;
use tracing::debug;

use crate::{
    error::{OpsError, Result},
    exec::run_combined,
    types::Package,
};

/// Download a package's archive into `target_dir` without installing it.
///
/// apt-get refuses to populate a cache directory that has no `partial`
/// staging subdirectory, so it is created first. `target_dir` should be
/// absolute: the tool resolves it, not this process.
pub fn download<P: AsRef<Path>>(package: &Package, target_dir: P) -> Result<String> {
    if package.name.is_empty() {
        return Err(OpsError::EmptyPackageName);
    }

    let target_dir = target_dir.as_ref();
    ensure_dir_exists(target_dir.join("partial"))?;

    debug!(package = %package.name, target = %target_dir.display(), "downloading package");
    let args = [
        "install".to_string(),
        "-y".to_string(),
        "--reinstall".to_string(),
        "--download-only".to_string(),
        "-o".to_string(),
        "Debug::NoLocking=1".to_string(),
        "-o".to_string(),
        format!("Dir::Cache::archives=\"{}\"", target_dir.display()),
        package.name.clone(),
    ];
    run_combined("apt-get", args)
}
