use std::sync::LazyLock;

use regex::Regex;
use tracing::debug;

use crate::{
    error::Result,
    exec::{run_combined, run_stdout},
    types::{target_names, Package},
};

// `apt list --upgradable` row: `name/channel version arch [upgradable from: old]`.
// The annotation is optional; anything else (headers, blank lines) is skipped.
static UPGRADABLE_LINE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^([^ ]+) ([^ ]+) ([^ ]+)( \[upgradable from: [^\[\]]*\])?")
        .expect("upgradable line grammar")
});

/// Refresh the package index (`apt-get update`). Returns the tool's
/// combined output for display.
pub fn check_for_updates() -> Result<String> {
    debug!("refreshing package index");
    run_combined("apt-get", ["update", "-q"])
}

/// List packages for which a newer version is available, with the version
/// an upgrade would install.
pub fn list_upgradable() -> Result<Vec<Package>> {
    debug!("listing upgradable packages");
    let output = run_stdout("apt", ["list", "--upgradable"])?;
    Ok(parse_upgradable_output(&output))
}

/// Parse `apt list --upgradable` output.
///
/// The package name is the part before the repository-channel `/` suffix;
/// the trailing `[upgradable from: ...]` annotation is dropped.
pub(crate) fn parse_upgradable_output(output: &str) -> Vec<Package> {
    output
        .lines()
        .filter_map(|line| {
            let caps = UPGRADABLE_LINE.captures(line)?;
            let qualified = caps.get(1)?.as_str();
            let name = qualified
                .split_once('/')
                .map_or(qualified, |(name, _)| name);
            Some(Package {
                name: name.to_string(),
                status: "upgradable".to_string(),
                version: caps[2].to_string(),
                architecture: caps[3].to_string(),
                ..Package::default()
            })
        })
        .collect()
}

/// Upgrade the given packages (`apt-get upgrade -y`).
pub fn upgrade(packages: &[Package]) -> Result<String> {
    let mut args = vec!["upgrade".to_string(), "-y".to_string()];
    args.extend(target_names(packages)?);
    debug!(count = packages.len(), "upgrading packages");
    run_combined("apt-get", args)
}

/// Upgrade every upgradable package.
pub fn upgrade_all() -> Result<String> {
    debug!("upgrading all packages");
    run_combined("apt-get", ["upgrade", "-y"])
}

/// Upgrade every upgradable package, allowing removals to satisfy changed
/// dependencies (`apt-get dist-upgrade`).
pub fn dist_upgrade() -> Result<String> {
    debug!("dist-upgrading all packages");
    run_combined("apt-get", ["dist-upgrade", "-y"])
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::OpsError;

    #[test]
    fn test_parse_upgradable_output() {
        let output = "Listing... Done\n\
                      libgweather-common/zesty-updates,zesty-updates 3.24.0-0ubuntu1 all [upgradable from: 3.22.1-0ubuntu1]\n\
                      firefox/focal-updates 95.0+build1-0ubuntu1 amd64\n";
        let packages = parse_upgradable_output(output);
        assert_eq!(packages.len(), 2);

        assert_eq!(packages[0].name, "libgweather-common");
        assert_eq!(packages[0].status, "upgradable");
        assert_eq!(packages[0].version, "3.24.0-0ubuntu1");
        assert_eq!(packages[0].architecture, "all");

        assert_eq!(packages[1].name, "firefox");
        assert_eq!(packages[1].version, "95.0+build1-0ubuntu1");
        assert_eq!(packages[1].architecture, "amd64");
    }

    #[test]
    fn test_parse_upgradable_output_skips_non_rows() {
        let output = "Listing... Done\n\n";
        assert!(parse_upgradable_output(output).is_empty());
    }

    #[test]
    fn test_upgrade_rejects_empty_name_before_invoking() {
        let result = upgrade(&[Package::new("")]);
        assert!(matches!(result, Err(OpsError::EmptyPackageName)));
    }
}
