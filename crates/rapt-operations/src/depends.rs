use std::collections::HashSet;

use tracing::debug;

use crate::{
    error::{OpsError, Result},
    exec::run_stdout,
    types::Package,
};

/// Flatten a package's recursive dependencies into a bottom-up name list.
///
/// Runs `apt-cache depends -i --recurse` and flattens its text output:
/// leaves come last in the tool's output, so reversing the lines puts them
/// first, giving an order suitable for sequential installation. This is a
/// heuristic over text, not a dependency-graph computation.
pub fn get_dependencies(package: &Package) -> Result<Vec<String>> {
    if package.name.is_empty() {
        return Err(OpsError::EmptyPackageName);
    }

    debug!(package = %package.name, "listing recursive dependencies");
    let output = run_stdout(
        "apt-cache",
        ["depends", "-i", "--recurse", package.name.as_str()],
    )?;
    Ok(flatten_dependencies(&output, &package.name))
}

/// Reverse the lines, take the last whitespace-separated token of each as a
/// candidate name, drop empties and the queried package itself, and keep the
/// first occurrence of every name.
pub(crate) fn flatten_dependencies(output: &str, root: &str) -> Vec<String> {
    let mut seen = HashSet::new();
    output
        .lines()
        .rev()
        .filter_map(|line| line.split_whitespace().last())
        .filter(|name| *name != root)
        .filter(|name| seen.insert(name.to_string()))
        .map(str::to_string)
        .collect()
}
