use tracing::debug;

use crate::{
    error::{OpsError, Result},
    exec::run_combined,
    types::Package,
};

// Six tab-separated fields per line, in this order.
const STATUS_FORMAT: &str =
    "${Package}\t${Architecture}\t${db:Status-Status}\t${Version}\t${Installed-Size}\t${Binary:summary}\n";

/// List every package known to the dpkg status database.
pub fn list() -> Result<Vec<Package>> {
    search("*")
}

/// List packages whose name matches a dpkg glob pattern.
///
/// A query that matches nothing is an empty list, not an error, even though
/// the tool reports it with a non-zero exit.
pub fn search(pattern: &str) -> Result<Vec<Package>> {
    debug!(pattern = %pattern, "querying package status");
    let args = [
        "-W".to_string(),
        format!("-f={STATUS_FORMAT}"),
        pattern.to_string(),
    ];

    match run_combined("dpkg-query", args) {
        Ok(output) => Ok(parse_status_output(&output)),
        Err(OpsError::ToolFailed { output, .. })
            if output.contains("no packages found matching") =>
        {
            Ok(Vec::new())
        }
        Err(err) => Err(err),
    }
}

/// Parse dpkg-query status output, one record per line, in input order.
///
/// Short rows are tolerated with empty fields; a missing or non-numeric
/// installed-size becomes 0. This never fails.
pub(crate) fn parse_status_output(output: &str) -> Vec<Package> {
    output
        .lines()
        .filter(|line| !line.is_empty())
        .map(|line| {
            let fields: Vec<&str> = line.split('\t').collect();
            let field = |i: usize| fields.get(i).copied().unwrap_or_default().to_string();
            Package {
                name: field(0),
                architecture: field(1),
                status: field(2),
                version: field(3),
                installed_size_kb: fields.get(4).and_then(|s| s.parse().ok()).unwrap_or(0),
                short_description: field(5),
            }
        })
        .collect()
}
