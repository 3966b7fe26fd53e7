use tracing::debug;

use crate::{
    error::Result,
    exec::run_combined,
    types::{target_names, Package},
};

/// Remove the given packages (`apt-get remove -y`).
///
/// One combined invocation; success or failure is all-or-nothing as
/// reported by the tool.
pub fn remove(packages: &[Package]) -> Result<String> {
    let mut args = vec!["remove".to_string(), "-y".to_string()];
    args.extend(target_names(packages)?);
    debug!(count = packages.len(), "removing packages");
    run_combined("apt-get", args)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::OpsError;

    #[test]
    fn test_remove_rejects_empty_name_before_invoking() {
        let result = remove(&[Package::new("")]);
        assert!(matches!(result, Err(OpsError::EmptyPackageName)));
    }
}
