use serde::{Deserialize, Serialize};

use crate::error::{OpsError, Result};

/// A package as reported by the dpkg status database.
///
/// Constructed fresh per query; never persisted.
#[derive(Clone, Debug, Default, Deserialize, Serialize)]
pub struct Package {
    pub name: String,
    pub status: String,
    pub architecture: String,
    pub version: String,
    pub short_description: String,
    /// Installed size in KiB; 0 when the tool reports nothing usable.
    pub installed_size_kb: u64,
}

impl Package {
    /// A package known only by name, for use as an operation target.
    pub fn new(name: impl Into<String>) -> Self {
        Package {
            name: name.into(),
            ..Package::default()
        }
    }
}

/// Collect target names, rejecting any package with an empty name before
/// anything is invoked.
pub(crate) fn target_names(packages: &[Package]) -> Result<Vec<String>> {
    packages
        .iter()
        .map(|package| {
            if package.name.is_empty() {
                Err(OpsError::EmptyPackageName)
            } else {
                Ok(package.name.clone())
            }
        })
        .collect()
}
