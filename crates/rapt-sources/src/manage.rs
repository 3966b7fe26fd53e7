use std::{fs::OpenOptions, io::Write, path::Path};

use rapt_utils::lock::ConfigLock;
use tracing::debug;

use crate::{
    error::{Result, SourcesError},
    parser::{parse_folder, DROPIN_DIR},
    repository::Repository,
};

/// Drop-in file owned by this library, distinct from files a user or other
/// tooling may have created.
pub const MANAGED_FILE: &str = "managed.list";

/// Add a repository to an APT config folder (conventionally `/etc/apt`).
///
/// The folder is re-parsed first; if an entry for the same source already
/// exists anywhere in it, [`SourcesError::DuplicateRepository`] is returned.
/// Otherwise the rendered line is appended to
/// `sources.list.d/managed.list`, which is created on demand.
///
/// The parse/check/append sequence runs under an exclusive advisory lock
/// keyed on the folder path, so concurrent callers serialize instead of
/// racing past the duplicate check. The lock is advisory: it does not
/// protect against writers that edit the files directly.
pub fn add_repository<P: AsRef<Path>>(repository: &Repository, folder: P) -> Result<()> {
    let folder = folder.as_ref();
    let _lock = ConfigLock::acquire(folder)?;

    let existing = parse_folder(folder)?;
    if existing.contains_source(repository) {
        return Err(SourcesError::DuplicateRepository);
    }

    let managed = folder.join(DROPIN_DIR).join(MANAGED_FILE);
    let write_error = |err| SourcesError::FileWrite {
        path: managed.clone(),
        source: err,
    };

    let mut file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(&managed)
        .map_err(write_error)?;
    writeln!(file, "{}", repository.config_line()).map_err(write_error)?;

    debug!(path = %managed.display(), "appended repository entry");
    Ok(())
}
