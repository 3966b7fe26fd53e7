use std::{
    fs,
    path::{Path, PathBuf},
};

use crate::error::{FileSystemError, FileSystemResult};

/// Creates a directory structure if it doesn't exist.
///
/// If the directory already exists, this function does nothing. If the path
/// exists but is not a directory, an error is returned.
///
/// # Errors
///
/// * [`FileSystemError::Directory`] if the directory could not be created.
/// * [`FileSystemError::NotADirectory`] if the path exists but is not a directory.
///
/// # Example
///
/// ```no_run
/// use rapt_utils::error::FileSystemResult;
/// use rapt_utils::fs::ensure_dir_exists;
///
/// fn main() -> FileSystemResult<()> {
///     ensure_dir_exists("/var/cache/rapt/archives/partial")?;
///     Ok(())
/// }
/// ```
pub fn ensure_dir_exists<P: AsRef<Path>>(path: P) -> FileSystemResult<()> {
    let path = path.as_ref();
    if !path.exists() {
        fs::create_dir_all(path).map_err(|err| FileSystemError::Directory {
            path: path.to_path_buf(),
            action: "create",
            source: err,
        })?;
    } else if !path.is_dir() {
        return Err(FileSystemError::NotADirectory {
            path: path.to_path_buf(),
        });
    }

    Ok(())
}

/// Lists a directory's entries, sorted byte-wise by file name.
///
/// [`fs::read_dir`] yields entries in platform-dependent order; callers that
/// need a stable file order get one here.
///
/// # Errors
///
/// Returns a [`FileSystemError::Directory`] if the directory cannot be read.
pub fn sorted_dir_entries<P: AsRef<Path>>(path: P) -> FileSystemResult<Vec<PathBuf>> {
    let path = path.as_ref();
    let read_error = |err| FileSystemError::Directory {
        path: path.to_path_buf(),
        action: "read",
        source: err,
    };

    let mut entries = Vec::new();
    for entry in fs::read_dir(path).map_err(read_error)? {
        entries.push(entry.map_err(read_error)?.path());
    }
    entries.sort_by(|a, b| a.file_name().cmp(&b.file_name()));

    Ok(entries)
}
