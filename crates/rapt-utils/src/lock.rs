//! Advisory locking for configuration directories.
//!
//! Serializes cooperating processes that mutate the same configuration
//! folder. The lock is advisory: writers that do not take it (an editor, a
//! human with `tee`) are not blocked.

use std::{
    env,
    fs::{self, File, OpenOptions},
    path::{Path, PathBuf},
};

use nix::fcntl::{Flock, FlockArg};

use crate::error::{LockError, LockResult};

/// An exclusive advisory lock keyed on a directory path.
///
/// The lock file lives outside the locked directory so the directory's own
/// contents stay untouched. It is released when the guard is dropped.
pub struct ConfigLock {
    _file: Flock<File>,
    path: PathBuf,
}

impl ConfigLock {
    /// Directory holding the lock files.
    ///
    /// Uses `$XDG_RUNTIME_DIR/rapt/locks`, falling back to the system
    /// temporary directory when the runtime dir is not set.
    fn lock_dir() -> LockResult<PathBuf> {
        let base = env::var("XDG_RUNTIME_DIR")
            .map(PathBuf::from)
            .unwrap_or_else(|_| env::temp_dir());
        let dir = base.join("rapt").join("locks");

        fs::create_dir_all(&dir).map_err(|err| LockError::LockDir {
            path: dir.clone(),
            source: err,
        })?;

        Ok(dir)
    }

    /// Derive the lock file path for a target directory.
    ///
    /// The target is canonicalized where possible so that `/etc/apt` and
    /// `/etc/apt/` map to the same lock file.
    fn lock_path(target: &Path) -> LockResult<PathBuf> {
        let canonical = target
            .canonicalize()
            .unwrap_or_else(|_| target.to_path_buf());

        let filename: String = canonical
            .to_string_lossy()
            .chars()
            .map(|c| {
                if c.is_alphanumeric() || matches!(c, '-' | '_' | '.') {
                    c
                } else {
                    '_'
                }
            })
            .collect();

        Ok(Self::lock_dir()?.join(format!("{filename}.lock")))
    }

    /// Acquire an exclusive lock on `target`, blocking until it is free.
    ///
    /// Returns a guard that releases the lock when dropped.
    pub fn acquire<P: AsRef<Path>>(target: P) -> LockResult<Self> {
        let path = Self::lock_path(target.as_ref())?;
        let file = Self::open_lock_file(&path)?;

        let file = Flock::lock(file, FlockArg::LockExclusive).map_err(|(_, errno)| {
            LockError::Acquire {
                path: path.clone(),
                source: errno,
            }
        })?;

        Ok(ConfigLock { _file: file, path })
    }

    /// Try to acquire the lock without blocking.
    ///
    /// Returns `None` when another process already holds it.
    pub fn try_acquire<P: AsRef<Path>>(target: P) -> LockResult<Option<Self>> {
        let path = Self::lock_path(target.as_ref())?;
        let file = Self::open_lock_file(&path)?;

        match Flock::lock(file, FlockArg::LockExclusiveNonblock) {
            Ok(file) => Ok(Some(ConfigLock { _file: file, path })),
            Err((_, nix::errno::Errno::EWOULDBLOCK)) => Ok(None),
            Err((_, errno)) => Err(LockError::Acquire {
                path,
                source: errno,
            }),
        }
    }

    fn open_lock_file(path: &Path) -> LockResult<File> {
        OpenOptions::new()
            .write(true)
            .create(true)
            .truncate(false)
            .open(path)
            .map_err(|err| LockError::Open {
                path: path.to_path_buf(),
                source: err,
            })
    }

    /// Path of the lock file backing this guard.
    pub fn path(&self) -> &Path {
        &self.path
    }
}
