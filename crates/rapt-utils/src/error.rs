use std::{error::Error, fmt, path::PathBuf};

#[derive(Debug)]
pub enum FileSystemError {
    File {
        path: PathBuf,
        action: &'static str,
        source: std::io::Error,
    },

    Directory {
        path: PathBuf,
        action: &'static str,
        source: std::io::Error,
    },

    NotADirectory {
        path: PathBuf,
    },
}

impl fmt::Display for FileSystemError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FileSystemError::File {
                path,
                action,
                source,
            } => {
                write!(f, "Failed to {action} file `{}`: {source}", path.display())
            }
            FileSystemError::Directory {
                path,
                action,
                source,
            } => {
                write!(
                    f,
                    "Failed to {action} directory `{}`: {source}",
                    path.display()
                )
            }
            FileSystemError::NotADirectory { path } => {
                write!(f, "`{}` is not a directory", path.display())
            }
        }
    }
}

impl Error for FileSystemError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            FileSystemError::File { source, .. } => Some(source),
            FileSystemError::Directory { source, .. } => Some(source),
            _ => None,
        }
    }
}

#[derive(Debug)]
pub enum LockError {
    LockDir {
        path: PathBuf,
        source: std::io::Error,
    },

    Open {
        path: PathBuf,
        source: std::io::Error,
    },

    Acquire {
        path: PathBuf,
        source: nix::errno::Errno,
    },
}

impl fmt::Display for LockError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LockError::LockDir { path, source } => {
                write!(
                    f,
                    "Failed to create lock directory `{}`: {source}",
                    path.display()
                )
            }
            LockError::Open { path, source } => {
                write!(f, "Failed to open lock file `{}`: {source}", path.display())
            }
            LockError::Acquire { path, source } => {
                write!(f, "Failed to lock `{}`: {source}", path.display())
            }
        }
    }
}

impl Error for LockError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            LockError::LockDir { source, .. } => Some(source),
            LockError::Open { source, .. } => Some(source),
            LockError::Acquire { source, .. } => Some(source),
        }
    }
}

pub type FileSystemResult<T> = std::result::Result<T, FileSystemError>;
pub type LockResult<T> = std::result::Result<T, LockError>;
