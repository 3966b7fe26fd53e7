use std::path::PathBuf;

use miette::Diagnostic;
use thiserror::Error;

#[derive(Error, Diagnostic, Debug)]
pub enum SourcesError {
    #[error("Failed to read `{}`: {source}", .path.display())]
    #[diagnostic(
        code(rapt_sources::read),
        help("Check that the file exists and is readable")
    )]
    FileRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to write `{}`: {source}", .path.display())]
    #[diagnostic(
        code(rapt_sources::write),
        help("Writing below /etc/apt usually requires root")
    )]
    FileWrite {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("The repository is already configured")]
    #[diagnostic(
        code(rapt_sources::duplicate),
        help("An entry with the same URI, distribution, components and options exists")
    )]
    DuplicateRepository,

    #[error(transparent)]
    #[diagnostic(code(rapt_sources::filesystem))]
    FileSystem(#[from] rapt_utils::error::FileSystemError),

    #[error(transparent)]
    #[diagnostic(code(rapt_sources::lock))]
    Lock(#[from] rapt_utils::error::LockError),
}

pub type Result<T> = std::result::Result<T, SourcesError>;
