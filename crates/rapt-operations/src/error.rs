use miette::Diagnostic;
use thiserror::Error;

#[derive(Error, Diagnostic, Debug)]
pub enum OpsError {
    #[error("Invalid package with empty name")]
    #[diagnostic(
        code(rapt_operations::empty_name),
        help("Every target package must have a non-empty name")
    )]
    EmptyPackageName,

    #[error("Failed to invoke `{command}`: {source}")]
    #[diagnostic(
        code(rapt_operations::invoke),
        help("Check that the tool is installed and on PATH")
    )]
    ToolInvoke {
        command: String,
        #[source]
        source: std::io::Error,
    },

    #[error("`{command}` failed: {output}")]
    #[diagnostic(code(rapt_operations::tool_failed))]
    ToolFailed { command: String, output: String },

    #[error(transparent)]
    #[diagnostic(code(rapt_operations::filesystem))]
    FileSystem(#[from] rapt_utils::error::FileSystemError),
}

pub type Result<T> = std::result::Result<T, OpsError>;
