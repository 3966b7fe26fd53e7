use std::process::Command;

use tracing::{debug, warn};

use crate::error::{OpsError, Result};

/// Render a command line for logs and error messages.
fn render(program: &str, args: &[String]) -> String {
    let mut line = program.to_string();
    for arg in args {
        line.push(' ');
        line.push_str(arg);
    }
    line
}

fn capture(program: &str, args: &[String], command: &str) -> Result<std::process::Output> {
    debug!(command = %command, "running tool");
    Command::new(program)
        .args(args)
        .output()
        .map_err(|err| OpsError::ToolInvoke {
            command: command.to_string(),
            source: err,
        })
}

/// Run a tool and capture stdout and stderr as one transcript.
///
/// apt-get spreads progress and errors across both streams; callers get
/// everything the tool printed, stdout first. A non-zero exit surfaces as
/// [`OpsError::ToolFailed`] carrying the transcript verbatim. Nothing is
/// retried.
pub(crate) fn run_combined<I, S>(program: &str, args: I) -> Result<String>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let args: Vec<String> = args.into_iter().map(|arg| arg.as_ref().to_owned()).collect();
    let command = render(program, &args);
    let output = capture(program, &args, &command)?;

    let mut transcript = String::from_utf8_lossy(&output.stdout).into_owned();
    transcript.push_str(&String::from_utf8_lossy(&output.stderr));

    if !output.status.success() {
        warn!(command = %command, code = ?output.status.code(), "tool failed");
        return Err(OpsError::ToolFailed {
            command,
            output: transcript,
        });
    }

    Ok(transcript)
}

/// Run a tool and return stdout only.
///
/// For tools whose stdout is machine-parsed while stderr carries noise
/// (`apt` warns about its unstable CLI there). On failure the error still
/// carries both streams for diagnostics.
pub(crate) fn run_stdout<I, S>(program: &str, args: I) -> Result<String>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let args: Vec<String> = args.into_iter().map(|arg| arg.as_ref().to_owned()).collect();
    let command = render(program, &args);
    let output = capture(program, &args, &command)?;

    if !output.status.success() {
        let mut transcript = String::from_utf8_lossy(&output.stdout).into_owned();
        transcript.push_str(&String::from_utf8_lossy(&output.stderr));
        warn!(command = %command, code = ?output.status.code(), "tool failed");
        return Err(OpsError::ToolFailed {
            command,
            output: transcript,
        });
    }

    Ok(String::from_utf8_lossy(&output.stdout).into_owned())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_run_combined_captures_both_streams() {
        let out = run_combined("sh", ["-c", "echo visible; echo noise >&2"]).unwrap();
        assert!(out.contains("visible"));
        assert!(out.contains("noise"));
    }

    #[test]
    fn test_run_stdout_drops_stderr() {
        let out = run_stdout("sh", ["-c", "echo visible; echo noise >&2"]).unwrap();
        assert_eq!(out, "visible\n");
    }

    #[test]
    fn test_nonzero_exit_carries_output() {
        let err = run_combined("sh", ["-c", "echo boom; exit 3"]).unwrap_err();
        match err {
            OpsError::ToolFailed { command, output } => {
                assert!(command.starts_with("sh -c"));
                assert!(output.contains("boom"));
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_missing_tool_is_invoke_error() {
        let err = run_combined("rapt-test-no-such-tool", Vec::<String>::new()).unwrap_err();
        assert!(matches!(err, OpsError::ToolInvoke { .. }));
    }
}
