//! Single entry point for running external tools.
//!
//! Every tool the service shells out to goes through [`run`], so failure
//! translation lives in exactly one place: a non-zero exit (or a failure to
//! launch) becomes a [`ToolError`] carrying the tool name and whatever the
//! process said on stderr.

use std::path::PathBuf;
use std::process::Stdio;

use thiserror::Error;
use tokio::process::Command;

use super::ToolCommand;

/// Failure of one external tool invocation.
///
/// `detail` holds the captured stderr, falling back to stdout when the tool
/// wrote its complaint there instead.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{tool} failed with exit code {code}: {detail}")]
pub struct ToolError {
    pub tool: &'static str,
    pub code: i32,
    pub detail: String,
}

/// Where the child's stdout goes. Stderr is always captured for diagnostics.
#[derive(Debug, Clone)]
pub enum OutputMode {
    /// Collect stdout and return it as a string.
    Capture,
    /// Stream stdout straight into a file.
    ToFile(PathBuf),
    /// Drop stdout; the tool writes its results elsewhere.
    Discard,
}

/// Run a tool to completion.
///
/// Returns the captured stdout, which is empty unless the mode is
/// [`OutputMode::Capture`].
pub async fn run(command: ToolCommand, mode: OutputMode) -> Result<String, ToolError> {
    let ToolCommand {
        tool,
        program,
        args,
    } = command;
    tracing::debug!(
        tool,
        program = %program.to_string_lossy(),
        ?args,
        "running external tool"
    );

    let mut cmd = Command::new(&program);
    cmd.args(&args).stdin(Stdio::null()).stderr(Stdio::piped());
    match &mode {
        OutputMode::Capture => {
            cmd.stdout(Stdio::piped());
        }
        OutputMode::ToFile(path) => {
            let file = std::fs::File::create(path)
                .map_err(|e| spawn_failure(tool, format!("cannot create output file: {e}")))?;
            cmd.stdout(Stdio::from(file));
        }
        OutputMode::Discard => {
            cmd.stdout(Stdio::null());
        }
    }

    let child = cmd
        .spawn()
        .map_err(|e| spawn_failure(tool, format!("failed to launch: {e}")))?;
    let output = child
        .wait_with_output()
        .await
        .map_err(|e| spawn_failure(tool, format!("failed to collect output: {e}")))?;

    let stdout = String::from_utf8_lossy(&output.stdout).into_owned();
    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr).into_owned();
        let detail = if stderr.trim().is_empty() {
            stdout
        } else {
            stderr
        };
        return Err(ToolError {
            tool,
            code: output.status.code().unwrap_or(-1),
            detail,
        });
    }
    Ok(stdout)
}

fn spawn_failure(tool: &'static str, detail: String) -> ToolError {
    ToolError {
        tool,
        code: -1,
        detail,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_includes_tool_and_stderr() {
        let err = ToolError {
            tool: "nucmer",
            code: 2,
            detail: "ERROR: could not parse reference".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "nucmer failed with exit code 2: ERROR: could not parse reference"
        );
    }
}
