use std::path::Path;
use std::process::Stdio;
use std::time::Duration;

use tokio::process::Command;
use tokio::time::timeout;

use crate::error::ExecError;

/// Result of a shell command execution.
#[derive(Debug, Clone, serde::Serialize)]
pub struct ExecResult {
    pub stdout: String,
    pub stderr: String,
    pub exit_code: Option<i32>,
    pub timed_out: bool,
}

/// Run a command line through `<shell> -c <command>` and capture its output.
///
/// The timeout is enforced with [`tokio::time::timeout`]; on expiry the
/// child is killed (`kill_on_drop`) and the result carries `timed_out = true`
/// with no exit code. Output is decoded lossily so non-UTF-8 bytes never
/// fail the request.
pub async fn execute_shell(
    shell: &Path,
    command: &str,
    timeout_secs: u64,
) -> Result<ExecResult, ExecError> {
    let child = Command::new(shell)
        .arg("-c")
        .arg(command)
        .stdin(Stdio::null())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .kill_on_drop(true)
        .spawn()
        .map_err(|e| ExecError::SpawnFailed(format!("{}: {e}", shell.display())))?;

    match timeout(Duration::from_secs(timeout_secs), child.wait_with_output()).await {
        Ok(Ok(output)) => Ok(ExecResult {
            stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
            stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
            exit_code: output.status.code(),
            timed_out: false,
        }),
        Ok(Err(e)) => Err(ExecError::ProcessFailed(e.to_string())),
        Err(_) => {
            // Dropping the wait future drops the child, which kills it.
            tracing::warn!(timeout_secs, command, "Command timed out");
            Ok(ExecResult {
                stdout: String::new(),
                stderr: format!("command timed out after {timeout_secs}s"),
                exit_code: None,
                timed_out: true,
            })
        }
    }
}
