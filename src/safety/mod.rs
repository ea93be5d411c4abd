pub mod command_filter;
pub mod defaults;

use std::fs::OpenOptions;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::time::SystemTime;

use command_filter::{BlockedCommand, CommandFilter};

use crate::config::AppConfig;
use crate::error::GuardrailError;
use crate::exec::{execute_shell, find_shell, ExecResult};

/// Combined safety layer: checks commands against the blocklist and delegates
/// allowed commands to the shell executor with timeout enforcement.
///
/// This is the single entry point for all command execution. No code should
/// call [`execute_shell`] directly -- always go through `SafetyLayer::execute`.
pub struct SafetyLayer {
    command_filter: CommandFilter,
    shell: PathBuf,
    timeout_secs: u64,
    security_log_path: PathBuf,
}

impl SafetyLayer {
    /// Build a SafetyLayer from the resolved application configuration.
    ///
    /// Compiles the [`CommandFilter`] from `config.blocked_patterns` and
    /// `config.blocked_names`, and resolves the shell from the configured
    /// path / search list.
    pub fn new(config: &AppConfig) -> anyhow::Result<Self> {
        let command_filter = CommandFilter::new(&config.blocked_patterns, &config.blocked_names)
            .map_err(GuardrailError::InvalidPattern)?;

        let shell = find_shell(config.shell.as_deref(), &config.shell_search_paths);

        Ok(Self {
            command_filter,
            shell,
            timeout_secs: config.shell_timeout_secs,
            security_log_path: config.security_log_path.clone(),
        })
    }

    /// Check a command against the blocklist without executing anything.
    pub fn check(&self, command: &str) -> Option<BlockedCommand> {
        self.command_filter.check(command)
    }

    /// Error-typed variant of [`check`](Self::check) for callers that want
    /// `?` propagation instead of inspecting the verdict.
    pub fn ensure_allowed(&self, command: &str) -> Result<(), GuardrailError> {
        match self.command_filter.check(command) {
            Some(blocked) => Err(GuardrailError::CommandBlocked {
                command: blocked.command,
                reason: blocked.reason,
            }),
            None => Ok(()),
        }
    }

    /// Execute a shell command through the safety pipeline.
    ///
    /// 1. Check the command against the blocklist.
    /// 2. If blocked: log to the security file, return an [`ExecResult`] with
    ///    the blocked JSON in `stderr` and `exit_code` 126 ("cannot execute").
    /// 3. If allowed: delegate to [`execute_shell`] with the resolved shell
    ///    and timeout.
    pub async fn execute(&self, command: &str) -> anyhow::Result<ExecResult> {
        if let Some(blocked) = self.command_filter.check(command) {
            self.log_blocked_command(&blocked);

            // Return a structured result (not an error) so the caller gets JSON.
            return Ok(ExecResult {
                stdout: String::new(),
                stderr: blocked.to_json(),
                exit_code: Some(126), // standard "cannot execute" code
                timed_out: false,
            });
        }

        Ok(execute_shell(&self.shell, command, self.timeout_secs).await?)
    }

    /// Execute with a per-request timeout override.
    pub async fn execute_with_timeout(
        &self,
        command: &str,
        timeout_secs: u64,
    ) -> anyhow::Result<ExecResult> {
        if let Some(blocked) = self.command_filter.check(command) {
            self.log_blocked_command(&blocked);
            return Ok(ExecResult {
                stdout: String::new(),
                stderr: blocked.to_json(),
                exit_code: Some(126),
                timed_out: false,
            });
        }

        Ok(execute_shell(&self.shell, command, timeout_secs).await?)
    }

    /// The resolved shell path used for execution.
    pub fn shell(&self) -> &Path {
        &self.shell
    }

    /// Append a JSON line to the security log for a blocked command.
    ///
    /// Each entry is a single JSON line with timestamp, blocked flag, reason,
    /// and command. If the log file cannot be written, a warning is logged via
    /// tracing but the command check is not affected.
    fn log_blocked_command(&self, blocked: &BlockedCommand) {
        let timestamp = SystemTime::now()
            .duration_since(SystemTime::UNIX_EPOCH)
            .map(|d| d.as_secs())
            .unwrap_or(0);

        let log_entry = format!(
            "{{\"timestamp\":{},\"blocked\":true,\"reason\":{},\"command\":{}}}\n",
            timestamp,
            serde_json::to_string(&blocked.reason).unwrap_or_else(|_| "\"unknown\"".into()),
            serde_json::to_string(&blocked.command).unwrap_or_else(|_| "\"unknown\"".into()),
        );

        match OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.security_log_path)
        {
            Ok(mut file) => {
                if let Err(e) = file.write_all(log_entry.as_bytes()) {
                    tracing::warn!(
                        "Failed to write to security log at {}: {}",
                        self.security_log_path.display(),
                        e
                    );
                }
            }
            Err(e) => {
                tracing::warn!(
                    "Failed to open security log at {}: {}",
                    self.security_log_path.display(),
                    e
                );
            }
        }
    }
}
