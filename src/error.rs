/// Errors related to the command-safety guardrail.
#[derive(Debug, thiserror::Error)]
pub enum GuardrailError {
    #[error("Command blocked: `{command}` - {reason}")]
    CommandBlocked { command: String, reason: String },

    #[error("Invalid blocklist pattern: {0}")]
    InvalidPattern(#[from] regex::Error),
}

/// Errors related to shell command execution.
#[derive(Debug, thiserror::Error)]
pub enum ExecError {
    #[error("Failed to spawn shell process: {0}")]
    SpawnFailed(String),

    #[error("Process execution failed: {0}")]
    ProcessFailed(String),
}
