use super::schema::{AppConfig, PartialConfig};
use crate::exec::locate::default_search_paths;
use crate::safety::defaults::{default_blocked_names, default_pattern_rules};
use std::path::PathBuf;

impl PartialConfig {
    /// Merge self with a lower-priority fallback.
    /// Self's non-None values take precedence.
    /// For the blocklist tables: REPLACE semantics (if self has Some, use it entirely).
    pub fn with_fallback(self, fallback: PartialConfig) -> PartialConfig {
        PartialConfig {
            shell: self.shell.or(fallback.shell),
            shell_search_paths: self.shell_search_paths.or(fallback.shell_search_paths),
            shell_timeout_secs: self.shell_timeout_secs.or(fallback.shell_timeout_secs),
            blocked_patterns: self.blocked_patterns.or(fallback.blocked_patterns),
            blocked_names: self.blocked_names.or(fallback.blocked_names),
            security_log_path: self.security_log_path.or(fallback.security_log_path),
        }
    }

    /// Convert to AppConfig, filling any remaining gaps with defaults.
    pub fn finalize(self) -> AppConfig {
        AppConfig {
            shell: self.shell,
            shell_search_paths: self.shell_search_paths.unwrap_or_else(default_search_paths),
            shell_timeout_secs: self.shell_timeout_secs.unwrap_or(30),
            blocked_patterns: self.blocked_patterns.unwrap_or_else(default_pattern_rules),
            blocked_names: self.blocked_names.unwrap_or_else(default_blocked_names),
            security_log_path: self
                .security_log_path
                .unwrap_or_else(|| PathBuf::from("./security.log")),
        }
    }
}
