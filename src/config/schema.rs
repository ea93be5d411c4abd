use serde::Deserialize;
use std::path::PathBuf;

/// The TOML file structure for bashgate.toml.
#[derive(Debug, Deserialize, Default)]
pub struct ConfigFile {
    pub shell: Option<ShellConfig>,
    pub safety: Option<SafetyConfig>,
}

#[derive(Debug, Deserialize)]
pub struct ShellConfig {
    /// Explicit shell path. Supports `~`, `$VAR`, `${VAR}`, and `%VAR%`.
    pub path: Option<String>,
    /// Probed in order when no explicit path is set (or it doesn't exist).
    pub search_paths: Option<Vec<String>>,
    pub timeout_secs: Option<u64>,
}

#[derive(Debug, Deserialize)]
pub struct SafetyConfig {
    pub security_log: Option<String>,
    /// If specified, fully replaces the default pattern table.
    /// Patterns are matched case-insensitively against the whole line.
    pub blocked_patterns: Option<Vec<PatternEntry>>,
    /// If specified, fully replaces the default name table.
    pub blocked_names: Option<Vec<NameEntry>>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct PatternEntry {
    pub pattern: String,
    pub reason: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct NameEntry {
    pub name: String,
    pub reason: String,
}

/// Fully-resolved runtime configuration. All fields have values (the two
/// `Option`s model "not configured", not "missing").
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub shell: Option<PathBuf>,
    pub shell_search_paths: Vec<PathBuf>,
    pub shell_timeout_secs: u64,
    pub blocked_patterns: Vec<(String, String)>,
    pub blocked_names: Vec<(String, String)>,
    pub security_log_path: PathBuf,
}

/// Partial config used during merge. All fields are Option so that
/// missing fields don't override lower-priority values.
#[derive(Debug, Clone, Default)]
pub struct PartialConfig {
    pub shell: Option<PathBuf>,
    pub shell_search_paths: Option<Vec<PathBuf>>,
    pub shell_timeout_secs: Option<u64>,
    pub blocked_patterns: Option<Vec<(String, String)>>,
    pub blocked_names: Option<Vec<(String, String)>>,
    pub security_log_path: Option<PathBuf>,
}

impl ConfigFile {
    /// Flatten the file structure into a PartialConfig, expanding environment
    /// variables in all path values.
    pub fn to_partial(&self) -> PartialConfig {
        let shell = self.shell.as_ref();
        let safety = self.safety.as_ref();

        PartialConfig {
            shell: shell
                .and_then(|s| s.path.as_deref())
                .map(super::expand::expand_env_vars)
                .map(PathBuf::from),
            shell_search_paths: shell.and_then(|s| s.search_paths.as_ref()).map(|paths| {
                paths
                    .iter()
                    .map(|p| PathBuf::from(super::expand::expand_env_vars(p)))
                    .collect()
            }),
            shell_timeout_secs: shell.and_then(|s| s.timeout_secs),
            blocked_patterns: safety.and_then(|s| s.blocked_patterns.as_ref()).map(|entries| {
                entries
                    .iter()
                    .map(|e| (e.pattern.clone(), e.reason.clone()))
                    .collect()
            }),
            blocked_names: safety.and_then(|s| s.blocked_names.as_ref()).map(|entries| {
                entries
                    .iter()
                    .map(|e| (e.name.clone(), e.reason.clone()))
                    .collect()
            }),
            security_log_path: safety
                .and_then(|s| s.security_log.as_deref())
                .map(super::expand::expand_env_vars)
                .map(PathBuf::from),
        }
    }
}
