pub mod expand;
pub mod merge;
pub mod schema;

pub use schema::*;

use crate::cli::Cli;
use anyhow::Context;
use std::path::{Path, PathBuf};

/// Load configuration by merging CLI, explicit file, and global sources.
/// Precedence: CLI > --config file > global config > defaults.
///
/// Missing config files are handled gracefully (defaults apply).
pub fn load_config(cli: &Cli) -> anyhow::Result<AppConfig> {
    // Layer 1: Global config (~/.config/bashgate/bashgate.toml or platform equivalent)
    let global = load_global_config();

    // Layer 2: Explicit config file from --config.
    let explicit = match &cli.config {
        Some(path) => load_toml_file(path).unwrap_or_default(),
        None => PartialConfig::default(),
    };

    // Layer 3: CLI args (converted to PartialConfig)
    let cli_partial = cli_to_partial(cli);

    // Merge: CLI > explicit file > global > defaults
    let config = cli_partial
        .with_fallback(explicit)
        .with_fallback(global)
        .finalize();

    Ok(config)
}

/// Load global config from the platform-specific config directory.
/// Returns empty PartialConfig if file not found.
fn load_global_config() -> PartialConfig {
    match global_config_path() {
        Some(p) => load_toml_file(&p).unwrap_or_default(),
        None => {
            tracing::debug!("Could not determine global config directory");
            PartialConfig::default()
        }
    }
}

/// Load and parse a TOML config file into a PartialConfig.
/// Returns None on file-not-found; logs and returns None on parse errors.
fn load_toml_file(path: &Path) -> Option<PartialConfig> {
    match std::fs::read_to_string(path) {
        Ok(contents) => {
            match toml::from_str::<ConfigFile>(&contents)
                .context(format!("Failed to parse {}", path.display()))
            {
                Ok(config_file) => {
                    tracing::info!("Loaded config from {}", path.display());
                    Some(config_file.to_partial())
                }
                Err(e) => {
                    tracing::warn!("Config parse error: {:#}", e);
                    None
                }
            }
        }
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            tracing::debug!("No config file at {}, using defaults", path.display());
            None
        }
        Err(e) => {
            tracing::warn!("Failed to read config at {}: {}", path.display(), e);
            None
        }
    }
}

/// Resolve the platform-specific global config path.
/// Linux: ~/.config/bashgate/bashgate.toml
/// Windows: %APPDATA%\bashgate\config\bashgate.toml
fn global_config_path() -> Option<PathBuf> {
    directories::ProjectDirs::from("", "", "bashgate")
        .map(|dirs| dirs.config_dir().join("bashgate.toml"))
}

/// Convert CLI arguments to a PartialConfig for merging.
fn cli_to_partial(cli: &Cli) -> PartialConfig {
    PartialConfig {
        shell: cli.shell.clone(),
        shell_timeout_secs: cli.timeout(),
        security_log_path: cli.security_log.clone(),
        ..Default::default()
    }
}
