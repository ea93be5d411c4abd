use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "bashgate", version, about = "Blocklist-gated shell execution for agent tool servers")]
pub struct Cli {
    /// Path to config file (overrides the global config)
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Shell executable to run commands with
    #[arg(long, global = true)]
    pub shell: Option<PathBuf>,

    /// Security log file for blocked commands
    #[arg(long, global = true)]
    pub security_log: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Check a command against the blocklist without executing it
    Check {
        /// The raw command line to classify
        command: String,
    },
    /// Execute a command through the safety pipeline
    Exec {
        /// The raw command line to execute
        command: String,

        /// Command timeout in seconds
        #[arg(long)]
        timeout: Option<u64>,
    },
    /// Print the blocked-command categories
    Rules,
    /// Report which shell would be used for execution
    Status,
}

impl Cli {
    /// The timeout override, if this invocation carries one.
    pub fn timeout(&self) -> Option<u64> {
        match &self.command {
            Commands::Exec { timeout, .. } => *timeout,
            _ => None,
        }
    }
}
