mod cli;
mod config;
mod error;
mod exec;
mod safety;

use clap::Parser;

use safety::SafetyLayer;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::WARN.into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = cli::Cli::parse();
    let config = config::load_config(&cli)?;

    match &cli.command {
        cli::Commands::Check { command } => {
            let layer = SafetyLayer::new(&config)?;
            match layer.check(command) {
                Some(blocked) => {
                    println!("{}", blocked.to_json());
                    std::process::exit(126);
                }
                None => {
                    println!("allowed");
                }
            }
        }
        cli::Commands::Exec { command, timeout } => {
            let layer = SafetyLayer::new(&config)?;
            tracing::info!(
                shell = %layer.shell().display(),
                timeout_secs = timeout.unwrap_or(config.shell_timeout_secs),
                "Executing command"
            );

            let result = match timeout {
                Some(secs) => layer.execute_with_timeout(command, *secs).await?,
                None => layer.execute(command).await?,
            };

            if !result.stdout.is_empty() {
                print!("{}", result.stdout);
            }
            if !result.stderr.is_empty() {
                eprint!("{}", result.stderr);
            }
            if result.timed_out {
                std::process::exit(124); // same convention as coreutils timeout(1)
            }
            std::process::exit(result.exit_code.unwrap_or(1));
        }
        cli::Commands::Rules => {
            println!(
                "Blocked command categories (use the dedicated file tools instead):\n\n{}",
                safety::defaults::blocklist_summary()
            );
        }
        cli::Commands::Status => {
            let shell = exec::find_shell(config.shell.as_deref(), &config.shell_search_paths);
            if shell.exists() {
                println!(
                    "Shell status: installed\n\nPath: {}\n\nReady to execute commands. Use `bashgate exec` to run one, or `bashgate rules` to see what is blocked.",
                    shell.display()
                );
            } else {
                println!("Shell status: not found\n\nNo shell at these locations:");
                for path in &config.shell_search_paths {
                    println!("  - {}", path.display());
                }
                println!(
                    "\nFalling back to `{}` on PATH. Install bash (on Windows: Git for Windows, https://git-scm.com/download/win) or set [shell].path in bashgate.toml.",
                    shell.display()
                );
            }
        }
    }

    Ok(())
}
