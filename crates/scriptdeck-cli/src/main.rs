//! Scriptdeck CLI
//!
//! Thin orchestrator over the session engine: load the config, open the
//! host session, load the function script, run declared actions, and
//! render the normalized results as text. This binary stands in for the
//! desktop front-end, which owns no logic beyond what lives here.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

mod commands;
mod render;

#[derive(Debug, Parser)]
#[command(name = "scriptdeck")]
#[command(about = "Run named script functions and view normalized results", long_about = None)]
struct Cli {
    /// Path to the configuration file
    #[arg(short, long, default_value = "config.json", global = true)]
    config: PathBuf,

    /// PowerShell executable to use as the host
    #[arg(long, default_value = "pwsh", global = true)]
    shell: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// List the actions declared by the configuration
    Actions,
    /// Open the session and load the function script, reporting diagnostics
    Check,
    /// Run one declared action
    Run(commands::run::RunArgs),
}

#[tokio::main]
async fn main() {
    scriptdeck_core::logging_facility::init(scriptdeck_core::logging_facility::Profile::Development);

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Actions => commands::actions::execute(&cli.config),
        Commands::Check => commands::check::execute(&cli.config, &cli.shell).await,
        Commands::Run(args) => commands::run::execute(&cli.config, &cli.shell, args).await,
    };

    if let Err(e) = result {
        eprintln!("Error: {:#}", e);
        std::process::exit(1);
    }
}
