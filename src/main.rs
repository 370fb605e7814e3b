// file: src/main.rs
// version: 1.1.0
// guid: 48b0d6e2-7c15-4a93-bf68-e3a92d5c107f

//! gcli - Main entry point

use clap::Parser;
use gcli::{
    cli::{
        args::{Cli, Commands},
        commands::*,
    },
    logging::logger,
    Result,
};
use tokio::signal;
use tracing::warn;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    logger::init_logger(cli.verbose, cli.quiet)?;

    let command_future = async {
        match cli.command {
            Commands::Auth { email, force } => auth_command(email, force).await,
            Commands::Config {
                project_id,
                management_key,
                model,
            } => config_command(project_id, management_key, model).await,
            Commands::Init {
                repo_name,
                description,
                private,
            } => init_command(&repo_name, &description, private).await,
            Commands::SetOrigin { repo_url } => set_origin_command(&repo_url).await,
            Commands::Commit {
                message,
                auto,
                branch,
            } => commit_command(message, auto, &branch).await,
            Commands::Status => status_command().await,
            Commands::Issue {
                repo_name,
                limit,
                label,
            } => issue_command(&repo_name, limit, &label).await,
        }
    };

    // Run command with signal handling
    tokio::select! {
        result = command_future => result,
        _ = signal::ctrl_c() => {
            warn!("Interrupted by user");
            std::process::exit(130); // Standard exit code for Ctrl+C
        }
    }
}
