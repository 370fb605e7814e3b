// file: src/cli/args.rs
// version: 1.1.0
// guid: e5a90c37-8b24-4f61-a8d5-20c7f4b9e1d3

//! Command line argument definitions

use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "gcli")]
#[command(about = "A CLI for GitHub with AI-powered commits")]
#[command(version = env!("CARGO_PKG_VERSION"))]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[arg(short, long, global = true)]
    pub quiet: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Authenticate with the identity provider and GitHub
    Auth {
        #[arg(long, help = "Email address for authentication")]
        email: Option<String>,

        #[arg(long, help = "Force re-authentication")]
        force: bool,
    },

    /// Set configuration values
    Config {
        #[arg(long, help = "Descope project ID")]
        project_id: Option<String>,

        #[arg(long, help = "Descope management key")]
        management_key: Option<String>,

        #[arg(long, help = "Preferred model for commit message generation")]
        model: Option<String>,
    },

    /// Initialize a local and remote repository
    Init {
        /// Name for the new repository
        repo_name: String,

        #[arg(short, long, default_value = "")]
        description: String,

        #[arg(long, help = "Create a private repository")]
        private: bool,
    },

    /// Set or update the remote origin for the current repository
    SetOrigin {
        /// Full URL of the remote repository
        repo_url: String,
    },

    /// Commit and push changes with an optional auto-generated message
    Commit {
        /// Commit message (optional with --auto)
        message: Option<String>,

        #[arg(long, help = "Generate the commit message with the local model")]
        auto: bool,

        #[arg(long, default_value = "main", help = "Branch to push to")]
        branch: String,
    },

    /// Show current authentication and repository status
    Status,

    /// Show repository issues
    Issue {
        /// Repository name in owner/repo form
        repo_name: String,

        #[arg(long, default_value = "10", help = "Number of issues to show")]
        limit: usize,

        #[arg(long, help = "Filter by label (repeatable)")]
        label: Vec<String>,
    },
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    #[test]
    fn test_parse_auth_with_email() {
        let cli = Cli::parse_from(["gcli", "auth", "--email", "dev@example.com", "--force"]);
        match cli.command {
            Commands::Auth { email, force } => {
                assert_eq!(email.as_deref(), Some("dev@example.com"));
                assert!(force);
            }
            _ => panic!("expected auth command"),
        }
    }

    #[test]
    fn test_parse_commit_auto() {
        let cli = Cli::parse_from(["gcli", "commit", "--auto"]);
        match cli.command {
            Commands::Commit { message, auto, branch } => {
                assert!(message.is_none());
                assert!(auto);
                assert_eq!(branch, "main");
            }
            _ => panic!("expected commit command"),
        }
    }

    #[test]
    fn test_parse_issue_with_repeated_labels() {
        let cli = Cli::parse_from([
            "gcli", "issue", "rust-lang/rust", "--limit", "5", "--label", "bug", "--label",
            "regression",
        ]);
        match cli.command {
            Commands::Issue { repo_name, limit, label } => {
                assert_eq!(repo_name, "rust-lang/rust");
                assert_eq!(limit, 5);
                assert_eq!(label, vec!["bug", "regression"]);
            }
            _ => panic!("expected issue command"),
        }
    }

    #[test]
    fn test_parse_set_origin_kebab_case() {
        let cli = Cli::parse_from(["gcli", "set-origin", "https://github.com/user/repo.git"]);
        assert!(matches!(cli.command, Commands::SetOrigin { .. }));
    }

    #[test]
    fn test_global_flags() {
        let cli = Cli::parse_from(["gcli", "status", "--verbose"]);
        assert!(cli.verbose);
        assert!(!cli.quiet);
    }
}
