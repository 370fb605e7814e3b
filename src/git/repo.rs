// file: src/git/repo.rs
// version: 1.3.0
// guid: c81f4a26-3e09-4d57-b8a3-1f72d6e0c5b9

//! Subprocess wrappers around the `git` binary
//!
//! Failures carry the subcommand and captured stderr.

use crate::{GcliError, Result};
use std::process::Output;
use tokio::process::Command;
use tracing::debug;

/// Git operations against the current working directory
pub struct GitRepo;

impl GitRepo {
    async fn run(args: &[&str]) -> Result<Output> {
        debug!("git {}", args.join(" "));
        Command::new("git")
            .args(args)
            .output()
            .await
            .map_err(|e| GcliError::git(format!("failed to run git {}: {}", args.join(" "), e)))
    }

    async fn run_checked(args: &[&str]) -> Result<String> {
        let output = Self::run(args).await?;
        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(GcliError::git(format!(
                "git {} failed: {}",
                args.join(" "),
                stderr.trim()
            )));
        }
        Ok(String::from_utf8_lossy(&output.stdout).into_owned())
    }

    /// Whether the current directory is inside a git work tree
    pub async fn is_work_tree() -> bool {
        match Self::run(&["rev-parse", "--is-inside-work-tree"]).await {
            Ok(output) => {
                output.status.success()
                    && String::from_utf8_lossy(&output.stdout).trim() == "true"
            }
            Err(_) => false,
        }
    }

    /// Initialize a repository in the current directory
    pub async fn init() -> Result<()> {
        Self::run_checked(&["init"]).await?;
        Ok(())
    }

    /// URL of the named remote, `None` when it is not configured
    pub async fn remote_url(name: &str) -> Result<Option<String>> {
        let output = Self::run(&["remote", "get-url", name]).await?;
        if output.status.success() {
            Ok(Some(String::from_utf8_lossy(&output.stdout).trim().to_string()))
        } else {
            Ok(None)
        }
    }

    /// Add a remote
    pub async fn add_remote(name: &str, url: &str) -> Result<()> {
        Self::run_checked(&["remote", "add", name, url]).await?;
        Ok(())
    }

    /// Change the URL of an existing remote
    pub async fn set_remote_url(name: &str, url: &str) -> Result<()> {
        Self::run_checked(&["remote", "set-url", name, url]).await?;
        Ok(())
    }

    /// Stage everything under the current directory
    pub async fn stage_all() -> Result<()> {
        Self::run_checked(&["add", "."]).await?;
        Ok(())
    }

    /// Whether the index differs from HEAD
    pub async fn has_staged_changes() -> Result<bool> {
        // `diff --staged --quiet` exits 1 when there are staged changes
        let output = Self::run(&["diff", "--staged", "--quiet"]).await?;
        match output.status.code() {
            Some(0) => Ok(false),
            Some(1) => Ok(true),
            _ => Err(GcliError::git(format!(
                "git diff --staged failed: {}",
                String::from_utf8_lossy(&output.stderr).trim()
            ))),
        }
    }

    /// Collect the diff to describe in a commit message: staged changes
    /// when present, otherwise unstaged changes, otherwise the last
    /// commit's diff. `None` when no diff is found anywhere.
    pub async fn collect_diff() -> Result<Option<String>> {
        if Self::has_staged_changes().await? {
            let diff = Self::run_checked(&["diff", "--staged"]).await?;
            return Ok(non_empty(diff));
        }

        let unstaged = Self::run_checked(&["diff"]).await?;
        if let Some(diff) = non_empty(unstaged) {
            return Ok(Some(diff));
        }

        // Fresh checkout with a clean tree: describe the last commit.
        match Self::run(&["diff", "HEAD~1"]).await {
            Ok(output) if output.status.success() => {
                Ok(non_empty(String::from_utf8_lossy(&output.stdout).into_owned()))
            }
            _ => Ok(None),
        }
    }

    /// Record a commit with the given message
    pub async fn commit(message: &str) -> Result<()> {
        Self::run_checked(&["commit", "-m", message]).await?;
        Ok(())
    }

    /// Name of the currently checked-out branch
    pub async fn current_branch() -> Result<String> {
        let branch = Self::run_checked(&["rev-parse", "--abbrev-ref", "HEAD"]).await?;
        Ok(branch.trim().to_string())
    }

    /// Push a branch to a remote
    pub async fn push(remote: &str, branch: &str) -> Result<()> {
        Self::run_checked(&["push", remote, branch]).await?;
        Ok(())
    }

    /// Machine-readable status, `None` when not inside a repository
    pub async fn porcelain_status() -> Result<Option<String>> {
        if !Self::is_work_tree().await {
            return Ok(None);
        }
        Ok(Some(Self::run_checked(&["status", "--porcelain"]).await?))
    }
}

fn non_empty(s: String) -> Option<String> {
    if s.trim().is_empty() {
        None
    } else {
        Some(s)
    }
}

/// Count the entries in `git status --porcelain` output
pub fn count_porcelain_entries(porcelain: &str) -> usize {
    porcelain.lines().filter(|line| !line.trim().is_empty()).count()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_count_porcelain_entries() {
        let porcelain = " M src/main.rs\n?? notes.txt\nA  src/new.rs\n";
        assert_eq!(count_porcelain_entries(porcelain), 3);
    }

    #[test]
    fn test_count_porcelain_entries_clean() {
        assert_eq!(count_porcelain_entries(""), 0);
        assert_eq!(count_porcelain_entries("\n\n"), 0);
    }

    #[test]
    fn test_non_empty() {
        assert_eq!(non_empty("  \n".to_string()), None);
        assert_eq!(non_empty("diff".to_string()).as_deref(), Some("diff"));
    }
}
