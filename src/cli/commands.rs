// file: src/cli/commands.rs
// version: 1.4.0
// guid: 6f1c8e25-a940-4b7d-83f2-d09b5c6a41e8

//! Command implementations for the CLI

use crate::{
    ai::{message, OllamaClient},
    auth::DescopeClient,
    config::ConfigStore,
    git::{repo::count_porcelain_entries, GitRepo},
    github::GithubClient,
    utils::prompt::{prompt_hidden, prompt_line},
    GcliError, Result,
};
use colored::Colorize;
use tracing::{debug, info, warn};
use url::Url;

const MAGIC_LINK_REDIRECT: &str = "http://localhost:3000/auth/callback";

/// Authenticate with the identity provider and GitHub
pub async fn auth_command(email: Option<String>, force: bool) -> Result<()> {
    let mut store = ConfigStore::open_default()?;

    if !force && store.has_session() {
        if let Some(user_email) = &store.config.user_email {
            println!("Already authenticated as: {}", user_email);
        }
        ensure_github(&mut store).await?;
        return Ok(());
    }

    let email = match email {
        Some(email) => email,
        None => prompt_line("Enter your email address: ")?,
    };
    if email.is_empty() {
        return Err(GcliError::invalid_argument("an email address is required"));
    }

    let descope = descope_from_config(&store)?;

    println!("Authentication for {}", email);
    println!("Choose authentication method:");
    println!("  1. Magic link (email)");
    println!("  2. OTP (email)");
    let choice = prompt_line("Enter choice (1 or 2): ")?;

    match choice.as_str() {
        "1" => authenticate_magic_link(&mut store, &descope, &email).await,
        "2" => authenticate_otp(&mut store, &descope, &email).await,
        _ => Err(GcliError::invalid_argument("invalid choice, expected 1 or 2")),
    }
}

async fn authenticate_magic_link(
    store: &mut ConfigStore,
    descope: &DescopeClient,
    email: &str,
) -> Result<()> {
    descope.send_magic_link(email, MAGIC_LINK_REDIRECT).await?;
    println!("Magic link sent to {}", email);
    println!("Check your email and complete the sign-in in the browser.");

    // Without a local callback server the session has to be pasted back.
    let session_token = prompt_line("Paste the session token from the redirect page: ")?;
    if session_token.is_empty() {
        return Err(GcliError::auth("no session token provided"));
    }

    store.config.descope_session_token = Some(session_token);
    store.config.user_email = Some(email.to_string());
    store.save()?;
    println!("Identity authentication successful.");

    // The magic-link flow yields no session data to dig a GitHub token
    // out of; a stored token is revalidated before prompting for one.
    ensure_github(store).await?;
    Ok(())
}

async fn authenticate_otp(
    store: &mut ConfigStore,
    descope: &DescopeClient,
    email: &str,
) -> Result<()> {
    descope.send_otp(email).await?;
    println!("OTP sent to {}", email);

    let code = prompt_line("Enter the OTP code: ")?;
    if code.is_empty() {
        return Err(GcliError::auth("no OTP code provided"));
    }

    let verification = descope.verify_otp(email, &code).await?;
    store.config.descope_session_token = Some(verification.session_jwt.clone());
    store.config.user_email = Some(email.to_string());
    store.save()?;
    println!("Identity authentication successful.");

    if let Some(token) = verification.github_token() {
        info!("GitHub token found in the identity session");
        match connect_github(store, token).await {
            Ok((_, login)) => {
                println!("GitHub automatically connected as: {}", login);
                return Ok(());
            }
            Err(e) => warn!("Could not connect with the extracted token: {}", e),
        }
    } else {
        info!("No GitHub token in the session; configure the GitHub OAuth integration to skip manual entry");
    }

    ensure_github(store).await?;
    Ok(())
}

/// Set configuration values
pub async fn config_command(
    project_id: Option<String>,
    management_key: Option<String>,
    model: Option<String>,
) -> Result<()> {
    if project_id.is_none() && management_key.is_none() && model.is_none() {
        return Err(GcliError::invalid_argument(
            "provide at least one of --project-id, --management-key or --model",
        ));
    }

    let mut store = ConfigStore::open_default()?;

    if let Some(id) = project_id {
        println!("Project ID set to: {}", id);
        store.config.descope_project_id = Some(id);
    }
    if let Some(key) = management_key {
        store.config.descope_management_key = Some(key);
        println!("Management key has been set.");
    }
    if let Some(model) = model {
        println!("Preferred model set to: {}", model);
        store.config.preferred_model = Some(model);
    }

    store.save()?;
    println!("Configuration saved to {}", store.path().display());
    Ok(())
}

/// Initialize a local and remote repository
pub async fn init_command(repo_name: &str, description: &str, private: bool) -> Result<()> {
    let mut store = ConfigStore::open_default()?;
    let client = ensure_github(&mut store).await?;
    let owner = store
        .config
        .github_username
        .clone()
        .ok_or_else(|| GcliError::auth("no GitHub username stored; run 'gcli auth'"))?;

    let full_name = format!("{}/{}", owner, repo_name);
    let repo = match client.get_repo(&full_name).await? {
        Some(repo) => {
            println!("Found existing repository: {}", repo.full_name);
            repo
        }
        None => {
            let repo = client.create_repo(repo_name, description, private).await?;
            println!("Created new repository: {}", repo.full_name);
            repo
        }
    };

    if GitRepo::is_work_tree().await {
        println!("Directory is already a git repository");
        if GitRepo::remote_url("origin").await?.is_none() {
            GitRepo::add_remote("origin", &repo.clone_url).await?;
            println!("Added remote origin: {}", repo.clone_url);
        }
    } else {
        GitRepo::init().await?;
        GitRepo::add_remote("origin", &repo.clone_url).await?;
        println!("Initialized git repository with origin: {}", repo.clone_url);
    }

    println!("Repository ready: {}", repo.html_url);
    Ok(())
}

/// Set or update the remote origin for the current repository
pub async fn set_origin_command(repo_url: &str) -> Result<()> {
    Url::parse(repo_url)
        .map_err(|e| GcliError::invalid_argument(format!("invalid repository URL: {}", e)))?;

    if !GitRepo::is_work_tree().await {
        return Err(GcliError::git(
            "this is not a git repository; run 'gcli init <repo-name>' first",
        ));
    }

    if GitRepo::remote_url("origin").await?.is_some() {
        GitRepo::set_remote_url("origin", repo_url).await?;
        println!("Updated remote origin to: {}", repo_url);
    } else {
        GitRepo::add_remote("origin", repo_url).await?;
        println!("Set remote origin to: {}", repo_url);
    }
    Ok(())
}

/// Commit and push changes, optionally drafting the message with the model
pub async fn commit_command(message: Option<String>, auto: bool, branch: &str) -> Result<()> {
    let mut store = ConfigStore::open_default()?;
    ensure_github(&mut store).await?;

    let message = if auto {
        let Some(diff) = GitRepo::collect_diff().await? else {
            println!("No changes detected to commit.");
            return Ok(());
        };

        let ollama = OllamaClient::new();
        let generated = message::draft_commit_message(&ollama, store.preferred_model(), &diff).await;
        println!("Generated commit message: {}", generated.bold());

        match prompt_line("Use this commit message? (y/n/edit): ")?.to_lowercase().as_str() {
            "n" => return Err(GcliError::cancelled("commit cancelled")),
            "edit" => {
                let edited = prompt_line(&format!("Edit message [{}]: ", generated))?;
                if edited.is_empty() {
                    generated
                } else {
                    edited
                }
            }
            _ => generated,
        }
    } else {
        message.ok_or_else(|| {
            GcliError::invalid_argument("a commit message is required unless --auto is given")
        })?
    };

    GitRepo::stage_all().await?;
    if !GitRepo::has_staged_changes().await? {
        println!("No changes to commit.");
        return Ok(());
    }

    GitRepo::commit(&message).await?;
    println!("Committed changes: {}", message);

    // The push targets the checked-out branch even when --branch differs.
    let current = GitRepo::current_branch().await?;
    if current != branch {
        debug!("Pushing current branch {} (requested: {})", current, branch);
    }
    GitRepo::push("origin", &current).await?;
    println!("Pushed to {} branch", current);
    Ok(())
}

/// Show current authentication and repository status
pub async fn status_command() -> Result<()> {
    let store = ConfigStore::open_default()?;

    println!("{}", "Status".bold());

    match &store.config.user_email {
        Some(email) => println!("{} Identity: authenticated as {}", "✓".green(), email),
        None => println!("{} Identity: not authenticated", "✗".red()),
    }

    match &store.config.github_username {
        Some(login) => println!("{} GitHub: connected as {}", "✓".green(), login),
        None => println!("{} GitHub: not connected", "✗".red()),
    }

    let ollama = OllamaClient::new();
    if ollama.is_running().await {
        let models = ollama.list_models().await.unwrap_or_default();
        println!(
            "{} Ollama: running ({} models available, preferred: {})",
            "✓".green(),
            models.len(),
            store.preferred_model()
        );
    } else {
        println!(
            "{} Ollama: not running (install from https://ollama.ai)",
            "✗".red()
        );
    }

    if which::which("git").is_err() {
        println!("{} Git: git binary not found in PATH", "✗".red());
        return Ok(());
    }

    match GitRepo::porcelain_status().await? {
        Some(porcelain) => {
            let uncommitted = count_porcelain_entries(&porcelain);
            if uncommitted > 0 {
                println!("{} Git: {} uncommitted files", "⚠".yellow(), uncommitted);
            } else {
                println!("{} Git: working directory clean", "✓".green());
            }
            match GitRepo::remote_url("origin").await? {
                Some(url) => println!("{} Remote origin: {}", "✓".green(), url),
                None => println!("{} No remote origin set", "⚠".yellow()),
            }
        }
        None => println!("{} Git: not in a git repository", "⚠".yellow()),
    }

    Ok(())
}

/// Show repository issues
pub async fn issue_command(repo_name: &str, limit: usize, labels: &[String]) -> Result<()> {
    let mut store = ConfigStore::open_default()?;
    let client = ensure_github(&mut store).await?;

    let issues = client.list_issues(repo_name, labels, limit).await?;
    if issues.is_empty() {
        println!("No open issues found.");
        return Ok(());
    }

    for issue in &issues {
        println!("#{}: {}", issue.number, issue.title.bold());
        println!(
            "  opened by {} on {}",
            issue.user.login,
            issue.created_at.format("%Y-%m-%d")
        );
        if !issue.labels.is_empty() {
            let names: Vec<&str> = issue.labels.iter().map(|l| l.name.as_str()).collect();
            println!("  labels: {}", names.join(", "));
        }
        println!("  {}\n", issue.html_url);
    }

    info!("Showed {} issues from {}", issues.len(), repo_name);
    Ok(())
}

fn descope_from_config(store: &ConfigStore) -> Result<DescopeClient> {
    let project_id = store.config.descope_project_id.clone().ok_or_else(|| {
        GcliError::config("Descope project ID is missing; set it with 'gcli config --project-id <id>'")
    })?;
    Ok(DescopeClient::new(
        project_id,
        store.config.descope_management_key.clone(),
    ))
}

/// Return a validated GitHub client, re-using the stored token when it
/// still works and prompting for a new one otherwise.
async fn ensure_github(store: &mut ConfigStore) -> Result<GithubClient> {
    if let Some(token) = store.config.github_token.clone() {
        let client = GithubClient::new(token);
        match client.authenticated_user().await {
            Ok(user) => {
                debug!("GitHub connected as: {}", user.login);
                return Ok(client);
            }
            Err(e) => warn!("Stored GitHub token is no longer valid: {}", e),
        }
    }
    setup_github_interactive(store).await
}

async fn setup_github_interactive(store: &mut ConfigStore) -> Result<GithubClient> {
    println!("GitHub token setup");
    println!("Create a personal access token at: https://github.com/settings/tokens");
    println!("Required scopes: repo, user");

    let token = prompt_hidden("Enter your GitHub token: ")?;
    if token.is_empty() {
        return Err(GcliError::auth("no GitHub token provided"));
    }
    let (client, login) = connect_github(store, token).await?;
    println!("GitHub connected as: {}", login);
    Ok(client)
}

async fn connect_github(store: &mut ConfigStore, token: String) -> Result<(GithubClient, String)> {
    let client = GithubClient::new(token.clone());
    let user = client.authenticated_user().await?;
    store.config.github_token = Some(token);
    store.config.github_username = Some(user.login.clone());
    store.save()?;
    Ok((client, user.login))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::github::client::set_mock_authenticated_user;
    use crate::github::models::GithubUser;
    use tempfile::TempDir;

    // A valid stored token must be reused without any interactive prompt;
    // this is the path the auth flows fall back to after a sign-in.
    #[tokio::test]
    async fn test_ensure_github_reuses_valid_stored_token() {
        let dir = TempDir::new().unwrap();
        let mut store = ConfigStore::open(dir.path().join("config.json")).unwrap();
        store.config.github_token = Some("ghp_stored".to_string());
        store.config.github_username = Some("octocat".to_string());
        store.save().unwrap();

        set_mock_authenticated_user(Ok(GithubUser {
            login: "octocat".to_string(),
            name: None,
            email: None,
        }));

        let result = ensure_github(&mut store).await;
        assert!(result.is_ok());
        assert_eq!(store.config.github_token.as_deref(), Some("ghp_stored"));
        assert_eq!(store.config.github_username.as_deref(), Some("octocat"));
    }
}
