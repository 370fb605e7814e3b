// file: src/github/models.rs
// version: 1.0.1
// guid: f47b2e80-1a59-4d3c-b926-70e5c8a1d4b3

//! Serde models for the GitHub REST API payloads we consume

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Authenticated user, from `GET /user`
#[derive(Debug, Clone, Deserialize)]
pub struct GithubUser {
    /// Login name
    pub login: String,
    /// Display name, when set on the profile
    #[serde(default)]
    pub name: Option<String>,
    /// Public email, when set on the profile
    #[serde(default)]
    pub email: Option<String>,
}

/// Repository, from `GET /repos/{owner}/{repo}` and `POST /user/repos`
#[derive(Debug, Clone, Deserialize)]
pub struct Repository {
    /// `owner/name` form
    pub full_name: String,
    /// HTTPS clone URL
    pub clone_url: String,
    /// Web URL
    pub html_url: String,
    /// Whether the repository is private
    pub private: bool,
    #[serde(default)]
    pub description: Option<String>,
}

/// Issue, from `GET /repos/{owner}/{repo}/issues`
#[derive(Debug, Clone, Deserialize)]
pub struct Issue {
    pub number: u64,
    pub title: String,
    /// Web URL
    pub html_url: String,
    /// Issue author
    pub user: IssueAuthor,
    #[serde(default)]
    pub labels: Vec<Label>,
    pub created_at: DateTime<Utc>,
    // The issues endpoint also returns pull requests; they carry this key.
    #[serde(default)]
    pub pull_request: Option<serde_json::Value>,
}

impl Issue {
    /// Whether this entry is actually a pull request
    pub fn is_pull_request(&self) -> bool {
        self.pull_request.is_some()
    }
}

/// Issue author
#[derive(Debug, Clone, Deserialize)]
pub struct IssueAuthor {
    pub login: String,
}

/// Issue label
#[derive(Debug, Clone, Deserialize)]
pub struct Label {
    pub name: String,
}

/// Body for `POST /user/repos`
#[derive(Debug, Clone, Serialize)]
pub struct CreateRepoRequest {
    pub name: String,
    pub description: String,
    pub private: bool,
    pub auto_init: bool,
}

/// Error body GitHub returns on non-2xx responses
#[derive(Debug, Clone, Deserialize)]
pub struct ApiErrorBody {
    #[serde(default)]
    pub message: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_repository_deserialization() {
        let raw = json!({
            "full_name": "octocat/hello-world",
            "clone_url": "https://github.com/octocat/hello-world.git",
            "html_url": "https://github.com/octocat/hello-world",
            "private": false,
            "description": "My first repo",
            "stargazers_count": 42
        });
        let repo: Repository = serde_json::from_value(raw).unwrap();
        assert_eq!(repo.full_name, "octocat/hello-world");
        assert!(!repo.private);
        assert_eq!(repo.description.as_deref(), Some("My first repo"));
    }

    #[test]
    fn test_issue_deserialization_and_pr_detection() {
        let issue: Issue = serde_json::from_value(json!({
            "number": 7,
            "title": "Crash on startup",
            "html_url": "https://github.com/octocat/hello-world/issues/7",
            "user": { "login": "reporter" },
            "labels": [{ "name": "bug" }],
            "created_at": "2024-05-01T12:30:00Z"
        }))
        .unwrap();
        assert!(!issue.is_pull_request());
        assert_eq!(issue.labels[0].name, "bug");

        let pr: Issue = serde_json::from_value(json!({
            "number": 8,
            "title": "Fix crash on startup",
            "html_url": "https://github.com/octocat/hello-world/pull/8",
            "user": { "login": "contributor" },
            "created_at": "2024-05-02T09:00:00Z",
            "pull_request": { "url": "https://api.github.com/..." }
        }))
        .unwrap();
        assert!(pr.is_pull_request());
    }

    #[test]
    fn test_create_repo_request_serialization() {
        let request = CreateRepoRequest {
            name: "new-repo".to_string(),
            description: String::new(),
            private: true,
            auto_init: true,
        };
        let value = serde_json::to_value(&request).unwrap();
        assert_eq!(value["name"], "new-repo");
        assert_eq!(value["private"], true);
        assert_eq!(value["auto_init"], true);
    }
}
