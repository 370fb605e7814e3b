// file: src/github/client.rs
// version: 1.2.0
// guid: 2b9d5f18-c4a7-40e3-8b52-96f1d0a3c7e2

//! GitHub REST API client

use crate::{GcliError, Result};
use serde::de::DeserializeOwned;
use tracing::debug;

use super::models::{ApiErrorBody, CreateRepoRequest, GithubUser, Issue, Repository};

#[cfg(test)]
use std::sync::{Mutex, OnceLock};

#[cfg(test)]
#[derive(Default)]
struct MockResponses {
    authenticated_user: Option<Result<GithubUser>>,
}

#[cfg(test)]
static MOCK_RESPONSES: OnceLock<Mutex<MockResponses>> = OnceLock::new();

#[cfg(test)]
fn mock_storage() -> &'static Mutex<MockResponses> {
    MOCK_RESPONSES.get_or_init(|| Mutex::new(MockResponses::default()))
}

#[cfg(test)]
fn take_mock_authenticated_user() -> Option<Result<GithubUser>> {
    mock_storage().lock().unwrap().authenticated_user.take()
}

#[cfg(test)]
pub(crate) fn set_mock_authenticated_user(result: Result<GithubUser>) {
    mock_storage().lock().unwrap().authenticated_user = Some(result);
}

const GITHUB_API_URL: &str = "https://api.github.com";
const USER_AGENT: &str = concat!("gcli/", env!("CARGO_PKG_VERSION"));
const ACCEPT_HEADER: &str = "application/vnd.github+json";

/// Maximum page size accepted by the issues endpoint
const MAX_PER_PAGE: usize = 100;

/// Client for the subset of the GitHub REST API gcli uses
pub struct GithubClient {
    client: Option<reqwest::Client>,
    base_url: String,
    token: String,
}

impl GithubClient {
    /// Create a client authenticated with a personal access token
    pub fn new(token: impl Into<String>) -> Self {
        Self::with_base_url(GITHUB_API_URL, token)
    }

    /// Create a client against a non-default endpoint (used by tests)
    pub fn with_base_url(base_url: impl Into<String>, token: impl Into<String>) -> Self {
        #[cfg(test)]
        {
            Self {
                client: None,
                base_url: base_url.into(),
                token: token.into(),
            }
        }

        #[cfg(not(test))]
        {
            Self {
                client: Some(reqwest::Client::new()),
                base_url: base_url.into(),
                token: token.into(),
            }
        }
    }

    fn client(&self) -> &reqwest::Client {
        self.client
            .as_ref()
            .expect("reqwest client available outside tests")
    }

    fn request(&self, method: reqwest::Method, path: &str) -> reqwest::RequestBuilder {
        let url = format!("{}{}", self.base_url, path);
        debug!("{} {}", method, url);
        self.client()
            .request(method, url)
            .header("Authorization", format!("token {}", self.token))
            .header("Accept", ACCEPT_HEADER)
            .header("User-Agent", USER_AGENT)
    }

    async fn decode<T: DeserializeOwned>(response: reqwest::Response) -> Result<T> {
        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(Self::api_error(status, &body));
        }
        Ok(response.json().await?)
    }

    // Non-2xx responses become a typed error carrying the status and
    // GitHub's `message` field when the body parses.
    fn api_error(status: reqwest::StatusCode, body: &str) -> GcliError {
        let message = serde_json::from_str::<ApiErrorBody>(body)
            .ok()
            .and_then(|body| body.message)
            .unwrap_or_else(|| "no error details".to_string());
        GcliError::github_api(format!("{}: {}", status, message))
    }

    /// Fetch the authenticated user; also serves as token validation
    pub async fn authenticated_user(&self) -> Result<GithubUser> {
        #[cfg(test)]
        if let Some(mock) = take_mock_authenticated_user() {
            return mock;
        }

        let response = self.request(reqwest::Method::GET, "/user").send().await?;
        Self::decode(response).await
    }

    /// Fetch a repository by `owner/name`, returning `None` when it does
    /// not exist (or is not visible to the token).
    pub async fn get_repo(&self, full_name: &str) -> Result<Option<Repository>> {
        let response = self
            .request(reqwest::Method::GET, &format!("/repos/{}", full_name))
            .send()
            .await?;
        if response.status() == reqwest::StatusCode::NOT_FOUND {
            return Ok(None);
        }
        Ok(Some(Self::decode(response).await?))
    }

    /// Create a repository under the authenticated user
    pub async fn create_repo(
        &self,
        name: &str,
        description: &str,
        private: bool,
    ) -> Result<Repository> {
        let body = CreateRepoRequest {
            name: name.to_string(),
            description: description.to_string(),
            private,
            auto_init: true,
        };
        let response = self
            .request(reqwest::Method::POST, "/user/repos")
            .json(&body)
            .send()
            .await?;
        Self::decode(response).await
    }

    /// List up to `limit` open issues of `owner/repo`, optionally filtered
    /// by labels. Pull requests are filtered out.
    pub async fn list_issues(
        &self,
        full_name: &str,
        labels: &[String],
        limit: usize,
    ) -> Result<Vec<Issue>> {
        let per_page = limit.clamp(1, MAX_PER_PAGE).to_string();
        let mut request = self
            .request(reqwest::Method::GET, &format!("/repos/{}/issues", full_name))
            .query(&[("state", "open"), ("per_page", per_page.as_str())]);
        if !labels.is_empty() {
            request = request.query(&[("labels", labels.join(","))]);
        }

        let response = request.send().await?;
        let issues: Vec<Issue> = Self::decode(response).await?;
        Ok(issues
            .into_iter()
            .filter(|issue| !issue.is_pull_request())
            .take(limit)
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_api_error_carries_status_and_github_message() {
        let err = GithubClient::api_error(
            reqwest::StatusCode::NOT_FOUND,
            r#"{"message":"Not Found","documentation_url":"https://docs.github.com"}"#,
        );
        let text = err.to_string();
        assert!(text.contains("404"), "got: {}", text);
        assert!(text.contains("Not Found"), "got: {}", text);
    }

    #[test]
    fn test_api_error_with_unparseable_body() {
        let err = GithubClient::api_error(reqwest::StatusCode::BAD_GATEWAY, "<html>oops</html>");
        let text = err.to_string();
        assert!(text.contains("502"), "got: {}", text);
        assert!(text.contains("no error details"), "got: {}", text);
    }

    #[test]
    fn test_api_error_with_empty_message_field() {
        let err = GithubClient::api_error(reqwest::StatusCode::UNAUTHORIZED, r#"{"message":null}"#);
        let text = err.to_string();
        assert!(text.contains("401"), "got: {}", text);
        assert!(text.contains("no error details"), "got: {}", text);
    }
}
