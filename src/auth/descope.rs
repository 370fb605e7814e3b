// file: src/auth/descope.rs
// version: 1.2.0
// guid: 84d2f0a9-6b37-4c15-9e82-d50c7b1a3f48

//! Descope REST client for the email OTP and magic-link flows
//!
//! Only the public sign-in endpoints are used; authorization is a bearer
//! token carrying the project id (optionally suffixed with the management
//! key). The verification response is kept as loose JSON so the GitHub
//! OAuth token can be dug out of whichever attribute the tenant stores
//! it under.

use crate::{GcliError, Result};
use serde::Deserialize;
use serde_json::{json, Value};
use tracing::debug;

const DESCOPE_BASE_URL: &str = "https://api.descope.com";

/// Client for the Descope authentication REST API
pub struct DescopeClient {
    client: reqwest::Client,
    base_url: String,
    project_id: String,
    management_key: Option<String>,
}

impl DescopeClient {
    /// Create a client for the given project
    pub fn new(project_id: impl Into<String>, management_key: Option<String>) -> Self {
        Self::with_base_url(DESCOPE_BASE_URL, project_id, management_key)
    }

    /// Create a client against a non-default endpoint (used by tests)
    pub fn with_base_url(
        base_url: impl Into<String>,
        project_id: impl Into<String>,
        management_key: Option<String>,
    ) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: base_url.into(),
            project_id: project_id.into(),
            management_key,
        }
    }

    fn bearer(&self) -> String {
        match &self.management_key {
            Some(key) => format!("{}:{}", self.project_id, key),
            None => self.project_id.clone(),
        }
    }

    async fn post(&self, path: &str, body: Value) -> Result<reqwest::Response> {
        let url = format!("{}{}", self.base_url, path);
        debug!("POST {}", url);
        let response = self
            .client
            .post(&url)
            .bearer_auth(self.bearer())
            .json(&body)
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let detail = response.text().await.unwrap_or_default();
            return Err(GcliError::auth(format!(
                "Descope request {} failed with status {}: {}",
                path, status, detail
            )));
        }
        Ok(response)
    }

    /// Send a one-time password to the given email address
    pub async fn send_otp(&self, email: &str) -> Result<()> {
        self.post("/v1/auth/otp/signin/email", json!({ "loginId": email }))
            .await?;
        Ok(())
    }

    /// Verify an OTP code and return the resulting session
    pub async fn verify_otp(&self, email: &str, code: &str) -> Result<VerifyResponse> {
        let response = self
            .post(
                "/v1/auth/otp/verify/email",
                json!({ "loginId": email, "code": code }),
            )
            .await?;
        Ok(response.json().await?)
    }

    /// Send a magic link that redirects to the given URI after sign-in
    pub async fn send_magic_link(&self, email: &str, redirect_url: &str) -> Result<()> {
        self.post(
            "/v1/auth/magiclink/signin/email",
            json!({ "loginId": email, "redirectUrl": redirect_url }),
        )
        .await?;
        Ok(())
    }
}

/// Session data returned by a successful OTP verification
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VerifyResponse {
    /// Short-lived session JWT
    pub session_jwt: String,
    /// Refresh JWT, when the tenant issues one
    #[serde(default)]
    pub refresh_jwt: Option<String>,
    /// User record, shape depends on tenant configuration
    #[serde(default)]
    pub user: Option<Value>,
}

impl VerifyResponse {
    /// Extract a GitHub OAuth access token from the session data, if the
    /// tenant's GitHub integration stored one on the user record.
    pub fn github_token(&self) -> Option<String> {
        let user = self.user.as_ref()?;

        if let Some(attrs) = user.get("customAttributes") {
            if let Some(token) = attrs.get("github_token").and_then(Value::as_str) {
                return Some(token.to_string());
            }
            if let Some(token) = attrs
                .pointer("/oauth_tokens/github/access_token")
                .and_then(Value::as_str)
            {
                return Some(token.to_string());
            }
        }

        if let Some(providers) = user.get("oauth").and_then(Value::as_object) {
            for (name, data) in providers {
                if name.eq_ignore_ascii_case("github") {
                    if let Some(token) = data.get("access_token").and_then(Value::as_str) {
                        return Some(token.to_string());
                    }
                }
            }
        }

        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn response_with_user(user: Value) -> VerifyResponse {
        VerifyResponse {
            session_jwt: "jwt".to_string(),
            refresh_jwt: None,
            user: Some(user),
        }
    }

    #[test]
    fn test_token_from_custom_attribute() {
        let response = response_with_user(json!({
            "customAttributes": { "github_token": "ghp_abc123" }
        }));
        assert_eq!(response.github_token().as_deref(), Some("ghp_abc123"));
    }

    #[test]
    fn test_token_from_oauth_tokens_attribute() {
        let response = response_with_user(json!({
            "customAttributes": {
                "oauth_tokens": { "github": { "access_token": "ghp_def456" } }
            }
        }));
        assert_eq!(response.github_token().as_deref(), Some("ghp_def456"));
    }

    #[test]
    fn test_token_from_oauth_provider_block() {
        let response = response_with_user(json!({
            "oauth": { "GitHub": { "access_token": "gho_xyz789" } }
        }));
        assert_eq!(response.github_token().as_deref(), Some("gho_xyz789"));
    }

    #[test]
    fn test_no_token_in_session() {
        let response = response_with_user(json!({
            "customAttributes": {},
            "oauth": { "google": { "access_token": "ya29.abc" } }
        }));
        assert!(response.github_token().is_none());
    }

    #[test]
    fn test_verify_response_deserialization() {
        let raw = json!({
            "sessionJwt": "header.payload.sig",
            "refreshJwt": "refresh.payload.sig",
            "user": { "email": "dev@example.com" }
        });
        let response: VerifyResponse = serde_json::from_value(raw).unwrap();
        assert_eq!(response.session_jwt, "header.payload.sig");
        assert!(response.refresh_jwt.is_some());
    }
}
