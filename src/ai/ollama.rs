// file: src/ai/ollama.rs
// version: 1.1.0
// guid: d93c6b50-4a18-47e2-8f05-c27e9d1b3a84

//! Client for a locally hosted Ollama server

use crate::{GcliError, Result};
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::debug;

#[cfg(test)]
use std::sync::{Mutex, OnceLock};

/// Default Ollama endpoint
pub const DEFAULT_OLLAMA_URL: &str = "http://localhost:11434";

const LIVENESS_TIMEOUT: Duration = Duration::from_secs(5);
const GENERATE_TIMEOUT: Duration = Duration::from_secs(30);

#[cfg(test)]
#[derive(Default)]
struct MockResponses {
    is_running: Option<bool>,
    list_models: Option<Result<Vec<String>>>,
    generate: Option<Result<String>>,
}

#[cfg(test)]
static MOCK_RESPONSES: OnceLock<Mutex<MockResponses>> = OnceLock::new();

#[cfg(test)]
fn mock_storage() -> &'static Mutex<MockResponses> {
    MOCK_RESPONSES.get_or_init(|| Mutex::new(MockResponses::default()))
}

#[cfg(test)]
fn take_mock_is_running() -> Option<bool> {
    mock_storage().lock().unwrap().is_running.take()
}

#[cfg(test)]
fn take_mock_list_models() -> Option<Result<Vec<String>>> {
    mock_storage().lock().unwrap().list_models.take()
}

#[cfg(test)]
fn take_mock_generate() -> Option<Result<String>> {
    mock_storage().lock().unwrap().generate.take()
}

#[cfg(test)]
pub(crate) fn set_mock_is_running(value: bool) {
    mock_storage().lock().unwrap().is_running = Some(value);
}

#[cfg(test)]
pub(crate) fn set_mock_list_models(result: Result<Vec<String>>) {
    mock_storage().lock().unwrap().list_models = Some(result);
}

#[cfg(test)]
pub(crate) fn set_mock_generate(result: Result<String>) {
    mock_storage().lock().unwrap().generate = Some(result);
}

#[derive(Serialize)]
struct GenerateRequest<'a> {
    model: &'a str,
    prompt: &'a str,
    stream: bool,
    options: GenerateOptions,
}

#[derive(Serialize)]
struct GenerateOptions {
    temperature: f32,
    top_p: f32,
    num_predict: u32,
}

#[derive(Deserialize)]
struct GenerateResponse {
    #[serde(default)]
    response: String,
}

#[derive(Deserialize)]
struct TagsResponse {
    #[serde(default)]
    models: Vec<ModelTag>,
}

#[derive(Deserialize)]
struct ModelTag {
    name: String,
}

/// Client for the Ollama HTTP API
pub struct OllamaClient {
    client: Option<reqwest::Client>,
    base_url: String,
}

impl OllamaClient {
    /// Create a client for the default local endpoint
    pub fn new() -> Self {
        Self::with_base_url(DEFAULT_OLLAMA_URL)
    }

    /// Create a client for a non-default endpoint
    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        #[cfg(test)]
        {
            Self {
                client: None,
                base_url: base_url.into(),
            }
        }

        #[cfg(not(test))]
        {
            Self {
                client: Some(reqwest::Client::new()),
                base_url: base_url.into(),
            }
        }
    }

    fn client(&self) -> &reqwest::Client {
        self.client
            .as_ref()
            .expect("reqwest client available outside tests")
    }

    /// Whether the server responds on its tags endpoint
    pub async fn is_running(&self) -> bool {
        #[cfg(test)]
        if let Some(mock) = take_mock_is_running() {
            return mock;
        }

        match self
            .client()
            .get(format!("{}/api/tags", self.base_url))
            .timeout(LIVENESS_TIMEOUT)
            .send()
            .await
        {
            Ok(response) => response.status().is_success(),
            Err(_) => false,
        }
    }

    /// Names of the models installed on the server
    pub async fn list_models(&self) -> Result<Vec<String>> {
        #[cfg(test)]
        if let Some(mock) = take_mock_list_models() {
            return mock;
        }

        let response = self
            .client()
            .get(format!("{}/api/tags", self.base_url))
            .timeout(LIVENESS_TIMEOUT)
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(GcliError::model(format!(
                "model server returned status {}",
                response.status()
            )));
        }

        let tags: TagsResponse = response.json().await?;
        Ok(tags.models.into_iter().map(|m| m.name).collect())
    }

    /// Run a single non-streaming generation
    pub async fn generate(&self, model: &str, prompt: &str) -> Result<String> {
        #[cfg(test)]
        if let Some(mock) = take_mock_generate() {
            return mock;
        }

        debug!("Generating with model {}", model);

        let body = GenerateRequest {
            model,
            prompt,
            stream: false,
            options: GenerateOptions {
                temperature: 0.3,
                top_p: 0.9,
                num_predict: 50,
            },
        };

        let response = self
            .client()
            .post(format!("{}/api/generate", self.base_url))
            .timeout(GENERATE_TIMEOUT)
            .json(&body)
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(GcliError::model(format!(
                "generation failed with status {}",
                response.status()
            )));
        }

        let generated: GenerateResponse = response.json().await?;
        Ok(generated.response.trim().to_string())
    }
}

impl Default for OllamaClient {
    fn default() -> Self {
        Self::new()
    }
}
