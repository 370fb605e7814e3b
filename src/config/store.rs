// file: src/config/store.rs
// version: 1.1.0
// guid: 7f25d9b3-48ac-41e0-8c76-2b91e0a4f5d8

//! JSON configuration record persisted in the per-user config directory

use crate::{GcliError, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::warn;

/// Model used for commit message generation when none is configured
pub const DEFAULT_MODEL: &str = "llama3.2:1b";

/// Environment variable overriding the config directory (used by tests)
pub const CONFIG_DIR_ENV: &str = "GCLI_CONFIG_DIR";

const CONFIG_DIR_NAME: &str = "github-cli";
const CONFIG_FILE_NAME: &str = "config.json";

/// Persisted configuration record. Every field is optional; the file is
/// created on the first write.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Descope project identifier
    #[serde(skip_serializing_if = "Option::is_none")]
    pub descope_project_id: Option<String>,
    /// Descope management key
    #[serde(skip_serializing_if = "Option::is_none")]
    pub descope_management_key: Option<String>,
    /// Session JWT from the last successful authentication
    #[serde(skip_serializing_if = "Option::is_none")]
    pub descope_session_token: Option<String>,
    /// Email address used for authentication
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_email: Option<String>,
    /// GitHub personal access token
    #[serde(skip_serializing_if = "Option::is_none")]
    pub github_token: Option<String>,
    /// GitHub login of the token owner
    #[serde(skip_serializing_if = "Option::is_none")]
    pub github_username: Option<String>,
    /// Preferred Ollama model for commit message generation
    #[serde(skip_serializing_if = "Option::is_none")]
    pub preferred_model: Option<String>,
}

/// Loads and persists the configuration record
pub struct ConfigStore {
    path: PathBuf,
    pub config: Config,
}

impl ConfigStore {
    /// Open the store at the default per-user location, creating the
    /// directory when missing. `GCLI_CONFIG_DIR` overrides the location.
    pub fn open_default() -> Result<Self> {
        let dir = match std::env::var_os(CONFIG_DIR_ENV) {
            Some(dir) => PathBuf::from(dir),
            None => dirs::config_dir()
                .ok_or_else(|| GcliError::config("could not determine the user config directory"))?
                .join(CONFIG_DIR_NAME),
        };
        Self::open(dir.join(CONFIG_FILE_NAME))
    }

    /// Open the store at an explicit path
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref().to_path_buf();
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        let config = Self::load(&path);
        Ok(Self { path, config })
    }

    // A corrupt or missing file never blocks startup.
    fn load(path: &Path) -> Config {
        match fs::read_to_string(path) {
            Ok(content) => match serde_json::from_str(&content) {
                Ok(config) => config,
                Err(e) => {
                    warn!("Could not parse config file {}: {}", path.display(), e);
                    Config::default()
                }
            },
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Config::default(),
            Err(e) => {
                warn!("Could not read config file {}: {}", path.display(), e);
                Config::default()
            }
        }
    }

    /// Persist the current configuration
    pub fn save(&self) -> Result<()> {
        let content = serde_json::to_string_pretty(&self.config)?;
        fs::write(&self.path, content)?;
        Ok(())
    }

    /// Path of the backing file
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Whether an identity session has been stored
    pub fn has_session(&self) -> bool {
        self.config.descope_session_token.is_some() && self.config.user_email.is_some()
    }

    /// Preferred model name, falling back to the default
    pub fn preferred_model(&self) -> &str {
        self.config.preferred_model.as_deref().unwrap_or(DEFAULT_MODEL)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_missing_file_yields_defaults() {
        let dir = TempDir::new().unwrap();
        let store = ConfigStore::open(dir.path().join("config.json")).unwrap();
        assert!(store.config.github_token.is_none());
        assert!(!store.has_session());
        assert_eq!(store.preferred_model(), DEFAULT_MODEL);
    }

    #[test]
    fn test_save_and_reload() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.json");

        let mut store = ConfigStore::open(&path).unwrap();
        store.config.user_email = Some("dev@example.com".to_string());
        store.config.descope_session_token = Some("jwt".to_string());
        store.config.preferred_model = Some("codellama:7b".to_string());
        store.save().unwrap();

        let reloaded = ConfigStore::open(&path).unwrap();
        assert_eq!(reloaded.config.user_email.as_deref(), Some("dev@example.com"));
        assert!(reloaded.has_session());
        assert_eq!(reloaded.preferred_model(), "codellama:7b");
    }

    #[test]
    fn test_corrupt_file_yields_defaults() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.json");
        fs::write(&path, "{ not json").unwrap();

        let store = ConfigStore::open(&path).unwrap();
        assert!(store.config.user_email.is_none());
    }

    #[test]
    fn test_unset_fields_not_serialized() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.json");

        let mut store = ConfigStore::open(&path).unwrap();
        store.config.github_username = Some("octocat".to_string());
        store.save().unwrap();

        let content = fs::read_to_string(&path).unwrap();
        assert!(content.contains("github_username"));
        assert!(!content.contains("descope_project_id"));
    }
}
