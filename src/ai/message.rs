// file: src/ai/message.rs
// version: 1.2.0
// guid: a06f3d82-59c1-4e74-b2a8-8d15c7e90f36

//! Commit message drafting: model generation with rule-based fallback

use super::fallback::generate_fallback_message;
use super::ollama::OllamaClient;
use crate::Result;
use indicatif::{ProgressBar, ProgressStyle};
use std::time::Duration;
use tracing::{info, warn};

/// Conventional Commits types accepted in generated output
pub const VALID_TYPES: [&str; 7] = ["feat", "fix", "docs", "style", "refactor", "test", "chore"];

/// Maximum length of an accepted `type: subject` line
pub const MAX_SUBJECT_LEN: usize = 72;

/// Maximum number of diff bytes embedded in the prompt
const MAX_DIFF_BYTES: usize = 1500;

/// Draft a commit message for the given diff: try the local model first,
/// fall back to rule-based analysis. Always produces a message.
pub async fn draft_commit_message(ollama: &OllamaClient, preferred_model: &str, diff: &str) -> String {
    match generate_with_model(ollama, preferred_model, diff).await {
        Ok(Some(message)) => return message,
        Ok(None) => info!("No usable model output, using rule-based analysis"),
        Err(e) => warn!("Local model unavailable ({}), using rule-based analysis", e),
    }
    generate_fallback_message(diff)
}

async fn generate_with_model(
    ollama: &OllamaClient,
    preferred_model: &str,
    diff: &str,
) -> Result<Option<String>> {
    if !ollama.is_running().await {
        info!("Ollama is not running; start it with 'ollama serve'");
        return Ok(None);
    }

    let available = ollama.list_models().await?;
    let Some(model) = choose_model(preferred_model, &available) else {
        warn!("No models installed; run 'ollama pull {}'", preferred_model);
        return Ok(None);
    };
    if model != preferred_model {
        info!("Model {} not found, using {} instead", preferred_model, model);
    }

    let prompt = build_prompt(diff);

    let spinner = ProgressBar::new_spinner();
    spinner.set_style(
        ProgressStyle::default_spinner()
            .template("{spinner:.green} {msg}")
            .unwrap(),
    );
    spinner.set_message(format!("Generating commit message with {}", model));
    spinner.enable_steady_tick(Duration::from_millis(100));

    let generated = ollama.generate(&model, &prompt).await;
    spinner.finish_and_clear();

    Ok(extract_conventional_line(&generated?))
}

/// Pick the model to use: the preferred one when a matching model is
/// installed (matching on the name before the `:` tag), otherwise the
/// first installed model, otherwise nothing.
pub fn choose_model(preferred: &str, available: &[String]) -> Option<String> {
    let matches_preferred = available.iter().any(|m| {
        let base = m.split(':').next().unwrap_or(m);
        preferred.starts_with(base)
    });
    if matches_preferred {
        Some(preferred.to_string())
    } else {
        available.first().cloned()
    }
}

fn build_prompt(diff: &str) -> String {
    format!(
        "Generate a concise git commit message for the following code changes.\n\
         Use conventional commit format (type: description).\n\
         Types: feat, fix, docs, style, refactor, test, chore.\n\
         Keep it under 50 characters.\n\n\
         Code changes:\n{}\n\nCommit message:",
        truncate_diff(diff)
    )
}

/// Truncate the diff to the prompt budget without splitting a character
pub fn truncate_diff(diff: &str) -> &str {
    if diff.len() <= MAX_DIFF_BYTES {
        return diff;
    }
    let mut end = MAX_DIFF_BYTES;
    while !diff.is_char_boundary(end) {
        end -= 1;
    }
    &diff[..end]
}

/// Find the first line of model output that is a valid Conventional
/// Commits message: a known type, a colon, and at most 72 characters
/// after trimming surrounding quotes and backticks.
pub fn extract_conventional_line(output: &str) -> Option<String> {
    for line in output.lines() {
        let clean = line.trim().trim_matches(|c| c == '"' || c == '\'' || c == '`');
        let Some((commit_type, _)) = clean.split_once(':') else {
            continue;
        };
        let commit_type = commit_type.trim().to_lowercase();
        if VALID_TYPES.contains(&commit_type.as_str()) && clean.chars().count() <= MAX_SUBJECT_LEN {
            return Some(clean.to_string());
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ai::ollama::{set_mock_generate, set_mock_is_running, set_mock_list_models};
    use std::sync::{Mutex, OnceLock};

    // Mock responses are process-global; serialize the tests that use them.
    fn mock_lock() -> &'static Mutex<()> {
        static LOCK: OnceLock<Mutex<()>> = OnceLock::new();
        LOCK.get_or_init(|| Mutex::new(()))
    }

    #[test]
    fn test_extract_valid_line() {
        let output = "Here is a suggestion:\nfeat: add OTP verification flow\nThanks!";
        assert_eq!(
            extract_conventional_line(output).as_deref(),
            Some("feat: add OTP verification flow")
        );
    }

    #[test]
    fn test_extract_strips_quotes_and_case() {
        let output = "\"Fix: handle empty diff\"";
        assert_eq!(
            extract_conventional_line(output).as_deref(),
            Some("Fix: handle empty diff")
        );
    }

    #[test]
    fn test_extract_rejects_unknown_type_and_long_lines() {
        assert!(extract_conventional_line("wip: stuff").is_none());
        let long = format!("feat: {}", "x".repeat(80));
        assert!(extract_conventional_line(&long).is_none());
        assert!(extract_conventional_line("no colon here").is_none());
    }

    #[test]
    fn test_truncate_diff_on_char_boundary() {
        let diff = "é".repeat(1000); // 2 bytes per char
        let truncated = truncate_diff(&diff);
        assert!(truncated.len() <= 1500);
        assert!(diff.starts_with(truncated));
    }

    #[test]
    fn test_truncate_diff_short_input_untouched() {
        let diff = "+short change\n";
        assert_eq!(truncate_diff(diff), diff);
    }

    #[test]
    fn test_choose_model_prefers_configured() {
        let available = vec!["llama3.2:1b".to_string(), "codellama:7b".to_string()];
        assert_eq!(
            choose_model("llama3.2:1b", &available).as_deref(),
            Some("llama3.2:1b")
        );
    }

    #[test]
    fn test_choose_model_substitutes_first_available() {
        let available = vec!["mistral:7b".to_string()];
        assert_eq!(choose_model("llama3.2:1b", &available).as_deref(), Some("mistral:7b"));
    }

    #[test]
    fn test_choose_model_none_installed() {
        assert!(choose_model("llama3.2:1b", &[]).is_none());
    }

    #[tokio::test]
    async fn test_draft_uses_model_output() {
        let _guard = mock_lock().lock().unwrap();
        set_mock_is_running(true);
        set_mock_list_models(Ok(vec!["llama3.2:1b".to_string()]));
        set_mock_generate(Ok("feat: wire up issue listing".to_string()));

        let client = OllamaClient::new();
        let message = draft_commit_message(&client, "llama3.2:1b", "+fn list_issues() {}\n").await;
        assert_eq!(message, "feat: wire up issue listing");
    }

    #[tokio::test]
    async fn test_draft_falls_back_when_server_down() {
        let _guard = mock_lock().lock().unwrap();
        set_mock_is_running(false);

        let client = OllamaClient::new();
        let message = draft_commit_message(&client, "llama3.2:1b", "+fn new_feature() {}\n").await;
        assert!(message.starts_with("feat:"), "got: {}", message);
    }

    #[tokio::test]
    async fn test_draft_falls_back_when_no_models_installed() {
        let _guard = mock_lock().lock().unwrap();
        set_mock_is_running(true);
        set_mock_list_models(Ok(vec![]));

        let client = OllamaClient::new();
        let message = draft_commit_message(&client, "llama3.2:1b", "+fn brand_new() {}\n").await;
        assert!(message.starts_with("feat:"), "got: {}", message);
    }

    #[tokio::test]
    async fn test_draft_falls_back_on_invalid_model_output() {
        let _guard = mock_lock().lock().unwrap();
        set_mock_is_running(true);
        set_mock_list_models(Ok(vec!["llama3.2:1b".to_string()]));
        set_mock_generate(Ok("I cannot determine a commit message.".to_string()));

        let client = OllamaClient::new();
        let message = draft_commit_message(&client, "llama3.2:1b", "--- a/README.md\n+++ b/README.md\n+docs\n").await;
        assert!(message.starts_with("docs:"), "got: {}", message);
    }
}
