//! Natural-language fallback.
//!
//! Consulted only when the parser cannot find an intent. The service is
//! treated as untrusted text-in/text-out: whatever it suggests goes back
//! through the normal pipeline after the user confirms it.

use crate::config::TerminalConfig;
use crate::error::FallbackError;
use log::debug;
use regex::Regex;
use serde_json::json;
use std::sync::LazyLock;

/// Which suggestions are worth showing to the user at all.
pub struct SuggestionPolicy {
    pub allowed: &'static [&'static str],
    pub forbidden: &'static [&'static str],
}

impl Default for SuggestionPolicy {
    fn default() -> Self {
        Self {
            allowed: &["ls", "cd", "mkdir", "rmdir", "rm", "cp", "mv", "cat", "echo", "touch", "pwd"],
            forbidden: &[";", "&&", "||", "|", ">", ">>", "<", "sudo", "rm -rf", ":(){:|:&};:"],
        }
    }
}

impl SuggestionPolicy {
    pub fn permits(&self, command: &str) -> bool {
        let Some(base) = command.split_whitespace().next() else {
            return false;
        };
        self.allowed.contains(&base.to_lowercase().as_str())
            && !self.forbidden.iter().any(|pattern| command.contains(pattern))
    }
}

pub trait Suggest {
    fn suggest(&self, text: &str, policy: &SuggestionPolicy) -> Result<Option<String>, FallbackError>;
}

/// Used when the fallback is switched off or has no credentials.
pub struct Disabled;

impl Suggest for Disabled {
    fn suggest(&self, _text: &str, _policy: &SuggestionPolicy) -> Result<Option<String>, FallbackError> {
        Ok(None)
    }
}

pub struct GeminiFallback {
    client: reqwest::blocking::Client,
    api_key: String,
    model: String,
    endpoint: String,
}

impl GeminiFallback {
    pub fn from_config(config: &TerminalConfig) -> Result<Self, FallbackError> {
        let settings = &config.fallback;
        let api_key = config
            .var(&settings.api_key_env)
            .ok_or_else(|| FallbackError::MissingApiKey(settings.api_key_env.clone()))?;
        Ok(Self {
            client: reqwest::blocking::Client::new(),
            api_key,
            model: settings.model.trim_start_matches("models/").to_string(),
            endpoint: settings.endpoint.trim_end_matches('/').to_string(),
        })
    }

    fn prompt(text: &str, policy: &SuggestionPolicy) -> String {
        format!(
            "Convert this natural language command to a shell command:\n\
             \"{}\"\n\
             Only return the exact shell command, nothing else.\n\
             Use common shell commands like: {}.",
            text,
            policy.allowed.join(", ")
        )
    }
}

impl Suggest for GeminiFallback {
    fn suggest(&self, text: &str, policy: &SuggestionPolicy) -> Result<Option<String>, FallbackError> {
        let body = json!({
            "contents": [{
                "parts": [{ "text": Self::prompt(text, policy) }]
            }]
        });
        let url = format!("{}/models/{}:generateContent", self.endpoint, self.model);

        let resp = self
            .client
            .post(&url)
            .query(&[("key", self.api_key.as_str())])
            .header("content-type", "application/json")
            .json(&body)
            .send()?;

        let status = resp.status();
        let text = resp.text()?;
        if !status.is_success() {
            return Err(FallbackError::Api { status: status.as_u16(), body: text });
        }

        let parsed: serde_json::Value =
            serde_json::from_str(&text).map_err(|_| FallbackError::MalformedResponse(text.clone()))?;
        let raw = parsed["candidates"][0]["content"]["parts"][0]["text"]
            .as_str()
            .ok_or_else(|| FallbackError::MalformedResponse(text.clone()))?;

        let command = clean_suggestion(raw);
        if command.is_empty() || !policy.permits(&command) {
            debug!("Discarding suggestion {:?}", command);
            return Ok(None);
        }
        Ok(Some(command))
    }
}

static CODE_FENCE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"```[A-Za-z0-9_-]*").expect("static regex"));

/// Strips code fences and stray backticks; keeps the first non-empty line.
pub fn clean_suggestion(raw: &str) -> String {
    let unfenced = CODE_FENCE.replace_all(raw, "");
    unfenced
        .lines()
        .map(|l| l.trim().trim_matches('`').trim())
        .find(|l| !l.is_empty())
        .unwrap_or_default()
        .to_string()
}
