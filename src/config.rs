use anyhow::{Context, Result, bail};
use colored::*;
use serde::Deserialize;
use std::collections::HashMap;
use std::env;
use std::fs;
use std::path::{Path, PathBuf};

pub const CONFIG_FILE: &str = "aiterm.toml";

#[derive(Debug, Default, Deserialize)]
pub struct TerminalConfig {
    #[serde(default)]
    pub fallback: FallbackConfig,
    #[serde(default)]
    pub executor: ExecutorConfig,
    /// Variables from `.env`, layered over the process environment.
    #[serde(skip)]
    pub env: HashMap<String, String>,
}

#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct FallbackConfig {
    pub enabled: bool,
    pub model: String,
    pub api_key_env: String,
    pub endpoint: String,
}

impl Default for FallbackConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            model: "gemini-1.5-flash".to_string(),
            api_key_env: "GOOGLE_API_KEY".to_string(),
            endpoint: "https://generativelanguage.googleapis.com/v1beta".to_string(),
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct ExecutorConfig {
    /// Directories searched for a command's binary.
    pub search_path: Vec<PathBuf>,
    /// Resolve binaries through the host `PATH` instead of `search_path`.
    pub inherit_path: bool,
    pub timeout_secs: Option<u64>,
}

impl Default for ExecutorConfig {
    fn default() -> Self {
        Self {
            search_path: vec![PathBuf::from("/usr/bin"), PathBuf::from("/bin")],
            inherit_path: cfg!(windows),
            timeout_secs: None,
        }
    }
}

impl TerminalConfig {
    /// `.env` values win over the process environment.
    pub fn var(&self, key: &str) -> Option<String> {
        self.env
            .get(key)
            .cloned()
            .or_else(|| env::var(key).ok())
            .filter(|v| !v.trim().is_empty())
    }
}

/// Loads `aiterm.toml` from `dir` (or `explicit`), then layers `.env` on top.
/// A missing default config file is not an error; a missing explicit one is.
pub fn load_config(dir: &Path, explicit: Option<&Path>) -> Result<TerminalConfig> {
    let config_path = match explicit {
        Some(p) => {
            if !p.exists() {
                bail!("❌ Config file {:?} not found.", p);
            }
            Some(p.to_path_buf())
        }
        None => Some(dir.join(CONFIG_FILE)).filter(|p| p.exists()),
    };

    let mut config = match &config_path {
        Some(path) => {
            let content = fs::read_to_string(path)
                .with_context(|| format!("Failed to read {}", path.display()))?;
            parse_config(&content).with_context(|| format!("Failed to parse {}", path.display()))?
        }
        None => TerminalConfig::default(),
    };

    // .env or .env.<AITERM_ENV>
    let env_filename = env::var("AITERM_ENV")
        .map(|v| format!(".env.{}", v))
        .unwrap_or_else(|_| ".env".to_string());
    let env_path = dir.join(&env_filename);

    if env_path.exists() {
        eprintln!("{} Loading environment from: {}", "🌿".green(), env_filename.bold());
        for item in dotenvy::from_path_iter(&env_path)? {
            let (key, val) = item?;
            config.env.insert(key, val);
        }
    }

    Ok(config)
}

pub fn parse_config(content: &str) -> Result<TerminalConfig> {
    Ok(toml::from_str(content)?)
}
