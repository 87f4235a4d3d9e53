use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Context, Result};

/// Well-known TeX install locations searched after `PATH`.
pub const DEFAULT_TYPESETTER_PATHS: &[&str] = &[
    "/Library/TeX/texbin/xelatex",
    "/usr/local/texlive/2025basic/bin/universal-darwin/xelatex",
    "/usr/local/texlive/2024basic/bin/universal-darwin/xelatex",
    "/usr/local/texlive/2023basic/bin/universal-darwin/xelatex",
    "/opt/homebrew/texlive/bin/xelatex",
];

pub const DEFAULT_LLM_MODEL: &str = "claude-sonnet-4-5";

/// Application configuration loaded from environment variables.
/// Nothing is required up front; the API key is checked by the commands that use it.
#[derive(Debug, Clone)]
pub struct Config {
    pub anthropic_api_key: Option<String>,
    pub llm_model: String,
    pub llm_timeout: Duration,
    pub typesetter: Option<PathBuf>,
    pub typesetter_paths: Vec<PathBuf>,
    pub compile_timeout: Duration,
    pub rust_log: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds the configuration from any key lookup. Blank values count as unset.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let typesetter_paths = match var("RESUME_TYPESETTER_PATHS") {
            Some(paths) => std::env::split_paths(&paths).collect(),
            None => DEFAULT_TYPESETTER_PATHS.iter().map(PathBuf::from).collect(),
        };

        Ok(Config {
            anthropic_api_key: var("ANTHROPIC_API_KEY"),
            llm_model: var("RESUME_LLM_MODEL").unwrap_or_else(|| DEFAULT_LLM_MODEL.to_string()),
            llm_timeout: seconds(var("RESUME_LLM_TIMEOUT_SECS"), 120)
                .context("RESUME_LLM_TIMEOUT_SECS must be a whole number of seconds")?,
            typesetter: var("RESUME_TYPESETTER").map(PathBuf::from),
            typesetter_paths,
            compile_timeout: seconds(var("RESUME_COMPILE_TIMEOUT_SECS"), 60)
                .context("RESUME_COMPILE_TIMEOUT_SECS must be a whole number of seconds")?,
            rust_log: var("RUST_LOG").unwrap_or_else(|| "info".to_string()),
        })
    }
}

fn seconds(raw: Option<String>, default: u64) -> Result<Duration> {
    match raw {
        Some(raw) => Ok(Duration::from_secs(raw.trim().parse::<u64>()?)),
        None => Ok(Duration::from_secs(default)),
    }
}
