use std::fmt;
use std::str::FromStr;

use anyhow::{Context, Result};

/// Application configuration loaded from environment variables.
/// Built once at startup and shared read-only through `AppState`.
#[derive(Clone)]
pub struct Config {
    pub port: u16,
    pub env: String,
    pub rust_log: String,
    /// Only used for the liveness check; generation never touches the database.
    pub database_url: Option<String>,
    pub cors_origins: Vec<String>,
    /// Absent key is allowed at startup; generation endpoints then answer 503.
    pub gemini_api_key: Option<String>,
    pub gemini_model: String,
    pub gemini_base_url: String,
    pub gemini_timeout_secs: u64,
    /// Max characters of resume text interpolated into any prompt.
    pub resume_char_budget: usize,
    pub min_resume_chars: usize,
    pub max_upload_bytes: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            port: 8000,
            env: "development".to_string(),
            rust_log: "info".to_string(),
            database_url: None,
            cors_origins: vec![
                "http://localhost:5173".to_string(),
                "http://localhost:3000".to_string(),
            ],
            gemini_api_key: None,
            gemini_model: "gemini-flash-latest".to_string(),
            gemini_base_url: "https://generativelanguage.googleapis.com".to_string(),
            gemini_timeout_secs: 120,
            resume_char_budget: 15_000,
            min_resume_chars: 50,
            max_upload_bytes: 10 * 1024 * 1024,
        }
    }
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        let defaults = Config::default();

        Ok(Config {
            port: parse_env("PORT", defaults.port)?,
            env: std::env::var("ENV").unwrap_or(defaults.env),
            rust_log: std::env::var("RUST_LOG").unwrap_or(defaults.rust_log),
            database_url: optional_env("DATABASE_URL"),
            cors_origins: optional_env("CORS_ORIGINS")
                .map(|raw| split_origins(&raw))
                .unwrap_or(defaults.cors_origins),
            gemini_api_key: optional_env("GEMINI_API_KEY"),
            gemini_model: optional_env("GEMINI_MODEL").unwrap_or(defaults.gemini_model),
            gemini_base_url: optional_env("GEMINI_BASE_URL").unwrap_or(defaults.gemini_base_url),
            gemini_timeout_secs: parse_env("GEMINI_TIMEOUT_SECS", defaults.gemini_timeout_secs)?,
            resume_char_budget: parse_env("RESUME_CHAR_BUDGET", defaults.resume_char_budget)?,
            min_resume_chars: parse_env("MIN_RESUME_CHARS", defaults.min_resume_chars)?,
            max_upload_bytes: parse_env("MAX_UPLOAD_BYTES", defaults.max_upload_bytes)?,
        })
    }
}

// Hand-written so the API key never reaches a log line.
impl fmt::Debug for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Config")
            .field("port", &self.port)
            .field("env", &self.env)
            .field("rust_log", &self.rust_log)
            .field("database_url", &self.database_url.as_ref().map(|_| "<set>"))
            .field("cors_origins", &self.cors_origins)
            .field("gemini_api_key", &self.gemini_api_key.as_ref().map(|_| "<redacted>"))
            .field("gemini_model", &self.gemini_model)
            .field("gemini_base_url", &self.gemini_base_url)
            .field("gemini_timeout_secs", &self.gemini_timeout_secs)
            .field("resume_char_budget", &self.resume_char_budget)
            .field("min_resume_chars", &self.min_resume_chars)
            .field("max_upload_bytes", &self.max_upload_bytes)
            .finish()
    }
}

/// Treats unset and blank variables the same way.
fn optional_env(key: &str) -> Option<String> {
    std::env::var(key)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

fn parse_env<T>(key: &str, default: T) -> Result<T>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match optional_env(key) {
        Some(raw) => raw
            .parse::<T>()
            .with_context(|| format!("Environment variable '{key}' has an invalid value: {raw}")),
        None => Ok(default),
    }
}

fn split_origins(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(|o| o.trim().trim_end_matches('/').to_string())
        .filter(|o| !o.is_empty())
        .collect()
}
