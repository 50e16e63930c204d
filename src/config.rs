use dotenvy::dotenv;
use std::env;
use std::time::Duration;

pub const DEFAULT_MODEL: &str = "llama-3.1-8b-instant";
pub const DEFAULT_API_URL: &str = "https://api.groq.com/openai/v1";
pub const DEFAULT_IMAGE_FETCH_TIMEOUT_SECS: u64 = 10;

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Missing required environment variable: {0}")]
    Missing(&'static str),
    #[error("Invalid value for {key}: {value}")]
    Invalid { key: &'static str, value: String },
}

#[derive(Debug, Clone)]
pub struct Config {
    pub groq_api_key: String,
    pub groq_model: String,
    pub groq_api_url: String,
    pub image_fetch_timeout: Duration,
}

impl Config {
    /// Loads `.env` if present, then reads the process environment.
    pub fn load() -> Result<Config, ConfigError> {
        dotenv().ok(); // Load .env file if present
        Config::from_env()
    }

    /// Reads the process environment only.
    pub fn from_env() -> Result<Config, ConfigError> {
        let timeout = get_env_or_default(
            "IMAGE_FETCH_TIMEOUT_SECS",
            &DEFAULT_IMAGE_FETCH_TIMEOUT_SECS.to_string(),
        );
        let timeout_secs = timeout
            .parse::<u64>()
            .map_err(|_| ConfigError::Invalid {
                key: "IMAGE_FETCH_TIMEOUT_SECS",
                value: timeout.clone(),
            })?;

        Ok(Config {
            groq_api_key: get_env("GROQ_API_KEY")?,
            groq_model: get_env_or_default("GROQ_MODEL", DEFAULT_MODEL),
            groq_api_url: get_env_or_default("GROQ_API_URL", DEFAULT_API_URL),
            image_fetch_timeout: Duration::from_secs(timeout_secs),
        })
    }
}

fn get_env(key: &'static str) -> Result<String, ConfigError> {
    match env::var(key) {
        Ok(v) if !v.trim().is_empty() => Ok(v),
        _ => Err(ConfigError::Missing(key)),
    }
}

fn get_env_or_default(key: &str, default: &str) -> String {
    env::var(key).unwrap_or_else(|_| default.to_string())
}
