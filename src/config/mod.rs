use crate::error::{RankerError, Result};
use serde::Deserialize;
use std::env;
use std::fmt::Display;
use std::str::FromStr;

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub llm: LlmConfig,
    pub ranking: RankingConfig,
}

/// Remote scoring service settings. The bearer credential lives here,
/// never inside the pipeline itself.
#[derive(Debug, Clone, Deserialize)]
pub struct LlmConfig {
    pub api_url: String,
    pub api_key: String,
    pub model: String,
    pub max_tokens: u32,
    pub timeout_secs: u64,
    pub max_concurrency: usize,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RankingConfig {
    /// Number of ranked candidates shown to the user.
    pub top_k: usize,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok();

        Ok(Config {
            llm: LlmConfig {
                api_url: env_or(
                    "LLM_API_URL",
                    "https://api.openai.com/v1/chat/completions",
                ),
                api_key: env_or("LLM_API_KEY", ""),
                model: env_or("LLM_MODEL", "gpt-3.5-turbo"),
                max_tokens: env_parse("LLM_MAX_TOKENS", 512)?,
                timeout_secs: env_parse("LLM_TIMEOUT_SECS", 30)?,
                max_concurrency: env_parse("LLM_MAX_CONCURRENCY", 4)?,
            },
            ranking: RankingConfig {
                top_k: env_parse("TOP_K", 5)?,
            },
        })
    }
}

fn env_or(key: &str, default: &str) -> String {
    env::var(key).unwrap_or_else(|_| default.to_string())
}

fn env_parse<T>(key: &str, default: T) -> Result<T>
where
    T: FromStr,
    T::Err: Display,
{
    match env::var(key) {
        Ok(raw) => raw
            .parse()
            .map_err(|e| RankerError::Config(format!("{key} must be a valid number: {e}"))),
        Err(_) => Ok(default),
    }
}
