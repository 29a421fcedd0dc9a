use std::str::FromStr;

use anyhow::{bail, Context, Result};

use crate::scoring::ScoringConfig;

/// Application configuration loaded from environment variables.
/// Start-up fails if required variables are missing or malformed.
#[derive(Debug, Clone)]
pub struct Config {
    pub anthropic_api_key: String,
    pub port: u16,
    pub rust_log: String,
    pub scoring: ScoringConfig,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        let defaults = ScoringConfig::default();
        let scoring = ScoringConfig {
            chunk_size: env_or("SCORING_CHUNK_SIZE", defaults.chunk_size)?,
            parallel_threshold: env_or(
                "SCORING_PARALLEL_THRESHOLD",
                defaults.parallel_threshold,
            )?,
            chunk_concurrency: env_or("SCORING_CHUNK_CONCURRENCY", defaults.chunk_concurrency)?,
            max_resumes: env_or("SCORING_MAX_RESUMES", defaults.max_resumes)?,
            max_resume_bytes: env_or("SCORING_MAX_RESUME_BYTES", defaults.max_resume_bytes)?,
        };
        validate_scoring(&scoring)?;

        Ok(Config {
            anthropic_api_key: require_env("ANTHROPIC_API_KEY")?,
            port: env_or("PORT", 8080u16)?,
            rust_log: std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()),
            scoring,
        })
    }
}

fn validate_scoring(scoring: &ScoringConfig) -> Result<()> {
    if scoring.chunk_size == 0 {
        bail!("SCORING_CHUNK_SIZE must be at least 1");
    }
    if scoring.chunk_concurrency == 0 {
        bail!("SCORING_CHUNK_CONCURRENCY must be at least 1");
    }
    if scoring.max_resumes == 0 {
        bail!("SCORING_MAX_RESUMES must be at least 1");
    }
    if scoring.checked_body_limit().is_none() {
        bail!(
            "SCORING_MAX_RESUMES ({}) x SCORING_MAX_RESUME_BYTES ({}) is too large",
            scoring.max_resumes,
            scoring.max_resume_bytes
        );
    }
    Ok(())
}

fn require_env(key: &str) -> Result<String> {
    std::env::var(key).with_context(|| format!("Required environment variable '{key}' is not set"))
}

/// Reads and parses an optional variable, falling back to `default` when unset.
fn env_or<T>(key: &str, default: T) -> Result<T>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match std::env::var(key) {
        Ok(raw) => parse_value(key, &raw),
        Err(_) => Ok(default),
    }
}

fn parse_value<T>(key: &str, raw: &str) -> Result<T>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    raw.trim()
        .parse::<T>()
        .with_context(|| format!("{key} must be a valid number, got '{raw}'"))
}
