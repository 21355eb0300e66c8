use std::fmt;

use anyhow::{Context, Result};

/// Application configuration loaded from environment variables.
/// Startup aborts if a required variable is missing or malformed.
#[derive(Clone)]
pub struct Config {
    pub db_host: String,
    pub db_port: u16,
    pub db_user: String,
    pub db_password: String,
    pub db_name: String,
    pub db_max_connections: u32,
    pub anthropic_api_key: String,
    pub port: u16,
    pub rust_log: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        Ok(Config {
            db_host: require_env("DB_HOST")?,
            db_port: parse_env("DB_PORT", 5432)?,
            db_user: require_env("DB_USER")?,
            db_password: require_env("DB_PASSWORD")?,
            db_name: require_env("DB_NAME")?,
            db_max_connections: parse_env("DB_MAX_CONNECTIONS", 10)?,
            anthropic_api_key: require_env("ANTHROPIC_API_KEY")?,
            port: parse_env("PORT", 5000)?,
            rust_log: std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()),
        })
    }
}

// Secrets stay out of logs.
impl fmt::Debug for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Config")
            .field("db_host", &self.db_host)
            .field("db_port", &self.db_port)
            .field("db_user", &self.db_user)
            .field("db_password", &"<redacted>")
            .field("db_name", &self.db_name)
            .field("db_max_connections", &self.db_max_connections)
            .field("anthropic_api_key", &"<redacted>")
            .field("port", &self.port)
            .field("rust_log", &self.rust_log)
            .finish()
    }
}

fn require_env(key: &str) -> Result<String> {
    let value = std::env::var(key)
        .with_context(|| format!("Required environment variable '{key}' is not set"))?;
    if value.trim().is_empty() {
        anyhow::bail!("Required environment variable '{key}' is empty");
    }
    Ok(value)
}

fn parse_env<T>(key: &str, default: T) -> Result<T>
where
    T: std::str::FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match std::env::var(key) {
        Ok(raw) => raw
            .trim()
            .parse::<T>()
            .with_context(|| format!("{key} must be a valid number, got '{raw}'")),
        Err(_) => Ok(default),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Config {
        Config {
            db_host: "localhost".to_string(),
            db_port: 5432,
            db_user: "rolecraft".to_string(),
            db_password: "hunter2".to_string(),
            db_name: "rolecraft".to_string(),
            db_max_connections: 10,
            anthropic_api_key: "sk-ant-secret".to_string(),
            port: 5000,
            rust_log: "info".to_string(),
        }
    }

    #[test]
    fn test_debug_redacts_secrets() {
        let rendered = format!("{:?}", sample());
        assert!(!rendered.contains("hunter2"));
        assert!(!rendered.contains("sk-ant-secret"));
        assert!(rendered.contains("localhost"));
    }

    #[test]
    fn test_parse_env_uses_default_when_unset() {
        let port: u16 = parse_env("ROLECRAFT_TEST_UNSET_PORT", 5000).unwrap();
        assert_eq!(port, 5000);
    }

    #[test]
    fn test_require_env_reports_missing_key() {
        let err = require_env("ROLECRAFT_TEST_MISSING_KEY").unwrap_err();
        assert!(err.to_string().contains("ROLECRAFT_TEST_MISSING_KEY"));
    }
}
