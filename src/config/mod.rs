//! Application configuration management

use std::env;

use anyhow::{Context, Result, bail};

/// Output format for the console log layer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogFormat {
    #[default]
    Json,
    Pretty,
}

impl LogFormat {
    fn parse(value: &str) -> Result<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "json" => Ok(Self::Json),
            "pretty" | "text" => Ok(Self::Pretty),
            other => bail!("Unknown LOG_FORMAT '{}': expected 'json' or 'pretty'", other),
        }
    }
}

/// Application configuration loaded from environment variables
#[derive(Debug, Clone)]
pub struct Config {
    /// Interface to bind the HTTP server to
    pub host: String,

    /// Server port
    pub port: u16,

    /// SQLite connection URL (e.g. `sqlite://./data/movies.db` or `sqlite::memory:`)
    pub database_url: String,

    /// Upper bound for the connection pool (in-memory databases always use one)
    pub database_max_connections: u32,

    /// Console log output format
    pub log_format: LogFormat,
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Load configuration from an arbitrary key lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        // Prefer DATABASE_URL, fall back to a bare DATABASE_PATH
        let database_url = lookup("DATABASE_URL")
            .or_else(|| lookup("DATABASE_PATH").map(|path| format!("sqlite://{}", path)))
            .unwrap_or_else(|| "sqlite://./data/movies.db".to_string());

        let log_format = match lookup("LOG_FORMAT") {
            Some(value) => LogFormat::parse(&value)?,
            None => LogFormat::default(),
        };

        Ok(Self {
            host: lookup("HOST").unwrap_or_else(|| "0.0.0.0".to_string()),

            port: lookup("PORT")
                .unwrap_or_else(|| "8000".to_string())
                .parse()
                .context("Invalid PORT")?,

            database_url,

            database_max_connections: lookup("DATABASE_MAX_CONNECTIONS")
                .and_then(|s| s.parse().ok())
                .unwrap_or(5),

            log_format,
        })
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use pretty_assertions::assert_eq;

    use super::*;

    fn config_from(pairs: &[(&str, &str)]) -> Result<Config> {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Config::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn test_defaults() {
        let config = config_from(&[]).unwrap();
        assert_eq!(config.host, "0.0.0.0");
        assert_eq!(config.port, 8000);
        assert_eq!(config.database_url, "sqlite://./data/movies.db");
        assert_eq!(config.database_max_connections, 5);
        assert_eq!(config.log_format, LogFormat::Json);
    }

    #[test]
    fn test_overrides() {
        let config = config_from(&[
            ("HOST", "127.0.0.1"),
            ("PORT", "9090"),
            ("DATABASE_URL", "sqlite::memory:"),
            ("DATABASE_MAX_CONNECTIONS", "12"),
            ("LOG_FORMAT", "Pretty"),
        ])
        .unwrap();
        assert_eq!(config.host, "127.0.0.1");
        assert_eq!(config.port, 9090);
        assert_eq!(config.database_url, "sqlite::memory:");
        assert_eq!(config.database_max_connections, 12);
        assert_eq!(config.log_format, LogFormat::Pretty);
    }

    #[test]
    fn test_database_path_fallback() {
        let config = config_from(&[("DATABASE_PATH", "/var/lib/movies.db")]).unwrap();
        assert_eq!(config.database_url, "sqlite:///var/lib/movies.db");

        // DATABASE_URL wins when both are set
        let config = config_from(&[
            ("DATABASE_PATH", "/var/lib/movies.db"),
            ("DATABASE_URL", "sqlite::memory:"),
        ])
        .unwrap();
        assert_eq!(config.database_url, "sqlite::memory:");
    }

    #[test]
    fn test_invalid_values() {
        assert!(config_from(&[("PORT", "not-a-port")]).is_err());
        assert!(config_from(&[("LOG_FORMAT", "xml")]).is_err());

        // An unparseable pool size falls back to the default
        let config = config_from(&[("DATABASE_MAX_CONNECTIONS", "lots")]).unwrap();
        assert_eq!(config.database_max_connections, 5);
    }
}
