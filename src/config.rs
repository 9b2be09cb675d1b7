use std::env;
use std::net::SocketAddr;
use std::time::Duration;
use thiserror::Error;

use crate::game::CleanupConfig;

pub const DEFAULT_BIND_ADDR: &str = "0.0.0.0:3000";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid BIND_ADDR {value:?}: {reason}")]
    InvalidBindAddr { value: String, reason: String },

    #[error("Invalid CORS_ALLOW_ANY {0:?}, expected true or false")]
    InvalidCorsFlag(String),

    #[error("Invalid {key} {value:?}, expected a positive whole number")]
    InvalidCount { key: &'static str, value: String },
}

/// Process settings, read from the environment
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub bind_addr: SocketAddr,
    /// Postgres connection string. In-memory storage is used when absent.
    pub database_url: Option<String>,
    pub cors_allow_any: bool,
    /// Sweep period and idle timeout for live game sessions
    pub cleanup: CleanupConfig,
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Builds a config from any key lookup, so tests need not touch the process environment
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let bind_value = lookup("BIND_ADDR").unwrap_or_else(|| DEFAULT_BIND_ADDR.to_string());
        let bind_addr = bind_value
            .parse()
            .map_err(|e: std::net::AddrParseError| ConfigError::InvalidBindAddr {
                value: bind_value.clone(),
                reason: e.to_string(),
            })?;

        let database_url = lookup("DATABASE_URL").filter(|url| !url.trim().is_empty());

        let cors_allow_any = match lookup("CORS_ALLOW_ANY") {
            None => true,
            Some(flag) => match flag.trim().to_ascii_lowercase().as_str() {
                "1" | "true" | "yes" => true,
                "0" | "false" | "no" => false,
                _ => return Err(ConfigError::InvalidCorsFlag(flag)),
            },
        };

        let mut cleanup = CleanupConfig::default();
        if let Some(minutes) = positive_count(&lookup, "SESSION_IDLE_MINUTES")? {
            cleanup.idle_timeout = Duration::from_secs(minutes.saturating_mul(60));
        }
        if let Some(secs) = positive_count(&lookup, "SESSION_SWEEP_SECS")? {
            cleanup.cleanup_interval = Duration::from_secs(secs);
        }

        Ok(Self {
            bind_addr,
            database_url,
            cors_allow_any,
            cleanup,
        })
    }
}

fn positive_count<F>(lookup: &F, key: &'static str) -> Result<Option<u64>, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    match lookup(key) {
        None => Ok(None),
        Some(value) => match value.trim().parse::<u64>() {
            Ok(count) if count > 0 => Ok(Some(count)),
            _ => Err(ConfigError::InvalidCount { key, value }),
        },
    }
}
