//! Server configuration, read from the environment.

use std::net::SocketAddr;
use std::path::PathBuf;

use thiserror::Error;

const DEFAULT_REDIS_URL: &str = "redis://127.0.0.1:6379";
const DEFAULT_BIND: &str = "0.0.0.0:3000";
const DEFAULT_STATIC_DIR: &str = "frontend/dist";

#[derive(Error, Debug, PartialEq, Eq)]
pub enum ConfigError {
    #[error("Invalid {var}: {value:?} ({reason})")]
    Invalid {
        var: &'static str,
        value: String,
        reason: String,
    },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StorageBackend {
    Redis { url: String },
    Memory,
}

impl StorageBackend {
    pub fn label(&self) -> &'static str {
        match self {
            StorageBackend::Redis { .. } => "redis",
            StorageBackend::Memory => "memory",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub bind: SocketAddr,
    pub storage: StorageBackend,
    pub static_dir: PathBuf,
    pub seed_categories: bool,
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|var| std::env::var(var).ok())
    }

    /// Builds the configuration from an arbitrary variable source.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let bind_raw = lookup("TASKFLOW_BIND").unwrap_or_else(|| DEFAULT_BIND.to_string());
        let bind = bind_raw.parse().map_err(|err: std::net::AddrParseError| ConfigError::Invalid {
            var: "TASKFLOW_BIND",
            value: bind_raw.clone(),
            reason: err.to_string(),
        })?;

        let storage = match lookup("TASKFLOW_STORAGE").as_deref().map(str::trim) {
            None | Some("") | Some("redis") => StorageBackend::Redis {
                url: lookup("REDIS_URL").unwrap_or_else(|| DEFAULT_REDIS_URL.to_string()),
            },
            Some("memory") => StorageBackend::Memory,
            Some(other) => {
                return Err(ConfigError::Invalid {
                    var: "TASKFLOW_STORAGE",
                    value: other.to_string(),
                    reason: "expected `redis` or `memory`".to_string(),
                })
            }
        };

        let static_dir = lookup("TASKFLOW_STATIC_DIR")
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_STATIC_DIR));

        let seed_categories = match lookup("TASKFLOW_SEED_CATEGORIES") {
            None => true,
            Some(value) => parse_bool(&value).ok_or_else(|| ConfigError::Invalid {
                var: "TASKFLOW_SEED_CATEGORIES",
                value: value.clone(),
                reason: "expected a boolean".to_string(),
            })?,
        };

        Ok(Self {
            bind,
            storage,
            static_dir,
            seed_categories,
        })
    }
}

fn parse_bool(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}
