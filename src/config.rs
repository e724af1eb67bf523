use std::net::SocketAddr;

use thiserror::Error;

/// Application-level constants
pub const APP_NAME: &str = "MedBrief";
pub const APP_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Environment variable holding the completion-service credential.
pub const API_KEY_ENV: &str = "OPENAI_API_KEY";

/// Models offered in the dropdown when `MEDBRIEF_MODELS` is unset.
pub const DEFAULT_MODELS: &[&str] = &["gpt-4-turbo-2024-04-09", "gpt-3.5-turbo-0125"];

pub const DEFAULT_API_BASE_URL: &str = "https://api.openai.com/v1";
pub const DEFAULT_BIND_ADDR: &str = "127.0.0.1:7860";
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 300;
pub const DEFAULT_MAX_UPLOAD_MB: usize = 55;

/// Log filter used when `RUST_LOG` is not set.
pub fn default_log_filter() -> &'static str {
    "medbrief=info,tower_http=info"
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Invalid value for {key}: {value:?}")]
    InvalidValue { key: &'static str, value: String },
}

/// Process configuration, loaded once at startup and passed down explicitly.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub bind_addr: SocketAddr,
    pub api_base_url: String,
    /// Checked lazily by the completion client, not at startup.
    pub api_key: Option<String>,
    pub models: Vec<String>,
    pub request_timeout_secs: u64,
    pub max_upload_bytes: usize,
}

impl AppConfig {
    /// Load `.env` (if present) and read configuration from the environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        if let Err(e) = dotenvy::dotenv() {
            if !e.not_found() {
                tracing::warn!(error = %e, "Failed to load .env file");
            }
        }
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build configuration from an arbitrary key lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let bind_raw = get("MEDBRIEF_BIND").unwrap_or_else(|| DEFAULT_BIND_ADDR.to_string());
        let bind_addr = bind_raw
            .trim()
            .parse::<SocketAddr>()
            .map_err(|_| ConfigError::InvalidValue {
                key: "MEDBRIEF_BIND",
                value: bind_raw.clone(),
            })?;

        let api_base_url = get("OPENAI_BASE_URL")
            .unwrap_or_else(|| DEFAULT_API_BASE_URL.to_string())
            .trim()
            .trim_end_matches('/')
            .to_string();

        let models = match get("MEDBRIEF_MODELS") {
            Some(raw) => {
                let models: Vec<String> = raw
                    .split(',')
                    .map(|m| m.trim().to_string())
                    .filter(|m| !m.is_empty())
                    .collect();
                if models.is_empty() {
                    return Err(ConfigError::InvalidValue {
                        key: "MEDBRIEF_MODELS",
                        value: raw,
                    });
                }
                models
            }
            None => DEFAULT_MODELS.iter().map(|m| m.to_string()).collect(),
        };

        let request_timeout_secs = parse_number(
            "MEDBRIEF_REQUEST_TIMEOUT_SECS",
            get("MEDBRIEF_REQUEST_TIMEOUT_SECS"),
            DEFAULT_REQUEST_TIMEOUT_SECS,
        )?;
        let max_upload_mb = parse_number(
            "MEDBRIEF_MAX_UPLOAD_MB",
            get("MEDBRIEF_MAX_UPLOAD_MB"),
            DEFAULT_MAX_UPLOAD_MB,
        )?;

        Ok(Self {
            bind_addr,
            api_base_url,
            api_key: get(API_KEY_ENV).map(|k| k.trim().to_string()),
            models,
            request_timeout_secs,
            max_upload_bytes: max_upload_mb * 1024 * 1024,
        })
    }
}

fn parse_number<T>(key: &'static str, raw: Option<String>, default: T) -> Result<T, ConfigError>
where
    T: std::str::FromStr + PartialOrd + Default,
{
    match raw {
        None => Ok(default),
        Some(value) => match value.trim().parse::<T>() {
            Ok(n) if n > T::default() => Ok(n),
            _ => Err(ConfigError::InvalidValue { key, value }),
        },
    }
}
