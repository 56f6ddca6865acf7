//! Server configuration loaded from the environment (and `.env`).

use std::env;
use std::path::PathBuf;
use std::time::Duration;

use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("invalid value '{value}' for {key}: expected {expected}")]
    Invalid {
        key: &'static str,
        value: String,
        expected: &'static str,
    },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    pub host: String,
    pub port: u16,
    pub logo_path: PathBuf,
    /// Idle time after which a session and its activities are discarded.
    pub session_ttl: Duration,
    pub max_sessions: u64,
    /// Largest accepted JSON body (the stateless export carries base64 photos).
    pub max_payload_bytes: usize,
    /// Largest single photo accepted in a multipart activity upload.
    pub max_photo_bytes: usize,
    /// Largest multipart activity upload, all parts together.
    pub max_upload_bytes: usize,
    pub allowed_origins: Vec<String>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8080,
            logo_path: PathBuf::from("assets/logo.png"),
            session_ttl: Duration::from_secs(60 * 60),
            max_sessions: 1000,
            max_payload_bytes: 50 * 1024 * 1024,
            max_photo_bytes: 10 * 1024 * 1024,
            max_upload_bytes: 40 * 1024 * 1024,
            allowed_origins: vec![
                "http://localhost:5173".to_string(),
                "http://localhost:3000".to_string(),
                "http://localhost:8080".to_string(),
                "http://127.0.0.1:8080".to_string(),
            ],
        }
    }
}

impl AppConfig {
    /// Load configuration from `REPORT_*` environment variables, falling back
    /// to defaults for anything unset.
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build configuration from an arbitrary key lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();

        let host = lookup("REPORT_HOST").unwrap_or(defaults.host);
        let port = parse_or("REPORT_PORT", lookup("REPORT_PORT"), defaults.port, "a port number")?;
        let logo_path = lookup("REPORT_LOGO_PATH")
            .map(PathBuf::from)
            .unwrap_or(defaults.logo_path);
        let ttl_secs = parse_or(
            "REPORT_SESSION_TTL_SECS",
            lookup("REPORT_SESSION_TTL_SECS"),
            defaults.session_ttl.as_secs(),
            "a number of seconds",
        )?;
        let max_sessions = parse_or(
            "REPORT_MAX_SESSIONS",
            lookup("REPORT_MAX_SESSIONS"),
            defaults.max_sessions,
            "a positive integer",
        )?;
        let max_payload_bytes = parse_or(
            "REPORT_MAX_PAYLOAD_BYTES",
            lookup("REPORT_MAX_PAYLOAD_BYTES"),
            defaults.max_payload_bytes,
            "a size in bytes",
        )?;
        let max_photo_bytes = parse_or(
            "REPORT_MAX_PHOTO_BYTES",
            lookup("REPORT_MAX_PHOTO_BYTES"),
            defaults.max_photo_bytes,
            "a size in bytes",
        )?;
        let max_upload_bytes = parse_or(
            "REPORT_MAX_UPLOAD_BYTES",
            lookup("REPORT_MAX_UPLOAD_BYTES"),
            defaults.max_upload_bytes,
            "a size in bytes",
        )?;
        let allowed_origins = match lookup("REPORT_ALLOWED_ORIGINS") {
            Some(value) => value
                .split(',')
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty())
                .collect(),
            None => defaults.allowed_origins,
        };

        Ok(Self {
            host,
            port,
            logo_path,
            session_ttl: Duration::from_secs(ttl_secs),
            max_sessions,
            max_payload_bytes,
            max_photo_bytes,
            max_upload_bytes,
            allowed_origins,
        })
    }
}

fn parse_or<T: std::str::FromStr>(
    key: &'static str,
    raw: Option<String>,
    default: T,
    expected: &'static str,
) -> Result<T, ConfigError> {
    match raw {
        None => Ok(default),
        Some(value) => value.trim().parse().map_err(|_| ConfigError::Invalid {
            key,
            value,
            expected,
        }),
    }
}
