//! Process configuration, read once from the environment at startup.

use std::env;
use std::time::Duration;

use anyhow::{Context, Result};

const DEFAULT_PORT: u16 = 8080;
const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(10);
const DEFAULT_SHUTDOWN_TIMEOUT: Duration = Duration::from_secs(5);
const DEFAULT_LOG_LEVEL: &str = "info";

/// Output format of the log subscriber.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    Json,
    Pretty,
}

impl LogFormat {
    fn parse(raw: &str) -> Self {
        if raw.trim().eq_ignore_ascii_case("pretty") {
            Self::Pretty
        } else {
            Self::Json
        }
    }
}

#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    /// Deadline applied to every HTTP request.
    pub request_timeout: Duration,
    /// How long in-flight requests may drain after a stop signal.
    pub shutdown_timeout: Duration,
    /// `EnvFilter` directive, e.g. `info` or `api=debug,info`.
    pub log_level: String,
    pub log_format: LogFormat,
    /// OTLP collector endpoint; spans are exported only when set.
    pub otlp_endpoint: Option<String>,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let port = match lookup("SERVER_PORT").filter(|s| !s.trim().is_empty()) {
            Some(raw) => raw
                .trim()
                .parse::<u16>()
                .context("SERVER_PORT must be a valid port number")?,
            None => DEFAULT_PORT,
        };

        let request_timeout = lookup("SERVER_REQUEST_TIMEOUT")
            .and_then(|raw| parse_duration(&raw))
            .unwrap_or(DEFAULT_REQUEST_TIMEOUT);

        let shutdown_timeout = lookup("SERVER_SHUTDOWN_TIMEOUT")
            .and_then(|raw| parse_duration(&raw))
            .unwrap_or(DEFAULT_SHUTDOWN_TIMEOUT);

        let log_level = lookup("LOG_LEVEL")
            .filter(|s| !s.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_LOG_LEVEL.to_string());

        let log_format = lookup("LOG_FORMAT")
            .map(|raw| LogFormat::parse(&raw))
            .unwrap_or(LogFormat::Json);

        let otlp_endpoint = lookup("OTEL_EXPORTER_OTLP_ENDPOINT").filter(|s| !s.trim().is_empty());

        Ok(Config {
            port,
            request_timeout,
            shutdown_timeout,
            log_level,
            log_format,
            otlp_endpoint,
        })
    }
}

/// Parses `250ms`, `10s`, `5m` or `1h`.
///
/// Returns `None` for a missing unit, an unknown unit or a non-numeric amount.
pub fn parse_duration(raw: &str) -> Option<Duration> {
    let raw = raw.trim();
    let (amount, unit) = raw
        .find(|c: char| !c.is_ascii_digit())
        .map(|idx| raw.split_at(idx))?;
    let amount: u64 = amount.parse().ok()?;

    match unit {
        "ms" => Some(Duration::from_millis(amount)),
        "s" => Some(Duration::from_secs(amount)),
        "m" => Some(Duration::from_secs(amount.checked_mul(60)?)),
        "h" => Some(Duration::from_secs(amount.checked_mul(3600)?)),
        _ => None,
    }
}
