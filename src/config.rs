//! Environment-driven service configuration. `.env` is loaded by the binary
//! before this runs; invalid values fall back to defaults rather than abort.

use std::path::PathBuf;
use std::time::Duration;

use crate::jokes::DEFAULT_FETCH_TIMEOUT;

const DEFAULT_PORT: u16 = 8888;
const DEFAULT_STATIC_DIR: &str = "static";
const DEFAULT_ALLOWED_ORIGINS: &[&str] = &["http://localhost:5173", "http://localhost"];

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub port: u16,
    pub static_dir: PathBuf,
    pub allowed_origins: Vec<String>,
    pub telegram_token: Option<String>,
    pub fetch_timeout: Duration,
    pub weights_path: Option<PathBuf>,
}

impl AppConfig {
    pub fn from_env() -> Self {
        let port = std::env::var("PORT")
            .ok()
            .and_then(|p| p.parse().ok())
            .unwrap_or(DEFAULT_PORT);

        let static_dir = std::env::var("STATIC_DIR")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from(DEFAULT_STATIC_DIR));

        let allowed_origins = std::env::var("ALLOWED_ORIGINS")
            .map(|s| parse_origins(&s))
            .unwrap_or_else(|_| default_origins());

        let telegram_token = std::env::var("TELEGRAM_BOT_TOKEN")
            .ok()
            .filter(|t| !t.trim().is_empty());

        let fetch_timeout = std::env::var("JOKE_FETCH_TIMEOUT_SECS")
            .ok()
            .and_then(|v| v.parse().ok())
            .map(Duration::from_secs)
            .unwrap_or(DEFAULT_FETCH_TIMEOUT);

        let weights_path = std::env::var("PROVIDER_WEIGHTS_PATH").ok().map(PathBuf::from);

        Self {
            port,
            static_dir,
            allowed_origins,
            telegram_token,
            fetch_timeout,
            weights_path,
        }
    }
}

fn default_origins() -> Vec<String> {
    DEFAULT_ALLOWED_ORIGINS.iter().map(|s| s.to_string()).collect()
}

/// Comma-separated origin list; empty items dropped, an all-empty value
/// falls back to the defaults.
fn parse_origins(raw: &str) -> Vec<String> {
    let origins: Vec<String> = raw
        .split(',')
        .map(|o| o.trim().to_string())
        .filter(|o| !o.is_empty())
        .collect();
    if origins.is_empty() {
        default_origins()
    } else {
        origins
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn origin_list_is_split_and_trimmed() {
        let origins = parse_origins("http://localhost, https://example.org ,");
        assert_eq!(origins, vec!["http://localhost", "https://example.org"]);
    }

    #[test]
    fn empty_origin_list_falls_back() {
        assert_eq!(parse_origins(" , ,"), default_origins());
        assert_eq!(parse_origins(""), default_origins());
    }
}
