use anyhow::{Context, Result};

use crate::mail_client::DEFAULT_MAIL_API_URL;

/// Application configuration loaded from environment variables.
/// Everything has a default except the mail API key and alert recipient,
/// which leave email features disabled when unset.
#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    pub rust_log: String,
    pub mail_api_url: String,
    pub mail_api_key: Option<String>,
    pub mail_sender_email: String,
    pub mail_sender_name: String,
    pub notify_email: Option<String>,
    pub scrape_timeout_secs: u64,
    pub search_max_results: usize,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds the config from any key lookup; `from_env` passes the process environment.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());
        let or = |key: &str, default: &str| get(key).unwrap_or_else(|| default.to_string());

        Ok(Config {
            port: or("PORT", "8080")
                .parse::<u16>()
                .context("PORT must be a valid port number")?,
            rust_log: or("RUST_LOG", "info"),
            mail_api_url: or("MAIL_API_URL", DEFAULT_MAIL_API_URL),
            mail_api_key: get("MAIL_API_KEY"),
            mail_sender_email: or("MAIL_SENDER_EMAIL", "no-reply@jobportal.in"),
            mail_sender_name: or("MAIL_SENDER_NAME", "Job Portal"),
            notify_email: get("NOTIFY_EMAIL"),
            scrape_timeout_secs: or("SCRAPE_TIMEOUT_SECS", "15")
                .parse::<u64>()
                .context("SCRAPE_TIMEOUT_SECS must be a whole number of seconds")?,
            search_max_results: or("SEARCH_MAX_RESULTS", "20")
                .parse::<usize>()
                .context("SEARCH_MAX_RESULTS must be a positive integer")?,
        })
    }
}
