//! Runtime configuration
//!
//! Read from the process environment; binaries call `dotenv` first so a
//! local `.env` file is honoured.

use crate::error::BankingError;
use crate::Result;
use std::env;
use std::str::FromStr;
use std::time::Duration;

pub const DEFAULT_MODEL: &str = "gemini-3-flash-preview";
pub const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub gemini_api_key: String,
    pub gemini_model: String,
    pub gemini_base_url: String,
    /// Deadline for one provider round trip
    pub assistant_timeout: Duration,
    /// Prior transcript turns forwarded with each query (0 = latest query only)
    pub assistant_history_turns: usize,
    pub login_latency: Duration,
    pub transfer_latency: Duration,
    pub api_port: u16,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            gemini_api_key: String::new(),
            gemini_model: DEFAULT_MODEL.to_string(),
            gemini_base_url: DEFAULT_BASE_URL.to_string(),
            assistant_timeout: Duration::from_secs(30),
            assistant_history_turns: 0,
            login_latency: Duration::ZERO,
            transfer_latency: Duration::ZERO,
            api_port: 8080,
        }
    }
}

impl AppConfig {
    pub fn from_env() -> Result<Self> {
        let defaults = Self::default();

        let gemini_api_key = env::var("GEMINI_API_KEY").unwrap_or_default();
        let gemini_model = non_empty_var("GEMINI_MODEL").unwrap_or(defaults.gemini_model);
        let gemini_base_url = non_empty_var("GEMINI_BASE_URL")
            .map(|url| url.trim_end_matches('/').to_string())
            .unwrap_or(defaults.gemini_base_url);

        let assistant_timeout = parse_var::<u64>("ASSISTANT_TIMEOUT_SECS")?
            .map(Duration::from_secs)
            .unwrap_or(defaults.assistant_timeout);
        let assistant_history_turns = parse_var::<usize>("ASSISTANT_HISTORY_TURNS")?
            .unwrap_or(defaults.assistant_history_turns);
        let login_latency = parse_var::<u64>("LOGIN_LATENCY_MS")?
            .map(Duration::from_millis)
            .unwrap_or(defaults.login_latency);
        let transfer_latency = parse_var::<u64>("TRANSFER_LATENCY_MS")?
            .map(Duration::from_millis)
            .unwrap_or(defaults.transfer_latency);

        let api_port = match parse_var::<u16>("PORT")? {
            Some(port) => port,
            None => parse_var::<u16>("API_PORT")?.unwrap_or(defaults.api_port),
        };

        Ok(Self {
            gemini_api_key,
            gemini_model,
            gemini_base_url,
            assistant_timeout,
            assistant_history_turns,
            login_latency,
            transfer_latency,
            api_port,
        })
    }
}

fn non_empty_var(key: &str) -> Option<String> {
    env::var(key).ok().filter(|v| !v.trim().is_empty())
}

fn parse_var<T: FromStr>(key: &str) -> Result<Option<T>> {
    match non_empty_var(key) {
        Some(raw) => raw
            .trim()
            .parse::<T>()
            .map(Some)
            .map_err(|_| BankingError::Config(format!("{} has invalid value '{}'", key, raw))),
        None => Ok(None),
    }
}
