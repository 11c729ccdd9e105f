/// Application configuration module
use std::env;
use std::net::SocketAddr;
use std::time::Duration;

/// Shared, rate-limited public key used when no key is configured
pub const DEMO_API_KEY: &str = "DEMO_KEY";

const DEFAULT_BIND_ADDR: &str = "0.0.0.0:3000";
const DEFAULT_TIMEOUT_SECONDS: u64 = 30;

#[derive(Clone, Debug)]
pub struct AppConfig {
    pub nasa_api_key: String,
    pub bind_addr: SocketAddr,
    pub request_timeout: Duration,
}

impl AppConfig {
    /// Load configuration from `.env` and the process environment
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build configuration from an arbitrary key lookup
    pub fn from_lookup<F>(lookup: F) -> anyhow::Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let nasa_api_key = lookup("NASA_API_KEY")
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .unwrap_or_else(|| DEMO_API_KEY.to_string());

        let bind_raw = lookup("APOD_BIND_ADDR").unwrap_or_else(|| DEFAULT_BIND_ADDR.to_string());
        let bind_addr = bind_raw
            .parse::<SocketAddr>()
            .map_err(|e| anyhow::anyhow!("APOD_BIND_ADDR '{}' is invalid: {}", bind_raw, e))?;

        let timeout_seconds = lookup("APOD_TIMEOUT_SECONDS")
            .and_then(|s| s.trim().parse::<u64>().ok())
            .filter(|&n| n > 0)
            .unwrap_or(DEFAULT_TIMEOUT_SECONDS);

        Ok(Self {
            nasa_api_key,
            bind_addr,
            request_timeout: Duration::from_secs(timeout_seconds),
        })
    }

    pub fn uses_demo_key(&self) -> bool {
        self.nasa_api_key == DEMO_API_KEY
    }
}
