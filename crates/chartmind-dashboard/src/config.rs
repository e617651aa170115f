use anyhow::{Context, Result};
use chartmind_client::{ClientConfig, ResponseContract};
use std::env;
use std::time::Duration;

#[derive(Debug, Clone)]
pub struct DashboardConfig {
    // Backend
    pub backend_url: String,          // http://localhost:5000
    pub contract: ResponseContract,   // context | status
    pub market: String,               // status contract only
    pub request_timeout_seconds: u64, // 30

    // News panel
    pub news_poll_interval_seconds: u64, // 60
    pub news_impact_threshold: f64,      // 5

    // Notifications
    pub toast_ttl_seconds: u64, // 5
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            backend_url: "http://localhost:5000".to_string(),
            contract: ResponseContract::Context,
            market: "binary".to_string(),
            request_timeout_seconds: 30,
            news_poll_interval_seconds: 60,
            news_impact_threshold: 5.0,
            toast_ttl_seconds: 5,
        }
    }
}

impl DashboardConfig {
    pub fn from_env() -> Result<Self> {
        let config = Self {
            backend_url: env::var("CHARTMIND_BACKEND_URL")
                .unwrap_or_else(|_| "http://localhost:5000".to_string()),
            contract: env::var("CHARTMIND_CONTRACT")
                .unwrap_or_else(|_| "context".to_string())
                .parse()
                .context("CHARTMIND_CONTRACT")?,
            market: env::var("CHARTMIND_MARKET").unwrap_or_else(|_| "binary".to_string()),
            request_timeout_seconds: env::var("CHARTMIND_TIMEOUT_SECS")
                .unwrap_or_else(|_| "30".to_string())
                .parse()
                .context("CHARTMIND_TIMEOUT_SECS must be a whole number of seconds")?,

            news_poll_interval_seconds: env::var("NEWS_POLL_INTERVAL")
                .unwrap_or_else(|_| "60".to_string())
                .parse()
                .context("NEWS_POLL_INTERVAL must be a whole number of seconds")?,
            news_impact_threshold: env::var("NEWS_IMPACT_THRESHOLD")
                .unwrap_or_else(|_| "5".to_string())
                .parse()
                .context("NEWS_IMPACT_THRESHOLD must be numeric")?,

            toast_ttl_seconds: env::var("TOAST_TTL")
                .unwrap_or_else(|_| "5".to_string())
                .parse()
                .context("TOAST_TTL must be a whole number of seconds")?,
        };

        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if self.backend_url.trim().is_empty() {
            anyhow::bail!("CHARTMIND_BACKEND_URL is empty");
        }
        if self.news_poll_interval_seconds == 0 {
            anyhow::bail!("NEWS_POLL_INTERVAL must be at least 1 second");
        }
        if self.request_timeout_seconds == 0 {
            anyhow::bail!("CHARTMIND_TIMEOUT_SECS must be at least 1 second");
        }
        Ok(())
    }

    pub fn client_config(&self) -> ClientConfig {
        ClientConfig {
            base_url: self.backend_url.clone(),
            contract: self.contract,
            market: self.market.clone(),
            timeout: Duration::from_secs(self.request_timeout_seconds),
        }
    }

    pub fn news_poll_interval(&self) -> Duration {
        Duration::from_secs(self.news_poll_interval_seconds)
    }

    pub fn toast_ttl(&self) -> Duration {
        Duration::from_secs(self.toast_ttl_seconds)
    }
}
