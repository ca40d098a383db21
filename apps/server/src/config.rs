use std::{net::SocketAddr, time::Duration};

use anyhow::Context;

pub struct Config {
    pub listen_addr: SocketAddr,
    pub db_path: String,
    pub cors_allow: Vec<String>,
    pub request_timeout: Duration,
    pub coincap_base_url: Option<String>,
    pub coincap_api_key: Option<String>,
    pub price_refresh_enabled: bool,
    pub price_refresh_interval: Duration,
    pub max_wallet_symbols: usize,
}

impl Config {
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();
        let listen_addr: SocketAddr = var_or("CW_LISTEN_ADDR", "0.0.0.0:8080")
            .parse()
            .context("Invalid CW_LISTEN_ADDR")?;
        let db_path = var_or("CW_DB_PATH", "./db/wallet.db");
        let cors_allow = var_or("CW_CORS_ALLOW_ORIGINS", "*")
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();
        let timeout_ms: u64 = var_or("CW_REQUEST_TIMEOUT_MS", "30000")
            .parse()
            .context("Invalid CW_REQUEST_TIMEOUT_MS")?;
        let price_refresh_enabled: bool = var_or("CW_PRICE_REFRESH_ENABLED", "true")
            .parse()
            .context("Invalid CW_PRICE_REFRESH_ENABLED")?;
        let refresh_ms: u64 = var_or("CW_PRICE_REFRESH_INTERVAL_MS", "300000")
            .parse()
            .context("Invalid CW_PRICE_REFRESH_INTERVAL_MS")?;
        if refresh_ms == 0 {
            anyhow::bail!("CW_PRICE_REFRESH_INTERVAL_MS must be greater than zero");
        }
        let max_wallet_symbols: usize = var_or("CW_MAX_WALLET_SYMBOLS", "100")
            .parse()
            .context("Invalid CW_MAX_WALLET_SYMBOLS")?;

        Ok(Self {
            listen_addr,
            db_path,
            cors_allow,
            request_timeout: Duration::from_millis(timeout_ms),
            coincap_base_url: optional_var("CW_COINCAP_BASE_URL"),
            coincap_api_key: optional_var("CW_COINCAP_API_KEY"),
            price_refresh_enabled,
            price_refresh_interval: Duration::from_millis(refresh_ms),
            max_wallet_symbols,
        })
    }
}

fn var_or(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}

fn optional_var(key: &str) -> Option<String> {
    std::env::var(key)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}
