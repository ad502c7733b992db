use std::{env, fmt::Display, str::FromStr};

use anyhow::{Context, anyhow};
use tracing::{info, warn};

pub struct Config {
    pub database_url: String,
    pub host: String,
    pub port: u16,
    pub max_connections: u32,
    pub secure_cookies: bool,
    pub seed_demo_accounts: bool,
}

impl Config {
    pub fn load() -> anyhow::Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> anyhow::Result<Self> {
        Ok(Self {
            database_url: lookup("DATABASE_URL").context("Missing env var: DATABASE_URL")?,
            host: try_load(&lookup, "SOLVE_HUB_HOST", "127.0.0.1")?,
            port: try_load(&lookup, "SOLVE_HUB_PORT", "3000")?,
            max_connections: try_load(&lookup, "SOLVE_HUB_MAX_CONNECTIONS", "10")?,
            secure_cookies: load_flag(&lookup, "SOLVE_HUB_SECURE_COOKIES")?,
            seed_demo_accounts: load_flag(&lookup, "SOLVE_HUB_SEED_DEMO_ACCOUNTS")?,
        })
    }

    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

fn try_load<T: FromStr>(
    lookup: impl Fn(&str) -> Option<String>,
    key: &str,
    default: &str,
) -> anyhow::Result<T>
where
    T::Err: Display,
{
    lookup(key)
        .unwrap_or_else(|| {
            info!("{key} not set, using default: {default}");
            default.to_string()
        })
        .parse()
        .map_err(|e| {
            warn!("Invalid {key} value: {e}");
            anyhow!("Invalid {key} value: {e}")
        })
}

fn load_flag(lookup: impl Fn(&str) -> Option<String>, key: &str) -> anyhow::Result<bool> {
    let Some(value) = lookup(key) else {
        return Ok(false);
    };
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "" | "0" | "false" | "no" | "off" => Ok(false),
        other => Err(anyhow!("Invalid {key} value: {other:?}")),
    }
}
