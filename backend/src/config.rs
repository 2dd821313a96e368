//! Server configuration read from `RK_JADWAL_*` environment variables.

use anyhow::{Context, Result};
use std::net::SocketAddr;

const DEFAULT_DATABASE_URL: &str = "sqlite:rk_jadwal.db";
const DEFAULT_BIND_ADDR: &str = "127.0.0.1:3000";
const DEFAULT_CORS_ORIGIN: &str = "http://localhost:8080";

#[derive(Debug, Clone, PartialEq)]
pub struct ServerConfig {
    pub database_url: String,
    pub bind_addr: SocketAddr,
    /// Shared key clients must present; `None` disables the check
    pub api_key: Option<String>,
    pub cors_origin: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            database_url: DEFAULT_DATABASE_URL.to_string(),
            bind_addr: ([127, 0, 0, 1], 3000).into(),
            api_key: None,
            cors_origin: DEFAULT_CORS_ORIGIN.to_string(),
        }
    }
}

impl ServerConfig {
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build the config from any key lookup; blank values count as unset
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let bind_addr = get("RK_JADWAL_BIND_ADDR").unwrap_or_else(|| DEFAULT_BIND_ADDR.to_string());
        let bind_addr = bind_addr
            .parse::<SocketAddr>()
            .with_context(|| format!("Invalid RK_JADWAL_BIND_ADDR: {}", bind_addr))?;

        Ok(Self {
            database_url: get("RK_JADWAL_DATABASE_URL").unwrap_or_else(|| DEFAULT_DATABASE_URL.to_string()),
            bind_addr,
            api_key: get("RK_JADWAL_API_KEY"),
            cors_origin: get("RK_JADWAL_CORS_ORIGIN").unwrap_or_else(|| DEFAULT_CORS_ORIGIN.to_string()),
        })
    }
}
