//! Where the store lives and how to authenticate against it.

const DEFAULT_API_URL: &str = "http://localhost:3000";

#[derive(Debug, Clone, PartialEq)]
pub struct ClientConfig {
    /// Base URL of the store, without the `/api` suffix
    pub base_url: String,
    pub api_key: Option<String>,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_API_URL.to_string(),
            api_key: None,
        }
    }
}

impl ClientConfig {
    pub fn new(base_url: impl Into<String>, api_key: Option<String>) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            api_key,
        }
    }

    /// Read `RK_JADWAL_API_URL` and `RK_JADWAL_API_KEY`
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());
        Self::new(
            get("RK_JADWAL_API_URL").unwrap_or_else(|| DEFAULT_API_URL.to_string()),
            get("RK_JADWAL_API_KEY"),
        )
    }
}
