use std::{env, sync::Arc};

use crate::store::LeaderboardStore;

pub(crate) const DEFAULT_PORT: u16 = 3001;
pub(crate) const DEFAULT_FRONTEND_URL: &str = "http://localhost:3000";
pub(crate) const DEFAULT_JSON_LIMIT_BYTES: usize = 16 * 1024;
pub(crate) const DEFAULT_HTTP_KEEP_ALIVE_SECS: u64 = 75;
pub(crate) const CORS_MAX_AGE_SECS: usize = 3600;

#[derive(Debug, Clone)]
pub(crate) struct ServerConfig {
    pub(crate) bind_addr: String,
    /// The single origin allowed to call the API with credentials.
    pub(crate) frontend_url: String,
    pub(crate) json_limit: usize,
    pub(crate) http_workers: Option<usize>,
    pub(crate) http_keep_alive_secs: u64,
}

impl ServerConfig {
    pub(crate) fn from_env() -> Self {
        let bind_addr = env::var("API_BIND_ADDR")
            .ok()
            .map(|value| value.trim().to_string())
            .filter(|value| !value.is_empty())
            .unwrap_or_else(|| format!("0.0.0.0:{}", read_env_u16("PORT", DEFAULT_PORT)));

        let frontend_url = env::var("FRONTEND_URL")
            .ok()
            .map(|value| value.trim().trim_end_matches('/').to_string())
            .filter(|value| !value.is_empty())
            .unwrap_or_else(|| DEFAULT_FRONTEND_URL.to_string());

        Self {
            bind_addr,
            frontend_url,
            json_limit: read_env_usize("JSON_LIMIT_BYTES", DEFAULT_JSON_LIMIT_BYTES),
            http_workers: read_env_optional_usize("HTTP_WORKERS"),
            http_keep_alive_secs: read_env_u64(
                "HTTP_KEEP_ALIVE_SECS",
                DEFAULT_HTTP_KEEP_ALIVE_SECS,
            ),
        }
    }
}

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) leaderboard: Arc<LeaderboardStore>,
}

impl AppState {
    pub(crate) fn new(leaderboard: LeaderboardStore) -> Self {
        Self {
            leaderboard: Arc::new(leaderboard),
        }
    }
}

pub(crate) fn read_env_usize(name: &str, default: usize) -> usize {
    env::var(name)
        .ok()
        .and_then(|value| value.parse::<usize>().ok())
        .filter(|value| *value > 0)
        .unwrap_or(default)
}

pub(crate) fn read_env_optional_usize(name: &str) -> Option<usize> {
    env::var(name)
        .ok()
        .and_then(|value| value.parse::<usize>().ok())
        .filter(|value| *value > 0)
}

pub(crate) fn read_env_u64(name: &str, default: u64) -> u64 {
    env::var(name)
        .ok()
        .and_then(|value| value.parse::<u64>().ok())
        .filter(|value| *value > 0)
        .unwrap_or(default)
}

pub(crate) fn read_env_u16(name: &str, default: u16) -> u16 {
    env::var(name)
        .ok()
        .and_then(|value| value.parse::<u16>().ok())
        .filter(|value| *value > 0)
        .unwrap_or(default)
}
