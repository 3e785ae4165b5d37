//! Centralized configuration (environment variables + defaults).

use anyhow::Context;
use std::path::PathBuf;

/// Database URL must be provided (no default) for safety.
pub fn database_url() -> anyhow::Result<String> {
    std::env::var("DATABASE_URL").context("DATABASE_URL must be set")
}

/// Connection pool size (default 5, at least 1).
pub fn db_max_connections() -> u32 {
    std::env::var("DB_MAX_CONNECTIONS")
        .ok()
        .and_then(|v| v.parse::<u32>().ok())
        .unwrap_or(5)
        .max(1)
}

/// Listen address for the API server.
pub fn bind_addr() -> String {
    std::env::var("BIND_ADDR").unwrap_or_else(|_| "0.0.0.0:8080".to_string())
}

/// Directory that stored asset paths are relative to (default: working directory).
pub fn asset_root() -> PathBuf {
    std::env::var("ASSET_ROOT")
        .ok()
        .filter(|v| !v.trim().is_empty())
        .map_or_else(|| PathBuf::from("."), PathBuf::from)
}

/// Single allowed CORS origin; `None` allows any origin.
pub fn cors_allowed_origin() -> Option<String> {
    std::env::var("CORS_ALLOWED_ORIGIN")
        .ok()
        .filter(|v| !v.trim().is_empty())
}
