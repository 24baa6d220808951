//! Typed view over the merged config tree.

use anyhow::{bail, Result};
use serde_json::Value;
use std::time::Duration;

pub const DEFAULT_BASE_URL: &str = "https://videomaster-backend-production.up.railway.app";
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;
pub const DEFAULT_TOKEN_ENV: &str = "VMD_ADMIN_TOKEN";
pub const DEFAULT_ADMIN_KEY_ENV: &str = "VMD_EMAIL_ADMIN_KEY";
pub const DEFAULT_SUCCESS_TTL_MS: u64 = 3000;

/// Every key [`AdminSettings::from_config_json`] reads. All command surfaces
/// build the same settings, so all of them consume this whole set.
pub const SETTINGS_POINTERS: &[&str] = &[
    "/api/base_url",
    "/api/timeout_secs",
    "/auth/token_env",
    "/auth/admin_key_env",
    "/notices/success_ttl_ms",
];

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AdminSettings {
    pub base_url: String,
    pub timeout: Duration,
    /// Env var NAME holding the bearer token.
    pub token_env: String,
    /// Env var NAME holding the email-template admin key.
    pub admin_key_env: String,
    pub success_ttl: Duration,
}

impl Default for AdminSettings {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            token_env: DEFAULT_TOKEN_ENV.to_string(),
            admin_key_env: DEFAULT_ADMIN_KEY_ENV.to_string(),
            success_ttl: Duration::from_millis(DEFAULT_SUCCESS_TTL_MS),
        }
    }
}

fn read_str(config: &Value, pointer: &str) -> Option<String> {
    let s = config.pointer(pointer)?.as_str()?.trim();
    (!s.is_empty()).then(|| s.to_string())
}

fn read_u64(config: &Value, pointer: &str) -> Result<Option<u64>> {
    match config.pointer(pointer) {
        None | Some(Value::Null) => Ok(None),
        Some(v) => match v.as_u64() {
            Some(n) => Ok(Some(n)),
            None => bail!("CONFIG_INVALID {pointer}: expected a non-negative integer"),
        },
    }
}

impl AdminSettings {
    /// Missing keys fall back to defaults; present keys of the wrong shape
    /// are errors.
    pub fn from_config_json(config: &Value) -> Result<Self> {
        let d = Self::default();

        let base_url = read_str(config, "/api/base_url")
            .map(|s| s.trim_end_matches('/').to_string())
            .unwrap_or(d.base_url);
        if !(base_url.starts_with("http://") || base_url.starts_with("https://")) {
            bail!("CONFIG_INVALID /api/base_url: must start with http:// or https://");
        }

        let timeout_secs = read_u64(config, "/api/timeout_secs")?.unwrap_or(DEFAULT_TIMEOUT_SECS);
        if timeout_secs == 0 {
            bail!("CONFIG_INVALID /api/timeout_secs: must be > 0");
        }

        let success_ttl_ms =
            read_u64(config, "/notices/success_ttl_ms")?.unwrap_or(DEFAULT_SUCCESS_TTL_MS);

        Ok(Self {
            base_url,
            timeout: Duration::from_secs(timeout_secs),
            token_env: read_str(config, "/auth/token_env").unwrap_or(d.token_env),
            admin_key_env: read_str(config, "/auth/admin_key_env").unwrap_or(d.admin_key_env),
            success_ttl: Duration::from_millis(success_ttl_ms),
        })
    }
}
