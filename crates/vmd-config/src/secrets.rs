//! Runtime secret resolution.
//!
//! # Contract
//! - Config YAML stores only env var NAMES (e.g. `"VMD_ADMIN_TOKEN"`).
//! - Callers resolve once per command via [`resolve_secrets`] and pass the
//!   result to the client; nothing else reads `std::env` for credentials.
//! - `Debug` redacts values. Errors name the env var, never its value.
//!
//! # Surface enforcement
//! | Surface                         | Required        |
//! |---------------------------------|-----------------|
//! | CONTENT_ORDER, CARTS, REVIEWS   | bearer token    |
//! | TEMPLATES                       | admin key       |

use anyhow::{bail, Result};
use serde_json::Value;

use crate::{AdminSettings, Surface};

#[derive(Clone)]
pub struct ResolvedSecrets {
    /// Bearer token. `None` if the named env var was absent or blank.
    pub bearer_token: Option<String>,
    /// Email-template admin key. `None` if the named env var was absent or blank.
    pub admin_key: Option<String>,
}

impl std::fmt::Debug for ResolvedSecrets {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ResolvedSecrets")
            .field(
                "bearer_token",
                &self.bearer_token.as_ref().map(|_| "<REDACTED>"),
            )
            .field("admin_key", &self.admin_key.as_ref().map(|_| "<REDACTED>"))
            .finish()
    }
}

/// Returns `None` if the variable is unset or blank.
fn resolve_env(var_name: &str) -> Option<String> {
    match std::env::var(var_name) {
        Ok(v) if !v.trim().is_empty() => Some(v.trim().to_string()),
        _ => None,
    }
}

/// Resolve credentials for `surface`, failing with `SECRETS_MISSING` and the
/// env var NAME when the surface's required credential is absent.
pub fn resolve_secrets(config_json: &Value, surface: Surface) -> Result<ResolvedSecrets> {
    let settings = AdminSettings::from_config_json(config_json)?;

    let bearer_token = resolve_env(&settings.token_env);
    let admin_key = resolve_env(&settings.admin_key_env);

    if surface.uses_bearer() {
        if bearer_token.is_none() {
            bail!(
                "SECRETS_MISSING surface={}: required env var '{}' (bearer token) is not set or empty",
                surface.as_str(),
                settings.token_env,
            );
        }
    } else if admin_key.is_none() {
        bail!(
            "SECRETS_MISSING surface={}: required env var '{}' (email admin key) is not set or empty",
            surface.as_str(),
            settings.admin_key_env,
        );
    }

    Ok(ResolvedSecrets {
        bearer_token,
        admin_key,
    })
}
