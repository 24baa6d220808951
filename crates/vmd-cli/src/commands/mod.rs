//! Command handler modules for vmd-cli.
//!
//! Shared config/session wiring lives here; each screen has its own module.

pub mod carts;
pub mod contents;
pub mod reviews;
pub mod templates;

use anyhow::{Context, Result};
use vmd_client::{AdminClient, ApiError, Session};
use vmd_config::secrets::resolve_secrets;
use vmd_config::{report_unused_keys, AdminSettings, LoadedConfig, Surface, UnusedKeyPolicy};

/// Global `--config` / `--strict-config` flags.
pub struct ConfigArgs {
    pub paths: Vec<String>,
    pub strict: bool,
}

pub struct Connected {
    pub client: AdminClient,
    pub settings: AdminSettings,
}

fn load(cfg: &ConfigArgs) -> Result<LoadedConfig> {
    if cfg.paths.is_empty() {
        return LoadedConfig::empty();
    }
    let path_refs: Vec<&str> = cfg.paths.iter().map(|s| s.as_str()).collect();
    vmd_config::load_layered_yaml(&path_refs)
}

/// Load config, report unused keys, resolve the surface's credential and
/// build the client.
pub fn connect(cfg: &ConfigArgs, surface: Surface) -> Result<Connected> {
    let loaded = load(cfg)?;

    let policy = if cfg.strict {
        UnusedKeyPolicy::Fail
    } else {
        UnusedKeyPolicy::Warn
    };
    let report = report_unused_keys(surface, &loaded.config_json, policy)?;
    if !report.is_clean() {
        eprintln!(
            "WARN: CONFIG_UNUSED_KEYS surface={} unused_leaf_keys={}",
            report.surface,
            report.unused_leaf_pointers.len()
        );
        for p in report.unused_leaf_pointers.iter().take(50) {
            eprintln!("  unused={}", p);
        }
    }

    let settings = AdminSettings::from_config_json(&loaded.config_json)?;
    let secrets = resolve_secrets(&loaded.config_json, surface)?;

    let mut session = Session::new(settings.base_url.clone());
    if let Some(token) = secrets.bearer_token {
        session = session.with_bearer_token(token);
    }
    if let Some(key) = secrets.admin_key {
        session = session.with_admin_key(key);
    }

    tracing::debug!(
        surface = surface.as_str(),
        base_url = %settings.base_url,
        config_hash = %loaded.config_hash,
        "session ready"
    );

    let client = AdminClient::new(session, settings.timeout).context("http client init failed")?;
    Ok(Connected { client, settings })
}

/// Turn a backend error into the operator-facing message.
pub fn api_failure(err: ApiError, fallback: &str) -> anyhow::Error {
    anyhow::anyhow!("{} ({})", err.user_message(fallback), err)
}

/// Quote a free-text value for `key="value"` output.
pub fn quoted(s: &str) -> String {
    format!("{:?}", s)
}
