//! vmd-config
//!
//! Layered YAML configuration for the admin client.
//!
//! - Documents merge left to right (base -> environment -> local override)
//! - The merged tree is hashed over its canonical JSON form
//! - Literal secrets are refused; YAML names env vars, never their values
//! - Keys no command reads are reported so typos and leftovers surface

pub mod secrets;
pub mod settings;

pub use settings::AdminSettings;

use anyhow::{bail, Context, Result};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use sha2::{Digest, Sha256};
use std::fs;

use settings::SETTINGS_POINTERS;

/// Prefixes of values that look like credentials. Any leaf string in the
/// effective config starting with one of these aborts with
/// CONFIG_SECRET_DETECTED.
const SECRET_PREFIXES: &[&str] = &[
    "eyJ",        // JWT (base64 of `{"`)
    "Bearer ",    // pasted Authorization header
    "sk-",        // OpenAI style
    "sk_live",    // Stripe live
    "sk_test",    // Stripe test
    "AKIA",       // AWS access key ID
    "-----BEGIN", // PEM private keys
    "ghp_",       // GitHub PAT
    "glpat-",     // GitLab PAT
    "xoxb-",      // Slack bot token
];

/// Command surface of the admin client.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Surface {
    ContentOrder,
    Carts,
    Reviews,
    Templates,
}

impl Surface {
    pub fn as_str(&self) -> &'static str {
        match self {
            Surface::ContentOrder => "CONTENT_ORDER",
            Surface::Carts => "CARTS",
            Surface::Reviews => "REVIEWS",
            Surface::Templates => "TEMPLATES",
        }
    }

    /// Whether calls on this surface authenticate with the bearer token
    /// (as opposed to the email-template admin key).
    pub fn uses_bearer(&self) -> bool {
        !matches!(self, Surface::Templates)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnusedKeyPolicy {
    Warn,
    Fail,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UnusedKeyReport {
    pub surface: String,
    /// Keys the command reads (sorted)
    pub consumed_prefixes: Vec<String>,
    /// Leaf keys present in the config that nothing reads (sorted)
    pub unused_leaf_pointers: Vec<String>,
}

impl UnusedKeyReport {
    pub fn is_clean(&self) -> bool {
        self.unused_leaf_pointers.is_empty()
    }
}

/// Report config leaves the command on `surface` will never read.
/// `Fail` turns a non-clean report into an error; `Warn` always returns it.
pub fn report_unused_keys(
    surface: Surface,
    config_json: &Value,
    policy: UnusedKeyPolicy,
) -> Result<UnusedKeyReport> {
    let mut consumed_prefixes: Vec<String> =
        SETTINGS_POINTERS.iter().map(|p| p.to_string()).collect();
    consumed_prefixes.sort();

    let mut unused = Vec::new();
    for_each_leaf(config_json, &mut |pointer, _| {
        if !SETTINGS_POINTERS.iter().any(|key| reads_leaf(key, pointer)) {
            unused.push(pointer.to_string());
        }
    });
    unused.sort();

    let report = UnusedKeyReport {
        surface: surface.as_str().to_string(),
        consumed_prefixes,
        unused_leaf_pointers: unused,
    };

    if policy == UnusedKeyPolicy::Fail && !report.is_clean() {
        let first: Vec<&String> = report.unused_leaf_pointers.iter().take(12).collect();
        bail!(
            "CONFIG_UNUSED_KEYS (surface={}): {} unused config leaf key(s). First few: {:?}",
            report.surface,
            report.unused_leaf_pointers.len(),
            first
        );
    }

    Ok(report)
}

/// A key also covers anything nested under it, e.g. a map-valued setting.
fn reads_leaf(key: &str, leaf: &str) -> bool {
    leaf.strip_prefix(key)
        .is_some_and(|rest| rest.is_empty() || rest.starts_with('/'))
}

/// Visit every scalar in the tree with its JSON pointer.
fn for_each_leaf<'a>(v: &'a Value, visit: &mut dyn FnMut(&str, &'a Value)) {
    fn walk<'a>(v: &'a Value, path: &mut String, visit: &mut dyn FnMut(&str, &'a Value)) {
        let len = path.len();
        match v {
            Value::Object(map) => {
                for (k, child) in map {
                    path.push('/');
                    path.push_str(&k.replace('~', "~0").replace('/', "~1"));
                    walk(child, path, visit);
                    path.truncate(len);
                }
            }
            Value::Array(items) => {
                for (i, child) in items.iter().enumerate() {
                    path.push_str(&format!("/{i}"));
                    walk(child, path, visit);
                    path.truncate(len);
                }
            }
            scalar => visit(if path.is_empty() { "/" } else { path.as_str() }, scalar),
        }
    }
    walk(v, &mut String::new(), visit);
}

#[derive(Debug, Clone)]
pub struct LoadedConfig {
    pub config_hash: String,
    pub canonical_json: String,
    pub config_json: Value,
}

impl LoadedConfig {
    /// Config with no layers: every setting takes its default.
    pub fn empty() -> Result<Self> {
        load_layered_yaml_from_strings(&["{}"])
    }
}

pub fn load_layered_yaml(paths: &[&str]) -> Result<LoadedConfig> {
    let docs = paths
        .iter()
        .map(|p| fs::read_to_string(p).with_context(|| format!("failed to read yaml path: {p}")))
        .collect::<Result<Vec<String>>>()?;

    let doc_refs: Vec<&str> = docs.iter().map(String::as_str).collect();
    load_layered_yaml_from_strings(&doc_refs)
}

pub fn load_layered_yaml_from_strings(yaml_docs: &[&str]) -> Result<LoadedConfig> {
    let mut merged = Value::Object(Map::new());
    for raw in yaml_docs {
        let layer: serde_yaml::Value = serde_yaml::from_str(raw).context("invalid yaml")?;
        let layer = serde_json::to_value(layer).context("yaml->json conversion failed")?;
        // An empty document parses as null; treat it as "no overrides".
        if !layer.is_null() {
            overlay(&mut merged, layer);
        }
    }

    refuse_secret_literals(&merged)?;

    // serde_json's default Map is ordered by key, so compact serialization is
    // already canonical.
    let canonical_json = serde_json::to_string(&merged).context("canonical json serialize failed")?;
    let config_hash = hex::encode(Sha256::digest(canonical_json.as_bytes()));
    Ok(LoadedConfig {
        config_hash,
        canonical_json,
        config_json: merged,
    })
}

/// Later layer wins per leaf; maps merge key by key.
fn overlay(base: &mut Value, layer: Value) {
    match (base, layer) {
        (Value::Object(base_map), Value::Object(layer_map)) => {
            for (k, v) in layer_map {
                overlay(base_map.entry(k).or_insert(Value::Null), v);
            }
        }
        (slot, v) => *slot = v,
    }
}

fn refuse_secret_literals(config: &Value) -> Result<()> {
    let mut offending: Option<String> = None;
    for_each_leaf(config, &mut |pointer, v| {
        if offending.is_none() && v.as_str().is_some_and(looks_like_secret) {
            offending = Some(pointer.to_string());
        }
    });
    if let Some(pointer) = offending {
        bail!("CONFIG_SECRET_DETECTED leaf={} value=REDACTED", pointer);
    }
    Ok(())
}

fn looks_like_secret(s: &str) -> bool {
    let t = s.trim_start();
    t.len() >= 8 && SECRET_PREFIXES.iter().any(|p| t.starts_with(p))
}
