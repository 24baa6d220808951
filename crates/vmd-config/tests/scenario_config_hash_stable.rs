//! Config hash stability.
//!
//! - Same inputs, same hash.
//! - Key order inside YAML does not change the hash.
//! - Different values change the hash.
//! - Later layers override earlier ones.

use std::io::Write;

use vmd_config::{load_layered_yaml, load_layered_yaml_from_strings};

const BASE_YAML: &str = r#"
api:
  base_url: "https://videomaster-backend-production.up.railway.app"
  timeout_secs: 30
auth:
  token_env: "VMD_ADMIN_TOKEN"
  admin_key_env: "VMD_EMAIL_ADMIN_KEY"
notices:
  success_ttl_ms: 3000
"#;

const BASE_YAML_REORDERED: &str = r#"
notices:
  success_ttl_ms: 3000
auth:
  admin_key_env: "VMD_EMAIL_ADMIN_KEY"
  token_env: "VMD_ADMIN_TOKEN"
api:
  timeout_secs: 30
  base_url: "https://videomaster-backend-production.up.railway.app"
"#;

const LOCAL_OVERLAY: &str = r#"
api:
  base_url: "http://127.0.0.1:8000"
"#;

#[test]
fn same_inputs_same_hash() {
    let a = load_layered_yaml_from_strings(&[BASE_YAML]).unwrap();
    let b = load_layered_yaml_from_strings(&[BASE_YAML]).unwrap();
    assert_eq!(a.config_hash, b.config_hash);
    assert_eq!(a.canonical_json, b.canonical_json);
    assert_eq!(a.config_hash.len(), 64);
}

#[test]
fn key_order_does_not_change_hash() {
    let a = load_layered_yaml_from_strings(&[BASE_YAML]).unwrap();
    let b = load_layered_yaml_from_strings(&[BASE_YAML_REORDERED]).unwrap();
    assert_eq!(a.config_hash, b.config_hash);
}

#[test]
fn overlay_overrides_and_changes_hash() {
    let base = load_layered_yaml_from_strings(&[BASE_YAML]).unwrap();
    let merged = load_layered_yaml_from_strings(&[BASE_YAML, LOCAL_OVERLAY]).unwrap();

    assert_ne!(base.config_hash, merged.config_hash);
    assert_eq!(
        merged.config_json.pointer("/api/base_url").and_then(|v| v.as_str()),
        Some("http://127.0.0.1:8000")
    );
    // Sibling keys survive the deep merge.
    assert_eq!(
        merged.config_json.pointer("/api/timeout_secs").and_then(|v| v.as_u64()),
        Some(30)
    );
}

#[test]
fn files_hash_like_strings() {
    let mut base = tempfile::NamedTempFile::new().unwrap();
    base.write_all(BASE_YAML.as_bytes()).unwrap();
    let mut overlay = tempfile::NamedTempFile::new().unwrap();
    overlay.write_all(LOCAL_OVERLAY.as_bytes()).unwrap();

    let base_path = base.path().to_str().unwrap().to_string();
    let overlay_path = overlay.path().to_str().unwrap().to_string();

    let from_files = load_layered_yaml(&[&base_path, &overlay_path]).unwrap();
    let from_strings = load_layered_yaml_from_strings(&[BASE_YAML, LOCAL_OVERLAY]).unwrap();
    assert_eq!(from_files.config_hash, from_strings.config_hash);
}

#[test]
fn missing_file_names_the_path() {
    let err = load_layered_yaml(&["/definitely/not/here/vmd.yaml"])
        .unwrap_err()
        .to_string();
    assert!(err.contains("/definitely/not/here/vmd.yaml"), "{err}");
}
