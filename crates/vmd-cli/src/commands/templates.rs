//! `vmd templates ...`: email templates.

use anyhow::{Context, Result};
use std::fs;
use vmd_admin::templates::{render_preview, unknown_placeholders};
use vmd_client::{AdminClient, FALLBACK_GENERIC};
use vmd_config::Surface;
use vmd_schemas::EmailTemplate;

use super::{api_failure, connect, quoted, ConfigArgs};

/// Field overrides for `templates update`; `None` keeps the stored value.
pub struct UpdateFields {
    pub display_name: Option<String>,
    pub subject: Option<String>,
    pub html_file: Option<String>,
    pub description: Option<String>,
}

async fn find(client: &AdminClient, name: &str) -> Result<EmailTemplate> {
    let templates = client
        .list_email_templates()
        .await
        .map_err(|e| api_failure(e, FALLBACK_GENERIC))?;
    templates
        .into_iter()
        .find(|t| t.name == name)
        .with_context(|| format!("template not found: {name}"))
}

pub async fn list(cfg: &ConfigArgs) -> Result<()> {
    let conn = connect(cfg, Surface::Templates)?;
    let templates = conn
        .client
        .list_email_templates()
        .await
        .map_err(|e| api_failure(e, FALLBACK_GENERIC))?;

    println!("templates={}", templates.len());
    for t in &templates {
        println!(
            "template name={} display_name={} subject={} variables={}",
            t.name,
            quoted(&t.display_name),
            quoted(&t.subject),
            t.variable_names().join(","),
        );
    }
    Ok(())
}

pub async fn seed(cfg: &ConfigArgs) -> Result<()> {
    let conn = connect(cfg, Surface::Templates)?;
    let resp = conn
        .client
        .seed_default_templates()
        .await
        .map_err(|e| api_failure(e, FALLBACK_GENERIC))?;
    println!("created={}", resp.created.len());
    for name in &resp.created {
        println!("  created_template={}", name);
    }
    Ok(())
}

pub async fn update(cfg: &ConfigArgs, name: &str, fields: UpdateFields) -> Result<()> {
    // Read the file first so a bad path never reaches the backend.
    let html = match fields.html_file.as_deref() {
        Some(p) => Some(fs::read_to_string(p).with_context(|| format!("read html-file failed: {p}"))?),
        None => None,
    };

    let conn = connect(cfg, Surface::Templates)?;
    let current = find(&conn.client, name).await?;

    let mut body = current.to_update();
    if let Some(v) = fields.display_name {
        body.display_name = v;
    }
    if let Some(v) = fields.subject {
        body.subject = v;
    }
    if let Some(v) = html {
        body.html_content = v;
    }
    if let Some(v) = fields.description {
        body.description = v;
    }

    for p in unknown_placeholders(&body.html_content) {
        eprintln!("WARN: placeholder {{{}}} has no preview value", p);
    }

    let stored = conn
        .client
        .update_email_template(name, &body)
        .await
        .map_err(|e| api_failure(e, FALLBACK_GENERIC))?;
    println!("updated=true name={}", stored.name);
    println!("subject={}", quoted(&stored.subject));
    Ok(())
}

pub async fn preview(cfg: &ConfigArgs, name: &str) -> Result<()> {
    let conn = connect(cfg, Surface::Templates)?;
    let t = find(&conn.client, name).await?;

    for p in unknown_placeholders(&t.html_content) {
        eprintln!("WARN: placeholder {{{}}} has no preview value", p);
    }
    println!("name={}", t.name);
    println!("subject={}", quoted(&render_preview(&t.subject)));
    println!("{}", render_preview(&t.html_content));
    Ok(())
}
