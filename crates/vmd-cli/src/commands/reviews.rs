//! `vmd reviews ...`: moderation.

use anyhow::{bail, Result};
use vmd_admin::reviews::{author, search, stats_or_fallback, ReviewFilter};
use vmd_client::FALLBACK_GENERIC;
use vmd_config::Surface;

use super::{api_failure, connect, quoted, ConfigArgs};

pub async fn list(cfg: &ConfigArgs, status: &str, term: Option<&str>) -> Result<()> {
    let Some(filter) = ReviewFilter::parse(status) else {
        bail!("invalid --status '{status}'. expected one of: all | pending | approved | hidden");
    };

    let conn = connect(cfg, Surface::Reviews)?;
    let page = conn
        .client
        .list_reviews(filter)
        .await
        .map_err(|e| api_failure(e, FALLBACK_GENERIC))?;

    let stats = stats_or_fallback(&page);
    println!(
        "stats total={} approved={} pending={} hidden={} average_rating={:.1}",
        stats.total, stats.approved, stats.pending, stats.hidden, stats.average_rating
    );

    let shown = search(&page.reviews, term.unwrap_or(""));
    println!("reviews={}", shown.len());
    for r in shown {
        println!(
            "review id={} rating={} approved={} visible={} author={} title={}",
            r.id,
            r.rating,
            r.is_approved,
            r.is_visible,
            quoted(author(r)),
            quoted(r.title.as_deref().unwrap_or("")),
        );
    }
    Ok(())
}

pub async fn approve(cfg: &ConfigArgs, id: i64, current: bool) -> Result<()> {
    let conn = connect(cfg, Surface::Reviews)?;
    conn.client
        .toggle_review_approval(id, current)
        .await
        .map_err(|e| api_failure(e, FALLBACK_GENERIC))?;
    println!("review_id={} approved={}", id, !current);
    Ok(())
}

pub async fn visibility(cfg: &ConfigArgs, id: i64, current: bool) -> Result<()> {
    let conn = connect(cfg, Surface::Reviews)?;
    conn.client
        .toggle_review_visibility(id, current)
        .await
        .map_err(|e| api_failure(e, FALLBACK_GENERIC))?;
    println!("review_id={} visible={}", id, !current);
    Ok(())
}

pub async fn delete(cfg: &ConfigArgs, id: i64, yes: bool) -> Result<()> {
    // Guardrail: deletion is permanent.
    if !yes {
        bail!("REFUSING DELETE: review {id} would be removed permanently. Re-run with: `vmd reviews delete --id {id} --yes`");
    }

    let conn = connect(cfg, Surface::Reviews)?;
    conn.client
        .delete_review(id)
        .await
        .map_err(|e| api_failure(e, FALLBACK_GENERIC))?;
    println!("deleted=true review_id={}", id);
    Ok(())
}
