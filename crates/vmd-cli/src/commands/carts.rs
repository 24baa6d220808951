//! `vmd carts ...`: abandoned-cart recovery.

use anyhow::{bail, Result};
use chrono::Utc;
use vmd_admin::cart::{can_send_first_manually, elapsed_label, email_stage, next_action, StageFilter};
use vmd_client::FALLBACK_GENERIC;
use vmd_config::Surface;
use vmd_schemas::RecoveryAction;

use super::{api_failure, connect, quoted, ConfigArgs};

pub async fn list(cfg: &ConfigArgs, stage: &str) -> Result<()> {
    let Some(filter) = StageFilter::parse(stage) else {
        bail!("invalid --stage '{stage}'. expected one of: all | 1hour | 24hour | 72hour");
    };

    let conn = connect(cfg, Surface::Carts)?;
    let orders = conn
        .client
        .abandoned_orders(filter)
        .await
        .map_err(|e| api_failure(e, FALLBACK_GENERIC))?;

    let now = Utc::now();
    println!("orders={}", orders.len());
    for o in &orders {
        let elapsed = o
            .abandoned_at
            .map(|t| elapsed_label(t, now))
            .unwrap_or_else(|| "-".to_string());
        let next = next_action(o, now)
            .map(|a| a.as_str())
            .unwrap_or("none");
        println!(
            "order id={} code={} email={} amount={:.2} stage={} elapsed={} next_action={} manual_send1={}",
            o.id,
            o.order_code,
            o.user_email,
            o.amount,
            quoted(email_stage(o).label()),
            quoted(&elapsed),
            next,
            can_send_first_manually(o),
        );
    }
    Ok(())
}

pub async fn stats(cfg: &ConfigArgs) -> Result<()> {
    let conn = connect(cfg, Surface::Carts)?;
    let s = conn
        .client
        .cart_stats()
        .await
        .map_err(|e| api_failure(e, FALLBACK_GENERIC))?;

    println!("total_abandoned={}", s.total_abandoned);
    println!("recovered={}", s.recovered);
    println!("pending_emails={}", s.pending_emails);
    println!("recovery_rate={:.1}", s.recovery_rate);
    println!("potential_revenue={:.2}", s.potential_revenue);
    Ok(())
}

pub async fn trigger(cfg: &ConfigArgs) -> Result<()> {
    let conn = connect(cfg, Surface::Carts)?;
    let resp = conn
        .client
        .trigger_recovery_emails()
        .await
        .map_err(|e| api_failure(e, FALLBACK_GENERIC))?;
    println!("emails_sent={}", resp.emails_sent);
    Ok(())
}

pub async fn send(cfg: &ConfigArgs, order_id: i64, stage: &str) -> Result<()> {
    let Some(action) = RecoveryAction::parse(stage) else {
        bail!("invalid --stage '{stage}'. expected one of: send1 | send2 | send3");
    };

    let conn = connect(cfg, Surface::Carts)?;
    let ack = conn
        .client
        .send_recovery_email(order_id, action)
        .await
        .map_err(|e| api_failure(e, FALLBACK_GENERIC))?;

    println!("sent=true order_id={} stage={}", order_id, action);
    if let Some(m) = ack.message {
        println!("message={}", quoted(&m));
    }
    Ok(())
}
