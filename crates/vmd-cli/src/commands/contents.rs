//! `vmd courses` and `vmd contents ...`.

use anyhow::{bail, Context, Result};
use vmd_client::{FALLBACK_COURSES_LOAD, FALLBACK_GENERIC, FALLBACK_SAVE_FAILED};
use vmd_config::Surface;
use vmd_desk::{ContentDesk, DeskError, SwitchPolicy};
use vmd_reconcile::Direction;
use vmd_schemas::ContentItem;

use super::{api_failure, connect, quoted, ConfigArgs};

/// One `--op` argument.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReorderOp {
    Drag { from: usize, to: usize },
    Move { index: usize, direction: Direction },
}

impl ReorderOp {
    pub fn parse(raw: &str) -> Result<Self> {
        let parts: Vec<&str> = raw.trim().split(':').collect();
        let idx = |s: &str| -> Result<usize> {
            s.trim()
                .parse::<usize>()
                .with_context(|| format!("invalid index '{s}' in --op '{raw}'"))
        };
        match parts.as_slice() {
            ["drag", from, to] => Ok(ReorderOp::Drag {
                from: idx(*from)?,
                to: idx(*to)?,
            }),
            ["up", index] => Ok(ReorderOp::Move {
                index: idx(*index)?,
                direction: Direction::Up,
            }),
            ["down", index] => Ok(ReorderOp::Move {
                index: idx(*index)?,
                direction: Direction::Down,
            }),
            _ => bail!("invalid --op '{raw}'. expected one of: drag:FROM:TO | up:INDEX | down:INDEX"),
        }
    }
}

fn print_items(course_id: i64, items: &[ContentItem], dirty: bool) {
    println!("course_id={}", course_id);
    println!("items={}", items.len());
    println!("dirty={}", dirty);
    for (idx, it) in items.iter().enumerate() {
        println!(
            "item index={} order={} type={} content_id={} title={} meta={}",
            idx,
            it.order,
            it.content_type(),
            it.content_id,
            quoted(&it.title),
            quoted(it.meta_label().as_deref().unwrap_or("-")),
        );
    }
}

fn desk_failure(err: DeskError) -> anyhow::Error {
    anyhow::anyhow!("{}", err)
}

pub async fn courses(cfg: &ConfigArgs) -> Result<()> {
    let conn = connect(cfg, Surface::ContentOrder)?;
    let courses = conn
        .client
        .list_courses()
        .await
        .map_err(|e| api_failure(e, FALLBACK_COURSES_LOAD))?;

    println!("courses={}", courses.len());
    for c in &courses {
        println!(
            "course id={} published={} title={}",
            c.id,
            c.is_published,
            quoted(&c.title)
        );
    }
    Ok(())
}

pub async fn show(cfg: &ConfigArgs, course_id: i64) -> Result<()> {
    let conn = connect(cfg, Surface::ContentOrder)?;
    let desk = ContentDesk::with_success_ttl(conn.client, conn.settings.success_ttl);
    desk.select_course(course_id, SwitchPolicy::Force)
        .await
        .map_err(desk_failure)?;

    print_items(course_id, &desk.items().await, desk.is_dirty().await);
    Ok(())
}

pub async fn reorder(
    cfg: &ConfigArgs,
    course_id: i64,
    raw_ops: &[String],
    dry_run: bool,
) -> Result<()> {
    // Parse everything before touching the network.
    let ops = raw_ops
        .iter()
        .map(|r| ReorderOp::parse(r))
        .collect::<Result<Vec<_>>>()?;

    let conn = connect(cfg, Surface::ContentOrder)?;
    let desk = ContentDesk::with_success_ttl(conn.client, conn.settings.success_ttl);
    desk.select_course(course_id, SwitchPolicy::Force)
        .await
        .map_err(desk_failure)?;

    for op in &ops {
        let applied = match *op {
            ReorderOp::Drag { from, to } => desk.reorder(from, to).await,
            ReorderOp::Move { index, direction } => desk.move_item(index, direction).await,
        }
        .map_err(desk_failure)?;
        if !applied {
            eprintln!("WARN: op {:?} was a no-op", op);
        }
    }

    print_items(course_id, &desk.items().await, desk.is_dirty().await);

    let payload = desk
        .save_payload()
        .await
        .context("no course loaded")?;
    let body = serde_json::to_string(&payload).context("request body serialize failed")?;
    println!("request_body={}", body);

    if dry_run {
        println!("saved=false dry_run=true");
        return Ok(());
    }

    match desk.save().await {
        Ok(outcome) => {
            println!("saved=true course_id={}", outcome.course_id);
            if let Some(notice) = desk.current_notice().await {
                println!("notice={}", quoted(&notice.message));
            }
            Ok(())
        }
        Err(DeskError::Api { error, .. }) => Err(api_failure(error, FALLBACK_SAVE_FAILED)),
        Err(other) => Err(anyhow::anyhow!("{} ({})", FALLBACK_GENERIC, other)),
    }
}
