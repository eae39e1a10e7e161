//! The content-to-relational synchronization engine.
//!
//! `run_sync` drives the whole flow: scan → connect → ensure schema →
//! bootstrap shared rows → one isolated transaction per item. Each item
//! passes through identity resolution, the upsert engine, and the child /
//! association synchronizers; a failure rolls back that item alone and is
//! recorded in the report while the batch keeps going.
//!
//! Dry runs execute the full validation and write path inside transactions
//! that are always rolled back, so the reported counts reflect what a real
//! run would do.

pub mod assoc;
pub mod bootstrap;
pub mod details;
pub mod identity;
pub mod upsert;

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use anyhow::Result;
use chrono::Utc;
use uuid::Uuid;

use crate::config::Config;
use crate::content;
use crate::db::Db;
use crate::error::SyncError;
use crate::models::{ContentType, Outcome, ParsedItem, SyncReport};

use assoc::{DictionaryAssoc, OwnedAssoc};
use bootstrap::Owner;
use details::DetailTable;

/// Per-item transaction handle.
pub type Tx<'a> = sqlx::Transaction<'a, sqlx::Any>;

/// Cooperative cancellation: checked before each item's transaction opens,
/// so stopping never leaves a partial transaction behind.
pub type CancelFlag = Arc<AtomicBool>;

pub fn cancel_flag() -> CancelFlag {
    Arc::new(AtomicBool::new(false))
}

#[derive(Debug, Default, Clone)]
pub struct SyncOptions {
    pub dry_run: bool,
    pub limit: Option<usize>,
    pub type_filter: Option<ContentType>,
}

/// Run one full synchronization batch.
///
/// Fatal failures (configuration, connection, schema, bootstrap) abort
/// before any item is processed. Item-scoped failures never do.
pub async fn run_sync(
    config: &Config,
    options: &SyncOptions,
    cancel: &CancelFlag,
) -> Result<SyncReport, SyncError> {
    let started_at = Utc::now().timestamp();

    let scan = content::scan_content(&config.content.root, options.type_filter)
        .map_err(|e| SyncError::Config(format!("{e:#}")))?;

    let mut items = scan.items;
    if let Some(limit) = options.limit {
        items.truncate(limit);
    }

    let mut report = SyncReport {
        scanned: items.len() as u64,
        ..SyncReport::default()
    };
    // Files the scanner could not parse count as failed items.
    report.errors.extend(scan.errors);

    let db = Db::connect(&config.database).await?;
    crate::migrate::ensure_schema(&db).await?;

    let owner = bootstrap::get_or_create_owner(&db, &config.owner).await?;
    bootstrap::ensure_languages(&db, &config.languages).await?;

    sync_owner_profile(&db, &owner, config, options.dry_run)
        .await
        .map_err(|e| SyncError::Bootstrap(format!("social links: {e:#}")))?;

    for item in &items {
        if cancel.load(Ordering::Relaxed) {
            tracing::info!("cancellation requested, stopping before next item");
            break;
        }

        let mut tx = match db.begin().await {
            Ok(tx) => tx,
            Err(e) => {
                report.record_error(&item.source_path, &format!("begin transaction: {e}"));
                continue;
            }
        };

        match write_item(&db, &mut tx, &owner, item).await {
            Ok(outcome) => {
                let finished = if options.dry_run {
                    tx.rollback().await
                } else {
                    tx.commit().await
                };
                match finished {
                    Ok(()) => report.record(outcome),
                    Err(e) => {
                        report.record_error(&item.source_path, &format!("commit: {e}"));
                    }
                }
            }
            Err(e) => {
                if let Err(rollback_err) = tx.rollback().await {
                    tracing::warn!(error = %rollback_err, "rollback failed");
                }
                report.record_error(&item.source_path, &format!("{e:#}"));
            }
        }
    }

    if !options.dry_run {
        if let Err(e) = record_run(&db, started_at, options.dry_run, &report, &config.fingerprint).await
        {
            tracing::warn!(error = %e, "failed to record run summary");
        }
    }

    db.close().await;
    Ok(report)
}

/// Write path for one item: resolve identity, upsert the entity, then
/// synchronize its child lists and associations. Any error aborts to the
/// caller's rollback.
async fn write_item(
    db: &Db,
    tx: &mut Tx<'_>,
    owner: &Owner,
    item: &ParsedItem,
) -> Result<Outcome> {
    let key = identity::resolve(
        item.content_type,
        &item.scalar_fields,
        item.natural_key_hint.as_deref(),
    )?;

    let (entity_id, outcome) = upsert::upsert(db, tx, &owner.id, item, &key).await?;

    if let Some(table) = DetailTable::for_type(item.content_type) {
        if let Some(texts) = item.child_lists.get("details") {
            details::sync_details(db, tx, table, &entity_id, texts).await?;
        }
    }

    match item.content_type {
        ContentType::Blog => {
            if let Some(values) = item.associations.get("tags") {
                assoc::sync_dictionary(db, tx, DictionaryAssoc::BlogTags, &entity_id, values)
                    .await?;
            }
            if let Some(values) = item.associations.get("categories") {
                assoc::sync_dictionary(db, tx, DictionaryAssoc::BlogCategories, &entity_id, values)
                    .await?;
            }
        }
        ContentType::Idea => {
            if let Some(values) = item.associations.get("tags") {
                assoc::sync_dictionary(db, tx, DictionaryAssoc::IdeaTags, &entity_id, values)
                    .await?;
            }
        }
        ContentType::Project => {
            if let Some(values) = item.associations.get("technologies") {
                assoc::sync_owned(db, tx, OwnedAssoc::ProjectTechnologies, &entity_id, values)
                    .await?;
            }
        }
        ContentType::Publication => {
            if let Some(values) = item.associations.get("authors") {
                assoc::sync_owned(db, tx, OwnedAssoc::PublicationAuthors, &entity_id, values)
                    .await?;
            }
        }
        ContentType::Update
        | ContentType::Education
        | ContentType::Experience
        | ContentType::Research
        | ContentType::Award => {}
    }

    Ok(outcome)
}

/// Replace-all sync of the owner's social links from the config profile.
async fn sync_owner_profile(
    db: &Db,
    owner: &Owner,
    config: &Config,
    dry_run: bool,
) -> Result<()> {
    let mut tx = db.begin().await?;
    assoc::sync_social_links(db, &mut tx, &owner.id, &config.owner.social).await?;
    if dry_run {
        tx.rollback().await?;
    } else {
        tx.commit().await?;
    }
    Ok(())
}

/// Append one run-summary row. Best effort: the engine never reads these
/// back; they exist for `folio status` and postmortems.
async fn record_run(
    db: &Db,
    started_at: i64,
    dry_run: bool,
    report: &SyncReport,
    fingerprint: &str,
) -> Result<(), sqlx::Error> {
    let sql = db.sql(
        "INSERT INTO sync_runs \
         (id, started_at, finished_at, dry_run, created, updated, error_count, config_fingerprint) \
         VALUES (?, ?, ?, ?, ?, ?, ?, ?)",
    );
    sqlx::query(&sql)
        .bind(Uuid::new_v4().to_string())
        .bind(started_at)
        .bind(Utc::now().timestamp())
        .bind(i32::from(dry_run))
        .bind(report.created as i64)
        .bind(report.updated as i64)
        .bind(report.errors.len() as i64)
        .bind(fingerprint)
        .execute(db.pool())
        .await?;
    Ok(())
}
