//! Database status overview.
//!
//! Gives a quick summary of what's synced: row counts per content table,
//! dictionary sizes, and the most recent sync run. Used by `folio status`
//! to confirm syncs are landing where expected.

use anyhow::Result;
use sqlx::Row;

use crate::config::{Config, DatabaseConfig};
use crate::db::Db;
use crate::migrate;

const CONTENT_TABLES: &[(&str, &str)] = &[
    ("blog posts", "blog_posts"),
    ("projects", "projects"),
    ("ideas", "ideas"),
    ("updates", "updates"),
    ("education", "education"),
    ("experience", "work_experiences"),
    ("research", "research_projects"),
    ("publications", "publications"),
    ("awards", "awards"),
];

const DICTIONARY_TABLES: &[(&str, &str)] = &[("tags", "tags"), ("categories", "categories")];

pub async fn run_status(config: &Config) -> Result<()> {
    let db = Db::connect(&config.database).await?;
    migrate::ensure_schema(&db).await?;

    println!("Folio — Database Status");
    println!("=======================");
    println!();
    match &config.database {
        DatabaseConfig::Sqlite { path } => {
            let size = std::fs::metadata(path).map(|m| m.len()).unwrap_or(0);
            println!("  Backend:   sqlite ({})", path.display());
            println!("  Size:      {}", format_bytes(size));
        }
        DatabaseConfig::Mysql { host, name, .. } => {
            println!("  Backend:   mysql ({host}/{name})");
        }
        DatabaseConfig::Postgres { host, name, .. } => {
            println!("  Backend:   postgres ({host}/{name})");
        }
    }
    println!();

    println!("  {:<16} {:>6}", "CONTENT", "ROWS");
    println!("  {}", "-".repeat(24));
    for (label, table) in CONTENT_TABLES {
        let count = count_rows(&db, table).await?;
        println!("  {label:<16} {count:>6}");
    }

    println!();
    for (label, table) in DICTIONARY_TABLES {
        let count = count_rows(&db, table).await?;
        println!("  {label}: {count}");
    }

    let last_run = sqlx::query(
        "SELECT started_at, finished_at, dry_run, created, updated, error_count \
         FROM sync_runs ORDER BY started_at DESC",
    )
    .fetch_all(db.pool())
    .await?;

    println!();
    match last_run.first() {
        None => println!("  Last sync: never"),
        Some(row) => {
            let finished: i64 = row.try_get("finished_at")?;
            let created: i64 = row.try_get("created")?;
            let updated: i64 = row.try_get("updated")?;
            let errors: i64 = row.try_get("error_count")?;
            println!(
                "  Last sync: {} (created {}, updated {}, errors {})",
                format_ts_relative(finished),
                created,
                updated,
                errors
            );
            println!("  Total runs: {}", last_run.len());
        }
    }
    println!();

    db.close().await;
    Ok(())
}

async fn count_rows(db: &Db, table: &str) -> Result<i64> {
    let query = format!("SELECT COUNT(*) FROM {table}");
    let count = sqlx::query_scalar(&query).fetch_one(db.pool()).await?;
    Ok(count)
}

fn format_bytes(bytes: u64) -> String {
    if bytes < 1024 {
        format!("{} B", bytes)
    } else if bytes < 1024 * 1024 {
        format!("{:.1} KB", bytes as f64 / 1024.0)
    } else {
        format!("{:.1} MB", bytes as f64 / (1024.0 * 1024.0))
    }
}

/// Format a Unix timestamp as a relative time string (e.g. "3 hours ago").
fn format_ts_relative(ts: i64) -> String {
    let now = chrono::Utc::now().timestamp();
    let delta = now - ts;

    if delta < 0 {
        return format_ts_iso(ts);
    }

    if delta < 60 {
        "just now".to_string()
    } else if delta < 3600 {
        let mins = delta / 60;
        format!("{} min{} ago", mins, if mins == 1 { "" } else { "s" })
    } else if delta < 86400 {
        let hours = delta / 3600;
        format!("{} hour{} ago", hours, if hours == 1 { "" } else { "s" })
    } else if delta < 86400 * 30 {
        let days = delta / 86400;
        format!("{} day{} ago", days, if days == 1 { "" } else { "s" })
    } else {
        format_ts_iso(ts)
    }
}

fn format_ts_iso(ts: i64) -> String {
    chrono::DateTime::from_timestamp(ts, 0)
        .map(|dt| dt.format("%Y-%m-%d %H:%M").to_string())
        .unwrap_or_else(|| ts.to_string())
}
