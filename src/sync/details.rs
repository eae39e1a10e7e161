//! Child detail synchronization (resume bullet points).
//!
//! Detail rows are create-once: if an entity already has any detail rows,
//! a later sync leaves them alone instead of appending again. This keeps
//! repeated syncs from growing the list without bound, at the cost that
//! edits to already-synced detail text are not picked up — delete the rows
//! by hand to re-sync them.

use anyhow::Result;
use uuid::Uuid;

use crate::db::Db;
use crate::models::ContentType;
use crate::sync::Tx;

/// Tables that hold ordered detail rows, one per parent content type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DetailTable {
    Education,
    Experience,
    Research,
}

impl DetailTable {
    pub fn for_type(content_type: ContentType) -> Option<DetailTable> {
        match content_type {
            ContentType::Education => Some(DetailTable::Education),
            ContentType::Experience => Some(DetailTable::Experience),
            ContentType::Research => Some(DetailTable::Research),
            _ => None,
        }
    }

    fn table(self) -> &'static str {
        match self {
            DetailTable::Education => "education_details",
            DetailTable::Experience => "experience_details",
            DetailTable::Research => "research_details",
        }
    }
}

/// Insert one row per non-blank entry, preserving input order, unless the
/// parent already has detail rows (then this is a no-op returning 0).
pub async fn sync_details(
    db: &Db,
    tx: &mut Tx<'_>,
    table: DetailTable,
    parent_id: &str,
    texts: &[String],
) -> Result<u64> {
    let count_query = format!("SELECT COUNT(*) FROM {} WHERE parent_id = ?", table.table());
    let count_sql = db.sql(&count_query);
    let existing: i64 = sqlx::query_scalar(&count_sql)
        .bind(parent_id)
        .fetch_one(&mut **tx)
        .await?;

    if existing > 0 {
        return Ok(0);
    }

    let insert_query = format!(
        "INSERT INTO {} (id, parent_id, sort_order, detail) VALUES (?, ?, ?, ?)",
        table.table()
    );
    let insert_sql = db.sql(&insert_query);

    let mut inserted = 0u64;
    for (index, text) in texts.iter().enumerate() {
        let trimmed = text.trim();
        if trimmed.is_empty() {
            continue;
        }
        sqlx::query(&insert_sql)
            .bind(Uuid::new_v4().to_string())
            .bind(parent_id)
            .bind(index as i32)
            .bind(trimmed)
            .execute(&mut **tx)
            .await?;
        inserted += 1;
    }

    Ok(inserted)
}
