//! Race-safe bootstrap of shared prerequisite rows.
//!
//! Every content row references the owner user, and language rows are
//! shared dictionary entries. Both are created at most once per natural key
//! (username, language code) through an explicit Lookup → Create →
//! Reconcile state machine: a uniqueness violation on insert means another
//! writer got there first, so the row is re-queried instead of surfacing
//! the violation. A row that is still missing after Reconcile indicates a
//! broken unique constraint and is fatal.

use chrono::Utc;
use uuid::Uuid;

use crate::config::{LanguageSpec, OwnerProfile};
use crate::db::Db;
use crate::error::SyncError;

#[derive(Debug, Clone)]
pub struct Owner {
    pub id: String,
    pub username: String,
}

#[derive(Debug, Clone)]
pub struct Language {
    pub id: String,
    pub code: String,
}

pub async fn get_or_create_owner(db: &Db, profile: &OwnerProfile) -> Result<Owner, SyncError> {
    // Lookup
    if let Some(id) = find_owner(db, &profile.username)
        .await
        .map_err(|e| SyncError::Bootstrap(format!("owner lookup failed: {e}")))?
    {
        return Ok(Owner {
            id,
            username: profile.username.clone(),
        });
    }

    // Create
    let id = Uuid::new_v4().to_string();
    let now = Utc::now().timestamp();
    let sql = db.sql(
        "INSERT INTO users (id, username, email, display_name, created_at, updated_at) \
         VALUES (?, ?, ?, ?, ?, ?)",
    );
    let insert = sqlx::query(&sql)
        .bind(&id)
        .bind(&profile.username)
        .bind(&profile.email)
        .bind(profile.display_name.as_deref())
        .bind(now)
        .bind(now)
        .execute(db.pool())
        .await;

    match insert {
        Ok(_) => Ok(Owner {
            id,
            username: profile.username.clone(),
        }),
        // Reconcile: lost the race to a concurrent writer; their row wins.
        Err(e) if is_unique_violation(&e) => {
            tracing::debug!(username = %profile.username, "owner insert lost a race, re-querying");
            let id = find_owner(db, &profile.username)
                .await
                .map_err(|e| SyncError::Bootstrap(format!("owner re-query failed: {e}")))?
                .ok_or_else(|| {
                    SyncError::Bootstrap(format!(
                        "user '{}' missing after losing insert race",
                        profile.username
                    ))
                })?;
            Ok(Owner {
                id,
                username: profile.username.clone(),
            })
        }
        Err(e) => Err(SyncError::Bootstrap(format!("owner insert failed: {e}"))),
    }
}

async fn find_owner(db: &Db, username: &str) -> Result<Option<String>, sqlx::Error> {
    let sql = db.sql("SELECT id FROM users WHERE username = ?");
    sqlx::query_scalar(&sql)
        .bind(username)
        .fetch_optional(db.pool())
        .await
}

/// Get-or-create each configured language row by code.
pub async fn ensure_languages(
    db: &Db,
    specs: &[LanguageSpec],
) -> Result<Vec<Language>, SyncError> {
    let mut languages = Vec::with_capacity(specs.len());
    for spec in specs {
        let id = get_or_create_language(db, spec)
            .await
            .map_err(|e| SyncError::Bootstrap(format!("language '{}': {e}", spec.code)))?;
        languages.push(Language {
            id,
            code: spec.code.clone(),
        });
    }
    Ok(languages)
}

async fn get_or_create_language(db: &Db, spec: &LanguageSpec) -> Result<String, sqlx::Error> {
    let lookup = db.sql("SELECT id FROM languages WHERE code = ?");
    if let Some(id) = sqlx::query_scalar::<_, String>(&lookup)
        .bind(&spec.code)
        .fetch_optional(db.pool())
        .await?
    {
        return Ok(id);
    }

    let id = Uuid::new_v4().to_string();
    let insert = db.sql("INSERT INTO languages (id, code, name) VALUES (?, ?, ?)");
    let result = sqlx::query(&insert)
        .bind(&id)
        .bind(&spec.code)
        .bind(&spec.name)
        .execute(db.pool())
        .await;

    match result {
        Ok(_) => Ok(id),
        Err(e) if is_unique_violation(&e) => sqlx::query_scalar(&lookup)
            .bind(&spec.code)
            .fetch_one(db.pool())
            .await,
        Err(e) => Err(e),
    }
}

pub(crate) fn is_unique_violation(error: &sqlx::Error) -> bool {
    matches!(error, sqlx::Error::Database(db_err) if db_err.is_unique_violation())
}
