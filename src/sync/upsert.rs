//! Upsert engine: create-if-absent, update-if-present, keyed by natural key.
//!
//! Lookups run inside the caller's per-item transaction. On create, every
//! scalar field comes from the input with documented defaults for absent
//! ones. On update, only fields present in the input overwrite stored
//! values (`COALESCE(?, column)` with NULL binds for absent fields);
//! `updated_at` is always refreshed.
//!
//! Enum-like fields pass through a fixed normalization table per content
//! type. Unrecognized values fall back to the type's default with a
//! warning rather than failing the item — a deliberate leniency policy so
//! a typo in front matter degrades gracefully instead of blocking a sync.

use std::sync::OnceLock;

use anyhow::{Context, Result};
use chrono::Utc;
use regex::Regex;
use uuid::Uuid;

use crate::db::Db;
use crate::models::{field_bool, field_f64, field_i64, field_str, ContentType, Outcome, ParsedItem};
use crate::sync::identity::NaturalKey;
use crate::sync::Tx;

const BLOG_STATUS: &[&str] = &["draft", "published"];
const PROJECT_STATUS: &[&str] = &["active", "completed", "paused", "archived"];
const PROJECT_PRIORITY: &[&str] = &["low", "medium", "high"];
const IDEA_STATUS: &[&str] = &["raw", "exploring", "validated", "shelved"];
const RESEARCH_STATUS: &[&str] = &["active", "completed", "paused"];

/// Dispatch on content type; returns the entity's surrogate ID and whether
/// the row was created or updated.
pub async fn upsert(
    db: &Db,
    tx: &mut Tx<'_>,
    owner_id: &str,
    item: &ParsedItem,
    key: &NaturalKey,
) -> Result<(String, Outcome)> {
    match item.content_type {
        ContentType::Blog => upsert_blog(db, tx, owner_id, item, key).await,
        ContentType::Project => upsert_project(db, tx, owner_id, item, key).await,
        ContentType::Idea => upsert_idea(db, tx, owner_id, item, key).await,
        ContentType::Update => upsert_update(db, tx, owner_id, item, key).await,
        ContentType::Education => upsert_education(db, tx, owner_id, item, key).await,
        ContentType::Experience => upsert_experience(db, tx, owner_id, item, key).await,
        ContentType::Research => upsert_research(db, tx, owner_id, item, key).await,
        ContentType::Publication => upsert_publication(db, tx, owner_id, item, key).await,
        ContentType::Award => upsert_award(db, tx, owner_id, item, key).await,
    }
}

async fn upsert_blog(
    db: &Db,
    tx: &mut Tx<'_>,
    owner_id: &str,
    item: &ParsedItem,
    key: &NaturalKey,
) -> Result<(String, Outcome)> {
    let slug = key.as_slug().context("blog upsert expects a slug key")?;
    let f = &item.scalar_fields;
    let now = Utc::now().timestamp();

    let title = field_str(f, "title");
    let description = field_str(f, "description");
    let body = field_str(f, "body");
    let status = field_str(f, "status")
        .map(|v| normalize_enum(BLOG_STATUS, &v, "draft", "blog status"));
    let is_public = field_bool(f, "public").map(i32::from);
    let published_at = field_str(f, "date");

    let lookup = db.sql("SELECT id FROM blog_posts WHERE user_id = ? AND slug = ?");
    let existing: Option<String> = sqlx::query_scalar(&lookup)
        .bind(owner_id)
        .bind(slug)
        .fetch_optional(&mut **tx)
        .await?;

    match existing {
        None => {
            let id = Uuid::new_v4().to_string();
            let insert = db.sql(
                "INSERT INTO blog_posts \
                 (id, user_id, slug, title, description, body, status, is_public, published_at, created_at, updated_at) \
                 VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)",
            );
            sqlx::query(&insert)
                .bind(&id)
                .bind(owner_id)
                .bind(slug)
                .bind(title.unwrap_or_else(|| slug.to_string()))
                .bind(&description)
                .bind(&body)
                .bind(status.unwrap_or("draft"))
                .bind(is_public.unwrap_or(0))
                .bind(&published_at)
                .bind(now)
                .bind(now)
                .execute(&mut **tx)
                .await?;
            Ok((id, Outcome::Created))
        }
        Some(id) => {
            let update = db.sql(
                "UPDATE blog_posts SET \
                 title = COALESCE(?, title), \
                 description = COALESCE(?, description), \
                 body = COALESCE(?, body), \
                 status = COALESCE(?, status), \
                 is_public = COALESCE(?, is_public), \
                 published_at = COALESCE(?, published_at), \
                 updated_at = ? \
                 WHERE id = ?",
            );
            sqlx::query(&update)
                .bind(&title)
                .bind(&description)
                .bind(&body)
                .bind(status)
                .bind(is_public)
                .bind(&published_at)
                .bind(now)
                .bind(&id)
                .execute(&mut **tx)
                .await?;
            Ok((id, Outcome::Updated))
        }
    }
}

async fn upsert_project(
    db: &Db,
    tx: &mut Tx<'_>,
    owner_id: &str,
    item: &ParsedItem,
    key: &NaturalKey,
) -> Result<(String, Outcome)> {
    let slug = key.as_slug().context("project upsert expects a slug key")?;
    let f = &item.scalar_fields;
    let now = Utc::now().timestamp();

    let title = field_str(f, "title");
    let description = field_str(f, "description");
    let body = field_str(f, "body");
    let status = field_str(f, "status")
        .map(|v| normalize_enum(PROJECT_STATUS, &v, "active", "project status"));
    let priority = field_str(f, "priority")
        .map(|v| normalize_enum(PROJECT_PRIORITY, &v, "medium", "project priority"));
    let duration_months = field_str(f, "duration")
        .as_deref()
        .and_then(parse_duration_months);
    let repo_url = field_str(f, "repo_url");
    let demo_url = field_str(f, "demo_url");
    let is_public = field_bool(f, "public").map(i32::from);

    let lookup = db.sql("SELECT id FROM projects WHERE user_id = ? AND slug = ?");
    let existing: Option<String> = sqlx::query_scalar(&lookup)
        .bind(owner_id)
        .bind(slug)
        .fetch_optional(&mut **tx)
        .await?;

    match existing {
        None => {
            let id = Uuid::new_v4().to_string();
            let insert = db.sql(
                "INSERT INTO projects \
                 (id, user_id, slug, title, description, body, status, priority, duration_months, \
                  repo_url, demo_url, is_public, created_at, updated_at) \
                 VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)",
            );
            sqlx::query(&insert)
                .bind(&id)
                .bind(owner_id)
                .bind(slug)
                .bind(title.unwrap_or_else(|| slug.to_string()))
                .bind(&description)
                .bind(&body)
                .bind(status.unwrap_or("active"))
                .bind(priority.unwrap_or("medium"))
                .bind(duration_months)
                .bind(&repo_url)
                .bind(&demo_url)
                .bind(is_public.unwrap_or(0))
                .bind(now)
                .bind(now)
                .execute(&mut **tx)
                .await?;
            Ok((id, Outcome::Created))
        }
        Some(id) => {
            let update = db.sql(
                "UPDATE projects SET \
                 title = COALESCE(?, title), \
                 description = COALESCE(?, description), \
                 body = COALESCE(?, body), \
                 status = COALESCE(?, status), \
                 priority = COALESCE(?, priority), \
                 duration_months = COALESCE(?, duration_months), \
                 repo_url = COALESCE(?, repo_url), \
                 demo_url = COALESCE(?, demo_url), \
                 is_public = COALESCE(?, is_public), \
                 updated_at = ? \
                 WHERE id = ?",
            );
            sqlx::query(&update)
                .bind(&title)
                .bind(&description)
                .bind(&body)
                .bind(status)
                .bind(priority)
                .bind(duration_months)
                .bind(&repo_url)
                .bind(&demo_url)
                .bind(is_public)
                .bind(now)
                .bind(&id)
                .execute(&mut **tx)
                .await?;
            Ok((id, Outcome::Updated))
        }
    }
}

async fn upsert_idea(
    db: &Db,
    tx: &mut Tx<'_>,
    owner_id: &str,
    item: &ParsedItem,
    key: &NaturalKey,
) -> Result<(String, Outcome)> {
    let slug = key.as_slug().context("idea upsert expects a slug key")?;
    let f = &item.scalar_fields;
    let now = Utc::now().timestamp();

    let title = field_str(f, "title");
    let description = field_str(f, "description");
    let body = field_str(f, "body");
    let status = field_str(f, "status")
        .map(|v| normalize_enum(IDEA_STATUS, &v, "raw", "idea status"));
    let is_public = field_bool(f, "public").map(i32::from);

    let lookup = db.sql("SELECT id FROM ideas WHERE user_id = ? AND slug = ?");
    let existing: Option<String> = sqlx::query_scalar(&lookup)
        .bind(owner_id)
        .bind(slug)
        .fetch_optional(&mut **tx)
        .await?;

    match existing {
        None => {
            let id = Uuid::new_v4().to_string();
            let insert = db.sql(
                "INSERT INTO ideas \
                 (id, user_id, slug, title, description, body, status, is_public, created_at, updated_at) \
                 VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?)",
            );
            sqlx::query(&insert)
                .bind(&id)
                .bind(owner_id)
                .bind(slug)
                .bind(title.unwrap_or_else(|| slug.to_string()))
                .bind(&description)
                .bind(&body)
                .bind(status.unwrap_or("raw"))
                .bind(is_public.unwrap_or(0))
                .bind(now)
                .bind(now)
                .execute(&mut **tx)
                .await?;
            Ok((id, Outcome::Created))
        }
        Some(id) => {
            let update = db.sql(
                "UPDATE ideas SET \
                 title = COALESCE(?, title), \
                 description = COALESCE(?, description), \
                 body = COALESCE(?, body), \
                 status = COALESCE(?, status), \
                 is_public = COALESCE(?, is_public), \
                 updated_at = ? \
                 WHERE id = ?",
            );
            sqlx::query(&update)
                .bind(&title)
                .bind(&description)
                .bind(&body)
                .bind(status)
                .bind(is_public)
                .bind(now)
                .bind(&id)
                .execute(&mut **tx)
                .await?;
            Ok((id, Outcome::Updated))
        }
    }
}

async fn upsert_update(
    db: &Db,
    tx: &mut Tx<'_>,
    owner_id: &str,
    item: &ParsedItem,
    key: &NaturalKey,
) -> Result<(String, Outcome)> {
    let (title, date) = key
        .as_title_date()
        .context("update upsert expects a title+date key")?;
    let f = &item.scalar_fields;
    let now = Utc::now().timestamp();

    let body = field_str(f, "body");

    let lookup =
        db.sql("SELECT id FROM updates WHERE user_id = ? AND title = ? AND entry_date = ?");
    let existing: Option<String> = sqlx::query_scalar(&lookup)
        .bind(owner_id)
        .bind(title)
        .bind(date)
        .fetch_optional(&mut **tx)
        .await?;

    match existing {
        None => {
            let id = Uuid::new_v4().to_string();
            let insert = db.sql(
                "INSERT INTO updates (id, user_id, title, entry_date, body, created_at, updated_at) \
                 VALUES (?, ?, ?, ?, ?, ?, ?)",
            );
            sqlx::query(&insert)
                .bind(&id)
                .bind(owner_id)
                .bind(title)
                .bind(date)
                .bind(&body)
                .bind(now)
                .bind(now)
                .execute(&mut **tx)
                .await?;
            Ok((id, Outcome::Created))
        }
        Some(id) => {
            let update = db.sql(
                "UPDATE updates SET body = COALESCE(?, body), updated_at = ? WHERE id = ?",
            );
            sqlx::query(&update)
                .bind(&body)
                .bind(now)
                .bind(&id)
                .execute(&mut **tx)
                .await?;
            Ok((id, Outcome::Updated))
        }
    }
}

async fn upsert_education(
    db: &Db,
    tx: &mut Tx<'_>,
    owner_id: &str,
    item: &ParsedItem,
    key: &NaturalKey,
) -> Result<(String, Outcome)> {
    let (institution, degree) = key
        .as_pair()
        .context("education upsert expects an institution+degree key")?;
    let f = &item.scalar_fields;
    let now = Utc::now().timestamp();

    let field = field_str(f, "field");
    let location = field_str(f, "location");
    let start_date = field_str(f, "start_date");
    let end_date = field_str(f, "end_date");
    let gpa = field_f64(f, "gpa");

    let lookup =
        db.sql("SELECT id FROM education WHERE user_id = ? AND institution = ? AND degree = ?");
    let existing: Option<String> = sqlx::query_scalar(&lookup)
        .bind(owner_id)
        .bind(institution)
        .bind(degree)
        .fetch_optional(&mut **tx)
        .await?;

    match existing {
        None => {
            let id = Uuid::new_v4().to_string();
            let insert = db.sql(
                "INSERT INTO education \
                 (id, user_id, institution, degree, field, location, start_date, end_date, gpa, created_at, updated_at) \
                 VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)",
            );
            sqlx::query(&insert)
                .bind(&id)
                .bind(owner_id)
                .bind(institution)
                .bind(degree)
                .bind(&field)
                .bind(&location)
                .bind(&start_date)
                .bind(&end_date)
                .bind(gpa)
                .bind(now)
                .bind(now)
                .execute(&mut **tx)
                .await?;
            Ok((id, Outcome::Created))
        }
        Some(id) => {
            let update = db.sql(
                "UPDATE education SET \
                 field = COALESCE(?, field), \
                 location = COALESCE(?, location), \
                 start_date = COALESCE(?, start_date), \
                 end_date = COALESCE(?, end_date), \
                 gpa = COALESCE(?, gpa), \
                 updated_at = ? \
                 WHERE id = ?",
            );
            sqlx::query(&update)
                .bind(&field)
                .bind(&location)
                .bind(&start_date)
                .bind(&end_date)
                .bind(gpa)
                .bind(now)
                .bind(&id)
                .execute(&mut **tx)
                .await?;
            Ok((id, Outcome::Updated))
        }
    }
}

async fn upsert_experience(
    db: &Db,
    tx: &mut Tx<'_>,
    owner_id: &str,
    item: &ParsedItem,
    key: &NaturalKey,
) -> Result<(String, Outcome)> {
    let (company, position) = key
        .as_pair()
        .context("experience upsert expects a company+position key")?;
    let f = &item.scalar_fields;
    let now = Utc::now().timestamp();

    let location = field_str(f, "location");
    let start_date = field_str(f, "start_date");
    let end_date = field_str(f, "end_date");
    let is_current = field_bool(f, "current").map(i32::from);

    let lookup = db.sql(
        "SELECT id FROM work_experiences WHERE user_id = ? AND company = ? AND position = ?",
    );
    let existing: Option<String> = sqlx::query_scalar(&lookup)
        .bind(owner_id)
        .bind(company)
        .bind(position)
        .fetch_optional(&mut **tx)
        .await?;

    match existing {
        None => {
            let id = Uuid::new_v4().to_string();
            let insert = db.sql(
                "INSERT INTO work_experiences \
                 (id, user_id, company, position, location, start_date, end_date, is_current, created_at, updated_at) \
                 VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?)",
            );
            sqlx::query(&insert)
                .bind(&id)
                .bind(owner_id)
                .bind(company)
                .bind(position)
                .bind(&location)
                .bind(&start_date)
                .bind(&end_date)
                .bind(is_current.unwrap_or(0))
                .bind(now)
                .bind(now)
                .execute(&mut **tx)
                .await?;
            Ok((id, Outcome::Created))
        }
        Some(id) => {
            let update = db.sql(
                "UPDATE work_experiences SET \
                 location = COALESCE(?, location), \
                 start_date = COALESCE(?, start_date), \
                 end_date = COALESCE(?, end_date), \
                 is_current = COALESCE(?, is_current), \
                 updated_at = ? \
                 WHERE id = ?",
            );
            sqlx::query(&update)
                .bind(&location)
                .bind(&start_date)
                .bind(&end_date)
                .bind(is_current)
                .bind(now)
                .bind(&id)
                .execute(&mut **tx)
                .await?;
            Ok((id, Outcome::Updated))
        }
    }
}

async fn upsert_research(
    db: &Db,
    tx: &mut Tx<'_>,
    owner_id: &str,
    item: &ParsedItem,
    key: &NaturalKey,
) -> Result<(String, Outcome)> {
    let title = key.as_title().context("research upsert expects a title key")?;
    let f = &item.scalar_fields;
    let now = Utc::now().timestamp();

    let description = field_str(f, "description");
    let status = field_str(f, "status")
        .map(|v| normalize_enum(RESEARCH_STATUS, &v, "active", "research status"));
    let start_date = field_str(f, "start_date");
    let end_date = field_str(f, "end_date");
    let body = field_str(f, "body");

    let lookup = db.sql("SELECT id FROM research_projects WHERE user_id = ? AND title = ?");
    let existing: Option<String> = sqlx::query_scalar(&lookup)
        .bind(owner_id)
        .bind(title)
        .fetch_optional(&mut **tx)
        .await?;

    match existing {
        None => {
            let id = Uuid::new_v4().to_string();
            let insert = db.sql(
                "INSERT INTO research_projects \
                 (id, user_id, title, description, status, start_date, end_date, body, created_at, updated_at) \
                 VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?)",
            );
            sqlx::query(&insert)
                .bind(&id)
                .bind(owner_id)
                .bind(title)
                .bind(&description)
                .bind(status.unwrap_or("active"))
                .bind(&start_date)
                .bind(&end_date)
                .bind(&body)
                .bind(now)
                .bind(now)
                .execute(&mut **tx)
                .await?;
            Ok((id, Outcome::Created))
        }
        Some(id) => {
            let update = db.sql(
                "UPDATE research_projects SET \
                 description = COALESCE(?, description), \
                 status = COALESCE(?, status), \
                 start_date = COALESCE(?, start_date), \
                 end_date = COALESCE(?, end_date), \
                 body = COALESCE(?, body), \
                 updated_at = ? \
                 WHERE id = ?",
            );
            sqlx::query(&update)
                .bind(&description)
                .bind(status)
                .bind(&start_date)
                .bind(&end_date)
                .bind(&body)
                .bind(now)
                .bind(&id)
                .execute(&mut **tx)
                .await?;
            Ok((id, Outcome::Updated))
        }
    }
}

async fn upsert_publication(
    db: &Db,
    tx: &mut Tx<'_>,
    owner_id: &str,
    item: &ParsedItem,
    key: &NaturalKey,
) -> Result<(String, Outcome)> {
    let title = key
        .as_title()
        .context("publication upsert expects a title key")?;
    let f = &item.scalar_fields;
    let now = Utc::now().timestamp();

    let venue = field_str(f, "venue");
    let year = field_i64(f, "year").map(|y| y as i32);
    let doi = field_str(f, "doi");
    let url = field_str(f, "url");

    let lookup = db.sql("SELECT id FROM publications WHERE user_id = ? AND title = ?");
    let existing: Option<String> = sqlx::query_scalar(&lookup)
        .bind(owner_id)
        .bind(title)
        .fetch_optional(&mut **tx)
        .await?;

    match existing {
        None => {
            let id = Uuid::new_v4().to_string();
            let insert = db.sql(
                "INSERT INTO publications \
                 (id, user_id, title, venue, year, doi, url, created_at, updated_at) \
                 VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?)",
            );
            sqlx::query(&insert)
                .bind(&id)
                .bind(owner_id)
                .bind(title)
                .bind(&venue)
                .bind(year)
                .bind(&doi)
                .bind(&url)
                .bind(now)
                .bind(now)
                .execute(&mut **tx)
                .await?;
            Ok((id, Outcome::Created))
        }
        Some(id) => {
            let update = db.sql(
                "UPDATE publications SET \
                 venue = COALESCE(?, venue), \
                 year = COALESCE(?, year), \
                 doi = COALESCE(?, doi), \
                 url = COALESCE(?, url), \
                 updated_at = ? \
                 WHERE id = ?",
            );
            sqlx::query(&update)
                .bind(&venue)
                .bind(year)
                .bind(&doi)
                .bind(&url)
                .bind(now)
                .bind(&id)
                .execute(&mut **tx)
                .await?;
            Ok((id, Outcome::Updated))
        }
    }
}

async fn upsert_award(
    db: &Db,
    tx: &mut Tx<'_>,
    owner_id: &str,
    item: &ParsedItem,
    key: &NaturalKey,
) -> Result<(String, Outcome)> {
    let title = key.as_title().context("award upsert expects a title key")?;
    let f = &item.scalar_fields;
    let now = Utc::now().timestamp();

    let issuer = field_str(f, "issuer");
    let awarded_on = field_str(f, "date");
    let description = field_str(f, "description");

    let lookup = db.sql("SELECT id FROM awards WHERE user_id = ? AND title = ?");
    let existing: Option<String> = sqlx::query_scalar(&lookup)
        .bind(owner_id)
        .bind(title)
        .fetch_optional(&mut **tx)
        .await?;

    match existing {
        None => {
            let id = Uuid::new_v4().to_string();
            let insert = db.sql(
                "INSERT INTO awards \
                 (id, user_id, title, issuer, awarded_on, description, created_at, updated_at) \
                 VALUES (?, ?, ?, ?, ?, ?, ?, ?)",
            );
            sqlx::query(&insert)
                .bind(&id)
                .bind(owner_id)
                .bind(title)
                .bind(&issuer)
                .bind(&awarded_on)
                .bind(&description)
                .bind(now)
                .bind(now)
                .execute(&mut **tx)
                .await?;
            Ok((id, Outcome::Created))
        }
        Some(id) => {
            let update = db.sql(
                "UPDATE awards SET \
                 issuer = COALESCE(?, issuer), \
                 awarded_on = COALESCE(?, awarded_on), \
                 description = COALESCE(?, description), \
                 updated_at = ? \
                 WHERE id = ?",
            );
            sqlx::query(&update)
                .bind(&issuer)
                .bind(&awarded_on)
                .bind(&description)
                .bind(now)
                .bind(&id)
                .execute(&mut **tx)
                .await?;
            Ok((id, Outcome::Updated))
        }
    }
}

/// Map a raw enum value to its canonical form, falling back to `default`
/// (with a warning) when the value is not in the table.
fn normalize_enum(
    allowed: &[&'static str],
    raw: &str,
    default: &'static str,
    what: &str,
) -> &'static str {
    let lowered = raw.trim().to_ascii_lowercase();
    match allowed.iter().find(|candidate| **candidate == lowered) {
        Some(value) => value,
        None => {
            tracing::warn!(value = raw, fallback = default, "unrecognized {what}");
            default
        }
    }
}

/// Parse a human duration like `"6-8 months"` into a month count.
///
/// Digit groups are extracted; a range averages its first two numbers, a
/// single number is used as-is, and anything else resolves to unknown.
pub fn parse_duration_months(raw: &str) -> Option<i32> {
    static DIGITS: OnceLock<Regex> = OnceLock::new();
    let re = DIGITS.get_or_init(|| Regex::new(r"\d+").unwrap());

    let numbers: Vec<i64> = re
        .find_iter(raw)
        .filter_map(|m| m.as_str().parse().ok())
        .collect();

    match numbers.as_slice() {
        [] => None,
        [single] => Some(*single as i32),
        [low, high, ..] => Some((((*low + *high) as f64) / 2.0).round() as i32),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_enum_passthrough_and_case() {
        assert_eq!(
            normalize_enum(PROJECT_STATUS, "Completed", "active", "project status"),
            "completed"
        );
        assert_eq!(
            normalize_enum(PROJECT_STATUS, "active", "active", "project status"),
            "active"
        );
    }

    #[test]
    fn test_normalize_enum_falls_back() {
        assert_eq!(
            normalize_enum(PROJECT_STATUS, "in-flight", "active", "project status"),
            "active"
        );
        assert_eq!(
            normalize_enum(BLOG_STATUS, "scheduled", "draft", "blog status"),
            "draft"
        );
    }

    #[test]
    fn test_parse_duration_range_averages() {
        assert_eq!(parse_duration_months("6-8 months"), Some(7));
        assert_eq!(parse_duration_months("about 3 to 6 months"), Some(5));
    }

    #[test]
    fn test_parse_duration_single_number() {
        assert_eq!(parse_duration_months("12 months"), Some(12));
        assert_eq!(parse_duration_months("4"), Some(4));
    }

    #[test]
    fn test_parse_duration_unparsable_is_unknown() {
        assert_eq!(parse_duration_months("ongoing"), None);
        assert_eq!(parse_duration_months(""), None);
    }
}
