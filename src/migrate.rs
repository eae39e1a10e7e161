//! Idempotent schema creation.
//!
//! Every statement is `CREATE TABLE IF NOT EXISTS`, so `ensure_schema` can
//! run at the start of every sync. The DDL is written once for all three
//! backends: surrogate keys are UUID strings in `VARCHAR(64)` columns (no
//! auto-increment dialect needed), natural-key columns are `VARCHAR(190)`
//! to stay under MySQL's index-width limit, and timestamps are epoch
//! seconds in `BIGINT`. Secondary lookup is covered by the inline UNIQUE
//! constraints; MySQL has no `CREATE INDEX IF NOT EXISTS`, so no separate
//! index statements are issued.

use crate::db::Db;
use crate::error::SyncError;

const SCHEMA: &[&str] = &[
    r#"
    CREATE TABLE IF NOT EXISTS users (
        id VARCHAR(64) PRIMARY KEY,
        username VARCHAR(190) NOT NULL UNIQUE,
        email VARCHAR(190) NOT NULL,
        display_name VARCHAR(190),
        created_at BIGINT NOT NULL,
        updated_at BIGINT NOT NULL
    )
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS languages (
        id VARCHAR(64) PRIMARY KEY,
        code VARCHAR(16) NOT NULL UNIQUE,
        name VARCHAR(190) NOT NULL
    )
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS blog_posts (
        id VARCHAR(64) PRIMARY KEY,
        user_id VARCHAR(64) NOT NULL,
        slug VARCHAR(190) NOT NULL,
        title TEXT NOT NULL,
        description TEXT,
        body TEXT,
        status VARCHAR(32) NOT NULL,
        is_public INTEGER NOT NULL,
        published_at VARCHAR(32),
        created_at BIGINT NOT NULL,
        updated_at BIGINT NOT NULL,
        UNIQUE (user_id, slug)
    )
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS projects (
        id VARCHAR(64) PRIMARY KEY,
        user_id VARCHAR(64) NOT NULL,
        slug VARCHAR(190) NOT NULL,
        title TEXT NOT NULL,
        description TEXT,
        body TEXT,
        status VARCHAR(32) NOT NULL,
        priority VARCHAR(32) NOT NULL,
        duration_months INTEGER,
        repo_url TEXT,
        demo_url TEXT,
        is_public INTEGER NOT NULL,
        created_at BIGINT NOT NULL,
        updated_at BIGINT NOT NULL,
        UNIQUE (user_id, slug)
    )
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS ideas (
        id VARCHAR(64) PRIMARY KEY,
        user_id VARCHAR(64) NOT NULL,
        slug VARCHAR(190) NOT NULL,
        title TEXT NOT NULL,
        description TEXT,
        body TEXT,
        status VARCHAR(32) NOT NULL,
        is_public INTEGER NOT NULL,
        created_at BIGINT NOT NULL,
        updated_at BIGINT NOT NULL,
        UNIQUE (user_id, slug)
    )
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS updates (
        id VARCHAR(64) PRIMARY KEY,
        user_id VARCHAR(64) NOT NULL,
        title VARCHAR(190) NOT NULL,
        entry_date VARCHAR(32) NOT NULL,
        body TEXT,
        created_at BIGINT NOT NULL,
        updated_at BIGINT NOT NULL,
        UNIQUE (user_id, title, entry_date)
    )
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS education (
        id VARCHAR(64) PRIMARY KEY,
        user_id VARCHAR(64) NOT NULL,
        institution VARCHAR(190) NOT NULL,
        degree VARCHAR(190) NOT NULL,
        field VARCHAR(190),
        location VARCHAR(190),
        start_date VARCHAR(32),
        end_date VARCHAR(32),
        gpa DOUBLE PRECISION,
        created_at BIGINT NOT NULL,
        updated_at BIGINT NOT NULL,
        UNIQUE (user_id, institution, degree)
    )
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS work_experiences (
        id VARCHAR(64) PRIMARY KEY,
        user_id VARCHAR(64) NOT NULL,
        company VARCHAR(190) NOT NULL,
        position VARCHAR(190) NOT NULL,
        location VARCHAR(190),
        start_date VARCHAR(32),
        end_date VARCHAR(32),
        is_current INTEGER NOT NULL,
        created_at BIGINT NOT NULL,
        updated_at BIGINT NOT NULL,
        UNIQUE (user_id, company, position)
    )
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS research_projects (
        id VARCHAR(64) PRIMARY KEY,
        user_id VARCHAR(64) NOT NULL,
        title VARCHAR(190) NOT NULL,
        description TEXT,
        status VARCHAR(32) NOT NULL,
        start_date VARCHAR(32),
        end_date VARCHAR(32),
        body TEXT,
        created_at BIGINT NOT NULL,
        updated_at BIGINT NOT NULL,
        UNIQUE (user_id, title)
    )
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS publications (
        id VARCHAR(64) PRIMARY KEY,
        user_id VARCHAR(64) NOT NULL,
        title VARCHAR(190) NOT NULL,
        venue TEXT,
        year INTEGER,
        doi VARCHAR(190),
        url TEXT,
        created_at BIGINT NOT NULL,
        updated_at BIGINT NOT NULL,
        UNIQUE (user_id, title)
    )
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS awards (
        id VARCHAR(64) PRIMARY KEY,
        user_id VARCHAR(64) NOT NULL,
        title VARCHAR(190) NOT NULL,
        issuer VARCHAR(190),
        awarded_on VARCHAR(32),
        description TEXT,
        created_at BIGINT NOT NULL,
        updated_at BIGINT NOT NULL,
        UNIQUE (user_id, title)
    )
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS education_details (
        id VARCHAR(64) PRIMARY KEY,
        parent_id VARCHAR(64) NOT NULL,
        sort_order INTEGER NOT NULL,
        detail TEXT NOT NULL
    )
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS experience_details (
        id VARCHAR(64) PRIMARY KEY,
        parent_id VARCHAR(64) NOT NULL,
        sort_order INTEGER NOT NULL,
        detail TEXT NOT NULL
    )
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS research_details (
        id VARCHAR(64) PRIMARY KEY,
        parent_id VARCHAR(64) NOT NULL,
        sort_order INTEGER NOT NULL,
        detail TEXT NOT NULL
    )
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS tags (
        id VARCHAR(64) PRIMARY KEY,
        name VARCHAR(190) NOT NULL,
        slug VARCHAR(190) NOT NULL UNIQUE
    )
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS categories (
        id VARCHAR(64) PRIMARY KEY,
        name VARCHAR(190) NOT NULL,
        slug VARCHAR(190) NOT NULL UNIQUE
    )
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS blog_post_tags (
        post_id VARCHAR(64) NOT NULL,
        tag_id VARCHAR(64) NOT NULL,
        PRIMARY KEY (post_id, tag_id)
    )
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS blog_post_categories (
        post_id VARCHAR(64) NOT NULL,
        category_id VARCHAR(64) NOT NULL,
        PRIMARY KEY (post_id, category_id)
    )
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS idea_tags (
        idea_id VARCHAR(64) NOT NULL,
        tag_id VARCHAR(64) NOT NULL,
        PRIMARY KEY (idea_id, tag_id)
    )
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS project_technologies (
        id VARCHAR(64) PRIMARY KEY,
        project_id VARCHAR(64) NOT NULL,
        name VARCHAR(190) NOT NULL,
        sort_order INTEGER NOT NULL
    )
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS publication_authors (
        id VARCHAR(64) PRIMARY KEY,
        publication_id VARCHAR(64) NOT NULL,
        name VARCHAR(190) NOT NULL,
        sort_order INTEGER NOT NULL
    )
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS social_links (
        id VARCHAR(64) PRIMARY KEY,
        user_id VARCHAR(64) NOT NULL,
        platform VARCHAR(190) NOT NULL,
        url TEXT NOT NULL,
        sort_order INTEGER NOT NULL
    )
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS sync_runs (
        id VARCHAR(64) PRIMARY KEY,
        started_at BIGINT NOT NULL,
        finished_at BIGINT NOT NULL,
        dry_run INTEGER NOT NULL,
        created INTEGER NOT NULL,
        updated INTEGER NOT NULL,
        error_count INTEGER NOT NULL,
        config_fingerprint VARCHAR(64) NOT NULL
    )
    "#,
];

pub async fn ensure_schema(db: &Db) -> Result<(), SyncError> {
    for statement in SCHEMA {
        sqlx::query(statement)
            .execute(db.pool())
            .await
            .map_err(SyncError::Schema)?;
    }
    Ok(())
}
