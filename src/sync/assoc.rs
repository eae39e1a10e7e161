//! Association synchronization under a replace-all policy.
//!
//! Synchronizing an entity deletes its existing association rows of a
//! given kind and re-inserts the current set, so associations always
//! reflect the latest source. Shared dictionary rows (tags, categories)
//! are looked up or created by slug and never deleted here — only the
//! junction rows are rebuilt. Owned kinds (technologies, publication
//! authors, social links) carry an explicit sort order.

use anyhow::Result;
use serde_json::Value;
use uuid::Uuid;

use crate::config::SocialSpec;
use crate::content::scalar_to_text;
use crate::db::Db;
use crate::sync::identity::slugify;
use crate::sync::Tx;

/// Junction kinds backed by a shared dictionary table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DictionaryAssoc {
    BlogTags,
    BlogCategories,
    IdeaTags,
}

impl DictionaryAssoc {
    fn junction(self) -> &'static str {
        match self {
            DictionaryAssoc::BlogTags => "blog_post_tags",
            DictionaryAssoc::BlogCategories => "blog_post_categories",
            DictionaryAssoc::IdeaTags => "idea_tags",
        }
    }

    fn parent_column(self) -> &'static str {
        match self {
            DictionaryAssoc::BlogTags | DictionaryAssoc::BlogCategories => "post_id",
            DictionaryAssoc::IdeaTags => "idea_id",
        }
    }

    fn reference_column(self) -> &'static str {
        match self {
            DictionaryAssoc::BlogTags | DictionaryAssoc::IdeaTags => "tag_id",
            DictionaryAssoc::BlogCategories => "category_id",
        }
    }

    fn dictionary(self) -> &'static str {
        match self {
            DictionaryAssoc::BlogTags | DictionaryAssoc::IdeaTags => "tags",
            DictionaryAssoc::BlogCategories => "categories",
        }
    }
}

/// Owned one-to-many kinds with an explicit ordinal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OwnedAssoc {
    ProjectTechnologies,
    PublicationAuthors,
}

impl OwnedAssoc {
    fn table(self) -> &'static str {
        match self {
            OwnedAssoc::ProjectTechnologies => "project_technologies",
            OwnedAssoc::PublicationAuthors => "publication_authors",
        }
    }

    fn parent_column(self) -> &'static str {
        match self {
            OwnedAssoc::ProjectTechnologies => "project_id",
            OwnedAssoc::PublicationAuthors => "publication_id",
        }
    }
}

/// Rebuild a dictionary-backed junction set for one parent entity.
///
/// Dictionary rows are resolved by slug; when two display names collapse
/// to the same slug the existing row wins, so the shared dictionary is
/// first-writer-wins. Blank values and duplicate slugs in the input are
/// skipped.
pub async fn sync_dictionary(
    db: &Db,
    tx: &mut Tx<'_>,
    kind: DictionaryAssoc,
    parent_id: &str,
    items: &[Value],
) -> Result<u64> {
    let delete_query = format!(
        "DELETE FROM {} WHERE {} = ?",
        kind.junction(),
        kind.parent_column()
    );
    let delete_sql = db.sql(&delete_query);
    sqlx::query(&delete_sql)
        .bind(parent_id)
        .execute(&mut **tx)
        .await?;

    let lookup_query = format!("SELECT id FROM {} WHERE slug = ?", kind.dictionary());
    let lookup_sql = db.sql(&lookup_query);
    let create_query = format!(
        "INSERT INTO {} (id, name, slug) VALUES (?, ?, ?)",
        kind.dictionary()
    );
    let create_sql = db.sql(&create_query);
    let junction_query = format!(
        "INSERT INTO {} ({}, {}) VALUES (?, ?)",
        kind.junction(),
        kind.parent_column(),
        kind.reference_column()
    );
    let junction_sql = db.sql(&junction_query);

    let mut seen = Vec::new();
    let mut linked = 0u64;

    for value in items {
        let Some(name) = scalar_to_text(value).map(|n| n.trim().to_string()) else {
            continue;
        };
        if name.is_empty() {
            continue;
        }
        let slug = slugify(&name);
        if slug.is_empty() || seen.contains(&slug) {
            continue;
        }
        seen.push(slug.clone());

        let reference_id: String = match sqlx::query_scalar(&lookup_sql)
            .bind(&slug)
            .fetch_optional(&mut **tx)
            .await?
        {
            Some(id) => id,
            None => {
                let id = Uuid::new_v4().to_string();
                sqlx::query(&create_sql)
                    .bind(&id)
                    .bind(&name)
                    .bind(&slug)
                    .execute(&mut **tx)
                    .await?;
                id
            }
        };

        sqlx::query(&junction_sql)
            .bind(parent_id)
            .bind(&reference_id)
            .execute(&mut **tx)
            .await?;
        linked += 1;
    }

    Ok(linked)
}

/// Rebuild an owned, ordered association set (technologies, authors) for
/// one parent entity.
pub async fn sync_owned(
    db: &Db,
    tx: &mut Tx<'_>,
    kind: OwnedAssoc,
    parent_id: &str,
    items: &[Value],
) -> Result<u64> {
    let delete_query = format!(
        "DELETE FROM {} WHERE {} = ?",
        kind.table(),
        kind.parent_column()
    );
    let delete_sql = db.sql(&delete_query);
    sqlx::query(&delete_sql)
        .bind(parent_id)
        .execute(&mut **tx)
        .await?;

    let insert_query = format!(
        "INSERT INTO {} (id, {}, name, sort_order) VALUES (?, ?, ?, ?)",
        kind.table(),
        kind.parent_column()
    );
    let insert_sql = db.sql(&insert_query);

    let mut inserted = 0u64;
    for value in items {
        let Some(name) = scalar_to_text(value).map(|n| n.trim().to_string()) else {
            continue;
        };
        if name.is_empty() {
            continue;
        }
        sqlx::query(&insert_sql)
            .bind(Uuid::new_v4().to_string())
            .bind(parent_id)
            .bind(&name)
            .bind(inserted as i32)
            .execute(&mut **tx)
            .await?;
        inserted += 1;
    }

    Ok(inserted)
}

/// Rebuild the owner's social links from the configured profile.
pub async fn sync_social_links(
    db: &Db,
    tx: &mut Tx<'_>,
    user_id: &str,
    links: &[SocialSpec],
) -> Result<u64> {
    let delete_sql = db.sql("DELETE FROM social_links WHERE user_id = ?");
    sqlx::query(&delete_sql)
        .bind(user_id)
        .execute(&mut **tx)
        .await?;

    let insert_sql = db.sql(
        "INSERT INTO social_links (id, user_id, platform, url, sort_order) VALUES (?, ?, ?, ?, ?)",
    );

    let mut inserted = 0u64;
    for link in links {
        if link.platform.trim().is_empty() || link.url.trim().is_empty() {
            continue;
        }
        sqlx::query(&insert_sql)
            .bind(Uuid::new_v4().to_string())
            .bind(user_id)
            .bind(link.platform.trim())
            .bind(link.url.trim())
            .bind(inserted as i32)
            .execute(&mut **tx)
            .await?;
        inserted += 1;
    }

    Ok(inserted)
}
