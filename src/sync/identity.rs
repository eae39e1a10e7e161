//! Natural-key resolution.
//!
//! Every content type has a business-meaningful key used to decide "this is
//! the same record as last run", distinct from the generated surrogate ID.
//! Keys are always scoped by the owning user at query time.

use anyhow::{bail, Result};

use crate::models::{field_str, ContentType, FieldMap};

/// Natural key shapes, one per lookup strategy.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NaturalKey {
    /// Blog posts, projects, ideas.
    Slug(String),
    /// `(institution, degree)` for education, `(company, position)` for
    /// work experience.
    Pair(String, String),
    /// Research projects, publications, awards.
    Title(String),
    /// Updates: the same title may recur on different days.
    TitleDate(String, String),
}

impl NaturalKey {
    pub fn as_slug(&self) -> Option<&str> {
        match self {
            NaturalKey::Slug(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_pair(&self) -> Option<(&str, &str)> {
        match self {
            NaturalKey::Pair(a, b) => Some((a, b)),
            _ => None,
        }
    }

    pub fn as_title(&self) -> Option<&str> {
        match self {
            NaturalKey::Title(t) => Some(t),
            _ => None,
        }
    }

    pub fn as_title_date(&self) -> Option<(&str, &str)> {
        match self {
            NaturalKey::TitleDate(t, d) => Some((t, d)),
            _ => None,
        }
    }
}

/// Compute the natural key for one parsed item.
///
/// Missing mandatory fields are item-validation failures: the orchestrator
/// records them against the source file and moves on.
pub fn resolve(
    content_type: ContentType,
    fields: &FieldMap,
    hint: Option<&str>,
) -> Result<NaturalKey> {
    match content_type {
        ContentType::Blog | ContentType::Project | ContentType::Idea => {
            let slug = field_str(fields, "slug")
                .or_else(|| field_str(fields, "title"))
                .map(|s| slugify(&s))
                .filter(|s| !s.is_empty())
                .or_else(|| hint.map(slugify).filter(|s| !s.is_empty()));
            match slug {
                Some(slug) => Ok(NaturalKey::Slug(slug)),
                None => bail!("{content_type}: cannot derive a slug (no slug, title, or usable file name)"),
            }
        }
        ContentType::Education => {
            let institution = require(fields, "institution", content_type)?;
            let degree = require(fields, "degree", content_type)?;
            Ok(NaturalKey::Pair(institution, degree))
        }
        ContentType::Experience => {
            let company = require(fields, "company", content_type)?;
            let position = require(fields, "position", content_type)?;
            Ok(NaturalKey::Pair(company, position))
        }
        ContentType::Research | ContentType::Publication | ContentType::Award => {
            let title = require(fields, "title", content_type)?;
            Ok(NaturalKey::Title(title))
        }
        ContentType::Update => {
            let title = require(fields, "title", content_type)?;
            let date = require(fields, "date", content_type)?;
            Ok(NaturalKey::TitleDate(title, date))
        }
    }
}

fn require(fields: &FieldMap, key: &str, content_type: ContentType) -> Result<String> {
    match field_str(fields, key) {
        Some(v) => Ok(v),
        None => bail!("{content_type}: required field '{key}' is missing or empty"),
    }
}

/// Lowercase, strip non-alphanumerics, collapse separator runs to single
/// hyphens. Idempotent: `slugify(slugify(x)) == slugify(x)`.
pub fn slugify(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    let mut pending_hyphen = false;
    for c in input.chars() {
        if c.is_ascii_alphanumeric() {
            if pending_hyphen && !out.is_empty() {
                out.push('-');
            }
            pending_hyphen = false;
            out.push(c.to_ascii_lowercase());
        } else {
            pending_hyphen = true;
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn fields(v: serde_json::Value) -> FieldMap {
        v.as_object()
            .unwrap()
            .iter()
            .map(|(k, v)| (k.clone(), v.clone()))
            .collect()
    }

    #[test]
    fn test_slugify_basic() {
        assert_eq!(slugify("My Cool Project!"), "my-cool-project");
        assert_eq!(slugify("Rust & SQL, together"), "rust-sql-together");
        assert_eq!(slugify("  spaced   out  "), "spaced-out");
        assert_eq!(slugify("___"), "");
    }

    #[test]
    fn test_slugify_idempotent() {
        for input in ["My Cool Project!", "a--b", "Ünïcode Tïtle", "2024 in review", ""] {
            let once = slugify(input);
            assert_eq!(slugify(&once), once, "slugify not idempotent for {input:?}");
        }
    }

    #[test]
    fn test_resolve_blog_prefers_explicit_slug() {
        let f = fields(json!({"slug": "Custom Slug", "title": "The Title"}));
        let key = resolve(ContentType::Blog, &f, Some("file-name")).unwrap();
        assert_eq!(key, NaturalKey::Slug("custom-slug".into()));
    }

    #[test]
    fn test_resolve_blog_falls_back_to_title_then_hint() {
        let f = fields(json!({"title": "The Title"}));
        let key = resolve(ContentType::Blog, &f, Some("file-name")).unwrap();
        assert_eq!(key, NaturalKey::Slug("the-title".into()));

        let key = resolve(ContentType::Blog, &FieldMap::new(), Some("file-name")).unwrap();
        assert_eq!(key, NaturalKey::Slug("file-name".into()));
    }

    #[test]
    fn test_resolve_blog_without_any_source_fails() {
        let err = resolve(ContentType::Blog, &FieldMap::new(), None).unwrap_err();
        assert!(err.to_string().contains("slug"));
    }

    #[test]
    fn test_resolve_education_requires_pair() {
        let f = fields(json!({"institution": "MIT", "degree": "BSc"}));
        let key = resolve(ContentType::Education, &f, None).unwrap();
        assert_eq!(key, NaturalKey::Pair("MIT".into(), "BSc".into()));

        let f = fields(json!({"institution": "MIT"}));
        assert!(resolve(ContentType::Education, &f, None).is_err());
    }

    #[test]
    fn test_resolve_update_requires_date() {
        let f = fields(json!({"title": "Shipped v1", "date": "2024-03-01"}));
        let key = resolve(ContentType::Update, &f, None).unwrap();
        assert_eq!(
            key,
            NaturalKey::TitleDate("Shipped v1".into(), "2024-03-01".into())
        );

        let f = fields(json!({"title": "Shipped v1"}));
        assert!(resolve(ContentType::Update, &f, None).is_err());
    }
}
