//! Core data types shared across the scanner and the synchronization engine.

use std::collections::BTreeMap;
use std::path::PathBuf;

use serde_json::Value;

/// Scalar front-matter fields keyed by name.
pub type FieldMap = BTreeMap<String, Value>;

/// The kinds of content folio synchronizes. The upsert engine matches on
/// this exhaustively, so adding a variant forces every dispatch site to be
/// updated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ContentType {
    Blog,
    Project,
    Idea,
    Update,
    Education,
    Experience,
    Publication,
    Award,
    Research,
}

impl ContentType {
    pub const ALL: [ContentType; 9] = [
        ContentType::Blog,
        ContentType::Project,
        ContentType::Idea,
        ContentType::Update,
        ContentType::Education,
        ContentType::Experience,
        ContentType::Publication,
        ContentType::Award,
        ContentType::Research,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ContentType::Blog => "blog",
            ContentType::Project => "project",
            ContentType::Idea => "idea",
            ContentType::Update => "update",
            ContentType::Education => "education",
            ContentType::Experience => "experience",
            ContentType::Publication => "publication",
            ContentType::Award => "award",
            ContentType::Research => "research",
        }
    }

    /// Directory under the content root that holds this type's files.
    pub fn content_dir(&self) -> &'static str {
        match self {
            ContentType::Blog => "blog",
            ContentType::Project => "projects",
            ContentType::Idea => "ideas",
            ContentType::Update => "updates",
            ContentType::Education => "resume/education",
            ContentType::Experience => "resume/experience",
            ContentType::Publication => "resume/publications",
            ContentType::Award => "resume/awards",
            ContentType::Research => "resume/research",
        }
    }

    pub fn from_arg(s: &str) -> Option<ContentType> {
        ContentType::ALL
            .iter()
            .find(|t| t.as_str() == s.to_ascii_lowercase())
            .copied()
    }
}

impl std::fmt::Display for ContentType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One normalized content record produced by the scanner.
///
/// The engine never mutates a `ParsedItem`; all reconciliation state lives
/// in the database.
#[derive(Debug, Clone)]
pub struct ParsedItem {
    pub content_type: ContentType,
    pub source_path: PathBuf,
    /// File stem, used as a slug fallback when front matter has no title.
    pub natural_key_hint: Option<String>,
    pub scalar_fields: FieldMap,
    /// Ordered free-text child lists, e.g. resume bullet points under
    /// `details:`.
    pub child_lists: BTreeMap<String, Vec<String>>,
    /// Association values, e.g. `tags:`, `technologies:`, `authors:`.
    pub associations: BTreeMap<String, Vec<Value>>,
}

/// Whether an upsert created a new row or touched an existing one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Created,
    Updated,
}

/// Aggregated result of one batch run.
#[derive(Debug, Default, Clone)]
pub struct SyncReport {
    pub scanned: u64,
    pub created: u64,
    pub updated: u64,
    /// `(source path, message)` per failed item. Failed items are rolled
    /// back individually; the batch itself keeps going.
    pub errors: Vec<(String, String)>,
}

impl SyncReport {
    pub fn ok(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn record(&mut self, outcome: Outcome) {
        match outcome {
            Outcome::Created => self.created += 1,
            Outcome::Updated => self.updated += 1,
        }
    }

    pub fn record_error(&mut self, path: &std::path::Path, message: &str) {
        self.errors
            .push((path.display().to_string(), message.to_string()));
    }
}

/// Read a scalar field as a trimmed, non-empty string.
///
/// YAML front matter frequently carries bare numbers and dates where prose
/// is expected (`year: 2024`), so numbers and booleans are stringified
/// rather than rejected.
pub fn field_str(fields: &FieldMap, key: &str) -> Option<String> {
    match fields.get(key)? {
        Value::String(s) => {
            let t = s.trim();
            if t.is_empty() {
                None
            } else {
                Some(t.to_string())
            }
        }
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

pub fn field_bool(fields: &FieldMap, key: &str) -> Option<bool> {
    match fields.get(key)? {
        Value::Bool(b) => Some(*b),
        Value::String(s) => match s.trim().to_ascii_lowercase().as_str() {
            "true" | "yes" => Some(true),
            "false" | "no" => Some(false),
            _ => None,
        },
        _ => None,
    }
}

pub fn field_i64(fields: &FieldMap, key: &str) -> Option<i64> {
    match fields.get(key)? {
        Value::Number(n) => n.as_i64(),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

pub fn field_f64(fields: &FieldMap, key: &str) -> Option<f64> {
    match fields.get(key)? {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn fields(v: Value) -> FieldMap {
        v.as_object()
            .unwrap()
            .iter()
            .map(|(k, v)| (k.clone(), v.clone()))
            .collect()
    }

    #[test]
    fn test_field_str_stringifies_numbers() {
        let f = fields(json!({"year": 2024, "title": "  Hello  ", "empty": "  "}));
        assert_eq!(field_str(&f, "year").as_deref(), Some("2024"));
        assert_eq!(field_str(&f, "title").as_deref(), Some("Hello"));
        assert_eq!(field_str(&f, "empty"), None);
        assert_eq!(field_str(&f, "missing"), None);
    }

    #[test]
    fn test_field_bool_accepts_yes_no() {
        let f = fields(json!({"a": true, "b": "no", "c": "maybe"}));
        assert_eq!(field_bool(&f, "a"), Some(true));
        assert_eq!(field_bool(&f, "b"), Some(false));
        assert_eq!(field_bool(&f, "c"), None);
    }

    #[test]
    fn test_content_type_from_arg() {
        assert_eq!(ContentType::from_arg("Blog"), Some(ContentType::Blog));
        assert_eq!(ContentType::from_arg("experience"), Some(ContentType::Experience));
        assert_eq!(ContentType::from_arg("unknown"), None);
    }
}
