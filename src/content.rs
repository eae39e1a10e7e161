//! Markdown content scanner.
//!
//! Walks the content root, parses YAML front matter, and normalizes each
//! file into a [`ParsedItem`] for the synchronization engine. Files that
//! fail to parse are reported per file rather than aborting the scan, so
//! one broken document never blocks the rest of a sync.
//!
//! Layout under the content root, one Markdown file per record:
//!
//! ```text
//! content/
//!   blog/          projects/        ideas/          updates/
//!   resume/education/  resume/experience/  resume/research/
//!   resume/publications/  resume/awards/
//! ```
//!
//! Hidden files, `_`-prefixed drafts, and `README.md` are skipped.

use std::collections::BTreeMap;
use std::path::Path;

use anyhow::{bail, Context, Result};
use globset::{Glob, GlobSet, GlobSetBuilder};
use serde_json::Value;
use walkdir::WalkDir;

use crate::models::{ContentType, ParsedItem};

/// Front-matter keys routed into `ParsedItem::child_lists`.
const CHILD_LIST_KEYS: &[&str] = &["details"];

/// Front-matter keys routed into `ParsedItem::associations`.
const ASSOCIATION_KEYS: &[&str] = &["tags", "categories", "technologies", "authors"];

/// Scan result: parsed items plus per-file parse failures.
#[derive(Debug, Default)]
pub struct ScanOutcome {
    pub items: Vec<ParsedItem>,
    pub errors: Vec<(String, String)>,
}

/// Scan the content root for every content type (or just `type_filter`).
///
/// Items are sorted by source path so repeated runs process files in a
/// stable order.
pub fn scan_content(root: &Path, type_filter: Option<ContentType>) -> Result<ScanOutcome> {
    if !root.exists() {
        bail!("content root does not exist: {}", root.display());
    }

    let include = build_globset(&["**/*.md", "**/*.markdown"])?;
    let exclude = build_globset(&["**/.*", "**/.*/**", "**/_*", "**/README.md"])?;

    let mut outcome = ScanOutcome::default();

    for content_type in ContentType::ALL {
        if let Some(filter) = type_filter {
            if content_type != filter {
                continue;
            }
        }

        let dir = root.join(content_type.content_dir());
        if !dir.exists() {
            continue;
        }

        for entry in WalkDir::new(&dir) {
            let entry = entry?;
            if !entry.file_type().is_file() {
                continue;
            }

            let path = entry.path();
            let relative = path.strip_prefix(&dir).unwrap_or(path);
            let rel_str = relative.to_string_lossy();
            if exclude.is_match(rel_str.as_ref()) || !include.is_match(rel_str.as_ref()) {
                continue;
            }

            match parse_file(content_type, path) {
                Ok(item) => outcome.items.push(item),
                Err(e) => outcome
                    .errors
                    .push((path.display().to_string(), format!("{e:#}"))),
            }
        }
    }

    outcome.items.sort_by(|a, b| a.source_path.cmp(&b.source_path));
    Ok(outcome)
}

fn parse_file(content_type: ContentType, path: &Path) -> Result<ParsedItem> {
    let raw = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read {}", path.display()))?;

    let (front_matter, body) = split_front_matter(&raw);

    let mut scalar_fields = BTreeMap::new();
    let mut child_lists = BTreeMap::new();
    let mut associations = BTreeMap::new();

    if let Some(yaml) = front_matter {
        let parsed: Value = serde_yaml::from_str(yaml)
            .with_context(|| format!("invalid front matter in {}", path.display()))?;
        match parsed {
            // An empty block between the fences is fine.
            Value::Null => {}
            Value::Object(map) => {
                for (key, value) in map {
                    if CHILD_LIST_KEYS.contains(&key.as_str()) {
                        child_lists.insert(key, value_list_to_texts(&value));
                    } else if ASSOCIATION_KEYS.contains(&key.as_str()) {
                        associations.insert(key, value_list(&value));
                    } else {
                        scalar_fields.insert(key, value);
                    }
                }
            }
            _ => bail!("front matter in {} is not a mapping", path.display()),
        }
    }

    let body = body.trim();
    if !body.is_empty() {
        scalar_fields.insert("body".to_string(), Value::String(body.to_string()));
    }

    let natural_key_hint = path
        .file_stem()
        .map(|s| s.to_string_lossy().to_string())
        .filter(|s| !s.is_empty());

    Ok(ParsedItem {
        content_type,
        source_path: path.to_path_buf(),
        natural_key_hint,
        scalar_fields,
        child_lists,
        associations,
    })
}

/// Split `raw` into its YAML front-matter block and the Markdown body.
///
/// Front matter is delimited by a `---` line at the very start of the file
/// and a closing `---` line. Without both fences the whole input is body.
pub fn split_front_matter(raw: &str) -> (Option<&str>, &str) {
    let trimmed = raw.strip_prefix('\u{feff}').unwrap_or(raw);
    if !trimmed.starts_with("---") {
        return (None, raw);
    }
    let Some(first_nl) = trimmed.find('\n') else {
        return (None, raw);
    };
    if !trimmed[3..first_nl].trim().is_empty() {
        return (None, raw);
    }

    let rest = &trimmed[first_nl + 1..];
    let mut offset = 0;
    for line in rest.split_inclusive('\n') {
        if line.trim_end() == "---" {
            let front = &rest[..offset];
            let body = &rest[offset + line.len()..];
            return (Some(front), body);
        }
        offset += line.len();
    }

    // No closing fence; treat the whole file as body.
    (None, raw)
}

/// Coerce a front-matter value into a list of display strings, preserving
/// order. A scalar becomes a one-element list.
fn value_list_to_texts(value: &Value) -> Vec<String> {
    value_list(value)
        .iter()
        .filter_map(scalar_to_text)
        .collect()
}

fn value_list(value: &Value) -> Vec<Value> {
    match value {
        Value::Array(items) => items.clone(),
        Value::Null => Vec::new(),
        other => vec![other.clone()],
    }
}

pub fn scalar_to_text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

fn build_globset(patterns: &[&str]) -> Result<GlobSet> {
    let mut builder = GlobSetBuilder::new();
    for pattern in patterns {
        builder.add(Glob::new(pattern)?);
    }
    Ok(builder.build()?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_front_matter_basic() {
        let raw = "---\ntitle: Hello\n---\n\nBody text.\n";
        let (front, body) = split_front_matter(raw);
        assert_eq!(front, Some("title: Hello\n"));
        assert_eq!(body.trim(), "Body text.");
    }

    #[test]
    fn test_split_front_matter_missing_fences() {
        let raw = "# Just a heading\n\nNo front matter here.\n";
        let (front, body) = split_front_matter(raw);
        assert_eq!(front, None);
        assert_eq!(body, raw);
    }

    #[test]
    fn test_split_front_matter_unclosed() {
        let raw = "---\ntitle: Hello\n\nNo closing fence.\n";
        let (front, body) = split_front_matter(raw);
        assert_eq!(front, None);
        assert_eq!(body, raw);
    }

    #[test]
    fn test_split_front_matter_crlf() {
        let raw = "---\r\ntitle: Hello\r\n---\r\nBody.\r\n";
        let (front, body) = split_front_matter(raw);
        assert!(front.unwrap().contains("title: Hello"));
        assert_eq!(body.trim(), "Body.");
    }

    #[test]
    fn test_parse_file_routes_keys() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("first-post.md");
        std::fs::write(
            &path,
            "---\ntitle: First Post\nstatus: published\ntags:\n  - rust\n  - databases\ndetails:\n  - one\n  - two\n---\n\nHello world.\n",
        )
        .unwrap();

        let item = parse_file(ContentType::Blog, &path).unwrap();
        assert_eq!(item.natural_key_hint.as_deref(), Some("first-post"));
        assert_eq!(
            item.scalar_fields.get("title").and_then(|v| v.as_str()),
            Some("First Post")
        );
        assert_eq!(
            item.scalar_fields.get("body").and_then(|v| v.as_str()),
            Some("Hello world.")
        );
        assert_eq!(item.associations.get("tags").map(|v| v.len()), Some(2));
        assert_eq!(
            item.child_lists.get("details").map(|v| v.as_slice()),
            Some(["one".to_string(), "two".to_string()].as_slice())
        );
    }

    #[test]
    fn test_scan_reports_broken_files_without_aborting() {
        let tmp = tempfile::tempdir().unwrap();
        let blog = tmp.path().join("blog");
        std::fs::create_dir_all(&blog).unwrap();
        std::fs::write(blog.join("good.md"), "---\ntitle: Good\n---\nBody.\n").unwrap();
        std::fs::write(blog.join("bad.md"), "---\ntitle: [unclosed\n---\nBody.\n").unwrap();

        let outcome = scan_content(tmp.path(), Some(ContentType::Blog)).unwrap();
        assert_eq!(outcome.items.len(), 1);
        assert_eq!(outcome.errors.len(), 1);
        assert!(outcome.errors[0].0.contains("bad.md"));
    }

    #[test]
    fn test_scan_skips_drafts_and_hidden() {
        let tmp = tempfile::tempdir().unwrap();
        let blog = tmp.path().join("blog");
        std::fs::create_dir_all(&blog).unwrap();
        std::fs::write(blog.join("post.md"), "---\ntitle: Post\n---\n").unwrap();
        std::fs::write(blog.join("_draft.md"), "---\ntitle: Draft\n---\n").unwrap();
        std::fs::write(blog.join(".hidden.md"), "---\ntitle: Hidden\n---\n").unwrap();
        std::fs::write(blog.join("README.md"), "readme").unwrap();

        let outcome = scan_content(tmp.path(), Some(ContentType::Blog)).unwrap();
        assert_eq!(outcome.items.len(), 1);
        assert!(outcome.errors.is_empty());
    }

    #[test]
    fn test_scan_missing_root_fails() {
        let tmp = tempfile::tempdir().unwrap();
        let missing = tmp.path().join("nope");
        assert!(scan_content(&missing, None).is_err());
    }
}
