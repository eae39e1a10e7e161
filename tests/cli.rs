//! End-to-end tests driving the compiled `folio` binary.

use std::fs;
use std::path::{Path, PathBuf};
use std::process::Command;

use tempfile::TempDir;

fn folio_binary() -> PathBuf {
    let mut path = std::env::current_exe().unwrap();
    path.pop(); // remove test binary name
    path.pop(); // remove deps/
    path.push("folio");
    path
}

fn setup_workspace() -> (TempDir, PathBuf) {
    let tmp = TempDir::new().unwrap();
    let root = tmp.path();

    let content = root.join("content");
    fs::create_dir_all(content.join("blog")).unwrap();
    fs::create_dir_all(content.join("projects")).unwrap();
    fs::create_dir_all(content.join("resume/education")).unwrap();

    fs::write(
        content.join("blog/first-post.md"),
        "---\ntitle: First Post\nstatus: published\ntags:\n  - rust\n---\n\nHello world.\n",
    )
    .unwrap();
    fs::write(
        content.join("projects/folio.md"),
        "---\ntitle: Folio\nstatus: active\ntechnologies:\n  - rust\n---\n\nContent sync tool.\n",
    )
    .unwrap();
    fs::write(
        content.join("resume/education/mit.md"),
        "---\ninstitution: MIT\ndegree: BSc\ndetails:\n  - Graduated.\n---\n",
    )
    .unwrap();

    let config = format!(
        r#"database:
  engine: sqlite
  path: "{}/data/folio.db"

owner:
  username: alice
  email: alice@example.com
  display_name: Alice

content:
  root: "{}/content"
"#,
        root.display(),
        root.display()
    );
    let config_path = root.join("folio.yml");
    fs::write(&config_path, config).unwrap();

    (tmp, config_path)
}

fn run_folio(config_path: &Path, args: &[&str]) -> (String, String, bool) {
    let binary = folio_binary();
    let output = Command::new(&binary)
        .arg("--config")
        .arg(config_path.to_str().unwrap())
        .args(args)
        .output()
        .unwrap_or_else(|e| panic!("failed to run folio binary at {:?}: {}", binary, e));

    let stdout = String::from_utf8_lossy(&output.stdout).to_string();
    let stderr = String::from_utf8_lossy(&output.stderr).to_string();
    (stdout, stderr, output.status.success())
}

#[test]
fn test_sync_creates_all_items() {
    let (_tmp, config_path) = setup_workspace();

    let (stdout, stderr, success) = run_folio(&config_path, &["sync"]);
    assert!(success, "sync failed: stdout={stdout}, stderr={stderr}");
    assert!(stdout.contains("scanned: 3 items"));
    assert!(stdout.contains("created: 3"));
    assert!(stdout.contains("ok"));
}

#[test]
fn test_sync_idempotent_counts() {
    let (_tmp, config_path) = setup_workspace();

    let (stdout1, _, _) = run_folio(&config_path, &["sync"]);
    assert!(stdout1.contains("created: 3"));

    let (stdout2, _, success) = run_folio(&config_path, &["sync"]);
    assert!(success);
    assert!(stdout2.contains("created: 0"));
    assert!(stdout2.contains("updated: 3"));
}

#[test]
fn test_sync_dry_run_writes_nothing() {
    let (_tmp, config_path) = setup_workspace();

    let (stdout, _, success) = run_folio(&config_path, &["sync", "--dry-run"]);
    assert!(success);
    assert!(stdout.contains("dry-run"));
    assert!(stdout.contains("created: 3"));

    // A real run afterwards still creates everything.
    let (stdout, _, _) = run_folio(&config_path, &["sync"]);
    assert!(stdout.contains("created: 3"));
}

#[test]
fn test_sync_type_filter() {
    let (_tmp, config_path) = setup_workspace();

    let (stdout, _, success) = run_folio(&config_path, &["sync", "--type", "blog"]);
    assert!(success);
    assert!(stdout.contains("scanned: 1 items"));
    assert!(stdout.contains("created: 1"));
}

#[test]
fn test_sync_limit() {
    let (_tmp, config_path) = setup_workspace();

    let (stdout, _, success) = run_folio(&config_path, &["sync", "--limit", "1"]);
    assert!(success);
    assert!(stdout.contains("created: 1"));
}

#[test]
fn test_sync_unknown_type_fails() {
    let (_tmp, config_path) = setup_workspace();

    let (_, stderr, success) = run_folio(&config_path, &["sync", "--type", "podcast"]);
    assert!(!success);
    assert!(stderr.contains("unknown content type"));
}

#[test]
fn test_sync_reports_bad_file_and_exits_nonzero() {
    let (tmp, config_path) = setup_workspace();

    fs::write(
        tmp.path().join("content/resume/education/broken.md"),
        "---\ninstitution: Somewhere\n---\n",
    )
    .unwrap();

    let (stdout, _, success) = run_folio(&config_path, &["sync"]);
    assert!(!success, "a failing item should exit non-zero");
    assert!(stdout.contains("errors:  1"));
    assert!(stdout.contains("broken.md"));
    // The good items were still committed.
    assert!(stdout.contains("created: 3"));
}

#[test]
fn test_status_shows_counts_and_last_run() {
    let (_tmp, config_path) = setup_workspace();

    run_folio(&config_path, &["sync"]);
    let (stdout, stderr, success) = run_folio(&config_path, &["status"]);
    assert!(success, "status failed: {stderr}");
    assert!(stdout.contains("blog posts"));
    assert!(stdout.contains("Last sync:"));
    assert!(stdout.contains("sqlite"));
}

#[test]
fn test_status_before_any_sync() {
    let (_tmp, config_path) = setup_workspace();

    let (stdout, _, success) = run_folio(&config_path, &["status"]);
    assert!(success);
    assert!(stdout.contains("Last sync: never"));
}

#[test]
fn test_init_scaffolds_and_refuses_overwrite() {
    let tmp = TempDir::new().unwrap();
    let target = tmp.path().join("site");
    let config_path = tmp.path().join("unused.yml");

    let (stdout, _, success) = run_folio(&config_path, &["init", target.to_str().unwrap()]);
    assert!(success, "init failed: {stdout}");
    assert!(target.join("folio.yml").exists());
    assert!(target.join("content/blog").is_dir());

    let (_, stderr, success) = run_folio(&config_path, &["init", target.to_str().unwrap()]);
    assert!(!success, "second init should refuse to overwrite");
    assert!(stderr.contains("refusing to overwrite"));
}

#[test]
fn test_missing_config_fails() {
    let tmp = TempDir::new().unwrap();
    let config_path = tmp.path().join("nope.yml");

    let (_, stderr, success) = run_folio(&config_path, &["sync"]);
    assert!(!success);
    assert!(stderr.contains("configuration"));
}

#[test]
fn test_server_without_config_section_fails() {
    let (_tmp, config_path) = setup_workspace();

    let (_, stderr, success) = run_folio(&config_path, &["server", "status"]);
    assert!(!success);
    assert!(stderr.contains("no [server] section"));
}
