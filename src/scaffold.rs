//! Workspace scaffolding for `folio init`.
//!
//! Lays out a fresh content workspace: a commented `folio.yml`, the
//! content directory tree, and one sample file per content family so the
//! first sync has something to chew on. Existing files are never
//! overwritten.

use std::path::Path;

use anyhow::{bail, Result};

use crate::models::ContentType;

const CONFIG_TEMPLATE: &str = r#"# Folio configuration.
#
# The database section selects exactly one backend:
#
#   database:
#     engine: sqlite
#     path: data/folio.db
#
#   database:
#     engine: postgres        # or mysql
#     host: localhost
#     # port: 5432            # defaults: postgres 5432, mysql 3306
#     user: folio
#     password: secret
#     name: folio

database:
  engine: sqlite
  path: data/folio.db

owner:
  username: your-username
  email: you@example.com
  display_name: Your Name
  social:
    - platform: github
      url: https://github.com/your-username

languages:
  - code: en
    name: English

content:
  root: content

# Uncomment to let `folio server` manage your site server binary.
# server:
#   binary: ./bin/folio-server
#   args: []
#   pidfile: .folio/server.pid
#   logfile: .folio/server.log
"#;

const SAMPLE_BLOG: &str = r#"---
title: Hello World
status: draft
tags:
  - meta
---

This is your first post. Edit it, then run `folio sync`.
"#;

const SAMPLE_PROJECT: &str = r#"---
title: Sample Project
status: active
priority: medium
duration: 2-3 months
technologies:
  - rust
---

Describe the project here.
"#;

const SAMPLE_EXPERIENCE: &str = r#"---
company: ACME Corp
position: Software Engineer
start_date: 2021-01
current: true
details:
  - Built the thing.
  - Kept the thing running.
---
"#;

pub fn scaffold_workspace(root: &Path) -> Result<()> {
    let config_path = root.join("folio.yml");
    if config_path.exists() {
        bail!("refusing to overwrite existing {}", config_path.display());
    }

    for content_type in ContentType::ALL {
        std::fs::create_dir_all(root.join("content").join(content_type.content_dir()))?;
    }
    std::fs::create_dir_all(root.join("data"))?;

    std::fs::write(&config_path, CONFIG_TEMPLATE)?;
    write_if_absent(&root.join("content/blog/hello-world.md"), SAMPLE_BLOG)?;
    write_if_absent(&root.join("content/projects/sample-project.md"), SAMPLE_PROJECT)?;
    write_if_absent(
        &root.join("content/resume/experience/acme-corp.md"),
        SAMPLE_EXPERIENCE,
    )?;

    println!("initialized folio workspace in {}", root.display());
    println!("  config:  {}", config_path.display());
    println!("  content: {}", root.join("content").display());
    println!();
    println!("next: edit folio.yml, then run `folio sync`");
    Ok(())
}

fn write_if_absent(path: &Path, contents: &str) -> Result<()> {
    if path.exists() {
        return Ok(());
    }
    std::fs::write(path, contents)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scaffold_creates_tree() {
        let tmp = tempfile::tempdir().unwrap();
        scaffold_workspace(tmp.path()).unwrap();

        assert!(tmp.path().join("folio.yml").exists());
        assert!(tmp.path().join("content/blog/hello-world.md").exists());
        assert!(tmp.path().join("content/resume/education").is_dir());
    }

    #[test]
    fn test_scaffold_refuses_existing_config() {
        let tmp = tempfile::tempdir().unwrap();
        std::fs::write(tmp.path().join("folio.yml"), "database: {}").unwrap();

        let err = scaffold_workspace(tmp.path()).unwrap_err();
        assert!(err.to_string().contains("refusing to overwrite"));
    }
}
