//! YAML configuration loading and validation.
//!
//! A `folio.yml` file selects the database backend, describes the site
//! owner (the bootstrap user every record belongs to), points at the
//! content root, and optionally configures the external site-server
//! binary managed by `folio server`.

use std::path::{Path, PathBuf};

use serde::Deserialize;
use sha2::{Digest, Sha256};

use crate::error::SyncError;

#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    pub database: DatabaseConfig,
    pub owner: OwnerProfile,
    #[serde(default)]
    pub languages: Vec<LanguageSpec>,
    #[serde(default)]
    pub content: ContentConfig,
    #[serde(default)]
    pub server: Option<ServerConfig>,
    /// SHA-256 of the raw config file, recorded in each run summary.
    #[serde(skip)]
    pub fingerprint: String,
}

/// Database connection descriptor. One backend per config.
#[derive(Debug, Deserialize, Clone)]
#[serde(tag = "engine", rename_all = "lowercase")]
pub enum DatabaseConfig {
    Sqlite {
        path: PathBuf,
    },
    Mysql {
        host: String,
        #[serde(default = "default_mysql_port")]
        port: u16,
        user: String,
        #[serde(default)]
        password: String,
        name: String,
    },
    Postgres {
        host: String,
        #[serde(default = "default_postgres_port")]
        port: u16,
        user: String,
        #[serde(default)]
        password: String,
        name: String,
    },
}

fn default_mysql_port() -> u16 {
    3306
}
fn default_postgres_port() -> u16 {
    5432
}

/// The site owner bootstrapped into the `users` table on first run.
#[derive(Debug, Deserialize, Clone)]
pub struct OwnerProfile {
    pub username: String,
    pub email: String,
    #[serde(default)]
    pub display_name: Option<String>,
    #[serde(default)]
    pub social: Vec<SocialSpec>,
}

#[derive(Debug, Deserialize, Clone)]
pub struct SocialSpec {
    pub platform: String,
    pub url: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct LanguageSpec {
    pub code: String,
    pub name: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ContentConfig {
    #[serde(default = "default_content_root")]
    pub root: PathBuf,
}

impl Default for ContentConfig {
    fn default() -> Self {
        Self {
            root: default_content_root(),
        }
    }
}

fn default_content_root() -> PathBuf {
    PathBuf::from("content")
}

/// External site-server binary managed by `folio server`.
#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    pub binary: PathBuf,
    #[serde(default)]
    pub args: Vec<String>,
    #[serde(default = "default_pidfile")]
    pub pidfile: PathBuf,
    #[serde(default = "default_logfile")]
    pub logfile: PathBuf,
}

fn default_pidfile() -> PathBuf {
    PathBuf::from(".folio/server.pid")
}
fn default_logfile() -> PathBuf {
    PathBuf::from(".folio/server.log")
}

pub fn load_config(path: &Path) -> Result<Config, SyncError> {
    let raw = std::fs::read_to_string(path)
        .map_err(|e| SyncError::Config(format!("failed to read {}: {e}", path.display())))?;

    let mut config: Config = serde_yaml::from_str(&raw)
        .map_err(|e| SyncError::Config(format!("failed to parse {}: {e}", path.display())))?;

    let mut hasher = Sha256::new();
    hasher.update(raw.as_bytes());
    config.fingerprint = format!("{:x}", hasher.finalize());

    validate(&config)?;
    Ok(config)
}

fn validate(config: &Config) -> Result<(), SyncError> {
    if config.owner.username.trim().is_empty() {
        return Err(SyncError::Config("owner.username must not be empty".into()));
    }
    if !config.owner.email.contains('@') {
        return Err(SyncError::Config(format!(
            "owner.email '{}' is not a valid address",
            config.owner.email
        )));
    }

    match &config.database {
        DatabaseConfig::Sqlite { path } => {
            if path.as_os_str().is_empty() {
                return Err(SyncError::Config("database.path must not be empty".into()));
            }
        }
        DatabaseConfig::Mysql {
            host, user, name, ..
        }
        | DatabaseConfig::Postgres {
            host, user, name, ..
        } => {
            if host.is_empty() || user.is_empty() || name.is_empty() {
                return Err(SyncError::Config(
                    "database.host, database.user, and database.name are required".into(),
                ));
            }
        }
    }

    for lang in &config.languages {
        if lang.code.trim().is_empty() {
            return Err(SyncError::Config("languages[].code must not be empty".into()));
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn write_config(dir: &Path, body: &str) -> PathBuf {
        let path = dir.join("folio.yml");
        std::fs::write(&path, body).unwrap();
        path
    }

    #[test]
    fn test_load_sqlite_config() {
        let tmp = tempfile::tempdir().unwrap();
        let path = write_config(
            tmp.path(),
            r#"
database:
  engine: sqlite
  path: data/folio.db
owner:
  username: alice
  email: alice@example.com
"#,
        );

        let config = load_config(&path).unwrap();
        assert!(matches!(config.database, DatabaseConfig::Sqlite { .. }));
        assert_eq!(config.owner.username, "alice");
        assert_eq!(config.content.root, PathBuf::from("content"));
        assert!(!config.fingerprint.is_empty());
    }

    #[test]
    fn test_backend_port_defaults() {
        let tmp = tempfile::tempdir().unwrap();
        let path = write_config(
            tmp.path(),
            r#"
database:
  engine: postgres
  host: localhost
  user: folio
  name: folio
owner:
  username: alice
  email: alice@example.com
"#,
        );

        let config = load_config(&path).unwrap();
        match config.database {
            DatabaseConfig::Postgres { port, .. } => assert_eq!(port, 5432),
            other => panic!("expected postgres config, got {other:?}"),
        }
    }

    #[test]
    fn test_rejects_missing_username() {
        let tmp = tempfile::tempdir().unwrap();
        let path = write_config(
            tmp.path(),
            r#"
database:
  engine: sqlite
  path: data/folio.db
owner:
  username: "  "
  email: alice@example.com
"#,
        );

        let err = load_config(&path).unwrap_err();
        assert!(err.to_string().contains("configuration"));
    }

    #[test]
    fn test_rejects_bad_email() {
        let tmp = tempfile::tempdir().unwrap();
        let path = write_config(
            tmp.path(),
            r#"
database:
  engine: sqlite
  path: data/folio.db
owner:
  username: alice
  email: not-an-address
"#,
        );

        assert!(load_config(&path).is_err());
    }

    #[test]
    fn test_fingerprint_tracks_content() {
        let tmp = tempfile::tempdir().unwrap();
        let body = r#"
database:
  engine: sqlite
  path: data/folio.db
owner:
  username: alice
  email: alice@example.com
"#;
        let path = write_config(tmp.path(), body);
        let a = load_config(&path).unwrap().fingerprint;
        let b = load_config(&path).unwrap().fingerprint;
        assert_eq!(a, b);

        std::fs::write(&path, body.replace("alice", "bob")).unwrap();
        let c = load_config(&path).unwrap().fingerprint;
        assert_ne!(a, c);
    }
}
