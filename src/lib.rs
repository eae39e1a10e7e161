//! # Folio
//!
//! Folio keeps a personal site's relational database in step with a directory
//! tree of Markdown content. Blog posts, projects, ideas, updates, and resume
//! sub-records (education, work experience, research, publications, awards)
//! are written as Markdown files with YAML front matter; `folio sync` parses
//! them and reconciles each record against the database under upsert
//! semantics.
//!
//! The library is organized around the synchronization engine in [`sync`]:
//!
//! - [`config`] — YAML configuration (database backend, owner profile,
//!   content root, server binary).
//! - [`db`] — connection management for SQLite, MySQL, and PostgreSQL
//!   through a single `sqlx` Any pool.
//! - [`migrate`] — idempotent schema creation.
//! - [`content`] — the front-matter scanner that produces [`models::ParsedItem`]s.
//! - [`sync`] — identity resolution, bootstrap, upsert, child-detail and
//!   association synchronization, and the batch orchestrator.
//!
//! The `folio` binary wires these together behind a clap CLI; see
//! `src/main.rs`.

pub mod config;
pub mod content;
pub mod db;
pub mod error;
pub mod migrate;
pub mod models;
pub mod scaffold;
pub mod server;
pub mod status;
pub mod sync;
