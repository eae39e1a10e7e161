//! Fatal error taxonomy for the synchronization engine.
//!
//! These variants abort a run before any content item is processed.
//! Item-scoped failures (validation, write errors) are plain
//! [`anyhow::Error`]s captured per item in the batch report and never
//! propagate past the orchestrator.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum SyncError {
    /// Malformed or incomplete configuration.
    #[error("invalid configuration: {0}")]
    Config(String),

    /// The database could not be reached or opened.
    #[error("failed to open database connection")]
    Connection(#[source] sqlx::Error),

    /// Schema creation or verification failed.
    #[error("failed to ensure database schema")]
    Schema(#[source] sqlx::Error),

    /// Owner or language rows could not be resolved, even after the
    /// lost-race reconcile step. Unreachable under correct unique
    /// constraints.
    #[error("bootstrap failed: {0}")]
    Bootstrap(String),
}
