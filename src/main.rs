//! # Folio CLI
//!
//! The `folio` binary synchronizes a Markdown content tree into a
//! relational database and manages the external site-server binary.
//!
//! ## Usage
//!
//! ```bash
//! folio --config ./folio.yml <command>
//! ```
//!
//! ## Commands
//!
//! | Command | Description |
//! |---------|-------------|
//! | `folio init` | Scaffold a content workspace and config file |
//! | `folio sync` | Parse Markdown content and upsert it into the database |
//! | `folio status` | Show row counts and the last sync run |
//! | `folio server start` | Start the external site-server binary |
//! | `folio server stop` | Stop the external site-server binary |
//! | `folio server logs` | Tail the server log |
//!
//! ## Examples
//!
//! ```bash
//! # Create a new workspace in the current directory
//! folio init
//!
//! # See what a sync would do without writing anything
//! folio sync --dry-run
//!
//! # Sync only blog posts
//! folio sync --type blog
//! ```

use std::path::PathBuf;
use std::sync::atomic::Ordering;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use folio::config;
use folio::models::ContentType;
use folio::scaffold;
use folio::server;
use folio::status;
use folio::sync::{self, SyncOptions};

/// Folio — keep a personal site's database in step with its Markdown
/// content.
///
/// All commands except `init` read a YAML configuration file; see the
/// `folio.yml` written by `folio init` for a commented example.
#[derive(Parser)]
#[command(
    name = "folio",
    about = "Sync Markdown content into a relational database for a personal site",
    version
)]
struct Cli {
    /// Path to the configuration file (YAML).
    #[arg(long, global = true, default_value = "./folio.yml")]
    config: PathBuf,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Scaffold a new content workspace.
    ///
    /// Creates `folio.yml`, the `content/` directory tree, and a few
    /// sample Markdown files. Refuses to overwrite an existing config.
    Init {
        /// Directory to initialize (defaults to the current directory).
        path: Option<PathBuf>,
    },

    /// Parse Markdown content and synchronize it into the database.
    ///
    /// Each content file is reconciled in its own transaction: new records
    /// are created, existing ones updated in place, and a failing file is
    /// reported without aborting the rest of the batch. Exits non-zero if
    /// any item failed.
    Sync {
        /// Validate and count without writing to the database.
        #[arg(long)]
        dry_run: bool,

        /// Maximum number of content files to process.
        #[arg(long)]
        limit: Option<usize>,

        /// Only sync one content type (blog, project, idea, update,
        /// education, experience, research, publication, award).
        #[arg(long = "type")]
        type_filter: Option<String>,
    },

    /// Show database row counts and the most recent sync run.
    Status,

    /// Manage the external site-server binary.
    Server {
        #[command(subcommand)]
        action: ServerAction,
    },
}

#[derive(Subcommand)]
enum ServerAction {
    /// Start the server in the background, logging to the configured file.
    Start,
    /// Stop the running server.
    Stop,
    /// Report whether the server is running.
    Status,
    /// Print the tail of the server log.
    Logs {
        /// Number of lines to print.
        #[arg(short = 'n', long, default_value_t = 50)]
        lines: usize,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("folio=info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    // init runs before any config exists.
    if let Commands::Init { path } = &cli.command {
        let root = path.clone().unwrap_or_else(|| PathBuf::from("."));
        scaffold::scaffold_workspace(&root)?;
        return Ok(());
    }

    let cfg = config::load_config(&cli.config)?;

    match cli.command {
        Commands::Init { .. } => unreachable!("handled above"),
        Commands::Sync {
            dry_run,
            limit,
            type_filter,
        } => {
            let type_filter = match type_filter {
                Some(raw) => match ContentType::from_arg(&raw) {
                    Some(t) => Some(t),
                    None => anyhow::bail!(
                        "unknown content type '{raw}'; expected one of: {}",
                        ContentType::ALL.map(|t| t.as_str()).join(", ")
                    ),
                },
                None => None,
            };

            let options = SyncOptions {
                dry_run,
                limit,
                type_filter,
            };

            let cancel = sync::cancel_flag();
            {
                let cancel = cancel.clone();
                tokio::spawn(async move {
                    if tokio::signal::ctrl_c().await.is_ok() {
                        cancel.store(true, Ordering::Relaxed);
                    }
                });
            }

            let report = sync::run_sync(&cfg, &options, &cancel).await?;

            if dry_run {
                println!("sync content (dry-run)");
            } else {
                println!("sync content");
            }
            println!("  scanned: {} items", report.scanned);
            println!("  created: {}", report.created);
            println!("  updated: {}", report.updated);
            println!("  errors:  {}", report.errors.len());
            for (path, message) in &report.errors {
                println!("    {path}: {message}");
            }

            if report.ok() {
                println!("ok");
            } else {
                std::process::exit(1);
            }
        }
        Commands::Status => {
            status::run_status(&cfg).await?;
        }
        Commands::Server { action } => {
            let server_cfg = cfg
                .server
                .as_ref()
                .ok_or_else(|| anyhow::anyhow!("no [server] section in config"))?;
            match action {
                ServerAction::Start => server::start(server_cfg)?,
                ServerAction::Stop => server::stop(server_cfg)?,
                ServerAction::Status => server::status(server_cfg)?,
                ServerAction::Logs { lines } => server::logs(server_cfg, lines)?,
            }
        }
    }

    Ok(())
}
