//! Command-line entry point.
//!
//! Usage:
//!
//! ```text
//! atelier [--config PATH] migrate
//! atelier [--config PATH] serve [--in-memory]
//! ```
//!
//! `serve` reads one JSON request per line from stdin and writes one JSON
//! response per line to stdout. Logs go to stderr.

use atelier::api::{ApiHandler, ApiResponse};
use atelier::board::adapters::fs::FsAttachmentStore;
use atelier::board::adapters::memory::InMemoryBoardRepository;
use atelier::board::adapters::postgres::{BoardPgPool, PostgresBoardRepository};
use atelier::board::ports::{
    AttachmentStore, AttachmentStoreError, BoardRepository, BoardRepositoryError,
};
use atelier::board::services::BoardService;
use atelier::config::{AtelierConfig, ConfigError};
use atelier::telemetry::{self, TelemetryError};
use camino::Utf8PathBuf;
use clap::{Parser, Subcommand};
use diesel::pg::PgConnection;
use diesel::r2d2::{ConnectionManager, Pool};
use mockable::{Clock, DefaultClock};
use std::io::{self, BufRead, Write};
use std::process::ExitCode;
use std::sync::Arc;
use thiserror::Error;
use tokio::runtime::{Builder, Runtime};

#[derive(Debug, Parser)]
#[command(name = "atelier", version, about = "Design-review project and task tracking")]
struct Cli {
    /// Configuration file; defaults to `atelier.toml` when present.
    #[arg(long, global = true)]
    config: Option<Utf8PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Create the database tables when missing.
    Migrate,
    /// Answer newline-delimited JSON requests from stdin.
    Serve {
        /// Keep projects and tasks in memory instead of PostgreSQL.
        #[arg(long)]
        in_memory: bool,
    },
}

#[derive(Debug, Error)]
enum CliError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Telemetry(#[from] TelemetryError),
    #[error("runtime init failed: {0}")]
    Runtime(#[source] io::Error),
    #[error("failed to build connection pool: {0}")]
    Pool(#[from] diesel::r2d2::PoolError),
    #[error(transparent)]
    Repository(#[from] BoardRepositoryError),
    #[error(transparent)]
    Attachments(#[from] AttachmentStoreError),
    #[error("failed to encode response: {0}")]
    Encode(#[from] serde_json::Error),
    #[error("i/o failure: {0}")]
    Io(#[from] io::Error),
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            tracing::error!(error = %err, "atelier failed");
            report(&err);
            ExitCode::FAILURE
        }
    }
}

fn report(err: &CliError) {
    let mut stderr = io::stderr().lock();
    if let Err(write_err) = writeln!(stderr, "atelier: {err}") {
        tracing::warn!(error = %write_err, "failed to write error to stderr");
    }
}

fn run(cli: Cli) -> Result<(), CliError> {
    let config = AtelierConfig::load(cli.config.as_deref())?;
    telemetry::init(&config.log.filter)?;
    let runtime = Builder::new_multi_thread()
        .enable_all()
        .build()
        .map_err(CliError::Runtime)?;

    match cli.command {
        Command::Migrate => {
            let repository = PostgresBoardRepository::new(connect(&config)?);
            runtime.block_on(repository.apply_schema())?;
            tracing::info!("schema applied");
            Ok(())
        }
        Command::Serve { in_memory } => {
            let clock = Arc::new(DefaultClock);
            let attachments = Arc::new(FsAttachmentStore::open(
                &config.attachments.upload_dir,
                config.attachments.public_prefix.clone(),
                Arc::clone(&clock),
            )?);
            if in_memory {
                let repository = Arc::new(InMemoryBoardRepository::new());
                serve(&runtime, &config, repository, attachments, clock)
            } else {
                let repository = Arc::new(PostgresBoardRepository::new(connect(&config)?));
                serve(&runtime, &config, repository, attachments, clock)
            }
        }
    }
}

fn connect(config: &AtelierConfig) -> Result<BoardPgPool, CliError> {
    let manager = ConnectionManager::<PgConnection>::new(config.database.url.as_str());
    Ok(Pool::builder()
        .max_size(config.database.max_connections)
        .build(manager)?)
}

fn serve<R, A, C>(
    runtime: &Runtime,
    config: &AtelierConfig,
    repository: Arc<R>,
    attachments: Arc<A>,
    clock: Arc<C>,
) -> Result<(), CliError>
where
    R: BoardRepository,
    A: AttachmentStore,
    C: Clock + Send + Sync,
{
    let service =
        BoardService::with_settings(repository, attachments, clock, config.board_settings());
    let handler = ApiHandler::with_listing(service, config.listing_settings()?);
    tracing::info!("serving requests from stdin");

    let stdin = io::stdin().lock();
    let mut stdout = io::stdout().lock();
    for line in stdin.lines() {
        let request = line?;
        if request.trim().is_empty() {
            continue;
        }
        let response: ApiResponse = runtime.block_on(handler.handle_json(&request));
        writeln!(stdout, "{}", serde_json::to_string(&response)?)?;
        stdout.flush()?;
    }
    Ok(())
}
