use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Context;
use clap::{Parser, Subcommand};
use lugat_config::Config;
use lugat_enrich::HttpEnricher;
use lugat_import::Importer;
use lugat_store::{CheckpointStore, FileCheckpointStore, RestCardSink};
use lugat_types::TargetLanguage;
use tokio::signal;
use uuid::Uuid;

mod progress;

use self::progress::progress_loop;

#[derive(Parser)]
#[command(name = "lugat", about = "Resumable vocabulary flashcard importer")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Import a word-list PDF (or plain text file) into a new batch
    Start {
        file: PathBuf,
        /// Destination batch; derived from file name + date when omitted
        #[arg(long)]
        batch_id: Option<String>,
        /// Target translation language (uz, ru, en, kk, tr)
        #[arg(long, default_value = "uz")]
        lang: String,
    },
    /// Continue an interrupted import from its last checkpoint
    Resume,
    /// Show the saved queue, if any
    Status,
    /// Abandon the saved queue
    Clear,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    init_tracing();

    let cli = Cli::parse();
    let config = Config::new();

    match cli.command {
        Command::Start {
            file,
            batch_id,
            lang,
        } => {
            let language: TargetLanguage = lang.parse().map_err(anyhow::Error::msg)?;
            run_import(&config, Some((file, batch_id, language))).await
        }
        Command::Resume => run_import(&config, None).await,
        Command::Status => status(&config),
        Command::Clear => {
            let checkpoint = FileCheckpointStore::new(&config.checkpoint_path);
            checkpoint.clear()?;
            tracing::info!("Saved import queue cleared");
            Ok(())
        }
    }
}

fn init_tracing() {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_ansi(atty::is(atty::Stream::Stdout))
        .init();
}

fn owner_id() -> Uuid {
    match std::env::var("LUGAT_OWNER_ID").ok().and_then(|v| v.parse().ok()) {
        Some(id) => id,
        None => {
            let id = Uuid::new_v4();
            tracing::warn!("LUGAT_OWNER_ID not set, using ephemeral owner {id}");
            id
        }
    }
}

fn build_importer(config: &Config) -> (Importer, kanal::AsyncReceiver<lugat_types::ImportEvent>) {
    let (tx, rx) = kanal::bounded_async(256);

    let importer = Importer::new(
        config.import.clone(),
        Arc::new(HttpEnricher::new(
            config.enrich.api_url.clone(),
            config.enrich.api_key.clone(),
        )),
        Arc::new(RestCardSink::new(
            config.store.api_url.clone(),
            config.store.api_key.clone(),
        )),
        Arc::new(FileCheckpointStore::new(&config.checkpoint_path)),
        owner_id(),
    )
    .with_events(tx);

    (importer, rx)
}

/// Drive one import to completion (or interruption). `start` carries the
/// file arguments for a fresh import; `None` resumes the saved queue.
async fn run_import(
    config: &Config,
    start: Option<(PathBuf, Option<String>, TargetLanguage)>,
) -> anyhow::Result<()> {
    let (importer, rx) = build_importer(config);
    let printer = tokio::spawn(progress_loop(rx));

    let run = async {
        match start {
            Some((file, batch_id, language)) => {
                let file_name = file
                    .file_name()
                    .and_then(|s| s.to_str())
                    .unwrap_or("import")
                    .to_string();
                let bytes = std::fs::read(&file)
                    .with_context(|| format!("reading {}", file.display()))?;

                let outcome = if bytes.starts_with(b"%PDF") {
                    importer
                        .start_import_pdf(&bytes, &file_name, batch_id, language)
                        .await?
                } else {
                    let text = String::from_utf8(bytes).context("file is neither PDF nor UTF-8 text")?;
                    importer
                        .start_import_text(&text, &file_name, batch_id, language)
                        .await?
                };
                anyhow::Ok(outcome)
            }
            None => anyhow::Ok(importer.resume_import().await?),
        }
    };

    let result = tokio::select! {
        result = run => Some(result),
        _ = signal::ctrl_c() => None,
    };
    printer.abort();

    match result {
        Some(Ok(outcome)) => {
            tracing::info!(
                "Done: {} imported, {} skipped of {}",
                outcome.imported,
                outcome.skipped,
                outcome.total
            );
            Ok(())
        }
        Some(Err(e)) => {
            tracing::error!("{e:#}");
            if importer.has_unfinished_import().unwrap_or(false) {
                tracing::info!("Progress is saved; run `lugat resume` to continue");
            }
            Err(e)
        }
        None => {
            // Equivalent to a crash: the last committed chapter is durable
            tracing::info!("Interrupted; run `lugat resume` to continue from the last checkpoint");
            Ok(())
        }
    }
}

fn status(config: &Config) -> anyhow::Result<()> {
    let checkpoint = FileCheckpointStore::new(&config.checkpoint_path);
    match checkpoint.load()? {
        Some(queue) => {
            tracing::info!(
                "Unfinished import: batch={} lang={} progress={}/{} ({} remaining, created {})",
                queue.batch_id,
                queue.language,
                queue.processed,
                queue.entries.len(),
                queue.remaining(),
                queue.created_at.format("%Y-%m-%d %H:%M UTC")
            );
        }
        None => tracing::info!("No unfinished import"),
    }
    Ok(())
}
