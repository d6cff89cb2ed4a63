use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use presswatch::config::Config;
use presswatch::crawler::{RunTracker, Scanner};
use presswatch::storage::{JsonSnapshot, KnownIds, RecordSink};

#[derive(Parser)]
#[command(
    name = "presswatch",
    version,
    about = "Newsroom press-release scanner with change detection",
    long_about = None
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Log format (text, json)
    #[arg(long, global = true, default_value = "text")]
    log_format: String,
}

#[derive(Subcommand)]
enum Commands {
    /// Scan the newsroom and report new press releases
    Scan {
        /// Configuration file (TOML); environment variables otherwise
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Override the newsroom listing URL
        #[arg(short, long)]
        base_url: Option<String>,

        /// Override the listing-page ceiling
        #[arg(long)]
        max_pages: Option<u32>,

        /// Override the known-identifier file
        #[arg(long)]
        known_file: Option<PathBuf>,

        /// Override the snapshot output file
        #[arg(long)]
        snapshot: Option<PathBuf>,

        /// Reconcile and report without updating the known set
        #[arg(long, default_value = "false")]
        dry_run: bool,
    },

    /// Print the latest snapshot
    Show {
        /// Snapshot file to read
        #[arg(long)]
        snapshot: Option<PathBuf>,

        /// Only list records new as of the last scan
        #[arg(long, default_value = "false")]
        new_only: bool,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    setup_tracing(&cli.log_format, cli.verbose)?;

    match cli.command {
        Commands::Scan {
            config,
            base_url,
            max_pages,
            known_file,
            snapshot,
            dry_run,
        } => {
            scan(config, base_url, max_pages, known_file, snapshot, dry_run).await?;
        }

        Commands::Show { snapshot, new_only } => {
            show(snapshot, new_only)?;
        }
    }

    Ok(())
}

fn setup_tracing(format: &str, verbose: bool) -> Result<()> {
    let env_filter = if verbose {
        tracing_subscriber::EnvFilter::new("presswatch=debug,info")
    } else {
        tracing_subscriber::EnvFilter::new("presswatch=info,warn")
    };

    match format {
        "json" => {
            tracing_subscriber::registry()
                .with(env_filter)
                .with(tracing_subscriber::fmt::layer().json())
                .init();
        }
        _ => {
            tracing_subscriber::registry()
                .with(env_filter)
                .with(tracing_subscriber::fmt::layer().pretty())
                .init();
        }
    }

    Ok(())
}

async fn scan(
    config_path: Option<PathBuf>,
    base_url: Option<String>,
    max_pages: Option<u32>,
    known_file: Option<PathBuf>,
    snapshot_path: Option<PathBuf>,
    dry_run: bool,
) -> Result<()> {
    let mut config = match config_path {
        Some(path) => Config::from_file(&path)?,
        None => Config::from_env()?,
    };

    if let Some(base_url) = base_url {
        config.newsroom.base_url = base_url;
    }
    if let Some(max_pages) = max_pages {
        config.newsroom.max_pages = max_pages;
    }
    if let Some(known_file) = known_file {
        config.storage.known_path = known_file;
    }
    if let Some(snapshot_path) = snapshot_path {
        config.storage.snapshot_path = snapshot_path;
    }

    // Fail on bad configuration before any state is touched
    config.validate()?;

    let tracker = RunTracker::new();
    tracker.try_begin()?;

    let mut known = KnownIds::load(&config.storage.known_path);
    let sink = JsonSnapshot::new(&config.storage.snapshot_path);

    let scanner = Scanner::new(config)?;
    let outcome = match scanner.run(known.as_set()).await {
        Ok(outcome) => outcome,
        Err(e) => {
            tracker.fail(e.to_string());
            return Err(e.into());
        }
    };

    sink.accept(&outcome.records, &outcome.new_positions)?;

    if dry_run {
        tracing::info!("dry run, known identifiers left untouched");
    } else {
        known.insert_all(outcome.records.iter().map(|r| r.record.link.clone()));
        known.save()?;
    }

    tracker.complete(outcome.report.clone());

    println!(
        "Scanned {} pages: {} records, {} new, {} skipped",
        outcome.report.pages_visited,
        outcome.report.total_records,
        outcome.report.new_records,
        outcome.report.skipped.len()
    );
    for skipped in &outcome.report.skipped {
        println!("  skipped {} ({})", skipped.url, skipped.reason);
    }

    Ok(())
}

fn show(snapshot_path: Option<PathBuf>, new_only: bool) -> Result<()> {
    let path = match snapshot_path {
        Some(path) => path,
        None => Config::from_env()?.storage.snapshot_path,
    };

    let snapshot = JsonSnapshot::new(&path).load()?;

    println!(
        "Snapshot of {} ({} records)",
        snapshot.generated_at.format("%Y-%m-%d %H:%M:%S UTC"),
        snapshot.press_releases.len()
    );

    for row in &snapshot.press_releases {
        if new_only && !row.is_new {
            continue;
        }
        let marker = if row.is_new { "*" } else { " " };
        let date = if row.date.is_empty() { "undated" } else { row.date.as_str() };
        println!("{marker} [{date}] {} ({})", row.title, row.link);
    }

    Ok(())
}
