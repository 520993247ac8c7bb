//! Shelfmark - one-shot batch organizer for a reference manager's PDF
//! library.
//!
//! Walks every tracked file in the manager's SQLite database, renames it
//! from its bibliographic metadata, files it under the category folder tree
//! and repoints the database record. Per-record problems are reported and
//! skipped; the batch always runs to completion.

use anyhow::{Context, Result};
use clap::Parser;
use shelfmark_core::{MetadataStore, Organizer};
use std::path::PathBuf;
use tracing::{info, warn, Level};
use tracing_subscriber::FmtSubscriber;

#[derive(Parser, Debug)]
#[command(name = "shelfmark")]
#[command(about = "Reorganize a reference manager's PDF library")]
struct Args {
    /// Path to the manager's SQLite metadata database
    database: PathBuf,

    /// Root directory of the PDF library
    library_root: PathBuf,

    /// Enable debug logging
    #[arg(short, long)]
    debug: bool,
}

fn main() -> Result<()> {
    let args = Args::parse();

    // Set up logging
    let log_level = if args.debug { Level::DEBUG } else { Level::INFO };
    FmtSubscriber::builder()
        .with_max_level(log_level)
        .with_target(false)
        .with_thread_ids(false)
        .compact()
        .init();

    info!(
        "Organizing library {} from {}",
        args.library_root.display(),
        args.database.display()
    );

    let store = MetadataStore::open(&args.database)
        .with_context(|| format!("opening metadata database {}", args.database.display()))?;

    let summary = Organizer::new(store, &args.library_root)
        .run()
        .context("organizer run failed")?;

    info!(
        "Done: {} moved, {} already in place out of {} records",
        summary.moved, summary.already_correct, summary.total
    );

    let skipped = summary.source_missing + summary.destination_conflict + summary.failed;
    if skipped > 0 {
        warn!(
            "{} records skipped ({} missing on disk, {} destination conflicts, {} errors)",
            skipped, summary.source_missing, summary.destination_conflict, summary.failed
        );
    }

    // Per-record problems are log lines, not a process failure; the run
    // attempted every known record.
    Ok(())
}
