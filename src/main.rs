//! Books Import Tool
//!
//! This binary normalizes a flat books CSV export into a relational SQLite
//! database: one base `books` table, five facet dimension/bridge pairs and
//! two per-book detail tables.

use anyhow::Result;
use books_normalizer::book_store::{BookStore, SqliteBookStore};
use books_normalizer::dataset::load_books;
use books_normalizer::normalize::{clean, transform, NormalizedDataset, StarCountsPolicy};
use clap::Parser;
use std::path::PathBuf;
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "books-import")]
#[command(about = "Normalize a flat books CSV into a relational SQLite database")]
struct Args {
    /// Path to the source CSV file
    #[arg(value_name = "CSV_PATH")]
    csv_path: PathBuf,

    /// Path to the output SQLite database file
    #[arg(value_name = "OUTPUT_DB")]
    output_db: PathBuf,

    /// What to do when a ratings_by_stars cell is missing or malformed
    #[arg(long, value_enum, default_value_t = StarCountsPolicy::Strict)]
    on_bad_star_counts: StarCountsPolicy,

    /// How many cleaned rows to log before the transformation, for eyeballing
    #[arg(long, default_value_t = 3)]
    sample_rows: usize,
}

fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let args = Args::parse();

    info!("Books Import Tool");
    info!("=================");
    info!("Source CSV: {}", args.csv_path.display());
    info!("Output database: {}", args.output_db.display());

    // Check if output database already exists
    if args.output_db.exists() {
        warn!(
            "Output database already exists: {}",
            args.output_db.display()
        );
        warn!("This will fail if the database already contains data.");
    }

    // Load and clean the flat table
    info!("Loading source CSV...");
    let raw_rows = load_books(&args.csv_path)?;
    let records = clean(raw_rows);
    info!("Cleaned table: {} rows", records.len());

    for record in records.iter().take(args.sample_rows) {
        info!(
            "Sample row {}: book_id={:?} title={:?}",
            record.index, record.book_id, record.title
        );
    }

    // Run the normalization pipeline
    info!("Transforming...");
    let dataset = transform(&records, args.on_bad_star_counts)?;

    // Create the SQLite store
    info!("Opening SQLite database...");
    let store = SqliteBookStore::new(&args.output_db)?;

    // Emit the tables, parents before children so foreign keys resolve
    info!("Writing tables...");
    let mut stats = ImportStats::default();
    emit_tables(&store, &dataset, &mut stats);

    // Print summary
    info!("");
    info!("Import Summary");
    info!("==============");
    info!("Tables written: {}", stats.tables_written);
    info!("Rows written: {}", stats.rows_written);
    if stats.errors > 0 {
        warn!("Tables failed: {}", stats.errors);
    }

    let counts = store.table_counts()?;
    info!("");
    info!("Database contains:");
    for (table, count) in counts {
        info!("  {} rows in {}", count, table);
    }

    info!("");
    info!("Import completed successfully!");

    Ok(())
}

#[derive(Default)]
struct ImportStats {
    tables_written: usize,
    rows_written: usize,
    errors: usize,
}

/// Write every table of the dataset. A failed table is logged and skipped;
/// the remaining tables are still attempted. Dimensions go in before their
/// bridges and `books` before everything else.
fn emit_tables(store: &dyn BookStore, dataset: &NormalizedDataset, stats: &mut ImportStats) {
    record_table(stats, "books", store.insert_books(&dataset.books));

    for facet in &dataset.facets {
        record_table(
            stats,
            facet.kind.dimension_table(),
            store.insert_dimension(facet.kind, &facet.dimension),
        );
        record_table(
            stats,
            facet.kind.bridge_table(),
            store.insert_bridge(facet.kind, &facet.bridge),
        );
    }

    record_table(
        stats,
        "publication_info",
        store.insert_publication_info(&dataset.publication_info),
    );
    record_table(
        stats,
        "ratings_and_bbe_scores",
        store.insert_ratings(&dataset.ratings_and_bbe_scores),
    );
}

fn record_table(stats: &mut ImportStats, table: &str, result: Result<usize>) {
    match result {
        Ok(rows) => {
            info!("Wrote {} rows to {}", rows, table);
            stats.tables_written += 1;
            stats.rows_written += rows;
        }
        Err(e) => {
            error!("Failed to write table {}: {:#}", table, e);
            stats.errors += 1;
        }
    }
}
