use std::path::PathBuf;

use anyhow::{Context, Result, anyhow};
use chrono::Local;

use rodada_stats::config::{AppConfig, flag_value, positional_args};
use rodada_stats::import;
use rodada_stats::logging;
use rodada_stats::store::Store;

fn main() -> Result<()> {
    let _ = dotenvy::from_filename(".env.local");
    let _ = dotenvy::from_filename(".env");
    logging::init_stderr();

    let args = std::env::args().skip(1).collect::<Vec<_>>();
    let csv_path = positional_args(&args, &[])
        .into_iter()
        .next()
        .map(PathBuf::from)
        .ok_or_else(|| anyhow!("usage: rodada_import <file.csv> [--db path]"))?;
    let mut config = AppConfig::from_env();
    if let Some(db) = flag_value(&args, "db") {
        config = config.with_db_path(PathBuf::from(db));
    }

    let mut store = Store::load(&config.db_path);
    let today = Local::now().date_naive();
    let summary = import::import_sessions_file(&mut store, &csv_path, today)
        .with_context(|| format!("import {}", csv_path.display()))?;
    store
        .save(&config.db_path)
        .with_context(|| format!("save store {}", config.db_path.display()))?;

    println!("Import complete");
    println!("DB: {}", config.db_path.display());
    println!("Rows: {} (skipped {})", summary.rows, summary.skipped_rows);
    println!("Sessions: {}", summary.sessions);
    println!("New players: {}", summary.players_created);
    if summary.defaulted_cells > 0 {
        println!("Cells defaulted: {}", summary.defaulted_cells);
    }
    Ok(())
}
