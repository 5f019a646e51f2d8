use std::path::PathBuf;

use anyhow::{Context, Result, bail};
use chrono::Local;

use rodada_stats::config::{AppConfig, flag_value, has_switch};
use rodada_stats::demo_data;
use rodada_stats::logging;

fn main() -> Result<()> {
    let _ = dotenvy::from_filename(".env.local");
    let _ = dotenvy::from_filename(".env");
    logging::init_stderr();

    let args = std::env::args().skip(1).collect::<Vec<_>>();
    let mut config = AppConfig::from_env();
    if let Some(db) = flag_value(&args, "db") {
        config = config.with_db_path(PathBuf::from(db));
    }
    let seed = flag_value(&args, "seed")
        .map(|raw| raw.parse::<u64>().context("--seed must be a number"))
        .transpose()?
        .unwrap_or(2024);
    let sessions = flag_value(&args, "sessions")
        .map(|raw| raw.parse::<usize>().context("--sessions must be a number"))
        .transpose()?
        .unwrap_or(26);
    if config.db_path.exists() && !has_switch(&args, "force") {
        bail!(
            "{} already exists; pass --force to overwrite it",
            config.db_path.display()
        );
    }

    let store = demo_data::generate_store(seed, sessions, Local::now().date_naive());
    store
        .save(&config.db_path)
        .with_context(|| format!("save store {}", config.db_path.display()))?;

    println!("Demo store written to {}", config.db_path.display());
    println!("Players: {}", store.players().len());
    println!("Sessions: {}", store.sessions().len());
    println!("Lineups: {}", store.lineups().len());
    Ok(())
}
