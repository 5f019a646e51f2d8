use std::path::PathBuf;

use anyhow::{Result, anyhow};
use chrono::Local;

use rodada_stats::config::{AppConfig, flag_value, positional_args};
use rodada_stats::export;
use rodada_stats::leaderboard::{LeaderboardLimits, build_leaderboards};
use rodada_stats::logging;
use rodada_stats::period::Period;
use rodada_stats::store::Store;

fn main() -> Result<()> {
    let _ = dotenvy::from_filename(".env.local");
    let _ = dotenvy::from_filename(".env");
    logging::init_stderr();

    let args = std::env::args().skip(1).collect::<Vec<_>>();
    let out = positional_args(&args, &[])
        .into_iter()
        .next()
        .map(PathBuf::from)
        .ok_or_else(|| anyhow!("usage: rodada_export <out.xlsx|out.json> [--db path] [--period p]"))?;
    let mut config = AppConfig::from_env();
    if let Some(db) = flag_value(&args, "db") {
        config = config.with_db_path(PathBuf::from(db));
    }
    let period = match flag_value(&args, "period") {
        Some(raw) => Period::parse(&raw).ok_or_else(|| anyhow!("unknown period '{raw}'"))?,
        None => config.period,
    };

    let store = Store::load(&config.db_path);
    if out.extension().is_some_and(|ext| ext.eq_ignore_ascii_case("json")) {
        export::export_snapshot_json(&out, &store)?;
        println!("Snapshot written to {}", out.display());
        return Ok(());
    }

    let today = Local::now().date_naive();
    let board = build_leaderboards(&store, period, today, LeaderboardLimits::unlimited());
    let report = export::export_leaderboards_xlsx(&out, &board)?;

    println!("Export complete ({})", period.label());
    println!("File: {}", out.display());
    println!("Sheets: {}", report.sheets);
    println!("Ranked rows: {}", report.ranked_rows);
    println!("Lineups: {}", report.lineups);
    println!("Players: {}", report.players);
    Ok(())
}
