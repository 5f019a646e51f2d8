use std::path::PathBuf;

use anyhow::{Context, Result, bail};
use chrono::Local;

use rodada_stats::commands::EditCommand;
use rodada_stats::config::{AppConfig, flag_value, has_switch};
use rodada_stats::logging;
use rodada_stats::store::Store;

fn main() -> Result<()> {
    let _ = dotenvy::from_filename(".env.local");
    let _ = dotenvy::from_filename(".env");
    logging::init_stderr();

    let args = std::env::args().skip(1).collect::<Vec<_>>();
    let mut config = AppConfig::from_env();
    if let Some(db) = flag_value(&args, "db") {
        config = config.with_db_path(PathBuf::from(db));
    }

    let today = Local::now().date_naive();
    let command = EditCommand::parse(&args, today)?;
    if command == EditCommand::Reset && !has_switch(&args, "force") {
        bail!("reset wipes {}; pass --force to confirm", config.db_path.display());
    }

    let mut store = Store::load(&config.db_path);
    let summary = command.apply(&mut store)?;
    store
        .save(&config.db_path)
        .with_context(|| format!("save store {}", config.db_path.display()))?;

    println!("{summary}");
    println!("DB: {}", config.db_path.display());
    Ok(())
}
