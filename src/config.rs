use std::env;
use std::path::PathBuf;

use crate::leaderboard::LeaderboardLimits;
use crate::period::Period;

const APP_DIR: &str = "rodada_stats";
const DB_FILE: &str = "db.json";
const FALLBACK_DATA_DIR: &str = "central_data";

/// Settings read from the environment (after `.env` / `.env.local` are loaded
/// by the binaries).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    pub data_dir: PathBuf,
    pub db_path: PathBuf,
    pub log_dir: PathBuf,
    pub period: Period,
    pub limits: LeaderboardLimits,
}

impl AppConfig {
    pub fn from_env() -> Self {
        let data_dir = env_path("RODADA_DATA_DIR").unwrap_or_else(default_data_dir);
        let db_path = env_path("RODADA_DB_FILE").unwrap_or_else(|| data_dir.join(DB_FILE));
        let log_dir = env_path("RODADA_LOG_DIR").unwrap_or_else(|| data_dir.join("logs"));
        let period = env::var("RODADA_PERIOD")
            .ok()
            .and_then(|raw| Period::parse(&raw))
            .unwrap_or_default();
        let defaults = LeaderboardLimits::default();
        let limits = LeaderboardLimits {
            headline: env_limit("RODADA_RANK_LIMIT").or(defaults.headline),
            category: env_limit("RODADA_CATEGORY_LIMIT").or(defaults.category),
        };
        Self {
            data_dir,
            db_path,
            log_dir,
            period,
            limits,
        }
    }

    pub fn with_db_path(mut self, path: PathBuf) -> Self {
        self.db_path = path;
        self
    }
}

fn env_path(key: &str) -> Option<PathBuf> {
    let raw = env::var(key).ok()?;
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }
    Some(PathBuf::from(trimmed))
}

fn env_limit(key: &str) -> Option<usize> {
    env::var(key)
        .ok()
        .and_then(|val| val.trim().parse::<usize>().ok())
        .map(|n| n.max(1))
}

fn default_data_dir() -> PathBuf {
    // Prefer XDG data.
    if let Some(base) = env_path("XDG_DATA_HOME") {
        return base.join(APP_DIR);
    }
    match env_path("HOME") {
        Some(home) => home.join(".local").join("share").join(APP_DIR),
        None => PathBuf::from(FALLBACK_DATA_DIR),
    }
}

/// Pull `--key value` or `--key=value` out of an argument list.
pub fn flag_value(args: &[String], key: &str) -> Option<String> {
    let prefix = format!("--{key}=");
    let bare = format!("--{key}");
    for (idx, arg) in args.iter().enumerate() {
        if let Some(value) = arg.strip_prefix(&prefix) {
            let trimmed = value.trim();
            if !trimmed.is_empty() {
                return Some(trimmed.to_string());
            }
        }
        if *arg == bare {
            let Some(next) = args.get(idx + 1) else {
                continue;
            };
            if !next.trim().is_empty() {
                return Some(next.trim().to_string());
            }
        }
    }
    None
}

/// Arguments that are neither flags nor flag values. `switches` names the
/// flags that take no value.
pub fn positional_args(args: &[String], switches: &[&str]) -> Vec<String> {
    let mut out = Vec::new();
    let mut skip_next = false;
    for arg in args {
        if skip_next {
            skip_next = false;
            continue;
        }
        if let Some(flag) = arg.strip_prefix("--") {
            skip_next = !flag.contains('=') && !switches.contains(&flag);
            continue;
        }
        out.push(arg.clone());
    }
    out
}

pub fn has_switch(args: &[String], key: &str) -> bool {
    let flag = format!("--{key}");
    args.iter().any(|a| *a == flag)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(raw: &[&str]) -> Vec<String> {
        raw.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn flag_value_supports_both_spellings() {
        assert_eq!(
            flag_value(&args(&["in.csv", "--db", "x.json"]), "db").as_deref(),
            Some("x.json")
        );
        assert_eq!(
            flag_value(&args(&["--db=y.json"]), "db").as_deref(),
            Some("y.json")
        );
        assert_eq!(flag_value(&args(&["--db"]), "db"), None);
    }

    #[test]
    fn positional_args_skip_flag_values() {
        let got = positional_args(&args(&["--db", "x.json", "out.xlsx", "--period=annual"]), &[]);
        assert_eq!(got, vec!["out.xlsx".to_string()]);
    }

    #[test]
    fn switches_do_not_swallow_the_next_argument() {
        let got = positional_args(&args(&["--force", "reset", "--db", "x.json"]), &["force"]);
        assert_eq!(got, vec!["reset".to_string()]);
    }

    #[test]
    fn has_switch_matches_exact_flag() {
        assert!(has_switch(&args(&["a", "--force"]), "force"));
        assert!(!has_switch(&args(&["--forced"]), "force"));
    }
}
