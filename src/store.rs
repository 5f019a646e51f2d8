use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use chrono::{NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error::StoreError;
use crate::model::{LineupRecord, ManualOverride, Player, Session, SessionRecord};

/// Everything the application persists. Field names are the on-disk keys.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Store {
    #[serde(default)]
    pub(crate) players: Vec<Player>,
    #[serde(default)]
    pub(crate) sessions: Vec<Session>,
    #[serde(default)]
    pub(crate) manual_overrides: BTreeMap<String, ManualOverride>,
    #[serde(default)]
    pub(crate) lineups: Vec<LineupRecord>,
    #[serde(default)]
    pub(crate) meta: Map<String, Value>,
}

impl Default for Store {
    fn default() -> Self {
        Self::empty()
    }
}

impl Store {
    pub fn empty() -> Self {
        let mut meta = Map::new();
        meta.insert(
            "created".to_string(),
            Value::String(Utc::now().to_rfc3339()),
        );
        Self {
            players: Vec::new(),
            sessions: Vec::new(),
            manual_overrides: BTreeMap::new(),
            lineups: Vec::new(),
            meta,
        }
    }

    /// Read the store at `path`. A missing or unreadable document yields a
    /// fresh empty store rather than an error.
    pub fn load(path: &Path) -> Self {
        let raw = match fs::read_to_string(path) {
            Ok(raw) => raw,
            Err(err) => {
                if path.exists() {
                    tracing::warn!("failed to read store {}: {err}", path.display());
                } else {
                    tracing::info!("no store at {}, starting empty", path.display());
                }
                return Self::empty();
            }
        };
        match Self::from_json(&raw) {
            Ok(store) => {
                tracing::info!(
                    players = store.players.len(),
                    sessions = store.sessions.len(),
                    "loaded store from {}",
                    path.display()
                );
                store
            }
            Err(err) => {
                tracing::warn!("malformed store {}: {err}; starting empty", path.display());
                Self::empty()
            }
        }
    }

    pub fn from_json(raw: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(raw)
    }

    pub fn to_snapshot_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// Write to `path` through a sibling temp file and an atomic rename.
    pub fn save(&self, path: &Path) -> Result<(), StoreError> {
        if let Some(dir) = path.parent() {
            if !dir.as_os_str().is_empty() {
                fs::create_dir_all(dir)?;
            }
        }
        let json = self.to_snapshot_json()?;
        let tmp = path.with_extension("json.tmp");
        fs::write(&tmp, json)?;
        fs::rename(&tmp, path)?;
        tracing::info!("saved store to {}", path.display());
        Ok(())
    }

    pub fn players(&self) -> &[Player] {
        &self.players
    }

    pub fn player(&self, name: &str) -> Option<&Player> {
        self.players.iter().find(|p| p.name == name)
    }

    pub fn has_player(&self, name: &str) -> bool {
        self.player(name).is_some()
    }

    pub fn sessions(&self) -> &[Session] {
        &self.sessions
    }

    pub fn manual_overrides(&self) -> &BTreeMap<String, ManualOverride> {
        &self.manual_overrides
    }

    pub fn manual_override(&self, name: &str) -> Option<&ManualOverride> {
        self.manual_overrides.get(name)
    }

    pub fn lineups(&self) -> &[LineupRecord] {
        &self.lineups
    }

    pub fn meta(&self) -> &Map<String, Value> {
        &self.meta
    }

    /// Distinct session dates, newest first.
    pub fn session_dates(&self) -> Vec<NaiveDate> {
        let mut dates: Vec<NaiveDate> = self.sessions.iter().map(|s| s.date).collect();
        dates.sort_unstable_by(|a, b| b.cmp(a));
        dates.dedup();
        dates
    }

    /// All records from sessions held on `date`, top scorers first.
    pub fn records_on(&self, date: NaiveDate) -> Vec<&SessionRecord> {
        let mut rows: Vec<&SessionRecord> = self
            .sessions
            .iter()
            .filter(|s| s.date == date)
            .flat_map(|s| s.records.iter())
            .collect();
        rows.sort_by(|a, b| b.goals.cmp(&a.goals));
        rows
    }
}
