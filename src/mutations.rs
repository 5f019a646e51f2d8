//! Every write the application performs on a [`Store`]. Single-step methods
//! validate their whole input before touching state, so an `Err` leaves the
//! store as it was.

use chrono::NaiveDate;

use crate::error::EngineError;
use crate::model::{
    AwardCategory, DEFAULT_POSITION, EditableQuantity, LineupRecord, MAX_LINEUP_PLAYERS,
    Player, Session, SessionRecord, lineup_key, normalize_lineup,
};
use crate::store::Store;

/// One row of the "add several players" form. Values accumulate onto any
/// existing overrides.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NewPlayerRow {
    pub name: String,
    pub position: String,
    pub goals: i64,
    pub assists: i64,
    pub category_counts: Vec<(AwardCategory, i64)>,
    pub best_goal_votes: i64,
    pub star_points: i64,
}

impl NewPlayerRow {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            position: DEFAULT_POSITION.to_string(),
            ..Self::default()
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlayerEdit {
    pub name: String,
    pub new_name: String,
    pub position: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LineupEdit {
    pub players: Vec<String>,
    pub win_count: u32,
    pub remove: bool,
}

impl Store {
    pub fn add_player(&mut self, name: &str, position: &str) -> Result<(), EngineError> {
        let name = name.trim();
        if name.is_empty() {
            return Err(EngineError::validation("player name is empty"));
        }
        if self.has_player(name) {
            return Err(EngineError::Conflict {
                name: name.to_string(),
            });
        }
        self.players.push(Player::new(name, position_or_default(position)));
        tracing::debug!(player = name, "added player");
        Ok(())
    }

    /// Create the player on first reference; a no-op when it already exists.
    pub fn ensure_player(&mut self, name: &str) {
        let name = name.trim();
        if name.is_empty() || self.has_player(name) {
            return;
        }
        self.players.push(Player::new(name, DEFAULT_POSITION));
    }

    pub fn set_position(&mut self, name: &str, position: &str) -> Result<(), EngineError> {
        let Some(player) = self.players.iter_mut().find(|p| p.name == name) else {
            return Err(EngineError::validation(format!("unknown player '{name}'")));
        };
        let position = position.trim();
        if !position.is_empty() {
            player.position = position.to_string();
        }
        Ok(())
    }

    pub fn add_session(
        &mut self,
        date: NaiveDate,
        records: Vec<SessionRecord>,
        winning_lineup: Option<&[String]>,
    ) -> Result<(), EngineError> {
        let records: Vec<SessionRecord> = records
            .into_iter()
            .filter(SessionRecord::is_well_formed)
            .map(|mut r| {
                r.player_name = r.player_name.trim().to_string();
                r
            })
            .collect();
        if records.is_empty() {
            return Err(EngineError::validation("session has no valid records"));
        }
        let lineup = winning_lineup.map(normalize_lineup).unwrap_or_default();
        check_lineup_size(&lineup)?;

        for rec in &records {
            self.ensure_player(&rec.player_name);
        }
        tracing::debug!(%date, records = records.len(), "registered session");
        self.sessions.push(Session { date, records });
        if !lineup.is_empty() {
            self.bump_lineup(lineup);
        }
        Ok(())
    }

    /// Count one more win for `players`, merging with an existing record that
    /// has the same members in any order or case.
    pub fn record_lineup_win(&mut self, players: &[String]) -> Result<(), EngineError> {
        let lineup = normalize_lineup(players);
        if lineup.is_empty() {
            return Err(EngineError::validation("lineup has no players"));
        }
        check_lineup_size(&lineup)?;
        self.bump_lineup(lineup);
        Ok(())
    }

    fn bump_lineup(&mut self, lineup: Vec<String>) {
        let key = lineup_key(&lineup);
        match self.lineups.iter_mut().find(|l| l.membership_key() == key) {
            Some(existing) => existing.win_count += 1,
            None => self.lineups.push(LineupRecord {
                players: lineup,
                win_count: 1,
            }),
        }
    }

    pub fn add_lineup(&mut self, players: &[String], win_count: u32) -> Result<(), EngineError> {
        let lineup = normalize_lineup(players);
        if lineup.is_empty() {
            return Err(EngineError::validation("lineup has no players"));
        }
        check_lineup_size(&lineup)?;
        self.lineups.push(LineupRecord {
            players: lineup,
            win_count,
        });
        Ok(())
    }

    pub fn edit_lineups(&mut self, edits: Vec<LineupEdit>) -> Result<(), EngineError> {
        let mut next = Vec::with_capacity(edits.len());
        for edit in edits.into_iter().filter(|e| !e.remove) {
            let players = normalize_lineup(&edit.players);
            check_lineup_size(&players)?;
            next.push(LineupRecord {
                players,
                win_count: edit.win_count,
            });
        }
        self.lineups = next;
        Ok(())
    }

    pub fn clear_lineups(&mut self) {
        self.lineups.clear();
    }

    /// Ranking editor: overwrite the `kind` field for every listed player.
    pub fn bulk_edit_ranking<I, S>(&mut self, kind: EditableQuantity, entries: I) -> Result<(), EngineError>
    where
        I: IntoIterator<Item = (S, i64)>,
        S: AsRef<str>,
    {
        let entries: Vec<(String, i64)> = entries
            .into_iter()
            .map(|(n, v)| (n.as_ref().trim().to_string(), v))
            .collect();
        if entries.iter().any(|(n, _)| n.is_empty()) {
            return Err(EngineError::validation("ranking edit has a blank name"));
        }
        for (name, value) in entries {
            self.ensure_player(&name);
            self.manual_overrides.entry(name).or_default().set(kind, value);
        }
        tracing::debug!(kind = kind.label(), "replaced manual values");
        Ok(())
    }

    /// "Add players" form: rows accumulate onto existing overrides. Rows with a
    /// blank name are skipped. Returns the number of rows applied.
    pub fn bulk_add_players(&mut self, rows: Vec<NewPlayerRow>) -> usize {
        let mut applied = 0;
        for row in rows {
            let name = row.name.trim();
            if name.is_empty() {
                continue;
            }
            if !self.has_player(name) {
                self.players
                    .push(Player::new(name, position_or_default(&row.position)));
            }
            let ov = self.manual_overrides.entry(name.to_string()).or_default();
            ov.add(EditableQuantity::Goals, row.goals);
            ov.add(EditableQuantity::Assists, row.assists);
            for (cat, n) in &row.category_counts {
                ov.add(EditableQuantity::Count(*cat), *n);
            }
            if row.best_goal_votes != 0 {
                ov.add(EditableQuantity::BestGoalVotes, row.best_goal_votes);
            }
            if row.star_points != 0 {
                ov.add(EditableQuantity::StarPoints, row.star_points);
            }
            applied += 1;
        }
        tracing::debug!(applied, "bulk added players");
        applied
    }

    pub fn rename_player(&mut self, old: &str, new: &str) -> Result<(), EngineError> {
        let new = new.trim();
        if old == new {
            return Ok(());
        }
        if new.is_empty() {
            return Err(EngineError::validation("new player name is empty"));
        }
        if self.has_player(new)
            || self.manual_overrides.contains_key(new)
            || self.appears_in_sessions(new)
        {
            return Err(EngineError::Conflict {
                name: new.to_string(),
            });
        }
        let referenced = self.has_player(old)
            || self.manual_overrides.contains_key(old)
            || self.appears_in_sessions(old);
        if !referenced {
            return Err(EngineError::validation(format!("unknown player '{old}'")));
        }

        for p in self.players.iter_mut().filter(|p| p.name == old) {
            p.name = new.to_string();
        }
        if let Some(ov) = self.manual_overrides.remove(old) {
            self.manual_overrides.insert(new.to_string(), ov);
        }
        for rec in self
            .sessions
            .iter_mut()
            .flat_map(|s| s.records.iter_mut())
            .filter(|r| r.player_name == old)
        {
            rec.player_name = new.to_string();
        }
        tracing::debug!(old, new, "renamed player");
        Ok(())
    }

    fn appears_in_sessions(&self, name: &str) -> bool {
        self.sessions
            .iter()
            .any(|s| s.records.iter().any(|r| r.player_name == name))
    }

    /// Bulk name/position form. Edits apply in order to a working copy that
    /// replaces the store only when every edit succeeds.
    pub fn edit_players(&mut self, edits: Vec<PlayerEdit>) -> Result<(), EngineError> {
        let mut next = self.clone();
        next.apply_player_edits(edits)?;
        *self = next;
        Ok(())
    }

    fn apply_player_edits(&mut self, edits: Vec<PlayerEdit>) -> Result<(), EngineError> {
        for edit in edits {
            let new_name = edit.new_name.trim();
            let current = if new_name.is_empty() || new_name == edit.name {
                edit.name.clone()
            } else {
                self.rename_player(&edit.name, new_name)?;
                new_name.to_string()
            };
            if self.has_player(&current) {
                self.set_position(&current, &edit.position)?;
            }
        }
        Ok(())
    }

    /// Zero the manual component of `kind` for every player. Session history is
    /// untouched, so the category can still show counts afterwards.
    pub fn reset_category(&mut self, kind: EditableQuantity) {
        for ov in self.manual_overrides.values_mut() {
            ov.set(kind, 0);
        }
        tracing::debug!(kind = kind.label(), "reset manual values");
    }

    pub fn replace_sessions(&mut self, sessions: Vec<Session>) {
        self.sessions = sessions;
    }

    pub fn reset(&mut self) {
        *self = Store::empty();
    }
}

fn check_lineup_size(players: &[String]) -> Result<(), EngineError> {
    if players.len() > MAX_LINEUP_PLAYERS {
        return Err(EngineError::validation(format!(
            "lineup has {} players, at most {MAX_LINEUP_PLAYERS} allowed",
            players.len()
        )));
    }
    Ok(())
}

fn position_or_default(position: &str) -> String {
    let position = position.trim();
    if position.is_empty() {
        DEFAULT_POSITION.to_string()
    } else {
        position.to_string()
    }
}
