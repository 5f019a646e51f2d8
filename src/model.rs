use std::collections::BTreeSet;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

pub const DEFAULT_POSITION: &str = "Indefinido";
pub const MAX_LINEUP_PLAYERS: usize = 5;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Player {
    pub name: String,
    #[serde(default = "default_position")]
    pub position: String,
}

impl Player {
    pub fn new(name: impl Into<String>, position: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            position: position.into(),
        }
    }
}

fn default_position() -> String {
    DEFAULT_POSITION.to_string()
}

/// Award earned by a player in one session. Each carries a fixed weight in the
/// star score (see `scoring::ScoreWeights`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AwardCategory {
    Star,
    TopScorer,
    Playmaker,
    Defender,
    Goalkeeper,
    Wildcard,
    Captain,
}

impl AwardCategory {
    pub const ALL: [AwardCategory; 7] = [
        AwardCategory::Star,
        AwardCategory::TopScorer,
        AwardCategory::Playmaker,
        AwardCategory::Defender,
        AwardCategory::Goalkeeper,
        AwardCategory::Wildcard,
        AwardCategory::Captain,
    ];

    pub fn label(self) -> &'static str {
        match self {
            AwardCategory::Star => "Craque da Rodada",
            AwardCategory::TopScorer => "Artilheiro",
            AwardCategory::Playmaker => "Assistência",
            AwardCategory::Defender => "Defensor",
            AwardCategory::Goalkeeper => "Goleiro",
            AwardCategory::Wildcard => "Coringa",
            AwardCategory::Captain => "Capitão",
        }
    }

    /// Stable key, same as the serialized form.
    pub fn key(self) -> &'static str {
        match self {
            AwardCategory::Star => "star",
            AwardCategory::TopScorer => "top_scorer",
            AwardCategory::Playmaker => "playmaker",
            AwardCategory::Defender => "defender",
            AwardCategory::Goalkeeper => "goalkeeper",
            AwardCategory::Wildcard => "wildcard",
            AwardCategory::Captain => "captain",
        }
    }

    /// Accepts the key (`top_scorer`, `top-scorer`) or the label, case-insensitively.
    pub fn parse(raw: &str) -> Option<Self> {
        let wanted = raw.trim().to_lowercase().replace('-', "_");
        Self::ALL
            .into_iter()
            .find(|c| c.key() == wanted || c.label().to_lowercase() == wanted)
    }
}

/// Per-player counter produced by aggregation: one per award plus best-goal votes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Tally {
    Award(AwardCategory),
    BestGoalVotes,
}

impl Tally {
    pub fn all() -> impl Iterator<Item = Tally> {
        AwardCategory::ALL
            .into_iter()
            .map(Tally::Award)
            .chain(std::iter::once(Tally::BestGoalVotes))
    }

    pub fn label(self) -> &'static str {
        match self {
            Tally::Award(cat) => cat.label(),
            Tally::BestGoalVotes => "Puskás (votos)",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    pub date: NaiveDate,
    #[serde(default)]
    pub records: Vec<SessionRecord>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionRecord {
    pub player_name: String,
    #[serde(default = "default_present")]
    pub present: bool,
    #[serde(default)]
    pub goals: u32,
    #[serde(default)]
    pub assists: u32,
    #[serde(default, skip_serializing_if = "BTreeSet::is_empty")]
    pub flags: BTreeSet<AwardCategory>,
    #[serde(default)]
    pub best_goal_votes: u32,
}

fn default_present() -> bool {
    true
}

impl SessionRecord {
    pub fn new(player_name: impl Into<String>) -> Self {
        Self {
            player_name: player_name.into(),
            present: true,
            goals: 0,
            assists: 0,
            flags: BTreeSet::new(),
            best_goal_votes: 0,
        }
    }

    pub fn with_goals(mut self, goals: u32, assists: u32) -> Self {
        self.goals = goals;
        self.assists = assists;
        self
    }

    pub fn with_flag(mut self, category: AwardCategory) -> Self {
        self.flags.insert(category);
        self
    }

    pub fn with_votes(mut self, votes: u32) -> Self {
        self.best_goal_votes = votes;
        self
    }

    pub fn absent(mut self) -> Self {
        self.present = false;
        self
    }

    pub fn is_well_formed(&self) -> bool {
        !self.player_name.trim().is_empty()
    }
}

/// Administrator adjustments for one player. Every field is optional so the
/// persisted document only carries what was actually edited.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ManualOverride {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub goals: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub assists: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub star_count_manual: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub top_scorer_count_manual: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub playmaker_count_manual: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub defender_count_manual: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub goalkeeper_count_manual: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub wildcard_count_manual: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub captain_count_manual: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub best_goal_votes_manual: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub star_points_manual: Option<i64>,
}

impl ManualOverride {
    pub fn field(&self, kind: EditableQuantity) -> Option<i64> {
        match kind {
            EditableQuantity::Goals => self.goals,
            EditableQuantity::Assists => self.assists,
            EditableQuantity::Count(cat) => self.category_count(cat),
            EditableQuantity::BestGoalVotes => self.best_goal_votes_manual,
            EditableQuantity::StarPoints => self.star_points_manual,
        }
    }

    pub fn field_mut(&mut self, kind: EditableQuantity) -> &mut Option<i64> {
        match kind {
            EditableQuantity::Goals => &mut self.goals,
            EditableQuantity::Assists => &mut self.assists,
            EditableQuantity::Count(AwardCategory::Star) => &mut self.star_count_manual,
            EditableQuantity::Count(AwardCategory::TopScorer) => &mut self.top_scorer_count_manual,
            EditableQuantity::Count(AwardCategory::Playmaker) => &mut self.playmaker_count_manual,
            EditableQuantity::Count(AwardCategory::Defender) => &mut self.defender_count_manual,
            EditableQuantity::Count(AwardCategory::Goalkeeper) => &mut self.goalkeeper_count_manual,
            EditableQuantity::Count(AwardCategory::Wildcard) => &mut self.wildcard_count_manual,
            EditableQuantity::Count(AwardCategory::Captain) => &mut self.captain_count_manual,
            EditableQuantity::BestGoalVotes => &mut self.best_goal_votes_manual,
            EditableQuantity::StarPoints => &mut self.star_points_manual,
        }
    }

    pub fn category_count(&self, category: AwardCategory) -> Option<i64> {
        match category {
            AwardCategory::Star => self.star_count_manual,
            AwardCategory::TopScorer => self.top_scorer_count_manual,
            AwardCategory::Playmaker => self.playmaker_count_manual,
            AwardCategory::Defender => self.defender_count_manual,
            AwardCategory::Goalkeeper => self.goalkeeper_count_manual,
            AwardCategory::Wildcard => self.wildcard_count_manual,
            AwardCategory::Captain => self.captain_count_manual,
        }
    }

    /// Replace the field `kind` points at.
    pub fn set(&mut self, kind: EditableQuantity, value: i64) {
        *self.field_mut(kind) = Some(value);
    }

    /// Accumulate onto the field `kind` points at, treating an unset field as 0.
    pub fn add(&mut self, kind: EditableQuantity, value: i64) {
        let slot = self.field_mut(kind);
        *slot = Some(slot.unwrap_or(0).saturating_add(value));
    }
}

/// The finite set of override fields an administrator can edit in bulk.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EditableQuantity {
    Goals,
    Assists,
    Count(AwardCategory),
    BestGoalVotes,
    StarPoints,
}

impl EditableQuantity {
    pub fn all() -> impl Iterator<Item = EditableQuantity> {
        [EditableQuantity::Goals, EditableQuantity::Assists]
            .into_iter()
            .chain(AwardCategory::ALL.into_iter().map(EditableQuantity::Count))
            .chain([EditableQuantity::BestGoalVotes, EditableQuantity::StarPoints])
    }

    pub fn label(self) -> &'static str {
        match self {
            EditableQuantity::Goals => "Artilharia (Gols)",
            EditableQuantity::Assists => "Assistências",
            EditableQuantity::Count(cat) => cat.label(),
            EditableQuantity::BestGoalVotes => "Puskás (votos)",
            EditableQuantity::StarPoints => "Craque (pontos manuais)",
        }
    }

    /// `goals`, `assists`, `best_goal_votes`, `star_points` or an award key.
    pub fn parse(raw: &str) -> Option<Self> {
        let wanted = raw.trim().to_lowercase().replace('-', "_");
        match wanted.as_str() {
            "goals" | "gols" => Some(EditableQuantity::Goals),
            "assists" | "assistencias" => Some(EditableQuantity::Assists),
            "best_goal_votes" | "puskas" => Some(EditableQuantity::BestGoalVotes),
            "star_points" => Some(EditableQuantity::StarPoints),
            other => AwardCategory::parse(other).map(EditableQuantity::Count),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LineupRecord {
    pub players: Vec<String>,
    #[serde(default)]
    pub win_count: u32,
}

impl LineupRecord {
    /// Case-insensitive, order-independent membership key.
    pub fn membership_key(&self) -> Vec<String> {
        lineup_key(&self.players)
    }

    pub fn label(&self) -> String {
        self.players.join(", ")
    }
}

pub fn lineup_key(players: &[String]) -> Vec<String> {
    let mut key: Vec<String> = players.iter().map(|p| p.trim().to_lowercase()).collect();
    key.sort();
    key.dedup();
    key
}

/// Trim every name, drop the blanks and repeats (case-insensitive, first spelling wins).
pub fn normalize_lineup(players: &[String]) -> Vec<String> {
    let mut seen = BTreeSet::new();
    players
        .iter()
        .map(|p| p.trim())
        .filter(|p| !p.is_empty() && seen.insert(p.to_lowercase()))
        .map(str::to_string)
        .collect()
}

/// Inclusive date range used to filter sessions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateWindow {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl DateWindow {
    pub fn new(start: NaiveDate, end: NaiveDate) -> Self {
        Self { start, end }
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        date >= self.start && date <= self.end
    }
}
