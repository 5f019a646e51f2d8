use chrono::NaiveDate;

use crate::aggregate::{PlayerTotals, aggregate};
use crate::model::{AwardCategory, LineupRecord, Tally};
use crate::period::Period;
use crate::ranking::{RankedEntry, rank_map};
use crate::store::Store;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LeaderboardLimits {
    pub headline: Option<usize>,
    pub category: Option<usize>,
}

impl Default for LeaderboardLimits {
    fn default() -> Self {
        Self {
            headline: Some(20),
            category: Some(10),
        }
    }
}

impl LeaderboardLimits {
    pub fn unlimited() -> Self {
        Self {
            headline: None,
            category: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlayerRow {
    pub name: String,
    pub position: String,
    pub goals: i64,
    pub assists: i64,
    pub star_count: i64,
    pub star_total: i64,
    pub best_goal_votes: i64,
}

/// Everything the dashboard shows for one period.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Leaderboards {
    pub period: Period,
    pub goals: Vec<RankedEntry>,
    pub assists: Vec<RankedEntry>,
    pub star: Vec<RankedEntry>,
    pub categories: Vec<(AwardCategory, Vec<RankedEntry>)>,
    pub best_goal: Vec<RankedEntry>,
    pub lineups: Vec<LineupRecord>,
    pub players: Vec<PlayerRow>,
}

pub fn build_leaderboards(
    store: &Store,
    period: Period,
    today: NaiveDate,
    limits: LeaderboardLimits,
) -> Leaderboards {
    let totals = aggregate(store, period.window(today));
    let scores = totals.star_scores();

    let categories = AwardCategory::ALL
        .into_iter()
        .map(|cat| (cat, rank_map(&totals.counts_for(Tally::Award(cat)), limits.category)))
        .collect();

    Leaderboards {
        period,
        goals: rank_map(&totals.goals, limits.headline),
        assists: rank_map(&totals.assists, limits.headline),
        star: rank_map(&scores.totals(), limits.headline),
        categories,
        best_goal: rank_map(&totals.counts_for(Tally::BestGoalVotes), limits.headline),
        lineups: store.lineups().to_vec(),
        players: player_table(store),
    }
}

/// Roster table over the full history, best star score first.
pub fn player_table(store: &Store) -> Vec<PlayerRow> {
    let totals: PlayerTotals = aggregate(store, None);
    let scores = totals.star_scores();
    let mut rows: Vec<PlayerRow> = store
        .players()
        .iter()
        .map(|p| {
            let line = totals.player(&p.name);
            PlayerRow {
                name: p.name.clone(),
                position: p.position.clone(),
                goals: line.goals,
                assists: line.assists,
                star_count: line.count(Tally::Award(AwardCategory::Star)),
                star_total: scores.get(&p.name).total,
                best_goal_votes: line.count(Tally::BestGoalVotes),
            }
        })
        .collect();
    rows.sort_by(|a, b| b.star_total.cmp(&a.star_total).then_with(|| a.name.cmp(&b.name)));
    rows
}
