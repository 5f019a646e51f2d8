use std::collections::{BTreeMap, BTreeSet};

use crate::model::{AwardCategory, DateWindow, Tally};
use crate::scoring::{self, StarScores};
use crate::store::Store;

/// Per-player totals for one window. `counts` and `star_points_manual` only
/// list non-zero contributors; `known_players` is the full roster so callers
/// can fill in zeros.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PlayerTotals {
    pub goals: BTreeMap<String, i64>,
    pub assists: BTreeMap<String, i64>,
    pub counts: BTreeMap<Tally, BTreeMap<String, i64>>,
    pub star_points_manual: BTreeMap<String, i64>,
    pub known_players: BTreeSet<String>,
}

/// Zero-filled view of one player's totals.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlayerLine {
    pub name: String,
    pub goals: i64,
    pub assists: i64,
    pub counts: BTreeMap<Tally, i64>,
    pub star_points_manual: i64,
}

impl PlayerLine {
    pub fn count(&self, tally: Tally) -> i64 {
        self.counts.get(&tally).copied().unwrap_or(0)
    }
}

pub fn aggregate(store: &Store, window: Option<DateWindow>) -> PlayerTotals {
    let mut totals = PlayerTotals {
        known_players: store.players().iter().map(|p| p.name.clone()).collect(),
        ..PlayerTotals::default()
    };

    // Overrides are cumulative adjustments, so the window never applies to them.
    for (name, ov) in store.manual_overrides() {
        add_to(&mut totals.goals, name, ov.goals.unwrap_or(0));
        add_to(&mut totals.assists, name, ov.assists.unwrap_or(0));
        for cat in AwardCategory::ALL {
            totals.bump(Tally::Award(cat), name, ov.category_count(cat).unwrap_or(0));
        }
        totals.bump(
            Tally::BestGoalVotes,
            name,
            ov.best_goal_votes_manual.unwrap_or(0),
        );
        if let Some(points) = ov.star_points_manual.filter(|p| *p != 0) {
            totals.star_points_manual.insert(name.clone(), points);
        }
    }

    let in_window = store
        .sessions()
        .iter()
        .filter(|s| window.is_none_or(|w| w.contains(s.date)));
    for session in in_window {
        for rec in &session.records {
            let name = rec.player_name.as_str();
            if rec.present {
                add_to(&mut totals.goals, name, i64::from(rec.goals));
                add_to(&mut totals.assists, name, i64::from(rec.assists));
            }
            for cat in &rec.flags {
                totals.bump(Tally::Award(*cat), name, 1);
            }
            totals.bump(Tally::BestGoalVotes, name, i64::from(rec.best_goal_votes));
        }
    }

    totals
}

fn add_to(map: &mut BTreeMap<String, i64>, name: &str, amount: i64) {
    let slot = map.entry(name.to_string()).or_insert(0);
    *slot = slot.saturating_add(amount);
}

impl PlayerTotals {
    fn bump(&mut self, tally: Tally, name: &str, amount: i64) {
        if amount == 0 {
            return;
        }
        add_to(self.counts.entry(tally).or_default(), name, amount);
    }

    pub fn counts_for(&self, tally: Tally) -> BTreeMap<String, i64> {
        self.counts.get(&tally).cloned().unwrap_or_default()
    }

    pub fn award_counts(&self) -> BTreeMap<AwardCategory, BTreeMap<String, i64>> {
        AwardCategory::ALL
            .into_iter()
            .map(|cat| (cat, self.counts_for(Tally::Award(cat))))
            .collect()
    }

    pub fn player(&self, name: &str) -> PlayerLine {
        PlayerLine {
            name: name.to_string(),
            goals: self.goals.get(name).copied().unwrap_or(0),
            assists: self.assists.get(name).copied().unwrap_or(0),
            counts: Tally::all()
                .map(|t| {
                    let v = self
                        .counts
                        .get(&t)
                        .and_then(|m| m.get(name))
                        .copied()
                        .unwrap_or(0);
                    (t, v)
                })
                .collect(),
            star_points_manual: self.star_points_manual.get(name).copied().unwrap_or(0),
        }
    }

    /// Roster plus every name that contributed anything in this window.
    pub fn all_names(&self) -> BTreeSet<String> {
        let mut names = self.known_players.clone();
        names.extend(self.goals.keys().cloned());
        names.extend(self.assists.keys().cloned());
        for per_player in self.counts.values() {
            names.extend(per_player.keys().cloned());
        }
        names.extend(self.star_points_manual.keys().cloned());
        names
    }

    /// Star scores for every name in `all_names`, zero-filled.
    pub fn star_scores(&self) -> StarScores {
        let mut scores = scoring::compute_star_score(&self.award_counts(), &self.star_points_manual);
        scores.include_names(self.all_names());
        scores
    }
}
