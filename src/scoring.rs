use std::collections::BTreeMap;

use crate::model::AwardCategory;

/// Points per award in the star score.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScoreWeights {
    pub star: i64,
    pub top_scorer: i64,
    pub playmaker: i64,
    pub defender: i64,
    pub goalkeeper: i64,
    pub wildcard: i64,
    pub captain: i64,
}

impl Default for ScoreWeights {
    fn default() -> Self {
        Self {
            star: 100,
            top_scorer: 90,
            playmaker: 80,
            defender: 60,
            goalkeeper: 50,
            wildcard: 40,
            captain: 30,
        }
    }
}

impl ScoreWeights {
    pub fn weight(&self, category: AwardCategory) -> i64 {
        match category {
            AwardCategory::Star => self.star,
            AwardCategory::TopScorer => self.top_scorer,
            AwardCategory::Playmaker => self.playmaker,
            AwardCategory::Defender => self.defender,
            AwardCategory::Goalkeeper => self.goalkeeper,
            AwardCategory::Wildcard => self.wildcard,
            AwardCategory::Captain => self.captain,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StarScore {
    pub automatic: i64,
    pub manual: i64,
    pub total: i64,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StarScores {
    pub players: BTreeMap<String, StarScore>,
}

impl StarScores {
    pub fn get(&self, name: &str) -> StarScore {
        self.players.get(name).copied().unwrap_or_default()
    }

    pub fn automatic(&self) -> BTreeMap<String, i64> {
        self.players
            .iter()
            .map(|(n, s)| (n.clone(), s.automatic))
            .collect()
    }

    pub fn totals(&self) -> BTreeMap<String, i64> {
        self.players.iter().map(|(n, s)| (n.clone(), s.total)).collect()
    }

    pub(crate) fn include_names(&mut self, names: impl IntoIterator<Item = String>) {
        for name in names {
            self.players.entry(name).or_default();
        }
    }
}

pub fn compute_star_score(
    category_counts: &BTreeMap<AwardCategory, BTreeMap<String, i64>>,
    manual_points: &BTreeMap<String, i64>,
) -> StarScores {
    compute_star_score_with(&ScoreWeights::default(), category_counts, manual_points)
}

/// Linear combination: Σ count × weight per award, plus manual points.
pub fn compute_star_score_with(
    weights: &ScoreWeights,
    category_counts: &BTreeMap<AwardCategory, BTreeMap<String, i64>>,
    manual_points: &BTreeMap<String, i64>,
) -> StarScores {
    let mut players: BTreeMap<String, StarScore> = BTreeMap::new();
    for (cat, per_player) in category_counts {
        let w = weights.weight(*cat);
        for (name, count) in per_player {
            let score = players.entry(name.clone()).or_default();
            score.automatic = score.automatic.saturating_add(count.saturating_mul(w));
        }
    }
    for (name, points) in manual_points {
        let score = players.entry(name.clone()).or_default();
        score.manual = score.manual.saturating_add(*points);
    }
    for score in players.values_mut() {
        score.total = score.automatic.saturating_add(score.manual);
    }
    StarScores { players }
}
