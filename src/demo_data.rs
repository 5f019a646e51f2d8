use chrono::{Duration, NaiveDate};
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};

use crate::model::{AwardCategory, SessionRecord};
use crate::mutations::NewPlayerRow;
use crate::store::Store;

const DEMO_ROSTER: [(&str, &str); 12] = [
    ("Ana", "Goleira"),
    ("Bruno", "Zagueiro"),
    ("Caio", "Zagueiro"),
    ("Duda", "Lateral"),
    ("Edu", "Volante"),
    ("Fábio", "Meia"),
    ("Gabi", "Meia"),
    ("Hugo", "Ponta"),
    ("Iara", "Ponta"),
    ("João", "Atacante"),
    ("Kleber", "Atacante"),
    ("Lia", "Coringa"),
];

/// Build a store with `sessions` weekly sessions ending at `last_date`.
/// The same seed always yields the same store.
pub fn generate_store(seed: u64, sessions: usize, last_date: NaiveDate) -> Store {
    let mut rng = StdRng::seed_from_u64(seed);
    let mut store = Store::empty();

    let rows = DEMO_ROSTER
        .iter()
        .map(|(name, pos)| NewPlayerRow {
            position: pos.to_string(),
            goals: if rng.gen_bool(0.25) { rng.gen_range(1..6) } else { 0 },
            ..NewPlayerRow::new(*name)
        })
        .collect();
    store.bulk_add_players(rows);

    let names: Vec<String> = DEMO_ROSTER.iter().map(|(n, _)| n.to_string()).collect();
    for week in (0..sessions).rev() {
        let date = last_date - Duration::days(7 * week as i64);
        let mut lineup_pool = names.clone();
        lineup_pool.shuffle(&mut rng);
        let records = session_records(&mut rng, &names);
        let winners: Vec<String> = lineup_pool.into_iter().take(5).collect();
        let winning = rng.gen_bool(0.6).then_some(winners);
        if let Err(err) = store.add_session(date, records, winning.as_deref()) {
            tracing::warn!("demo session {date} rejected: {err}");
        }
    }
    store
}

fn session_records(rng: &mut StdRng, names: &[String]) -> Vec<SessionRecord> {
    let mut records: Vec<SessionRecord> = names
        .iter()
        .map(|name| {
            let mut rec = SessionRecord::new(name.as_str())
                .with_goals(rng.gen_range(0..4), rng.gen_range(0..3));
            if rng.gen_bool(0.1) {
                rec = rec.absent();
            }
            if rng.gen_bool(0.15) {
                rec = rec.with_votes(rng.gen_range(1..5));
            }
            rec
        })
        .collect();

    // One winner per award, like the weekly vote.
    for cat in AwardCategory::ALL {
        let idx = rng.gen_range(0..records.len());
        records[idx].flags.insert(cat);
    }
    records
}
