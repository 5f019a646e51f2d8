use std::collections::BTreeMap;

use chrono::NaiveDate;
use rodada_stats::aggregate::aggregate;
use rodada_stats::model::{AwardCategory, DateWindow, EditableQuantity, SessionRecord, Tally};
use rodada_stats::store::Store;

fn day(m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, m, d).expect("valid date")
}

fn sample_store() -> Store {
    let mut store = Store::empty();
    store
        .add_player("Reserva", "Goleiro")
        .expect("new player");
    store
        .add_session(
            day(1, 10),
            vec![
                SessionRecord::new("Ana")
                    .with_goals(2, 1)
                    .with_flag(AwardCategory::Star),
                SessionRecord::new("Bia").with_goals(1, 0).with_votes(3),
            ],
            None,
        )
        .expect("valid session");
    store
        .add_session(
            day(3, 5),
            vec![
                SessionRecord::new("Ana").with_goals(4, 0),
                SessionRecord::new("Bia")
                    .with_goals(5, 5)
                    .with_flag(AwardCategory::Defender)
                    .absent(),
            ],
            None,
        )
        .expect("valid session");
    store
        .bulk_edit_ranking(EditableQuantity::Goals, [("Ana", 10)])
        .expect("valid edit");
    store
        .bulk_edit_ranking(EditableQuantity::Count(AwardCategory::Star), [("Bia", 2)])
        .expect("valid edit");
    store
        .bulk_edit_ranking(EditableQuantity::StarPoints, [("Bia", 25)])
        .expect("valid edit");
    store
}

#[test]
fn historical_mode_includes_every_session_and_override() {
    let totals = aggregate(&sample_store(), None);
    assert_eq!(totals.goals.get("Ana"), Some(&16));
    assert_eq!(totals.assists.get("Ana"), Some(&1));
    // The absent record's goals are dropped.
    assert_eq!(totals.goals.get("Bia"), Some(&1));
    assert_eq!(totals.counts_for(Tally::Award(AwardCategory::Star)).get("Ana"), Some(&1));
    assert_eq!(totals.counts_for(Tally::Award(AwardCategory::Star)).get("Bia"), Some(&2));
    assert_eq!(totals.counts_for(Tally::BestGoalVotes).get("Bia"), Some(&3));
    assert_eq!(totals.star_points_manual.get("Bia"), Some(&25));
}

#[test]
fn absent_player_keeps_award_flags() {
    let totals = aggregate(&sample_store(), None);
    let line = totals.player("Bia");
    assert_eq!(line.goals, 1);
    assert_eq!(line.assists, 0);
    assert_eq!(line.count(Tally::Award(AwardCategory::Defender)), 1);
}

#[test]
fn window_drops_sessions_but_keeps_overrides() {
    let window = DateWindow::new(day(3, 1), day(3, 31));
    let totals = aggregate(&sample_store(), Some(window));
    // 4 from the March session plus the 10 manual goals.
    assert_eq!(totals.goals.get("Ana"), Some(&14));
    assert!(totals.counts_for(Tally::Award(AwardCategory::Star)).get("Ana").is_none());
    assert!(totals.counts_for(Tally::BestGoalVotes).is_empty());
    assert_eq!(totals.counts_for(Tally::Award(AwardCategory::Star)).get("Bia"), Some(&2));
}

#[test]
fn window_bounds_are_inclusive() {
    let store = sample_store();
    let exact = aggregate(&store, Some(DateWindow::new(day(1, 10), day(1, 10))));
    assert_eq!(exact.goals.get("Bia"), Some(&1));
    let outside = aggregate(&store, Some(DateWindow::new(day(1, 11), day(3, 4))));
    // Bia still has an override entry, so she shows up with zero.
    assert_eq!(outside.goals.get("Bia"), Some(&0));
    assert_eq!(outside.goals.get("Ana"), Some(&10));
}

#[test]
fn roster_only_players_are_known_but_not_counted() {
    let totals = aggregate(&sample_store(), None);
    assert!(totals.known_players.contains("Reserva"));
    assert!(!totals.goals.contains_key("Reserva"));
    assert!(totals.all_names().contains("Reserva"));
    let line = totals.player("Reserva");
    assert_eq!((line.goals, line.assists, line.star_points_manual), (0, 0, 0));
    assert_eq!(totals.star_scores().get("Reserva").total, 0);
    assert!(totals.star_scores().players.contains_key("Reserva"));
}

#[test]
fn star_scores_combine_counts_and_manual_points() {
    let scores = aggregate(&sample_store(), None).star_scores();
    assert_eq!(scores.get("Ana").total, 100);
    // Two manual star counts, one defender flag while absent, plus 25 manual points.
    assert_eq!(scores.get("Bia").automatic, 260);
    assert_eq!(scores.get("Bia").total, 285);
    let totals: BTreeMap<String, i64> = scores.totals();
    assert_eq!(totals.get("Reserva"), Some(&0));
}

#[test]
fn empty_store_aggregates_to_nothing() {
    let totals = aggregate(&Store::empty(), None);
    assert!(totals.goals.is_empty());
    assert!(totals.counts.is_empty());
    assert!(totals.all_names().is_empty());
}
