use chrono::NaiveDate;
use rodada_stats::aggregate::aggregate;
use rodada_stats::error::EngineError;
use rodada_stats::model::{AwardCategory, EditableQuantity, SessionRecord, Tally};
use rodada_stats::mutations::{LineupEdit, NewPlayerRow, PlayerEdit};
use rodada_stats::store::Store;

fn day(d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 4, d).expect("valid date")
}

fn names(raw: &[&str]) -> Vec<String> {
    raw.iter().map(|s| s.to_string()).collect()
}

fn store_with_ana() -> Store {
    let mut store = Store::empty();
    store
        .add_session(
            day(1),
            vec![
                SessionRecord::new("Ana")
                    .with_goals(3, 2)
                    .with_flag(AwardCategory::Captain)
                    .with_votes(4),
                SessionRecord::new("Rui").with_goals(1, 1),
            ],
            None,
        )
        .expect("valid session");
    store
        .bulk_edit_ranking(EditableQuantity::Assists, [("Ana", 5)])
        .expect("valid edit");
    store
}

#[test]
fn add_session_rejects_when_no_valid_records() {
    let mut store = Store::empty();
    let before = store.clone();
    let err = store
        .add_session(day(2), vec![SessionRecord::new("  ")], None)
        .expect_err("blank rows only");
    assert!(matches!(err, EngineError::Validation(_)));
    assert_eq!(store, before);
}

#[test]
fn add_session_drops_malformed_rows_and_creates_players() {
    let mut store = Store::empty();
    store
        .add_session(
            day(2),
            vec![SessionRecord::new(""), SessionRecord::new(" Caio ").with_goals(1, 0)],
            None,
        )
        .expect("one valid row");
    assert_eq!(store.sessions()[0].records.len(), 1);
    assert_eq!(store.sessions()[0].records[0].player_name, "Caio");
    assert!(store.has_player("Caio"));
}

#[test]
fn add_session_rejects_oversized_lineup_without_side_effects() {
    let mut store = Store::empty();
    let lineup = names(&["A", "B", "C", "D", "E", "F"]);
    let err = store
        .add_session(day(3), vec![SessionRecord::new("A")], Some(&lineup))
        .expect_err("six players");
    assert!(matches!(err, EngineError::Validation(_)));
    assert!(store.sessions().is_empty());
    assert!(store.players().is_empty());
}

#[test]
fn repeated_lineup_increments_instead_of_duplicating() {
    let mut store = Store::empty();
    let first = names(&["A", "B", "C", "D", "E"]);
    let second = names(&["e", "D", "c", "B", " a "]);
    store
        .add_session(day(1), vec![SessionRecord::new("A")], Some(&first))
        .expect("valid session");
    store
        .add_session(day(8), vec![SessionRecord::new("A")], Some(&second))
        .expect("valid session");
    assert_eq!(store.lineups().len(), 1);
    assert_eq!(store.lineups()[0].win_count, 2);
    assert_eq!(store.lineups()[0].players, first);
}

#[test]
fn blank_lineup_is_ignored_by_add_session() {
    let mut store = Store::empty();
    let blank = names(&["", "  "]);
    store
        .add_session(day(1), vec![SessionRecord::new("A")], Some(&blank))
        .expect("lineup is optional");
    assert!(store.lineups().is_empty());
}

#[test]
fn manual_lineups_can_be_added_edited_and_cleared() {
    let mut store = Store::empty();
    store
        .add_lineup(&names(&["A", "B", "", "C"]), 3)
        .expect("valid lineup");
    assert_eq!(store.lineups()[0].players, names(&["A", "B", "C"]));
    assert!(store.add_lineup(&names(&[" "]), 1).is_err());

    store
        .record_lineup_win(&names(&["c", "b", "a"]))
        .expect("valid lineup");
    assert_eq!(store.lineups()[0].win_count, 4);

    store
        .edit_lineups(vec![
            LineupEdit {
                players: names(&["A", "B"]),
                win_count: 9,
                remove: false,
            },
            LineupEdit {
                players: names(&["X"]),
                win_count: 1,
                remove: true,
            },
        ])
        .expect("valid edit");
    assert_eq!(store.lineups().len(), 1);
    assert_eq!(store.lineups()[0].win_count, 9);

    store.clear_lineups();
    assert!(store.lineups().is_empty());
}

#[test]
fn ranking_editor_replaces_while_bulk_add_accumulates() {
    let mut store = store_with_ana();
    store
        .bulk_edit_ranking(EditableQuantity::Assists, [("Ana", 7)])
        .expect("valid edit");
    assert_eq!(store.manual_override("Ana").and_then(|o| o.assists), Some(7));

    let row = NewPlayerRow {
        assists: 2,
        category_counts: vec![(AwardCategory::Wildcard, 1)],
        ..NewPlayerRow::new("Ana")
    };
    assert_eq!(store.bulk_add_players(vec![row.clone(), NewPlayerRow::new("")]), 1);
    store.bulk_add_players(vec![row]);
    let ov = store.manual_override("Ana").expect("override exists");
    assert_eq!(ov.assists, Some(11));
    assert_eq!(ov.wildcard_count_manual, Some(2));
}

#[test]
fn bulk_edit_rejects_blank_names_atomically() {
    let mut store = store_with_ana();
    let before = store.clone();
    let err = store
        .bulk_edit_ranking(EditableQuantity::Goals, [("Nova", 3), (" ", 1)])
        .expect_err("blank name");
    assert!(matches!(err, EngineError::Validation(_)));
    assert_eq!(store, before);
}

#[test]
fn bulk_edit_creates_missing_players() {
    let mut store = Store::empty();
    store
        .bulk_edit_ranking(EditableQuantity::BestGoalVotes, [("Lia", 2)])
        .expect("valid edit");
    assert!(store.has_player("Lia"));
    assert_eq!(
        aggregate(&store, None).counts_for(Tally::BestGoalVotes).get("Lia"),
        Some(&2)
    );
}

#[test]
fn rename_carries_all_totals_to_the_new_name() {
    let mut store = store_with_ana();
    let before = aggregate(&store, None).player("Ana");

    store.rename_player("Ana", "Ana Maria").expect("free name");
    let totals = aggregate(&store, None);
    let after = totals.player("Ana Maria");
    assert_eq!(after.goals, before.goals);
    assert_eq!(after.assists, before.assists);
    assert_eq!(after.counts, before.counts);
    assert!(!totals.all_names().contains("Ana"));
    assert!(store.player("Ana").is_none());
    assert!(store.manual_override("Ana").is_none());
}

#[test]
fn rename_to_existing_player_conflicts() {
    let mut store = store_with_ana();
    let before = store.clone();
    let err = store.rename_player("Ana", "Rui").expect_err("taken");
    assert_eq!(
        err,
        EngineError::Conflict {
            name: "Rui".to_string()
        }
    );
    assert_eq!(store, before);
}

#[test]
fn rename_to_same_name_is_a_no_op() {
    let mut store = store_with_ana();
    let before = store.clone();
    store.rename_player("Ana", "Ana").expect("no-op");
    assert_eq!(store, before);
}

#[test]
fn rename_unknown_player_is_rejected() {
    let mut store = store_with_ana();
    assert!(matches!(
        store.rename_player("Ninguém", "Alguém"),
        Err(EngineError::Validation(_))
    ));
}

#[test]
fn edit_players_renames_and_repositions() {
    let mut store = store_with_ana();
    store
        .edit_players(vec![
            PlayerEdit {
                name: "Ana".to_string(),
                new_name: "Ana Paula".to_string(),
                position: "Meia".to_string(),
            },
            PlayerEdit {
                name: "Rui".to_string(),
                new_name: String::new(),
                position: "Zagueiro".to_string(),
            },
        ])
        .expect("valid edits");
    assert_eq!(store.player("Ana Paula").map(|p| p.position.as_str()), Some("Meia"));
    assert_eq!(store.player("Rui").map(|p| p.position.as_str()), Some("Zagueiro"));
}

#[test]
fn add_player_rejects_duplicates_and_blanks() {
    let mut store = Store::empty();
    store.add_player("Duda", "").expect("new player");
    assert_eq!(store.player("Duda").map(|p| p.position.as_str()), Some("Indefinido"));
    assert!(matches!(
        store.add_player("Duda", "Meia"),
        Err(EngineError::Conflict { .. })
    ));
    assert!(matches!(store.add_player("   ", "Meia"), Err(EngineError::Validation(_))));
}

#[test]
fn reset_category_only_zeroes_manual_values() {
    let mut store = store_with_ana();
    store
        .bulk_edit_ranking(EditableQuantity::BestGoalVotes, [("Ana", 6), ("Rui", 2)])
        .expect("valid edit");
    store.reset_category(EditableQuantity::BestGoalVotes);

    assert_eq!(
        store.manual_override("Rui").and_then(|o| o.best_goal_votes_manual),
        Some(0)
    );
    let votes = aggregate(&store, None).counts_for(Tally::BestGoalVotes);
    // The session votes survive the reset.
    assert_eq!(votes.get("Ana"), Some(&4));
    assert_eq!(votes.get("Rui"), None);
    // Other fields are untouched.
    assert_eq!(store.manual_override("Ana").and_then(|o| o.assists), Some(5));
}

#[test]
fn reset_wipes_everything() {
    let mut store = store_with_ana();
    store.reset();
    assert!(store.players().is_empty());
    assert!(store.sessions().is_empty());
    assert!(store.manual_overrides().is_empty());
}

#[test]
fn failing_player_batch_leaves_store_untouched() {
    let mut store = store_with_ana();
    store.add_player("Bia", "Meia").expect("new player");
    let before = store.clone();

    let err = store
        .edit_players(vec![
            PlayerEdit {
                name: "Ana".to_string(),
                new_name: "Ana Maria".to_string(),
                position: "Atacante".to_string(),
            },
            PlayerEdit {
                name: "Rui".to_string(),
                new_name: "Bia".to_string(),
                position: String::new(),
            },
        ])
        .expect_err("Bia is taken");
    assert_eq!(
        err,
        EngineError::Conflict {
            name: "Bia".to_string()
        }
    );
    assert!(!store.has_player("Ana Maria"));
    assert_eq!(store, before);
}

#[test]
fn rename_onto_a_name_only_found_in_history_conflicts() {
    let mut store = Store::empty();
    store.replace_sessions(vec![rodada_stats::model::Session {
        date: day(5),
        records: vec![SessionRecord::new("Antigo").with_goals(2, 0)],
    }]);
    store.add_player("Novo", "").expect("new player");
    let before = store.clone();
    assert!(matches!(
        store.rename_player("Novo", "Antigo"),
        Err(EngineError::Conflict { .. })
    ));
    assert_eq!(store, before);
}

#[test]
fn lineups_with_repeated_names_match_the_clean_lineup() {
    let mut store = Store::empty();
    store
        .record_lineup_win(&names(&["A", "B"]))
        .expect("valid lineup");
    store
        .record_lineup_win(&names(&["A", "a", "B"]))
        .expect("valid lineup");
    assert_eq!(store.lineups().len(), 1);
    assert_eq!(store.lineups()[0].win_count, 2);
}

#[test]
fn huge_bulk_additions_saturate() {
    let mut store = Store::empty();
    let row = NewPlayerRow {
        goals: i64::MAX,
        ..NewPlayerRow::new("Zé")
    };
    store.bulk_add_players(vec![row.clone(), row]);
    assert_eq!(store.manual_override("Zé").and_then(|o| o.goals), Some(i64::MAX));
    assert_eq!(aggregate(&store, None).goals.get("Zé"), Some(&i64::MAX));
}
