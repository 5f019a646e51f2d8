use std::fs;
use std::path::PathBuf;

use chrono::NaiveDate;
use rodada_stats::error::ImportError;
use rodada_stats::import::{import_sessions_csv, import_sessions_file};
use rodada_stats::model::SessionRecord;
use rodada_stats::store::Store;

fn fixture_path(name: &str) -> PathBuf {
    let mut path = PathBuf::from(env!("CARGO_MANIFEST_DIR"));
    path.push("tests");
    path.push("fixtures");
    path.push(name);
    path
}

fn read_fixture(name: &str) -> String {
    fs::read_to_string(fixture_path(name)).expect("fixture file should be readable")
}

fn day(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).expect("valid date")
}

#[test]
fn groups_rows_by_date_and_defaults_bad_cells() {
    let today = day(2024, 4, 1);
    let mut store = Store::empty();
    let raw = read_fixture("import_basic.csv");
    let summary = import_sessions_csv(&mut store, raw.as_bytes(), today).expect("import");

    assert_eq!(summary.rows, 6);
    assert_eq!(summary.skipped_rows, 1);
    // "x" goals, a blank date and "sem data".
    assert_eq!(summary.defaulted_cells, 3);
    assert_eq!(summary.sessions, 3);
    assert_eq!(summary.players_created, 4);

    let sessions = store.sessions();
    assert_eq!(sessions[0].date, day(2024, 3, 2));
    assert_eq!(sessions[1].date, day(2024, 3, 9));
    assert_eq!(sessions[2].date, today);

    let first: Vec<&str> = sessions[0]
        .records
        .iter()
        .map(|r| r.player_name.as_str())
        .collect();
    assert_eq!(first, vec!["Ana", "Bruno", "Caio"]);
    assert_eq!(sessions[0].records[2].goals, 0);
    assert_eq!(sessions[0].records[2].assists, 2);
    assert_eq!(sessions[1].records[0].goals, 3);
    assert_eq!(sessions[2].records.len(), 2);
}

#[test]
fn import_replaces_history_but_keeps_overrides() {
    let mut store = Store::empty();
    store
        .add_session(day(2023, 1, 1), vec![SessionRecord::new("Velho")], None)
        .expect("valid session");
    store
        .bulk_edit_ranking(rodada_stats::model::EditableQuantity::Goals, [("Velho", 9)])
        .expect("valid edit");

    let csv = "Nome,Gols,Assistencias\nAna,1,0\n";
    import_sessions_csv(&mut store, csv.as_bytes(), day(2024, 4, 1)).expect("import");

    assert_eq!(store.sessions().len(), 1);
    assert_eq!(store.sessions()[0].date, day(2024, 4, 1));
    assert!(store.has_player("Velho"));
    assert_eq!(store.manual_override("Velho").and_then(|o| o.goals), Some(9));
}

#[test]
fn missing_required_columns_leave_store_untouched() {
    let mut store = Store::empty();
    store
        .add_session(day(2023, 1, 1), vec![SessionRecord::new("Velho")], None)
        .expect("valid session");
    let before = store.clone();

    let err = import_sessions_file(
        &mut store,
        &fixture_path("import_missing_columns.csv"),
        day(2024, 4, 1),
    )
    .expect_err("no assists column");
    match err {
        ImportError::MissingColumns(missing) => assert_eq!(missing, vec!["assists"]),
        other => panic!("unexpected error: {other}"),
    }
    assert_eq!(store, before);
}

#[test]
fn unreadable_file_is_an_error() {
    let mut store = Store::empty();
    let result = import_sessions_file(
        &mut store,
        &fixture_path("does_not_exist.csv"),
        day(2024, 4, 1),
    );
    assert!(result.is_err());
}
