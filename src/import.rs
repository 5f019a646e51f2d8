//! Spreadsheet import. Columns are found by case-insensitive substring match on
//! the header, bad cells fall back to defaults, and the result replaces the whole
//! session history.

use std::fs::File;
use std::io::Read;
use std::path::Path;

use chrono::{NaiveDate, NaiveDateTime};

use crate::error::ImportError;
use crate::model::{Session, SessionRecord};
use crate::store::Store;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImportSummary {
    pub rows: usize,
    pub skipped_rows: usize,
    pub sessions: usize,
    pub players_created: usize,
    pub defaulted_cells: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Columns {
    name: usize,
    goals: usize,
    assists: usize,
    date: Option<usize>,
}

fn detect_columns(headers: &csv::StringRecord) -> Result<Columns, ImportError> {
    let mut name = None;
    let mut goals = None;
    let mut assists = None;
    let mut date = None;
    for (idx, raw) in headers.iter().enumerate() {
        let h = raw.trim().to_lowercase();
        if h.contains("nome") || h.contains("name") {
            name = Some(idx);
        }
        if h.contains("gol") && goals.is_none() {
            goals = Some(idx);
        }
        if h.contains("assist") && assists.is_none() {
            assists = Some(idx);
        }
        if h.contains("data") || h.contains("date") {
            date = Some(idx);
        }
    }
    match (name, goals, assists) {
        (Some(name), Some(goals), Some(assists)) => Ok(Columns {
            name,
            goals,
            assists,
            date,
        }),
        _ => {
            let mut missing = Vec::new();
            if name.is_none() {
                missing.push("name");
            }
            if goals.is_none() {
                missing.push("goals");
            }
            if assists.is_none() {
                missing.push("assists");
            }
            Err(ImportError::MissingColumns(missing))
        }
    }
}

pub fn import_sessions_file(
    store: &mut Store,
    path: &Path,
    today: NaiveDate,
) -> Result<ImportSummary, ImportError> {
    let file = File::open(path).map_err(csv::Error::from)?;
    import_sessions_csv(store, file, today)
}

pub fn import_sessions_csv<R: Read>(
    store: &mut Store,
    reader: R,
    today: NaiveDate,
) -> Result<ImportSummary, ImportError> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(reader);
    let cols = detect_columns(reader.headers()?)?;

    // Keyed by date in first-seen order.
    let mut grouped: Vec<(NaiveDate, Vec<SessionRecord>)> = Vec::new();
    let mut rows = 0;
    let mut skipped_rows = 0;
    let mut defaulted_cells = 0;
    for record in reader.records() {
        let record = record?;
        let name = record.get(cols.name).unwrap_or("").trim();
        if name.is_empty() {
            skipped_rows += 1;
            continue;
        }
        rows += 1;

        let (goals, goals_ok) = parse_count(record.get(cols.goals));
        let (assists, assists_ok) = parse_count(record.get(cols.assists));
        let date = cols
            .date
            .and_then(|idx| record.get(idx))
            .and_then(parse_date);
        defaulted_cells += usize::from(!goals_ok) + usize::from(!assists_ok);
        if cols.date.is_some() && date.is_none() {
            defaulted_cells += 1;
        }
        let date = date.unwrap_or(today);

        let rec = SessionRecord::new(name).with_goals(goals, assists);
        match grouped.iter_mut().find(|(d, _)| *d == date) {
            Some((_, recs)) => recs.push(rec),
            None => grouped.push((date, vec![rec])),
        }
    }

    let before = store.players().len();
    for (_, recs) in &grouped {
        for rec in recs {
            store.ensure_player(&rec.player_name);
        }
    }
    let players_created = store.players().len() - before;
    let sessions: Vec<Session> = grouped
        .into_iter()
        .map(|(date, records)| Session { date, records })
        .collect();
    let summary = ImportSummary {
        rows,
        skipped_rows,
        sessions: sessions.len(),
        players_created,
        defaulted_cells,
    };
    store.replace_sessions(sessions);
    tracing::info!(
        rows = summary.rows,
        sessions = summary.sessions,
        defaulted = summary.defaulted_cells,
        "imported session history"
    );
    Ok(summary)
}

/// Blank cells count as a clean zero; anything unparseable is a defaulted zero.
fn parse_count(cell: Option<&str>) -> (u32, bool) {
    let raw = cell.unwrap_or("").trim();
    if raw.is_empty() {
        return (0, true);
    }
    if let Ok(v) = raw.parse::<i64>() {
        return (v.clamp(0, i64::from(u32::MAX)) as u32, true);
    }
    match raw.replace(',', ".").parse::<f64>() {
        Ok(v) if v.is_finite() => (v.max(0.0).trunc() as u32, true),
        _ => (0, false),
    }
}

pub(crate) fn parse_date(cell: &str) -> Option<NaiveDate> {
    let raw = cell.trim();
    if raw.is_empty() {
        return None;
    }
    const DATE_FORMATS: [&str; 5] = ["%Y-%m-%d", "%d/%m/%Y", "%Y/%m/%d", "%d-%m-%Y", "%d.%m.%Y"];
    const DATETIME_FORMATS: [&str; 3] = ["%Y-%m-%d %H:%M:%S", "%Y-%m-%dT%H:%M:%S", "%d/%m/%Y %H:%M"];
    DATE_FORMATS
        .iter()
        .find_map(|f| NaiveDate::parse_from_str(raw, f).ok())
        .or_else(|| {
            DATETIME_FORMATS
                .iter()
                .find_map(|f| NaiveDateTime::parse_from_str(raw, f).ok())
                .map(|dt| dt.date())
        })
}
