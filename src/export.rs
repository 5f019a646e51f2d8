use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use rust_xlsxwriter::{Workbook, Worksheet};

use crate::leaderboard::{Leaderboards, PlayerRow};
use crate::model::LineupRecord;
use crate::ranking::RankedEntry;
use crate::store::Store;

pub struct ExportReport {
    pub sheets: usize,
    pub ranked_rows: usize,
    pub lineups: usize,
    pub players: usize,
}

pub fn export_leaderboards_xlsx(path: &Path, board: &Leaderboards) -> Result<ExportReport> {
    let mut sheets: Vec<(String, Vec<Vec<String>>)> = vec![
        ("Artilharia".to_string(), ranking_rows("Gols", &board.goals)),
        ("Assistencias".to_string(), ranking_rows("Assistências", &board.assists)),
        ("Craque".to_string(), ranking_rows("Pontos", &board.star)),
    ];
    for (cat, entries) in &board.categories {
        sheets.push((sheet_name(cat.label()), ranking_rows("Vezes", entries)));
    }
    sheets.push(("Puskas".to_string(), ranking_rows("Votos", &board.best_goal)));
    sheets.push(("Quintetos".to_string(), lineup_rows(&board.lineups)));
    sheets.push(("Jogadores".to_string(), player_rows(&board.players)));

    let ranked_rows = sheets
        .iter()
        .take(sheets.len() - 2)
        .map(|(_, rows)| rows.len().saturating_sub(1))
        .sum();

    let mut workbook = Workbook::new();
    for (name, rows) in &sheets {
        let sheet = workbook.add_worksheet();
        sheet.set_name(name)?;
        write_rows(sheet, rows)?;
    }
    workbook
        .save(path)
        .with_context(|| format!("failed writing workbook to {}", path.display()))?;
    tracing::info!("exported {} sheets to {}", sheets.len(), path.display());

    Ok(ExportReport {
        sheets: sheets.len(),
        ranked_rows,
        lineups: board.lineups.len(),
        players: board.players.len(),
    })
}

/// Pretty JSON copy of the store, same shape as the saved document.
pub fn export_snapshot_json(path: &Path, store: &Store) -> Result<()> {
    let json = store.to_snapshot_json().context("serialize snapshot")?;
    fs::write(path, json).with_context(|| format!("write snapshot {}", path.display()))?;
    Ok(())
}

fn ranking_rows(value_label: &str, entries: &[RankedEntry]) -> Vec<Vec<String>> {
    let mut rows = vec![vec![
        "Posição".to_string(),
        "Jogador".to_string(),
        value_label.to_string(),
    ]];
    rows.extend(
        entries
            .iter()
            .map(|e| vec![e.position_label(), e.name.clone(), e.value.to_string()]),
    );
    rows
}

fn lineup_rows(lineups: &[LineupRecord]) -> Vec<Vec<String>> {
    let mut rows = vec![vec![
        "#".to_string(),
        "Quinteto".to_string(),
        "Vitórias".to_string(),
    ]];
    rows.extend(lineups.iter().enumerate().map(|(i, l)| {
        vec![format!("{}º", i + 1), l.label(), l.win_count.to_string()]
    }));
    rows
}

fn player_rows(players: &[PlayerRow]) -> Vec<Vec<String>> {
    let mut rows = vec![vec![
        "Nome".to_string(),
        "Posição".to_string(),
        "Gols".to_string(),
        "Assistências".to_string(),
        "Craque (vitórias)".to_string(),
        "Craque (pontos)".to_string(),
        "Puskás (votos)".to_string(),
    ]];
    rows.extend(players.iter().map(|p| {
        vec![
            p.name.clone(),
            p.position.clone(),
            p.goals.to_string(),
            p.assists.to_string(),
            p.star_count.to_string(),
            p.star_total.to_string(),
            p.best_goal_votes.to_string(),
        ]
    }));
    rows
}

// Excel sheet names are limited to 31 chars and a restricted charset.
fn sheet_name(label: &str) -> String {
    label
        .chars()
        .filter(|c| !matches!(c, '[' | ']' | ':' | '*' | '?' | '/' | '\\'))
        .take(31)
        .collect()
}

fn write_rows(worksheet: &mut Worksheet, rows: &[Vec<String>]) -> Result<()> {
    for (row_idx, row) in rows.iter().enumerate() {
        for (col_idx, value) in row.iter().enumerate() {
            worksheet
                .write_string(row_idx as u32, col_idx as u16, value)
                .with_context(|| format!("write cell ({row_idx},{col_idx})"))?;
        }
    }
    Ok(())
}
