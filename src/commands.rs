//! Argument parsing and dispatch for the `rodada_edit` binary. Each command
//! maps onto one store mutation.
//!
//! Session records are written `Name:goals:assists:awards:votes`, where every
//! field after the name is optional, awards are joined with `+` and a leading
//! `~` marks the player absent. Lineups are comma-separated names.

use std::str::FromStr;

use chrono::NaiveDate;

use crate::config::{flag_value, positional_args};
use crate::error::CommandError;
use crate::import::parse_date;
use crate::model::{AwardCategory, EditableQuantity, SessionRecord, lineup_key};
use crate::mutations::{LineupEdit, NewPlayerRow};
use crate::store::Store;

pub const USAGE: &str = "usage: rodada_edit <command> [args] [--db path]
  session <date|today> <Name:g:a:awards:votes>... [--lineup \"A,B,C\"]
  rank-edit <quantity> <Name=value>...
  add-players <Name:position:goals:assists>...
  rename <old> <new>
  position <name> <position>
  lineup add|win|set|remove \"A,B,C\" [wins]
  reset-category <quantity>
  clear-lineups
  reset --force";

/// Flags that take no value.
pub const SWITCHES: &[&str] = &["force"];

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EditCommand {
    Session {
        date: NaiveDate,
        records: Vec<SessionRecord>,
        lineup: Option<Vec<String>>,
    },
    RankEdit {
        kind: EditableQuantity,
        entries: Vec<(String, i64)>,
    },
    AddPlayers(Vec<NewPlayerRow>),
    Rename {
        old: String,
        new: String,
    },
    Position {
        name: String,
        position: String,
    },
    LineupAdd {
        players: Vec<String>,
        wins: u32,
    },
    LineupWin(Vec<String>),
    LineupSet {
        players: Vec<String>,
        wins: u32,
    },
    LineupRemove(Vec<String>),
    ResetCategory(EditableQuantity),
    ClearLineups,
    Reset,
}

fn usage(msg: impl Into<String>) -> CommandError {
    CommandError::Usage(msg.into())
}

impl EditCommand {
    pub fn parse(args: &[String], today: NaiveDate) -> Result<Self, CommandError> {
        let positional = positional_args(args, SWITCHES);
        let Some((command, rest)) = positional.split_first() else {
            return Err(usage(USAGE));
        };
        match command.as_str() {
            "session" => {
                let (raw_date, raw_records) = rest
                    .split_first()
                    .ok_or_else(|| usage("session needs a date and at least one record"))?;
                let date = match raw_date.trim() {
                    "today" | "hoje" => today,
                    other => parse_date(other).ok_or_else(|| usage(format!("bad date '{other}'")))?,
                };
                let records = raw_records
                    .iter()
                    .map(|r| parse_record(r))
                    .collect::<Result<Vec<_>, _>>()?;
                let lineup = flag_value(args, "lineup").map(|raw| split_names(&raw));
                Ok(EditCommand::Session {
                    date,
                    records,
                    lineup,
                })
            }
            "rank-edit" => {
                let (raw_kind, raw_entries) = rest
                    .split_first()
                    .ok_or_else(|| usage("rank-edit needs a quantity"))?;
                let kind = parse_quantity(raw_kind)?;
                let entries = raw_entries
                    .iter()
                    .map(|e| parse_assignment(e))
                    .collect::<Result<Vec<_>, _>>()?;
                Ok(EditCommand::RankEdit { kind, entries })
            }
            "add-players" => {
                let rows = rest
                    .iter()
                    .map(|r| parse_player_row(r))
                    .collect::<Result<Vec<_>, _>>()?;
                Ok(EditCommand::AddPlayers(rows))
            }
            "rename" => match rest {
                [old, new] => Ok(EditCommand::Rename {
                    old: old.clone(),
                    new: new.clone(),
                }),
                _ => Err(usage("rename needs <old> <new>")),
            },
            "position" => match rest {
                [name, position] => Ok(EditCommand::Position {
                    name: name.clone(),
                    position: position.clone(),
                }),
                _ => Err(usage("position needs <name> <position>")),
            },
            "lineup" => parse_lineup(rest),
            "reset-category" => match rest {
                [kind] => Ok(EditCommand::ResetCategory(parse_quantity(kind)?)),
                _ => Err(usage("reset-category needs <quantity>")),
            },
            "clear-lineups" => Ok(EditCommand::ClearLineups),
            "reset" => Ok(EditCommand::Reset),
            other => Err(usage(format!("unknown command '{other}'\n{USAGE}"))),
        }
    }

    /// Apply to `store`, returning a one-line summary. On error the store is unchanged.
    pub fn apply(self, store: &mut Store) -> Result<String, CommandError> {
        let summary = match self {
            EditCommand::Session {
                date,
                records,
                lineup,
            } => {
                let count = records.len();
                store.add_session(date, records, lineup.as_deref())?;
                format!("Session {date} registered ({count} records)")
            }
            EditCommand::RankEdit { kind, entries } => {
                let count = entries.len();
                store.bulk_edit_ranking(kind, entries)?;
                format!("{}: {count} values replaced", kind.label())
            }
            EditCommand::AddPlayers(rows) => {
                let applied = store.bulk_add_players(rows);
                format!("{applied} players added or updated")
            }
            EditCommand::Rename { old, new } => {
                store.rename_player(&old, &new)?;
                format!("Renamed '{old}' to '{}'", new.trim())
            }
            EditCommand::Position { name, position } => {
                store.set_position(&name, &position)?;
                format!("'{name}' is now {}", position.trim())
            }
            EditCommand::LineupAdd { players, wins } => {
                store.add_lineup(&players, wins)?;
                "Lineup added".to_string()
            }
            EditCommand::LineupWin(players) => {
                store.record_lineup_win(&players)?;
                "Lineup win recorded".to_string()
            }
            EditCommand::LineupSet { players, wins } => {
                let edits = lineup_edits(store, &players, |edit| edit.win_count = wins)?;
                store.edit_lineups(edits)?;
                format!("Lineup wins set to {wins}")
            }
            EditCommand::LineupRemove(players) => {
                let edits = lineup_edits(store, &players, |edit| edit.remove = true)?;
                store.edit_lineups(edits)?;
                "Lineup removed".to_string()
            }
            EditCommand::ResetCategory(kind) => {
                store.reset_category(kind);
                format!("{}: manual values reset", kind.label())
            }
            EditCommand::ClearLineups => {
                store.clear_lineups();
                "Lineups cleared".to_string()
            }
            EditCommand::Reset => {
                store.reset();
                "Store reset".to_string()
            }
        };
        Ok(summary)
    }
}

fn parse_lineup(rest: &[String]) -> Result<EditCommand, CommandError> {
    let [action, names, tail @ ..] = rest else {
        return Err(usage("lineup needs <add|win|set|remove> \"A,B,C\""));
    };
    let players = split_names(names);
    let wins = match tail {
        [] => None,
        [raw] => Some(
            raw.trim()
                .parse::<u32>()
                .map_err(|_| usage(format!("bad win count '{raw}'")))?,
        ),
        _ => return Err(usage("too many lineup arguments")),
    };
    match action.as_str() {
        "add" => Ok(EditCommand::LineupAdd {
            players,
            wins: wins.unwrap_or(1),
        }),
        "win" => Ok(EditCommand::LineupWin(players)),
        "set" => {
            let wins = wins.ok_or_else(|| usage("lineup set needs a win count"))?;
            Ok(EditCommand::LineupSet { players, wins })
        }
        "remove" => Ok(EditCommand::LineupRemove(players)),
        other => Err(usage(format!("unknown lineup action '{other}'"))),
    }
}

// Rewrite the whole lineup list with `change` applied to the one matching `players`.
fn lineup_edits(
    store: &Store,
    players: &[String],
    change: impl Fn(&mut LineupEdit),
) -> Result<Vec<LineupEdit>, CommandError> {
    let key = lineup_key(players);
    let mut found = false;
    let edits = store
        .lineups()
        .iter()
        .map(|l| {
            let mut edit = LineupEdit {
                players: l.players.clone(),
                win_count: l.win_count,
                remove: false,
            };
            if !found && l.membership_key() == key {
                found = true;
                change(&mut edit);
            }
            edit
        })
        .collect();
    if !found {
        return Err(usage(format!("no lineup '{}'", players.join(", "))));
    }
    Ok(edits)
}

fn parse_quantity(raw: &str) -> Result<EditableQuantity, CommandError> {
    EditableQuantity::parse(raw).ok_or_else(|| usage(format!("unknown quantity '{raw}'")))
}

fn split_names(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|n| !n.is_empty())
        .map(str::to_string)
        .collect()
}

fn parse_number<T: FromStr + Default>(field: Option<&str>, what: &str) -> Result<T, CommandError> {
    match field.map(str::trim) {
        None | Some("") => Ok(T::default()),
        Some(raw) => raw
            .parse::<T>()
            .map_err(|_| usage(format!("bad {what} '{raw}'"))),
    }
}

fn parse_record(raw: &str) -> Result<SessionRecord, CommandError> {
    let (absent, body) = match raw.trim().strip_prefix('~') {
        Some(body) => (true, body),
        None => (false, raw.trim()),
    };
    let mut fields = body.split(':');
    let name = fields.next().unwrap_or("").trim();
    if name.is_empty() {
        return Err(usage(format!("record '{raw}' has no name")));
    }
    let goals = parse_number::<u32>(fields.next(), "goals")?;
    let assists = parse_number::<u32>(fields.next(), "assists")?;
    let mut record = SessionRecord::new(name).with_goals(goals, assists);
    if let Some(awards) = fields.next() {
        for award in awards.split('+').map(str::trim).filter(|a| !a.is_empty()) {
            let cat = AwardCategory::parse(award)
                .ok_or_else(|| usage(format!("unknown award '{award}'")))?;
            record = record.with_flag(cat);
        }
    }
    let votes = parse_number::<u32>(fields.next(), "votes")?;
    if fields.next().is_some() {
        return Err(usage(format!("record '{raw}' has too many fields")));
    }
    record = record.with_votes(votes);
    Ok(if absent { record.absent() } else { record })
}

fn parse_assignment(raw: &str) -> Result<(String, i64), CommandError> {
    let (name, value) = raw
        .rsplit_once('=')
        .ok_or_else(|| usage(format!("expected Name=value, got '{raw}'")))?;
    let value = value
        .trim()
        .parse::<i64>()
        .map_err(|_| usage(format!("bad value in '{raw}'")))?;
    Ok((name.trim().to_string(), value))
}

fn parse_player_row(raw: &str) -> Result<NewPlayerRow, CommandError> {
    let mut fields = raw.split(':');
    let name = fields.next().unwrap_or("").trim();
    let mut row = NewPlayerRow::new(name);
    if let Some(position) = fields.next().map(str::trim).filter(|p| !p.is_empty()) {
        row.position = position.to_string();
    }
    row.goals = parse_number::<i64>(fields.next(), "goals")?;
    row.assists = parse_number::<i64>(fields.next(), "assists")?;
    Ok(row)
}
