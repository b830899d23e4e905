use std::fs::File;
use std::io::Read;
use std::path::Path;

use chrono::NaiveDate;
use tracing::{debug, warn};

use super::{AGE_GROUP_COLUMN, DATE_FORMAT, MAX_PLAYERS_COLUMN, PLAYER_COLUMNS};
use crate::error::{InputError, Result};
use crate::models::{parse_flag, Bracket, BracketTable, Gender, Player, Roster, SkillLevel};

const PLAYERS_TABLE: &str = "players";
const BRACKETS_TABLE: &str = "age group";

fn open(path: &Path) -> std::result::Result<File, InputError> {
    File::open(path).map_err(|source| InputError::Io {
        path: path.to_path_buf(),
        source,
    })
}

/// Load the players table from a CSV file.
pub fn load_players(path: &Path) -> std::result::Result<Roster, InputError> {
    let roster = read_players(open(path)?)?;
    debug!(path = %path.display(), players = roster.len(), "Loaded players");
    Ok(roster)
}

/// Parse a players table and order it by (birthday, skill).
///
/// Columns are taken by position. Registration exports tend to reword
/// headers, so a header that doesn't match is only logged.
pub fn read_players<R: Read>(reader: R) -> std::result::Result<Roster, InputError> {
    let mut csv = csv::ReaderBuilder::new()
        .has_headers(true)
        .trim(csv::Trim::All)
        .from_reader(reader);

    let headers = csv.headers()?.clone();
    if headers.len() != PLAYER_COLUMNS.len() {
        return Err(InputError::ColumnCount {
            table: PLAYERS_TABLE,
            expected: PLAYER_COLUMNS.len(),
            found: headers.len(),
        });
    }
    for (found, expected) in headers.iter().zip(PLAYER_COLUMNS) {
        if !found.eq_ignore_ascii_case(expected) {
            warn!(found, expected, "Unexpected players column header, using it by position");
        }
    }

    let mut players = Vec::new();
    for (index, record) in csv.records().enumerate() {
        let record = record?;
        let row = index + 1;
        let field = |i: usize| record.get(i).unwrap_or("");

        let gender = Gender::parse(field(2))
            .ok_or_else(|| InputError::invalid(row, PLAYER_COLUMNS[2], field(2)))?;
        let birthday = NaiveDate::parse_from_str(field(3), DATE_FORMAT)
            .map_err(|_| InputError::invalid(row, PLAYER_COLUMNS[3], field(3)))?;
        let skill = SkillLevel::parse(field(4))
            .ok_or_else(|| InputError::invalid(row, PLAYER_COLUMNS[4], field(4)))?;
        let parent_hc = parse_flag(field(7))
            .ok_or_else(|| InputError::invalid(row, PLAYER_COLUMNS[7], field(7)))?;
        let parent_ac = parse_flag(field(8))
            .ok_or_else(|| InputError::invalid(row, PLAYER_COLUMNS[8], field(8)))?;

        players.push(Player {
            id: index,
            last_name: field(0).to_string(),
            first_name: field(1).to_string(),
            gender,
            birthday,
            skill,
            practice_location: field(5).to_string(),
            school: field(6).to_string(),
            parent_hc,
            parent_ac,
        });
    }

    let mut roster = Roster::new(players);
    roster.sort_by_birthday_then_skill();
    Ok(roster)
}

/// Load the age group table from a CSV file.
pub fn load_brackets(path: &Path) -> Result<BracketTable> {
    let table = read_brackets(open(path)?)?;
    debug!(path = %path.display(), age_groups = table.len(), "Loaded age groups");
    Ok(table)
}

/// Parse an age group table. Columns are found by header name; rows keep
/// file order, which is the order players are classified in.
pub fn read_brackets<R: Read>(reader: R) -> Result<BracketTable> {
    let mut csv = csv::ReaderBuilder::new()
        .has_headers(true)
        .trim(csv::Trim::All)
        .from_reader(reader);

    let headers = csv.headers().map_err(InputError::from)?.clone();
    let column = |name: &'static str| {
        headers
            .iter()
            .position(|h| h.eq_ignore_ascii_case(name))
            .ok_or(InputError::MissingColumn {
                table: BRACKETS_TABLE,
                column: name,
            })
    };
    let label_col = column(AGE_GROUP_COLUMN)?;
    let max_col = column(MAX_PLAYERS_COLUMN)?;

    let mut brackets = Vec::new();
    for (index, record) in csv.records().enumerate() {
        let record = record.map_err(InputError::from)?;
        let row = index + 1;
        let label = record.get(label_col).unwrap_or("");
        let max_raw = record.get(max_col).unwrap_or("");
        let max_players: i64 = max_raw
            .parse()
            .map_err(|_| InputError::invalid(row, MAX_PLAYERS_COLUMN, max_raw))?;
        brackets.push(Bracket::parse(label, max_players)?);
    }

    Ok(BracketTable::new(brackets)?)
}
