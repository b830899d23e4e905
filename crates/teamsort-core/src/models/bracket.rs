use std::collections::HashSet;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Month and day of the age cutoff: players must be born on or after
/// September 1 of (season year - age).
const CUTOFF_MONTH: u32 = 9;
const CUTOFF_DAY: u32 = 1;

/// Largest age accepted in a label
const MAX_BRACKET_AGE: u32 = 99;

/// Which priority ordering a bracket ranks its players with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RankStrategy {
    U5,
    U6,
    General,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Bracket {
    /// Label exactly as configured, e.g. "u-8"
    pub label: String,
    pub age: u32,
    pub max_players: usize,
}

impl Bracket {
    /// Build a bracket from an `Age Group` label and a `Max Players` value.
    pub fn parse(label: &str, max_players: i64) -> Result<Self, ConfigError> {
        let label = label.trim();
        let age = parse_age(label).ok_or_else(|| ConfigError::MalformedLabel(label.to_string()))?;
        if max_players <= 0 {
            return Err(ConfigError::NonPositiveMaxPlayers {
                label: label.to_string(),
                value: max_players,
            });
        }
        Ok(Self {
            label: label.to_string(),
            age,
            max_players: max_players as usize,
        })
    }

    /// Earliest birthday eligible for this bracket in the given season.
    pub fn cutoff(&self, season_year: i32) -> Option<NaiveDate> {
        let year = season_year.checked_sub(self.age as i32)?;
        NaiveDate::from_ymd_opt(year, CUTOFF_MONTH, CUTOFF_DAY)
    }

    /// u-5 and u-6 play mixed teams; every older bracket splits by gender.
    pub fn is_coed(&self) -> bool {
        matches!(self.age, 5 | 6)
    }

    pub fn rank_strategy(&self) -> RankStrategy {
        match self.age {
            5 => RankStrategy::U5,
            6 => RankStrategy::U6,
            _ => RankStrategy::General,
        }
    }
}

/// Parse the age out of a "u-<age>" label.
fn parse_age(label: &str) -> Option<u32> {
    let rest = label.strip_prefix('u').or_else(|| label.strip_prefix('U'))?;
    let digits = rest.strip_prefix('-')?.trim();
    if digits.is_empty() || !digits.chars().all(|c| c.is_ascii_digit()) {
        return None;
    }
    digits.parse().ok().filter(|age| (1..=MAX_BRACKET_AGE).contains(age))
}

/// The configured brackets in evaluation order. Order matters: the
/// classifier places each player in the first bracket whose cutoff they meet,
/// so the table should list the youngest bracket first.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BracketTable {
    brackets: Vec<Bracket>,
}

impl BracketTable {
    pub fn new(brackets: Vec<Bracket>) -> Result<Self, ConfigError> {
        if brackets.is_empty() {
            return Err(ConfigError::EmptyBrackets);
        }
        let mut seen = HashSet::new();
        for bracket in &brackets {
            if bracket.max_players == 0 {
                return Err(ConfigError::NonPositiveMaxPlayers {
                    label: bracket.label.clone(),
                    value: 0,
                });
            }
            if !seen.insert(bracket.label.to_lowercase()) {
                return Err(ConfigError::DuplicateBracket(bracket.label.clone()));
            }
        }
        Ok(Self { brackets })
    }

    pub fn iter(&self) -> impl Iterator<Item = &Bracket> {
        self.brackets.iter()
    }

    pub fn as_slice(&self) -> &[Bracket] {
        &self.brackets
    }

    pub fn len(&self) -> usize {
        self.brackets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.brackets.is_empty()
    }

    pub fn get(&self, label: &str) -> Option<&Bracket> {
        self.brackets.iter().find(|b| b.label == label)
    }

    /// True when ages strictly increase down the table.
    pub fn is_youngest_first(&self) -> bool {
        self.brackets.windows(2).all(|pair| pair[0].age < pair[1].age)
    }
}
