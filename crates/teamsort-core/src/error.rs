use std::path::PathBuf;

use chrono::NaiveDate;
use thiserror::Error;

/// Problems with the bracket table or balance thresholds. These abort the run
/// before any output is produced.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("Bracket table is empty")]
    EmptyBrackets,

    #[error("Malformed age group label: '{0}' (expected something like 'u-8')")]
    MalformedLabel(String),

    #[error("Age group {label} has non-positive Max Players: {value}")]
    NonPositiveMaxPlayers { label: String, value: i64 },

    #[error("Age group {0} appears more than once")]
    DuplicateBracket(String),

    #[error("No age group matches {player} (born {birthday})")]
    Unclassified { player: String, birthday: NaiveDate },

    #[error("Invalid girls-per-team bounds: min {min} is greater than max {max}")]
    InvalidThresholds { min: usize, max: usize },
}

/// Problems with the shape or content of an input table. Rejected before
/// classification begins.
#[derive(Error, Debug)]
pub enum InputError {
    #[error("Missing column '{column}' in {table} table")]
    MissingColumn { table: &'static str, column: &'static str },

    #[error("Expected {expected} columns in {table} table, found {found}")]
    ColumnCount {
        table: &'static str,
        expected: usize,
        found: usize,
    },

    #[error("Row {row}: invalid {column} value '{value}'")]
    InvalidValue {
        row: usize,
        column: &'static str,
        value: String,
    },

    #[error("Failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
}

#[derive(Error, Debug)]
pub enum Error {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Input(#[from] InputError),

    #[error("Failed to write {}: {source}", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Assignment is inconsistent: {0}")]
    Inconsistent(String),
}

pub type Result<T> = std::result::Result<T, Error>;

/// Maximum length of a raw cell value echoed back in an error message
const MAX_ERROR_VALUE_LENGTH: usize = 60;

impl InputError {
    /// Build an `InvalidValue`, truncating very long cells so a garbage file
    /// doesn't flood the terminal.
    pub fn invalid(row: usize, column: &'static str, value: &str) -> Self {
        let value = if value.chars().count() <= MAX_ERROR_VALUE_LENGTH {
            value.to_string()
        } else {
            let head: String = value.chars().take(MAX_ERROR_VALUE_LENGTH).collect();
            format!("{}... (truncated)", head)
        };
        InputError::InvalidValue { row, column, value }
    }
}
