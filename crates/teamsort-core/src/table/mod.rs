//! CSV tables: the players and age group inputs, and the assignment output.
//!
//! Players: `Last Name, First Name, Gender, Birthday, Skill Level,
//! Preferred Practice Location, School, Parent HC, Parent AC`.
//! Age groups: `Age Group, Max Players`.
//! Output: the player columns followed by `Age Group, Team`.

pub mod reader;
pub mod writer;

pub use reader::{load_brackets, load_players, read_brackets, read_players};
pub use writer::{save_assignments, save_players, write_assignments, write_players};

pub const PLAYER_COLUMNS: [&str; 9] = [
    "Last Name",
    "First Name",
    "Gender",
    "Birthday",
    "Skill Level",
    "Preferred Practice Location",
    "School",
    "Parent HC",
    "Parent AC",
];

pub const AGE_GROUP_COLUMN: &str = "Age Group";
pub const MAX_PLAYERS_COLUMN: &str = "Max Players";
pub const TEAM_COLUMN: &str = "Team";

pub const OUTPUT_COLUMNS: [&str; 11] = [
    PLAYER_COLUMNS[0],
    PLAYER_COLUMNS[1],
    PLAYER_COLUMNS[2],
    PLAYER_COLUMNS[3],
    PLAYER_COLUMNS[4],
    PLAYER_COLUMNS[5],
    PLAYER_COLUMNS[6],
    PLAYER_COLUMNS[7],
    PLAYER_COLUMNS[8],
    AGE_GROUP_COLUMN,
    TEAM_COLUMN,
];

/// Birthday format used on both input and output
pub const DATE_FORMAT: &str = "%Y-%m-%d";
