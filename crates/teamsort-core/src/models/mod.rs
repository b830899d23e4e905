//! Data models for roster partitioning.
//!
//! - `Player`, `Gender`, `SkillLevel`: one registration row
//! - `Roster`: every player in a run, addressable by `PlayerId`
//! - `Bracket`, `BracketTable`: age groups and their team-size limits
//! - `Team`, `Cohort`: index-addressed team containers

pub mod bracket;
pub mod player;
pub mod roster;
pub mod team;

pub use bracket::{Bracket, BracketTable, RankStrategy};
pub use player::{flag_code, parse_flag, Gender, Player, PlayerId, SkillLevel};
pub use roster::Roster;
pub use team::{sizes_balanced, Cohort, Team};
