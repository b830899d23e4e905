//! Core library for teamsort.
//!
//! Splits a youth-sports registration roster into age-group teams:
//!
//! - [`classify`]: place each player in an age group by birthday cutoff
//! - [`ranking`]: order players by the age group's priority keys
//! - [`assign`]: deal ordered players round-robin into teams
//! - [`balance`]: fix girls-per-team and coach coverage
//! - [`collate`]: flatten teams into one output table
//!
//! [`partition::partition_roster`] runs the whole pipeline. [`table`] reads
//! and writes the CSV tables around it.

pub mod assign;
pub mod balance;
pub mod classify;
pub mod collate;
pub mod config;
pub mod error;
pub mod models;
pub mod partition;
pub mod ranking;
pub mod sample;
pub mod table;

pub use balance::{BalanceIssue, BalanceThresholds};
pub use collate::AssignmentRow;
pub use config::Config;
pub use error::{ConfigError, Error, InputError, Result};
pub use models::{Bracket, BracketTable, Cohort, Gender, Player, PlayerId, Roster, SkillLevel, Team};
pub use partition::{partition_roster, BracketOutcome, Partition};
