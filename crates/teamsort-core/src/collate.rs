//! Flatten per-bracket teams into the output table.

use std::collections::HashSet;

use serde::Serialize;

use crate::error::{Error, Result};
use crate::models::{Player, Roster};
use crate::partition::BracketOutcome;

/// One output row: the original player record plus where they were placed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AssignmentRow {
    pub player: Player,
    pub age_group: String,
    /// 1-based, scoped to the age group
    pub team: usize,
    /// The player's age group has a balance rule it could not meet
    pub unresolved: bool,
}

/// Emit one row per player in bracket order, then team order, then team
/// member order. Fails if any player is missing or repeated.
pub fn collate(roster: &Roster, outcomes: &[BracketOutcome]) -> Result<Vec<AssignmentRow>> {
    let mut rows = Vec::with_capacity(roster.len());
    let mut seen = HashSet::with_capacity(roster.len());

    for outcome in outcomes {
        let unresolved = !outcome.issues.is_empty();
        for (index, team) in outcome.teams.iter().enumerate() {
            for &id in &team.members {
                let player = roster
                    .get(id)
                    .ok_or_else(|| Error::Inconsistent(format!("unknown player id {id}")))?;
                if !seen.insert(id) {
                    return Err(Error::Inconsistent(format!(
                        "{} is assigned more than once",
                        player.display_name()
                    )));
                }
                rows.push(AssignmentRow {
                    player: player.clone(),
                    age_group: outcome.bracket.label.clone(),
                    team: index + 1,
                    unresolved,
                });
            }
        }
    }

    if rows.len() != roster.len() {
        return Err(Error::Inconsistent(format!(
            "{} of {} players were assigned",
            rows.len(),
            roster.len()
        )));
    }
    Ok(rows)
}
