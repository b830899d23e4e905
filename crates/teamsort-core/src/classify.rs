//! Age-bracket classification.
//!
//! Each bracket's cutoff is September 1 of (season year - age). A player goes
//! into the first bracket, in table order, whose cutoff they were born on or
//! after. Because younger brackets have later cutoffs, a youngest-first table
//! puts every player in the youngest bracket they qualify for.

use chrono::NaiveDate;
use tracing::{debug, warn};

use crate::error::ConfigError;
use crate::models::{BracketTable, PlayerId, Roster};

/// Players grouped by bracket label, in bracket-table order. Every configured
/// bracket is present, including empty ones.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Classification {
    buckets: Vec<(String, Vec<PlayerId>)>,
}

impl Classification {
    pub fn get(&self, label: &str) -> Option<&[PlayerId]> {
        self.buckets
            .iter()
            .find(|(l, _)| l == label)
            .map(|(_, ids)| ids.as_slice())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &[PlayerId])> {
        self.buckets
            .iter()
            .map(|(label, ids)| (label.as_str(), ids.as_slice()))
    }

    /// Label of the bracket a player was placed in.
    pub fn bracket_of(&self, id: PlayerId) -> Option<&str> {
        self.buckets
            .iter()
            .find(|(_, ids)| ids.contains(&id))
            .map(|(label, _)| label.as_str())
    }

    pub fn total_players(&self) -> usize {
        self.buckets.iter().map(|(_, ids)| ids.len()).sum()
    }

    pub(crate) fn into_buckets(self) -> Vec<(String, Vec<PlayerId>)> {
        self.buckets
    }
}

/// Classify the whole roster in its processing order.
pub fn classify(
    roster: &Roster,
    brackets: &BracketTable,
    season_year: i32,
) -> Result<Classification, ConfigError> {
    classify_ids(roster, roster.order(), brackets, season_year)
}

/// Classify a subset of the roster, keeping the order of `ids` within each
/// bracket.
pub fn classify_ids(
    roster: &Roster,
    ids: &[PlayerId],
    brackets: &BracketTable,
    season_year: i32,
) -> Result<Classification, ConfigError> {
    if !brackets.is_youngest_first() {
        warn!(
            "Age groups are not listed youngest first; players will land in the first group they qualify for"
        );
    }

    let cutoffs: Vec<NaiveDate> = brackets
        .iter()
        .map(|b| {
            b.cutoff(season_year)
                .ok_or_else(|| ConfigError::MalformedLabel(b.label.clone()))
        })
        .collect::<Result<_, _>>()?;

    let mut buckets: Vec<(String, Vec<PlayerId>)> = brackets
        .iter()
        .map(|b| (b.label.clone(), Vec::new()))
        .collect();

    for &id in ids {
        let player = roster.player(id);
        let slot = cutoffs
            .iter()
            .position(|&cutoff| player.birthday >= cutoff)
            .ok_or_else(|| ConfigError::Unclassified {
                player: player.display_name(),
                birthday: player.birthday,
            })?;
        buckets[slot].1.push(id);
    }

    for (label, ids) in &buckets {
        debug!(age_group = %label, players = ids.len(), "Classified age group");
    }

    Ok(Classification { buckets })
}
