//! End-to-end roster partitioning.
//!
//! classify → rank → deal round-robin → balance → collate. Brackets share no
//! state, so they are processed in parallel; results come back in bracket
//! table order and match a sequential run exactly.

use rayon::prelude::*;
use serde::Serialize;
use tracing::{debug, info};

use crate::assign::assign_round_robin;
use crate::balance::{BalanceEnforcer, BalanceIssue, BalanceThresholds, Ranks};
use crate::classify::classify;
use crate::collate::{collate, AssignmentRow};
use crate::error::Result;
use crate::models::{Bracket, BracketTable, Cohort, Gender, PlayerId, Roster, Team};
use crate::ranking::rank;

/// Teams for one bracket after balancing.
#[derive(Debug, Clone, Serialize)]
pub struct BracketOutcome {
    pub bracket: Bracket,
    /// Team `i` is team number `i + 1`. Gendered brackets list boys' teams
    /// first, then girls' teams.
    pub teams: Vec<Team>,
    pub moves: usize,
    pub issues: Vec<BalanceIssue>,
}

impl BracketOutcome {
    pub fn players(&self) -> usize {
        self.teams.iter().map(Team::len).sum()
    }

    pub fn team_sizes(&self) -> Vec<usize> {
        self.teams.iter().map(Team::len).collect()
    }

    pub fn is_resolved(&self) -> bool {
        self.issues.is_empty()
    }
}

/// The result of a full run.
#[derive(Debug, Clone, Serialize)]
pub struct Partition {
    pub outcomes: Vec<BracketOutcome>,
    pub rows: Vec<AssignmentRow>,
}

impl Partition {
    pub fn issues(&self) -> impl Iterator<Item = &BalanceIssue> {
        self.outcomes.iter().flat_map(|o| o.issues.iter())
    }

    pub fn is_resolved(&self) -> bool {
        self.outcomes.iter().all(BracketOutcome::is_resolved)
    }
}

/// Partition a whole roster. Configuration problems abort before anything is
/// produced; balance problems are reported per bracket.
pub fn partition_roster(
    roster: &Roster,
    brackets: &BracketTable,
    thresholds: BalanceThresholds,
    season_year: i32,
) -> Result<Partition> {
    thresholds.validate()?;
    let classification = classify(roster, brackets, season_year)?;
    let buckets = classification.into_buckets();

    let outcomes: Vec<BracketOutcome> = brackets
        .as_slice()
        .par_iter()
        .zip(buckets.par_iter())
        .map(|(bracket, (_, ids))| partition_bracket(roster, bracket, ids, thresholds))
        .collect();

    let rows = collate(roster, &outcomes)?;

    info!(
        players = roster.len(),
        brackets = outcomes.len(),
        teams = outcomes.iter().map(|o| o.teams.len()).sum::<usize>(),
        unresolved = outcomes.iter().filter(|o| !o.is_resolved()).count(),
        "Roster partitioned"
    );

    Ok(Partition { outcomes, rows })
}

/// Rank, deal and balance one bracket's players.
pub fn partition_bracket(
    roster: &Roster,
    bracket: &Bracket,
    ids: &[PlayerId],
    thresholds: BalanceThresholds,
) -> BracketOutcome {
    let strategy = bracket.rank_strategy();
    let mut ranks = Ranks::with_capacity(ids.len());

    let mut teams = if bracket.is_coed() {
        let ranked = rank(roster, ids, strategy);
        record_ranks(&mut ranks, &ranked);
        assign_round_robin(&ranked, bracket.max_players, Cohort::Coed)
    } else {
        let (girls, boys): (Vec<PlayerId>, Vec<PlayerId>) = ids
            .iter()
            .partition(|&&id| roster.player(id).gender == Gender::Female);

        let ranked_boys = rank(roster, &boys, strategy);
        let ranked_girls = rank(roster, &girls, strategy);
        record_ranks(&mut ranks, &ranked_boys);
        record_ranks(&mut ranks, &ranked_girls);

        let mut teams = assign_round_robin(&ranked_boys, bracket.max_players, Cohort::Boys);
        teams.extend(assign_round_robin(
            &ranked_girls,
            bracket.max_players,
            Cohort::Girls,
        ));
        teams
    };

    let enforcer = BalanceEnforcer::new(roster, thresholds);
    let (moves, issues) = enforcer.enforce(bracket, &mut teams, &ranks);

    debug!(
        age_group = %bracket.label,
        players = ids.len(),
        teams = teams.len(),
        moves,
        "Age group assigned"
    );

    BracketOutcome {
        bracket: bracket.clone(),
        teams,
        moves,
        issues,
    }
}

fn record_ranks(ranks: &mut Ranks, ranked: &[PlayerId]) {
    for (position, &id) in ranked.iter().enumerate() {
        ranks.insert(id, position);
    }
}
