//! Post-assignment balancing.
//!
//! Two passes run over a bracket's freshly dealt teams:
//!
//! 1. **Gender balance** (coed brackets only): every team ends up with between
//!    `min_girls` and `max_girls` girls.
//! 2. **Coach presence** (every bracket): every team has at least one player
//!    whose parent volunteered as head or assistant coach.
//!
//! Moves are swaps wherever possible so team sizes don't change. The player
//! sent back is picked to sit as close in priority rank as possible to the
//! player moved, keeping each team's priority profile close to what the
//! round-robin dealt.
//!
//! A gender pass that cannot fully succeed leaves the teams exactly as they
//! were before it ran and returns a [`BalanceIssue`]. The coach pass does the
//! same per cohort, so boys' and girls' teams are fixed or reported
//! separately.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, warn};

use crate::error::ConfigError;
use crate::models::{Bracket, Cohort, PlayerId, Roster, Team};

pub const DEFAULT_MIN_GIRLS: usize = 2;
pub const DEFAULT_MAX_GIRLS: usize = 3;

/// Girls-per-team bounds for coed brackets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BalanceThresholds {
    pub min_girls: usize,
    pub max_girls: usize,
}

impl Default for BalanceThresholds {
    fn default() -> Self {
        Self {
            min_girls: DEFAULT_MIN_GIRLS,
            max_girls: DEFAULT_MAX_GIRLS,
        }
    }
}

impl BalanceThresholds {
    pub fn new(min_girls: usize, max_girls: usize) -> Result<Self, ConfigError> {
        let thresholds = Self { min_girls, max_girls };
        thresholds.validate()?;
        Ok(thresholds)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.min_girls > self.max_girls {
            return Err(ConfigError::InvalidThresholds {
                min: self.min_girls,
                max: self.max_girls,
            });
        }
        Ok(())
    }

    fn contains(&self, girls: usize) -> bool {
        (self.min_girls..=self.max_girls).contains(&girls)
    }

    /// How far a girl count sits outside the bounds.
    fn violation(&self, girls: usize) -> usize {
        if girls < self.min_girls {
            self.min_girls - girls
        } else {
            girls.saturating_sub(self.max_girls)
        }
    }
}

/// A balance rule a bracket could not meet. The bracket keeps its
/// pre-fix assignment and its rows are flagged unresolved.
#[derive(Error, Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "rule", rename_all = "snake_case")]
pub enum BalanceIssue {
    #[error("{bracket}: {girls} girls cannot give {teams} teams between {min} and {max} girls each")]
    GenderInfeasible {
        bracket: String,
        girls: usize,
        teams: usize,
        min: usize,
        max: usize,
    },

    #[error("{bracket}: girls could not be balanced on teams {teams:?}")]
    GenderUnresolved { bracket: String, teams: Vec<usize> },

    #[error("{bracket} ({cohort}): no coach volunteer available for teams {teams:?} ({coaches} volunteers in cohort)")]
    UncoveredTeams {
        bracket: String,
        cohort: Cohort,
        /// 1-based team numbers
        teams: Vec<usize>,
        coaches: usize,
    },
}

impl BalanceIssue {
    pub fn bracket(&self) -> &str {
        match self {
            BalanceIssue::GenderInfeasible { bracket, .. }
            | BalanceIssue::GenderUnresolved { bracket, .. }
            | BalanceIssue::UncoveredTeams { bracket, .. } => bracket,
        }
    }
}

/// Priority position of each player within its cohort's ranked sequence.
pub type Ranks = HashMap<PlayerId, usize>;

pub struct BalanceEnforcer<'a> {
    roster: &'a Roster,
    thresholds: BalanceThresholds,
}

impl<'a> BalanceEnforcer<'a> {
    pub fn new(roster: &'a Roster, thresholds: BalanceThresholds) -> Self {
        Self { roster, thresholds }
    }

    /// Run both passes over one bracket's teams. Returns the number of moves
    /// made and any rules left unmet.
    pub fn enforce(
        &self,
        bracket: &Bracket,
        teams: &mut [Team],
        ranks: &Ranks,
    ) -> (usize, Vec<BalanceIssue>) {
        let mut moves = 0;
        let mut issues = Vec::new();

        if bracket.is_coed() {
            match self.balance_genders(bracket, teams, ranks) {
                Ok(n) => moves += n,
                Err(issue) => issues.push(issue),
            }
        }

        let (coach_moves, coach_issues) = self.ensure_coaches(bracket, teams, ranks);
        moves += coach_moves;
        issues.extend(coach_issues);

        for issue in &issues {
            warn!(age_group = %bracket.label, "{}", issue);
        }
        (moves, issues)
    }

    // ========================================================================
    // Gender balance
    // ========================================================================

    /// Bring every team's girl count inside the thresholds.
    pub fn balance_genders(
        &self,
        bracket: &Bracket,
        teams: &mut [Team],
        ranks: &Ranks,
    ) -> Result<usize, BalanceIssue> {
        let k = teams.len();
        if k == 0 {
            return Ok(0);
        }

        let min = self.thresholds.min_girls;
        let max = self.thresholds.max_girls;
        let girls: usize = teams.iter().map(|t| t.girls(self.roster)).sum();
        if girls < k * min || girls > k * max {
            return Err(BalanceIssue::GenderInfeasible {
                bracket: bracket.label.clone(),
                girls,
                teams: k,
                min,
                max,
            });
        }

        let mut work = teams.to_vec();
        let mut moves = 0;
        // Each move shrinks the total violation by one, so this bound is never
        // reached on a feasible bracket.
        let limit = k * max + girls + 1;

        for _ in 0..limit {
            let counts: Vec<usize> = work.iter().map(|t| t.girls(self.roster)).collect();

            if let Some(short) = counts.iter().position(|&c| c < min) {
                let donor = most_girls_above(&counts, min);
                let Some(donor) = donor else { break };
                self.move_girl(&mut work, donor, short, ranks);
                moves += 1;
                continue;
            }

            if let Some(over) = counts.iter().position(|&c| c > max) {
                let receiver = fewest_girls_below(&counts, max);
                let Some(receiver) = receiver else { break };
                self.move_girl(&mut work, over, receiver, ranks);
                moves += 1;
                continue;
            }

            debug!(age_group = %bracket.label, moves, "Gender balance reached");
            teams.clone_from_slice(&work);
            return Ok(moves);
        }

        let unbalanced = work
            .iter()
            .enumerate()
            .filter(|(_, t)| !self.thresholds.contains(t.girls(self.roster)))
            .map(|(i, _)| i + 1)
            .collect();
        Err(BalanceIssue::GenderUnresolved {
            bracket: bracket.label.clone(),
            teams: unbalanced,
        })
    }

    /// Move one girl from `from` to `to`, sending a boy back when `to` has one.
    fn move_girl(&self, teams: &mut [Team], from: usize, to: usize, ranks: &Ranks) {
        let girls: Vec<PlayerId> = teams[from]
            .members
            .iter()
            .copied()
            .filter(|&id| self.roster.player(id).is_girl())
            .collect();
        let boys: Vec<PlayerId> = teams[to]
            .members
            .iter()
            .copied()
            .filter(|&id| !self.roster.player(id).is_girl())
            .collect();

        let rank = |id: PlayerId| ranks.get(&id).copied().unwrap_or(usize::MAX);

        if boys.is_empty() {
            if let Some(girl) = girls.iter().copied().max_by_key(|&id| rank(id)) {
                debug!(girl, from, to, "Transferring girl");
                transfer(teams, from, to, girl, ranks);
            }
            return;
        }

        let pair = girls
            .iter()
            .flat_map(|&g| boys.iter().map(move |&b| (g, b)))
            .min_by_key(|&(g, b)| {
                (
                    rank(g).abs_diff(rank(b)),
                    std::cmp::Reverse(rank(g)),
                    std::cmp::Reverse(rank(b)),
                )
            });

        if let Some((girl, boy)) = pair {
            debug!(girl, boy, from, to, "Swapping girl for boy");
            swap(teams, from, to, girl, boy, ranks);
        }
    }

    // ========================================================================
    // Coach presence
    // ========================================================================

    /// Give every team at least one coach-affiliated player. Coaches only
    /// move between teams of the same cohort.
    ///
    /// Cohorts are fixed independently: one that cannot be covered keeps its
    /// teams as they were and adds a [`BalanceIssue`], while the others still
    /// get their moves. Returns the moves made and the cohorts left uncovered.
    pub fn ensure_coaches(
        &self,
        bracket: &Bracket,
        teams: &mut [Team],
        ranks: &Ranks,
    ) -> (usize, Vec<BalanceIssue>) {
        let mut moves = 0;
        let mut issues = Vec::new();

        for cohort in cohorts_of(teams) {
            match self.cover_cohort(bracket, teams, cohort, ranks) {
                Ok(n) => moves += n,
                Err(issue) => issues.push(issue),
            }
        }

        if moves > 0 {
            debug!(age_group = %bracket.label, moves, "Coach coverage reached");
        }
        (moves, issues)
    }

    /// Cover every team of one cohort, or leave the cohort untouched.
    fn cover_cohort(
        &self,
        bracket: &Bracket,
        teams: &mut [Team],
        cohort: Cohort,
        ranks: &Ranks,
    ) -> Result<usize, BalanceIssue> {
        let members: Vec<usize> = (0..teams.len())
            .filter(|&i| teams[i].cohort == cohort)
            .collect();
        let coaches: usize = members.iter().map(|&i| teams[i].coaches(self.roster)).sum();
        let uncovered: Vec<usize> = members
            .iter()
            .copied()
            .filter(|&i| !teams[i].has_coach(self.roster))
            .collect();

        if uncovered.is_empty() {
            return Ok(0);
        }

        let fail = |teams: Vec<usize>| BalanceIssue::UncoveredTeams {
            bracket: bracket.label.clone(),
            cohort,
            teams: teams.into_iter().map(|i| i + 1).collect(),
            coaches,
        };

        if coaches < members.len() {
            return Err(fail(uncovered));
        }

        let mut work = teams.to_vec();
        let mut moves = 0;
        let mut stuck = Vec::new();
        for &receiver in &uncovered {
            if self.cover_team(bracket, &mut work, &members, receiver, ranks) {
                moves += 1;
            } else {
                stuck.push(receiver);
            }
        }
        if !stuck.is_empty() {
            return Err(fail(stuck));
        }

        teams.clone_from_slice(&work);
        Ok(moves)
    }

    /// Pull a spare coach-affiliated player into `receiver` from the
    /// best-stocked donor that can give one. Returns false if none can.
    fn cover_team(
        &self,
        bracket: &Bracket,
        teams: &mut [Team],
        cohort_teams: &[usize],
        receiver: usize,
        ranks: &Ranks,
    ) -> bool {
        let mut donors: Vec<usize> = cohort_teams
            .iter()
            .copied()
            .filter(|&i| i != receiver && teams[i].coaches(self.roster) >= 2)
            .collect();
        donors.sort_by_key(|&i| (std::cmp::Reverse(teams[i].coaches(self.roster)), i));

        for donor in donors {
            if let Some(plan) = self.plan_coach_move(bracket, teams, donor, receiver, ranks) {
                match plan {
                    (coach, Some(back)) => {
                        debug!(coach, back, donor, receiver, "Swapping coach volunteer");
                        swap(teams, donor, receiver, coach, back, ranks);
                    }
                    (coach, None) => {
                        debug!(coach, donor, receiver, "Transferring coach volunteer");
                        transfer(teams, donor, receiver, coach, ranks);
                    }
                }
                return true;
            }
        }
        false
    }

    /// Pick the coach-affiliated player to move out of `donor` and the player
    /// `receiver` sends back.
    ///
    /// Coaches are tried lowest priority first. The player sent back is a
    /// same-gender player nearest in rank; in coed brackets an opposite-gender
    /// player is allowed only if neither team's girl count moves further out
    /// of bounds.
    fn plan_coach_move(
        &self,
        bracket: &Bracket,
        teams: &[Team],
        donor: usize,
        receiver: usize,
        ranks: &Ranks,
    ) -> Option<(PlayerId, Option<PlayerId>)> {
        let rank = |id: PlayerId| ranks.get(&id).copied().unwrap_or(usize::MAX);

        let mut coaches: Vec<PlayerId> = teams[donor]
            .members
            .iter()
            .copied()
            .filter(|&id| self.roster.player(id).is_coach_affiliated())
            .collect();
        coaches.sort_by_key(|&id| std::cmp::Reverse(rank(id)));

        if teams[receiver].is_empty() {
            return coaches.first().map(|&c| (c, None));
        }

        let donor_girls = teams[donor].girls(self.roster);
        let receiver_girls = teams[receiver].girls(self.roster);

        for coach in coaches {
            let coach_is_girl = self.roster.player(coach).is_girl();

            let same_gender = teams[receiver]
                .members
                .iter()
                .copied()
                .filter(|&id| self.roster.player(id).is_girl() == coach_is_girl)
                .min_by_key(|&id| (rank(id).abs_diff(rank(coach)), std::cmp::Reverse(rank(id))));
            if let Some(back) = same_gender {
                return Some((coach, Some(back)));
            }

            if !bracket.is_coed() {
                continue;
            }

            // Opposite-gender swap: one team gains a girl, the other loses one
            let (donor_after, receiver_after) = if coach_is_girl {
                (donor_girls.saturating_sub(1), receiver_girls + 1)
            } else {
                (donor_girls + 1, receiver_girls.saturating_sub(1))
            };
            let t = &self.thresholds;
            let keeps_bounds = t.violation(donor_after) <= t.violation(donor_girls)
                && t.violation(receiver_after) <= t.violation(receiver_girls);
            if !keeps_bounds {
                continue;
            }

            let back = teams[receiver]
                .members
                .iter()
                .copied()
                .min_by_key(|&id| (rank(id).abs_diff(rank(coach)), std::cmp::Reverse(rank(id))));
            if let Some(back) = back {
                return Some((coach, Some(back)));
            }
        }
        None
    }
}

/// Team with the most girls strictly above `min` (lowest index on ties).
fn most_girls_above(counts: &[usize], min: usize) -> Option<usize> {
    counts
        .iter()
        .enumerate()
        .filter(|&(_, &c)| c > min)
        .max_by_key(|&(i, &c)| (c, std::cmp::Reverse(i)))
        .map(|(i, _)| i)
}

/// Team with the fewest girls strictly below `max` (lowest index on ties).
fn fewest_girls_below(counts: &[usize], max: usize) -> Option<usize> {
    counts
        .iter()
        .enumerate()
        .filter(|&(_, &c)| c < max)
        .min_by_key(|&(i, &c)| (c, i))
        .map(|(i, _)| i)
}

/// Distinct cohorts in first-seen order.
fn cohorts_of(teams: &[Team]) -> Vec<Cohort> {
    let mut cohorts = Vec::new();
    for team in teams {
        if !cohorts.contains(&team.cohort) {
            cohorts.push(team.cohort);
        }
    }
    cohorts
}

fn resort(team: &mut Team, ranks: &Ranks) {
    team.members
        .sort_by_key(|id| ranks.get(id).copied().unwrap_or(usize::MAX));
}

fn transfer(teams: &mut [Team], from: usize, to: usize, id: PlayerId, ranks: &Ranks) {
    teams[from].members.retain(|&m| m != id);
    teams[to].members.push(id);
    resort(&mut teams[to], ranks);
}

fn swap(teams: &mut [Team], a: usize, b: usize, from_a: PlayerId, from_b: PlayerId, ranks: &Ranks) {
    teams[a].members.retain(|&m| m != from_a);
    teams[b].members.retain(|&m| m != from_b);
    teams[a].members.push(from_b);
    teams[b].members.push(from_a);
    resort(&mut teams[a], ranks);
    resort(&mut teams[b], ranks);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{sizes_balanced, Gender, Player, SkillLevel};
    use chrono::NaiveDate;

    // ------------------------------------------------------------------------
    // Fixtures
    // ------------------------------------------------------------------------

    /// Code per player: first char gender (F/M), optional 'C' for a
    /// coach-affiliated parent.
    fn roster(codes: &[&str]) -> Roster {
        Roster::new(
            codes
                .iter()
                .enumerate()
                .map(|(i, code)| Player {
                    id: i,
                    last_name: format!("Player{i}"),
                    first_name: "Test".to_string(),
                    gender: if code.starts_with('F') {
                        Gender::Female
                    } else {
                        Gender::Male
                    },
                    birthday: NaiveDate::from_ymd_opt(2021, 10, 1).unwrap(),
                    skill: SkillLevel::Average,
                    practice_location: "West 288".to_string(),
                    school: "Oak Elementary".to_string(),
                    parent_hc: code.contains('C'),
                    parent_ac: false,
                })
                .collect(),
        )
    }

    fn teams(cohort: Cohort, groups: &[&[PlayerId]]) -> Vec<Team> {
        groups
            .iter()
            .map(|g| Team {
                cohort,
                members: g.to_vec(),
            })
            .collect()
    }

    fn identity_ranks(n: usize) -> Ranks {
        (0..n).map(|i| (i, i)).collect()
    }

    fn all_ids(teams: &[Team]) -> Vec<PlayerId> {
        let mut ids: Vec<PlayerId> = teams.iter().flat_map(|t| t.members.clone()).collect();
        ids.sort();
        ids
    }

    fn u5() -> Bracket {
        Bracket::parse("u-5", 8).unwrap()
    }

    fn u10() -> Bracket {
        Bracket::parse("u-10", 10).unwrap()
    }

    // ------------------------------------------------------------------------
    // Thresholds
    // ------------------------------------------------------------------------

    #[test]
    fn test_thresholds_validate() {
        assert!(BalanceThresholds::new(2, 3).is_ok());
        assert!(BalanceThresholds::new(3, 3).is_ok());
        assert_eq!(
            BalanceThresholds::new(4, 3),
            Err(ConfigError::InvalidThresholds { min: 4, max: 3 })
        );
        assert_eq!(BalanceThresholds::default(), BalanceThresholds::new(2, 3).unwrap());
    }

    #[test]
    fn test_violation() {
        let t = BalanceThresholds::default();
        assert_eq!(t.violation(0), 2);
        assert_eq!(t.violation(2), 0);
        assert_eq!(t.violation(3), 0);
        assert_eq!(t.violation(5), 2);
    }

    // ------------------------------------------------------------------------
    // Gender balance
    // ------------------------------------------------------------------------

    #[test]
    fn test_gender_pulls_girls_to_short_team() {
        // Team 1: four girls, team 2: none
        let roster = roster(&["F", "F", "F", "F", "M", "M", "M", "M"]);
        let mut t = teams(Cohort::Coed, &[&[0, 1, 2, 3], &[4, 5, 6, 7]]);
        let enforcer = BalanceEnforcer::new(&roster, BalanceThresholds::default());

        let moves = enforcer
            .balance_genders(&u5(), &mut t, &identity_ranks(8))
            .unwrap();

        assert_eq!(moves, 2);
        assert_eq!(t[0].girls(&roster), 2);
        assert_eq!(t[1].girls(&roster), 2);
        assert!(sizes_balanced(&t));
        assert_eq!(all_ids(&t), (0..8).collect::<Vec<_>>());
    }

    #[test]
    fn test_gender_pushes_surplus_girls() {
        // 6 girls over 2 teams: 4 and 2 must become 3 and 3
        let roster = roster(&["F", "F", "F", "F", "M", "F", "F", "M", "M", "M"]);
        let mut t = teams(Cohort::Coed, &[&[0, 1, 2, 3, 4], &[5, 6, 7, 8, 9]]);
        let enforcer = BalanceEnforcer::new(&roster, BalanceThresholds::default());

        enforcer
            .balance_genders(&u5(), &mut t, &identity_ranks(10))
            .unwrap();

        assert_eq!(t[0].girls(&roster), 3);
        assert_eq!(t[1].girls(&roster), 3);
        assert_eq!(t[0].len(), 5);
        assert_eq!(t[1].len(), 5);
    }

    #[test]
    fn test_gender_swap_picks_nearest_ranks() {
        // Team 1 holds girls 0, 2 and 6; team 2 is all boys
        let roster = roster(&["F", "M", "F", "M", "M", "M", "F", "M"]);
        let mut t = teams(Cohort::Coed, &[&[0, 2, 4, 6], &[1, 3, 5, 7]]);
        let enforcer = BalanceEnforcer::new(&roster, BalanceThresholds::new(1, 3).unwrap());

        enforcer
            .balance_genders(&u5(), &mut t, &identity_ranks(8))
            .unwrap();

        // Several pairs sit one rank apart; the lowest-priority girl (6) and
        // lowest-priority boy (7) win the tie
        assert_eq!(t[0].members, vec![0, 2, 4, 7]);
        assert_eq!(t[1].members, vec![1, 3, 5, 6]);
    }

    #[test]
    fn test_gender_infeasible_leaves_teams_untouched() {
        let roster = roster(&["F", "M", "M", "M", "M", "M"]);
        let original = teams(Cohort::Coed, &[&[0, 1, 2], &[3, 4, 5]]);
        let mut t = original.clone();
        let enforcer = BalanceEnforcer::new(&roster, BalanceThresholds::default());

        let err = enforcer
            .balance_genders(&u5(), &mut t, &identity_ranks(6))
            .unwrap_err();

        assert_eq!(
            err,
            BalanceIssue::GenderInfeasible {
                bracket: "u-5".to_string(),
                girls: 1,
                teams: 2,
                min: 2,
                max: 3,
            }
        );
        assert_eq!(t, original);
    }

    #[test]
    fn test_gender_no_teams_is_ok() {
        let roster = roster(&[]);
        let enforcer = BalanceEnforcer::new(&roster, BalanceThresholds::default());
        assert_eq!(enforcer.balance_genders(&u5(), &mut [], &Ranks::new()), Ok(0));
    }

    #[test]
    fn test_gender_skipped_for_gendered_brackets() {
        let roster = roster(&["MC", "M", "M", "MC"]);
        let mut t = teams(Cohort::Boys, &[&[0, 1], &[2, 3]]);
        let enforcer = BalanceEnforcer::new(&roster, BalanceThresholds::default());

        let (moves, issues) = enforcer.enforce(&u10(), &mut t, &identity_ranks(4));
        assert_eq!(moves, 0);
        assert!(issues.is_empty());
    }

    // ------------------------------------------------------------------------
    // Coach presence
    // ------------------------------------------------------------------------

    #[test]
    fn test_coach_swapped_into_uncovered_team() {
        let roster = roster(&["MC", "MC", "M", "M", "M", "M"]);
        let mut t = teams(Cohort::Boys, &[&[0, 1, 2], &[3, 4, 5]]);
        let enforcer = BalanceEnforcer::new(&roster, BalanceThresholds::default());

        let (moves, issues) = enforcer.ensure_coaches(&u10(), &mut t, &identity_ranks(6));

        assert!(issues.is_empty(), "{issues:?}");
        assert_eq!(moves, 1);
        assert!(t.iter().all(|team| team.has_coach(&roster)));
        assert_eq!(t[0].len(), 3);
        assert_eq!(t[1].len(), 3);
        // Lower-priority coach (1) moves; nearest-ranked boy (3) comes back
        assert_eq!(t[0].members, vec![0, 2, 3]);
        assert_eq!(t[1].members, vec![1, 4, 5]);
    }

    #[test]
    fn test_coach_shortage_reports_uncovered() {
        let roster = roster(&["MC", "M", "M", "M", "M", "M"]);
        let original = teams(Cohort::Boys, &[&[0, 1], &[2, 3], &[4, 5]]);
        let mut t = original.clone();
        let enforcer = BalanceEnforcer::new(&roster, BalanceThresholds::default());

        let (moves, issues) = enforcer.ensure_coaches(&u10(), &mut t, &identity_ranks(6));

        assert_eq!(moves, 0);
        assert_eq!(
            issues,
            vec![BalanceIssue::UncoveredTeams {
                bracket: "u-10".to_string(),
                cohort: Cohort::Boys,
                teams: vec![2, 3],
                coaches: 1,
            }]
        );
        assert_eq!(t, original);
    }

    #[test]
    fn test_coaches_never_cross_cohorts() {
        // Boys have two coaches on one team; girls have none at all
        let roster = roster(&["MC", "MC", "M", "F", "F"]);
        let mut t = vec![
            Team { cohort: Cohort::Boys, members: vec![0, 1] },
            Team { cohort: Cohort::Boys, members: vec![2] },
            Team { cohort: Cohort::Girls, members: vec![3, 4] },
        ];
        let enforcer = BalanceEnforcer::new(&roster, BalanceThresholds::default());

        let (moves, issues) = enforcer.ensure_coaches(&u10(), &mut t, &identity_ranks(5));

        assert_eq!(
            issues,
            vec![BalanceIssue::UncoveredTeams {
                bracket: "u-10".to_string(),
                cohort: Cohort::Girls,
                teams: vec![3],
                coaches: 0,
            }]
        );
        // The boys' fix stands; the girls' team is left as dealt
        assert_eq!(moves, 1);
        assert!(t[0].has_coach(&roster));
        assert!(t[1].has_coach(&roster));
        assert_eq!(t[2].members, vec![3, 4]);
    }

    #[test]
    fn test_failing_cohort_does_not_block_the_next() {
        // Boys (teams 1-2) have no coaches; girls (teams 3-4) have both on team 3
        let roster = roster(&["M", "M", "M", "M", "FC", "FC", "F", "F"]);
        let mut t = teams(Cohort::Boys, &[&[0, 1], &[2, 3]]);
        t.extend(teams(Cohort::Girls, &[&[4, 5], &[6, 7]]));
        let enforcer = BalanceEnforcer::new(&roster, BalanceThresholds::default());

        let (moves, issues) = enforcer.ensure_coaches(&u10(), &mut t, &identity_ranks(8));

        assert_eq!(
            issues,
            vec![BalanceIssue::UncoveredTeams {
                bracket: "u-10".to_string(),
                cohort: Cohort::Boys,
                teams: vec![1, 2],
                coaches: 0,
            }]
        );
        assert_eq!(moves, 1);
        assert_eq!(t[0].members, vec![0, 1]);
        assert_eq!(t[1].members, vec![2, 3]);
        // Coach 5 swaps with the nearest-ranked girl (6)
        assert_eq!(t[2].members, vec![4, 6]);
        assert_eq!(t[3].members, vec![5, 7]);
    }

    #[test]
    fn test_every_uncovered_cohort_is_reported() {
        let roster = roster(&["M", "M", "M", "M", "F", "F", "F", "F"]);
        let mut t = teams(Cohort::Boys, &[&[0, 1], &[2, 3]]);
        t.extend(teams(Cohort::Girls, &[&[4, 5], &[6, 7]]));
        let enforcer = BalanceEnforcer::new(&roster, BalanceThresholds::default());

        let (moves, issues) = enforcer.ensure_coaches(&u10(), &mut t, &identity_ranks(8));

        assert_eq!(moves, 0);
        let reported: Vec<(Cohort, Vec<usize>)> = issues
            .into_iter()
            .map(|issue| match issue {
                BalanceIssue::UncoveredTeams { cohort, teams, .. } => (cohort, teams),
                other => panic!("unexpected issue: {other:?}"),
            })
            .collect();
        assert_eq!(
            reported,
            vec![(Cohort::Boys, vec![1, 2]), (Cohort::Girls, vec![3, 4])]
        );
    }

    #[test]
    fn test_coed_coach_swaps_across_genders_within_bounds() {
        // Team 1: boys 0(C), 1(C), 2; team 2: girls only. With no girl
        // minimum, a boy coach may come over for a girl.
        let roster = roster(&["MC", "MC", "M", "F", "F", "F"]);
        let mut t = teams(Cohort::Coed, &[&[0, 1, 2], &[3, 4, 5]]);
        let enforcer = BalanceEnforcer::new(&roster, BalanceThresholds::new(0, 3).unwrap());

        let (moves, issues) = enforcer.ensure_coaches(&u5(), &mut t, &identity_ranks(6));

        assert!(issues.is_empty(), "{issues:?}");
        assert_eq!(moves, 1);
        assert_eq!(t[0].members, vec![0, 2, 3]);
        assert_eq!(t[1].members, vec![1, 4, 5]);
    }

    #[test]
    fn test_coed_coach_swap_refused_when_it_breaks_bounds() {
        // Same teams, but no team may hold a girl: taking one in would push
        // team 1 out of bounds, so no move is possible
        let roster = roster(&["MC", "MC", "M", "F", "F", "F"]);
        let original = teams(Cohort::Coed, &[&[0, 1, 2], &[3, 4, 5]]);
        let mut t = original.clone();
        let enforcer = BalanceEnforcer::new(&roster, BalanceThresholds::new(0, 0).unwrap());

        let (moves, issues) = enforcer.ensure_coaches(&u5(), &mut t, &identity_ranks(6));

        assert_eq!(moves, 0);
        assert_eq!(
            issues,
            vec![BalanceIssue::UncoveredTeams {
                bracket: "u-5".to_string(),
                cohort: Cohort::Coed,
                teams: vec![2],
                coaches: 2,
            }]
        );
        assert_eq!(t, original);
    }

    #[test]
    fn test_coach_move_keeps_gender_bounds() {
        // Team 1: girls 0(C),1(C) and boys 2,3 ; team 2: girls 4,5 and boys 6,7
        let roster = roster(&["FC", "FC", "M", "M", "F", "F", "M", "M"]);
        let mut t = teams(Cohort::Coed, &[&[0, 1, 2, 3], &[4, 5, 6, 7]]);
        let enforcer = BalanceEnforcer::new(&roster, BalanceThresholds::default());

        let (moves, issues) = enforcer.enforce(&u5(), &mut t, &identity_ranks(8));

        assert!(issues.is_empty(), "{issues:?}");
        assert_eq!(moves, 1);
        for team in &t {
            assert!(team.has_coach(&roster));
            assert_eq!(team.girls(&roster), 2);
            assert_eq!(team.len(), 4);
        }
    }

    #[test]
    fn test_enforce_reports_both_rules() {
        // One girl, no coaches, two coed teams
        let roster = roster(&["F", "M", "M", "M"]);
        let mut t = teams(Cohort::Coed, &[&[0, 1], &[2, 3]]);
        let enforcer = BalanceEnforcer::new(&roster, BalanceThresholds::default());

        let (moves, issues) = enforcer.enforce(&u5(), &mut t, &identity_ranks(4));
        assert_eq!(moves, 0);
        assert_eq!(issues.len(), 2);
        assert!(issues.iter().all(|i| i.bracket() == "u-5"));
    }
}
