//! Round-robin team assignment.

use crate::models::{Cohort, PlayerId, Team};

/// Number of teams needed so none exceeds `max_players`.
pub fn team_count(players: usize, max_players: usize) -> usize {
    if max_players == 0 {
        return 0;
    }
    players.div_ceil(max_players)
}

/// Deal a priority-ordered sequence into `ceil(n / max_players)` teams, one
/// player per team per pass. The i-th player lands on team `i mod k`, which
/// spreads top-ranked players across teams and keeps sizes within one of each
/// other. Members stay in priority order inside each team.
pub fn assign_round_robin(ranked: &[PlayerId], max_players: usize, cohort: Cohort) -> Vec<Team> {
    let k = team_count(ranked.len(), max_players);
    if k == 0 {
        return Vec::new();
    }
    let mut teams: Vec<Team> = (0..k).map(|_| Team::new(cohort)).collect();
    for (i, &id) in ranked.iter().enumerate() {
        teams[i % k].members.push(id);
    }
    teams
}
