use serde::{Deserialize, Serialize};

use super::player::{Gender, PlayerId};
use super::roster::Roster;

/// The pool a team draws from. Coed brackets have a single `Coed` cohort;
/// gendered brackets have `Boys` and `Girls` cohorts that never mix.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Cohort {
    Coed,
    Boys,
    Girls,
}

impl Cohort {
    pub fn for_gender(gender: Gender) -> Self {
        match gender {
            Gender::Female => Cohort::Girls,
            Gender::Male => Cohort::Boys,
        }
    }
}

impl std::fmt::Display for Cohort {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Cohort::Coed => write!(f, "coed"),
            Cohort::Boys => write!(f, "boys"),
            Cohort::Girls => write!(f, "girls"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Team {
    pub cohort: Cohort,
    /// Members in priority order
    pub members: Vec<PlayerId>,
}

impl Team {
    pub fn new(cohort: Cohort) -> Self {
        Self {
            cohort,
            members: Vec::new(),
        }
    }

    pub fn len(&self) -> usize {
        self.members.len()
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    pub fn contains(&self, id: PlayerId) -> bool {
        self.members.contains(&id)
    }

    pub fn girls(&self, roster: &Roster) -> usize {
        self.members
            .iter()
            .filter(|&&id| roster.player(id).is_girl())
            .count()
    }

    pub fn coaches(&self, roster: &Roster) -> usize {
        self.members
            .iter()
            .filter(|&&id| roster.player(id).is_coach_affiliated())
            .count()
    }

    pub fn has_coach(&self, roster: &Roster) -> bool {
        self.members
            .iter()
            .any(|&id| roster.player(id).is_coach_affiliated())
    }
}

/// Check that team sizes within each cohort differ by at most one.
pub fn sizes_balanced(teams: &[Team]) -> bool {
    [Cohort::Coed, Cohort::Boys, Cohort::Girls].iter().all(|&cohort| {
        let sizes = teams.iter().filter(|t| t.cohort == cohort).map(Team::len);
        match (sizes.clone().min(), sizes.max()) {
            (Some(min), Some(max)) => max - min <= 1,
            _ => true,
        }
    })
}
