//! Priority ordering of players within a bracket.
//!
//! The order decides who the round-robin deals out first, so the keys that
//! come earliest are the ones spread most evenly across teams.
//!
//! | Strategy | Keys |
//! |----------|------|
//! | u-5      | gender, practice location, skill (desc), school, HC (desc), AC (desc) |
//! | u-6      | gender, school, skill (desc), practice location, HC (desc), AC (desc) |
//! | general  | school, skill (desc), practice location, HC (desc), AC (desc) |
//!
//! General brackets are split by gender before ranking, so gender is not a
//! key there. All sorts are stable.

use std::cmp::{Ordering, Reverse};

use crate::models::{Gender, Player, PlayerId, RankStrategy, Roster, SkillLevel};

/// Return `ids` reordered by the strategy's priority keys.
pub fn rank(roster: &Roster, ids: &[PlayerId], strategy: RankStrategy) -> Vec<PlayerId> {
    let mut ranked = ids.to_vec();
    // `sort_by` is stable: full ties keep their input order
    ranked.sort_by(|&a, &b| compare(strategy, roster.player(a), roster.player(b)));
    ranked
}

/// Compare two players under a strategy; `Less` means `a` ranks first.
pub fn compare(strategy: RankStrategy, a: &Player, b: &Player) -> Ordering {
    match strategy {
        RankStrategy::U5 => u5_key(a).cmp(&u5_key(b)),
        RankStrategy::U6 => u6_key(a).cmp(&u6_key(b)),
        RankStrategy::General => general_key(a).cmp(&general_key(b)),
    }
}

/// Both coed strategies rank on six keys of the same shape.
type CoedKey<'a> = (Gender, &'a str, Reverse<SkillLevel>, &'a str, Reverse<bool>, Reverse<bool>);

fn u5_key(p: &Player) -> CoedKey<'_> {
    (
        p.gender,
        p.practice_location.as_str(),
        Reverse(p.skill),
        p.school.as_str(),
        Reverse(p.parent_hc),
        Reverse(p.parent_ac),
    )
}

fn u6_key(p: &Player) -> CoedKey<'_> {
    (
        p.gender,
        p.school.as_str(),
        Reverse(p.skill),
        p.practice_location.as_str(),
        Reverse(p.parent_hc),
        Reverse(p.parent_ac),
    )
}

type GeneralKey<'a> = (&'a str, Reverse<SkillLevel>, &'a str, Reverse<bool>, Reverse<bool>);

fn general_key(p: &Player) -> GeneralKey<'_> {
    (
        p.school.as_str(),
        Reverse(p.skill),
        p.practice_location.as_str(),
        Reverse(p.parent_hc),
        Reverse(p.parent_ac),
    )
}
