//! Synthetic registration rosters for trying the tool out.

use chrono::{Duration, NaiveDate};
use rand::distributions::{Distribution, WeightedIndex};
use rand::seq::SliceRandom;
use rand::Rng;

use crate::models::{Gender, Player, SkillLevel};

const LAST_NAMES: [&str; 20] = [
    "Smith", "Johnson", "Williams", "Brown", "Jones", "Garcia", "Miller", "Davis", "Rodriguez",
    "Martinez", "Hernandez", "Lopez", "Gonzalez", "Wilson", "Anderson", "Thomas", "Taylor",
    "Moore", "Jackson", "Martin",
];

const FIRST_NAMES: [&str; 20] = [
    "James", "John", "Robert", "Michael", "William", "David", "Richard", "Joseph", "Thomas",
    "Charles", "Mary", "Patricia", "Jennifer", "Linda", "Elizabeth", "Barbara", "Margaret",
    "Susan", "Dorothy", "Lisa",
];

pub const PRACTICE_LOCATIONS: [&str; 5] = [
    "Far East",
    "West 288",
    "Silverlake/East 288",
    "Blue Ridge Soccer Park (South Houston)",
    "Hwy 6 South",
];

/// The two West/Silverlake fields draw four times the families of the others
const PRACTICE_LOCATION_WEIGHTS: [u32; 5] = [1, 4, 4, 1, 1];

pub const SCHOOLS: [&str; 15] = [
    "Oak Elementary",
    "Maple Middle School",
    "Pine High School",
    "Cedar Academy",
    "Birch School",
    "Willow Elementary",
    "Elm Middle School",
    "Spruce High",
    "Aspen Charter School",
    "Redwood Preparatory",
    "Sycamore Elementary",
    "Chestnut Middle School",
    "Magnolia High",
    "Poplar Academy",
    "Cypress School",
];

/// One parent in six volunteers for each coaching role
const COACH_ODDS: f64 = 1.0 / 6.0;

pub const YOUNGEST_AGE: i64 = 4;
pub const OLDEST_AGE: i64 = 17;
const DAYS_PER_YEAR: i64 = 365;

pub const DEFAULT_COUNT: usize = 500;

/// Generate `count` random players born between 17 and 4 years before
/// `today`.
pub fn generate_players<R: Rng>(rng: &mut R, count: usize, today: NaiveDate) -> Vec<Player> {
    let latest = today - Duration::days(YOUNGEST_AGE * DAYS_PER_YEAR);
    let span = (OLDEST_AGE - YOUNGEST_AGE) * DAYS_PER_YEAR;
    // Weights are fixed and non-zero
    let locations = WeightedIndex::new(PRACTICE_LOCATION_WEIGHTS).ok();

    (0..count)
        .map(|id| {
            let location = match &locations {
                Some(dist) => PRACTICE_LOCATIONS[dist.sample(rng)],
                None => PRACTICE_LOCATIONS[0],
            };
            Player {
                id,
                last_name: pick(rng, &LAST_NAMES),
                first_name: pick(rng, &FIRST_NAMES),
                gender: if rng.gen_bool(0.5) {
                    Gender::Male
                } else {
                    Gender::Female
                },
                birthday: latest - Duration::days(rng.gen_range(0..=span)),
                skill: SkillLevel::ALL[rng.gen_range(0..SkillLevel::ALL.len())],
                practice_location: location.to_string(),
                school: pick(rng, &SCHOOLS),
                parent_hc: rng.gen_bool(COACH_ODDS),
                parent_ac: rng.gen_bool(COACH_ODDS),
            }
        })
        .collect()
}

fn pick<R: Rng>(rng: &mut R, options: &[&str]) -> String {
    options.choose(rng).copied().unwrap_or_default().to_string()
}
