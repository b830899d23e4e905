use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Stable identity of a player for the lifetime of a run: the 0-based data
/// row the player was read from.
pub type PlayerId = usize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Gender {
    // Declaration order is the sort order: girls rank ahead of boys.
    #[serde(rename = "F")]
    Female,
    #[serde(rename = "M")]
    Male,
}

impl Gender {
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_ascii_uppercase().as_str() {
            "F" => Some(Gender::Female),
            "M" => Some(Gender::Male),
            _ => None,
        }
    }

    pub fn code(&self) -> &'static str {
        match self {
            Gender::Female => "F",
            Gender::Male => "M",
        }
    }
}

impl std::fmt::Display for Gender {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.code())
    }
}

/// Registration skill rating, lowest to highest.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum SkillLevel {
    Beginner,
    Average,
    #[serde(rename = "Very Good")]
    VeryGood,
    Advanced,
}

impl SkillLevel {
    pub const ALL: [SkillLevel; 4] = [
        SkillLevel::Beginner,
        SkillLevel::Average,
        SkillLevel::VeryGood,
        SkillLevel::Advanced,
    ];

    /// Parse a skill label. Case and surrounding whitespace are ignored.
    pub fn parse(s: &str) -> Option<Self> {
        let lower = s.trim().to_lowercase();
        Self::ALL
            .into_iter()
            .find(|level| level.label().to_lowercase() == lower)
    }

    pub fn label(&self) -> &'static str {
        match self {
            SkillLevel::Beginner => "Beginner",
            SkillLevel::Average => "Average",
            SkillLevel::VeryGood => "Very Good",
            SkillLevel::Advanced => "Advanced",
        }
    }
}

impl std::fmt::Display for SkillLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Player {
    pub id: PlayerId,
    pub last_name: String,
    pub first_name: String,
    pub gender: Gender,
    pub birthday: NaiveDate,
    pub skill: SkillLevel,
    pub practice_location: String,
    pub school: String,
    /// Parent volunteered as head coach
    pub parent_hc: bool,
    /// Parent volunteered as assistant coach
    pub parent_ac: bool,
}

impl Player {
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }

    pub fn display_name(&self) -> String {
        format!("{}, {}", self.last_name, self.first_name)
    }

    pub fn is_girl(&self) -> bool {
        self.gender == Gender::Female
    }

    /// True when either parent flag marks a coach volunteer.
    pub fn is_coach_affiliated(&self) -> bool {
        self.parent_hc || self.parent_ac
    }
}

/// Parse a Y/N flag cell.
pub fn parse_flag(s: &str) -> Option<bool> {
    match s.trim().to_ascii_uppercase().as_str() {
        "Y" => Some(true),
        "N" => Some(false),
        _ => None,
    }
}

pub fn flag_code(value: bool) -> &'static str {
    if value {
        "Y"
    } else {
        "N"
    }
}
