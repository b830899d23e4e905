use std::fs::File;
use std::io::Write;
use std::path::Path;

use tracing::debug;

use super::{DATE_FORMAT, OUTPUT_COLUMNS, PLAYER_COLUMNS};
use crate::collate::AssignmentRow;
use crate::error::{Error, Result};
use crate::models::{flag_code, Player};

/// The nine player columns, encoded the way the players table is read.
fn player_fields(p: &Player) -> [String; 9] {
    [
        p.last_name.clone(),
        p.first_name.clone(),
        p.gender.code().to_string(),
        p.birthday.format(DATE_FORMAT).to_string(),
        p.skill.label().to_string(),
        p.practice_location.clone(),
        p.school.clone(),
        flag_code(p.parent_hc).to_string(),
        flag_code(p.parent_ac).to_string(),
    ]
}

/// Write the assignment table: every player column plus Age Group and Team.
pub fn write_assignments<W: Write>(writer: W, rows: &[AssignmentRow]) -> Result<()> {
    let mut csv = csv::Writer::from_writer(writer);
    csv.write_record(OUTPUT_COLUMNS)?;
    for row in rows {
        let fields = player_fields(&row.player);
        let team = row.team.to_string();
        csv.write_record(
            fields
                .iter()
                .map(String::as_str)
                .chain([row.age_group.as_str(), team.as_str()]),
        )?;
    }
    csv.flush().map_err(csv::Error::from)?;
    Ok(())
}

/// Write the players table in input format.
pub fn write_players<W: Write>(writer: W, players: &[Player]) -> Result<()> {
    let mut csv = csv::Writer::from_writer(writer);
    csv.write_record(PLAYER_COLUMNS)?;
    for player in players {
        csv.write_record(player_fields(player))?;
    }
    csv.flush().map_err(csv::Error::from)?;
    Ok(())
}

/// Create `path` (and any missing parent directories) for writing.
pub fn create_file(path: &Path) -> Result<File> {
    let io_err = |source| Error::Write {
        path: path.to_path_buf(),
        source,
    };
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent).map_err(io_err)?;
    }
    File::create(path).map_err(io_err)
}

pub fn save_assignments(path: &Path, rows: &[AssignmentRow]) -> Result<()> {
    write_assignments(create_file(path)?, rows)?;
    debug!(path = %path.display(), rows = rows.len(), "Wrote assignments");
    Ok(())
}

pub fn save_players(path: &Path, players: &[Player]) -> Result<()> {
    write_players(create_file(path)?, players)?;
    debug!(path = %path.display(), players = players.len(), "Wrote players");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Gender, SkillLevel};
    use crate::table::read_players;
    use chrono::NaiveDate;

    fn player(id: usize, last: &str, gender: Gender, skill: SkillLevel) -> Player {
        Player {
            id,
            last_name: last.to_string(),
            first_name: "Lisa".to_string(),
            gender,
            birthday: NaiveDate::from_ymd_opt(2015, 9, 1).unwrap(),
            skill,
            practice_location: "Blue Ridge Soccer Park (South Houston)".to_string(),
            school: "Redwood Preparatory".to_string(),
            parent_hc: id == 0,
            parent_ac: true,
        }
    }

    #[test]
    fn test_write_assignments() {
        let rows = vec![AssignmentRow {
            player: player(0, "Taylor", Gender::Female, SkillLevel::VeryGood),
            age_group: "u-12".to_string(),
            team: 2,
            unresolved: false,
        }];
        let mut out = Vec::new();
        write_assignments(&mut out, &rows).unwrap();
        let text = String::from_utf8(out).unwrap();

        let mut lines = text.lines();
        assert_eq!(
            lines.next(),
            Some("Last Name,First Name,Gender,Birthday,Skill Level,Preferred Practice Location,School,Parent HC,Parent AC,Age Group,Team")
        );
        assert_eq!(
            lines.next(),
            Some("Taylor,Lisa,F,2015-09-01,Very Good,Blue Ridge Soccer Park (South Houston),Redwood Preparatory,Y,Y,u-12,2")
        );
        assert_eq!(lines.next(), None);
    }

    #[test]
    fn test_players_reread_through_loader() {
        let players = vec![
            player(0, "Moore, Jr.", Gender::Male, SkillLevel::Advanced),
            player(1, "Martin", Gender::Female, SkillLevel::Beginner),
        ];
        let mut out = Vec::new();
        write_players(&mut out, &players).unwrap();

        let roster = read_players(out.as_slice()).unwrap();
        assert_eq!(roster.players(), players.as_slice());
    }

    #[test]
    fn test_save_creates_parent_dirs() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("downloads").join("output_teams.csv");
        save_assignments(&path, &[]).unwrap();

        let text = std::fs::read_to_string(&path).unwrap();
        assert!(text.starts_with("Last Name,"));
    }
}
