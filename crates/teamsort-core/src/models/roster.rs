use serde::{Deserialize, Serialize};

use super::player::{Player, PlayerId};

/// The full set of registered players for one run.
///
/// Players are stored by id (`players[id].id == id`) so a `PlayerId` is a
/// direct index. `order` is the sequence the classifier walks, which the
/// loader sets to birthday-then-skill.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Roster {
    players: Vec<Player>,
    order: Vec<PlayerId>,
}

impl Roster {
    /// Build a roster from players in row order. Ids are reassigned to the
    /// row position.
    pub fn new(players: Vec<Player>) -> Self {
        let players: Vec<Player> = players
            .into_iter()
            .enumerate()
            .map(|(id, mut p)| {
                p.id = id;
                p
            })
            .collect();
        let order = (0..players.len()).collect();
        Self { players, order }
    }

    pub fn len(&self) -> usize {
        self.players.len()
    }

    pub fn is_empty(&self) -> bool {
        self.players.is_empty()
    }

    pub fn get(&self, id: PlayerId) -> Option<&Player> {
        self.players.get(id)
    }

    /// Look up a player the caller already knows is on this roster.
    pub(crate) fn player(&self, id: PlayerId) -> &Player {
        &self.players[id]
    }

    /// Players in row order.
    pub fn players(&self) -> &[Player] {
        &self.players
    }

    /// Player ids in processing order.
    pub fn order(&self) -> &[PlayerId] {
        &self.order
    }

    /// Stable sort of the processing order by (birthday, skill), both
    /// ascending. Row ids are untouched.
    pub fn sort_by_birthday_then_skill(&mut self) {
        let players = &self.players;
        self.order
            .sort_by_key(|&id| (players[id].birthday, players[id].skill));
    }
}
