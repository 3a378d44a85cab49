// Arena snapshot types. Every tick produces a new `ArenaState`; nothing here
// is mutated in place once published.

use super::direction::Direction;
use super::errors::ArenaError;
use std::collections::{BTreeMap, BTreeSet};

/// A registered participant. `service` is the identity key used everywhere
/// else; `callback` is where the transport reaches the player's service.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Player {
    pub service: String,
    pub name: String,
    pub callback: String,
}

impl Player {
    pub fn new(
        service: impl Into<String>,
        name: impl Into<String>,
        callback: impl Into<String>,
    ) -> Self {
        Self {
            service: service.into(),
            name: name.into(),
            callback: callback.into(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlayerState {
    pub x: i32,
    pub y: i32,
    pub direction: Direction,
    // True only when a throw landed on the player during the last resolved tick.
    pub was_hit: bool,
    pub score: i32,
}

impl PlayerState {
    /// Fresh state for a player entering the arena.
    pub fn spawn(x: i32, y: i32, direction: Direction) -> Self {
        Self {
            x,
            y,
            direction,
            was_hit: false,
            score: 0,
        }
    }

    pub fn position(&self) -> (i32, i32) {
        (self.x, self.y)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArenaState {
    pub id: String,
    pub name: String,
    pub emoji_code: String,
    pub viewers: BTreeSet<String>,
    pub players: BTreeSet<Player>,
    pub state: BTreeMap<String, PlayerState>,
}

impl ArenaState {
    /// Builds an arena where each player starts at the given state.
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        emoji_code: impl Into<String>,
        spawns: impl IntoIterator<Item = (Player, PlayerState)>,
    ) -> Result<Self, ArenaError> {
        let mut players = BTreeSet::new();
        let mut state = BTreeMap::new();
        for (player, player_state) in spawns {
            if state
                .insert(player.service.clone(), player_state)
                .is_some()
            {
                return Err(ArenaError::DuplicatePlayer {
                    service: player.service,
                });
            }
            players.insert(player);
        }

        Ok(Self {
            id: id.into(),
            name: name.into(),
            emoji_code: emoji_code.into(),
            viewers: BTreeSet::new(),
            players,
            state,
        })
    }

    pub fn player_state(&self, service: &str) -> Option<&PlayerState> {
        self.state.get(service)
    }

    /// Checks that the state map is keyed by exactly the registered players.
    pub fn validate(&self) -> Result<(), ArenaError> {
        let mut services = BTreeSet::new();
        for player in &self.players {
            if !services.insert(player.service.as_str()) {
                return Err(ArenaError::DuplicatePlayer {
                    service: player.service.clone(),
                });
            }
            if !self.state.contains_key(&player.service) {
                return Err(ArenaError::MissingPlayerState {
                    service: player.service.clone(),
                });
            }
        }

        if let Some(extra) = self.state.keys().find(|k| !services.contains(k.as_str())) {
            return Err(ArenaError::UnregisteredPlayerState {
                service: extra.clone(),
            });
        }

        Ok(())
    }
}
