// Wire DTOs and conversions. Domain types stay serde-free; everything that
// leaves the process goes through here.

use crate::domain::{ArenaState, Player, PlayerState};
use crate::use_cases::ArenaUpdate;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Body posted to a player's service each tick.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ArenaUpdateDto {
    #[serde(rename = "_links")]
    pub links: LinksDto,
    pub arena: ArenaDto,
}

impl ArenaUpdateDto {
    /// Builds the request for `player`; `_links.self` tells the service which
    /// state entry is its own.
    pub fn for_player(arena: &ArenaState, player: &Player) -> Self {
        Self {
            links: LinksDto {
                self_link: HrefDto {
                    href: player.service.clone(),
                },
            },
            arena: ArenaDto::from(arena),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LinksDto {
    #[serde(rename = "self")]
    pub self_link: HrefDto,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HrefDto {
    pub href: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ArenaDto {
    pub id: String,
    pub name: String,
    pub state: BTreeMap<String, PlayerStateDto>,
}

impl From<&ArenaState> for ArenaDto {
    fn from(arena: &ArenaState) -> Self {
        Self {
            id: arena.id.clone(),
            name: arena.name.clone(),
            state: player_states(arena),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlayerStateDto {
    pub x: i32,
    pub y: i32,
    pub direction: String,
    #[serde(rename = "wasHit")]
    pub was_hit: bool,
    pub score: i32,
}

impl From<&PlayerState> for PlayerStateDto {
    fn from(state: &PlayerState) -> Self {
        Self {
            x: state.x,
            y: state.y,
            direction: state.direction.to_string(),
            was_hit: state.was_hit,
            score: state.score,
        }
    }
}

/// Public read-only view of the latest tick.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ArenaSnapshotDto {
    pub tick: u64,
    pub id: String,
    pub name: String,
    pub emoji_code: String,
    pub viewers: Vec<String>,
    pub players: Vec<PlayerDto>,
    pub state: BTreeMap<String, PlayerStateDto>,
}

impl From<&ArenaUpdate> for ArenaSnapshotDto {
    fn from(update: &ArenaUpdate) -> Self {
        let arena = &update.arena;
        Self {
            tick: update.tick,
            id: arena.id.clone(),
            name: arena.name.clone(),
            emoji_code: arena.emoji_code.clone(),
            viewers: arena.viewers.iter().cloned().collect(),
            players: arena.players.iter().map(PlayerDto::from).collect(),
            state: player_states(arena),
        }
    }
}

// Callback URLs are transport details and are not exposed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlayerDto {
    pub service: String,
    pub name: String,
}

impl From<&Player> for PlayerDto {
    fn from(player: &Player) -> Self {
        Self {
            service: player.service.clone(),
            name: player.name.clone(),
        }
    }
}

fn player_states(arena: &ArenaState) -> BTreeMap<String, PlayerStateDto> {
    arena
        .state
        .iter()
        .map(|(service, state)| (service.clone(), PlayerStateDto::from(state)))
        .collect()
}
