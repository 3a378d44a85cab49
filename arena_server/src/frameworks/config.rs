use crate::domain::{ArenaError, ArenaState, Direction, Player, PlayerState};
use crate::domain::systems::TickRules;
use serde::Deserialize;
use std::{env, fmt, fs, path::Path, time::Duration};

// Runtime/server constants (not arena rules).

pub fn http_port() -> u16 {
    env::var("ARENA_SERVER_PORT")
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(3001)
}

pub const DEFAULT_LOG_FILTER: &str = "info";

pub fn log_json() -> bool {
    matches!(env::var("LOG_FORMAT").as_deref(), Ok("json"))
}

pub fn arena_config_path() -> String {
    env::var("ARENA_CONFIG").unwrap_or_else(|_| "arena.toml".to_string())
}

pub fn tick_interval() -> Duration {
    parse_tick_interval(env::var("ARENA_TICK_INTERVAL_MS").ok().as_deref())
}

// Zero is treated like garbage: the arena needs a real period between ticks.
fn parse_tick_interval(raw: Option<&str>) -> Duration {
    let millis = raw
        .and_then(|value| value.trim().parse::<u64>().ok())
        .filter(|millis| *millis > 0)
        .unwrap_or(1000);
    Duration::from_millis(millis)
}

pub fn player_poll_timeout() -> Duration {
    let millis = env::var("PLAYER_POLL_TIMEOUT_MS")
        .ok()
        .and_then(|value| value.parse::<u64>().ok())
        .unwrap_or(500);
    Duration::from_millis(millis)
}

// Unset or unparsable means throws travel the whole line.
pub fn tick_rules() -> TickRules {
    TickRules {
        throw_range: env::var("ARENA_THROW_RANGE")
            .ok()
            .and_then(|value| value.parse::<u32>().ok()),
    }
}

#[derive(Debug)]
pub enum ConfigError {
    Read(std::io::Error),
    Parse(toml::de::Error),
    InvalidDirection { service: String, value: String },
    Arena(ArenaError),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Read(err) => write!(f, "failed to read arena config: {err}"),
            ConfigError::Parse(err) => write!(f, "failed to parse arena config: {err}"),
            ConfigError::InvalidDirection { service, value } => {
                write!(f, "player {service} has invalid direction {value:?}")
            }
            ConfigError::Arena(err) => write!(f, "invalid arena: {err}"),
        }
    }
}

impl std::error::Error for ConfigError {}

/// Arena definition as written in the TOML config file.
#[derive(Debug, Deserialize)]
pub struct ArenaFile {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub emoji_code: String,
    #[serde(default)]
    pub players: Vec<PlayerEntry>,
}

#[derive(Debug, Deserialize)]
pub struct PlayerEntry {
    pub service: String,
    pub name: String,
    // Defaults to `service` when the service URL is directly reachable.
    pub callback: Option<String>,
    pub x: Option<i32>,
    pub y: Option<i32>,
    pub direction: Option<String>,
}

impl ArenaFile {
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let raw = fs::read_to_string(path).map_err(ConfigError::Read)?;
        raw.parse()
    }

    /// Builds the initial arena. Players without an explicit spawn line up
    /// along the top row by config order, facing south.
    pub fn into_arena(self) -> Result<ArenaState, ConfigError> {
        let mut spawns = Vec::with_capacity(self.players.len());
        for (index, entry) in self.players.into_iter().enumerate() {
            let direction = match entry.direction.as_deref() {
                None => Direction::S,
                Some(value) => value.parse().map_err(|_| ConfigError::InvalidDirection {
                    service: entry.service.clone(),
                    value: value.to_string(),
                })?,
            };
            let x = entry.x.unwrap_or(index as i32);
            let y = entry.y.unwrap_or(0);
            let callback = entry.callback.unwrap_or_else(|| entry.service.clone());

            spawns.push((
                Player::new(entry.service, entry.name, callback),
                PlayerState::spawn(x, y, direction),
            ));
        }

        ArenaState::new(self.id, self.name, self.emoji_code, spawns).map_err(ConfigError::Arena)
    }
}

impl std::str::FromStr for ArenaFile {
    type Err = ConfigError;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        toml::from_str(raw).map_err(ConfigError::Parse)
    }
}
