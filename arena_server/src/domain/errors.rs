use std::fmt;

// Structural failures of an arena snapshot. These are caller bugs, not
// per-player runtime conditions, so they abort the tick.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ArenaError {
    MissingPlayerState { service: String },
    UnregisteredPlayerState { service: String },
    DuplicatePlayer { service: String },
}

impl fmt::Display for ArenaError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ArenaError::MissingPlayerState { service } => {
                write!(f, "registered player {service} has no state entry")
            }
            ArenaError::UnregisteredPlayerState { service } => {
                write!(f, "state entry {service} has no registered player")
            }
            ArenaError::DuplicatePlayer { service } => {
                write!(f, "player {service} is registered more than once")
            }
        }
    }
}

impl std::error::Error for ArenaError {}
