// Per-tick player intents as reported by player services.

use std::fmt;
use std::str::FromStr;
use std::time::Duration;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Forward,
    TurnLeft,
    TurnRight,
    Throw,
}

impl Action {
    /// Single-letter code used by player services.
    pub fn code(self) -> &'static str {
        match self {
            Action::Forward => "F",
            Action::TurnLeft => "L",
            Action::TurnRight => "R",
            Action::Throw => "T",
        }
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActionParseError(pub String);

impl fmt::Display for ActionParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown action {:?}", self.0)
    }
}

impl std::error::Error for ActionParseError {}

impl FromStr for Action {
    type Err = ActionParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "F" => Ok(Action::Forward),
            "L" => Ok(Action::TurnLeft),
            "R" => Ok(Action::TurnRight),
            "T" => Ok(Action::Throw),
            other => Err(ActionParseError(other.to_string())),
        }
    }
}

/// An action together with the time the player's service took to decide it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PolledAction {
    pub action: Action,
    pub latency: Duration,
}

impl PolledAction {
    pub fn new(action: Action, latency: Duration) -> Self {
        Self { action, latency }
    }
}
