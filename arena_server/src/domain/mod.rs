// Domain layer: arena types and the pure tick rules.

pub mod action;
pub mod direction;
pub mod errors;
pub mod ports;
pub mod state;
pub mod systems;

pub use action::{Action, ActionParseError, PolledAction};
pub use direction::Direction;
pub use errors::ArenaError;
pub use ports::{ActionFn, ActionProvider, ProviderError};
pub use state::{ArenaState, Player, PlayerState};
