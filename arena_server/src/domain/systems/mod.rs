// Pure per-tick rules. Nothing in here awaits or touches the network.

pub mod combat;
pub mod hits;
pub mod movement;
pub mod resolve;

pub use resolve::{TickRules, resolve_tick};
