// Use-case level outputs of the arena loop.

use crate::domain::ArenaState;
use std::sync::Arc;

/// Snapshot published after each resolved tick. `tick` is 0 for the initial
/// state before anything was resolved.
#[derive(Debug, Clone)]
pub struct ArenaUpdate {
    pub tick: u64,
    pub arena: Arc<ArenaState>,
}
