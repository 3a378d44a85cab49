// Use cases layer: tick orchestration and the arena loop.

pub mod arena;
#[cfg(test)]
pub(crate) mod test_support;
pub mod tick;
pub mod types;

pub use arena::{ArenaSettings, arena_task};
pub use tick::{TickSettings, update_arena};
pub use types::ArenaUpdate;
