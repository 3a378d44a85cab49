use crate::use_cases::ArenaUpdate;
use tokio::sync::watch;

#[derive(Clone)]
pub struct AppState {
    // Latest resolved tick, published by the arena loop.
    pub updates_rx: watch::Receiver<ArenaUpdate>,
}
