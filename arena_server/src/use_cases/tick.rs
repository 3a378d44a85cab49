use crate::domain::systems::{TickRules, resolve_tick};
use crate::domain::{ActionProvider, ArenaError, ArenaState, PolledAction};
use std::collections::BTreeMap;
use std::sync::Arc;
use std::time::Duration;
use tokio::task::JoinSet;
use tracing::{Instrument, debug, debug_span, warn};

/// Per-tick knobs for polling and resolution.
#[derive(Debug, Clone, Copy)]
pub struct TickSettings {
    /// Budget for a single player's reply. Slower players forfeit the tick.
    pub poll_timeout: Duration,
    pub rules: TickRules,
}

impl Default for TickSettings {
    fn default() -> Self {
        Self {
            poll_timeout: Duration::from_millis(500),
            rules: TickRules::default(),
        }
    }
}

/// Runs one tick: polls every registered player concurrently, waits for all
/// of them, then resolves the collected actions in a single pass.
///
/// A player whose poll fails, times out or panics simply does nothing this
/// tick. Only a structurally broken `arena` is returned as an error.
/// Dropping the returned future aborts every in-flight poll and applies
/// nothing.
pub async fn update_arena(
    arena: &ArenaState,
    provider: Arc<dyn ActionProvider>,
    settings: &TickSettings,
) -> Result<ArenaState, ArenaError> {
    arena.validate()?;

    let snapshot = Arc::new(arena.clone());
    let mut polls = JoinSet::new();

    // Fan out: one task per player, each with its own deadline.
    for player in &arena.players {
        let provider = Arc::clone(&provider);
        let snapshot = Arc::clone(&snapshot);
        let player = player.clone();
        let poll_timeout = settings.poll_timeout;
        let span = debug_span!("poll", service = %player.service);

        polls.spawn(
            async move {
                let service = player.service.clone();
                let reply = tokio::time::timeout(poll_timeout, provider.poll(snapshot, player)).await;
                (service, reply)
            }
            .instrument(span),
        );
    }

    // Fan in: nothing is resolved until every poll has settled.
    let mut actions: BTreeMap<String, PolledAction> = BTreeMap::new();
    while let Some(joined) = polls.join_next().await {
        match joined {
            Ok((service, Ok(Ok(Some(polled))))) => {
                debug!(
                    %service,
                    action = %polled.action,
                    latency_ms = polled.latency.as_millis() as u64,
                    "player acted"
                );
                actions.insert(service, polled);
            }
            Ok((service, Ok(Ok(None)))) => {
                debug!(%service, "player passed");
            }
            Ok((service, Ok(Err(error)))) => {
                warn!(%service, %error, "player poll failed");
            }
            Ok((service, Err(_))) => {
                warn!(
                    %service,
                    timeout_ms = settings.poll_timeout.as_millis() as u64,
                    "player poll timed out"
                );
            }
            Err(error) => {
                warn!(%error, "player poll task ended abnormally");
            }
        }
    }

    Ok(resolve_tick(arena, &actions, &settings.rules))
}
