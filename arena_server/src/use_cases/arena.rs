// Long-running arena loop that drives one tick after another.

use super::tick::{TickSettings, update_arena};
use super::types::ArenaUpdate;
use crate::domain::{ActionProvider, ArenaError, ArenaState};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::{Notify, watch};
use tokio::time::MissedTickBehavior;
use tracing::{debug, error, info};

const MIN_TICK_INTERVAL: Duration = Duration::from_millis(1);

/// Settings shared by every tick of an arena loop.
#[derive(Debug, Clone, Copy)]
pub struct ArenaSettings {
    /// Time between tick starts.
    pub tick_interval: Duration,
    pub tick: TickSettings,
}

/// Drives the arena until `shutdown` fires, publishing every resolved tick on
/// `updates_tx`. Ticks never overlap: the next one starts only after the
/// previous state has been published.
///
/// A shutdown that arrives mid-tick drops that tick, so partially collected
/// actions are never applied. Returns the number of resolved ticks.
pub async fn arena_task(
    initial: ArenaState,
    provider: Arc<dyn ActionProvider>,
    settings: ArenaSettings,
    updates_tx: watch::Sender<ArenaUpdate>,
    shutdown: Arc<Notify>,
) -> Result<u64, ArenaError> {
    let mut current = Arc::new(initial);
    let mut tick: u64 = 0;

    // `interval` rejects a zero period.
    let tick_interval = settings.tick_interval.max(MIN_TICK_INTERVAL);
    let mut interval = tokio::time::interval(tick_interval);
    // A slow tick pushes the schedule back instead of bursting to catch up.
    interval.set_missed_tick_behavior(MissedTickBehavior::Delay);

    info!(
        arena_id = %current.id,
        players = current.players.len(),
        tick_interval_ms = tick_interval.as_millis() as u64,
        "arena loop started"
    );

    loop {
        tokio::select! {
            _ = shutdown.notified() => break,
            _ = interval.tick() => {}
        }

        let resolved = tokio::select! {
            _ = shutdown.notified() => {
                info!(arena_id = %current.id, tick = tick + 1, "shutdown during tick; discarding it");
                break;
            }
            resolved = update_arena(&current, Arc::clone(&provider), &settings.tick) => resolved,
        };

        let next = match resolved {
            Ok(next) => next,
            Err(e) => {
                error!(arena_id = %current.id, tick = tick + 1, error = %e, "arena state is inconsistent");
                return Err(e);
            }
        };

        tick += 1;
        current = Arc::new(next);
        debug!(arena_id = %current.id, tick, "tick resolved");
        let _ = updates_tx.send(ArenaUpdate {
            tick,
            arena: Arc::clone(&current),
        });
    }

    info!(arena_id = %current.id, ticks = tick, "arena loop stopped");
    Ok(tick)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Action, Direction, PlayerState};
    use crate::use_cases::test_support::{Reply, ScriptedProvider, arena_of};

    fn settings() -> ArenaSettings {
        ArenaSettings {
            tick_interval: Duration::from_secs(1),
            tick: TickSettings {
                poll_timeout: Duration::from_millis(200),
                ..TickSettings::default()
            },
        }
    }

    fn channel(initial: &ArenaState) -> (watch::Sender<ArenaUpdate>, watch::Receiver<ArenaUpdate>) {
        watch::channel(ArenaUpdate {
            tick: 0,
            arena: Arc::new(initial.clone()),
        })
    }

    #[tokio::test(start_paused = true)]
    async fn publishes_each_tick_until_shutdown() {
        let initial = arena_of(&[("walker", PlayerState::spawn(0, 0, Direction::E))]);
        let provider = ScriptedProvider::new().reply(
            "walker",
            Reply::act(Action::Forward, Duration::from_millis(10)),
        );
        let (updates_tx, updates_rx) = channel(&initial);
        let shutdown = Arc::new(Notify::new());

        let handle = tokio::spawn(arena_task(
            initial,
            Arc::new(provider),
            settings(),
            updates_tx,
            Arc::clone(&shutdown),
        ));
        tokio::time::sleep(Duration::from_millis(2_500)).await;
        shutdown.notify_one();
        let ticks = handle
            .await
            .expect("arena task should not panic")
            .expect("arena task should succeed");

        let latest = updates_rx.borrow().clone();
        assert!(ticks >= 2);
        assert_eq!(latest.tick, ticks);
        assert_eq!(
            latest.arena.state["walker"].position(),
            (ticks as i32, 0)
        );
    }

    #[tokio::test(start_paused = true)]
    async fn shutdown_mid_tick_discards_the_tick() {
        let initial = arena_of(&[
            ("foo", PlayerState::spawn(0, 0, Direction::S)),
            ("bar", PlayerState::spawn(0, 1, Direction::N)),
        ]);
        let provider = ScriptedProvider::new().reply(
            "foo",
            Reply::act(Action::Throw, Duration::from_millis(1)).after(Duration::from_secs(30)),
        );
        let (updates_tx, updates_rx) = channel(&initial);
        let shutdown = Arc::new(Notify::new());
        let slow_settings = ArenaSettings {
            tick: TickSettings {
                poll_timeout: Duration::from_secs(60),
                ..TickSettings::default()
            },
            ..settings()
        };

        let handle = tokio::spawn(arena_task(
            initial.clone(),
            Arc::new(provider),
            slow_settings,
            updates_tx,
            Arc::clone(&shutdown),
        ));
        tokio::time::sleep(Duration::from_secs(5)).await;
        shutdown.notify_one();
        let ticks = handle
            .await
            .expect("arena task should not panic")
            .expect("arena task should succeed");

        assert_eq!(ticks, 0);
        let latest = updates_rx.borrow().clone();
        assert_eq!(latest.tick, 0);
        assert_eq!(latest.arena.state, initial.state);
    }

    #[tokio::test(start_paused = true)]
    async fn zero_tick_interval_still_ticks() {
        let initial = arena_of(&[("walker", PlayerState::spawn(0, 0, Direction::S))]);
        let provider = ScriptedProvider::new().reply(
            "walker",
            Reply::act(Action::Forward, Duration::from_millis(1)),
        );
        let (updates_tx, mut updates_rx) = channel(&initial);
        let shutdown = Arc::new(Notify::new());
        let zero = ArenaSettings {
            tick_interval: Duration::ZERO,
            ..settings()
        };

        let handle = tokio::spawn(arena_task(
            initial,
            Arc::new(provider),
            zero,
            updates_tx,
            Arc::clone(&shutdown),
        ));
        updates_rx
            .wait_for(|update| update.tick >= 3)
            .await
            .expect("arena loop should keep publishing");
        shutdown.notify_one();
        let ticks = handle
            .await
            .expect("arena task should not panic")
            .expect("arena task should succeed");

        assert!(ticks >= 3);
    }

    #[tokio::test]
    async fn inconsistent_arena_stops_the_loop() {
        let mut broken = arena_of(&[("foo", PlayerState::spawn(0, 0, Direction::S))]);
        broken.state.clear();
        let (updates_tx, _updates_rx) = channel(&broken);

        let result = arena_task(
            broken,
            Arc::new(ScriptedProvider::new()),
            settings(),
            updates_tx,
            Arc::new(Notify::new()),
        )
        .await;

        assert!(matches!(result, Err(ArenaError::MissingPlayerState { .. })));
    }
}
