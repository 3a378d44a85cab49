use super::combat::{Throw, arbitrate};
use super::hits::find_target;
use super::movement::apply_action;
use crate::domain::{Action, ArenaState, PlayerState, PolledAction};
use std::collections::BTreeMap;
use tracing::debug;

/// Tunable rules applied when resolving a tick.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TickRules {
    /// Maximum cells a throw travels. `None` means the whole line.
    pub throw_range: Option<u32>,
}

/// Turns the previous snapshot plus every collected action into the next
/// snapshot. Players missing from `actions` did nothing this tick.
///
/// Throws are aimed at start-of-tick positions; moves happen simultaneously.
pub fn resolve_tick(
    arena: &ArenaState,
    actions: &BTreeMap<String, PolledAction>,
    rules: &TickRules,
) -> ArenaState {
    let action_of = |service: &str| actions.get(service).map(|polled| polled.action);

    // Movement, with last tick's hit markers cleared.
    let mut next_state: BTreeMap<String, PlayerState> = arena
        .state
        .iter()
        .map(|(service, state)| {
            let mut next = apply_action(state, action_of(service));
            next.was_hit = false;
            (service.clone(), next)
        })
        .collect();

    let throws: Vec<Throw> = actions
        .iter()
        .filter(|(_, polled)| polled.action == Action::Throw)
        .filter_map(|(thrower, polled)| {
            find_target(&arena.state, thrower, rules.throw_range).map(|target| Throw {
                thrower: thrower.clone(),
                target: target.to_string(),
                latency: polled.latency,
            })
        })
        .collect();

    for throw in arbitrate(&throws) {
        debug!(
            arena_id = %arena.id,
            thrower = %throw.thrower,
            target = %throw.target,
            latency_ms = throw.latency.as_millis() as u64,
            "throw landed"
        );
        if let Some(target) = next_state.get_mut(&throw.target) {
            target.was_hit = true;
            target.score = target.score.saturating_sub(1);
        }
        if let Some(thrower) = next_state.get_mut(&throw.thrower) {
            thrower.score = thrower.score.saturating_add(1);
        }
    }

    ArenaState {
        state: next_state,
        ..arena.clone()
    }
}
