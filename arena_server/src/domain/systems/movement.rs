use crate::domain::{Action, PlayerState};

/// Applies a player's own action to its position and facing.
/// Throws are settled separately by the combat system.
pub fn apply_action(state: &PlayerState, action: Option<Action>) -> PlayerState {
    let mut next = *state;
    match action {
        Some(Action::Forward) => {
            // A step off the edge of the i32 grid is no move.
            let (dx, dy) = state.direction.delta();
            if let (Some(x), Some(y)) = (state.x.checked_add(dx), state.y.checked_add(dy)) {
                next.x = x;
                next.y = y;
            }
        }
        Some(Action::TurnLeft) => next.direction = state.direction.turn_left(),
        Some(Action::TurnRight) => next.direction = state.direction.turn_right(),
        Some(Action::Throw) | None => {}
    }
    next
}
