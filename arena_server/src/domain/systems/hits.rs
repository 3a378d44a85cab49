use crate::domain::PlayerState;
use std::collections::BTreeMap;

/// Finds the player a throw from `thrower` would hit: the nearest other
/// player sitting exactly on the thrower's facing line, strictly ahead of it.
///
/// Walking the ray cell by cell is equivalent to picking the smallest
/// positive step count among players on the line, which is what this does so
/// that an unbounded ray still terminates. `range` caps the step count.
pub fn find_target<'a>(
    states: &'a BTreeMap<String, PlayerState>,
    thrower: &str,
    range: Option<u32>,
) -> Option<&'a str> {
    let origin = states.get(thrower)?;
    let (dx, dy) = origin.direction.delta();

    states
        .iter()
        .filter(|(service, _)| service.as_str() != thrower)
        .filter_map(|(service, other)| {
            steps_along(origin.position(), (dx, dy), other.position())
                .map(|steps| (steps, service.as_str()))
        })
        .filter(|(steps, _)| range.is_none_or(|limit| *steps <= i64::from(limit)))
        .min()
        .map(|(_, service)| service)
}

// Number of unit steps from `origin` along `delta` to reach `cell`, if the
// cell is on the ray and in front of the origin.
fn steps_along(origin: (i32, i32), delta: (i32, i32), cell: (i32, i32)) -> Option<i64> {
    let ox = i64::from(cell.0) - i64::from(origin.0);
    let oy = i64::from(cell.1) - i64::from(origin.1);
    let (dx, dy) = (i64::from(delta.0), i64::from(delta.1));

    // Off-axis offsets must be zero for a cardinal ray.
    let steps = match (dx, dy) {
        (0, _) if ox == 0 => oy * dy,
        (_, 0) if oy == 0 => ox * dx,
        _ => return None,
    };
    (steps > 0).then_some(steps)
}
