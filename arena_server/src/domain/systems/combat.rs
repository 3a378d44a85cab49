use std::collections::BTreeMap;
use std::time::Duration;

/// A throw that found a target this tick.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Throw {
    pub thrower: String,
    pub target: String,
    pub latency: Duration,
}

/// Returns the throws that land.
///
/// Throws are independent except for mutual exchanges, where two players
/// target each other in the same tick. Only the faster reply of an exchange
/// lands; on equal latency the thrower whose service identity sorts first
/// wins. A player being hit by someone else does not cancel their own throw.
pub fn arbitrate(throws: &[Throw]) -> Vec<&Throw> {
    let by_thrower: BTreeMap<&str, &Throw> =
        throws.iter().map(|t| (t.thrower.as_str(), t)).collect();

    throws
        .iter()
        .filter(|throw| match by_thrower.get(throw.target.as_str()) {
            Some(counter) if counter.target == throw.thrower => wins_exchange(throw, counter),
            _ => true,
        })
        .collect()
}

fn wins_exchange(throw: &Throw, counter: &Throw) -> bool {
    (throw.latency, &throw.thrower) < (counter.latency, &counter.thrower)
}
