//! Shadow decay, latch, and hesitation over the ring's per-tile levels.
//!
//! Levels live in `[0, cap]`. Decay runs once per tick for every tile,
//! parked or not; latch (the mirror pulse) and hesitation are the only
//! raises. Configuration guarantees the latch floor never exceeds the cap,
//! so no operation here can push a level out of range.

use relay_types::Position;

use crate::state::RingState;

/// Decays every tile's shadow level by one, flooring at zero.
pub fn decay_all(state: &mut RingState) {
    for pos in Position::ALL {
        let level = state.shadows.get_mut(pos);
        *level = level.saturating_sub(1);
    }
}

/// Raises the level at `pos` to at least `floor` (the mirror pulse).
pub const fn latch(state: &mut RingState, pos: Position, floor: u8) {
    let level = state.shadows.get_mut(pos);
    if *level < floor {
        *level = floor;
    }
}

/// Raises hesitation at `pos` by one, saturating at `cap`.
pub fn hesitate(state: &mut RingState, pos: Position, cap: u8) {
    let level = state.shadows.get_mut(pos);
    *level = level.saturating_add(1).min(cap);
}

/// Clears the level at `pos`.
pub const fn reset(state: &mut RingState, pos: Position) {
    *state.shadows.get_mut(pos) = 0;
}
