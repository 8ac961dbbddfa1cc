//! Effective values and the strict symmetry test.
//!
//! Pure reads over [`RingState`]; nothing here mutates. Determinism matters:
//! the act gate calls [`strict_boundary`] twice per attempt and both calls
//! must see identical state.

use relay_types::{Polarity, Position};

use crate::state::RingState;

/// The value a tile contributes to boundary checks: its buffer while in
/// transit, otherwise its committed polarity.
pub fn effective_value(state: &RingState, pos: Position) -> Polarity {
    state.committed(pos).unwrap_or_else(|| state.buffer(pos))
}

/// Strict boundary at `pos`: the two neighbors' effective values cancel.
///
/// The act gate evaluates this at C's own neighbors (B and D), so the test
/// reaches two hops out from C: A against C around B, and C against E
/// around D. While the baton sits on C, C contributes its buffer.
pub fn strict_boundary(state: &RingState, pos: Position) -> bool {
    let left = effective_value(state, pos.left()).signum();
    let right = effective_value(state, pos.right()).signum();
    left.saturating_add(right) == 0
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn committed_tiles_contribute_their_committed_polarity() {
        let state = RingState::new(Position::A);
        assert_eq!(effective_value(&state, Position::B), Polarity::Plus);
        assert_eq!(effective_value(&state, Position::E), Polarity::Minus);
    }

    #[test]
    fn the_transit_tile_contributes_its_buffer() {
        let mut state = RingState::new(Position::C);
        assert_eq!(effective_value(&state, Position::C), Polarity::Plus);
        state.flip_buffer(Position::C);
        assert_eq!(effective_value(&state, Position::C), Polarity::Minus);
    }

    #[test]
    fn boundary_holds_where_neighbors_cancel() {
        // Fresh ring, baton on C. Around D: C contributes +, E contributes -.
        let state = RingState::new(Position::C);
        assert!(strict_boundary(&state, Position::D));
        // Around B: A contributes +, C contributes its + buffer.
        assert!(!strict_boundary(&state, Position::B));
    }

    #[test]
    fn boundary_follows_the_buffer_after_a_flip() {
        let mut state = RingState::new(Position::C);
        state.flip_buffer(Position::C);
        assert!(strict_boundary(&state, Position::B));
        assert!(!strict_boundary(&state, Position::D));
    }

    #[test]
    fn boundary_is_pure() {
        let state = RingState::new(Position::C);
        let before = state.snapshot(relay_types::Direction::Clockwise, 0);
        let first = strict_boundary(&state, Position::B);
        let second = strict_boundary(&state, Position::B);
        assert_eq!(first, second);
        assert_eq!(state.snapshot(relay_types::Direction::Clockwise, 0), before);
    }
}
