//! Baton movement: release the old tile, acquire the next.

use relay_types::{Direction, Polarity};

use crate::state::RingState;

/// Moves the baton one step in `direction`.
///
/// The released tile always returns to its static domain sign, discarding
/// any transient inversion it held when acquired; polarity history is not
/// preserved. Returns the destination's committed polarity from before
/// acquisition. `None` would mean the destination was already in transit,
/// which the single-baton invariant rules out on a six-tile ring.
pub const fn advance(state: &mut RingState, direction: Direction) -> Option<Polarity> {
    let from = state.baton;
    let to = from.step(direction);
    *state.committed.get_mut(from) = Some(from.domain_sign());
    let prev = *state.committed.get(to);
    *state.committed.get_mut(to) = None;
    state.baton = to;
    prev
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use relay_types::Position;

    use super::*;

    #[test]
    fn advance_steps_clockwise_and_reports_the_prior_polarity() {
        let mut state = RingState::new(Position::A);
        let prev = advance(&mut state, Direction::Clockwise);
        assert_eq!(prev, Some(Polarity::Plus));
        assert_eq!(state.baton(), Position::B);
        assert_eq!(state.committed(Position::B), None);
        assert_eq!(state.committed(Position::A), Some(Polarity::Plus));
        state.verify_baton_invariant().unwrap();
    }

    #[test]
    fn advance_steps_counter_clockwise_across_the_seam() {
        let mut state = RingState::new(Position::A);
        let prev = advance(&mut state, Direction::CounterClockwise);
        assert_eq!(prev, Some(Polarity::Minus));
        assert_eq!(state.baton(), Position::F);
        assert_eq!(state.committed(Position::F), None);
        assert_eq!(state.committed(Position::A), Some(Polarity::Plus));
        state.verify_baton_invariant().unwrap();
    }

    #[test]
    fn release_restores_the_domain_sign_not_the_prior_value() {
        // Tile D is transiently inverted to Plus. The baton passes through;
        // release writes D's domain sign, not the inverted value it held.
        let mut state = RingState::new(Position::C);
        *state.committed.get_mut(Position::D) = Some(Polarity::Plus);

        let prev = advance(&mut state, Direction::Clockwise);
        assert_eq!(prev, Some(Polarity::Plus));

        advance(&mut state, Direction::Clockwise);
        assert_eq!(state.committed(Position::D), Some(Polarity::Minus));
    }

    #[test]
    fn a_full_lap_returns_home() {
        let mut state = RingState::new(Position::A);
        for _ in 0..Position::RING_LEN {
            advance(&mut state, Direction::Clockwise);
            state.verify_baton_invariant().unwrap();
        }
        assert_eq!(state.baton(), Position::A);
        for pos in [Position::B, Position::C, Position::D, Position::E, Position::F] {
            assert_eq!(state.committed(pos), Some(pos.domain_sign()));
        }
    }
}
