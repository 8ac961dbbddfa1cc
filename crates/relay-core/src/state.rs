//! The owned state aggregate: committed polarities, buffers, shadows, and
//! the baton location.
//!
//! One [`RingState`] value is owned by the engine and passed by reference to
//! every component operation. There are no globals and no interior
//! mutability; fields are crate-internal so each component mutates exactly
//! the fields its contract names.

use relay_types::{Direction, Polarity, Position, RingSnapshot, TileMap};

/// Errors surfaced by defensive state verification.
#[derive(Debug, thiserror::Error)]
pub enum StateError {
    /// The ring does not hold exactly one in-transit tile.
    #[error("single-baton invariant violated: {count} tiles in transit, expected exactly 1")]
    BatonCount {
        /// Tiles currently holding the in-transit marker.
        count: usize,
    },

    /// The recorded baton tile does not hold the in-transit marker.
    #[error("single-baton invariant violated: baton recorded at {recorded}, marker found at {actual}")]
    BatonMismatch {
        /// Where the state records the baton.
        recorded: Position,
        /// Where the in-transit marker actually sits.
        actual: Position,
    },
}

/// Mutable simulation state shared by every engine component.
///
/// `committed` uses `None` as the in-transit (zero) marker; exactly one tile
/// holds it at any time. The mover owns `committed` and `baton`, the shadow
/// subsystem owns `shadows`, and the task controller's escalation owns
/// `buffers` flips.
#[derive(Debug, Clone)]
pub struct RingState {
    pub(crate) committed: TileMap<Option<Polarity>>,
    pub(crate) buffers: TileMap<Polarity>,
    pub(crate) shadows: TileMap<u8>,
    pub(crate) baton: Position,
}

impl RingState {
    /// Fresh ring: every tile committed to its domain sign, buffers at
    /// domain signs, shadows clear, and the baton holding `start`.
    pub fn new(start: Position) -> Self {
        let mut committed = TileMap::from_fn(|pos| Some(pos.domain_sign()));
        *committed.get_mut(start) = None;
        Self {
            committed,
            buffers: TileMap::from_fn(Position::domain_sign),
            shadows: TileMap::from_fn(|_| 0),
            baton: start,
        }
    }

    /// Committed polarity at `pos`; `None` while the tile is in transit.
    pub const fn committed(&self, pos: Position) -> Option<Polarity> {
        *self.committed.get(pos)
    }

    /// Buffered polarity at `pos`.
    pub const fn buffer(&self, pos: Position) -> Polarity {
        *self.buffers.get(pos)
    }

    /// Shadow/hesitation level at `pos`.
    pub const fn shadow(&self, pos: Position) -> u8 {
        *self.shadows.get(pos)
    }

    /// Tile currently holding the baton.
    pub const fn baton(&self) -> Position {
        self.baton
    }

    /// Flips the buffered polarity at `pos` (escalation effect).
    pub(crate) const fn flip_buffer(&mut self, pos: Position) {
        let buffer = self.buffers.get_mut(pos);
        *buffer = buffer.flipped();
    }

    /// Checks that exactly one tile is in transit and that it matches the
    /// recorded baton position.
    ///
    /// # Errors
    ///
    /// Returns [`StateError::BatonCount`] when zero or multiple tiles carry
    /// the in-transit marker, and [`StateError::BatonMismatch`] when the
    /// single marker sits on a different tile than recorded.
    pub fn verify_baton_invariant(&self) -> Result<(), StateError> {
        let mut count = 0_usize;
        let mut found = None;
        for pos in Position::ALL {
            if self.committed.get(pos).is_none() {
                count = count.saturating_add(1);
                found = Some(pos);
            }
        }
        match found {
            Some(actual) if count == 1 && actual == self.baton => Ok(()),
            Some(actual) if count == 1 => Err(StateError::BatonMismatch {
                recorded: self.baton,
                actual,
            }),
            _ => Err(StateError::BatonCount { count }),
        }
    }

    /// Full state view for consumers.
    pub const fn snapshot(&self, direction: Direction, park_remaining: u32) -> RingSnapshot {
        RingSnapshot {
            committed: self.committed,
            buffers: self.buffers,
            shadows: self.shadows,
            baton: self.baton,
            direction,
            park_remaining,
        }
    }
}
