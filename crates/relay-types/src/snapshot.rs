//! The full state view emitted after every tick.

use serde::{Deserialize, Serialize};

use crate::ring::{Direction, Polarity, Position, TileMap};

/// Complete engine state visible to consumers after a tick.
///
/// Snapshots are plain data: the renderer and the stream mode read them and
/// never reach back into engine state. `committed` uses `None` as the
/// in-transit (zero) marker; exactly one tile holds it at any time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RingSnapshot {
    /// Committed polarity per tile; `None` marks the baton's tile.
    pub committed: TileMap<Option<Polarity>>,
    /// Buffered polarity per tile.
    pub buffers: TileMap<Polarity>,
    /// Shadow/hesitation level per tile.
    pub shadows: TileMap<u8>,
    /// Tile currently holding the baton.
    pub baton: Position,
    /// Travel direction for the next non-parked tick.
    pub direction: Direction,
    /// Cooldown ticks remaining before the baton moves again.
    pub park_remaining: u32,
}
