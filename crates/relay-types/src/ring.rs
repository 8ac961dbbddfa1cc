//! The fixed six-tile ring: positions, topology, polarity, direction, and
//! per-tile storage.
//!
//! The ring never changes size. Neighbor lookup, domain signs, and the
//! [`TileMap`] accessors are all exhaustive matches over the six tiles, so
//! every operation here is total and panic-free. A variable ring size would
//! replace these tables with modular index arithmetic; nothing else in the
//! workspace assumes more than the neighbor relation.

use std::fmt;

use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Positions
// ---------------------------------------------------------------------------

/// A tile on the fixed six-tile ring.
///
/// Tiles are arranged in a circle in declaration order: clockwise travel
/// runs A → B → C → D → E → F → A. Tile C is where the task protocol fires.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Position {
    /// Tile A (positive domain).
    A,
    /// Tile B (positive domain).
    B,
    /// Tile C (positive domain); the protocol tile.
    C,
    /// Tile D (negative domain).
    D,
    /// Tile E (negative domain).
    E,
    /// Tile F (negative domain).
    F,
}

impl Position {
    /// Every tile in clockwise ring order.
    pub const ALL: [Self; 6] = [Self::A, Self::B, Self::C, Self::D, Self::E, Self::F];

    /// Number of tiles on the ring.
    pub const RING_LEN: usize = 6;

    /// The counter-clockwise neighbor.
    pub const fn left(self) -> Self {
        match self {
            Self::A => Self::F,
            Self::B => Self::A,
            Self::C => Self::B,
            Self::D => Self::C,
            Self::E => Self::D,
            Self::F => Self::E,
        }
    }

    /// The clockwise neighbor.
    pub const fn right(self) -> Self {
        match self {
            Self::A => Self::B,
            Self::B => Self::C,
            Self::C => Self::D,
            Self::D => Self::E,
            Self::E => Self::F,
            Self::F => Self::A,
        }
    }

    /// One step in the given movement direction.
    pub const fn step(self, direction: Direction) -> Self {
        match direction {
            Direction::Clockwise => self.right(),
            Direction::CounterClockwise => self.left(),
        }
    }

    /// The tile's static default polarity: positive for A..C, negative for
    /// D..F. Fixed for the life of the simulation.
    pub const fn domain_sign(self) -> Polarity {
        match self {
            Self::A | Self::B | Self::C => Polarity::Plus,
            Self::D | Self::E | Self::F => Polarity::Minus,
        }
    }

    /// Single-letter tile name.
    pub const fn name(self) -> &'static str {
        match self {
            Self::A => "A",
            Self::B => "B",
            Self::C => "C",
            Self::D => "D",
            Self::E => "E",
            Self::F => "F",
        }
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

// ---------------------------------------------------------------------------
// Direction
// ---------------------------------------------------------------------------

/// Baton travel direction around the ring.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    /// A → B → C → D → E → F → A.
    Clockwise,
    /// A → F → E → D → C → B → A.
    CounterClockwise,
}

impl Direction {
    /// The opposite travel direction.
    pub const fn reversed(self) -> Self {
        match self {
            Self::Clockwise => Self::CounterClockwise,
            Self::CounterClockwise => Self::Clockwise,
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Clockwise => f.write_str("CW"),
            Self::CounterClockwise => f.write_str("CCW"),
        }
    }
}

// ---------------------------------------------------------------------------
// Polarity
// ---------------------------------------------------------------------------

/// A committed or buffered tile polarity.
///
/// Tiles never hold a neutral value of their own; the neutral (zero) marker
/// is the baton itself, modeled as `Option::None` in committed state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Polarity {
    /// Positive polarity (+1).
    Plus,
    /// Negative polarity (-1).
    Minus,
}

impl Polarity {
    /// Signed numeric value, +1 or -1.
    pub const fn signum(self) -> i8 {
        match self {
            Self::Plus => 1,
            Self::Minus => -1,
        }
    }

    /// The opposite polarity.
    pub const fn flipped(self) -> Self {
        match self {
            Self::Plus => Self::Minus,
            Self::Minus => Self::Plus,
        }
    }

    /// Single-character mark used in frames and event text.
    pub const fn glyph(self) -> char {
        match self {
            Self::Plus => '+',
            Self::Minus => '-',
        }
    }
}

impl fmt::Display for Polarity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.glyph())
    }
}

// ---------------------------------------------------------------------------
// Per-tile storage
// ---------------------------------------------------------------------------

/// Per-tile storage keyed by [`Position`].
///
/// The map always holds exactly one value per tile, so lookups are total:
/// no `Option` returns, no panics. Entries iterate in clockwise ring order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TileMap<T>([T; Position::RING_LEN]);

impl<T> TileMap<T> {
    /// Builds a map by evaluating `f` at every tile in ring order.
    pub fn from_fn(f: impl FnMut(Position) -> T) -> Self {
        Self(Position::ALL.map(f))
    }

    /// Shared access to the value at `pos`.
    pub const fn get(&self, pos: Position) -> &T {
        match pos {
            Position::A => &self.0[0],
            Position::B => &self.0[1],
            Position::C => &self.0[2],
            Position::D => &self.0[3],
            Position::E => &self.0[4],
            Position::F => &self.0[5],
        }
    }

    /// Exclusive access to the value at `pos`.
    pub const fn get_mut(&mut self, pos: Position) -> &mut T {
        match pos {
            Position::A => &mut self.0[0],
            Position::B => &mut self.0[1],
            Position::C => &mut self.0[2],
            Position::D => &mut self.0[3],
            Position::E => &mut self.0[4],
            Position::F => &mut self.0[5],
        }
    }

    /// Iterates `(tile, value)` entries in ring order.
    pub fn iter(&self) -> TileEntries<'_, T> {
        self.into_iter()
    }
}

/// Iterator over the `(tile, value)` entries of a [`TileMap`].
pub type TileEntries<'a, T> =
    std::iter::Zip<std::array::IntoIter<Position, 6>, std::slice::Iter<'a, T>>;

impl<'a, T> IntoIterator for &'a TileMap<T> {
    type Item = (Position, &'a T);
    type IntoIter = TileEntries<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        Position::ALL.into_iter().zip(self.0.iter())
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
