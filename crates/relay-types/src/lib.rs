//! Shared type definitions for the Relay baton-ring simulation.
//!
//! This crate is the single source of truth for the vocabulary used across
//! the Relay workspace: the fixed six-tile ring, polarities, movement
//! direction, the per-tick event stream, and the state snapshot consumers
//! render from.
//!
//! # Modules
//!
//! - [`ring`] -- The fixed ring: positions, topology, polarity, direction,
//!   and per-tile storage
//! - [`events`] -- Typed per-tick events with operator-facing rendering
//! - [`snapshot`] -- The full state view emitted after every tick

pub mod events;
pub mod ring;
pub mod snapshot;

// Re-export all public types at crate root for convenience.
pub use events::TickEvent;
pub use ring::{Direction, Polarity, Position, TileMap};
pub use snapshot::RingSnapshot;
