//! Deterministic tick engine for the Relay baton-ring simulation.
//!
//! One baton circulates a fixed six-tile ring. Every tick runs the same
//! phase order: shadow decay, park check, movement, arrival dispatch. A
//! genuine arrival at tile C drives the jump/act protocol, whose failures
//! accumulate hesitation, reverse travel, and eventually escalate into a
//! forced park with a buffer polarity flip.
//!
//! # Modules
//!
//! - [`boundary`] -- Effective values and the strict symmetry test.
//! - [`config`] -- Engine tunables: defaults, YAML loading, validation.
//! - [`engine`] -- Tick orchestration, the lazy run iterator, invariant
//!   enforcement.
//! - [`mover`] -- Baton release/acquire movement.
//! - [`shadow`] -- Shadow decay, latch, and hesitation.
//! - [`state`] -- The owned state aggregate shared by every component.
//! - [`task`] -- The jump/act/escalate/park protocol control block.

pub mod boundary;
pub mod config;
pub mod engine;
pub mod mover;
pub mod shadow;
pub mod state;
pub mod task;
