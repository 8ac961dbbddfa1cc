//! Tick orchestration: decay, park handling, movement, arrival dispatch,
//! and the lazy run iterator.
//!
//! The phase order inside [`Engine::step`] is the behavioral contract:
//! shadows decay first (parked or not), an active park consumes the tick
//! before any movement, and the arrival protocol runs only when the baton's
//! destination is C with a genuine prior polarity.

use relay_types::{Position, RingSnapshot, TickEvent};
use serde::Serialize;
use tracing::debug;

use crate::config::{ConfigError, SimConfig};
use crate::mover;
use crate::shadow;
use crate::state::{RingState, StateError};
use crate::task::{TASK_TILE, Task};

/// Errors that abort a run.
#[derive(Debug, thiserror::Error)]
pub enum EngineError {
    /// The tick counter would overflow.
    #[error("tick counter overflow")]
    TickOverflow,

    /// Defensive state verification failed after a move.
    #[error("state invariant violated at tick {tick}: {source}")]
    Invariant {
        /// Tick during which verification failed.
        tick: u64,
        /// The violated invariant.
        source: StateError,
    },
}

/// One tick's output: counter, ordered events, and the post-tick snapshot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TickReport {
    /// 1-based tick number.
    pub tick: u64,
    /// Events in emission order.
    pub events: Vec<TickEvent>,
    /// Full state after the tick.
    pub snapshot: RingSnapshot,
}

/// The deterministic tick engine.
///
/// Owns the ring state and the task control block. The baton starts on tile
/// A with every other tile committed to its domain sign; the first tick
/// moves it.
#[derive(Debug)]
pub struct Engine {
    pub(crate) config: SimConfig,
    pub(crate) state: RingState,
    pub(crate) task: Task,
    pub(crate) tick: u64,
}

impl Engine {
    /// Builds an engine from a configuration.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Invalid`] when the configuration fails
    /// validation; the engine never starts on bad config.
    pub fn new(config: SimConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        let task = Task::new(&config);
        Ok(Self {
            config,
            state: RingState::new(Position::A),
            task,
            tick: 0,
        })
    }

    /// Ticks completed so far.
    pub const fn tick(&self) -> u64 {
        self.tick
    }

    /// The engine's configuration.
    pub const fn config(&self) -> &SimConfig {
        &self.config
    }

    /// Read access to the ring state.
    pub const fn state(&self) -> &RingState {
        &self.state
    }

    /// Read access to the task control block.
    pub const fn task(&self) -> &Task {
        &self.task
    }

    /// Current state view; also valid before the first tick.
    pub const fn snapshot(&self) -> RingSnapshot {
        self.state
            .snapshot(self.task.direction(), self.task.park_remaining())
    }

    /// Advances exactly one tick.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::TickOverflow`] if the tick counter is
    /// exhausted and [`EngineError::Invariant`] if post-move verification
    /// finds the ring in an impossible state; both abort the run.
    pub fn step(&mut self) -> Result<TickReport, EngineError> {
        self.tick = self
            .tick
            .checked_add(1)
            .ok_or(EngineError::TickOverflow)?;
        let mut events = Vec::new();

        // --- Phase 1: shadow decay (runs even while parked) ---
        shadow::decay_all(&mut self.state);

        // --- Phase 2: park check ---
        if self.task.park_remaining() > 0 {
            let remaining = self.task.consume_park_tick();
            events.push(TickEvent::Park { remaining });
            debug!(tick = self.tick, remaining, "Parked tick, baton held");
            return Ok(self.report(events));
        }

        // --- Phase 3: movement ---
        let prev = mover::advance(&mut self.state, self.task.direction());
        self.state
            .verify_baton_invariant()
            .map_err(|source| EngineError::Invariant {
                tick: self.tick,
                source,
            })?;

        // --- Phase 4: arrival dispatch ---
        if self.state.baton() == TASK_TILE && prev.is_some() {
            self.task
                .on_arrival(&mut self.state, &self.config, &mut events);
        }

        debug!(
            tick = self.tick,
            baton = %self.state.baton(),
            events = events.len(),
            "Tick complete"
        );
        Ok(self.report(events))
    }

    /// Consumes the engine into a lazy run of `config.ticks` ticks.
    pub const fn run(self) -> Ticks {
        let remaining = self.config.ticks;
        Ticks {
            engine: self,
            remaining,
        }
    }

    const fn report(&self, events: Vec<TickEvent>) -> TickReport {
        TickReport {
            tick: self.tick,
            events,
            snapshot: self.snapshot(),
        }
    }
}

/// Lazy tick iterator produced by [`Engine::run`].
///
/// Yields one [`TickReport`] per tick up to the configured tick count. An
/// engine error is yielded once and ends the run.
#[derive(Debug)]
pub struct Ticks {
    engine: Engine,
    remaining: u64,
}

impl Ticks {
    /// Read access to the engine mid-run.
    pub const fn engine(&self) -> &Engine {
        &self.engine
    }
}

impl Iterator for Ticks {
    type Item = Result<TickReport, EngineError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            return None;
        }
        self.remaining = self.remaining.saturating_sub(1);
        let step = self.engine.step();
        if step.is_err() {
            self.remaining = 0;
        }
        Some(step)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let upper = usize::try_from(self.remaining).ok();
        (0, upper)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use relay_types::{Direction, Polarity};

    use super::*;

    fn make_engine() -> Engine {
        Engine::new(SimConfig::default()).unwrap()
    }

    #[test]
    fn construction_rejects_invalid_config() {
        let config = SimConfig {
            ticks: 0,
            ..SimConfig::default()
        };
        assert!(matches!(
            Engine::new(config),
            Err(ConfigError::Invalid { .. })
        ));
    }

    #[test]
    fn snapshot_before_the_first_tick() {
        let engine = make_engine();
        let snapshot = engine.snapshot();
        assert_eq!(snapshot.baton, Position::A);
        assert_eq!(snapshot.direction, Direction::Clockwise);
        assert_eq!(snapshot.park_remaining, 0);
        assert_eq!(*snapshot.committed.get(Position::A), None);
    }

    #[test]
    fn tick_one_moves_without_events() {
        let mut engine = make_engine();
        let report = engine.step().unwrap();
        assert_eq!(report.tick, 1);
        assert!(report.events.is_empty());
        assert_eq!(report.snapshot.baton, Position::B);
        assert_eq!(
            *report.snapshot.committed.get(Position::A),
            Some(Polarity::Plus)
        );
    }

    #[test]
    fn tick_two_arrives_at_c_and_jumps() {
        let mut engine = make_engine();
        engine.step().unwrap();
        let report = engine.step().unwrap();
        assert_eq!(report.tick, 2);
        assert_eq!(report.events, vec![TickEvent::Arrive, TickEvent::Jump]);
        assert_eq!(report.snapshot.baton, Position::C);
        assert!(!engine.task().jump_pending());
        assert_eq!(engine.task().repeats_remaining(), 3);
    }

    #[test]
    fn decay_runs_before_the_park_skip() {
        let mut engine = make_engine();
        *engine.state.shadows.get_mut(Position::C) = 3;
        engine.task.park_remaining = 2;

        let report = engine.step().unwrap();

        assert_eq!(report.events, vec![TickEvent::Park { remaining: 1 }]);
        assert_eq!(*report.snapshot.shadows.get(Position::C), 2);
        assert_eq!(report.snapshot.baton, Position::A);
    }

    #[test]
    fn park_freezes_movement_until_it_drains() {
        let mut engine = make_engine();
        engine.task.park_remaining = 2;
        let direction = engine.task().direction();

        let first = engine.step().unwrap();
        assert_eq!(first.snapshot.baton, Position::A);
        assert_eq!(first.snapshot.direction, direction);
        assert_eq!(first.snapshot.park_remaining, 1);

        let second = engine.step().unwrap();
        assert_eq!(second.snapshot.baton, Position::A);
        assert_eq!(second.snapshot.park_remaining, 0);

        let third = engine.step().unwrap();
        assert_eq!(third.snapshot.baton, Position::B);
    }

    #[test]
    fn invariant_violation_aborts_with_the_tick() {
        let mut engine = make_engine();
        *engine.state.committed.get_mut(Position::D) = None;

        let err = engine.step().unwrap_err();
        assert!(matches!(err, EngineError::Invariant { tick: 1, .. }));
    }

    #[test]
    fn tick_counter_overflow_is_an_error() {
        let mut engine = make_engine();
        engine.tick = u64::MAX;
        assert!(matches!(engine.step(), Err(EngineError::TickOverflow)));
    }

    #[test]
    fn run_yields_exactly_the_configured_tick_count() {
        let config = SimConfig {
            ticks: 5,
            ..SimConfig::default()
        };
        let engine = Engine::new(config).unwrap();
        let reports: Vec<_> = engine.run().collect::<Result<_, _>>().unwrap();
        assert_eq!(reports.len(), 5);
        assert_eq!(reports.last().unwrap().tick, 5);
    }

    #[test]
    fn run_stops_after_yielding_an_error() {
        let config = SimConfig {
            ticks: 10,
            ..SimConfig::default()
        };
        let mut engine = Engine::new(config).unwrap();
        *engine.state.committed.get_mut(Position::D) = None;

        let mut ticks = engine.run();
        assert!(ticks.next().unwrap().is_err());
        assert!(ticks.next().is_none());
    }

    #[test]
    fn mid_run_engine_access_reflects_progress() {
        let config = SimConfig {
            ticks: 3,
            ..SimConfig::default()
        };
        let engine = Engine::new(config).unwrap();
        let mut ticks = engine.run();
        ticks.next().unwrap().unwrap();
        assert_eq!(ticks.engine().tick(), 1);
    }
}
