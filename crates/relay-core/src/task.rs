//! The jump/act/escalate/park protocol that consumes arrivals at tile C.
//!
//! The control block never drives the tick; the engine detects a genuine
//! arrival and hands the tick's event buffer to [`Task::on_arrival`]. Event
//! emission order inside an arrival is part of the behavioral contract.

use relay_types::{Direction, Position, TickEvent};
use tracing::{debug, info};

use crate::boundary;
use crate::config::SimConfig;
use crate::shadow;
use crate::state::RingState;

/// Tile where the protocol runs.
pub const TASK_TILE: Position = Position::C;

/// Derived protocol phase; computed from the control block, never stored.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TaskPhase {
    /// A park is consuming ticks; the baton does not move.
    Parked,
    /// The next arrival at C will be consumed by a jump.
    AwaitingJump,
    /// The next arrival at C will attempt the act.
    AwaitingAct,
    /// The repeat budget is exhausted; arrivals are ignored.
    Done,
}

/// Control block for the arrival protocol.
#[derive(Debug, Clone)]
pub struct Task {
    /// Whether the protocol still reacts to arrivals.
    pub(crate) active: bool,
    /// Whether the next arrival is consumed by a jump.
    pub(crate) pending_jump: bool,
    /// Successes still available.
    pub(crate) repeats_remaining: u32,
    /// Consecutive failures since the last success or escalation.
    pub(crate) fail_count: u32,
    /// Travel direction for the next move.
    pub(crate) direction: Direction,
    /// Failure streak length that triggers an escalation.
    pub(crate) fail_threshold: u32,
    /// Park length applied by an escalation.
    pub(crate) park_duration: u32,
    /// Park ticks left to consume.
    pub(crate) park_remaining: u32,
}

impl Task {
    /// Fresh control block, armed for the first jump.
    pub const fn new(config: &SimConfig) -> Self {
        Self {
            active: true,
            pending_jump: true,
            repeats_remaining: config.repeat_budget,
            fail_count: 0,
            direction: config.initial_direction,
            fail_threshold: config.fail_threshold,
            park_duration: config.park_duration,
            park_remaining: 0,
        }
    }

    /// Current derived phase. An active park shadows every other phase.
    pub const fn phase(&self) -> TaskPhase {
        if self.park_remaining > 0 {
            TaskPhase::Parked
        } else if !self.active {
            TaskPhase::Done
        } else if self.pending_jump {
            TaskPhase::AwaitingJump
        } else {
            TaskPhase::AwaitingAct
        }
    }

    /// Travel direction for the next move.
    pub const fn direction(&self) -> Direction {
        self.direction
    }

    /// Park ticks left to consume.
    pub const fn park_remaining(&self) -> u32 {
        self.park_remaining
    }

    /// Whether the protocol still reacts to arrivals.
    pub const fn is_active(&self) -> bool {
        self.active
    }

    /// Whether the next arrival is consumed by a jump.
    pub const fn jump_pending(&self) -> bool {
        self.pending_jump
    }

    /// Successes still available.
    pub const fn repeats_remaining(&self) -> u32 {
        self.repeats_remaining
    }

    /// Consecutive failures since the last success or escalation.
    pub const fn fail_count(&self) -> u32 {
        self.fail_count
    }

    /// Consumes one parked tick, returning the count remaining after it.
    pub(crate) const fn consume_park_tick(&mut self) -> u32 {
        self.park_remaining = self.park_remaining.saturating_sub(1);
        self.park_remaining
    }

    /// Handles a genuine arrival at [`TASK_TILE`].
    ///
    /// The engine guarantees the baton's destination this tick is C and the
    /// destination previously held a real polarity. A completed task
    /// ignores the arrival entirely (no events); a pending jump consumes
    /// it; otherwise the act gate runs.
    pub(crate) fn on_arrival(
        &mut self,
        state: &mut RingState,
        config: &SimConfig,
        events: &mut Vec<TickEvent>,
    ) {
        if !self.active {
            return;
        }
        events.push(TickEvent::Arrive);

        if self.pending_jump {
            self.pending_jump = false;
            events.push(TickEvent::Jump);
            debug!("Jump consumed the arrival");
            return;
        }

        let left_ok = boundary::strict_boundary(state, TASK_TILE.left());
        let right_ok = boundary::strict_boundary(state, TASK_TILE.right());
        events.push(TickEvent::Boundary {
            left: left_ok,
            right: right_ok,
        });

        if left_ok && right_ok {
            self.apply_success(state, config, events);
        } else {
            self.apply_failure(state, config, events);
        }
    }

    /// Mirror pulse onto C's neighbors, budget bookkeeping, re-arm or
    /// complete.
    fn apply_success(
        &mut self,
        state: &mut RingState,
        config: &SimConfig,
        events: &mut Vec<TickEvent>,
    ) {
        shadow::latch(state, TASK_TILE.left(), config.latch_floor);
        shadow::latch(state, TASK_TILE.right(), config.latch_floor);
        shadow::reset(state, TASK_TILE);
        self.fail_count = 0;
        self.repeats_remaining = self.repeats_remaining.saturating_sub(1);
        events.push(TickEvent::ActSuccess);
        events.push(TickEvent::RepeatsLeft {
            remaining: self.repeats_remaining,
        });

        if self.repeats_remaining > 0 {
            self.pending_jump = true;
            events.push(TickEvent::Rearm);
            debug!(
                remaining = self.repeats_remaining,
                "Act succeeded, protocol re-armed"
            );
        } else {
            self.active = false;
            self.pending_jump = false;
            events.push(TickEvent::Done);
            info!("Repeat budget exhausted, task complete");
        }
    }

    /// Hesitation at C, direction reversal, failure accounting, and the
    /// escalation once the streak hits the threshold.
    fn apply_failure(
        &mut self,
        state: &mut RingState,
        config: &SimConfig,
        events: &mut Vec<TickEvent>,
    ) {
        shadow::hesitate(state, TASK_TILE, config.hesitation_cap);
        events.push(TickEvent::Hesitate {
            level: state.shadow(TASK_TILE),
        });
        self.direction = self.direction.reversed();
        self.fail_count = self.fail_count.saturating_add(1);
        events.push(TickEvent::Reverse {
            direction: self.direction,
        });
        events.push(TickEvent::FailCount {
            count: self.fail_count,
        });

        if self.fail_count >= self.fail_threshold {
            self.park_remaining = self.park_duration;
            self.fail_count = 0;
            state.flip_buffer(TASK_TILE);
            events.push(TickEvent::Escalate {
                park: self.park_duration,
                buffer: state.buffer(TASK_TILE),
            });
            debug!(park = self.park_duration, "Failure streak escalated");
        }
    }
}
