//! Typed per-tick events emitted by the tick engine.
//!
//! Each tick yields an ordered `Vec<TickEvent>`; order is part of the
//! engine's behavioral contract. The [`fmt::Display`] impl produces the
//! operator-facing text the CLI joins into tick headers.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::ring::{Direction, Polarity};

/// One discrete event within a tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TickEvent {
    // --- Arrival ---
    /// The baton entered tile C holding a genuine prior polarity.
    Arrive,
    /// The pending jump consumed this arrival.
    Jump,

    // --- Act attempt ---
    /// Strict-boundary results at C's neighbors, left (B) then right (D).
    Boundary {
        /// Boundary held at B.
        left: bool,
        /// Boundary held at D.
        right: bool,
    },
    /// The act succeeded and mirrored shadow onto C's neighbors.
    ActSuccess,
    /// Repeat budget remaining after a success.
    RepeatsLeft {
        /// Successes still available.
        remaining: u32,
    },
    /// The protocol re-armed for another jump/act cycle.
    Rearm,
    /// The repeat budget ran out; the task is complete.
    Done,

    // --- Failure path ---
    /// The act failed; hesitation rose at C.
    Hesitate {
        /// Hesitation level after the increment.
        level: u8,
    },
    /// Travel direction reversed after a failure.
    Reverse {
        /// Direction for subsequent ticks.
        direction: Direction,
    },
    /// Consecutive-failure count after this failure.
    FailCount {
        /// Failures since the last success or escalation.
        count: u32,
    },
    /// The failure streak hit its threshold: forced park plus buffer flip.
    Escalate {
        /// Ticks the baton will stay parked.
        park: u32,
        /// Buffer polarity at C after the flip.
        buffer: Polarity,
    },

    // --- Cooldown ---
    /// The tick was consumed by an active park.
    Park {
        /// Park ticks remaining after this one.
        remaining: u32,
    },
}

impl fmt::Display for TickEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Arrive => f.write_str("ARRIVE_C"),
            Self::Jump => f.write_str("JUMP"),
            Self::Boundary { left, right } => {
                write!(f, "b(B)={} b(D)={}", held_text(*left), held_text(*right))
            }
            Self::ActSuccess => f.write_str("ACT✓ MIRROR"),
            Self::RepeatsLeft { remaining } => write!(f, "TTL→{remaining}"),
            Self::Rearm => f.write_str("RE-ARM"),
            Self::Done => f.write_str("DONE"),
            Self::Hesitate { level } => write!(f, "HESITATE E(C)={level}"),
            Self::Reverse { direction } => write!(f, "REV DIR→{direction}"),
            Self::FailCount { count } => write!(f, "FAIL→{count}"),
            Self::Escalate { park, buffer } => {
                write!(f, "ESCALATE PARK={park} buf(C)→{buffer}")
            }
            Self::Park { .. } => f.write_str("(PARK)"),
        }
    }
}

/// Boundary results render with capitalized truth text.
const fn held_text(held: bool) -> &'static str {
    if held { "True" } else { "False" }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn arrival_and_jump_text() {
        assert_eq!(TickEvent::Arrive.to_string(), "ARRIVE_C");
        assert_eq!(TickEvent::Jump.to_string(), "JUMP");
    }

    #[test]
    fn boundary_report_text() {
        let event = TickEvent::Boundary {
            left: false,
            right: true,
        };
        assert_eq!(event.to_string(), "b(B)=False b(D)=True");

        let flipped = TickEvent::Boundary {
            left: true,
            right: false,
        };
        assert_eq!(flipped.to_string(), "b(B)=True b(D)=False");
    }

    #[test]
    fn success_path_text() {
        assert_eq!(TickEvent::ActSuccess.to_string(), "ACT✓ MIRROR");
        assert_eq!(TickEvent::RepeatsLeft { remaining: 2 }.to_string(), "TTL→2");
        assert_eq!(TickEvent::Rearm.to_string(), "RE-ARM");
        assert_eq!(TickEvent::Done.to_string(), "DONE");
    }

    #[test]
    fn failure_path_text() {
        assert_eq!(TickEvent::Hesitate { level: 1 }.to_string(), "HESITATE E(C)=1");
        assert_eq!(
            TickEvent::Reverse {
                direction: Direction::CounterClockwise
            }
            .to_string(),
            "REV DIR→CCW"
        );
        assert_eq!(TickEvent::FailCount { count: 3 }.to_string(), "FAIL→3");
        assert_eq!(
            TickEvent::Escalate {
                park: 2,
                buffer: Polarity::Minus
            }
            .to_string(),
            "ESCALATE PARK=2 buf(C)→-"
        );
    }

    #[test]
    fn park_marker_hides_its_counter() {
        assert_eq!(TickEvent::Park { remaining: 1 }.to_string(), "(PARK)");
    }
}
