use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::timer::Phase;

/// Every timer transition produces an Event.
///
/// The driver consumes them for logging and the notification side channel;
/// front-ends render them directly as JSON.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Event {
    TimerStarted {
        phase: Phase,
        seconds_remaining: u32,
        at: DateTime<Utc>,
    },
    /// `phase` is the active phase the pause interrupted.
    TimerPaused {
        phase: Phase,
        seconds_remaining: u32,
        at: DateTime<Utc>,
    },
    TimerResumed {
        phase: Phase,
        seconds_remaining: u32,
        at: DateTime<Utc>,
    },
    /// A countdown reached zero. The machine has already entered `next`
    /// when this fires.
    PhaseCompleted {
        completed: Phase,
        next: Phase,
        session_count: u32,
        at: DateTime<Utc>,
    },
    /// Manual forced transition, bypassing the countdown.
    TimerSkipped {
        from: Phase,
        to: Phase,
        session_count: u32,
        at: DateTime<Utc>,
    },
    TimerReset {
        at: DateTime<Utc>,
    },
    /// A new configuration was applied; the countdown was rescaled.
    ConfigReloaded {
        phase: Phase,
        seconds_remaining: u32,
        at: DateTime<Utc>,
    },
    StateSnapshot {
        phase: Phase,
        seconds_remaining: u32,
        session_count: u32,
        at: DateTime<Utc>,
    },
}
