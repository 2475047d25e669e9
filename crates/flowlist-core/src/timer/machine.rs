//! Focus timer state machine.
//!
//! The timer is tick-driven: it owns no clock and no thread. The caller
//! drives it with one `tick()` per elapsed second while a phase is active,
//! and stops ticking in `Stopped`/`Paused` (exactly one tick source at a
//! time; leaving an active phase cancels it, re-entering starts a new one).
//!
//! ## Phases
//!
//! ```text
//! Stopped -> Work -> (ShortBreak | LongBreak) -> Work -> ...
//!                \-> Paused -> (back into the paused phase)
//! ```
//!
//! Pausing remembers the interrupted phase; `start()` resumes into it with
//! its remaining time intact. Applying a new configuration mid-countdown
//! rescales the remaining time to the new full duration of the current
//! phase, so the countdown can jump in either direction ("latest reload
//! wins").

use chrono::Utc;
use serde::{Deserialize, Serialize};
use std::fmt;

use super::cadence::next_break_phase;
use crate::events::Event;
use crate::settings::TimerConfig;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Phase {
    Stopped,
    Work,
    ShortBreak,
    LongBreak,
    Paused,
}

impl Phase {
    /// A phase whose countdown is running.
    pub fn is_active(self) -> bool {
        matches!(self, Phase::Work | Phase::ShortBreak | Phase::LongBreak)
    }
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Phase::Stopped => "stopped",
            Phase::Work => "work",
            Phase::ShortBreak => "short break",
            Phase::LongBreak => "long break",
            Phase::Paused => "paused",
        };
        f.write_str(label)
    }
}

/// Focus/break countdown state machine.
///
/// Run state is process-local and never persisted. `session_count` is
/// incremented exactly once per completed work phase, on the transition
/// out of `Work`.
#[derive(Debug, Clone)]
pub struct FocusTimer {
    config: TimerConfig,
    phase: Phase,
    /// The active phase a pause interrupted. Set iff `phase == Paused`.
    paused_from: Option<Phase>,
    seconds_remaining: u32,
    session_count: u32,
}

impl FocusTimer {
    /// Create a stopped timer holding a fresh work countdown.
    pub fn new(config: TimerConfig) -> Self {
        let seconds_remaining = config.work_secs();
        Self {
            config,
            phase: Phase::Stopped,
            paused_from: None,
            seconds_remaining,
            session_count: 0,
        }
    }

    // ── Queries ──────────────────────────────────────────────────────

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn seconds_remaining(&self) -> u32 {
        self.seconds_remaining
    }

    pub fn session_count(&self) -> u32 {
        self.session_count
    }

    pub fn config(&self) -> &TimerConfig {
        &self.config
    }

    /// Build a full state snapshot event.
    pub fn snapshot(&self) -> Event {
        Event::StateSnapshot {
            phase: self.phase,
            seconds_remaining: self.seconds_remaining,
            session_count: self.session_count,
            at: Utc::now(),
        }
    }

    // ── Commands ─────────────────────────────────────────────────────

    /// Start from `Stopped`, or resume the phase a pause interrupted.
    /// No-op while a countdown is already running.
    pub fn start(&mut self) -> Option<Event> {
        match self.phase {
            Phase::Stopped => {
                self.enter(Phase::Work);
                Some(Event::TimerStarted {
                    phase: Phase::Work,
                    seconds_remaining: self.seconds_remaining,
                    at: Utc::now(),
                })
            }
            Phase::Paused => {
                let phase = self.paused_from.take().unwrap_or(Phase::Work);
                self.phase = phase;
                Some(Event::TimerResumed {
                    phase,
                    seconds_remaining: self.seconds_remaining,
                    at: Utc::now(),
                })
            }
            _ => None,
        }
    }

    /// Valid only from an active phase. No-op otherwise.
    pub fn pause(&mut self) -> Option<Event> {
        if !self.phase.is_active() {
            return None;
        }
        let paused = self.phase;
        self.paused_from = Some(paused);
        self.phase = Phase::Paused;
        Some(Event::TimerPaused {
            phase: paused,
            seconds_remaining: self.seconds_remaining,
            at: Utc::now(),
        })
    }

    /// Any state back to `Stopped`: fresh work countdown, session count
    /// zeroed.
    pub fn reset(&mut self) -> Option<Event> {
        self.phase = Phase::Stopped;
        self.paused_from = None;
        self.seconds_remaining = self.config.work_secs();
        self.session_count = 0;
        Some(Event::TimerReset { at: Utc::now() })
    }

    /// Force the next phase without waiting for the countdown.
    ///
    /// From `Work` this counts the session and picks the break via the
    /// cadence policy; from anywhere else it forces a fresh `Work` phase
    /// without counting.
    pub fn skip(&mut self) -> Option<Event> {
        let from = self.phase;
        let to = if self.phase == Phase::Work {
            self.advance_from_work()
        } else {
            self.paused_from = None;
            self.enter(Phase::Work)
        };
        Some(Event::TimerSkipped {
            from,
            to,
            session_count: self.session_count,
            at: Utc::now(),
        })
    }

    /// One elapsed second. Call once per second while a phase is active.
    ///
    /// Returns the completion event when the countdown reaches zero; the
    /// machine has already advanced to the next phase when it fires, so
    /// `seconds_remaining` is zero only inside this call.
    pub fn tick(&mut self) -> Option<Event> {
        if !self.phase.is_active() {
            return None;
        }
        self.seconds_remaining = self.seconds_remaining.saturating_sub(1);
        if self.seconds_remaining > 0 {
            return None;
        }
        let completed = self.phase;
        let next = if completed == Phase::Work {
            self.advance_from_work()
        } else {
            self.enter(Phase::Work)
        };
        Some(Event::PhaseCompleted {
            completed,
            next,
            session_count: self.session_count,
            at: Utc::now(),
        })
    }

    /// Swap in a new configuration, rescaling the live countdown.
    ///
    /// In an active phase the remaining time becomes the new full duration
    /// of that phase, which can move the countdown in either direction. In
    /// `Stopped` the idle countdown resets to the new work duration; in
    /// `Paused` the remaining time is clamped so it cannot exceed the new
    /// duration of the interrupted phase.
    pub fn apply_config(&mut self, config: TimerConfig) -> Option<Event> {
        self.config = config;
        match self.phase {
            Phase::Work | Phase::ShortBreak | Phase::LongBreak => {
                self.seconds_remaining = self.duration_secs(self.phase);
            }
            Phase::Stopped => {
                self.seconds_remaining = self.config.work_secs();
            }
            Phase::Paused => {
                let limit = self.duration_secs(self.paused_from.unwrap_or(Phase::Work));
                self.seconds_remaining = self.seconds_remaining.min(limit);
            }
        }
        Some(Event::ConfigReloaded {
            phase: self.phase,
            seconds_remaining: self.seconds_remaining,
            at: Utc::now(),
        })
    }

    // ── Internal ─────────────────────────────────────────────────────

    /// Leave `Work`: count the session, enter the break the cadence policy
    /// picks.
    fn advance_from_work(&mut self) -> Phase {
        self.session_count += 1;
        let next = next_break_phase(self.session_count, self.config.long_break_interval);
        self.enter(next)
    }

    fn enter(&mut self, phase: Phase) -> Phase {
        self.phase = phase;
        self.seconds_remaining = self.duration_secs(phase);
        phase
    }

    fn duration_secs(&self, phase: Phase) -> u32 {
        match phase {
            Phase::ShortBreak => self.config.short_break_secs(),
            Phase::LongBreak => self.config.long_break_secs(),
            _ => self.config.work_secs(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cfg() -> TimerConfig {
        TimerConfig {
            work_minutes: 1,
            short_break_minutes: 1,
            long_break_minutes: 2,
            long_break_interval: 4,
            ..TimerConfig::default()
        }
    }

    fn tick_through(timer: &mut FocusTimer, secs: u32) -> Option<Event> {
        let mut last = None;
        for _ in 0..secs {
            last = timer.tick();
        }
        last
    }

    #[test]
    fn starts_stopped_with_work_countdown() {
        let timer = FocusTimer::new(cfg());
        assert_eq!(timer.phase(), Phase::Stopped);
        assert_eq!(timer.seconds_remaining(), 60);
        assert_eq!(timer.session_count(), 0);
    }

    #[test]
    fn start_pause_resume() {
        let mut timer = FocusTimer::new(cfg());
        assert!(timer.start().is_some());
        assert_eq!(timer.phase(), Phase::Work);

        tick_through(&mut timer, 10);
        assert!(timer.pause().is_some());
        assert_eq!(timer.phase(), Phase::Paused);
        assert_eq!(timer.seconds_remaining(), 50);

        // Ticks while paused change nothing.
        assert!(timer.tick().is_none());
        assert_eq!(timer.seconds_remaining(), 50);

        assert!(timer.start().is_some());
        assert_eq!(timer.phase(), Phase::Work);
        assert_eq!(timer.seconds_remaining(), 50);
    }

    #[test]
    fn pause_from_stopped_is_a_no_op() {
        let mut timer = FocusTimer::new(cfg());
        assert!(timer.pause().is_none());
        assert_eq!(timer.phase(), Phase::Stopped);
    }

    #[test]
    fn start_is_a_no_op_while_running() {
        let mut timer = FocusTimer::new(cfg());
        timer.start();
        tick_through(&mut timer, 5);
        assert!(timer.start().is_none());
        assert_eq!(timer.seconds_remaining(), 55);
    }

    #[test]
    fn resume_returns_to_the_paused_break() {
        let mut timer = FocusTimer::new(cfg());
        timer.start();
        timer.skip(); // Work -> ShortBreak (session 1)
        assert_eq!(timer.phase(), Phase::ShortBreak);

        tick_through(&mut timer, 20);
        timer.pause();
        let event = timer.start();
        assert_eq!(timer.phase(), Phase::ShortBreak);
        assert_eq!(timer.seconds_remaining(), 40);
        assert!(matches!(
            event,
            Some(Event::TimerResumed {
                phase: Phase::ShortBreak,
                ..
            })
        ));
    }

    #[test]
    fn natural_completion_counts_session_and_enters_break() {
        let mut timer = FocusTimer::new(cfg());
        timer.start();
        let event = tick_through(&mut timer, 60);
        match event {
            Some(Event::PhaseCompleted {
                completed,
                next,
                session_count,
                ..
            }) => {
                assert_eq!(completed, Phase::Work);
                assert_eq!(next, Phase::ShortBreak);
                assert_eq!(session_count, 1);
            }
            other => panic!("expected PhaseCompleted, got {other:?}"),
        }
        assert_eq!(timer.phase(), Phase::ShortBreak);
        assert_eq!(timer.seconds_remaining(), 60);
    }

    #[test]
    fn break_completion_returns_to_work_without_counting() {
        let mut timer = FocusTimer::new(cfg());
        timer.start();
        tick_through(&mut timer, 60); // -> ShortBreak, session 1
        let event = tick_through(&mut timer, 60); // break runs out
        assert!(matches!(
            event,
            Some(Event::PhaseCompleted {
                completed: Phase::ShortBreak,
                next: Phase::Work,
                session_count: 1,
                ..
            })
        ));
        assert_eq!(timer.phase(), Phase::Work);
    }

    #[test]
    fn fourth_session_earns_the_long_break() {
        let mut timer = FocusTimer::new(cfg());
        timer.start();
        for session in 1..=3 {
            timer.skip(); // Work -> break
            assert_eq!(timer.phase(), Phase::ShortBreak, "session {session}");
            timer.skip(); // break -> Work
        }
        timer.skip(); // session 4
        assert_eq!(timer.phase(), Phase::LongBreak);
        assert_eq!(timer.session_count(), 4);
        assert_eq!(timer.seconds_remaining(), 120);
    }

    #[test]
    fn skip_from_break_does_not_count_a_session() {
        let mut timer = FocusTimer::new(cfg());
        timer.start();
        timer.skip();
        assert_eq!(timer.session_count(), 1);
        timer.skip(); // break -> Work
        assert_eq!(timer.session_count(), 1);
        assert_eq!(timer.phase(), Phase::Work);
        assert_eq!(timer.seconds_remaining(), 60);
    }

    #[test]
    fn skip_from_stopped_forces_a_work_phase() {
        let mut timer = FocusTimer::new(cfg());
        let event = timer.skip();
        assert_eq!(timer.phase(), Phase::Work);
        assert_eq!(timer.session_count(), 0);
        assert!(matches!(
            event,
            Some(Event::TimerSkipped {
                from: Phase::Stopped,
                to: Phase::Work,
                ..
            })
        ));
    }

    #[test]
    fn reset_from_any_phase() {
        let mut timer = FocusTimer::new(cfg());
        timer.start();
        timer.skip();
        tick_through(&mut timer, 7);
        timer.pause();

        timer.reset();
        assert_eq!(timer.phase(), Phase::Stopped);
        assert_eq!(timer.seconds_remaining(), 60);
        assert_eq!(timer.session_count(), 0);
    }

    #[test]
    fn reload_rescales_a_live_work_countdown() {
        let mut timer = FocusTimer::new(cfg());
        timer.start();
        tick_through(&mut timer, 30);
        assert_eq!(timer.seconds_remaining(), 30);

        let new = TimerConfig {
            work_minutes: 2,
            ..cfg()
        };
        timer.apply_config(new);
        // Rescaled to the new full duration, regardless of elapsed time.
        assert_eq!(timer.seconds_remaining(), 120);
        assert_eq!(timer.phase(), Phase::Work);
    }

    #[test]
    fn reload_can_shrink_the_countdown() {
        let mut timer = FocusTimer::new(TimerConfig {
            work_minutes: 10,
            ..cfg()
        });
        timer.start();
        tick_through(&mut timer, 5);
        timer.apply_config(cfg()); // work back down to 1 minute
        assert_eq!(timer.seconds_remaining(), 60);
    }

    #[test]
    fn reload_while_stopped_resets_the_idle_countdown() {
        let mut timer = FocusTimer::new(cfg());
        timer.apply_config(TimerConfig {
            work_minutes: 3,
            ..cfg()
        });
        assert_eq!(timer.seconds_remaining(), 180);
    }

    #[test]
    fn reload_while_paused_clamps_remaining_time() {
        let mut timer = FocusTimer::new(TimerConfig {
            work_minutes: 10,
            ..cfg()
        });
        timer.start();
        timer.pause();
        assert_eq!(timer.seconds_remaining(), 600);

        timer.apply_config(cfg()); // work now 1 minute
        assert_eq!(timer.seconds_remaining(), 60);

        timer.start();
        assert_eq!(timer.phase(), Phase::Work);
        assert_eq!(timer.seconds_remaining(), 60);
    }

    #[test]
    fn tick_in_stopped_does_nothing() {
        let mut timer = FocusTimer::new(cfg());
        assert!(timer.tick().is_none());
        assert_eq!(timer.seconds_remaining(), 60);
    }

    #[test]
    fn snapshot_reflects_current_state() {
        let mut timer = FocusTimer::new(cfg());
        timer.start();
        tick_through(&mut timer, 3);
        match timer.snapshot() {
            Event::StateSnapshot {
                phase,
                seconds_remaining,
                session_count,
                ..
            } => {
                assert_eq!(phase, Phase::Work);
                assert_eq!(seconds_remaining, 57);
                assert_eq!(session_count, 0);
            }
            other => panic!("expected StateSnapshot, got {other:?}"),
        }
    }
}
