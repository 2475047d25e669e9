//! Break cadence policy.

use super::machine::Phase;

/// Pick the break phase that follows a completed work session.
///
/// `session_count` is the value *after* counting the just-completed
/// session. Every `long_break_interval`-th session earns the long break;
/// an interval of 1 makes every break long. The settings store accepts any
/// integer, so an interval of 0 is treated as 1 here rather than dividing
/// by zero.
pub fn next_break_phase(session_count: u32, long_break_interval: u32) -> Phase {
    let interval = long_break_interval.max(1);
    if session_count % interval == 0 {
        Phase::LongBreak
    } else {
        Phase::ShortBreak
    }
}
