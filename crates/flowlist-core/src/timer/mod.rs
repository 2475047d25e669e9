mod cadence;
mod machine;

pub use cadence::next_break_phase;
pub use machine::{FocusTimer, Phase};
