//! Timing Module
//!
//! Clocks and the single-phase stopwatch used by metrics sessions.
//!
//! # Components
//!
//! - [`Clock`]: Source of monotonic instants (system or manual)
//! - [`PhaseTimer`]: Optional start instant for one training phase

pub mod clock;
pub mod phase;

pub use clock::{Clock, ManualClock, SystemClock};
pub use phase::PhaseTimer;
