//! Phase Timer
//!
//! Tracks whether one training phase is in progress and when it began.

use std::time::{Duration, Instant};

/// Start instant of a single phase, or nothing when the phase is idle.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PhaseTimer {
    started_at: Option<Instant>,
}

impl PhaseTimer {
    /// Creates an idle timer.
    pub fn new() -> Self {
        Self { started_at: None }
    }

    /// Arms the timer unless it is already running.
    ///
    /// Returns `true` when this call set the start instant.
    pub fn start_if_idle(&mut self, now: Instant) -> bool {
        if self.started_at.is_some() {
            return false;
        }
        self.started_at = Some(now);
        true
    }

    /// Arms the timer, replacing any start instant already recorded.
    pub fn restart(&mut self, now: Instant) {
        self.started_at = Some(now);
    }

    /// Disarms the timer and returns the time since it was armed.
    ///
    /// Returns `None`, leaving the timer untouched, when it was idle.
    pub fn stop(&mut self, now: Instant) -> Option<Duration> {
        let started_at = self.started_at.take()?;
        Some(now.saturating_duration_since(started_at))
    }

    /// Returns true while the phase is in progress.
    pub fn is_running(&self) -> bool {
        self.started_at.is_some()
    }

    /// Instant the running phase began.
    pub fn started_at(&self) -> Option<Instant> {
        self.started_at
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_timer_is_idle() {
        let timer = PhaseTimer::new();
        assert!(!timer.is_running());
        assert_eq!(timer.started_at(), None);
    }

    #[test]
    fn test_start_if_idle_keeps_first_start() {
        let base = Instant::now();
        let mut timer = PhaseTimer::new();

        assert!(timer.start_if_idle(base));
        assert!(!timer.start_if_idle(base + Duration::from_secs(3)));
        assert_eq!(timer.started_at(), Some(base));
    }

    #[test]
    fn test_restart_overwrites_start() {
        let base = Instant::now();
        let mut timer = PhaseTimer::new();

        timer.restart(base);
        timer.restart(base + Duration::from_secs(1));
        assert_eq!(timer.started_at(), Some(base + Duration::from_secs(1)));
    }

    #[test]
    fn test_stop_returns_elapsed_and_clears() {
        let base = Instant::now();
        let mut timer = PhaseTimer::new();
        timer.start_if_idle(base);

        let elapsed = timer.stop(base + Duration::from_millis(250));
        assert_eq!(elapsed, Some(Duration::from_millis(250)));
        assert!(!timer.is_running());
    }

    #[test]
    fn test_stop_idle_timer_returns_none() {
        let mut timer = PhaseTimer::new();
        assert_eq!(timer.stop(Instant::now()), None);
        assert!(!timer.is_running());
    }
}
