//! Elapsed-time clock of a cooking session.

use super::timer::format_seconds;

/// Counts whole seconds while running.
///
/// This is a cooperative counter: one tick adds one second. It does not try
/// to correct drift if ticks are delayed or skipped.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ElapsedClock {
    elapsed_seconds: u64,
    running: bool,
}

impl ElapsedClock {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn start(&mut self) {
        self.running = true;
    }

    pub fn stop(&mut self) {
        self.running = false;
    }

    /// Flips the running state and returns the new value.
    pub fn toggle(&mut self) -> bool {
        self.running = !self.running;
        self.running
    }

    /// Adds one second if running.
    pub fn tick(&mut self) {
        if self.running {
            self.elapsed_seconds += 1;
        }
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn elapsed_seconds(&self) -> u64 {
        self.elapsed_seconds
    }

    pub fn display(&self) -> String {
        format_seconds(self.elapsed_seconds)
    }
}
