//! Countdown timers started by the cook.
//!
//! Timers are independent of each other and of the session clock. A single
//! external tick source calls [`TimerManager::tick`] once per second, so all
//! active timers advance in lockstep.

use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Unique identifier of a timer, generated per creation.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TimerId(String);

impl TimerId {
    fn generate() -> Self {
        Self(Uuid::new_v4().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for TimerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A single countdown.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Timer {
    pub id: TimerId,
    pub label: String,
    pub duration_seconds: u64,
    pub remaining_seconds: u64,
    pub is_active: bool,
}

impl Timer {
    /// A timer that has counted down to zero. It stays listed until removed.
    pub fn is_finished(&self) -> bool {
        self.remaining_seconds == 0
    }

    /// Remaining time formatted as `MM:SS` (or `H:MM:SS` past an hour).
    pub fn remaining_display(&self) -> String {
        format_seconds(self.remaining_seconds)
    }

    /// Advances this timer by one second. Returns true if it just reached zero.
    fn tick(&mut self) -> bool {
        if !self.is_active || self.remaining_seconds == 0 {
            return false;
        }
        self.remaining_seconds -= 1;
        self.remaining_seconds == 0
    }
}

/// Formats seconds as `MM:SS`, or `H:MM:SS` when at least an hour.
pub fn format_seconds(total: u64) -> String {
    let hours = total / 3600;
    let minutes = (total % 3600) / 60;
    let seconds = total % 60;
    if hours > 0 {
        format!("{hours}:{minutes:02}:{seconds:02}")
    } else {
        format!("{minutes:02}:{seconds:02}")
    }
}

/// Owns all timers of one cooking view.
#[derive(Debug, Default, Clone)]
pub struct TimerManager {
    timers: Vec<Timer>,
}

impl TimerManager {
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates and starts a new timer of `minutes` length.
    pub fn start_timer(&mut self, label: impl Into<String>, minutes: u32) -> TimerId {
        let duration_seconds = u64::from(minutes) * 60;
        let timer = Timer {
            id: TimerId::generate(),
            label: label.into(),
            duration_seconds,
            remaining_seconds: duration_seconds,
            is_active: true,
        };
        let id = timer.id.clone();
        self.timers.push(timer);
        id
    }

    /// Pauses or resumes one timer. Returns false if the id is unknown.
    pub fn toggle_timer(&mut self, id: &TimerId) -> bool {
        match self.timers.iter_mut().find(|timer| &timer.id == id) {
            Some(timer) => {
                timer.is_active = !timer.is_active;
                true
            }
            None => false,
        }
    }

    /// Removes a timer. Returns the removed timer if it existed.
    pub fn remove_timer(&mut self, id: &TimerId) -> Option<Timer> {
        let position = self.timers.iter().position(|timer| &timer.id == id)?;
        Some(self.timers.remove(position))
    }

    /// Advances every active, unfinished timer by one second.
    ///
    /// Returns clones of the timers that reached zero on this tick.
    pub fn tick(&mut self) -> Vec<Timer> {
        self.timers
            .iter_mut()
            .filter_map(|timer| timer.tick().then(|| timer.clone()))
            .collect()
    }

    pub fn get(&self, id: &TimerId) -> Option<&Timer> {
        self.timers.iter().find(|timer| &timer.id == id)
    }

    /// Timers in creation order.
    pub fn timers(&self) -> &[Timer] {
        &self.timers
    }

    pub fn len(&self) -> usize {
        self.timers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.timers.is_empty()
    }
}
