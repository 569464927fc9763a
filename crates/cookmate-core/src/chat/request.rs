//! Single-flight request lifecycle.

use serde::{Deserialize, Serialize};

/// How the last request ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RequestOutcome {
    Succeeded,
    Failed,
    TimedOut,
}

/// Lifecycle of the one request a chat surface may have outstanding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum RequestState {
    #[default]
    Idle,
    InFlight,
    Settled(RequestOutcome),
}

impl RequestState {
    pub fn is_in_flight(&self) -> bool {
        matches!(self, RequestState::InFlight)
    }

    /// Moves to `InFlight` unless a request is already outstanding.
    ///
    /// Returns false (and changes nothing) when already in flight.
    pub fn try_begin(&mut self) -> bool {
        if self.is_in_flight() {
            return false;
        }
        *self = RequestState::InFlight;
        true
    }

    pub fn settle(&mut self, outcome: RequestOutcome) {
        *self = RequestState::Settled(outcome);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_try_begin_is_single_flight() {
        let mut state = RequestState::default();
        assert!(state.try_begin());
        assert!(!state.try_begin());

        state.settle(RequestOutcome::Failed);
        assert!(!state.is_in_flight());
        assert!(state.try_begin());
    }
}
