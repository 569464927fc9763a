//! Cooking session domain module.
//!
//! # Module Structure
//!
//! - `session`: backend session record and the tagged start state
//! - `navigator`: current step and completion tracking (`StepNavigator`)
//! - `timer`: user-started countdowns (`TimerManager`)
//! - `clock`: elapsed-time counter of the session (`ElapsedClock`)
//! - `keys`: key-to-command mapping used while a session view is active

mod clock;
mod keys;
mod navigator;
mod session;
mod timer;

pub use clock::ElapsedClock;
pub use keys::{Key, KeyCommand};
pub use navigator::{StepNavigator, estimate_time_remaining};
pub use session::{CookingSession, SessionId, StartState};
pub use timer::{Timer, TimerId, TimerManager, format_seconds};
