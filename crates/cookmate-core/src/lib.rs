//! Domain layer of Cookmate.
//!
//! Holds the pure state of a cooking session (steps, timers, clock), the chat
//! timeline types, and the traits through which the backend is reached.

pub mod api;
pub mod chat;
pub mod cooking;
pub mod error;
pub mod recipe;

// Re-export common error type
pub use error::{CookmateError, Result};
