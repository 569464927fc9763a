//! Application layer for Cookmate.
//!
//! This crate coordinates the pure cooking and chat state from `cookmate-core`
//! with the backend traits, the tick source and the keyboard, and reports
//! everything the front-end must show as [`UiEvent`]s.

pub mod assistant;
pub mod event;
pub mod history;
pub mod keyboard;
pub mod scope;
pub mod session_controller;
pub mod ticker;
pub mod view;

#[cfg(test)]
mod test_support;

pub use assistant::{AssistantBridge, AssistantSettings, SendOutcome};
pub use event::{EventSink, Navigation, NotificationLevel, UiEvent};
pub use history::{ChatHistoryReconciler, ChatSurface};
pub use keyboard::{KeyHandler, KeyListenerGuard, KeyboardHub};
pub use scope::ViewScope;
pub use session_controller::{ExitDecision, SessionController, SessionSnapshot};
pub use ticker::{TICK_PERIOD, TickTarget, TickerHandle, spawn_ticker};
pub use view::{CookingView, ViewSettings};
