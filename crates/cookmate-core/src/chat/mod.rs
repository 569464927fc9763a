//! Chat domain module.
//!
//! - `message`: timeline entries (`ChatMessage`)
//! - `history`: expansion of stored turns into a timeline
//! - `context`: cooking context attached to outgoing questions
//! - `request`: single-flight request lifecycle

mod context;
mod history;
mod message;
mod request;

pub use context::{CookingContext, compose_query};
pub use history::{
    ChatHistoryRecord, DEFAULT_GREETING, GREETING_ID, greeting_timeline, reconcile,
    reconcile_or_greet,
};
pub use message::{ChatMessage, MessageContent, MessageRole};
pub use request::{RequestOutcome, RequestState};
