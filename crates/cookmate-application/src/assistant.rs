//! Assistant Bridge - chat request/response integration.
//!
//! Owns the chat timeline of one chat surface. Only one request may be
//! outstanding at a time; further sends while one is in flight are ignored
//! rather than queued. Failures add an apology entry and never remove the
//! user's message.

use crate::event::EventSink;
use crate::history::{ChatHistoryReconciler, ChatSurface};
use crate::scope::ViewScope;
use cookmate_core::api::ChatApi;
use cookmate_core::chat::{
    ChatMessage, CookingContext, GREETING_ID, RequestOutcome, RequestState, compose_query,
    greeting_timeline,
};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::{Mutex, RwLock};

/// Apology appended when the assistant takes too long.
pub const TIMEOUT_APOLOGY: &str = "Sorry, I'm taking longer than usual to think this one through. \
     Please try asking again in a moment.";

/// Apology appended for any other failure.
pub const ERROR_APOLOGY: &str =
    "Sorry, I couldn't answer that right now. Please try again.";

/// Default pause before showing a recipe recommendation.
pub const DEFAULT_RECOMMENDATION_DELAY: Duration = Duration::from_millis(800);

/// What happened to a send request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SendOutcome {
    /// Blank input or a request already in flight; nothing changed.
    Ignored,
    /// The assistant answered.
    Replied,
    /// The request failed and an apology was appended.
    Failed,
    /// The view closed before the answer arrived; the answer was dropped.
    Discarded,
}

/// Tunables of a bridge.
#[derive(Debug, Clone)]
pub struct AssistantSettings {
    pub recommendation_delay: Duration,
    pub quick_replies: Vec<String>,
    pub greeting: String,
}

impl Default for AssistantSettings {
    fn default() -> Self {
        Self {
            recommendation_delay: DEFAULT_RECOMMENDATION_DELAY,
            quick_replies: Vec::new(),
            greeting: cookmate_core::chat::DEFAULT_GREETING.to_string(),
        }
    }
}

/// Chat surface state plus the request lifecycle guarding it.
pub struct AssistantBridge {
    api: Arc<dyn ChatApi>,
    timeline: RwLock<Vec<ChatMessage>>,
    request: Mutex<RequestState>,
    settings: AssistantSettings,
    events: EventSink,
    scope: ViewScope,
}

impl AssistantBridge {
    /// Creates a bridge whose timeline starts with the greeting.
    pub fn new(
        api: Arc<dyn ChatApi>,
        settings: AssistantSettings,
        events: EventSink,
        scope: ViewScope,
    ) -> Self {
        let timeline = greeting_timeline(&settings.greeting);
        Self {
            api,
            timeline: RwLock::new(timeline),
            request: Mutex::new(RequestState::Idle),
            settings,
            events,
            scope,
        }
    }

    /// Replaces the timeline with what the reconciler produces for `surface`.
    ///
    /// Only an untouched timeline is replaced: once a message has been sent,
    /// the loaded history is dropped.
    pub async fn initialize(&self, reconciler: &ChatHistoryReconciler, surface: ChatSurface) {
        let loaded = reconciler.load(surface).await;
        if !self.scope.is_active() {
            return;
        }
        let mut timeline = self.timeline.write().await;
        let untouched = timeline.len() == 1 && timeline[0].id == GREETING_ID;
        if !untouched || *self.request.lock().await != RequestState::Idle {
            tracing::debug!("Chat already in use; keeping the current timeline");
            return;
        }
        *timeline = loaded;
    }

    /// Sends `raw` as typed, with no cooking context.
    pub async fn send_message(&self, raw: &str) -> SendOutcome {
        self.send_with_context(raw, None).await
    }

    /// Sends a suggested prompt. Same as typing it.
    pub async fn select_quick_reply(&self, text: &str) -> SendOutcome {
        self.send_message(text).await
    }

    /// Sends `raw`, prefixing the wire payload with `context` when given.
    ///
    /// The timeline only ever shows the raw text.
    pub async fn send_with_context(
        &self,
        raw: &str,
        context: Option<&CookingContext>,
    ) -> SendOutcome {
        let text = raw.trim();
        if text.is_empty() {
            return SendOutcome::Ignored;
        }
        if !self.request.lock().await.try_begin() {
            tracing::debug!("Chat request already in flight; ignoring send");
            return SendOutcome::Ignored;
        }

        self.timeline.write().await.push(ChatMessage::user(text));

        let payload = compose_query(context, text);
        let result = self.api.send_chat(&payload).await;

        if !self.scope.is_active() {
            self.request.lock().await.settle(RequestOutcome::Failed);
            tracing::debug!("Chat view closed before the reply arrived; dropping it");
            return SendOutcome::Discarded;
        }

        let (outcome, send_outcome) = match result {
            Ok(reply) => {
                if let Some(answer) = reply.ai_reply.filter(|a| !a.trim().is_empty()) {
                    self.timeline
                        .write()
                        .await
                        .push(ChatMessage::assistant(answer));
                }
                if let Some(recipe) = reply.cooking_recipe {
                    tokio::time::sleep(self.settings.recommendation_delay).await;
                    if self.scope.is_active() {
                        self.timeline
                            .write()
                            .await
                            .push(ChatMessage::recommendation(recipe));
                    }
                }
                (RequestOutcome::Succeeded, SendOutcome::Replied)
            }
            Err(err) => {
                tracing::warn!("Chat request failed: {}", err);
                let (apology, outcome) = if err.is_timeout() {
                    (TIMEOUT_APOLOGY, RequestOutcome::TimedOut)
                } else {
                    (ERROR_APOLOGY, RequestOutcome::Failed)
                };
                self.timeline
                    .write()
                    .await
                    .push(ChatMessage::assistant(apology));
                self.events.notify_error(err.user_message());
                (outcome, SendOutcome::Failed)
            }
        };

        self.request.lock().await.settle(outcome);
        send_outcome
    }

    /// Copy of the timeline, oldest first.
    pub async fn timeline(&self) -> Vec<ChatMessage> {
        self.timeline.read().await.clone()
    }

    pub async fn request_state(&self) -> RequestState {
        *self.request.lock().await
    }

    /// Whether the input should be disabled.
    pub async fn is_busy(&self) -> bool {
        self.request.lock().await.is_in_flight()
    }

    pub fn quick_replies(&self) -> &[String] {
        &self.settings.quick_replies
    }
}
