//! Chat History Reconciler.
//!
//! Decides what a chat surface shows when it opens: the stored conversation
//! on the full chat page, and a fresh greeting everywhere else.

use cookmate_core::api::ChatApi;
use cookmate_core::chat::{ChatMessage, greeting_timeline, reconcile_or_greet};
use std::sync::Arc;

/// Where a chat timeline is being shown.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChatSurface {
    /// Landing page panel. Always starts fresh.
    Landing,
    /// The dedicated chat page. Restores stored history.
    ChatPage,
}

pub struct ChatHistoryReconciler {
    api: Arc<dyn ChatApi>,
    greeting: String,
}

impl ChatHistoryReconciler {
    pub fn new(api: Arc<dyn ChatApi>, greeting: impl Into<String>) -> Self {
        Self {
            api,
            greeting: greeting.into(),
        }
    }

    /// Initial timeline for `surface`.
    ///
    /// Landing never fetches. On the chat page a failed or empty history
    /// falls back to the greeting; a fetch error is logged and not shown.
    pub async fn load(&self, surface: ChatSurface) -> Vec<ChatMessage> {
        match surface {
            ChatSurface::Landing => greeting_timeline(&self.greeting),
            ChatSurface::ChatPage => match self.api.chat_history().await {
                Ok(records) => {
                    tracing::debug!(count = records.len(), "Loaded chat history");
                    reconcile_or_greet(&records, &self.greeting)
                }
                Err(err) => {
                    tracing::warn!("Failed to load chat history: {}", err);
                    greeting_timeline(&self.greeting)
                }
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::MockChatApi;
    use chrono::{TimeZone, Utc};
    use cookmate_core::CookmateError;
    use cookmate_core::chat::{ChatHistoryRecord, DEFAULT_GREETING, GREETING_ID};

    fn record(id: i64, user: &str, reply: Option<&str>) -> ChatHistoryRecord {
        ChatHistoryRecord {
            message_id: id,
            user_message: Some(user.to_string()),
            ai_reply: reply.map(str::to_string),
            cooking_recipe: None,
            created_at: Utc.with_ymd_and_hms(2024, 6, 1, 12, id as u32, 0).unwrap(),
        }
    }

    #[tokio::test]
    async fn test_landing_never_fetches() {
        let api = Arc::new(MockChatApi::new());
        api.set_history(Ok(vec![record(1, "hi", Some("hello"))]));
        let reconciler = ChatHistoryReconciler::new(api.clone(), DEFAULT_GREETING);

        let timeline = reconciler.load(ChatSurface::Landing).await;

        assert_eq!(timeline.len(), 1);
        assert_eq!(timeline[0].id, GREETING_ID);
        assert_eq!(api.history_call_count(), 0);
    }

    #[tokio::test]
    async fn test_chat_page_restores_history_in_order() {
        let api = Arc::new(MockChatApi::new());
        api.set_history(Ok(vec![
            record(1, "hi", Some("hello")),
            record(2, "soup?", None),
        ]));
        let reconciler = ChatHistoryReconciler::new(api.clone(), DEFAULT_GREETING);

        let timeline = reconciler.load(ChatSurface::ChatPage).await;

        let texts: Vec<_> = timeline.iter().filter_map(|m| m.as_text()).collect();
        assert_eq!(texts, vec!["hi", "hello", "soup?"]);
        assert_eq!(api.history_call_count(), 1);
    }

    #[tokio::test]
    async fn test_chat_page_empty_history_greets() {
        let api = Arc::new(MockChatApi::new());
        api.set_history(Ok(Vec::new()));
        let reconciler = ChatHistoryReconciler::new(api, "Welcome back");

        let timeline = reconciler.load(ChatSurface::ChatPage).await;

        assert_eq!(timeline.len(), 1);
        assert_eq!(timeline[0].as_text(), Some("Welcome back"));
    }

    #[tokio::test]
    async fn test_chat_page_fetch_error_greets() {
        let api = Arc::new(MockChatApi::new());
        api.set_history(Err(CookmateError::network("offline")));
        let reconciler = ChatHistoryReconciler::new(api, DEFAULT_GREETING);

        let timeline = reconciler.load(ChatSurface::ChatPage).await;

        assert_eq!(timeline.len(), 1);
        assert_eq!(timeline[0].id, GREETING_ID);
    }
}
