//! Turning stored chat turns into a timeline.

use super::message::{ChatMessage, MessageContent, MessageRole};
use crate::recipe::RecipeCard;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Greeting shown when there is no prior conversation.
pub const DEFAULT_GREETING: &str =
    "Hi! I'm your cooking assistant. Ask me about recipes, ingredients, or techniques.";

/// Stable id of the greeting entry.
pub const GREETING_ID: &str = "greeting";

/// One stored turn as returned by `GET /chat/history`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatHistoryRecord {
    pub message_id: i64,
    #[serde(default)]
    pub user_message: Option<String>,
    #[serde(default)]
    pub ai_reply: Option<String>,
    #[serde(default)]
    pub cooking_recipe: Option<RecipeCard>,
    pub created_at: DateTime<Utc>,
}

/// Expands stored turns into timeline entries.
///
/// Each record yields, in order: the user turn, the assistant reply and the
/// recommended recipe, skipping parts that are absent or blank. Every entry
/// keeps the record's `created_at`.
pub fn reconcile(records: &[ChatHistoryRecord]) -> Vec<ChatMessage> {
    let mut timeline = Vec::with_capacity(records.len() * 2);

    for record in records {
        if let Some(text) = non_blank(&record.user_message) {
            timeline.push(
                ChatMessage::text(MessageRole::User, text, record.created_at)
                    .with_id(format!("{}-user", record.message_id)),
            );
        }
        if let Some(text) = non_blank(&record.ai_reply) {
            timeline.push(
                ChatMessage::text(MessageRole::Assistant, text, record.created_at)
                    .with_id(format!("{}-assistant", record.message_id)),
            );
        }
        if let Some(recipe) = &record.cooking_recipe {
            timeline.push(ChatMessage {
                id: format!("{}-recipe", record.message_id),
                role: MessageRole::Assistant,
                content: MessageContent::RecipeRecommendation {
                    recipe: recipe.clone(),
                },
                timestamp: record.created_at,
            });
        }
    }

    timeline
}

/// Timeline holding only the greeting.
pub fn greeting_timeline(greeting: &str) -> Vec<ChatMessage> {
    vec![ChatMessage::assistant(greeting).with_id(GREETING_ID)]
}

/// Like [`reconcile`], but falls back to the greeting when nothing remains.
pub fn reconcile_or_greet(records: &[ChatHistoryRecord], greeting: &str) -> Vec<ChatMessage> {
    let timeline = reconcile(records);
    if timeline.is_empty() {
        greeting_timeline(greeting)
    } else {
        timeline
    }
}

fn non_blank(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|text| !text.trim().is_empty())
}
