//! Chat timeline entries.

use crate::recipe::RecipeCard;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Who authored a timeline entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MessageRole {
    /// Message typed by the user.
    User,
    /// Reply or recommendation from the assistant.
    Assistant,
}

/// Body of a timeline entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum MessageContent {
    Text { text: String },
    RecipeRecommendation { recipe: RecipeCard },
}

/// A single entry in the chat timeline.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub id: String,
    pub role: MessageRole,
    pub content: MessageContent,
    pub timestamp: DateTime<Utc>,
}

impl ChatMessage {
    pub fn user(text: impl Into<String>) -> Self {
        Self::text(MessageRole::User, text, Utc::now())
    }

    pub fn assistant(text: impl Into<String>) -> Self {
        Self::text(MessageRole::Assistant, text, Utc::now())
    }

    pub fn recommendation(recipe: RecipeCard) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            role: MessageRole::Assistant,
            content: MessageContent::RecipeRecommendation { recipe },
            timestamp: Utc::now(),
        }
    }

    /// Text entry with an explicit timestamp.
    pub fn text(role: MessageRole, text: impl Into<String>, timestamp: DateTime<Utc>) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            role,
            content: MessageContent::Text { text: text.into() },
            timestamp,
        }
    }

    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = id.into();
        self
    }

    pub fn is_user(&self) -> bool {
        self.role == MessageRole::User
    }

    /// Text of a text entry; `None` for recommendations.
    pub fn as_text(&self) -> Option<&str> {
        match &self.content {
            MessageContent::Text { text } => Some(text),
            MessageContent::RecipeRecommendation { .. } => None,
        }
    }

    /// Recommended recipe, if this entry carries one.
    pub fn as_recipe(&self) -> Option<&RecipeCard> {
        match &self.content {
            MessageContent::RecipeRecommendation { recipe } => Some(recipe),
            MessageContent::Text { .. } => None,
        }
    }
}
