//! Interfaces of the remote REST backend.
//!
//! These traits decouple the session and chat logic from the transport. The
//! HTTP implementation lives in `cookmate-interaction`; tests provide in-memory
//! doubles.

use crate::chat::ChatHistoryRecord;
use crate::cooking::{CookingSession, SessionId};
use crate::error::Result;
use crate::recipe::{Recipe, RecipeCard, RecipeId};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// Body of `POST /cooking-sessions`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StartSessionRequest {
    pub recipe_id: RecipeId,
}

/// Body of `POST /cooking-sessions/{id}/end`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EndSessionRequest {
    #[serde(default)]
    pub notes: Option<String>,
}

/// Body of `POST /chat`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatRequest {
    pub message: String,
}

/// Response of `POST /chat`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatReply {
    #[serde(default)]
    pub ai_reply: Option<String>,
    #[serde(default)]
    pub cooking_recipe: Option<RecipeCard>,
    pub message_id: i64,
}

/// Read access to recipes.
#[async_trait]
pub trait RecipeApi: Send + Sync {
    /// `GET /recipes/{id}`
    async fn get_recipe(&self, recipe_id: RecipeId) -> Result<Recipe>;
}

/// Cooking session lifecycle on the backend.
#[async_trait]
pub trait CookingSessionApi: Send + Sync {
    /// `POST /cooking-sessions`
    async fn start_session(&self, recipe_id: RecipeId) -> Result<CookingSession>;

    /// `POST /cooking-sessions/{id}/end`
    async fn end_session(
        &self,
        session_id: SessionId,
        notes: Option<String>,
    ) -> Result<CookingSession>;
}

/// The assistant chat endpoints.
#[async_trait]
pub trait ChatApi: Send + Sync {
    /// `POST /chat`
    async fn send_chat(&self, message: &str) -> Result<ChatReply>;

    /// `GET /chat/history`, oldest first.
    async fn chat_history(&self) -> Result<Vec<ChatHistoryRecord>>;
}

/// Supplies bearer tokens. Owned by the auth collaborator.
pub trait TokenProvider: Send + Sync {
    /// Current token, if the user is signed in.
    fn bearer_token(&self) -> Option<String>;

    /// Called when the backend answers 401. The default does nothing.
    fn on_unauthorized(&self) {}
}
