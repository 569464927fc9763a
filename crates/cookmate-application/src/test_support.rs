//! In-memory backend doubles shared by the application tests.

use async_trait::async_trait;
use chrono::Utc;
use cookmate_core::api::{ChatApi, ChatReply, CookingSessionApi};
use cookmate_core::chat::ChatHistoryRecord;
use cookmate_core::cooking::{CookingSession, SessionId};
use cookmate_core::recipe::{Recipe, RecipeId, Step};
use cookmate_core::{CookmateError, Result};
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};
use tokio::sync::Notify;

pub fn recipe_with_steps(count: u32) -> Recipe {
    Recipe {
        id: 11,
        title: "Tomato Pasta".to_string(),
        description: None,
        steps: (1..=count)
            .map(|n| Step::new(n, format!("Step {n}: stir and simmer for {n} minutes")))
            .collect(),
        preparation_time: Some(10),
        cooking_time: Some(20),
        servings: Some(2),
    }
}

/// Records calls and replays scripted results for the session endpoints.
#[derive(Default)]
pub struct MockCookingApi {
    pub start_calls: Mutex<Vec<RecipeId>>,
    pub end_calls: Mutex<Vec<(SessionId, Option<String>)>>,
    pub fail_start: Mutex<bool>,
    pub fail_end: Mutex<bool>,
    /// When set, `start_session` waits for a notification before answering.
    pub start_gate: Option<Arc<Notify>>,
}

impl MockCookingApi {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn gated(gate: Arc<Notify>) -> Self {
        Self {
            start_gate: Some(gate),
            ..Self::default()
        }
    }

    pub fn set_fail_start(&self, fail: bool) {
        *self.fail_start.lock().unwrap() = fail;
    }

    pub fn set_fail_end(&self, fail: bool) {
        *self.fail_end.lock().unwrap() = fail;
    }

    pub fn start_count(&self) -> usize {
        self.start_calls.lock().unwrap().len()
    }

    pub fn end_count(&self) -> usize {
        self.end_calls.lock().unwrap().len()
    }
}

#[async_trait]
impl CookingSessionApi for MockCookingApi {
    async fn start_session(&self, recipe_id: RecipeId) -> Result<CookingSession> {
        self.start_calls.lock().unwrap().push(recipe_id);
        if let Some(gate) = &self.start_gate {
            gate.notified().await;
        }
        if *self.fail_start.lock().unwrap() {
            return Err(CookmateError::network("connection refused"));
        }
        Ok(CookingSession {
            id: 100 + self.start_count() as i64,
            recipe_id,
            started_at: Utc::now(),
            ended_at: None,
            notes: None,
        })
    }

    async fn end_session(
        &self,
        session_id: SessionId,
        notes: Option<String>,
    ) -> Result<CookingSession> {
        self.end_calls
            .lock()
            .unwrap()
            .push((session_id, notes.clone()));
        if *self.fail_end.lock().unwrap() {
            return Err(CookmateError::http(503, "unavailable"));
        }
        Ok(CookingSession {
            id: session_id,
            recipe_id: 11,
            started_at: Utc::now(),
            ended_at: Some(Utc::now()),
            notes,
        })
    }
}

/// Replays queued chat results and records outgoing payloads.
#[derive(Default)]
pub struct MockChatApi {
    pub sent: Mutex<Vec<String>>,
    pub replies: Mutex<VecDeque<Result<ChatReply>>>,
    pub history: Mutex<Option<Result<Vec<ChatHistoryRecord>>>>,
    pub history_calls: Mutex<usize>,
    /// When set, `send_chat` waits for a notification before answering.
    pub reply_gate: Option<Arc<Notify>>,
}

impl MockChatApi {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn gated(gate: Arc<Notify>) -> Self {
        Self {
            reply_gate: Some(gate),
            ..Self::default()
        }
    }

    pub fn push_reply(&self, reply: Result<ChatReply>) {
        self.replies.lock().unwrap().push_back(reply);
    }

    pub fn set_history(&self, history: Result<Vec<ChatHistoryRecord>>) {
        *self.history.lock().unwrap() = Some(history);
    }

    pub fn sent(&self) -> Vec<String> {
        self.sent.lock().unwrap().clone()
    }

    pub fn history_call_count(&self) -> usize {
        *self.history_calls.lock().unwrap()
    }
}

#[async_trait]
impl ChatApi for MockChatApi {
    async fn send_chat(&self, message: &str) -> Result<ChatReply> {
        self.sent.lock().unwrap().push(message.to_string());
        if let Some(gate) = &self.reply_gate {
            gate.notified().await;
        }
        self.replies
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Err(CookmateError::internal("no scripted reply")))
    }

    async fn chat_history(&self) -> Result<Vec<ChatHistoryRecord>> {
        *self.history_calls.lock().unwrap() += 1;
        self.history
            .lock()
            .unwrap()
            .clone()
            .unwrap_or_else(|| Ok(Vec::new()))
    }
}
