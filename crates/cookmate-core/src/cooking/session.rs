//! Cooking session record and start lifecycle.

use crate::recipe::RecipeId;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Backend identifier of a cooking session.
pub type SessionId = i64;

/// One continuous cooking attempt, as stored by the backend.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CookingSession {
    pub id: SessionId,
    pub recipe_id: RecipeId,
    pub started_at: DateTime<Utc>,
    #[serde(default)]
    pub ended_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub notes: Option<String>,
}

/// Where the session-create call stands.
///
/// Guards the automatic start against firing twice: only `NotStarted`
/// triggers it, and `Failed` only restarts on an explicit request.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum StartState {
    #[default]
    NotStarted,
    Starting,
    Started(CookingSession),
    Failed(String),
}

impl StartState {
    pub fn session(&self) -> Option<&CookingSession> {
        match self {
            StartState::Started(session) => Some(session),
            _ => None,
        }
    }

    pub fn session_id(&self) -> Option<SessionId> {
        self.session().map(|session| session.id)
    }

    /// Without a backend session, progress is tracked locally only.
    pub fn is_local_only(&self) -> bool {
        matches!(self, StartState::Failed(_))
    }

    /// Whether an explicit start request should issue a new call.
    pub fn can_start(&self) -> bool {
        matches!(self, StartState::NotStarted | StartState::Failed(_))
    }
}
