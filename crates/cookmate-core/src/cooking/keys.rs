//! Keyboard shortcuts of the cooking view.

use serde::{Deserialize, Serialize};

/// A key press as reported by the presentation layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Key {
    ArrowLeft,
    ArrowRight,
    Space,
    Char(char),
}

/// Action bound to a key while a cooking session view is active.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum KeyCommand {
    PreviousStep,
    NextStep,
    ToggleRun,
    ToggleCurrentComplete,
    FocusChat,
}

impl KeyCommand {
    /// Maps a key to its command. Unbound keys yield `None`.
    pub fn from_key(key: Key) -> Option<Self> {
        match key {
            Key::ArrowLeft => Some(Self::PreviousStep),
            Key::ArrowRight => Some(Self::NextStep),
            Key::Space | Key::Char(' ') => Some(Self::ToggleRun),
            Key::Char('m') | Key::Char('M') => Some(Self::ToggleCurrentComplete),
            Key::Char('/') => Some(Self::FocusChat),
            Key::Char(_) => None,
        }
    }
}
