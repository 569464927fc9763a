//! Events sent from the session core to the presentation layer.
//!
//! The core never renders anything. Toasts, navigation and focus changes are
//! published on an unbounded channel that the front-end drains.

use cookmate_core::cooking::TimerId;
use cookmate_core::recipe::RecipeId;
use serde::Serialize;
use tokio::sync::mpsc;

/// Severity of a toast notification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum NotificationLevel {
    Info,
    Success,
    Error,
}

/// Destination of a navigation request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Navigation {
    RecipeDetail { recipe_id: RecipeId },
}

/// Something the front-end should react to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum UiEvent {
    Notification {
        level: NotificationLevel,
        message: String,
    },
    Navigate {
        to: Navigation,
    },
    FocusChatInput,
    TimerFinished {
        timer_id: TimerId,
        label: String,
    },
}

/// Sending half of the UI event channel.
///
/// Sending never fails from the caller's point of view: if the front-end has
/// gone away, events are dropped.
#[derive(Debug, Clone, Default)]
pub struct EventSink {
    sender: Option<mpsc::UnboundedSender<UiEvent>>,
}

impl EventSink {
    /// Creates a sink and the receiver the front-end drains.
    pub fn channel() -> (Self, mpsc::UnboundedReceiver<UiEvent>) {
        let (sender, receiver) = mpsc::unbounded_channel();
        (
            Self {
                sender: Some(sender),
            },
            receiver,
        )
    }

    /// A sink that discards everything.
    pub fn disabled() -> Self {
        Self::default()
    }

    pub fn emit(&self, event: UiEvent) {
        if let Some(sender) = &self.sender {
            // Receiver gone means the view is closed; nothing to do.
            let _ = sender.send(event);
        }
    }

    pub fn notify(&self, level: NotificationLevel, message: impl Into<String>) {
        self.emit(UiEvent::Notification {
            level,
            message: message.into(),
        });
    }

    pub fn notify_error(&self, message: impl Into<String>) {
        self.notify(NotificationLevel::Error, message);
    }

    pub fn navigate(&self, to: Navigation) {
        self.emit(UiEvent::Navigate { to });
    }
}
