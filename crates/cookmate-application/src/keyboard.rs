//! Scoped keyboard listener.
//!
//! The front-end forwards every key press to one [`KeyboardHub`]. A cooking
//! view attaches a handler when it mounts and gets a [`KeyListenerGuard`];
//! dropping the guard detaches the handler, so no listener outlives its view.

use async_trait::async_trait;
use cookmate_core::cooking::{Key, KeyCommand};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, MutexGuard};

/// Something that reacts to cooking-view shortcuts.
#[async_trait]
pub trait KeyHandler: Send + Sync {
    async fn handle_command(&self, command: KeyCommand);
}

type Listeners = Arc<Mutex<Vec<(u64, Arc<dyn KeyHandler>)>>>;

fn lock(listeners: &Listeners) -> MutexGuard<'_, Vec<(u64, Arc<dyn KeyHandler>)>> {
    listeners
        .lock()
        .unwrap_or_else(|poisoned| poisoned.into_inner())
}

/// Document-level key dispatch.
///
/// Only the most recently attached live handler receives keys.
#[derive(Default)]
pub struct KeyboardHub {
    listeners: Listeners,
    next_id: AtomicU64,
}

impl KeyboardHub {
    pub fn new() -> Self {
        Self::default()
    }

    /// Attaches `handler` until the returned guard is dropped.
    #[must_use = "the listener is detached as soon as the guard is dropped"]
    pub fn attach(&self, handler: Arc<dyn KeyHandler>) -> KeyListenerGuard {
        let id = self.next_id.fetch_add(1, Ordering::Relaxed);
        lock(&self.listeners).push((id, handler));
        tracing::debug!(listener_id = id, "Key listener attached");

        KeyListenerGuard {
            id,
            listeners: Arc::clone(&self.listeners),
        }
    }

    /// Routes a key press. Returns true if a handler consumed it.
    pub async fn dispatch(&self, key: Key) -> bool {
        let Some(command) = KeyCommand::from_key(key) else {
            return false;
        };

        // Clone the handler out so the lock is not held across the await.
        let handler = lock(&self.listeners)
            .last()
            .map(|(_, handler)| Arc::clone(handler));

        match handler {
            Some(handler) => {
                handler.handle_command(command).await;
                true
            }
            None => false,
        }
    }

    pub fn listener_count(&self) -> usize {
        lock(&self.listeners).len()
    }
}

/// Keeps a handler attached to a [`KeyboardHub`].
pub struct KeyListenerGuard {
    id: u64,
    listeners: Listeners,
}

impl Drop for KeyListenerGuard {
    fn drop(&mut self) {
        lock(&self.listeners).retain(|(id, _)| *id != self.id);
        tracing::debug!(listener_id = self.id, "Key listener released");
    }
}
