//! A mounted cooking view.
//!
//! Wires one recipe's session controller, its assistant panel, the shared
//! ticker and the keyboard listener together, and tears all of them down
//! when the view goes away.

use crate::assistant::{AssistantBridge, AssistantSettings, SendOutcome};
use crate::event::EventSink;
use crate::keyboard::{KeyListenerGuard, KeyboardHub};
use crate::scope::ViewScope;
use crate::session_controller::{SessionController, SessionSnapshot};
use crate::ticker::{TICK_PERIOD, TickerHandle, spawn_ticker};
use cookmate_core::api::{ChatApi, CookingSessionApi};
use cookmate_core::recipe::Recipe;
use std::sync::Arc;
use std::time::Duration;

#[derive(Debug, Clone)]
pub struct ViewSettings {
    pub assistant: AssistantSettings,
    pub tick_period: Duration,
}

impl Default for ViewSettings {
    fn default() -> Self {
        Self {
            assistant: AssistantSettings::default(),
            tick_period: TICK_PERIOD,
        }
    }
}

/// Everything a cooking page keeps alive while it is shown.
///
/// Dropping the view closes its scope, stops the ticker and detaches the key
/// listener. Requests still in flight complete but their results are dropped.
pub struct CookingView {
    controller: Arc<SessionController>,
    assistant: Arc<AssistantBridge>,
    scope: ViewScope,
    _ticker: TickerHandle,
    _keys: KeyListenerGuard,
}

impl CookingView {
    /// Mounts a view for `recipe` and kicks off the automatic session start.
    pub fn mount(
        recipe: Recipe,
        session_api: Arc<dyn CookingSessionApi>,
        chat_api: Arc<dyn ChatApi>,
        keyboard: &KeyboardHub,
        settings: ViewSettings,
        events: EventSink,
    ) -> Self {
        let scope = ViewScope::new();
        tracing::info!(recipe_id = recipe.id, "Mounting cooking view");

        let controller = Arc::new(SessionController::new(
            recipe,
            session_api,
            events.clone(),
            scope.clone(),
        ));
        let assistant = Arc::new(AssistantBridge::new(
            chat_api,
            settings.assistant,
            events,
            scope.clone(),
        ));

        let ticker = spawn_ticker(controller.clone(), settings.tick_period);
        let keys = keyboard.attach(controller.clone());

        let starter = controller.clone();
        tokio::spawn(async move {
            starter.on_recipe_loaded().await;
        });

        Self {
            controller,
            assistant,
            scope,
            _ticker: ticker,
            _keys: keys,
        }
    }

    pub fn controller(&self) -> &Arc<SessionController> {
        &self.controller
    }

    pub fn assistant(&self) -> &Arc<AssistantBridge> {
        &self.assistant
    }

    pub fn is_mounted(&self) -> bool {
        self.scope.is_active()
    }

    pub async fn snapshot(&self) -> SessionSnapshot {
        self.controller.snapshot().await
    }

    /// Asks the assistant about the step currently shown.
    pub async fn ask(&self, text: &str) -> SendOutcome {
        self.controller.ask_assistant(&self.assistant, text).await
    }

    /// Unmounts explicitly. Same as dropping the view.
    pub fn unmount(self) {}
}

impl Drop for CookingView {
    fn drop(&mut self) {
        self.scope.close();
        tracing::info!(
            recipe_id = self.controller.recipe().id,
            "Cooking view unmounted"
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{MockChatApi, MockCookingApi, recipe_with_steps};
    use cookmate_core::cooking::{Key, StartState};

    fn mount(
        hub: &KeyboardHub,
        session_api: Arc<MockCookingApi>,
    ) -> CookingView {
        CookingView::mount(
            recipe_with_steps(3),
            session_api,
            Arc::new(MockChatApi::new()),
            hub,
            ViewSettings::default(),
            EventSink::disabled(),
        )
    }

    #[tokio::test(start_paused = true)]
    async fn test_mount_starts_session_and_clock() {
        let hub = KeyboardHub::new();
        let api = Arc::new(MockCookingApi::new());
        let view = mount(&hub, api.clone());

        tokio::time::sleep(Duration::from_millis(2500)).await;

        assert_eq!(api.start_count(), 1);
        assert!(matches!(
            view.controller().start_state().await,
            StartState::Started(_)
        ));
        let snapshot = view.snapshot().await;
        assert!(snapshot.is_running);
        assert_eq!(snapshot.elapsed_seconds, 2);
    }

    #[tokio::test(start_paused = true)]
    async fn test_unmount_releases_keys_and_stops_ticking() {
        let hub = KeyboardHub::new();
        let view = mount(&hub, Arc::new(MockCookingApi::new()));
        tokio::time::sleep(Duration::from_millis(1500)).await;

        assert_eq!(hub.listener_count(), 1);
        assert!(hub.dispatch(Key::ArrowRight).await);
        assert_eq!(view.snapshot().await.current_index, 1);

        let controller = view.controller().clone();
        view.unmount();

        assert_eq!(hub.listener_count(), 0);
        assert!(!hub.dispatch(Key::ArrowRight).await);

        let elapsed = controller.snapshot().await.elapsed_seconds;
        tokio::time::sleep(Duration::from_secs(5)).await;
        assert_eq!(controller.snapshot().await.elapsed_seconds, elapsed);
    }
}
