//! Lifecycle of one cooking session.
//!
//! `SessionController` is responsible for:
//! - Creating the backend session once the recipe is available
//! - Running the elapsed-time clock and the countdown timers
//! - Step navigation and completion marks
//! - Ending the session and asking the front-end to navigate away
//!
//! State lives behind a `tokio::sync::RwLock` that is never held across a
//! network call. Late responses after the view closed are dropped.

use crate::assistant::{AssistantBridge, SendOutcome};
use crate::event::{EventSink, Navigation, NotificationLevel, UiEvent};
use crate::keyboard::KeyHandler;
use crate::scope::ViewScope;
use crate::ticker::TickTarget;
use async_trait::async_trait;
use cookmate_core::api::CookingSessionApi;
use cookmate_core::chat::CookingContext;
use cookmate_core::cooking::{
    ElapsedClock, KeyCommand, StartState, StepNavigator, Timer, TimerId, TimerManager,
};
use cookmate_core::recipe::{Recipe, Step, suggest_timer_minutes};
use cookmate_core::{CookmateError, Result};
use serde::Serialize;
use std::sync::Arc;
use tokio::sync::RwLock;

/// Result of asking to leave the cooking view.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExitDecision {
    /// The clock is running; the user must confirm before leaving.
    ConfirmationRequired,
    /// Navigation was requested.
    Exited,
}

/// Read-only view of the session for rendering.
#[derive(Debug, Clone, Serialize)]
pub struct SessionSnapshot {
    pub recipe_title: String,
    pub session_id: Option<i64>,
    pub local_only: bool,
    pub is_running: bool,
    pub elapsed_seconds: u64,
    pub current_index: usize,
    pub step_count: usize,
    pub is_first_step: bool,
    pub is_last_step: bool,
    pub current_step: Option<Step>,
    pub completed: Vec<usize>,
    pub progress: f64,
    pub estimated_minutes_remaining: u32,
    pub timers: Vec<Timer>,
    pub notes: Option<String>,
}

#[derive(Debug, Default)]
struct SessionState {
    start: StartState,
    navigator: StepNavigator,
    timers: TimerManager,
    clock: ElapsedClock,
    notes: Option<String>,
    /// Set once the session has been finished; the clock stays stopped.
    finished: bool,
}

/// Orchestrates one cooking session for one recipe.
pub struct SessionController {
    recipe: Recipe,
    api: Arc<dyn CookingSessionApi>,
    state: RwLock<SessionState>,
    events: EventSink,
    scope: ViewScope,
}

impl SessionController {
    /// Creates a controller for `recipe`. Nothing is sent until
    /// [`on_recipe_loaded`](Self::on_recipe_loaded) or [`start`](Self::start).
    pub fn new(
        recipe: Recipe,
        api: Arc<dyn CookingSessionApi>,
        events: EventSink,
        scope: ViewScope,
    ) -> Self {
        let navigator = StepNavigator::for_recipe(&recipe);
        Self {
            recipe,
            api,
            state: RwLock::new(SessionState {
                navigator,
                ..SessionState::default()
            }),
            events,
            scope,
        }
    }

    pub fn recipe(&self) -> &Recipe {
        &self.recipe
    }

    pub fn scope(&self) -> &ViewScope {
        &self.scope
    }

    // ============================================================================
    // Lifecycle
    // ============================================================================

    /// Starts the session automatically when recipe data arrives.
    ///
    /// Only fires from `NotStarted`; repeated data-arrival events and a
    /// previous failure do not issue another request.
    pub async fn on_recipe_loaded(&self) -> StartState {
        self.begin_start(false).await
    }

    /// Creates the backend session.
    ///
    /// Allowed from `NotStarted` and `Failed` (manual retry); a no-op while a
    /// start is in flight or already succeeded. On failure the session keeps
    /// working locally without persistence.
    pub async fn start(&self) -> StartState {
        self.begin_start(true).await
    }

    async fn begin_start(&self, allow_retry: bool) -> StartState {
        {
            let mut state = self.state.write().await;
            let allowed = state.start.can_start()
                && (allow_retry || state.start == StartState::NotStarted)
                && !state.finished;
            if !allowed {
                tracing::debug!(recipe_id = self.recipe.id, "Session start skipped");
                return state.start.clone();
            }
            state.start = StartState::Starting;
        }

        tracing::info!(recipe_id = self.recipe.id, "Starting cooking session");
        let result = self.api.start_session(self.recipe.id).await;

        if !self.scope.is_active() {
            tracing::debug!("View closed before session start resolved; dropping result");
            return StartState::Starting;
        }

        let mut state = self.state.write().await;
        match result {
            Ok(session) => {
                tracing::info!(session_id = session.id, "Cooking session started");
                state.start = StartState::Started(session);
                if !state.finished {
                    state.clock.start();
                }
            }
            Err(err) => {
                tracing::warn!("Failed to start cooking session: {}", err);
                self.events.notify_error(format!(
                    "Could not start the cooking session. Progress will not be saved. {}",
                    err.user_message()
                ));
                state.start = StartState::Failed(err.to_string());
            }
        }
        state.start.clone()
    }

    /// Pauses or resumes the clock. Returns the new running state.
    pub async fn toggle_run(&self) -> bool {
        let running = self.state.write().await.clock.toggle();
        tracing::debug!(running, "Session clock toggled");
        running
    }

    /// Stops the clock, ends the backend session with the notes, and
    /// navigates to the recipe detail.
    ///
    /// On failure the error is surfaced and local state is kept as is, so the
    /// user can retry or leave. Without a backend session there is nothing to
    /// persist and navigation happens directly. While the session is still
    /// being created, finishing is refused so the new session is not orphaned.
    pub async fn finish(&self) -> Result<()> {
        let (session_id, notes) = {
            let mut state = self.state.write().await;
            if state.start == StartState::Starting {
                tracing::debug!(recipe_id = self.recipe.id, "Finish refused while starting");
                self.events.notify(
                    NotificationLevel::Info,
                    "The cooking session is still starting. Try again in a moment.",
                );
                return Err(CookmateError::invalid_state("cooking session is still starting"));
            }
            state.clock.stop();
            let session_id = state.start.session_id();
            if session_id.is_none() {
                state.finished = true;
            }
            (session_id, state.notes.clone())
        };

        let Some(session_id) = session_id else {
            tracing::info!(recipe_id = self.recipe.id, "Finishing local-only session");
            self.navigate_to_recipe();
            return Ok(());
        };

        tracing::info!(session_id, "Ending cooking session");
        let result = self.api.end_session(session_id, notes).await;

        if !self.scope.is_active() {
            tracing::debug!("View closed before session end resolved; dropping result");
            return result.map(|_| ());
        }

        match result {
            Ok(session) => {
                let mut state = self.state.write().await;
                state.start = StartState::Started(session);
                state.finished = true;
                drop(state);
                self.events
                    .notify(NotificationLevel::Success, "Cooking session saved");
                self.navigate_to_recipe();
                Ok(())
            }
            Err(err) => {
                tracing::warn!(session_id, "Failed to end cooking session: {}", err);
                self.events.notify_error(format!(
                    "Could not save the cooking session. {}",
                    err.user_message()
                ));
                Err(err)
            }
        }
    }

    /// Leaves immediately when the clock is stopped; otherwise asks for
    /// confirmation first.
    pub async fn request_exit(&self) -> ExitDecision {
        if self.state.read().await.clock.is_running() {
            return ExitDecision::ConfirmationRequired;
        }
        self.navigate_to_recipe();
        ExitDecision::Exited
    }

    /// Discards the live clock and leaves.
    pub async fn confirm_exit(&self) {
        self.state.write().await.clock.stop();
        tracing::info!(recipe_id = self.recipe.id, "Cooking session abandoned");
        self.navigate_to_recipe();
    }

    fn navigate_to_recipe(&self) {
        self.events.navigate(Navigation::RecipeDetail {
            recipe_id: self.recipe.id,
        });
    }

    // ============================================================================
    // Steps
    // ============================================================================

    pub async fn go_to(&self, index: i64) -> usize {
        self.state.write().await.navigator.go_to(index)
    }

    pub async fn next_step(&self) -> bool {
        self.state.write().await.navigator.next()
    }

    pub async fn previous_step(&self) -> bool {
        self.state.write().await.navigator.previous()
    }

    pub async fn toggle_complete(&self, index: usize) -> bool {
        self.state.write().await.navigator.toggle_complete(index)
    }

    pub async fn toggle_current_complete(&self) -> bool {
        self.state.write().await.navigator.toggle_current_complete()
    }

    // ============================================================================
    // Timers
    // ============================================================================

    pub async fn start_timer(&self, label: impl Into<String>, minutes: u32) -> TimerId {
        let label = label.into();
        tracing::debug!(%label, minutes, "Timer started");
        self.state.write().await.timers.start_timer(label, minutes)
    }

    /// Starts a timer for the current step from its hint, or from a duration
    /// found in the instruction text. Returns `None` if neither exists.
    pub async fn start_step_timer(&self) -> Option<TimerId> {
        let mut state = self.state.write().await;
        let index = state.navigator.current_index();
        let step = state.navigator.current_step()?;
        let minutes = step
            .timer_minutes
            .or_else(|| suggest_timer_minutes(&step.instruction_text))?;
        let label = format!("Step {}", index + 1);
        Some(state.timers.start_timer(label, minutes))
    }

    pub async fn toggle_timer(&self, id: &TimerId) -> bool {
        self.state.write().await.timers.toggle_timer(id)
    }

    pub async fn remove_timer(&self, id: &TimerId) -> Option<Timer> {
        self.state.write().await.timers.remove_timer(id)
    }

    // ============================================================================
    // Notes
    // ============================================================================

    pub async fn set_notes(&self, notes: impl Into<String>) {
        let notes = notes.into();
        self.state.write().await.notes = (!notes.trim().is_empty()).then_some(notes);
    }

    /// Appends a line to the notes sent when the session ends.
    pub async fn append_note(&self, line: &str) {
        let line = line.trim();
        if line.is_empty() {
            return;
        }
        let mut state = self.state.write().await;
        match &mut state.notes {
            Some(notes) => {
                notes.push('\n');
                notes.push_str(line);
            }
            None => state.notes = Some(line.to_string()),
        }
    }

    // ============================================================================
    // Reads
    // ============================================================================

    pub async fn start_state(&self) -> StartState {
        self.state.read().await.start.clone()
    }

    pub async fn is_running(&self) -> bool {
        self.state.read().await.clock.is_running()
    }

    pub async fn snapshot(&self) -> SessionSnapshot {
        let state = self.state.read().await;
        SessionSnapshot {
            recipe_title: self.recipe.title.clone(),
            session_id: state.start.session_id(),
            local_only: state.start.is_local_only(),
            is_running: state.clock.is_running(),
            elapsed_seconds: state.clock.elapsed_seconds(),
            current_index: state.navigator.current_index(),
            step_count: state.navigator.step_count(),
            is_first_step: state.navigator.is_first(),
            is_last_step: state.navigator.is_last(),
            current_step: state.navigator.current_step().cloned(),
            completed: state.navigator.completed().iter().copied().collect(),
            progress: state.navigator.progress(),
            estimated_minutes_remaining: state
                .navigator
                .estimate_time_remaining(self.recipe.total_minutes()),
            timers: state.timers.timers().to_vec(),
            notes: state.notes.clone(),
        }
    }

    /// Recipe and step context for assistant questions.
    pub async fn cooking_context(&self) -> CookingContext {
        let state = self.state.read().await;
        CookingContext {
            recipe_title: self.recipe.title.clone(),
            step_index: state.navigator.current_index(),
            step_count: state.navigator.step_count(),
            step_text: state
                .navigator
                .current_step()
                .map(|step| step.instruction_text.clone()),
        }
    }

    /// Sends a question through `assistant`, bound to the current step.
    pub async fn ask_assistant(&self, assistant: &AssistantBridge, text: &str) -> SendOutcome {
        let context = self.cooking_context().await;
        assistant.send_with_context(text, Some(&context)).await
    }
}

#[async_trait]
impl TickTarget for SessionController {
    /// Advances the clock and every timer by one second.
    async fn tick(&self) {
        if !self.scope.is_active() {
            return;
        }
        let finished = {
            let mut state = self.state.write().await;
            state.clock.tick();
            state.timers.tick()
        };
        for timer in finished {
            tracing::info!(timer_id = %timer.id, label = %timer.label, "Timer finished");
            self.events.emit(UiEvent::TimerFinished {
                timer_id: timer.id,
                label: timer.label,
            });
        }
    }
}

#[async_trait]
impl KeyHandler for SessionController {
    async fn handle_command(&self, command: KeyCommand) {
        match command {
            KeyCommand::PreviousStep => {
                self.previous_step().await;
            }
            KeyCommand::NextStep => {
                self.next_step().await;
            }
            KeyCommand::ToggleRun => {
                self.toggle_run().await;
            }
            KeyCommand::ToggleCurrentComplete => {
                self.toggle_current_complete().await;
            }
            KeyCommand::FocusChat => self.events.emit(UiEvent::FocusChatInput),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assistant::AssistantSettings;
    use crate::test_support::{MockChatApi, MockCookingApi, recipe_with_steps};
    use cookmate_core::api::ChatReply;
    use tokio::sync::Notify;
    use tokio::sync::mpsc::UnboundedReceiver;

    fn controller(
        api: Arc<MockCookingApi>,
        steps: u32,
    ) -> (SessionController, UnboundedReceiver<UiEvent>) {
        let (events, receiver) = EventSink::channel();
        let controller =
            SessionController::new(recipe_with_steps(steps), api, events, ViewScope::new());
        (controller, receiver)
    }

    fn drain(receiver: &mut UnboundedReceiver<UiEvent>) -> Vec<UiEvent> {
        let mut events = Vec::new();
        while let Ok(event) = receiver.try_recv() {
            events.push(event);
        }
        events
    }

    #[tokio::test]
    async fn test_recipe_loaded_starts_session_and_clock() {
        let api = Arc::new(MockCookingApi::new());
        let (controller, _events) = controller(api.clone(), 3);

        let state = controller.on_recipe_loaded().await;

        assert!(matches!(state, StartState::Started(_)));
        assert_eq!(api.start_count(), 1);
        assert!(controller.is_running().await);
        assert_eq!(controller.snapshot().await.session_id, Some(101));
    }

    #[tokio::test]
    async fn test_duplicate_load_events_issue_one_request() {
        let gate = Arc::new(Notify::new());
        let api = Arc::new(MockCookingApi::gated(gate.clone()));
        let (controller, _events) = controller(api.clone(), 3);
        let controller = Arc::new(controller);

        let first = {
            let controller = controller.clone();
            tokio::spawn(async move { controller.on_recipe_loaded().await })
        };
        tokio::task::yield_now().await;

        assert_eq!(controller.start_state().await, StartState::Starting);
        assert_eq!(controller.on_recipe_loaded().await, StartState::Starting);
        assert_eq!(controller.start().await, StartState::Starting);

        gate.notify_one();
        assert!(matches!(first.await.unwrap(), StartState::Started(_)));
        assert!(matches!(
            controller.on_recipe_loaded().await,
            StartState::Started(_)
        ));
        assert_eq!(api.start_count(), 1);
    }

    #[tokio::test]
    async fn test_start_failure_falls_back_to_local_session() {
        let api = Arc::new(MockCookingApi::new());
        api.set_fail_start(true);
        let (controller, mut events) = controller(api.clone(), 3);

        let state = controller.on_recipe_loaded().await;

        assert!(matches!(state, StartState::Failed(_)));
        assert!(!controller.is_running().await);
        assert!(controller.snapshot().await.local_only);
        assert!(matches!(
            drain(&mut events).as_slice(),
            [UiEvent::Notification {
                level: NotificationLevel::Error,
                ..
            }]
        ));

        // navigation keeps working without a backend session
        assert!(controller.next_step().await);
        assert!(controller.toggle_current_complete().await);
        assert_eq!(controller.snapshot().await.completed, vec![1]);

        // data arrival again does not retry
        controller.on_recipe_loaded().await;
        assert_eq!(api.start_count(), 1);
    }

    #[tokio::test]
    async fn test_explicit_start_retries_after_failure() {
        let api = Arc::new(MockCookingApi::new());
        api.set_fail_start(true);
        let (controller, _events) = controller(api.clone(), 2);
        controller.on_recipe_loaded().await;

        api.set_fail_start(false);
        let state = controller.start().await;

        assert!(matches!(state, StartState::Started(_)));
        assert_eq!(api.start_count(), 2);
        assert!(controller.is_running().await);
        assert!(!controller.snapshot().await.local_only);
    }

    #[tokio::test]
    async fn test_clock_accrues_only_while_running() {
        let api = Arc::new(MockCookingApi::new());
        let (controller, _events) = controller(api, 2);
        controller.on_recipe_loaded().await;

        controller.tick().await;
        controller.tick().await;
        assert!(!controller.toggle_run().await);
        controller.tick().await;
        assert!(controller.toggle_run().await);
        controller.tick().await;

        assert_eq!(controller.snapshot().await.elapsed_seconds, 3);
    }

    #[tokio::test]
    async fn test_finished_timer_emits_event_once() {
        let api = Arc::new(MockCookingApi::new());
        let (controller, mut events) = controller(api, 2);
        let id = controller.start_timer("Boil", 1).await;

        for _ in 0..61 {
            controller.tick().await;
        }

        let finished: Vec<_> = drain(&mut events)
            .into_iter()
            .filter_map(|event| match event {
                UiEvent::TimerFinished { timer_id, label } => Some((timer_id, label)),
                _ => None,
            })
            .collect();
        assert_eq!(finished, vec![(id.clone(), "Boil".to_string())]);

        let timers = controller.snapshot().await.timers;
        assert_eq!(timers[0].remaining_seconds, 0);
        assert!(timers[0].is_finished());
    }

    #[tokio::test]
    async fn test_step_timer_uses_hint_or_instruction() {
        let api = Arc::new(MockCookingApi::new());
        let (controller, _events) = controller(api, 2);

        // "Step 1: stir and simmer for 1 minutes"
        let id = controller.start_step_timer().await.unwrap();
        let snapshot = controller.snapshot().await;
        let timer = snapshot.timers.iter().find(|t| t.id == id).unwrap();
        assert_eq!(timer.duration_seconds, 60);
        assert_eq!(timer.label, "Step 1");
    }

    #[tokio::test]
    async fn test_exit_requires_confirmation_while_running() {
        let api = Arc::new(MockCookingApi::new());
        let (controller, mut events) = controller(api, 2);
        controller.on_recipe_loaded().await;

        assert_eq!(
            controller.request_exit().await,
            ExitDecision::ConfirmationRequired
        );
        assert!(drain(&mut events).is_empty());

        controller.confirm_exit().await;
        assert!(!controller.is_running().await);
        assert_eq!(
            drain(&mut events),
            vec![UiEvent::Navigate {
                to: Navigation::RecipeDetail { recipe_id: 11 }
            }]
        );
    }

    #[tokio::test]
    async fn test_exit_when_paused_navigates_immediately() {
        let api = Arc::new(MockCookingApi::new());
        let (controller, mut events) = controller(api, 2);

        assert_eq!(controller.request_exit().await, ExitDecision::Exited);
        assert_eq!(drain(&mut events).len(), 1);
    }

    #[tokio::test]
    async fn test_navigate_complete_and_finish() {
        let api = Arc::new(MockCookingApi::new());
        let (controller, mut events) = controller(api.clone(), 3);
        controller.on_recipe_loaded().await;
        assert!(controller.snapshot().await.is_first_step);

        assert_eq!(controller.go_to(2).await, 2);
        assert!(controller.toggle_complete(2).await);
        let snapshot = controller.snapshot().await;
        assert_eq!(snapshot.completed, vec![2]);
        assert!(snapshot.is_last_step && !snapshot.is_first_step);
        controller.append_note("a bit more salt").await;

        controller.finish().await.unwrap();

        assert_eq!(
            *api.end_calls.lock().unwrap(),
            vec![(101, Some("a bit more salt".to_string()))]
        );
        assert!(!controller.is_running().await);
        let events = drain(&mut events);
        assert_eq!(
            events.last(),
            Some(&UiEvent::Navigate {
                to: Navigation::RecipeDetail { recipe_id: 11 }
            })
        );
    }

    #[tokio::test]
    async fn test_finish_failure_keeps_state_and_stays() {
        let api = Arc::new(MockCookingApi::new());
        api.set_fail_end(true);
        let (controller, mut events) = controller(api.clone(), 3);
        controller.on_recipe_loaded().await;
        controller.go_to(1).await;

        assert!(controller.finish().await.is_err());

        let snapshot = controller.snapshot().await;
        assert_eq!(snapshot.current_index, 1);
        assert_eq!(snapshot.session_id, Some(101));
        let events = drain(&mut events);
        assert!(
            events
                .iter()
                .all(|event| !matches!(event, UiEvent::Navigate { .. }))
        );
        assert!(events.iter().any(|event| matches!(
            event,
            UiEvent::Notification {
                level: NotificationLevel::Error,
                ..
            }
        )));

        // retry succeeds
        api.set_fail_end(false);
        controller.finish().await.unwrap();
        assert_eq!(api.end_count(), 2);
    }

    #[tokio::test]
    async fn test_finish_without_backend_session_just_navigates() {
        let api = Arc::new(MockCookingApi::new());
        api.set_fail_start(true);
        let (controller, mut events) = controller(api.clone(), 2);
        controller.on_recipe_loaded().await;
        drain(&mut events);

        controller.finish().await.unwrap();

        assert_eq!(api.end_count(), 0);
        assert_eq!(
            drain(&mut events),
            vec![UiEvent::Navigate {
                to: Navigation::RecipeDetail { recipe_id: 11 }
            }]
        );
    }

    #[tokio::test]
    async fn test_finish_while_starting_is_refused() {
        let gate = Arc::new(Notify::new());
        let api = Arc::new(MockCookingApi::gated(gate.clone()));
        let (controller, mut events) = controller(api.clone(), 2);
        let controller = Arc::new(controller);

        let pending = {
            let controller = controller.clone();
            tokio::spawn(async move { controller.on_recipe_loaded().await })
        };
        tokio::task::yield_now().await;

        let err = controller.finish().await.unwrap_err();
        assert!(matches!(err, CookmateError::InvalidState(_)));
        assert!(
            drain(&mut events)
                .iter()
                .all(|event| !matches!(event, UiEvent::Navigate { .. }))
        );

        gate.notify_one();
        assert!(matches!(pending.await.unwrap(), StartState::Started(_)));
        assert!(controller.is_running().await);

        // once started, finishing ends the backend session it created
        controller.finish().await.unwrap();
        assert_eq!(api.start_count(), 1);
        assert_eq!(api.end_count(), 1);
        assert!(!controller.is_running().await);
        assert!(drain(&mut events).contains(&UiEvent::Navigate {
            to: Navigation::RecipeDetail { recipe_id: 11 }
        }));
    }

    #[tokio::test]
    async fn test_finished_session_does_not_start_again() {
        let api = Arc::new(MockCookingApi::new());
        api.set_fail_start(true);
        let (controller, _events) = controller(api.clone(), 2);
        controller.on_recipe_loaded().await;
        controller.finish().await.unwrap();

        api.set_fail_start(false);
        assert!(matches!(controller.start().await, StartState::Failed(_)));
        assert_eq!(api.start_count(), 1);
        assert!(!controller.is_running().await);
    }

    #[tokio::test]
    async fn test_late_start_response_after_close_is_dropped() {
        let gate = Arc::new(Notify::new());
        let api = Arc::new(MockCookingApi::gated(gate.clone()));
        let (events, mut receiver) = EventSink::channel();
        let scope = ViewScope::new();
        let controller = Arc::new(SessionController::new(
            recipe_with_steps(2),
            api,
            events,
            scope.clone(),
        ));

        let pending = {
            let controller = controller.clone();
            tokio::spawn(async move { controller.on_recipe_loaded().await })
        };
        tokio::task::yield_now().await;
        scope.close();
        gate.notify_one();
        pending.await.unwrap();

        assert_eq!(controller.start_state().await, StartState::Starting);
        assert!(!controller.is_running().await);
        assert!(drain(&mut receiver).is_empty());
    }

    #[tokio::test]
    async fn test_key_commands_drive_the_session() {
        let api = Arc::new(MockCookingApi::new());
        let (controller, mut events) = controller(api, 3);

        controller.handle_command(KeyCommand::NextStep).await;
        controller.handle_command(KeyCommand::NextStep).await;
        controller.handle_command(KeyCommand::PreviousStep).await;
        controller.handle_command(KeyCommand::ToggleCurrentComplete).await;
        controller.handle_command(KeyCommand::ToggleRun).await;
        controller.handle_command(KeyCommand::FocusChat).await;

        let snapshot = controller.snapshot().await;
        assert_eq!(snapshot.current_index, 1);
        assert_eq!(snapshot.completed, vec![1]);
        assert!(snapshot.is_running);
        assert_eq!(drain(&mut events), vec![UiEvent::FocusChatInput]);
    }

    #[tokio::test]
    async fn test_questions_carry_current_step() {
        let api = Arc::new(MockCookingApi::new());
        let (controller, _events) = controller(api, 3);
        let chat = Arc::new(MockChatApi::new());
        chat.push_reply(Ok(ChatReply {
            ai_reply: Some("Medium heat".to_string()),
            cooking_recipe: None,
            message_id: 1,
        }));
        let assistant = AssistantBridge::new(
            chat.clone(),
            AssistantSettings::default(),
            EventSink::disabled(),
            ViewScope::new(),
        );
        controller.go_to(1).await;

        let outcome = controller.ask_assistant(&assistant, "how hot?").await;

        assert_eq!(outcome, SendOutcome::Replied);
        let sent = chat.sent();
        assert!(sent[0].contains("Tomato Pasta"));
        assert!(sent[0].contains("Step 2"));
        assert!(sent[0].ends_with("how hot?"));
    }
}
