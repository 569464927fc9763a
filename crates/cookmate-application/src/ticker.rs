//! The shared one-second tick source.
//!
//! One interval task drives the session clock and every countdown timer, so
//! the number of running intervals does not grow with the number of timers.

use async_trait::async_trait;
use std::sync::Arc;
use std::time::Duration;
use tokio::task::JoinHandle;
use tokio::time::{Instant, MissedTickBehavior};
use tokio_util::sync::CancellationToken;

/// Default tick period.
pub const TICK_PERIOD: Duration = Duration::from_secs(1);

/// Receiver of periodic ticks.
#[async_trait]
pub trait TickTarget: Send + Sync {
    async fn tick(&self);
}

/// Handle on a running ticker. Dropping it stops the ticker.
pub struct TickerHandle {
    token: CancellationToken,
    handle: Option<JoinHandle<()>>,
}

impl TickerHandle {
    /// Stops the ticker and waits for its task to exit.
    pub async fn shutdown(mut self) {
        self.token.cancel();
        if let Some(handle) = self.handle.take() {
            let _ = handle.await;
        }
    }
}

impl Drop for TickerHandle {
    fn drop(&mut self) {
        self.token.cancel();
    }
}

/// Spawns a task calling `target.tick()` every `period`.
///
/// The first tick fires one period after spawning. Late ticks are delayed
/// rather than bunched up, so a suspended process does not replay missed
/// seconds.
pub fn spawn_ticker(target: Arc<dyn TickTarget>, period: Duration) -> TickerHandle {
    let token = CancellationToken::new();
    let cancelled = token.clone();

    let handle = tokio::spawn(async move {
        let mut interval = tokio::time::interval_at(Instant::now() + period, period);
        interval.set_missed_tick_behavior(MissedTickBehavior::Delay);

        loop {
            tokio::select! {
                _ = cancelled.cancelled() => break,
                _ = interval.tick() => target.tick().await,
            }
        }
        tracing::debug!("Ticker stopped");
    });

    TickerHandle {
        token,
        handle: Some(handle),
    }
}
