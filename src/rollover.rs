use crate::day::{until_next_rollover, DayKey};
use crate::models::StateDocument;
use crate::state::AppState;
use crate::storage::persist_state;
use chrono::Local;
use std::time::Duration;
use tokio::task::JoinHandle;
use tracing::{debug, error, info};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MealPolicy {
    /// Catch-up at load: the app may have been reopened the same day, so
    /// meals already dated today survive.
    KeepToday,
    /// Live rollover at the day boundary: nothing can be dated today yet.
    ClearAll,
}

/// Returns whether a rollover was applied. A second call on the same day is a no-op.
pub fn apply_rollover_if_stale(doc: &mut StateDocument, today: &DayKey, policy: MealPolicy) -> bool {
    if doc.last_reset == *today {
        return false;
    }

    for task in &mut doc.tasks {
        task.done = false;
    }
    if doc.reset_meals_daily {
        match policy {
            MealPolicy::KeepToday => doc.meals.retain(|meal| meal.date == *today),
            MealPolicy::ClearAll => doc.meals.clear(),
        }
    }
    doc.last_reset = today.clone();
    true
}

pub async fn live_rollover_at(state: &AppState, today: &DayKey) -> bool {
    let mut data = state.data.lock().await;
    if !apply_rollover_if_stale(&mut data, today, MealPolicy::ClearAll) {
        return false;
    }

    info!(day = %today, "applied midnight rollover");
    if let Err(err) = persist_state(&state.data_path, &data).await {
        error!("failed to persist rollover: {}", err.message);
    }
    for callback in state.midnight_callbacks() {
        callback(&*data);
    }
    true
}

/// Background task that applies the live rollover at each local midnight.
/// Dropping the handle cancels it.
pub struct RolloverTimer {
    handle: JoinHandle<()>,
}

impl RolloverTimer {
    pub fn arm(state: AppState, check_interval: Duration) -> Self {
        let check_interval = check_interval.max(Duration::from_secs(1));
        let handle = tokio::spawn(async move {
            loop {
                let wait = until_next_rollover(&Local::now()).min(check_interval);
                debug!(?wait, "rollover timer sleeping");
                tokio::time::sleep(wait).await;
                live_rollover_at(&state, &DayKey::today()).await;
            }
        });
        Self { handle }
    }

    pub fn cancel(self) {
        self.handle.abort();
    }
}

impl Drop for RolloverTimer {
    fn drop(&mut self) {
        self.handle.abort();
    }
}
