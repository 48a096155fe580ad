//! Search view-model

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use tracing::{debug, info};

use super::live_state::LiveState;
use super::schedulers::SchedulerProvider;
use super::screen_state::ScreenState;
use crate::infrastructure::SearchRepository;

/// Runs repository searches and publishes their outcome as [`ScreenState`].
///
/// `search` never fails: every outcome, including upstream errors and
/// incomplete responses, ends up as exactly one published state.
pub struct SearchViewModel {
    repository: Arc<dyn SearchRepository>,
    schedulers: Arc<dyn SchedulerProvider>,
    state: LiveState<ScreenState>,
    cleared: Arc<AtomicBool>,
}

impl SearchViewModel {
    pub fn new(
        repository: Arc<dyn SearchRepository>,
        schedulers: Arc<dyn SchedulerProvider>,
    ) -> Self {
        Self {
            repository,
            schedulers,
            state: LiveState::new(ScreenState::Idle),
            cleared: Arc::new(AtomicBool::new(false)),
        }
    }

    /// Handle onto the published state
    pub fn subscribe_to_state(&self) -> LiveState<ScreenState> {
        self.state.clone()
    }

    /// Search repositories matching `query`.
    ///
    /// The repository call runs on the `io` scheduler and the resulting state
    /// is published on the `ui` scheduler.
    pub fn search(&self, query: &str) {
        if self.is_cleared() {
            debug!(query, "search ignored; view-model cleared");
            return;
        }

        let repository = Arc::clone(&self.repository);
        let ui = self.schedulers.ui();
        let state = self.state.clone();
        let cleared = Arc::clone(&self.cleared);
        let query = query.to_string();

        self.schedulers.io().spawn(Box::pin(async move {
            let outcome = repository.search_repository(&query).await;
            let screen_state = ScreenState::from_search_outcome(outcome);

            ui.execute(Box::new(move || {
                if cleared.load(Ordering::SeqCst) {
                    debug!(query, "dropping search result; view-model cleared");
                    return;
                }
                match &screen_state {
                    ScreenState::Error(error) => {
                        info!(query, error = %error, "search failed")
                    }
                    _ => debug!(query, "search completed"),
                }
                state.publish(screen_state);
            }));
        }));
    }

    /// Stop publishing. Results of searches still in flight are discarded.
    pub fn clear(&self) {
        self.cleared.store(true, Ordering::SeqCst);
    }

    pub fn is_cleared(&self) -> bool {
        self.cleared.load(Ordering::SeqCst)
    }
}
