//! Save coordinator
//!
//! Runs the single outbound save of a planning session. A save moves the
//! coordinator through `Idle -> Saving -> {Succeeded, Failed}`; at most one
//! save is in flight at a time.

use crate::error::{Result, TripcraftError};
use crate::itinerary::{build_payload, Day};
use crate::notify::Notifier;
use crate::service::{ItineraryService, SavedItinerary};

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::RwLock;
use std::time::{Duration, Instant};

/// Message used when the service fails without a usable message
pub const SAVE_FALLBACK_MESSAGE: &str = "Failed to save itinerary. Please try again.";
pub const SAVE_SUCCESS_MESSAGE: &str = "Itinerary saved successfully!";

/// Lifecycle of the save operation
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum SaveState {
    #[default]
    Idle,
    Saving,
    Succeeded,
    Failed(String),
}

#[derive(Debug, Default)]
struct Status {
    state: SaveState,
    succeeded_at: Option<Instant>,
}

/// Single-flight save coordinator
#[derive(Debug)]
pub struct SaveCoordinator {
    in_flight: AtomicBool,
    status: RwLock<Status>,
    success_window: Duration,
}

/// Releases the in-flight flag when the save finishes or is dropped
///
/// A save abandoned mid-call leaves `Saving` behind; that reverts to `Idle`.
struct InFlightGuard<'a>(&'a SaveCoordinator);

impl Drop for InFlightGuard<'_> {
    fn drop(&mut self) {
        if let Ok(mut status) = self.0.status.write() {
            if status.state == SaveState::Saving {
                tracing::debug!("Save abandoned before completion");
                status.state = SaveState::Idle;
            }
        }
        self.0.in_flight.store(false, Ordering::Release);
    }
}

impl Default for SaveCoordinator {
    fn default() -> Self {
        Self::new(Duration::from_secs(3))
    }
}

impl SaveCoordinator {
    /// Create a coordinator whose success flag stays visible for `success_window`
    pub fn new(success_window: Duration) -> Self {
        Self {
            in_flight: AtomicBool::new(false),
            status: RwLock::new(Status::default()),
            success_window,
        }
    }

    /// Current state machine position
    pub fn state(&self) -> SaveState {
        self.status
            .read()
            .map(|s| s.state.clone())
            .unwrap_or_default()
    }

    /// Whether a save is outstanding
    pub fn is_saving(&self) -> bool {
        self.in_flight.load(Ordering::Acquire)
    }

    /// Message of the last failed save, cleared when a new save starts
    pub fn save_error(&self) -> Option<String> {
        match self.state() {
            SaveState::Failed(message) => Some(message),
            _ => None,
        }
    }

    /// Display flag: true for the success window after a successful save
    pub fn save_success(&self) -> bool {
        self.status
            .read()
            .map(|s| {
                s.state == SaveState::Succeeded
                    && s.succeeded_at
                        .is_some_and(|at| at.elapsed() < self.success_window)
            })
            .unwrap_or(false)
    }

    fn set_state(&self, state: SaveState) {
        if let Ok(mut status) = self.status.write() {
            status.succeeded_at = (state == SaveState::Succeeded).then(Instant::now);
            status.state = state;
        }
    }

    /// Save `days` for `trip_id`
    ///
    /// A missing trip id is reported and returned as an error without
    /// entering `Saving`. A call made while another save is outstanding is
    /// rejected with `SaveInProgress` and leaves the state untouched.
    ///
    /// # Errors
    ///
    /// Returns `MissingTripId`, `SaveInProgress`, or the service's error
    pub async fn save(
        &self,
        trip_id: Option<&str>,
        days: &[Day],
        service: &dyn ItineraryService,
        notifier: &dyn Notifier,
    ) -> Result<SavedItinerary> {
        let Some(trip_id) = trip_id.filter(|id| !id.is_empty()) else {
            notifier.error(&TripcraftError::MissingTripId.to_string());
            return Err(TripcraftError::MissingTripId.into());
        };

        if self
            .in_flight
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .is_err()
        {
            tracing::debug!(trip_id, "Save already in flight, rejecting");
            return Err(TripcraftError::SaveInProgress.into());
        }
        let _guard = InFlightGuard(self);

        self.set_state(SaveState::Saving);
        let payload = build_payload(trip_id, days);
        tracing::info!(trip_id, days = payload.itinerary.len(), "Saving itinerary");

        match service.create_itinerary(&payload).await {
            Ok(saved) => {
                tracing::info!(trip_id, id = ?saved.id, "Itinerary saved");
                self.set_state(SaveState::Succeeded);
                notifier.success(SAVE_SUCCESS_MESSAGE);
                Ok(saved)
            }
            Err(err) => {
                let message = user_message(&err);
                tracing::error!(trip_id, "Error saving itinerary: {:#}", err);
                self.set_state(SaveState::Failed(message.clone()));
                notifier.error(&message);
                Err(err)
            }
        }
    }
}

/// Message to show for a failed save
fn user_message(err: &anyhow::Error) -> String {
    let message = match err.downcast_ref::<TripcraftError>() {
        Some(TripcraftError::Service(message)) => message.clone(),
        Some(other) => other.to_string(),
        None => err.to_string(),
    };
    if message.trim().is_empty() {
        SAVE_FALLBACK_MESSAGE.to_string()
    } else {
        message
    }
}
