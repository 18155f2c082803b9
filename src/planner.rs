//! Planner session
//!
//! A [`Planner`] is the explicit state container for one planning view: the
//! itinerary store, the recommendation pool, the trip id and the save
//! coordinator. It is seeded from [`NavigationState`] and reports outcomes
//! through a [`Notifier`].

use crate::error::{Result, TripcraftError};
use crate::itinerary::drop::{normalize_with_id, unique_id};
use crate::itinerary::recommendation::{lenient_amount, lenient_count};
use crate::itinerary::{
    generate_days, parse_date, Day, DragDropController, DropEvent, DropOutcome, ItineraryStore,
    Recommendation, RecommendationPool,
};
use crate::notify::Notifier;
use crate::save::SaveCoordinator;
use crate::service::{ItineraryService, SavedItinerary};

use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt;
use std::str::FromStr;
use std::sync::Arc;
use std::time::Duration;

pub const NO_TRIP_DATA_MESSAGE: &str = "No trip data found. Please create a trip first.";
pub const DAY_ADDED_MESSAGE: &str = "New day added to your itinerary!";

/// How the planner is initialized
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PlannerMode {
    /// Empty days from the trip's date range plus a recommendation pool
    #[default]
    Generate,
    /// Days hydrated from a previously saved itinerary
    Edit,
}

impl FromStr for PlannerMode {
    type Err = TripcraftError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "generate" => Ok(PlannerMode::Generate),
            "edit" => Ok(PlannerMode::Edit),
            other => Err(TripcraftError::Config(format!(
                "Invalid planner mode: {}. Must be one of: generate, edit",
                other
            ))),
        }
    }
}

impl fmt::Display for PlannerMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PlannerMode::Generate => f.write_str("generate"),
            PlannerMode::Edit => f.write_str("edit"),
        }
    }
}

/// State handed to the planner when the user navigates to it
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NavigationState {
    #[serde(default)]
    pub trip_id: Option<String>,
    pub trip_data: TripData,
    #[serde(default)]
    pub lunch: Vec<Recommendation>,
    #[serde(default)]
    pub stay: Vec<Recommendation>,
    #[serde(default)]
    pub spots: Vec<Recommendation>,
    /// Persisted itinerary, present in edit mode
    #[serde(default)]
    pub itinerary: Option<Vec<PersistedDay>>,
}

/// Trip fields as entered when the trip was created
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TripData {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub destination: String,
    #[serde(default)]
    pub start_date: Option<String>,
    #[serde(default)]
    pub end_date: Option<String>,
    #[serde(default, deserialize_with = "lenient_amount")]
    pub budget: f64,
    #[serde(default, deserialize_with = "lenient_count")]
    pub people: u32,
}

/// A day of a persisted itinerary, as received in edit mode
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PersistedDay {
    #[serde(default)]
    pub id: Option<String>,
    pub date: String,
    #[serde(default)]
    pub items: Vec<Recommendation>,
}

impl PersistedDay {
    /// Days of an itinerary read back from the service
    pub fn from_saved(saved: &SavedItinerary) -> Vec<PersistedDay> {
        saved
            .itinerary
            .iter()
            .map(|record| PersistedDay {
                id: None,
                date: record.date.clone(),
                items: record.to_recommendations(),
            })
            .collect()
    }
}

/// One planning session
pub struct Planner {
    store: ItineraryStore,
    pool: RecommendationPool,
    trip_id: Option<String>,
    mode: PlannerMode,
    controller: DragDropController,
    saver: SaveCoordinator,
    notifier: Arc<dyn Notifier>,
}

impl Planner {
    /// Create an empty planner with the given success display window
    pub fn new(notifier: Arc<dyn Notifier>, success_window: Duration) -> Self {
        Self {
            store: ItineraryStore::new(),
            pool: RecommendationPool::default(),
            trip_id: None,
            mode: PlannerMode::default(),
            controller: DragDropController::new(),
            saver: SaveCoordinator::new(success_window),
            notifier,
        }
    }

    pub fn store(&self) -> &ItineraryStore {
        &self.store
    }

    pub fn recommendations(&self) -> &RecommendationPool {
        &self.pool
    }

    pub fn trip_id(&self) -> Option<&str> {
        self.trip_id.as_deref()
    }

    pub fn mode(&self) -> PlannerMode {
        self.mode
    }

    pub fn days(&self) -> &[Day] {
        self.store.days()
    }

    pub fn saver(&self) -> &SaveCoordinator {
        &self.saver
    }

    /// Seed the planner from navigation state
    ///
    /// Without state the planner is reset and the user is told to create a
    /// trip first. Edit mode without a persisted itinerary behaves like
    /// generate mode.
    ///
    /// # Errors
    ///
    /// Returns `InvalidDate` if a trip or day date cannot be parsed; the
    /// planner is left unchanged in that case.
    pub fn load(&mut self, state: Option<NavigationState>, mode: PlannerMode) -> Result<()> {
        let Some(state) = state else {
            tracing::warn!("No navigation state, resetting planner");
            self.mode = mode;
            self.notifier.error(NO_TRIP_DATA_MESSAGE);
            self.store.reset();
            self.pool = RecommendationPool::default();
            self.trip_id = None;
            return Ok(());
        };

        let start = optional_date(state.trip_data.start_date.as_deref())?;
        let end = optional_date(state.trip_data.end_date.as_deref())?;

        let (days, pool) = match (mode, state.itinerary) {
            (PlannerMode::Edit, Some(itinerary)) => {
                (hydrate_days(&itinerary)?, RecommendationPool::default())
            }
            (_, _) => {
                let days = match (start, end) {
                    (Some(start), Some(end)) => generate_days(start, end),
                    _ => Vec::new(),
                };
                let pool = RecommendationPool {
                    lunch: state.lunch,
                    stay: state.stay,
                    spots: state.spots,
                };
                (days, pool)
            }
        };

        self.store.set_title(state.trip_data.title);
        self.store.set_destination(state.trip_data.destination);
        self.store.set_dates(start, end);
        self.store.set_budget(state.trip_data.budget);
        self.store.set_suggested_people(state.trip_data.people);
        self.store.set_days(days);
        self.pool = pool;
        self.trip_id = state.trip_id.filter(|id| !id.is_empty());
        self.mode = mode;

        tracing::info!(
            trip_id = ?self.trip_id,
            %mode,
            days = self.store.days().len(),
            recommendations = self.pool.len(),
            "Planner loaded"
        );
        Ok(())
    }

    /// Replace the days with the trip's persisted itinerary from `service`
    ///
    /// Returns `false` (leaving the days untouched) when the trip has no
    /// saved itinerary.
    ///
    /// # Errors
    ///
    /// Returns `MissingTripId` when no trip is loaded, or the service error
    pub async fn hydrate_from_service(&mut self, service: &dyn ItineraryService) -> Result<bool> {
        let trip_id = self.trip_id.clone().ok_or(TripcraftError::MissingTripId)?;
        let Some(saved) = service.itinerary_for_trip(&trip_id).await? else {
            tracing::info!(trip_id = %trip_id, "No saved itinerary for trip");
            return Ok(false);
        };

        self.store
            .set_days(hydrate_days(&PersistedDay::from_saved(&saved))?);
        self.pool = RecommendationPool::default();
        self.mode = PlannerMode::Edit;
        Ok(true)
    }

    /// Apply a drop gesture
    pub fn handle_drop(&mut self, event: DropEvent) -> DropOutcome {
        let outcome = self.controller.handle_drop(&mut self.store, event);
        if let DropOutcome::Added { name, .. } = &outcome {
            self.notifier
                .success(&format!("Added {} to your itinerary!", name));
        }
        outcome
    }

    /// Append the next calendar day while the trip range has room
    ///
    /// Returns the new day's id, or `None` when no days remain.
    pub fn add_day(&mut self) -> Option<String> {
        if self.store.remaining_days() == 0 {
            tracing::debug!("No remaining days in trip range");
            return None;
        }
        let date = self.store.next_day_date()?;
        let id = self.store.add_day(date);
        self.notifier.success(DAY_ADDED_MESSAGE);
        Some(id)
    }

    pub fn remaining_days(&self) -> usize {
        self.store.remaining_days()
    }

    /// Budget for the whole party
    pub fn total_budget(&self) -> f64 {
        self.store.total_budget()
    }

    /// Save the current itinerary through `service`
    ///
    /// # Errors
    ///
    /// See [`SaveCoordinator::save`]
    pub async fn save(&self, service: &dyn ItineraryService) -> Result<SavedItinerary> {
        self.saver
            .save(
                self.trip_id.as_deref(),
                self.store.days(),
                service,
                self.notifier.as_ref(),
            )
            .await
    }
}

fn optional_date(value: Option<&str>) -> Result<Option<chrono::NaiveDate>> {
    match value.map(str::trim).filter(|v| !v.is_empty()) {
        Some(v) => parse_date(v).map(Some),
        None => Ok(None),
    }
}

/// Build days from a persisted itinerary
///
/// Missing ids get fresh UUIDs; repeated day or item ids get a `-<n>` suffix
/// so ids stay unique across the itinerary.
fn hydrate_days(itinerary: &[PersistedDay]) -> Result<Vec<Day>> {
    let mut day_ids: HashSet<String> = HashSet::new();
    let mut item_ids: HashSet<String> = HashSet::new();
    let mut days = Vec::with_capacity(itinerary.len());

    for persisted in itinerary {
        let date = parse_date(&persisted.date)?;
        let id = unique_id(&id_or_uuid(&persisted.id), |id| day_ids.contains(id));
        day_ids.insert(id.clone());

        let mut day = Day::with_id(id, date);
        for rec in &persisted.items {
            let item_id = unique_id(&id_or_uuid(&rec.id), |id| item_ids.contains(id));
            item_ids.insert(item_id.clone());
            day.items.push(normalize_with_id(rec, item_id));
        }
        days.push(day);
    }
    Ok(days)
}

fn id_or_uuid(id: &Option<String>) -> String {
    id.clone()
        .filter(|id| !id.is_empty())
        .unwrap_or_else(|| uuid::Uuid::new_v4().to_string())
}
