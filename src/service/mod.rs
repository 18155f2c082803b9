//! Itinerary service boundary
//!
//! The planner persists itineraries through an [`ItineraryService`]. The
//! HTTP implementation talks to the TripCraft backend; tests and embedders
//! can supply their own.

pub mod http;

pub use http::HttpItineraryService;

use crate::error::Result;
use crate::itinerary::{DayRecord, SavePayload};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// Itinerary as stored by the backend
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct SavedItinerary {
    /// Backend identifier of the stored itinerary
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub trip_id: Option<String>,
    pub itinerary: Vec<DayRecord>,
}

/// Persistence boundary for itineraries
///
/// # Examples
///
/// ```
/// use async_trait::async_trait;
/// use tripcraft::itinerary::SavePayload;
/// use tripcraft::service::{ItineraryService, SavedItinerary};
///
/// struct Discard;
///
/// #[async_trait]
/// impl ItineraryService for Discard {
///     async fn create_itinerary(&self, payload: &SavePayload) -> tripcraft::Result<SavedItinerary> {
///         Ok(SavedItinerary {
///             id: None,
///             trip_id: Some(payload.trip_id.clone()),
///             itinerary: payload.itinerary.clone(),
///         })
///     }
///
///     async fn itinerary_for_trip(&self, _trip_id: &str) -> tripcraft::Result<Option<SavedItinerary>> {
///         Ok(None)
///     }
/// }
/// ```
#[async_trait]
pub trait ItineraryService: Send + Sync {
    /// Create or replace the itinerary of `payload.trip_id`
    ///
    /// # Errors
    ///
    /// Returns `TripcraftError::Service` carrying a human-readable message
    async fn create_itinerary(&self, payload: &SavePayload) -> Result<SavedItinerary>;

    /// Fetch the persisted itinerary of a trip, if there is one
    async fn itinerary_for_trip(&self, trip_id: &str) -> Result<Option<SavedItinerary>>;
}
