//! Itinerary model and the operations that mutate it
//!
//! - `types`: days, tagged items and trip metadata
//! - `recommendation`: leniently parsed sidebar suggestions
//! - `store`: the state container with named mutation operations
//! - `drop`: drag-and-drop normalization into typed items
//! - `payload`: transformation into the itinerary service schema

pub mod drop;
pub mod payload;
pub mod recommendation;
pub mod store;
pub mod types;

pub use drop::{normalize, DragDropController, DropEvent, DropOutcome, IgnoreReason};
pub use payload::{build_payload, ActivityRecord, DayRecord, LunchRecord, SavePayload, StayRecord};
pub use recommendation::{Recommendation, RecommendationPool};
pub use store::{generate_days, ItineraryStore};
pub use types::{parse_date, Day, Item, ItemKind, ItemType, TripMetadata};
