//! Drag-and-drop controller
//!
//! Turns a recommendation dropped onto a day into a typed [`Item`] and
//! appends it through the store. Missing or malformed recommendation fields
//! are defaulted, never rejected.

use super::recommendation::{present_number, present_str, Recommendation};
use super::store::ItineraryStore;
use super::types::{Item, ItemKind, ItemType};
use chrono::Utc;

/// Default spot duration, in `DEFAULT_DURATION_UNIT`
pub const DEFAULT_DURATION: f64 = 2.0;
pub const DEFAULT_DURATION_UNIT: &str = "hours";
pub const DEFAULT_NAME: &str = "Untitled";
pub const DEFAULT_CATEGORY: &str = "Popular";
pub const DEFAULT_LOCATION: &str = "N/A";
pub const DEFAULT_TIME_SLOT: &str = "N/A";

/// A drop gesture as delivered by the UI layer
#[derive(Debug, Clone, Default)]
pub struct DropEvent {
    /// Data carried by the dragged card
    pub payload: Option<Recommendation>,
    /// Day id of the drop target, if the pointer was released over one
    pub target_day: Option<String>,
}

impl DropEvent {
    /// Drop `payload` onto the day with `day_id`
    pub fn onto(day_id: impl Into<String>, payload: Recommendation) -> Self {
        Self {
            payload: Some(payload),
            target_day: Some(day_id.into()),
        }
    }
}

/// Result of handling a drop
#[derive(Debug, Clone, PartialEq)]
pub enum DropOutcome {
    /// The item was appended to the target day
    Added {
        day_id: String,
        item_id: String,
        name: String,
    },
    /// Nothing changed
    Ignored(IgnoreReason),
}

/// Why a drop left the itinerary untouched
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IgnoreReason {
    NoTarget,
    NoPayload,
    UnknownDay,
}

/// Stateless controller applying drops to a store
#[derive(Debug, Clone, Copy, Default)]
pub struct DragDropController;

impl DragDropController {
    pub fn new() -> Self {
        Self
    }

    /// Handle a drop using the current wall-clock time for the item id
    pub fn handle_drop(&self, store: &mut ItineraryStore, event: DropEvent) -> DropOutcome {
        self.handle_drop_at(store, event, Utc::now().timestamp_millis())
    }

    /// Handle a drop with an explicit timestamp (milliseconds since epoch)
    pub fn handle_drop_at(
        &self,
        store: &mut ItineraryStore,
        event: DropEvent,
        timestamp_ms: i64,
    ) -> DropOutcome {
        let Some(day_id) = event.target_day.filter(|id| !id.is_empty()) else {
            tracing::debug!("Drop outside any day, ignoring");
            return DropOutcome::Ignored(IgnoreReason::NoTarget);
        };
        let Some(payload) = event.payload else {
            tracing::debug!(%day_id, "Drop without payload, ignoring");
            return DropOutcome::Ignored(IgnoreReason::NoPayload);
        };
        if store.day(&day_id).is_none() {
            tracing::debug!(%day_id, "Drop onto unknown day, ignoring");
            return DropOutcome::Ignored(IgnoreReason::UnknownDay);
        }

        let mut item = normalize(&payload, timestamp_ms);
        item.id = unique_item_id(store, &item.id);
        let outcome = DropOutcome::Added {
            day_id: day_id.clone(),
            item_id: item.id.clone(),
            name: item.name.clone(),
        };
        store.add_item(&day_id, item);
        outcome
    }
}

/// Normalize a recommendation into an item
///
/// The id is `<source-id-or-"unknown">-<timestamp_ms>`.
pub fn normalize(rec: &Recommendation, timestamp_ms: i64) -> Item {
    let source_id = present_str(&rec.id).unwrap_or("unknown");
    normalize_with_id(rec, format!("{}-{}", source_id, timestamp_ms))
}

/// Normalize a recommendation, keeping a caller-chosen id
pub fn normalize_with_id(rec: &Recommendation, id: String) -> Item {
    let item_type = ItemType::from_tag(rec.kind.as_deref());
    let explicit_cost = present_number(rec.estimated_cost);

    let kind = match item_type {
        ItemType::Spot => ItemKind::Spot {
            estimated_cost: explicit_cost.unwrap_or(0.0),
            duration: present_number(rec.duration).unwrap_or(DEFAULT_DURATION),
            duration_unit: present_str(&rec.duration_unit)
                .unwrap_or(DEFAULT_DURATION_UNIT)
                .to_string(),
        },
        ItemType::Lunch => ItemKind::Lunch {
            price: explicit_cost
                .or_else(|| present_number(rec.price))
                .unwrap_or(0.0),
        },
        ItemType::Stay => ItemKind::Stay {
            price_per_night: explicit_cost
                .or_else(|| present_number(rec.price_per_night))
                .unwrap_or(0.0),
        },
    };

    Item {
        id,
        name: present_str(&rec.name).unwrap_or(DEFAULT_NAME).to_string(),
        category: present_str(&rec.category)
            .unwrap_or(DEFAULT_CATEGORY)
            .to_string(),
        location: present_str(&rec.location)
            .unwrap_or(DEFAULT_LOCATION)
            .to_string(),
        time_slot: present_str(&rec.time_slot)
            .unwrap_or(DEFAULT_TIME_SLOT)
            .to_string(),
        rating: present_number(rec.rating),
        latitude: present_number(rec.latitude),
        longitude: present_number(rec.longitude),
        kind,
    }
}

/// Suffix `candidate` until no item in the store uses it
fn unique_item_id(store: &ItineraryStore, candidate: &str) -> String {
    unique_id(candidate, |id| store.contains_item(id))
}

/// `candidate`, or `candidate-<n>` for the first `n` for which `taken` is false
pub(crate) fn unique_id(candidate: &str, taken: impl Fn(&str) -> bool) -> String {
    if !taken(candidate) {
        return candidate.to_string();
    }
    (1..)
        .map(|n| format!("{}-{}", candidate, n))
        .find(|id| !taken(id))
        .unwrap_or_else(|| uuid::Uuid::new_v4().to_string())
}
