//! Core itinerary data model
//!
//! Days hold an ordered list of items. Items are a tagged variant over
//! sightseeing spots, lunch stops and overnight stays; each variant carries
//! its own cost field instead of one loosely-typed record.

use crate::error::{Result, TripcraftError};
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Wire and display format for calendar dates
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// One calendar day within a trip
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Day {
    /// Opaque identifier, unique within the itinerary
    pub id: String,
    /// Calendar date of this day
    pub date: NaiveDate,
    /// Planned items in insertion order
    #[serde(default)]
    pub items: Vec<Item>,
}

impl Day {
    /// Create an empty day with a fresh UUID
    pub fn new(date: NaiveDate) -> Self {
        Self::with_id(uuid::Uuid::new_v4().to_string(), date)
    }

    /// Create an empty day with a caller-provided identifier
    pub fn with_id(id: impl Into<String>, date: NaiveDate) -> Self {
        Self {
            id: id.into(),
            date,
            items: Vec::new(),
        }
    }

    /// Total cost of all items planned for this day
    pub fn total_cost(&self) -> f64 {
        self.items.iter().map(Item::cost).sum()
    }
}

/// A planned activity, lunch stop or lodging stay
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Item {
    /// Identifier, unique across the whole itinerary
    pub id: String,
    pub name: String,
    pub category: String,
    pub location: String,
    pub time_slot: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rating: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub latitude: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub longitude: Option<f64>,
    /// Variant-specific fields, tagged by `type`
    #[serde(flatten)]
    pub kind: ItemKind,
}

/// Variant payload of an [`Item`]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum ItemKind {
    /// Sightseeing spot or activity
    #[serde(rename_all = "camelCase")]
    Spot {
        estimated_cost: f64,
        duration: f64,
        duration_unit: String,
    },
    /// Lunch stop
    #[serde(rename_all = "camelCase")]
    Lunch { price: f64 },
    /// Overnight stay
    #[serde(rename_all = "camelCase")]
    Stay { price_per_night: f64 },
}

/// Discriminant of [`ItemKind`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ItemType {
    Spot,
    Lunch,
    Stay,
}

impl ItemType {
    /// Resolve a loosely-typed tag, defaulting to [`ItemType::Spot`]
    ///
    /// Missing, empty and unrecognised tags all map to `Spot`.
    pub fn from_tag(tag: Option<&str>) -> Self {
        match tag.map(str::trim) {
            Some("lunch") => ItemType::Lunch,
            Some("stay") => ItemType::Stay,
            Some("spot") | Some("") | None => ItemType::Spot,
            Some(other) => {
                tracing::warn!("Unrecognised item type '{}', treating as spot", other);
                ItemType::Spot
            }
        }
    }

    /// Tag string used on the wire
    pub fn as_str(&self) -> &'static str {
        match self {
            ItemType::Spot => "spot",
            ItemType::Lunch => "lunch",
            ItemType::Stay => "stay",
        }
    }
}

impl fmt::Display for ItemType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Item {
    /// Discriminant of this item's variant
    pub fn item_type(&self) -> ItemType {
        match self.kind {
            ItemKind::Spot { .. } => ItemType::Spot,
            ItemKind::Lunch { .. } => ItemType::Lunch,
            ItemKind::Stay { .. } => ItemType::Stay,
        }
    }

    /// The variant's cost field
    pub fn cost(&self) -> f64 {
        match &self.kind {
            ItemKind::Spot { estimated_cost, .. } => *estimated_cost,
            ItemKind::Lunch { price } => *price,
            ItemKind::Stay { price_per_night } => *price_per_night,
        }
    }
}

/// Trip metadata, set once from navigation state
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TripMetadata {
    pub title: String,
    pub destination: String,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    /// Budget per person
    pub budget: f64,
    pub suggested_people: u32,
}

/// Parse a trip or day date
///
/// Accepts plain `YYYY-MM-DD` dates and RFC 3339 timestamps; timestamps are
/// reduced to their UTC calendar date.
///
/// # Errors
///
/// Returns `TripcraftError::InvalidDate` if neither format matches.
pub fn parse_date(value: &str) -> Result<NaiveDate> {
    let trimmed = value.trim();
    if let Ok(date) = NaiveDate::parse_from_str(trimmed, DATE_FORMAT) {
        return Ok(date);
    }
    DateTime::parse_from_rfc3339(trimmed)
        .map(|dt| dt.with_timezone(&Utc).date_naive())
        .map_err(|_| TripcraftError::InvalidDate(value.to_string()).into())
}
