//! Save payload transformation
//!
//! Reshapes the in-memory itinerary into the itinerary service's schema:
//! one record per day with items split into `activities`, `lunch` and
//! `stay`. The same records are used when reading a persisted itinerary
//! back from the service.

use super::drop::{DEFAULT_DURATION, DEFAULT_DURATION_UNIT};
use super::recommendation::Recommendation;
use super::types::{Day, ItemKind, DATE_FORMAT};
use serde::{Deserialize, Serialize};

/// Body of the save call
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SavePayload {
    pub trip_id: String,
    pub itinerary: Vec<DayRecord>,
}

/// One day in the service schema
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DayRecord {
    /// 1-based ordinal within the itinerary
    pub day: u32,
    /// ISO `YYYY-MM-DD` date
    pub date: String,
    pub activities: Vec<ActivityRecord>,
    pub lunch: Vec<LunchRecord>,
    pub stay: Vec<StayRecord>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ActivityRecord {
    pub name: String,
    pub category: String,
    pub location: String,
    pub time_slot: String,
    pub duration: f64,
    #[serde(rename = "durationUnit")]
    pub duration_unit: String,
    #[serde(rename = "estimatedCost")]
    pub estimated_cost: f64,
    pub rating: f64,
    pub latitude: f64,
    pub longitude: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LunchRecord {
    pub name: String,
    pub location: String,
    pub price: f64,
    pub rating: f64,
    pub latitude: f64,
    pub longitude: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StayRecord {
    pub name: String,
    pub location: String,
    #[serde(rename = "pricePerNight")]
    pub price_per_night: f64,
    pub rating: f64,
    pub latitude: f64,
    pub longitude: f64,
}

/// Build the save payload for `trip_id` from a snapshot of days
///
/// Pure: the same days always produce the same payload.
pub fn build_payload(trip_id: &str, days: &[Day]) -> SavePayload {
    SavePayload {
        trip_id: trip_id.to_string(),
        itinerary: days
            .iter()
            .enumerate()
            .map(|(index, day)| day_record(index + 1, day))
            .collect(),
    }
}

fn day_record(ordinal: usize, day: &Day) -> DayRecord {
    let mut record = DayRecord {
        day: u32::try_from(ordinal).unwrap_or(u32::MAX),
        date: day.date.format(DATE_FORMAT).to_string(),
        ..Default::default()
    };

    for item in &day.items {
        match &item.kind {
            ItemKind::Spot {
                estimated_cost,
                duration,
                duration_unit,
            } => record.activities.push(ActivityRecord {
                name: item.name.clone(),
                category: item.category.clone(),
                location: item.location.clone(),
                time_slot: item.time_slot.clone(),
                duration: finite_or(*duration, DEFAULT_DURATION),
                duration_unit: if duration_unit.is_empty() {
                    DEFAULT_DURATION_UNIT.to_string()
                } else {
                    duration_unit.clone()
                },
                estimated_cost: finite_or(*estimated_cost, 0.0),
                rating: number_or_zero(item.rating),
                latitude: number_or_zero(item.latitude),
                longitude: number_or_zero(item.longitude),
            }),
            ItemKind::Lunch { price } => record.lunch.push(LunchRecord {
                name: item.name.clone(),
                location: item.location.clone(),
                price: finite_or(*price, 0.0),
                rating: number_or_zero(item.rating),
                latitude: number_or_zero(item.latitude),
                longitude: number_or_zero(item.longitude),
            }),
            ItemKind::Stay { price_per_night } => record.stay.push(StayRecord {
                name: item.name.clone(),
                location: item.location.clone(),
                price_per_night: finite_or(*price_per_night, 0.0),
                rating: number_or_zero(item.rating),
                latitude: number_or_zero(item.latitude),
                longitude: number_or_zero(item.longitude),
            }),
        }
    }

    record
}

fn finite_or(value: f64, fallback: f64) -> f64 {
    if value.is_finite() && value != 0.0 {
        value
    } else {
        fallback
    }
}

fn number_or_zero(value: Option<f64>) -> f64 {
    value.map(|v| finite_or(v, 0.0)).unwrap_or(0.0)
}

impl DayRecord {
    /// Flatten this record back into recommendation-shaped items
    ///
    /// Used to hydrate edit mode from a persisted itinerary. Item order is
    /// activities, then lunch, then stay.
    pub fn to_recommendations(&self) -> Vec<Recommendation> {
        let activities = self.activities.iter().map(|a| Recommendation {
            name: Some(a.name.clone()),
            category: Some(a.category.clone()),
            location: Some(a.location.clone()),
            time_slot: Some(a.time_slot.clone()),
            estimated_cost: Some(a.estimated_cost),
            duration: Some(a.duration),
            duration_unit: Some(a.duration_unit.clone()),
            rating: Some(a.rating),
            latitude: Some(a.latitude),
            longitude: Some(a.longitude),
            kind: Some("spot".to_string()),
            ..Default::default()
        });
        let lunch = self.lunch.iter().map(|l| Recommendation {
            name: Some(l.name.clone()),
            location: Some(l.location.clone()),
            price: Some(l.price),
            rating: Some(l.rating),
            latitude: Some(l.latitude),
            longitude: Some(l.longitude),
            kind: Some("lunch".to_string()),
            ..Default::default()
        });
        let stay = self.stay.iter().map(|s| Recommendation {
            name: Some(s.name.clone()),
            location: Some(s.location.clone()),
            price_per_night: Some(s.price_per_night),
            rating: Some(s.rating),
            latitude: Some(s.latitude),
            longitude: Some(s.longitude),
            kind: Some("stay".to_string()),
            ..Default::default()
        });
        activities.chain(lunch).chain(stay).collect()
    }
}
