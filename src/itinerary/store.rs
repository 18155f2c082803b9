//! Itinerary store
//!
//! The single in-memory state container for a planning session. All
//! mutation goes through the named operations below.

use super::types::{Day, Item, TripMetadata};
use chrono::{Duration, NaiveDate};

/// Trip metadata plus the ordered list of days
#[derive(Debug, Clone, Default)]
pub struct ItineraryStore {
    trip: TripMetadata,
    days: Vec<Day>,
}

impl ItineraryStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Trip metadata
    pub fn trip(&self) -> &TripMetadata {
        &self.trip
    }

    /// Days in insertion order
    pub fn days(&self) -> &[Day] {
        &self.days
    }

    /// Look up a day by id
    pub fn day(&self, day_id: &str) -> Option<&Day> {
        self.days.iter().find(|d| d.id == day_id)
    }

    /// Append a new empty day and return its id
    pub fn add_day(&mut self, date: NaiveDate) -> String {
        let day = Day::new(date);
        let id = day.id.clone();
        tracing::debug!(day_id = %id, %date, "Adding day");
        self.days.push(day);
        id
    }

    /// Append an item to the day matching `day_id`
    ///
    /// Unknown day ids are ignored. Returns whether the item was appended.
    pub fn add_item(&mut self, day_id: &str, item: Item) -> bool {
        match self.days.iter_mut().find(|d| d.id == day_id) {
            Some(day) => {
                tracing::debug!(day_id, item_id = %item.id, "Adding item");
                day.items.push(item);
                true
            }
            None => {
                tracing::debug!(day_id, item_id = %item.id, "No day matches, item dropped");
                false
            }
        }
    }

    /// Replace the whole day list
    pub fn set_days(&mut self, days: Vec<Day>) {
        tracing::debug!(count = days.len(), "Replacing days");
        self.days = days;
    }

    pub fn set_title(&mut self, title: impl Into<String>) {
        self.trip.title = title.into();
    }

    pub fn set_destination(&mut self, destination: impl Into<String>) {
        self.trip.destination = destination.into();
    }

    /// Set start and end dates; an end before the start is accepted as-is
    pub fn set_dates(&mut self, start: Option<NaiveDate>, end: Option<NaiveDate>) {
        self.trip.start_date = start;
        self.trip.end_date = end;
    }

    pub fn set_budget(&mut self, budget: f64) {
        self.trip.budget = budget;
    }

    pub fn set_suggested_people(&mut self, people: u32) {
        self.trip.suggested_people = people;
    }

    /// Clear metadata and days
    pub fn reset(&mut self) {
        self.trip = TripMetadata::default();
        self.days.clear();
    }

    /// Whether any item in the itinerary already uses `item_id`
    pub fn contains_item(&self, item_id: &str) -> bool {
        self.days
            .iter()
            .flat_map(|d| d.items.iter())
            .any(|i| i.id == item_id)
    }

    /// Total number of items across all days
    pub fn item_count(&self) -> usize {
        self.days.iter().map(|d| d.items.len()).sum()
    }

    /// Date the next added day should carry
    ///
    /// The day after the last day, or the trip start date when there are no
    /// days yet.
    pub fn next_day_date(&self) -> Option<NaiveDate> {
        match self.days.last() {
            Some(last) => last.date.checked_add_signed(Duration::days(1)),
            None => self.trip.start_date,
        }
    }

    /// Days of the trip range not yet present in the itinerary
    pub fn remaining_days(&self) -> usize {
        let (Some(start), Some(end)) = (self.trip.start_date, self.trip.end_date) else {
            return 0;
        };
        let span = (end - start).num_days().unsigned_abs() as usize + 1;
        span.saturating_sub(self.days.len())
    }

    /// Budget for the whole party
    pub fn total_budget(&self) -> f64 {
        self.trip.budget * f64::from(self.trip.suggested_people)
    }

    /// Sum of item costs across all days
    pub fn planned_cost(&self) -> f64 {
        self.days.iter().map(Day::total_cost).sum()
    }
}

/// Build one empty day per calendar date in `start..=end`
///
/// Produces no days when `end` precedes `start`.
pub fn generate_days(start: NaiveDate, end: NaiveDate) -> Vec<Day> {
    start
        .iter_days()
        .take_while(|date| *date <= end)
        .map(Day::new)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::itinerary::types::ItemKind;
    use std::collections::HashSet;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn lunch(id: &str) -> Item {
        Item {
            id: id.to_string(),
            name: "Thali House".to_string(),
            category: "Popular".to_string(),
            location: "Market Road".to_string(),
            time_slot: "N/A".to_string(),
            rating: None,
            latitude: None,
            longitude: None,
            kind: ItemKind::Lunch { price: 400.0 },
        }
    }

    #[test]
    fn test_add_day_preserves_order_and_unique_ids() {
        let mut store = ItineraryStore::new();
        let dates = [date(2025, 6, 3), date(2025, 6, 1), date(2025, 6, 2)];
        let ids: Vec<String> = dates.iter().map(|d| store.add_day(*d)).collect();

        let stored: Vec<NaiveDate> = store.days().iter().map(|d| d.date).collect();
        assert_eq!(stored, dates);
        assert_eq!(ids.iter().collect::<HashSet<_>>().len(), 3);
        assert!(store.days().iter().all(|d| d.items.is_empty()));
    }

    #[test]
    fn test_add_item_appends_to_matching_day() {
        let mut store = ItineraryStore::new();
        let first = store.add_day(date(2025, 6, 1));
        let second = store.add_day(date(2025, 6, 2));

        assert!(store.add_item(&second, lunch("l-1")));
        assert!(store.add_item(&second, lunch("l-2")));

        assert!(store.day(&first).unwrap().items.is_empty());
        let ids: Vec<&str> = store.day(&second).unwrap().items.iter().map(|i| i.id.as_str()).collect();
        assert_eq!(ids, vec!["l-1", "l-2"]);
        assert!(store.contains_item("l-2"));
        assert_eq!(store.item_count(), 2);
    }

    #[test]
    fn test_add_item_unknown_day_is_noop() {
        let mut store = ItineraryStore::new();
        store.add_day(date(2025, 6, 1));
        let before = store.days().to_vec();

        assert!(!store.add_item("missing", lunch("l-1")));
        assert_eq!(store.days(), before.as_slice());
    }

    #[test]
    fn test_set_days_replaces_everything() {
        let mut store = ItineraryStore::new();
        store.add_day(date(2025, 6, 1));
        store.set_days(vec![Day::with_id("d-9", date(2026, 1, 1))]);
        assert_eq!(store.days().len(), 1);
        assert_eq!(store.days()[0].id, "d-9");
    }

    #[test]
    fn test_set_dates_accepts_inverted_range() {
        let mut store = ItineraryStore::new();
        store.set_dates(Some(date(2025, 6, 5)), Some(date(2025, 6, 1)));
        assert_eq!(store.trip().start_date, Some(date(2025, 6, 5)));
        assert_eq!(store.remaining_days(), 5);
    }

    #[test]
    fn test_generate_days_inclusive_range() {
        let days = generate_days(date(2025, 6, 1), date(2025, 6, 3));
        let dates: Vec<String> = days.iter().map(|d| d.date.to_string()).collect();
        assert_eq!(dates, vec!["2025-06-01", "2025-06-02", "2025-06-03"]);
        assert!(days.iter().all(|d| d.items.is_empty()));
    }

    #[test]
    fn test_generate_days_single_and_inverted() {
        assert_eq!(generate_days(date(2025, 6, 1), date(2025, 6, 1)).len(), 1);
        assert!(generate_days(date(2025, 6, 3), date(2025, 6, 1)).is_empty());
    }

    #[test]
    fn test_next_day_date() {
        let mut store = ItineraryStore::new();
        assert_eq!(store.next_day_date(), None);

        store.set_dates(Some(date(2025, 6, 1)), Some(date(2025, 6, 3)));
        assert_eq!(store.next_day_date(), Some(date(2025, 6, 1)));

        store.add_day(date(2025, 6, 30));
        assert_eq!(store.next_day_date(), Some(date(2025, 7, 1)));
    }

    #[test]
    fn test_remaining_days() {
        let mut store = ItineraryStore::new();
        assert_eq!(store.remaining_days(), 0);

        store.set_dates(Some(date(2025, 6, 1)), Some(date(2025, 6, 3)));
        assert_eq!(store.remaining_days(), 3);

        store.set_days(generate_days(date(2025, 6, 1), date(2025, 6, 2)));
        assert_eq!(store.remaining_days(), 1);

        store.add_day(date(2025, 6, 3));
        store.add_day(date(2025, 6, 4));
        assert_eq!(store.remaining_days(), 0);
    }

    #[test]
    fn test_total_budget_and_reset() {
        let mut store = ItineraryStore::new();
        store.set_title("Monsoon in Goa");
        store.set_destination("Goa");
        store.set_budget(12_000.0);
        store.set_suggested_people(3);
        assert_eq!(store.total_budget(), 36_000.0);

        store.add_day(date(2025, 6, 1));
        store.reset();
        assert_eq!(store.trip(), &TripMetadata::default());
        assert!(store.days().is_empty());
    }
}
