//! Loosely-typed recommendation records
//!
//! Recommendations arrive from the suggestion engine (and from persisted
//! itineraries in edit mode) with any field possibly missing, empty, or
//! encoded as a string. They are parsed leniently here and normalized into
//! typed [`Item`](super::Item)s by the drop controller.

use serde::{Deserialize, Deserializer, Serialize};

/// A suggested point of interest that can be dropped onto a day
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Recommendation {
    #[serde(default, deserialize_with = "lenient_string")]
    pub id: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub name: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub category: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub location: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub time_slot: Option<String>,
    #[serde(default, deserialize_with = "lenient_number")]
    pub estimated_cost: Option<f64>,
    #[serde(default, deserialize_with = "lenient_number")]
    pub price: Option<f64>,
    #[serde(default, deserialize_with = "lenient_number")]
    pub price_per_night: Option<f64>,
    #[serde(default, deserialize_with = "lenient_number")]
    pub rating: Option<f64>,
    #[serde(default, deserialize_with = "lenient_number")]
    pub latitude: Option<f64>,
    #[serde(default, deserialize_with = "lenient_number")]
    pub longitude: Option<f64>,
    #[serde(default, deserialize_with = "lenient_number")]
    pub duration: Option<f64>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub duration_unit: Option<String>,
    /// Declared item type: `spot`, `lunch` or `stay`
    #[serde(default, rename = "type", deserialize_with = "lenient_string")]
    pub kind: Option<String>,
}

/// The sidebar's pool of recommendations, grouped by source list
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RecommendationPool {
    #[serde(default)]
    pub lunch: Vec<Recommendation>,
    #[serde(default)]
    pub stay: Vec<Recommendation>,
    #[serde(default)]
    pub spots: Vec<Recommendation>,
}

impl RecommendationPool {
    /// Total number of recommendations across all lists
    pub fn len(&self) -> usize {
        self.lunch.len() + self.stay.len() + self.spots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Treat a number as present only when it is finite and non-zero
pub(crate) fn present_number(value: Option<f64>) -> Option<f64> {
    value.filter(|v| v.is_finite() && *v != 0.0)
}

/// Treat a string as present only when it is non-empty
pub(crate) fn present_str(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|s| !s.is_empty())
}

/// Accept JSON numbers and numeric strings; everything else is absent
fn lenient_number<'de, D>(deserializer: D) -> std::result::Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<serde_json::Value>::deserialize(deserializer)?;
    Ok(value.and_then(|v| match v {
        serde_json::Value::Number(n) => n.as_f64(),
        serde_json::Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    }))
}

/// Lenient amount: numbers or numeric strings, zero when absent or malformed
pub(crate) fn lenient_amount<'de, D>(deserializer: D) -> std::result::Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(lenient_number(deserializer)?
        .filter(|v| v.is_finite())
        .unwrap_or(0.0))
}

/// Lenient head count; negative or malformed values count as zero
pub(crate) fn lenient_count<'de, D>(deserializer: D) -> std::result::Result<u32, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(lenient_number(deserializer)?
        .filter(|v| v.is_finite() && *v >= 0.0)
        .map(|v| v as u32)
        .unwrap_or(0))
}

/// Accept strings and numbers (ids are sometimes numeric); everything else is absent
fn lenient_string<'de, D>(deserializer: D) -> std::result::Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<serde_json::Value>::deserialize(deserializer)?;
    Ok(value.and_then(|v| match v {
        serde_json::Value::String(s) => Some(s),
        serde_json::Value::Number(n) => Some(n.to_string()),
        _ => None,
    }))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_numeric_strings_are_parsed() {
        let rec: Recommendation =
            serde_json::from_str(r#"{"price": "450", "rating": " 4.2 ", "latitude": 12.9}"#)
                .unwrap();
        assert_eq!(rec.price, Some(450.0));
        assert_eq!(rec.rating, Some(4.2));
        assert_eq!(rec.latitude, Some(12.9));
    }

    #[test]
    fn test_malformed_fields_become_absent() {
        let rec: Recommendation = serde_json::from_str(
            r#"{"id": 17, "name": null, "price": "cheap", "duration": [1], "type": 3}"#,
        )
        .unwrap();
        assert_eq!(rec.id.as_deref(), Some("17"));
        assert_eq!(rec.name, None);
        assert_eq!(rec.price, None);
        assert_eq!(rec.duration, None);
        assert_eq!(rec.kind, None);
    }

    #[test]
    fn test_present_helpers() {
        assert_eq!(present_number(Some(0.0)), None);
        assert_eq!(present_number(Some(f64::NAN)), None);
        assert_eq!(present_number(Some(3.5)), Some(3.5));
        assert_eq!(present_str(&Some(String::new())), None);
        assert_eq!(present_str(&Some("x".to_string())), Some("x"));
    }

    #[test]
    fn test_pool_defaults_missing_lists() {
        let pool: RecommendationPool = serde_json::from_str(r#"{"spots": [{}]}"#).unwrap();
        assert_eq!(pool.len(), 1);
        assert!(pool.lunch.is_empty());
    }
}
