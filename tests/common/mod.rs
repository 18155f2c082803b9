use std::fs;
use std::path::PathBuf;
use tempfile::TempDir;

/// Write `contents` to `name` inside a fresh temp dir
#[allow(dead_code)]
pub fn temp_file(name: &str, contents: &str) -> (TempDir, PathBuf) {
    let temp_dir = TempDir::new().expect("failed to create tempdir");
    let path = temp_dir.path().join(name);
    fs::write(&path, contents).expect("failed to write temp file");
    (temp_dir, path)
}

/// Write an additional file into an existing temp dir
#[allow(dead_code)]
pub fn write_file(dir: &TempDir, name: &str, contents: &str) -> PathBuf {
    let path = dir.path().join(name);
    fs::write(&path, contents).expect("failed to write temp file");
    path
}

/// Navigation state for a three-day trip to Goa with one card per list
#[allow(dead_code)]
pub fn goa_state(trip_id: Option<&str>) -> String {
    let trip_id = trip_id
        .map(|id| format!("\"{}\"", id))
        .unwrap_or_else(|| "null".to_string());
    format!(
        r#"{{
  "tripId": {trip_id},
  "tripData": {{
    "title": "Goa Getaway",
    "destination": "Goa",
    "startDate": "2025-06-01",
    "endDate": "2025-06-03",
    "budget": 5000,
    "people": 2
  }},
  "spots": [
    {{"id": "s1", "name": "Fort Aguada", "category": "Heritage",
      "estimatedCost": 100, "duration": "1.5", "type": "spot"}}
  ],
  "lunch": [
    {{"id": "l1", "name": "Fisherman's Wharf", "price": 800, "type": "lunch"}}
  ],
  "stay": [
    {{"id": "h1", "name": "Taj Exotica", "pricePerNight": 12000, "type": "stay"}}
  ]
}}"#
    )
}
