//! Tests for the `tripcraft` binary

use assert_cmd::Command;
use predicates::prelude::*;
use serde_json::{json, Value};
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

mod common;

/// Command with a config path that does not exist, so defaults apply
fn tripcraft(dir: &tempfile::TempDir) -> Command {
    let mut cmd = Command::cargo_bin("tripcraft").unwrap();
    cmd.env_remove("TRIPCRAFT_SERVICE_URL")
        .env_remove("RUST_LOG")
        .arg("--config")
        .arg(dir.path().join("missing.yaml"));
    cmd
}

#[test]
fn test_preview_json_applies_drops() {
    let (dir, state) = common::temp_file("trip.json", &common::goa_state(Some("trip-1")));
    let drops = common::write_file(
        &dir,
        "drops.yaml",
        "- source: spots\n  index: 0\n  day: 1\n- source: lunch\n  index: 0\n  day: 1\n- source: stay\n  index: 0\n  day: 7\n",
    );

    let output = tripcraft(&dir)
        .arg("preview")
        .arg("--state")
        .arg(&state)
        .arg("--drops")
        .arg(&drops)
        .arg("--json")
        .output()
        .unwrap();
    assert!(output.status.success());

    let payload: Value = serde_json::from_slice(&output.stdout).expect("stdout is JSON");
    assert_eq!(payload["tripId"], "trip-1");
    let days = payload["itinerary"].as_array().unwrap();
    assert_eq!(days.len(), 3);
    assert_eq!(days[0]["activities"][0]["name"], "Fort Aguada");
    assert_eq!(days[0]["lunch"][0]["price"], 800.0);
    assert!(days.iter().all(|d| d["stay"].as_array().unwrap().is_empty()));
}

#[test]
fn test_preview_table_shows_trip() {
    let (dir, state) = common::temp_file("trip.json", &common::goa_state(Some("trip-1")));

    tripcraft(&dir)
        .arg("preview")
        .arg("-s")
        .arg(&state)
        .assert()
        .success()
        .stdout(predicate::str::contains("Goa Getaway"))
        .stdout(predicate::str::contains("2025-06-03"));
}

#[test]
fn test_preview_missing_state_file_fails() {
    let dir = tempfile::TempDir::new().unwrap();

    tripcraft(&dir)
        .arg("preview")
        .arg("-s")
        .arg(dir.path().join("nope.json"))
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to read state file"));
}

#[test]
fn test_preview_bad_drop_index_fails() {
    let (dir, state) = common::temp_file("trip.json", &common::goa_state(Some("trip-1")));
    let drops = common::write_file(&dir, "drops.json", r#"[{"source": "spots", "index": 5, "day": 1}]"#);

    tripcraft(&dir)
        .arg("preview")
        .arg("-s")
        .arg(&state)
        .arg("-d")
        .arg(&drops)
        .assert()
        .failure()
        .stderr(predicate::str::contains("No Spots recommendation at index 5"));
}

#[test]
fn test_save_without_trip_id_fails() {
    let (dir, state) = common::temp_file("trip.json", &common::goa_state(None));

    tripcraft(&dir)
        .arg("save")
        .arg("-s")
        .arg(&state)
        .assert()
        .failure()
        .stderr(predicate::str::contains(
            "No trip ID found. Please create a trip first.",
        ));
}

#[test]
fn test_invalid_service_url_rejected() {
    let (dir, state) = common::temp_file("trip.json", &common::goa_state(Some("trip-1")));

    tripcraft(&dir)
        .arg("--service-url")
        .arg("ftp://files.example.com")
        .arg("preview")
        .arg("-s")
        .arg(&state)
        .assert()
        .failure()
        .stderr(predicate::str::contains("must use http or https"));
}

#[tokio::test(flavor = "multi_thread")]
async fn test_save_posts_to_service() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/itinerary"))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({
            "id": "it-77",
            "tripId": "trip-1",
            "itinerary": [{"day": 1, "date": "2025-06-01"}]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let (dir, state) = common::temp_file("trip.json", &common::goa_state(Some("trip-1")));

    tripcraft(&dir)
        .arg("--service-url")
        .arg(server.uri())
        .arg("save")
        .arg("-s")
        .arg(&state)
        .assert()
        .success()
        .stdout(predicate::str::contains("Itinerary saved successfully!"))
        .stdout(predicate::str::contains("it-77"));
}

#[tokio::test(flavor = "multi_thread")]
async fn test_fetch_prints_saved_itinerary() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/itinerary/trip/trip-1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": "it-77",
            "tripId": "trip-1",
            "itinerary": [{"day": 1, "date": "2025-06-01",
                           "activities": [{"name": "Fort Aguada"}]}]
        })))
        .mount(&server)
        .await;

    let dir = tempfile::TempDir::new().unwrap();
    let output = tripcraft(&dir)
        .arg("--service-url")
        .arg(server.uri())
        .arg("fetch")
        .arg("--trip-id")
        .arg("trip-1")
        .arg("--json")
        .output()
        .unwrap();
    assert!(output.status.success());

    let saved: Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(saved["id"], "it-77");
    assert_eq!(saved["itinerary"][0]["activities"][0]["name"], "Fort Aguada");
}

#[tokio::test(flavor = "multi_thread")]
async fn test_fetch_unknown_trip_reports_none() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;

    let dir = tempfile::TempDir::new().unwrap();
    tripcraft(&dir)
        .arg("--service-url")
        .arg(server.uri())
        .arg("fetch")
        .arg("-t")
        .arg("ghost")
        .assert()
        .success()
        .stdout(predicate::str::contains("No saved itinerary for trip ghost"));
}
