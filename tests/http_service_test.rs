//! Itinerary service HTTP client tests
//!
//! Runs `HttpItineraryService` against a `wiremock` mock of the backend's
//! `/api/itinerary` endpoints.

use serde_json::json;
use wiremock::matchers::{body_partial_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use tripcraft::config::ServiceConfig;
use tripcraft::error::TripcraftError;
use tripcraft::itinerary::{DayRecord, SavePayload};
use tripcraft::service::{HttpItineraryService, ItineraryService};

fn make_service(base_url: &str, auth_token: Option<&str>) -> HttpItineraryService {
    HttpItineraryService::new(&ServiceConfig {
        base_url: base_url.to_string(),
        timeout_seconds: 5,
        auth_token: auth_token.map(str::to_string),
    })
    .expect("valid service config")
}

fn payload() -> SavePayload {
    SavePayload {
        trip_id: "trip-42".to_string(),
        itinerary: vec![DayRecord {
            day: 1,
            date: "2025-06-01".to_string(),
            ..Default::default()
        }],
    }
}

#[tokio::test]
async fn test_create_itinerary_posts_payload() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/itinerary"))
        .and(header("authorization", "Bearer secret"))
        .and(body_partial_json(json!({
            "tripId": "trip-42",
            "itinerary": [{"day": 1, "date": "2025-06-01", "activities": [], "lunch": [], "stay": []}]
        })))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({
            "id": "it-9",
            "tripId": "trip-42",
            "itinerary": [{"day": 1, "date": "2025-06-01"}]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let service = make_service(&server.uri(), Some("secret"));
    let saved = service.create_itinerary(&payload()).await.unwrap();

    assert_eq!(saved.id.as_deref(), Some("it-9"));
    assert_eq!(saved.trip_id.as_deref(), Some("trip-42"));
    assert_eq!(saved.itinerary.len(), 1);
    assert!(saved.itinerary[0].activities.is_empty());
}

#[tokio::test]
async fn test_create_itinerary_surfaces_backend_message() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/itinerary"))
        .respond_with(
            ResponseTemplate::new(400).set_body_json(json!({"message": "Trip ID not found!"})),
        )
        .mount(&server)
        .await;

    let service = make_service(&server.uri(), None);
    let err = service.create_itinerary(&payload()).await.unwrap_err();

    match err.downcast_ref::<TripcraftError>() {
        Some(TripcraftError::Service(message)) => assert_eq!(message, "Trip ID not found!"),
        other => panic!("Expected Service error, got {:?}", other),
    }
}

#[tokio::test]
async fn test_itinerary_for_trip_returns_saved_days() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/itinerary/trip/trip-42"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": "it-9",
            "tripId": "trip-42",
            "itinerary": [{
                "day": 1,
                "date": "2025-06-01",
                "activities": [{"name": "Fort Aguada", "estimatedCost": 100}],
                "lunch": [],
                "stay": [{"name": "Taj Exotica", "pricePerNight": 12000}]
            }]
        })))
        .mount(&server)
        .await;

    let service = make_service(&server.uri(), None);
    let saved = service.itinerary_for_trip("trip-42").await.unwrap().unwrap();

    let day = &saved.itinerary[0];
    assert_eq!(day.activities[0].name, "Fort Aguada");
    assert_eq!(day.activities[0].estimated_cost, 100.0);
    assert_eq!(day.stay[0].price_per_night, 12000.0);
}

#[tokio::test]
async fn test_itinerary_for_trip_missing_is_none() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/itinerary/trip/unknown"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/itinerary/trip/empty"))
        .respond_with(ResponseTemplate::new(200).set_body_raw("null", "application/json"))
        .mount(&server)
        .await;

    let service = make_service(&server.uri(), None);
    assert!(service.itinerary_for_trip("unknown").await.unwrap().is_none());
    assert!(service.itinerary_for_trip("empty").await.unwrap().is_none());
}

#[tokio::test]
async fn test_server_error_without_body_is_service_error() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let service = make_service(&server.uri(), None);
    let err = service.itinerary_for_trip("trip-42").await.unwrap_err();
    assert!(matches!(
        err.downcast_ref::<TripcraftError>(),
        Some(TripcraftError::Service(_))
    ));
}

#[tokio::test]
async fn test_create_itinerary_empty_success_body_echoes_payload() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/itinerary"))
        .respond_with(ResponseTemplate::new(201))
        .expect(1)
        .mount(&server)
        .await;

    let service = make_service(&server.uri(), None);
    let saved = service.create_itinerary(&payload()).await.unwrap();

    assert_eq!(saved.id, None);
    assert_eq!(saved.trip_id.as_deref(), Some("trip-42"));
    assert_eq!(saved.itinerary, payload().itinerary);
}

#[tokio::test]
async fn test_create_itinerary_unreadable_success_body_still_succeeds() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/itinerary"))
        .respond_with(ResponseTemplate::new(200).set_body_string("saved"))
        .mount(&server)
        .await;

    let service = make_service(&server.uri(), None);
    let saved = service.create_itinerary(&payload()).await.unwrap();
    assert_eq!(saved.trip_id.as_deref(), Some("trip-42"));
}
