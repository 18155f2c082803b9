//! HTTP client for the TripCraft itinerary API
//!
//! Endpoints used:
//! - `POST {base}/api/itinerary` creates or replaces a trip's itinerary
//! - `GET {base}/api/itinerary/trip/{tripId}` reads it back

use super::{ItineraryService, SavedItinerary};
use crate::config::ServiceConfig;
use crate::error::{Result, TripcraftError};
use crate::itinerary::SavePayload;

use async_trait::async_trait;
use reqwest::{Client, RequestBuilder, StatusCode};
use serde::Deserialize;
use std::time::Duration;
use url::Url;

/// Error body returned by the backend, e.g. `{"message": "Trip ID not found!"}`
#[derive(Debug, Deserialize)]
struct ErrorBody {
    message: String,
}

/// [`ItineraryService`] backed by the itinerary REST API
///
/// # Examples
///
/// ```
/// use tripcraft::config::ServiceConfig;
/// use tripcraft::service::HttpItineraryService;
///
/// let service = HttpItineraryService::new(&ServiceConfig::default()).unwrap();
/// assert_eq!(service.base_url().as_str(), "http://localhost:8080/");
/// ```
#[derive(Debug, Clone)]
pub struct HttpItineraryService {
    client: Client,
    base_url: Url,
    auth_token: Option<String>,
}

impl HttpItineraryService {
    /// Create a client for the configured backend
    ///
    /// # Errors
    ///
    /// Returns error if the base URL is invalid or the HTTP client cannot be built
    pub fn new(config: &ServiceConfig) -> Result<Self> {
        let base_url = Url::parse(&config.base_url).map_err(|e| {
            TripcraftError::Config(format!("Invalid service URL '{}': {}", config.base_url, e))
        })?;
        if base_url.cannot_be_a_base() {
            return Err(TripcraftError::Config(format!(
                "Service URL cannot be used as a base: {}",
                config.base_url
            ))
            .into());
        }

        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_seconds))
            .user_agent(concat!("tripcraft/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(TripcraftError::Http)?;

        tracing::info!("Initialized itinerary service client: base_url={}", base_url);

        Ok(Self {
            client,
            base_url,
            auth_token: config.auth_token.clone(),
        })
    }

    /// Configured backend base URL
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Build `{base}/api/itinerary/{segments...}` with each segment escaped
    fn endpoint(&self, segments: &[&str]) -> Result<Url> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| {
                TripcraftError::Config(format!("Service URL cannot be a base: {}", self.base_url))
            })?
            .pop_if_empty()
            .extend(["api", "itinerary"])
            .extend(segments);
        Ok(url)
    }

    fn authorize(&self, request: RequestBuilder) -> RequestBuilder {
        match &self.auth_token {
            Some(token) => request.bearer_auth(token),
            None => request,
        }
    }
}

/// Extract the user-facing message from a failed response
fn error_message(status: StatusCode, body: &str) -> String {
    match serde_json::from_str::<ErrorBody>(body) {
        Ok(parsed) if !parsed.message.is_empty() => parsed.message,
        _ if body.trim().is_empty() => format!("Itinerary service returned {}", status),
        _ => format!("Itinerary service returned {}: {}", status, body.trim()),
    }
}

/// Saved itinerary for a 2xx response without a usable body
fn echo_payload(payload: &SavePayload) -> SavedItinerary {
    SavedItinerary {
        id: None,
        trip_id: Some(payload.trip_id.clone()),
        itinerary: payload.itinerary.clone(),
    }
}

fn transport_error(e: reqwest::Error) -> anyhow::Error {
    tracing::warn!("Itinerary service request failed: {}", e);
    TripcraftError::Service(format!("Failed to reach itinerary service: {}", e)).into()
}

#[async_trait]
impl ItineraryService for HttpItineraryService {
    async fn create_itinerary(&self, payload: &SavePayload) -> Result<SavedItinerary> {
        let url = self.endpoint(&[])?;
        tracing::debug!(
            trip_id = %payload.trip_id,
            days = payload.itinerary.len(),
            "POST {}",
            url
        );

        let response = self
            .authorize(self.client.post(url).json(payload))
            .send()
            .await
            .map_err(transport_error)?;

        let status = response.status();
        let body = response.text().await.map_err(transport_error)?;
        if !status.is_success() {
            tracing::error!("Itinerary service returned error {}: {}", status, body);
            return Err(TripcraftError::Service(error_message(status, &body)).into());
        }

        // 2xx means stored; without a readable body the payload stands in
        match serde_json::from_str::<Option<SavedItinerary>>(&body) {
            Ok(Some(saved)) => Ok(saved),
            Ok(None) => Ok(echo_payload(payload)),
            Err(_) if body.trim().is_empty() => Ok(echo_payload(payload)),
            Err(e) => {
                tracing::warn!("Saved itinerary response could not be parsed: {}", e);
                Ok(echo_payload(payload))
            }
        }
    }

    async fn itinerary_for_trip(&self, trip_id: &str) -> Result<Option<SavedItinerary>> {
        let url = self.endpoint(&["trip", trip_id])?;
        tracing::debug!(trip_id, "GET {}", url);

        let response = self
            .authorize(self.client.get(url))
            .send()
            .await
            .map_err(transport_error)?;

        let status = response.status();
        if status == StatusCode::NOT_FOUND {
            return Ok(None);
        }

        let body = response.text().await.map_err(transport_error)?;
        if !status.is_success() {
            tracing::error!("Itinerary service returned error {}: {}", status, body);
            return Err(TripcraftError::Service(error_message(status, &body)).into());
        }

        if body.trim().is_empty() {
            return Ok(None);
        }

        serde_json::from_str::<Option<SavedItinerary>>(&body).map_err(|e| {
            TripcraftError::Service(format!("Unexpected response from itinerary service: {}", e))
                .into()
        })
    }
}
