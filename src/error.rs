//! Error types for TripCraft
//!
//! This module defines all error types used throughout the planner,
//! using `thiserror` for ergonomic error handling.

use thiserror::Error;

/// Main error type for TripCraft operations
///
/// Covers configuration loading, planner preconditions, the itinerary
/// service boundary, and input parsing.
#[derive(Error, Debug)]
pub enum TripcraftError {
    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// Save attempted without a trip identifier
    #[error("No trip ID found. Please create a trip first.")]
    MissingTripId,

    /// Save attempted while another save is still outstanding
    #[error("A save is already in progress")]
    SaveInProgress,

    /// Itinerary service failures (non-2xx responses, transport errors)
    ///
    /// The payload is the human-readable message surfaced to the user.
    #[error("{0}")]
    Service(String),

    /// A trip or day date could not be parsed
    #[error("Invalid date: {0}")]
    InvalidDate(String),

    /// A scripted drop could not be resolved
    #[error("Invalid drop: {0}")]
    InvalidDrop(String),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization/deserialization errors
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// YAML parsing errors
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// HTTP client construction and request-building errors
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),
}

/// Result type alias for TripCraft operations
///
/// Uses `anyhow::Error` so callers can attach context while the typed
/// `TripcraftError` stays recoverable through `downcast_ref`.
pub type Result<T> = anyhow::Result<T>;
