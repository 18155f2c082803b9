//! TripCraft - itinerary planner library
//!
//! This library provides the planning core of TripCraft: turning a trip's
//! date range and a pool of recommendations into a day-by-day itinerary,
//! and saving that itinerary to the TripCraft backend.
//!
//! # Architecture
//!
//! The library is organized into the following modules:
//!
//! - `itinerary`: Days, items, the itinerary store, drop handling and the save payload
//! - `planner`: A planning session seeded from navigation state
//! - `save`: Single-flight save coordinator
//! - `service`: Itinerary service abstraction and its HTTP implementation
//! - `notify`: User-facing notifications
//! - `config`: Configuration management and validation
//! - `error`: Error types and result aliases
//! - `cli`: Command-line interface definition
//!
//! # Example
//!
//! ```no_run
//! use std::sync::Arc;
//! use std::time::Duration;
//! use tripcraft::notify::ConsoleNotifier;
//! use tripcraft::service::HttpItineraryService;
//! use tripcraft::{Config, Planner, PlannerMode};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let config = Config::load("config.yaml", &Default::default())?;
//!     config.validate()?;
//!
//!     let mut planner = Planner::new(Arc::new(ConsoleNotifier), Duration::from_secs(3));
//!     planner.load(None, PlannerMode::Generate)?;
//!
//!     let service = HttpItineraryService::new(&config.service)?;
//!     planner.save(&service).await?;
//!     Ok(())
//! }
//! ```

pub mod cli;
pub mod commands;
pub mod config;
pub mod error;
pub mod itinerary;
pub mod notify;
pub mod planner;
pub mod save;
pub mod service;

// Re-export commonly used types
pub use config::Config;
pub use error::{Result, TripcraftError};
pub use itinerary::{Day, Item, ItemKind, ItineraryStore, Recommendation, SavePayload};
pub use planner::{NavigationState, Planner, PlannerMode};
pub use save::{SaveCoordinator, SaveState};
