//! Command-line interface definition for TripCraft
//!
//! This module defines the CLI structure using clap's derive API,
//! providing commands to preview, save and fetch itineraries.

use crate::planner::PlannerMode;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// TripCraft - itinerary planner
///
/// Load a trip, place recommendations onto days, and save the
/// itinerary to the TripCraft backend.
#[derive(Parser, Debug, Clone)]
#[command(name = "tripcraft")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Path to configuration file
    #[arg(short, long, default_value = "config/config.yaml")]
    pub config: Option<String>,

    /// Enable verbose logging
    #[arg(short, long)]
    pub verbose: bool,

    /// Override the itinerary service base URL
    #[arg(long, global = true)]
    pub service_url: Option<String>,

    /// Command to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Available commands
#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    /// Build the itinerary from a trip state file and print it
    Preview {
        #[command(flatten)]
        plan: PlanArgs,

        /// Print the save payload as JSON instead of a table
        #[arg(long)]
        json: bool,
    },

    /// Build the itinerary and save it to the itinerary service
    Save {
        #[command(flatten)]
        plan: PlanArgs,
    },

    /// Show the saved itinerary of a trip
    Fetch {
        /// Trip identifier
        #[arg(short, long)]
        trip_id: String,

        /// Print raw JSON instead of a table
        #[arg(long)]
        json: bool,
    },
}

/// Inputs shared by commands that build a planner
#[derive(clap::Args, Debug, Clone, PartialEq)]
pub struct PlanArgs {
    /// Navigation state file (JSON) describing the trip
    #[arg(short, long)]
    pub state: PathBuf,

    /// Planner mode: generate (from recommendations) or edit (from a saved itinerary)
    #[arg(short, long, default_value = "generate")]
    pub mode: PlannerMode,

    /// Drops file (YAML or JSON) placing recommendations onto days
    #[arg(short, long)]
    pub drops: Option<PathBuf>,
}

impl Cli {
    /// Parse command line arguments
    pub fn parse_args() -> Self {
        Self::parse()
    }
}

impl Default for Cli {
    fn default() -> Self {
        Self {
            config: Some("config/config.yaml".to_string()),
            verbose: false,
            service_url: None,
            command: Commands::Preview {
                plan: PlanArgs {
                    state: PathBuf::from("trip.json"),
                    mode: PlannerMode::Generate,
                    drops: None,
                },
                json: false,
            },
        }
    }
}
