//! TripCraft - itinerary planner CLI
//!
#![doc = "Main entry point for the TripCraft itinerary planner."]

use anyhow::Result;
use std::sync::Arc;

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use tripcraft::cli::{Cli, Commands};
use tripcraft::commands;
use tripcraft::config::Config;
use tripcraft::notify::{ConsoleNotifier, LogNotifier, Notifier};
use tripcraft::service::HttpItineraryService;

#[tokio::main]
async fn main() -> Result<()> {
    // Parse command line arguments
    let cli = Cli::parse_args();

    init_tracing(cli.verbose);

    // Load configuration
    let config_path = cli.config.as_deref().unwrap_or("config/config.yaml");
    let config = Config::load(config_path, &cli)?;

    // Validate configuration
    config.validate()?;

    let service = HttpItineraryService::new(&config.service)?;

    match cli.command {
        Commands::Preview { plan, json } => {
            tracing::info!("Previewing itinerary from {}", plan.state.display());
            // Keep stdout clean for the JSON payload
            let notifier: Arc<dyn Notifier> = if json {
                Arc::new(LogNotifier)
            } else {
                Arc::new(ConsoleNotifier)
            };
            commands::preview::run_preview(&config, &plan, json, &service, notifier).await?;
            Ok(())
        }
        Commands::Save { plan } => {
            tracing::info!("Saving itinerary from {}", plan.state.display());
            commands::save::run_save(&config, &plan, &service, Arc::new(ConsoleNotifier)).await?;
            Ok(())
        }
        Commands::Fetch { trip_id, json } => {
            tracing::info!("Fetching itinerary for trip {}", trip_id);
            commands::fetch::run_fetch(&service, &trip_id, json).await?;
            Ok(())
        }
    }
}

/// Initialize tracing subscriber with environment filter
///
/// Logs go to stderr so command output on stdout stays parseable.
fn init_tracing(verbose: bool) {
    let default_filter = if verbose {
        "tripcraft=debug"
    } else {
        "tripcraft=info"
    };
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}
