use crate::error::Result;
use crate::service::ItineraryService;
use colored::Colorize;

use super::print_records_table;

/// Show the saved itinerary of a trip
pub async fn run_fetch(service: &dyn ItineraryService, trip_id: &str, json: bool) -> Result<()> {
    let Some(saved) = service.itinerary_for_trip(trip_id).await? else {
        if json {
            println!("null");
        } else {
            println!(
                "{}",
                format!("No saved itinerary for trip {}", trip_id).yellow()
            );
        }
        return Ok(());
    };

    if json {
        println!("{}", serde_json::to_string_pretty(&saved)?);
        return Ok(());
    }

    println!(
        "\nItinerary {} for trip {}:",
        saved.id.as_deref().unwrap_or("-").cyan(),
        trip_id.cyan()
    );
    print_records_table(&saved.itinerary);
    Ok(())
}
