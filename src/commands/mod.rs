/*!
Command handlers for the CLI

This module provides command handlers invoked by the CLI entrypoint:

- `preview`: Build the itinerary from files and print it
- `save`:    Build the itinerary and save it to the itinerary service
- `fetch`:   Show a trip's saved itinerary

Building a planner from files is shared: the navigation state file seeds the
planner, then an optional drops file places recommendations onto days.
*/

use crate::cli::PlanArgs;
use crate::config::Config;
use crate::error::{Result, TripcraftError};
use crate::itinerary::{Day, DayRecord, DropEvent, DropOutcome, ItemKind};
use crate::notify::Notifier;
use crate::planner::{NavigationState, Planner, PlannerMode};
use crate::service::ItineraryService;

use colored::Colorize;
use prettytable::{format, Table};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

pub mod fetch;

/// Which recommendation list a scripted drop takes its card from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RecommendationSource {
    Spots,
    Lunch,
    Stay,
}

/// One scripted drop: card `index` of `source` onto 1-based day `day`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DropInstruction {
    pub source: RecommendationSource,
    pub index: usize,
    pub day: usize,
}

/// Read a navigation state file (JSON)
pub fn load_state(path: &Path) -> Result<NavigationState> {
    let content = fs::read_to_string(path).map_err(|e| {
        TripcraftError::Config(format!(
            "Failed to read state file {}: {}",
            path.display(),
            e
        ))
    })?;
    Ok(serde_json::from_str(&content).map_err(TripcraftError::Serialization)?)
}

/// Read a drops file
///
/// Supports `.yaml`, `.yml` and `.json` extensions.
pub fn load_drops(path: &Path) -> Result<Vec<DropInstruction>> {
    let content = fs::read_to_string(path).map_err(|e| {
        TripcraftError::InvalidDrop(format!(
            "Failed to read drops file {}: {}",
            path.display(),
            e
        ))
    })?;

    let extension = path
        .extension()
        .and_then(|s| s.to_str())
        .ok_or_else(|| TripcraftError::InvalidDrop("Drops file has no extension".to_string()))?;

    match extension {
        "yaml" | "yml" => Ok(serde_yaml::from_str(&content).map_err(TripcraftError::Yaml)?),
        "json" => Ok(serde_json::from_str(&content).map_err(TripcraftError::Serialization)?),
        other => Err(TripcraftError::InvalidDrop(format!(
            "Unsupported drops format: {}",
            other
        ))
        .into()),
    }
}

/// Apply scripted drops to a planner
///
/// Drops onto a day ordinal that does not exist are ignored, like a drop
/// released outside any day.
///
/// # Errors
///
/// Returns `InvalidDrop` if an instruction names a recommendation that is not
/// in the pool
pub fn apply_drops(planner: &mut Planner, drops: &[DropInstruction]) -> Result<usize> {
    let mut added = 0;
    for drop in drops {
        let pool = planner.recommendations();
        let list = match drop.source {
            RecommendationSource::Spots => &pool.spots,
            RecommendationSource::Lunch => &pool.lunch,
            RecommendationSource::Stay => &pool.stay,
        };
        let mut payload = list.get(drop.index).cloned().ok_or_else(|| {
            TripcraftError::InvalidDrop(format!(
                "No {:?} recommendation at index {} (pool has {})",
                drop.source,
                drop.index,
                list.len()
            ))
        })?;
        if payload.kind.is_none() {
            payload.kind = Some(source_type(drop.source).to_string());
        }

        let target_day = drop
            .day
            .checked_sub(1)
            .and_then(|i| planner.days().get(i))
            .map(|d| d.id.clone());

        match planner.handle_drop(DropEvent {
            payload: Some(payload),
            target_day,
        }) {
            DropOutcome::Added { .. } => added += 1,
            DropOutcome::Ignored(reason) => {
                tracing::warn!(day = drop.day, ?reason, "Drop ignored")
            }
        }
    }
    Ok(added)
}

/// Item type implied by the list a card comes from
fn source_type(source: RecommendationSource) -> &'static str {
    match source {
        RecommendationSource::Spots => "spot",
        RecommendationSource::Lunch => "lunch",
        RecommendationSource::Stay => "stay",
    }
}

/// Build a planner from the state and drops files
///
/// In edit mode, a state file without an itinerary is hydrated from the
/// itinerary service.
pub async fn build_planner(
    config: &Config,
    args: &PlanArgs,
    service: &dyn ItineraryService,
    notifier: Arc<dyn Notifier>,
) -> Result<Planner> {
    let state = load_state(&args.state)?;
    let needs_remote = args.mode == PlannerMode::Edit && state.itinerary.is_none();

    let mut planner = Planner::new(
        notifier,
        Duration::from_secs(config.planner.success_display_seconds),
    );
    planner.load(Some(state), args.mode)?;

    if needs_remote && planner.trip_id().is_some() && !planner.hydrate_from_service(service).await? {
        tracing::warn!("Edit mode requested but the trip has no saved itinerary");
    }

    if let Some(path) = &args.drops {
        let drops = load_drops(path)?;
        let added = apply_drops(&mut planner, &drops)?;
        tracing::info!(added, total = drops.len(), "Applied drops");
    }

    Ok(planner)
}

/// Print the planner's trip header and day table
pub fn print_planner(planner: &Planner) {
    let trip = planner.store().trip();
    println!();
    if !trip.title.is_empty() {
        println!("{}", trip.title.bold());
    }
    if !trip.destination.is_empty() {
        println!("Planning your trip to {}", trip.destination.cyan());
    }
    if let (Some(start), Some(end)) = (trip.start_date, trip.end_date) {
        if start == end {
            println!("Duration:  {}", start);
        } else {
            println!("Duration:  {} - {}", start, end);
        }
    }
    println!("Travelers: {} people", trip.suggested_people);
    println!("Budget:    {:.2}", planner.total_budget());
    println!("Planned:   {:.2}", planner.store().planned_cost());
    if planner.remaining_days() > 0 {
        println!("{} day(s) remaining", planner.remaining_days());
    }
    print_days_table(planner.days());
}

/// Render days and their items as a table
pub fn print_days_table(days: &[Day]) {
    if days.is_empty() {
        println!("{}", "No days planned yet".yellow());
        return;
    }

    let mut table = Table::new();
    table.set_format(*format::consts::FORMAT_BORDERS_ONLY);
    table.add_row(prettytable::row![
        "Day".bold(),
        "Date".bold(),
        "Type".bold(),
        "Name".bold(),
        "Location".bold(),
        "Cost".bold()
    ]);

    for (index, day) in days.iter().enumerate() {
        let ordinal = index + 1;
        if day.items.is_empty() {
            table.add_row(prettytable::row![ordinal, day.date, "-", "-", "-", "-"]);
            continue;
        }
        for item in &day.items {
            let detail = match &item.kind {
                ItemKind::Spot {
                    duration,
                    duration_unit,
                    ..
                } => format!("{} ({} {})", item.name, duration, duration_unit),
                _ => item.name.clone(),
            };
            table.add_row(prettytable::row![
                ordinal,
                day.date,
                item.item_type().to_string().cyan(),
                detail,
                item.location,
                format!("{:.2}", item.cost())
            ]);
        }
    }

    table.printstd();
    println!();
}

/// Render service-side day records as a table
pub fn print_records_table(records: &[DayRecord]) {
    if records.is_empty() {
        println!("{}", "Itinerary has no days".yellow());
        return;
    }

    let mut table = Table::new();
    table.set_format(*format::consts::FORMAT_BORDERS_ONLY);
    table.add_row(prettytable::row![
        "Day".bold(),
        "Date".bold(),
        "Activities".bold(),
        "Lunch".bold(),
        "Stay".bold()
    ]);
    for record in records {
        table.add_row(prettytable::row![
            record.day,
            record.date,
            join_names(record.activities.iter().map(|a| a.name.as_str())),
            join_names(record.lunch.iter().map(|l| l.name.as_str())),
            join_names(record.stay.iter().map(|s| s.name.as_str()))
        ]);
    }
    table.printstd();
    println!();
}

fn join_names<'a>(names: impl Iterator<Item = &'a str>) -> String {
    let joined = names.collect::<Vec<_>>().join(", ");
    if joined.is_empty() {
        "-".to_string()
    } else {
        joined
    }
}

// Preview command handler
pub mod preview {
    //! Build the itinerary from files and print it, without saving.

    use super::*;
    use crate::itinerary::build_payload;

    /// Run the preview command
    pub async fn run_preview(
        config: &Config,
        args: &PlanArgs,
        json: bool,
        service: &dyn ItineraryService,
        notifier: Arc<dyn Notifier>,
    ) -> Result<()> {
        let planner = build_planner(config, args, service, notifier).await?;

        if json {
            let payload = build_payload(planner.trip_id().unwrap_or_default(), planner.days());
            println!("{}", serde_json::to_string_pretty(&payload)?);
        } else {
            print_planner(&planner);
        }
        Ok(())
    }
}

// Save command handler
pub mod save {
    //! Build the itinerary from files and save it.

    use super::*;

    /// Run the save command
    ///
    /// Fails if the planner has no trip id or the service rejects the save.
    pub async fn run_save(
        config: &Config,
        args: &PlanArgs,
        service: &dyn ItineraryService,
        notifier: Arc<dyn Notifier>,
    ) -> Result<()> {
        let planner = build_planner(config, args, service, notifier).await?;
        let saved = planner.save(service).await?;

        if let Some(id) = &saved.id {
            println!("Saved itinerary {} ({} days)", id.cyan(), saved.itinerary.len());
        }
        Ok(())
    }
}
