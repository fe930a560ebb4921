use crate::app::report::{self, OutputFormat, Table};
use crate::config::cli::Command;
use crate::config::toml_config::FleetConfig;
use crate::core::commands::{apply_commands, parse_commands};
use crate::core::store::FleetStore;
use crate::core::views;
use crate::domain::model::{RouteId, VanId};
use crate::utils::error::Result;
use serde::Serialize;

/// Runs one CLI command against a store seeded from configuration.
pub struct FleetRunner {
    store: FleetStore,
    fleet_name: String,
}

#[derive(Serialize)]
struct AppliedReport<'a, T: Serialize> {
    outcomes: &'a [crate::core::commands::CommandOutcome],
    fleet: T,
}

impl FleetRunner {
    pub fn new(store: FleetStore, fleet_name: impl Into<String>) -> Self {
        Self {
            store,
            fleet_name: fleet_name.into(),
        }
    }

    pub fn from_config(config: &FleetConfig) -> Result<Self> {
        Ok(Self::new(config.build_store()?, config.fleet_name()))
    }

    pub fn store(&self) -> &FleetStore {
        &self.store
    }

    pub fn run(&mut self, command: &Command) -> Result<String> {
        let snapshot = self.store.snapshot();

        match command {
            Command::Summary => {
                let stats = views::dashboard_stats(&snapshot);
                let recent = views::recent_bookings(&snapshot, views::RECENT_BOOKINGS_LIMIT);
                Ok(report::render_summary(&self.fleet_name, &stats, &recent))
            }
            Command::Vans { search, status } => {
                let vans = views::search_vans(&snapshot, search, *status);
                let filtered = !search.is_empty() || *status != views::StatusFilter::All;
                Ok(report::render_vans(&vans, filtered))
            }
            Command::Routes { search } => {
                let routes = views::search_routes(&snapshot, search);
                Ok(report::render_routes(&routes))
            }
            Command::Seats { van_id } => match snapshot.van(&VanId::new(van_id.as_str())) {
                Some(van) => Ok(report::render_seat_map(van, &views::seat_map(&snapshot, van))),
                None => {
                    tracing::warn!("🔍 No van found with id {}", van_id);
                    Ok(format!("No van found with id '{}'", van_id))
                }
            },
            Command::Map { van, route } => {
                let van = van.as_deref().map(VanId::from);
                let route = route.as_deref().map(RouteId::from);
                let payload = views::map_payload(
                    &snapshot.vans,
                    &snapshot.routes,
                    van.as_ref(),
                    route.as_ref(),
                );
                report::to_json(&payload)
            }
            Command::Snapshot { format, table } => render_snapshot(&snapshot, *format, *table),
            Command::Apply {
                commands,
                no_validate,
                format,
                table,
            } => {
                tracing::info!("📁 Loading commands from: {}", commands.display());
                let content = std::fs::read_to_string(commands)?;
                let parsed = parse_commands(&content)?;
                let count = parsed.len();

                let outcomes = apply_commands(&mut self.store, parsed, !no_validate)?;
                tracing::info!("✅ Applied {} commands (revision {})", count, self.store.revision());

                let snapshot = self.store.snapshot();
                match format {
                    OutputFormat::Json => report::to_json(&AppliedReport {
                        outcomes: &outcomes,
                        fleet: &*snapshot,
                    }),
                    OutputFormat::Csv => report::snapshot_csv(&snapshot, *table),
                }
            }
        }
    }
}

fn render_snapshot(snapshot: &crate::core::FleetSnapshot, format: OutputFormat, table: Table) -> Result<String> {
    match format {
        OutputFormat::Json => report::to_json(snapshot),
        OutputFormat::Csv => report::snapshot_csv(snapshot, table),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::SequentialIdGenerator;
    use crate::config::seed::sample_fleet;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn runner() -> FleetRunner {
        FleetRunner::new(sample_fleet().into_store(SequentialIdGenerator::new()), "Test Fleet")
    }

    #[test]
    fn test_summary_matches_sample_fleet() {
        let output = runner().run(&Command::Summary).unwrap();
        assert!(output.contains("Vans:   2/3 available"));
        assert!(output.contains("Routes: 3 active"));
        // (12 - 5) + (8 - 3); Luxury is unavailable
        assert!(output.contains("Seats:  12 available"));
        assert!(output.contains("Michael Brown • Seat #3 • Comfort"));
    }

    #[test]
    fn test_seats_for_unknown_van() {
        let output = runner()
            .run(&Command::Seats {
                van_id: "van-404".to_string(),
            })
            .unwrap();
        assert_eq!(output, "No van found with id 'van-404'");
    }

    #[test]
    fn test_apply_then_csv() {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(
            br#"[
                {"op": "delete_booking", "id": "booking-003"},
                {"op": "update_van", "id": "van-003", "patch": {"status": "available"}}
            ]"#,
        )
        .unwrap();

        let mut runner = runner();
        let output = runner
            .run(&Command::Apply {
                commands: file.path().to_path_buf(),
                no_validate: false,
                format: OutputFormat::Csv,
                table: Table::Vans,
            })
            .unwrap();

        assert!(output.contains("van-002,Comfort,XYZ-5678,8,2,6,available"));
        assert!(output.contains("van-003,Luxury,LUX-9999,6,0,6,available"));
        assert_eq!(runner.store().bookings().len(), 2);
    }

    #[test]
    fn test_map_payload_json() {
        let output = runner()
            .run(&Command::Map {
                van: Some("van-002".to_string()),
                route: None,
            })
            .unwrap();
        let json: serde_json::Value = serde_json::from_str(&output).unwrap();
        assert_eq!(json["vans"][1]["isSelected"], true);
        assert_eq!(json["routes"].as_array().unwrap().len(), 3);
    }
}
