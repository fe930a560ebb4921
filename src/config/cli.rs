use crate::app::report::{OutputFormat, Table};
use crate::core::views::StatusFilter;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Debug, Clone, Parser)]
#[command(name = "van-fleet")]
#[command(about = "Inspect and edit an in-memory van fleet: vans, routes and seat bookings")]
pub struct CliConfig {
    /// Path to TOML fleet configuration (defaults to the sample fleet)
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Clone, Subcommand)]
pub enum Command {
    /// Dashboard: van availability, routes, free seats and recent bookings
    Summary,

    /// List vans, optionally filtered
    Vans {
        #[arg(short, long, default_value = "")]
        search: String,

        #[arg(long, value_enum, default_value_t = StatusFilter::All)]
        status: StatusFilter,
    },

    /// List routes, optionally filtered by name or location
    Routes {
        #[arg(short, long, default_value = "")]
        search: String,
    },

    /// Seat map of one van
    Seats { van_id: String },

    /// Map widget payload as JSON
    Map {
        #[arg(long)]
        van: Option<String>,

        #[arg(long)]
        route: Option<String>,
    },

    /// Print the whole fleet
    Snapshot {
        #[arg(long, value_enum, default_value_t = OutputFormat::Json)]
        format: OutputFormat,

        /// Table to print when --format csv
        #[arg(long, value_enum, default_value_t = Table::Vans)]
        table: Table,
    },

    /// Apply a JSON list of commands to the seeded fleet, then print it
    Apply {
        commands: PathBuf,

        /// Skip the form-level checks and hand commands straight to the store
        #[arg(long)]
        no_validate: bool,

        #[arg(long, value_enum, default_value_t = OutputFormat::Json)]
        format: OutputFormat,

        #[arg(long, value_enum, default_value_t = Table::Vans)]
        table: Table,
    },
}
