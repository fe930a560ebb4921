pub mod adapters;
pub mod app;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use crate::app::FleetRunner;
#[cfg(feature = "cli")]
pub use crate::config::CliConfig;

pub use crate::adapters::{SequentialIdGenerator, UuidIdGenerator};
pub use crate::config::{sample_fleet, FleetConfig, FleetSeed};
pub use crate::core::{FleetSnapshot, FleetStore};
pub use crate::domain::model::{
    Booking, BookingDraft, BookingId, BookingPatch, BookingStatus, Coordinates, Route, RouteDraft,
    RouteId, RoutePatch, Van, VanDraft, VanId, VanPatch, VanStatus,
};
pub use crate::utils::error::{FleetError, Result};
