pub mod collection;
pub mod commands;
pub mod snapshot;
pub mod store;
pub mod views;

pub use crate::domain::model::{Booking, Coordinates, Route, Van};
pub use crate::domain::ports::{EntityKind, IdGenerator};
pub use crate::utils::error::Result;
pub use snapshot::FleetSnapshot;
pub use store::FleetStore;
