use crate::core::store::FleetStore;
use crate::domain::model::{
    BookingDraft, BookingId, BookingPatch, RouteDraft, RouteId, RoutePatch, VanDraft, VanId,
    VanPatch,
};
use crate::domain::ports::EntityKind;
use crate::utils::error::{FleetError, Result};
use crate::utils::validation::{validate_booking_draft, Validate};
use serde::{Deserialize, Serialize};

/// One store mutation in serializable form, e.g.
/// `{"op": "delete_booking", "id": "booking-001"}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum FleetCommand {
    AddVan {
        van: VanDraft,
    },
    UpdateVan {
        id: VanId,
        patch: VanPatch,
    },
    DeleteVan {
        id: VanId,
    },
    AddRoute {
        route: RouteDraft,
    },
    UpdateRoute {
        id: RouteId,
        patch: RoutePatch,
    },
    DeleteRoute {
        id: RouteId,
    },
    AddBooking {
        booking: BookingDraft,
    },
    UpdateBooking {
        id: BookingId,
        patch: BookingPatch,
    },
    DeleteBooking {
        id: BookingId,
    },
    AssignRoute {
        #[serde(rename = "vanId")]
        van_id: VanId,
        #[serde(rename = "routeId", default)]
        route_id: Option<RouteId>,
    },
}

impl FleetCommand {
    pub fn op(&self) -> &'static str {
        match self {
            FleetCommand::AddVan { .. } => "add_van",
            FleetCommand::UpdateVan { .. } => "update_van",
            FleetCommand::DeleteVan { .. } => "delete_van",
            FleetCommand::AddRoute { .. } => "add_route",
            FleetCommand::UpdateRoute { .. } => "update_route",
            FleetCommand::DeleteRoute { .. } => "delete_route",
            FleetCommand::AddBooking { .. } => "add_booking",
            FleetCommand::UpdateBooking { .. } => "update_booking",
            FleetCommand::DeleteBooking { .. } => "delete_booking",
            FleetCommand::AssignRoute { .. } => "assign_route",
        }
    }

    /// The checks a form would run before submitting this command.
    pub fn validate_against(&self, store: &FleetStore) -> Result<()> {
        match self {
            FleetCommand::AddVan { van } => van.validate(),
            FleetCommand::UpdateVan { patch, .. } => patch.validate(),
            FleetCommand::AddRoute { route } => route.validate(),
            FleetCommand::UpdateRoute { patch, .. } => patch.validate(),
            FleetCommand::AddBooking { booking } => validate_booking_draft(booking, &store.snapshot()),
            _ => Ok(()),
        }
    }

    pub fn apply(self, store: &mut FleetStore) -> CommandOutcome {
        match self {
            FleetCommand::AddVan { van } => CommandOutcome::created(EntityKind::Van, store.add_van(van).to_string()),
            FleetCommand::UpdateVan { id, patch } => CommandOutcome::matched(store.update_van(&id, patch)),
            FleetCommand::DeleteVan { id } => CommandOutcome::matched(store.delete_van(&id)),
            FleetCommand::AddRoute { route } => {
                CommandOutcome::created(EntityKind::Route, store.add_route(route).to_string())
            }
            FleetCommand::UpdateRoute { id, patch } => CommandOutcome::matched(store.update_route(&id, patch)),
            FleetCommand::DeleteRoute { id } => CommandOutcome::matched(store.delete_route(&id)),
            FleetCommand::AddBooking { booking } => {
                CommandOutcome::created(EntityKind::Booking, store.add_booking(booking).to_string())
            }
            FleetCommand::UpdateBooking { id, patch } => {
                CommandOutcome::matched(store.update_booking(&id, patch))
            }
            FleetCommand::DeleteBooking { id } => CommandOutcome::matched(store.delete_booking(&id)),
            FleetCommand::AssignRoute { van_id, route_id } => {
                CommandOutcome::matched(store.assign_route_to_van(&van_id, route_id.as_ref()))
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum CommandOutcome {
    Created { kind: EntityKind, id: String },
    /// `matched: false` means the target id did not exist and nothing changed.
    Applied { matched: bool },
}

impl CommandOutcome {
    fn created(kind: EntityKind, id: String) -> Self {
        CommandOutcome::Created { kind, id }
    }

    fn matched(matched: bool) -> Self {
        CommandOutcome::Applied { matched }
    }
}

/// Applies `commands` in order. With `validate`, each command is checked
/// first and the run stops at the first rejection; commands before it stay
/// applied.
pub fn apply_commands(
    store: &mut FleetStore,
    commands: Vec<FleetCommand>,
    validate: bool,
) -> Result<Vec<CommandOutcome>> {
    let mut outcomes = Vec::with_capacity(commands.len());
    for (index, command) in commands.into_iter().enumerate() {
        if validate {
            command
                .validate_against(store)
                .map_err(|e| FleetError::CommandError {
                    index,
                    op: command.op().to_string(),
                    source: Box::new(e),
                })?;
        }
        let op = command.op();
        let outcome = command.apply(store);
        tracing::debug!(index, op, ?outcome, "applied command");
        outcomes.push(outcome);
    }
    Ok(outcomes)
}

pub fn parse_commands(json: &str) -> Result<Vec<FleetCommand>> {
    Ok(serde_json::from_str(json)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::SequentialIdGenerator;

    const SCRIPT: &str = r#"[
        {"op": "add_van", "van": {"name": "Speedy", "licensePlate": "ABC-1234", "capacity": 2,
            "coordinates": {"latitude": 37.7749, "longitude": -122.4194}}},
        {"op": "add_route", "route": {"name": "Beach Route", "startLocation": "Transit Center",
            "endLocation": "Ocean Beach", "estimatedTime": 30,
            "startCoordinates": {"latitude": 37.7833, "longitude": -122.4167},
            "endCoordinates": {"latitude": 37.7691, "longitude": -122.4830}}},
        {"op": "assign_route", "vanId": "van-001", "routeId": "route-001"},
        {"op": "add_booking", "booking": {"vanId": "van-001", "seatNumber": 1,
            "passengerName": "Ann", "passengerContact": "ann@example.com"}},
        {"op": "update_van", "id": "van-001", "patch": {"status": "unavailable"}},
        {"op": "delete_van", "id": "van-404"}
    ]"#;

    #[test]
    fn test_script_applies_in_order() {
        let mut store = FleetStore::new(SequentialIdGenerator::new());
        let outcomes = apply_commands(&mut store, parse_commands(SCRIPT).unwrap(), true).unwrap();

        assert_eq!(outcomes.len(), 6);
        assert_eq!(
            outcomes[0],
            CommandOutcome::Created {
                kind: EntityKind::Van,
                id: "van-001".to_string()
            }
        );
        assert_eq!(outcomes[5], CommandOutcome::Applied { matched: false });

        let van = store.van(&VanId::new("van-001")).unwrap();
        assert_eq!(van.occupied_seats, 1);
        assert_eq!(van.route.as_ref().unwrap().name, "Beach Route");
        assert_eq!(van.status, crate::domain::model::VanStatus::Unavailable);
    }

    #[test]
    fn test_validation_stops_at_first_rejection() {
        let mut store = FleetStore::new(SequentialIdGenerator::new());
        let script = r#"[
            {"op": "add_van", "van": {"name": "Speedy", "licensePlate": "ABC-1234", "capacity": 1,
                "coordinates": {"latitude": 0.0, "longitude": 0.0}}},
            {"op": "add_booking", "booking": {"vanId": "van-001", "seatNumber": 2,
                "passengerName": "Ann", "passengerContact": "a"}},
            {"op": "delete_van", "id": "van-001"}
        ]"#;

        let err = apply_commands(&mut store, parse_commands(script).unwrap(), true).unwrap_err();
        assert!(matches!(err, FleetError::CommandError { index: 1, .. }));
        assert_eq!(store.vans().len(), 1);
        assert!(store.bookings().is_empty());
    }

    #[test]
    fn test_without_validation_store_accepts_anything() {
        let mut store = FleetStore::new(SequentialIdGenerator::new());
        let script = r#"[
            {"op": "add_booking", "booking": {"vanId": "van-404", "seatNumber": 99,
                "passengerName": "", "passengerContact": ""}}
        ]"#;

        let outcomes = apply_commands(&mut store, parse_commands(script).unwrap(), false).unwrap();
        assert_eq!(outcomes.len(), 1);
        assert_eq!(store.bookings().len(), 1);
    }
}
