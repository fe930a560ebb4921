use crate::core::store::FleetStore;
use crate::domain::model::{
    Booking, BookingId, BookingStatus, Coordinates, Route, RouteId, Van, VanId, VanStatus,
};
use crate::domain::ports::IdGenerator;
use chrono::{DateTime, TimeZone, Utc};
use serde::{Deserialize, Serialize};

/// Entities a store starts out with, ids included.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FleetSeed {
    #[serde(default)]
    pub vans: Vec<Van>,
    #[serde(default)]
    pub routes: Vec<Route>,
    #[serde(default)]
    pub bookings: Vec<Booking>,
}

impl FleetSeed {
    pub fn is_empty(&self) -> bool {
        self.vans.is_empty() && self.routes.is_empty() && self.bookings.is_empty()
    }

    pub fn into_store(self, ids: impl IdGenerator + 'static) -> FleetStore {
        FleetStore::seeded(ids, self.vans, self.routes, self.bookings)
    }
}

fn downtown_express() -> Route {
    Route {
        id: RouteId::new("route-001"),
        name: "Downtown Express".to_string(),
        start_location: "City Center".to_string(),
        end_location: "Airport Terminal".to_string(),
        estimated_time: 45,
        start_coordinates: Coordinates::new(37.7749, -122.4194),
        end_coordinates: Coordinates::new(37.6213, -122.3790),
    }
}

fn beach_route() -> Route {
    Route {
        id: RouteId::new("route-002"),
        name: "Beach Route".to_string(),
        start_location: "Transit Center".to_string(),
        end_location: "Ocean Beach".to_string(),
        estimated_time: 30,
        start_coordinates: Coordinates::new(37.7833, -122.4167),
        end_coordinates: Coordinates::new(37.7691, -122.4830),
    }
}

fn mountain_view() -> Route {
    Route {
        id: RouteId::new("route-003"),
        name: "Mountain View".to_string(),
        start_location: "Downtown".to_string(),
        end_location: "Mountain Lodge".to_string(),
        estimated_time: 60,
        start_coordinates: Coordinates::new(37.7749, -122.4194),
        end_coordinates: Coordinates::new(37.3861, -122.0839),
    }
}

fn may_2025(day: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2025, 5, day, 0, 0, 0)
        .single()
        .unwrap_or_default()
}

fn booking(id: &str, van_id: &str, seat: u32, name: &str, contact: &str, day: u32, status: BookingStatus) -> Booking {
    Booking {
        id: BookingId::new(id),
        van_id: VanId::new(van_id),
        seat_number: seat,
        passenger_name: name.to_string(),
        passenger_contact: contact.to_string(),
        booking_date: may_2025(day),
        status,
    }
}

/// The demo fleet the app ships with: three vans around San Francisco,
/// three routes and three bookings.
///
/// Occupancy figures are the published ones and do not match the booking
/// count; the store keeps them as given.
pub fn sample_fleet() -> FleetSeed {
    let vans = vec![
        Van {
            id: VanId::new("van-001"),
            name: "Speedy".to_string(),
            license_plate: "ABC-1234".to_string(),
            capacity: 12,
            occupied_seats: 5,
            status: VanStatus::Available,
            coordinates: Coordinates::new(37.7749, -122.4194),
            route: Some(downtown_express()),
        },
        Van {
            id: VanId::new("van-002"),
            name: "Comfort".to_string(),
            license_plate: "XYZ-5678".to_string(),
            capacity: 8,
            occupied_seats: 3,
            status: VanStatus::Available,
            coordinates: Coordinates::new(37.7833, -122.4167),
            route: Some(beach_route()),
        },
        Van {
            id: VanId::new("van-003"),
            name: "Luxury".to_string(),
            license_plate: "LUX-9999".to_string(),
            capacity: 6,
            occupied_seats: 0,
            status: VanStatus::Unavailable,
            coordinates: Coordinates::new(37.7935, -122.3964),
            route: None,
        },
    ];

    let bookings = vec![
        booking("booking-001", "van-001", 1, "John Smith", "john@example.com", 1, BookingStatus::Confirmed),
        booking("booking-002", "van-001", 2, "Sarah Johnson", "sarah@example.com", 1, BookingStatus::Confirmed),
        booking("booking-003", "van-002", 3, "Michael Brown", "michael@example.com", 2, BookingStatus::Pending),
    ];

    FleetSeed {
        vans,
        routes: vec![downtown_express(), beach_route(), mountain_view()],
        bookings,
    }
}
