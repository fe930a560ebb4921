//! Derived, read-only values computed from a [`FleetSnapshot`].
//!
//! Nothing in here writes back to the store; these are the numbers and
//! projections the dashboard, seat allocation and map screens render.

use crate::core::snapshot::FleetSnapshot;
use crate::domain::model::{Booking, Coordinates, Route, RouteId, Van, VanId, VanStatus};
use serde::Serialize;

/// Seats per row in the seat map (two either side of the aisle).
pub const SEATS_PER_ROW: usize = 4;

/// How many bookings the dashboard lists.
pub const RECENT_BOOKINGS_LIMIT: usize = 5;

/// Upper bound on the seats a seat map lays out. Capacity is not validated
/// on seeded vans or patches, so it can be arbitrarily large.
pub const MAX_SEAT_MAP_SEATS: u32 = 256;

pub const UNKNOWN_VAN_NAME: &str = "Unknown Van";

pub fn available_seats(van: &Van) -> u32 {
    van.capacity.saturating_sub(van.occupied_seats)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardStats {
    pub available_vans: usize,
    pub total_vans: usize,
    pub active_routes: usize,
    pub total_bookings: usize,
    /// Free seats summed over available vans only.
    pub available_seats: u32,
}

pub fn dashboard_stats(snapshot: &FleetSnapshot) -> DashboardStats {
    let available: Vec<&Van> = snapshot
        .vans
        .iter()
        .filter(|van| van.status == VanStatus::Available)
        .collect();

    DashboardStats {
        available_vans: available.len(),
        total_vans: snapshot.vans.len(),
        active_routes: snapshot.routes.len(),
        total_bookings: snapshot.bookings.len(),
        available_seats: available.iter().map(|van| available_seats(van)).sum(),
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RecentBooking<'a> {
    pub booking: &'a Booking,
    pub van_name: &'a str,
}

/// Newest bookings first. Bookings whose van is gone show as "Unknown Van".
pub fn recent_bookings(snapshot: &FleetSnapshot, limit: usize) -> Vec<RecentBooking<'_>> {
    let mut bookings: Vec<&Booking> = snapshot.bookings.iter().collect();
    // Stable sort: equal dates keep insertion order.
    bookings.sort_by(|a, b| b.booking_date.cmp(&a.booking_date));
    bookings
        .into_iter()
        .take(limit)
        .map(|booking| RecentBooking {
            booking,
            van_name: snapshot
                .van(&booking.van_id)
                .map(|van| van.name.as_str())
                .unwrap_or(UNKNOWN_VAN_NAME),
        })
        .collect()
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Seat<'a> {
    pub number: u32,
    pub booking: Option<&'a Booking>,
}

impl Seat<'_> {
    pub fn is_occupied(&self) -> bool {
        self.booking.is_some()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SeatMap<'a> {
    pub van_id: &'a VanId,
    pub seats: Vec<Seat<'a>>,
    /// Capacity exceeded [`MAX_SEAT_MAP_SEATS`]; only the first seats are laid out.
    pub truncated: bool,
}

impl<'a> SeatMap<'a> {
    /// Seats grouped into rows of [`SEATS_PER_ROW`]; the last row may be short.
    pub fn rows(&self) -> impl Iterator<Item = &[Seat<'a>]> + '_ {
        self.seats.chunks(SEATS_PER_ROW)
    }

    pub fn free_seats(&self) -> impl Iterator<Item = u32> + '_ {
        self.seats
            .iter()
            .filter(|seat| !seat.is_occupied())
            .map(|seat| seat.number)
    }
}

/// Seats `1..=capacity` of `van`, each with the first booking holding it,
/// up to [`MAX_SEAT_MAP_SEATS`].
///
/// Any booking present counts, cancelled ones included: a seat is only
/// released when its booking is deleted.
pub fn seat_map<'a>(snapshot: &'a FleetSnapshot, van: &'a Van) -> SeatMap<'a> {
    let bookings: Vec<&Booking> = snapshot.bookings_for_van(&van.id).collect();
    let laid_out = van.capacity.min(MAX_SEAT_MAP_SEATS);
    let seats = (1..=laid_out)
        .map(|number| Seat {
            number,
            booking: bookings
                .iter()
                .copied()
                .find(|booking| booking.seat_number == number),
        })
        .collect();

    SeatMap {
        van_id: &van.id,
        seats,
        truncated: laid_out < van.capacity,
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[cfg_attr(feature = "cli", derive(clap::ValueEnum))]
#[serde(rename_all = "lowercase")]
pub enum StatusFilter {
    #[default]
    All,
    Available,
    Unavailable,
}

impl StatusFilter {
    pub fn matches(&self, status: VanStatus) -> bool {
        match self {
            StatusFilter::All => true,
            StatusFilter::Available => status == VanStatus::Available,
            StatusFilter::Unavailable => status == VanStatus::Unavailable,
        }
    }
}

fn contains_ignore_case(haystack: &str, needle: &str) -> bool {
    haystack.to_lowercase().contains(needle)
}

/// Vans whose name or id contains `query` (case-insensitive) and whose
/// status passes `filter`.
pub fn search_vans<'a>(snapshot: &'a FleetSnapshot, query: &str, filter: StatusFilter) -> Vec<&'a Van> {
    let needle = query.to_lowercase();
    snapshot
        .vans
        .iter()
        .filter(|van| {
            contains_ignore_case(&van.name, &needle) || contains_ignore_case(van.id.as_str(), &needle)
        })
        .filter(|van| filter.matches(van.status))
        .collect()
}

pub fn search_routes<'a>(snapshot: &'a FleetSnapshot, query: &str) -> Vec<&'a Route> {
    let needle = query.to_lowercase();
    snapshot
        .routes
        .iter()
        .filter(|route| {
            contains_ignore_case(&route.name, &needle)
                || contains_ignore_case(&route.start_location, &needle)
                || contains_ignore_case(&route.end_location, &needle)
        })
        .collect()
}

/// Vans open for seat allocation.
pub fn bookable_vans(snapshot: &FleetSnapshot) -> Vec<&Van> {
    snapshot
        .vans
        .iter()
        .filter(|van| van.status == VanStatus::Available)
        .collect()
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MapVan<'a> {
    pub id: &'a VanId,
    pub name: &'a str,
    pub coordinates: Coordinates,
    pub is_selected: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MapRoute<'a> {
    pub id: &'a RouteId,
    pub name: &'a str,
    pub start_coordinates: Coordinates,
    pub end_coordinates: Coordinates,
    pub is_selected: bool,
}

/// The reduced data pushed to the map widget.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MapPayload<'a> {
    pub vans: Vec<MapVan<'a>>,
    pub routes: Vec<MapRoute<'a>>,
}

pub fn map_payload<'a>(
    vans: impl IntoIterator<Item = &'a Van>,
    routes: impl IntoIterator<Item = &'a Route>,
    selected_van: Option<&VanId>,
    selected_route: Option<&RouteId>,
) -> MapPayload<'a> {
    MapPayload {
        vans: vans
            .into_iter()
            .map(|van| MapVan {
                id: &van.id,
                name: &van.name,
                coordinates: van.coordinates,
                is_selected: selected_van == Some(&van.id),
            })
            .collect(),
        routes: routes
            .into_iter()
            .map(|route| MapRoute {
                id: &route.id,
                name: &route.name,
                start_coordinates: route.start_coordinates,
                end_coordinates: route.end_coordinates,
                is_selected: selected_route == Some(&route.id),
            })
            .collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::model::{BookingId, BookingStatus};
    use chrono::{TimeZone, Utc};

    fn van(id: &str, name: &str, capacity: u32, occupied: u32, status: VanStatus) -> Van {
        Van {
            id: VanId::new(id),
            name: name.to_string(),
            license_plate: "TST-0001".to_string(),
            capacity,
            occupied_seats: occupied,
            status,
            coordinates: Coordinates::new(37.0, -122.0),
            route: None,
        }
    }

    fn booking(id: &str, van_id: &str, seat: u32, day: u32) -> Booking {
        Booking {
            id: BookingId::new(id),
            van_id: VanId::new(van_id),
            seat_number: seat,
            passenger_name: format!("Passenger {}", id),
            passenger_contact: "p@example.com".to_string(),
            booking_date: Utc.with_ymd_and_hms(2025, 5, day, 0, 0, 0).unwrap(),
            status: BookingStatus::Confirmed,
        }
    }

    #[test]
    fn test_dashboard_counts_only_available_vans_seats() {
        let snapshot = FleetSnapshot {
            vans: vec![
                van("van-1", "Speedy", 12, 5, VanStatus::Available),
                van("van-2", "Comfort", 8, 3, VanStatus::Available),
                van("van-3", "Luxury", 6, 0, VanStatus::Unavailable),
            ],
            ..FleetSnapshot::default()
        };

        let stats = dashboard_stats(&snapshot);
        assert_eq!(stats.available_vans, 2);
        assert_eq!(stats.total_vans, 3);
        assert_eq!(stats.available_seats, 12);
    }

    #[test]
    fn test_available_seats_saturates() {
        assert_eq!(available_seats(&van("v", "v", 4, 6, VanStatus::Available)), 0);
    }

    #[test]
    fn test_recent_bookings_newest_first_with_unknown_van() {
        let snapshot = FleetSnapshot {
            vans: vec![van("van-1", "Speedy", 12, 0, VanStatus::Available)],
            bookings: vec![
                booking("b1", "van-1", 1, 1),
                booking("b2", "van-gone", 2, 3),
                booking("b3", "van-1", 3, 2),
            ],
            ..FleetSnapshot::default()
        };

        let recent = recent_bookings(&snapshot, 2);
        assert_eq!(recent.len(), 2);
        assert_eq!(recent[0].booking.id.as_str(), "b2");
        assert_eq!(recent[0].van_name, UNKNOWN_VAN_NAME);
        assert_eq!(recent[1].booking.id.as_str(), "b3");
        assert_eq!(recent[1].van_name, "Speedy");
    }

    #[test]
    fn test_seat_map_rows_and_occupancy() {
        let speedy = van("van-1", "Speedy", 6, 0, VanStatus::Available);
        let mut cancelled = booking("b2", "van-1", 5, 1);
        cancelled.status = BookingStatus::Cancelled;
        let snapshot = FleetSnapshot {
            vans: vec![speedy.clone()],
            bookings: vec![booking("b1", "van-1", 2, 1), cancelled, booking("b3", "van-9", 3, 1)],
            ..FleetSnapshot::default()
        };

        let map = seat_map(&snapshot, &speedy);
        let rows: Vec<usize> = map.rows().map(|row| row.len()).collect();
        assert_eq!(rows, vec![4, 2]);
        assert_eq!(map.free_seats().collect::<Vec<_>>(), vec![1, 3, 4, 6]);
    }

    #[test]
    fn test_seat_map_caps_huge_capacity() {
        let bus = van("van-1", "Bus", u32::MAX, 0, VanStatus::Available);
        let snapshot = FleetSnapshot {
            vans: vec![bus.clone()],
            bookings: vec![booking("b1", "van-1", 3, 1)],
            ..FleetSnapshot::default()
        };

        let map = seat_map(&snapshot, &bus);
        assert_eq!(map.seats.len(), MAX_SEAT_MAP_SEATS as usize);
        assert!(map.truncated);
        assert!(map.seats[2].is_occupied());

        let small = van("van-2", "Mini", 4, 0, VanStatus::Available);
        assert!(!seat_map(&snapshot, &small).truncated);
    }

    #[test]
    fn test_search_vans_by_name_or_id_and_status() {
        let snapshot = FleetSnapshot {
            vans: vec![
                van("van-001", "Speedy", 12, 0, VanStatus::Available),
                van("van-002", "Comfort", 8, 0, VanStatus::Available),
                van("van-003", "Luxury", 6, 0, VanStatus::Unavailable),
            ],
            ..FleetSnapshot::default()
        };

        let names = |vans: Vec<&Van>| vans.into_iter().map(|v| v.name.clone()).collect::<Vec<_>>();
        assert_eq!(names(search_vans(&snapshot, "SPEED", StatusFilter::All)), vec!["Speedy"]);
        assert_eq!(names(search_vans(&snapshot, "003", StatusFilter::All)), vec!["Luxury"]);
        assert_eq!(names(search_vans(&snapshot, "", StatusFilter::Unavailable)), vec!["Luxury"]);
        assert!(search_vans(&snapshot, "luxury", StatusFilter::Available).is_empty());
    }

    #[test]
    fn test_map_payload_marks_selection() {
        let vans = vec![
            van("van-1", "Speedy", 12, 0, VanStatus::Available),
            van("van-2", "Comfort", 8, 0, VanStatus::Available),
        ];
        let routes: Vec<Route> = Vec::new();
        let selected = VanId::new("van-2");

        let payload = map_payload(&vans, &routes, Some(&selected), None);
        assert!(!payload.vans[0].is_selected);
        assert!(payload.vans[1].is_selected);

        let json = serde_json::to_value(&payload).unwrap();
        assert_eq!(json["vans"][1]["isSelected"], true);
        assert_eq!(json["vans"][1]["coordinates"]["latitude"], 37.0);
    }
}
