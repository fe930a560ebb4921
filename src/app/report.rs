use crate::core::snapshot::FleetSnapshot;
use crate::core::views::{self, DashboardStats, RecentBooking, SeatMap};
use crate::domain::model::{BookingStatus, Route, Van, VanStatus};
use crate::utils::error::{FleetError, Result};
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "cli", derive(clap::ValueEnum))]
pub enum OutputFormat {
    #[default]
    Json,
    Csv,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "cli", derive(clap::ValueEnum))]
pub enum Table {
    #[default]
    Vans,
    Routes,
    Bookings,
}

fn status_label(status: VanStatus) -> &'static str {
    match status {
        VanStatus::Available => "available",
        VanStatus::Unavailable => "unavailable",
    }
}

fn booking_label(status: BookingStatus) -> &'static str {
    match status {
        BookingStatus::Pending => "pending",
        BookingStatus::Confirmed => "confirmed",
        BookingStatus::Cancelled => "cancelled",
    }
}

fn route_line(van: &Van) -> String {
    match &van.route {
        Some(route) => format!("{} → {}", route.start_location, route.end_location),
        None => "No route assigned".to_string(),
    }
}

pub fn render_summary(fleet_name: &str, stats: &DashboardStats, recent: &[RecentBooking<'_>]) -> String {
    let mut lines = vec![
        format!("📋 {}", fleet_name),
        format!("  Vans:   {}/{} available", stats.available_vans, stats.total_vans),
        format!("  Routes: {} active", stats.active_routes),
        format!("  Seats:  {} available", stats.available_seats),
        format!("  Bookings: {}", stats.total_bookings),
        String::new(),
        "Recent Bookings".to_string(),
    ];

    if recent.is_empty() {
        lines.push("  No recent bookings".to_string());
    }
    for entry in recent {
        lines.push(format!(
            "  {} • Seat #{} • {} • {} ({})",
            entry.booking.passenger_name,
            entry.booking.seat_number,
            entry.van_name,
            entry.booking.booking_date.format("%Y-%m-%d %H:%M"),
            booking_label(entry.booking.status)
        ));
    }
    lines.join("\n")
}

pub fn render_vans(vans: &[&Van], filtered: bool) -> String {
    if vans.is_empty() {
        return if filtered {
            "No vans found. Try adjusting your filters".to_string()
        } else {
            "No vans found. Add a van to get started".to_string()
        };
    }

    vans.iter()
        .map(|van| {
            format!(
                "{:<12} {:<10} {:<10} {:>2}/{:<2} seats free  {:<11}  {}",
                van.id,
                van.name,
                van.license_plate,
                views::available_seats(van),
                van.capacity,
                status_label(van.status),
                route_line(van)
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}

pub fn render_routes(routes: &[&Route]) -> String {
    if routes.is_empty() {
        return "No routes found".to_string();
    }

    routes
        .iter()
        .map(|route| {
            format!(
                "{:<12} {:<18} {} → {} ({} min)",
                route.id, route.name, route.start_location, route.end_location, route.estimated_time
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Text seat map: two seats, the aisle, two seats; `XX` marks a held seat.
pub fn render_seat_map(van: &Van, seat_map: &SeatMap<'_>) -> String {
    let mut lines = vec![
        format!("{} ({})", van.name, route_line(van)),
        format!(
            "{} seats available of {}",
            views::available_seats(van),
            van.capacity
        ),
        "  [Driver]".to_string(),
    ];

    for row in seat_map.rows() {
        let cells: Vec<String> = row
            .iter()
            .map(|seat| {
                if seat.is_occupied() {
                    "[XX]".to_string()
                } else {
                    format!("[{:>2}]", seat.number)
                }
            })
            .collect();
        let (left, right) = cells.split_at(cells.len().min(2));
        lines.push(format!("  {}   {}", left.join(" "), right.join(" ")).trim_end().to_string());
    }
    if seat_map.truncated {
        lines.push(format!("  ... first {} of {} seats shown", seat_map.seats.len(), van.capacity));
    }
    lines.join("\n")
}

pub fn to_json<T: Serialize + ?Sized>(value: &T) -> Result<String> {
    Ok(serde_json::to_string_pretty(value)?)
}

#[derive(Debug, Serialize)]
struct VanRow<'a> {
    id: &'a str,
    name: &'a str,
    license_plate: &'a str,
    capacity: u32,
    occupied_seats: u32,
    available_seats: u32,
    status: &'static str,
    route_id: &'a str,
    route_name: &'a str,
    latitude: f64,
    longitude: f64,
}

#[derive(Debug, Serialize)]
struct RouteRow<'a> {
    id: &'a str,
    name: &'a str,
    start_location: &'a str,
    end_location: &'a str,
    estimated_time: u32,
}

#[derive(Debug, Serialize)]
struct BookingRow<'a> {
    id: &'a str,
    van_id: &'a str,
    seat_number: u32,
    passenger_name: &'a str,
    passenger_contact: &'a str,
    booking_date: String,
    status: &'static str,
}

/// One collection of the snapshot as CSV with a header row.
pub fn snapshot_csv(snapshot: &FleetSnapshot, table: Table) -> Result<String> {
    let mut writer = csv::Writer::from_writer(Vec::new());

    match table {
        Table::Vans => {
            for van in &snapshot.vans {
                writer.serialize(VanRow {
                    id: van.id.as_str(),
                    name: &van.name,
                    license_plate: &van.license_plate,
                    capacity: van.capacity,
                    occupied_seats: van.occupied_seats,
                    available_seats: views::available_seats(van),
                    status: status_label(van.status),
                    route_id: van.route.as_ref().map(|r| r.id.as_str()).unwrap_or(""),
                    route_name: van.route.as_ref().map(|r| r.name.as_str()).unwrap_or(""),
                    latitude: van.coordinates.latitude,
                    longitude: van.coordinates.longitude,
                })?;
            }
        }
        Table::Routes => {
            for route in &snapshot.routes {
                writer.serialize(RouteRow {
                    id: route.id.as_str(),
                    name: &route.name,
                    start_location: &route.start_location,
                    end_location: &route.end_location,
                    estimated_time: route.estimated_time,
                })?;
            }
        }
        Table::Bookings => {
            for booking in &snapshot.bookings {
                writer.serialize(BookingRow {
                    id: booking.id.as_str(),
                    van_id: booking.van_id.as_str(),
                    seat_number: booking.seat_number,
                    passenger_name: &booking.passenger_name,
                    passenger_contact: &booking.passenger_contact,
                    booking_date: booking.booking_date.to_rfc3339(),
                    status: booking_label(booking.status),
                })?;
            }
        }
    }

    let bytes = writer.into_inner().map_err(|e| FleetError::IoError(e.into_error()))?;
    String::from_utf8(bytes).map_err(|e| FleetError::ConfigError {
        message: format!("CSV output is not UTF-8: {}", e),
    })
}
