use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

macro_rules! entity_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(String);

        impl $name {
            pub fn new(id: impl Into<String>) -> Self {
                Self(id.into())
            }

            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.pad(&self.0)
            }
        }

        impl From<&str> for $name {
            fn from(id: &str) -> Self {
                Self(id.to_string())
            }
        }

        impl From<String> for $name {
            fn from(id: String) -> Self {
                Self(id)
            }
        }
    };
}

entity_id!(
    /// Identity of a [`Van`].
    VanId
);
entity_id!(
    /// Identity of a [`Route`].
    RouteId
);
entity_id!(
    /// Identity of a [`Booking`]. Bookings only hold a [`VanId`], never the van itself.
    BookingId
);

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    pub latitude: f64,
    pub longitude: f64,
}

impl Coordinates {
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Route {
    pub id: RouteId,
    pub name: String,
    pub start_location: String,
    pub end_location: String,
    /// Minutes.
    pub estimated_time: u32,
    pub start_coordinates: Coordinates,
    pub end_coordinates: Coordinates,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VanStatus {
    #[default]
    Available,
    Unavailable,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Van {
    pub id: VanId,
    pub name: String,
    pub license_plate: String,
    pub capacity: u32,
    pub occupied_seats: u32,
    pub status: VanStatus,
    pub coordinates: Coordinates,
    /// Copy of the route taken when it was assigned. Later edits to the
    /// route entity are not reflected here.
    pub route: Option<Route>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BookingStatus {
    #[default]
    Pending,
    Confirmed,
    Cancelled,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Booking {
    pub id: BookingId,
    pub van_id: VanId,
    pub seat_number: u32,
    pub passenger_name: String,
    pub passenger_contact: String,
    pub booking_date: DateTime<Utc>,
    pub status: BookingStatus,
}

// Drafts: everything but the id, which the store assigns.

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VanDraft {
    pub name: String,
    pub license_plate: String,
    pub capacity: u32,
    #[serde(default)]
    pub occupied_seats: u32,
    #[serde(default)]
    pub status: VanStatus,
    pub coordinates: Coordinates,
    #[serde(default)]
    pub route: Option<Route>,
}

impl VanDraft {
    /// An empty, available van with no route.
    pub fn new(
        name: impl Into<String>,
        license_plate: impl Into<String>,
        capacity: u32,
        coordinates: Coordinates,
    ) -> Self {
        Self {
            name: name.into(),
            license_plate: license_plate.into(),
            capacity,
            occupied_seats: 0,
            status: VanStatus::Available,
            coordinates,
            route: None,
        }
    }

    pub(crate) fn into_van(self, id: VanId) -> Van {
        Van {
            id,
            name: self.name,
            license_plate: self.license_plate,
            capacity: self.capacity,
            occupied_seats: self.occupied_seats,
            status: self.status,
            coordinates: self.coordinates,
            route: self.route,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RouteDraft {
    pub name: String,
    pub start_location: String,
    pub end_location: String,
    pub estimated_time: u32,
    pub start_coordinates: Coordinates,
    pub end_coordinates: Coordinates,
}

impl RouteDraft {
    pub(crate) fn into_route(self, id: RouteId) -> Route {
        Route {
            id,
            name: self.name,
            start_location: self.start_location,
            end_location: self.end_location,
            estimated_time: self.estimated_time,
            start_coordinates: self.start_coordinates,
            end_coordinates: self.end_coordinates,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BookingDraft {
    pub van_id: VanId,
    pub seat_number: u32,
    pub passenger_name: String,
    pub passenger_contact: String,
    #[serde(default = "Utc::now")]
    pub booking_date: DateTime<Utc>,
    #[serde(default)]
    pub status: BookingStatus,
}

impl BookingDraft {
    /// A pending booking dated now.
    pub fn new(
        van_id: impl Into<VanId>,
        seat_number: u32,
        passenger_name: impl Into<String>,
        passenger_contact: impl Into<String>,
    ) -> Self {
        Self {
            van_id: van_id.into(),
            seat_number,
            passenger_name: passenger_name.into(),
            passenger_contact: passenger_contact.into(),
            booking_date: Utc::now(),
            status: BookingStatus::Pending,
        }
    }

    pub(crate) fn into_booking(self, id: BookingId) -> Booking {
        Booking {
            id,
            van_id: self.van_id,
            seat_number: self.seat_number,
            passenger_name: self.passenger_name,
            passenger_contact: self.passenger_contact,
            booking_date: self.booking_date,
            status: self.status,
        }
    }
}

// Patches: partial-field merges. `None` leaves the field untouched; ids are
// not patchable.

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct VanPatch {
    pub name: Option<String>,
    pub license_plate: Option<String>,
    pub capacity: Option<u32>,
    pub occupied_seats: Option<u32>,
    pub status: Option<VanStatus>,
    pub coordinates: Option<Coordinates>,
    /// `Some(None)` clears the route.
    #[serde(with = "double_option", skip_serializing_if = "Option::is_none")]
    pub route: Option<Option<Route>>,
}

impl VanPatch {
    pub fn status(status: VanStatus) -> Self {
        Self {
            status: Some(status),
            ..Self::default()
        }
    }

    pub fn apply(self, van: &mut Van) {
        if let Some(name) = self.name {
            van.name = name;
        }
        if let Some(license_plate) = self.license_plate {
            van.license_plate = license_plate;
        }
        if let Some(capacity) = self.capacity {
            van.capacity = capacity;
        }
        if let Some(occupied_seats) = self.occupied_seats {
            van.occupied_seats = occupied_seats;
        }
        if let Some(status) = self.status {
            van.status = status;
        }
        if let Some(coordinates) = self.coordinates {
            van.coordinates = coordinates;
        }
        if let Some(route) = self.route {
            van.route = route;
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RoutePatch {
    pub name: Option<String>,
    pub start_location: Option<String>,
    pub end_location: Option<String>,
    pub estimated_time: Option<u32>,
    pub start_coordinates: Option<Coordinates>,
    pub end_coordinates: Option<Coordinates>,
}

impl RoutePatch {
    pub fn name(name: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            ..Self::default()
        }
    }

    pub fn apply(self, route: &mut Route) {
        if let Some(name) = self.name {
            route.name = name;
        }
        if let Some(start_location) = self.start_location {
            route.start_location = start_location;
        }
        if let Some(end_location) = self.end_location {
            route.end_location = end_location;
        }
        if let Some(estimated_time) = self.estimated_time {
            route.estimated_time = estimated_time;
        }
        if let Some(start_coordinates) = self.start_coordinates {
            route.start_coordinates = start_coordinates;
        }
        if let Some(end_coordinates) = self.end_coordinates {
            route.end_coordinates = end_coordinates;
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct BookingPatch {
    pub van_id: Option<VanId>,
    pub seat_number: Option<u32>,
    pub passenger_name: Option<String>,
    pub passenger_contact: Option<String>,
    pub booking_date: Option<DateTime<Utc>>,
    pub status: Option<BookingStatus>,
}

impl BookingPatch {
    pub fn status(status: BookingStatus) -> Self {
        Self {
            status: Some(status),
            ..Self::default()
        }
    }

    pub fn apply(self, booking: &mut Booking) {
        if let Some(van_id) = self.van_id {
            booking.van_id = van_id;
        }
        if let Some(seat_number) = self.seat_number {
            booking.seat_number = seat_number;
        }
        if let Some(passenger_name) = self.passenger_name {
            booking.passenger_name = passenger_name;
        }
        if let Some(passenger_contact) = self.passenger_contact {
            booking.passenger_contact = passenger_contact;
        }
        if let Some(booking_date) = self.booking_date {
            booking.booking_date = booking_date;
        }
        if let Some(status) = self.status {
            booking.status = status;
        }
    }
}

/// Distinguishes an absent `route` key from an explicit `"route": null`.
mod double_option {
    use serde::{Deserialize, Deserializer, Serialize, Serializer};

    pub fn serialize<T, S>(value: &Option<Option<T>>, serializer: S) -> Result<S::Ok, S::Error>
    where
        T: Serialize,
        S: Serializer,
    {
        match value {
            Some(inner) => inner.serialize(serializer),
            None => serializer.serialize_none(),
        }
    }

    pub fn deserialize<'de, T, D>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
    where
        T: Deserialize<'de>,
        D: Deserializer<'de>,
    {
        Option::<T>::deserialize(deserializer).map(Some)
    }
}
