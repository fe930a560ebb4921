//! Caller-side checks. The fleet store accepts whatever it is given; forms
//! and the CLI run these before handing a draft or patch to it.

use crate::core::snapshot::FleetSnapshot;
use crate::domain::model::{BookingDraft, RouteDraft, RoutePatch, VanDraft, VanPatch};
use crate::utils::error::{FleetError, Result};

pub trait Validate {
    fn validate(&self) -> Result<()>;
}

pub fn validate_non_empty_string(field_name: &str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(FleetError::validation(
            field_name,
            "Value cannot be empty or whitespace-only",
        ));
    }
    Ok(())
}

pub fn validate_positive_number(field_name: &str, value: u32) -> Result<()> {
    if value == 0 {
        return Err(FleetError::validation(field_name, "Value must be greater than 0"));
    }
    Ok(())
}

pub fn validate_range<T: PartialOrd + std::fmt::Display + Copy>(
    field_name: &str,
    value: T,
    min: T,
    max: T,
) -> Result<()> {
    if value < min || value > max {
        return Err(FleetError::validation(
            field_name,
            format!("Value {} must be between {} and {}", value, min, max),
        ));
    }
    Ok(())
}

/// 設定檔的列舉欄位檢查
pub fn validate_one_of(field_name: &str, value: &str, allowed: &[&str]) -> Result<()> {
    if !allowed.contains(&value) {
        return Err(FleetError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: value.to_string(),
            reason: format!("Supported values: {}", allowed.join(", ")),
        });
    }
    Ok(())
}

impl Validate for VanDraft {
    fn validate(&self) -> Result<()> {
        validate_non_empty_string("name", &self.name)?;
        validate_non_empty_string("licensePlate", &self.license_plate)?;
        validate_positive_number("capacity", self.capacity)?;
        Ok(())
    }
}

impl Validate for RouteDraft {
    fn validate(&self) -> Result<()> {
        validate_non_empty_string("name", &self.name)?;
        validate_non_empty_string("startLocation", &self.start_location)?;
        validate_non_empty_string("endLocation", &self.end_location)?;
        validate_positive_number("estimatedTime", self.estimated_time)?;
        Ok(())
    }
}

impl Validate for VanPatch {
    fn validate(&self) -> Result<()> {
        if let Some(name) = &self.name {
            validate_non_empty_string("name", name)?;
        }
        if let Some(plate) = &self.license_plate {
            validate_non_empty_string("licensePlate", plate)?;
        }
        if let Some(capacity) = self.capacity {
            validate_positive_number("capacity", capacity)?;
        }
        Ok(())
    }
}

impl Validate for RoutePatch {
    fn validate(&self) -> Result<()> {
        if let Some(name) = &self.name {
            validate_non_empty_string("name", name)?;
        }
        if let Some(start) = &self.start_location {
            validate_non_empty_string("startLocation", start)?;
        }
        if let Some(end) = &self.end_location {
            validate_non_empty_string("endLocation", end)?;
        }
        if let Some(minutes) = self.estimated_time {
            validate_positive_number("estimatedTime", minutes)?;
        }
        Ok(())
    }
}

/// A booking needs a passenger, an existing van, and a seat on that van no
/// present booking holds.
pub fn validate_booking_draft(draft: &BookingDraft, snapshot: &FleetSnapshot) -> Result<()> {
    validate_non_empty_string("passengerName", &draft.passenger_name)?;

    let van = snapshot.van(&draft.van_id).ok_or_else(|| {
        FleetError::validation("vanId", format!("No van with id '{}'", draft.van_id))
    })?;
    validate_range("seatNumber", draft.seat_number, 1, van.capacity)?;

    if snapshot
        .bookings_for_van(&van.id)
        .any(|booking| booking.seat_number == draft.seat_number)
    {
        return Err(FleetError::validation(
            "seatNumber",
            format!("Seat {} on '{}' is already booked", draft.seat_number, van.name),
        ));
    }
    Ok(())
}
