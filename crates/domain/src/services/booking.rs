//! Reservation and availability request validation.
//!
//! Everything here is pure: it runs before any storage access, so a request
//! rejected here never reaches the database.

use chrono::NaiveDate;
use thiserror::Error;
use validator::ValidationError;

use shared::validation::{
    error_message, is_blank_or_null, parse_integer, parse_iso_date, required_field,
};

use crate::models::reservation::{
    require_numeric, CreateReservationRequest, NumericField, ReservationDraft, StayRange,
};

/// Reasons a booking or availability request is rejected before storage.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BookingError {
    /// A field is missing or malformed.
    #[error("{0}")]
    InvalidField(String),

    #[error("cantidad_personas must be greater than 0.")]
    NonPositivePartySize,

    #[error("Invalid date range: check-out must be after check-in.")]
    InvalidDateRange,

    #[error("Check-in date cannot be in the past.")]
    CheckInInPast,
}

impl From<ValidationError> for BookingError {
    fn from(err: ValidationError) -> Self {
        BookingError::InvalidField(error_message(&err))
    }
}

/// A validated availability search.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AvailabilitySearch {
    pub stay: StayRange,
    pub hotel_id: Option<i64>,
}

/// Validates the query of an availability search.
pub fn validate_availability(
    entrada: Option<&str>,
    salida: Option<&str>,
    hotel_id: Option<&str>,
) -> Result<AvailabilitySearch, BookingError> {
    let check_in = parse_iso_date(entrada, "entrada")?;
    let check_out = parse_iso_date(salida, "salida")?;
    let stay = StayRange::new(check_in, check_out).ok_or(BookingError::InvalidDateRange)?;

    let hotel_id = if is_blank_or_null(hotel_id) {
        None
    } else {
        Some(parse_integer(hotel_id, "hotel_id")?)
    };

    Ok(AvailabilitySearch { stay, hotel_id })
}

/// Validates a reservation request against `today`.
///
/// Checks run in a fixed order and the first failure wins: field presence,
/// numeric parsing, positive party size, date parsing, date order, and
/// finally that check-in is not in the past.
pub fn validate_reservation(
    request: &CreateReservationRequest,
    today: NaiveDate,
) -> Result<ReservationDraft, BookingError> {
    require_present(request)?;

    let habitacion_id = require_numeric(request.habitacion_id.as_ref(), "habitacion_id")?;
    let cantidad_personas =
        require_numeric(request.cantidad_personas.as_ref(), "cantidad_personas")?;
    if cantidad_personas <= 0 {
        return Err(BookingError::NonPositivePartySize);
    }
    let cantidad_personas = i32::try_from(cantidad_personas).map_err(|_| {
        BookingError::InvalidField("The field 'cantidad_personas' is out of range.".to_string())
    })?;

    let check_in = parse_iso_date(request.fecha_entrada.as_deref(), "fecha_entrada")?;
    let check_out = parse_iso_date(request.fecha_salida.as_deref(), "fecha_salida")?;
    let stay = StayRange::new(check_in, check_out).ok_or(BookingError::InvalidDateRange)?;

    if stay.check_in() < today {
        return Err(BookingError::CheckInInPast);
    }

    Ok(ReservationDraft {
        habitacion_id,
        cantidad_personas,
        stay,
    })
}

fn require_present(request: &CreateReservationRequest) -> Result<(), BookingError> {
    let numeric_missing = |v: &Option<NumericField>| v.as_ref().map_or(true, NumericField::is_blank);
    let text_missing = |v: &Option<String>| v.as_deref().map_or(true, |s| s.trim().is_empty());

    let missing = [
        ("habitacion_id", numeric_missing(&request.habitacion_id)),
        ("fecha_entrada", text_missing(&request.fecha_entrada)),
        ("fecha_salida", text_missing(&request.fecha_salida)),
        ("cantidad_personas", numeric_missing(&request.cantidad_personas)),
    ]
    .into_iter()
    .find(|(_, missing)| *missing);

    match missing {
        Some((field, _)) => Err(required_field(field).into()),
        None => Ok(()),
    }
}
