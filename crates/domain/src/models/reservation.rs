//! Reservation domain models.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use validator::ValidationError;

use shared::validation::{parse_integer, required_field};

/// A half-open stay interval `[check_in, check_out)`.
///
/// Construction guarantees `check_out > check_in`, so every stay has at
/// least one night.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StayRange {
    check_in: NaiveDate,
    check_out: NaiveDate,
}

impl StayRange {
    /// Returns `None` unless check-out is strictly after check-in.
    pub fn new(check_in: NaiveDate, check_out: NaiveDate) -> Option<Self> {
        (check_out > check_in).then_some(Self {
            check_in,
            check_out,
        })
    }

    pub fn check_in(&self) -> NaiveDate {
        self.check_in
    }

    pub fn check_out(&self) -> NaiveDate {
        self.check_out
    }

    pub fn nights(&self) -> i64 {
        (self.check_out - self.check_in).num_days()
    }
}

/// A numeric body field that clients send either as a JSON number or a string.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum NumericField {
    Integer(i64),
    Float(f64),
    Text(String),
}

impl NumericField {
    /// True for values that count as "not provided" (an empty string).
    pub fn is_blank(&self) -> bool {
        matches!(self, NumericField::Text(s) if s.trim().is_empty())
    }

    /// Parses the value as an integer, reporting errors against `field`.
    pub fn to_i64(&self, field: &str) -> Result<i64, ValidationError> {
        match self {
            NumericField::Integer(v) => Ok(*v),
            NumericField::Float(v) if v.fract() == 0.0 && v.is_finite() => Ok(*v as i64),
            NumericField::Float(_) => parse_integer(Some("not-an-integer"), field),
            NumericField::Text(s) => parse_integer(Some(s), field),
        }
    }
}

/// Parses an optional numeric field, treating absence and blanks as missing.
pub fn require_numeric(value: Option<&NumericField>, field: &str) -> Result<i64, ValidationError> {
    match value {
        Some(v) if !v.is_blank() => v.to_i64(field),
        _ => Err(required_field(field)),
    }
}

/// Request body for `POST /reservas`.
///
/// The client is always derived from the bearer token; a `cliente_id` sent
/// in the body is ignored.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct CreateReservationRequest {
    pub habitacion_id: Option<NumericField>,
    pub fecha_entrada: Option<String>,
    pub fecha_salida: Option<String>,
    pub cantidad_personas: Option<NumericField>,
}

/// A reservation request that passed every check that needs no storage.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReservationDraft {
    pub habitacion_id: i64,
    pub cantidad_personas: i32,
    pub stay: StayRange,
}

/// A persisted reservation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Reservation {
    pub reserva_id: i64,
    pub cliente_id: i64,
    pub habitacion_id: i64,
    pub fecha_entrada: NaiveDate,
    pub fecha_salida: NaiveDate,
    pub cantidad_personas: i32,
    pub creado_en: DateTime<Utc>,
}

/// Response body for a created reservation.
#[derive(Debug, Clone, Serialize)]
pub struct CreateReservationResponse {
    pub reserva_id: i64,
}

/// Computed charge breakdown for a reservation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReservationAmounts {
    pub reserva_id: i64,
    pub habitacion_id: i64,
    pub fecha_entrada: NaiveDate,
    pub fecha_salida: NaiveDate,
    pub noches: i32,
    pub precio_diario: i64,
    pub total: i64,
    /// 30% deposit required to confirm the booking.
    pub anticipo_30: i64,
}
