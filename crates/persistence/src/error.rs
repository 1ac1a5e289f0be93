//! Storage error classification.
//!
//! Database failures are mapped onto a small set of business outcomes using
//! the SQLSTATE code and constraint name reported by PostgreSQL. Error
//! message text is never inspected.

use thiserror::Error;

/// SQLSTATE codes the booking schema raises.
pub mod sqlstate {
    pub const UNIQUE_VIOLATION: &str = "23505";
    pub const EXCLUSION_VIOLATION: &str = "23P01";
}

/// Constraint names declared in the migrations.
pub mod constraints {
    pub const NO_OVERLAP_PER_ROOM: &str = "no_overlap_por_habitacion";
    pub const CAPACITY_EXCEEDED: &str = "reserva_capacidad_excedida";
    pub const VALID_DATE_RANGE: &str = "reserva_rango_fechas_valido";
    pub const CHECK_IN_IN_PAST: &str = "reserva_entrada_pasada";
    pub const CLIENT_USER_ID_KEY: &str = "cliente_user_id_key";
    pub const USERS_EMAIL_KEY: &str = "users_email_key";
}

/// A database integrity rule that rejected a write.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConstraintViolation {
    /// The room already has a reservation sharing at least one night.
    RoomOverlap,
    /// More guests than the room holds.
    CapacityExceeded,
    /// Check-out not after check-in.
    InvalidDateRange,
    /// Check-in before the current date.
    CheckInInPast,
    /// Any other unique, foreign key or check failure.
    Other {
        code: String,
        constraint: Option<String>,
    },
}

impl ConstraintViolation {
    /// Classifies an integrity failure.
    ///
    /// Returns `None` when `code` is not an integrity constraint violation
    /// (SQLSTATE class 23).
    pub fn classify(code: Option<&str>, constraint: Option<&str>) -> Option<Self> {
        let code = code?;
        if !code.starts_with("23") {
            return None;
        }

        let violation = match (code, constraint) {
            (sqlstate::EXCLUSION_VIOLATION, _) | (_, Some(constraints::NO_OVERLAP_PER_ROOM)) => {
                ConstraintViolation::RoomOverlap
            }
            (_, Some(constraints::CAPACITY_EXCEEDED)) => ConstraintViolation::CapacityExceeded,
            (_, Some(constraints::VALID_DATE_RANGE)) => ConstraintViolation::InvalidDateRange,
            (_, Some(constraints::CHECK_IN_IN_PAST)) => ConstraintViolation::CheckInInPast,
            (code, constraint) => ConstraintViolation::Other {
                code: code.to_string(),
                constraint: constraint.map(str::to_string),
            },
        };
        Some(violation)
    }

    /// True for a unique-key violation on the named index.
    pub fn is_unique_on(&self, index: &str) -> bool {
        matches!(
            self,
            ConstraintViolation::Other { code, constraint: Some(name) }
                if code == sqlstate::UNIQUE_VIOLATION && name == index
        )
    }
}

/// Errors returned by repositories.
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("constraint violation: {0:?}")]
    Constraint(ConstraintViolation),

    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),
}

impl StorageError {
    /// Wraps a sqlx error, classifying integrity failures.
    pub fn classify(err: sqlx::Error) -> Self {
        match constraint_violation(&err) {
            Some(violation) => StorageError::Constraint(violation),
            None => StorageError::Database(err),
        }
    }

    pub fn violation(&self) -> Option<&ConstraintViolation> {
        match self {
            StorageError::Constraint(violation) => Some(violation),
            StorageError::Database(_) => None,
        }
    }
}

/// Extracts the constraint violation carried by a sqlx error, if any.
pub fn constraint_violation(err: &sqlx::Error) -> Option<ConstraintViolation> {
    let db_err = err.as_database_error()?;
    ConstraintViolation::classify(db_err.code().as_deref(), db_err.constraint())
}
