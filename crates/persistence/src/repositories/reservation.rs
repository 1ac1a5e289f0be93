//! Reservation repository for database operations.

use sqlx::PgPool;
use tracing::warn;

use domain::models::{Reservation, ReservationDraft};

use crate::entities::{ReservationAmountsEntity, ReservationEntity};
use crate::error::{ConstraintViolation, StorageError};
use crate::metrics::{record_constraint_violation, QueryTimer};

/// Repository for reservation operations.
#[derive(Clone)]
pub struct ReservationRepository {
    pool: PgPool,
}

impl ReservationRepository {
    /// Creates a new ReservationRepository with the given connection pool.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Inserts a reservation for `cliente_id` in its own transaction.
    ///
    /// Overlap, capacity and date rules are enforced by the database; their
    /// failures come back as [`StorageError::Constraint`].
    pub async fn create(
        &self,
        cliente_id: i64,
        draft: &ReservationDraft,
    ) -> Result<Reservation, StorageError> {
        let timer = QueryTimer::new("create_reservation");
        let result = self.insert(cliente_id, draft).await;
        timer.record();

        result.map(Reservation::from).map_err(|e| {
            let err = StorageError::classify(e);
            if let Some(violation) = err.violation() {
                record_constraint_violation(violation_kind(violation));
                warn!(
                    cliente_id,
                    habitacion_id = draft.habitacion_id,
                    ?violation,
                    "Reservation rejected by constraint"
                );
            }
            err
        })
    }

    async fn insert(
        &self,
        cliente_id: i64,
        draft: &ReservationDraft,
    ) -> Result<ReservationEntity, sqlx::Error> {
        let mut tx = self.pool.begin().await?;

        let reservation = sqlx::query_as::<_, ReservationEntity>(
            r#"
            INSERT INTO hotelreef.reserva
                (cliente_id, habitacion_id, fecha_entrada, fecha_salida, cantidad_personas)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING reserva_id, cliente_id, habitacion_id, fecha_entrada, fecha_salida,
                      cantidad_personas, creado_en
            "#,
        )
        .bind(cliente_id)
        .bind(draft.habitacion_id)
        .bind(draft.stay.check_in())
        .bind(draft.stay.check_out())
        .bind(draft.cantidad_personas)
        .fetch_one(&mut *tx)
        .await?;

        tx.commit().await?;
        Ok(reservation)
    }

    /// Find the charge breakdown of a reservation.
    pub async fn find_amounts(
        &self,
        reserva_id: i64,
    ) -> Result<Option<ReservationAmountsEntity>, sqlx::Error> {
        let timer = QueryTimer::new("find_reservation_amounts");
        let result = sqlx::query_as::<_, ReservationAmountsEntity>(
            r#"
            SELECT reserva_id, habitacion_id, fecha_entrada, fecha_salida, noches,
                   precio_diario, total, anticipo_30
            FROM hotelreef.vw_reserva_montos
            WHERE reserva_id = $1
            "#,
        )
        .bind(reserva_id)
        .fetch_optional(&self.pool)
        .await;
        timer.record();
        result
    }
}

fn violation_kind(violation: &ConstraintViolation) -> &'static str {
    match violation {
        ConstraintViolation::RoomOverlap => "room_overlap",
        ConstraintViolation::CapacityExceeded => "capacity_exceeded",
        ConstraintViolation::InvalidDateRange => "invalid_date_range",
        ConstraintViolation::CheckInInPast => "check_in_in_past",
        ConstraintViolation::Other { .. } => "other",
    }
}
