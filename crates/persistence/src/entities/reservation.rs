//! Reservation entities (database row mappings).

use chrono::{DateTime, NaiveDate, Utc};
use sqlx::FromRow;

/// Database row mapping for the hotelreef.reserva table.
#[derive(Debug, Clone, FromRow)]
pub struct ReservationEntity {
    pub reserva_id: i64,
    pub cliente_id: i64,
    pub habitacion_id: i64,
    pub fecha_entrada: NaiveDate,
    pub fecha_salida: NaiveDate,
    pub cantidad_personas: i32,
    pub creado_en: DateTime<Utc>,
}

impl From<ReservationEntity> for domain::models::Reservation {
    fn from(entity: ReservationEntity) -> Self {
        Self {
            reserva_id: entity.reserva_id,
            cliente_id: entity.cliente_id,
            habitacion_id: entity.habitacion_id,
            fecha_entrada: entity.fecha_entrada,
            fecha_salida: entity.fecha_salida,
            cantidad_personas: entity.cantidad_personas,
            creado_en: entity.creado_en,
        }
    }
}

/// A row of the hotelreef.vw_reserva_montos view.
#[derive(Debug, Clone, FromRow)]
pub struct ReservationAmountsEntity {
    pub reserva_id: i64,
    pub habitacion_id: i64,
    pub fecha_entrada: NaiveDate,
    pub fecha_salida: NaiveDate,
    pub noches: i32,
    pub precio_diario: i64,
    pub total: i64,
    pub anticipo_30: i64,
}

impl From<ReservationAmountsEntity> for domain::models::ReservationAmounts {
    fn from(entity: ReservationAmountsEntity) -> Self {
        Self {
            reserva_id: entity.reserva_id,
            habitacion_id: entity.habitacion_id,
            fecha_entrada: entity.fecha_entrada,
            fecha_salida: entity.fecha_salida,
            noches: entity.noches,
            precio_diario: entity.precio_diario,
            total: entity.total,
            anticipo_30: entity.anticipo_30,
        }
    }
}
