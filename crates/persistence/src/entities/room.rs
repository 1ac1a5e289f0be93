//! Room entity (database row mapping).

use sqlx::FromRow;

/// A row of `hotelreef.fn_habitaciones_disponibles`.
#[derive(Debug, Clone, FromRow)]
pub struct AvailableRoomEntity {
    pub habitacion_id: i64,
    pub hotel_id: i64,
    pub numero: String,
    pub tipo: String,
    pub capacidad: i32,
    pub precio_diario: i64,
}

impl From<AvailableRoomEntity> for domain::models::AvailableRoom {
    fn from(entity: AvailableRoomEntity) -> Self {
        Self {
            habitacion_id: entity.habitacion_id,
            hotel_id: entity.hotel_id,
            numero: entity.numero,
            tipo: entity.tipo,
            capacidad: entity.capacidad,
            precio_diario: entity.precio_diario,
        }
    }
}
