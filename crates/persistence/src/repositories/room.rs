//! Room repository for database operations.

use sqlx::PgPool;

use domain::models::StayRange;

use crate::entities::AvailableRoomEntity;
use crate::metrics::QueryTimer;

/// Repository for room lookups.
#[derive(Clone)]
pub struct RoomRepository {
    pool: PgPool,
}

impl RoomRepository {
    /// Creates a new RoomRepository with the given connection pool.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Returns whether a room with the given id exists.
    pub async fn exists(&self, habitacion_id: i64) -> Result<bool, sqlx::Error> {
        let timer = QueryTimer::new("room_exists");
        let result = sqlx::query_scalar::<_, bool>(
            "SELECT EXISTS (SELECT 1 FROM hotelreef.habitacion WHERE habitacion_id = $1)",
        )
        .bind(habitacion_id)
        .fetch_one(&self.pool)
        .await;
        timer.record();
        result
    }

    /// Lists rooms free for the whole stay, ordered by room id.
    pub async fn find_available(
        &self,
        stay: &StayRange,
        hotel_id: Option<i64>,
    ) -> Result<Vec<AvailableRoomEntity>, sqlx::Error> {
        let timer = QueryTimer::new("find_available_rooms");
        let result = sqlx::query_as::<_, AvailableRoomEntity>(
            r#"
            SELECT habitacion_id, hotel_id, numero, tipo, capacidad, precio_diario
            FROM hotelreef.fn_habitaciones_disponibles($1, $2, $3)
            "#,
        )
        .bind(stay.check_in())
        .bind(stay.check_out())
        .bind(hotel_id)
        .fetch_all(&self.pool)
        .await;
        timer.record();
        result
    }
}
