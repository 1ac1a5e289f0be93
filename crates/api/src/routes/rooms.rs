//! Room availability routes.

use axum::{extract::State, Json};
use serde::Deserialize;
use tracing::debug;

use domain::models::AvailableRoom;
use domain::services::validate_availability;
use persistence::repositories::RoomRepository;

use crate::app::AppState;
use crate::error::ApiError;
use crate::extractors::ApiQuery;

/// Query parameters for the availability search.
///
/// Values are kept as raw strings so parse failures report the field name.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AvailabilityQuery {
    pub entrada: Option<String>,
    pub salida: Option<String>,
    pub hotel_id: Option<String>,
}

/// List rooms free for the whole requested stay.
///
/// GET /api/habitaciones/disponibles
pub async fn disponibles(
    State(state): State<AppState>,
    ApiQuery(query): ApiQuery<AvailabilityQuery>,
) -> Result<Json<Vec<AvailableRoom>>, ApiError> {
    let search = validate_availability(
        query.entrada.as_deref(),
        query.salida.as_deref(),
        query.hotel_id.as_deref(),
    )?;

    let rooms = RoomRepository::new(state.pool.clone())
        .find_available(&search.stay, search.hotel_id)
        .await?;

    debug!(
        entrada = %search.stay.check_in(),
        salida = %search.stay.check_out(),
        hotel_id = ?search.hotel_id,
        count = rooms.len(),
        "Availability search"
    );

    Ok(Json(rooms.into_iter().map(AvailableRoom::from).collect()))
}
