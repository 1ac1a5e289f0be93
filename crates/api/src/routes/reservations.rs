//! Reservation routes.

use axum::{extract::State, http::StatusCode, Json};
use tracing::info;

use domain::models::{CreateReservationRequest, CreateReservationResponse, ReservationAmounts};
use domain::services::validate_reservation;
use persistence::repositories::{ReservationRepository, RoomRepository};
use persistence::{ConstraintViolation, StorageError};

use crate::app::AppState;
use crate::error::ApiError;
use crate::extractors::{ApiJson, ApiPath, UserAuth};
use crate::middleware::metrics::{record_reservation_conflict, record_reservation_created};
use crate::services::AuthService;

/// Book a room for the authenticated client.
///
/// POST /api/reservas
pub async fn create_reservation(
    State(state): State<AppState>,
    auth: UserAuth,
    ApiJson(request): ApiJson<CreateReservationRequest>,
) -> Result<(StatusCode, Json<CreateReservationResponse>), ApiError> {
    let draft = validate_reservation(&request, state.config.booking.today())?;

    if !RoomRepository::new(state.pool.clone())
        .exists(draft.habitacion_id)
        .await?
    {
        return Err(ApiError::NotFound("Room not found.".into()));
    }

    let cliente_id = AuthService::new(state.pool.clone(), state.jwt.clone())
        .client_for_user(auth.user_id)
        .await?;

    let reservation = ReservationRepository::new(state.pool.clone())
        .create(cliente_id, &draft)
        .await
        .map_err(|err| {
            if let StorageError::Constraint(ConstraintViolation::RoomOverlap) = err {
                record_reservation_conflict();
            }
            ApiError::from(err)
        })?;

    record_reservation_created();
    info!(
        reserva_id = reservation.reserva_id,
        cliente_id,
        habitacion_id = reservation.habitacion_id,
        nights = draft.stay.nights(),
        "Reservation created"
    );

    Ok((
        StatusCode::CREATED,
        Json(CreateReservationResponse {
            reserva_id: reservation.reserva_id,
        }),
    ))
}

/// Charge breakdown of a reservation.
///
/// GET /api/reservas/:id/montos
pub async fn montos(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<String>,
) -> Result<Json<ReservationAmounts>, ApiError> {
    let reserva_id = shared::validation::parse_integer(Some(&id), "id")?;

    let amounts = ReservationRepository::new(state.pool.clone())
        .find_amounts(reserva_id)
        .await?
        .ok_or_else(|| ApiError::NotFound("Reservation not found.".into()))?;

    Ok(Json(amounts.into()))
}
