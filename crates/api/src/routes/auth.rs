//! Authentication routes for registration, login, and token management.

use axum::{extract::State, http::StatusCode, Json};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::info;
use uuid::Uuid;

use domain::models::NewUser;

use crate::app::AppState;
use crate::error::ApiError;
use crate::extractors::{ApiJson, UserAuth};
use crate::middleware::metrics::record_user_registered;
use crate::services::{AuthService, Registration};

const TOKEN_TYPE: &str = "Bearer";

/// Request body for user registration.
///
/// Every field is optional at the wire level so that missing values surface
/// as validation messages rather than body rejections.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct RegisterRequest {
    pub email: Option<String>,
    pub password: Option<String>,
    pub confirm: Option<String>,
    pub first_name: Option<String>,
    /// Used when `first_name` is absent or blank.
    pub nombre: Option<String>,
    pub last_name: Option<String>,
    pub apellido_paterno: Option<String>,
    pub apellido_materno: Option<String>,
}

impl From<RegisterRequest> for Registration {
    fn from(req: RegisterRequest) -> Self {
        let last_name = NewUser::compose_last_name(
            req.last_name.as_deref(),
            req.apellido_paterno.as_deref(),
            req.apellido_materno.as_deref(),
        );
        Self {
            email: req.email.unwrap_or_default(),
            password: req.password.unwrap_or_default(),
            confirm: req.confirm.unwrap_or_default(),
            first_name: req
                .first_name
                .filter(|s| !s.trim().is_empty())
                .or(req.nombre)
                .unwrap_or_default(),
            last_name,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct RegisterResponse {
    pub ok: bool,
    pub message: &'static str,
    pub cliente_id: i64,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct LoginRequest {
    pub email: Option<String>,
    pub password: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct LoginData {
    pub token: String,
    pub refresh: String,
    pub token_type: &'static str,
    pub expires_in: i64,
    pub cliente_id: i64,
}

#[derive(Debug, Serialize)]
pub struct LoginResponse {
    pub ok: bool,
    pub data: LoginData,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct RefreshRequest {
    pub refresh: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct RefreshData {
    pub token: String,
    pub token_type: &'static str,
    pub expires_in: i64,
}

#[derive(Debug, Serialize)]
pub struct RefreshResponse {
    pub ok: bool,
    pub data: RefreshData,
}

/// Profile of the authenticated user.
#[derive(Debug, Serialize)]
pub struct MeResponse {
    pub id: Uuid,
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    pub cliente_id: i64,
    pub is_active: bool,
    pub date_joined: DateTime<Utc>,
}

fn auth_service(state: &AppState) -> AuthService {
    AuthService::new(state.pool.clone(), state.jwt.clone())
}

/// Register a new account and its linked client.
///
/// POST /api/auth/register
pub async fn register(
    State(state): State<AppState>,
    ApiJson(request): ApiJson<RegisterRequest>,
) -> Result<(StatusCode, Json<RegisterResponse>), ApiError> {
    let cliente_id = auth_service(&state).register(request.into()).await?;
    record_user_registered();

    Ok((
        StatusCode::CREATED,
        Json(RegisterResponse {
            ok: true,
            message: "User created",
            cliente_id,
        }),
    ))
}

/// Exchange credentials for an access/refresh token pair.
///
/// POST /api/auth/login
pub async fn login(
    State(state): State<AppState>,
    ApiJson(request): ApiJson<LoginRequest>,
) -> Result<Json<LoginResponse>, ApiError> {
    let email = request.email.unwrap_or_default();
    let password = request.password.unwrap_or_default();

    let result = auth_service(&state).login(&email, &password).await?;

    Ok(Json(LoginResponse {
        ok: true,
        data: LoginData {
            token: result.tokens.access_token,
            refresh: result.tokens.refresh_token,
            token_type: TOKEN_TYPE,
            expires_in: result.tokens.expires_in,
            cliente_id: result.cliente_id,
        },
    }))
}

/// Issue a new access token from a refresh token.
///
/// POST /api/auth/refresh
pub async fn refresh(
    State(state): State<AppState>,
    ApiJson(request): ApiJson<RefreshRequest>,
) -> Result<Json<RefreshResponse>, ApiError> {
    let token = request
        .refresh
        .filter(|t| !t.trim().is_empty())
        .ok_or_else(|| ApiError::Validation("The field 'refresh' is required.".into()))?;

    let service = auth_service(&state);
    let access = service.refresh(token.trim()).await?;

    Ok(Json(RefreshResponse {
        ok: true,
        data: RefreshData {
            token: access,
            token_type: TOKEN_TYPE,
            expires_in: service.access_token_expiry_secs(),
        },
    }))
}

/// Return the authenticated user's profile.
///
/// GET /api/auth/me
pub async fn me(
    State(state): State<AppState>,
    auth: UserAuth,
) -> Result<Json<MeResponse>, ApiError> {
    let (user, cliente_id) = auth_service(&state).current_user(auth.user_id).await?;
    info!(user_id = %user.id, "Profile requested");

    Ok(Json(MeResponse {
        id: user.id,
        email: user.email,
        first_name: user.first_name,
        last_name: user.last_name,
        cliente_id,
        is_active: user.is_active,
        date_joined: user.date_joined,
    }))
}
