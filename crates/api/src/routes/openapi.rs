//! OpenAPI document route.

use axum::{
    http::{header, StatusCode},
    response::IntoResponse,
};

/// Embedded OpenAPI specification from docs/api/openapi.yaml.
const OPENAPI_SPEC: &str = include_str!("../../../../docs/api/openapi.yaml");

/// Serves the OpenAPI YAML document at `/api/docs/openapi.yaml`.
pub async fn openapi_spec() -> impl IntoResponse {
    (
        StatusCode::OK,
        [(header::CONTENT_TYPE, "application/yaml; charset=utf-8")],
        OPENAPI_SPEC,
    )
}
