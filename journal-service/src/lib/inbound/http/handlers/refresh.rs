use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;

use super::ApiError;
use super::ApiSuccess;
use super::TokenResponseData;
use crate::inbound::http::router::AppState;

/// Exchange a refresh token for a fresh access + refresh pair.
pub async fn refresh(
    State(state): State<AppState>,
    payload: Result<Json<RefreshRequest>, JsonRejection>,
) -> Result<ApiSuccess<TokenResponseData>, ApiError> {
    let Json(body) = payload?;

    state
        .auth_service
        .refresh(&body.refresh_token)
        .await
        .map_err(ApiError::from)
        .map(|pair| ApiSuccess::new(StatusCode::OK, pair.into()))
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct RefreshRequest {
    refresh_token: String,
}
