use axum::http::StatusCode;
use axum::Extension;
use serde::Serialize;

use super::ApiError;
use super::ApiSuccess;
use crate::inbound::http::middleware::AuthenticatedUser;

/// Example protected resource. Only reachable through the access gate.
pub async fn protected(
    user: Option<Extension<AuthenticatedUser>>,
) -> Result<ApiSuccess<ProtectedResponseData>, ApiError> {
    let Extension(user) = user.ok_or_else(|| {
        tracing::error!("Protected handler reached without an authenticated user");
        ApiError::InternalServerError("User ID not found in context".to_string())
    })?;

    Ok(ApiSuccess::new(
        StatusCode::OK,
        ProtectedResponseData {
            message: format!("Welcome, user #{}", user.user_id),
            user_id: user.user_id.0,
        },
    ))
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProtectedResponseData {
    pub message: String,
    pub user_id: i64,
}
