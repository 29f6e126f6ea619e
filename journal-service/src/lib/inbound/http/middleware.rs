use axum::extract::Request;
use axum::extract::State;
use axum::http::header;
use axum::http::HeaderMap;
use axum::middleware::Next;
use axum::response::Response;

use super::handlers::ApiError;
use crate::domain::user::models::UserId;
use crate::inbound::http::router::AppState;

/// Extension type to store the authenticated user ID in request extensions
#[derive(Debug, Clone)]
pub struct AuthenticatedUser {
    pub user_id: UserId,
}

/// Middleware that validates access tokens and adds the caller's identity to
/// request extensions. Rejected requests never reach the wrapped handler.
pub async fn authenticate(
    State(state): State<AppState>,
    mut req: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let claims = {
        let token = extract_bearer_token(req.headers())?;

        state
            .authenticator
            .validate_access_token(token)
            .map_err(|e| {
                tracing::warn!(error = %e, "Access token rejected");
                ApiError::Unauthorized("Invalid token".to_string())
            })?
    };

    req.extensions_mut().insert(AuthenticatedUser {
        user_id: UserId(claims.user_id),
    });

    Ok(next.run(req).await)
}

fn extract_bearer_token(headers: &HeaderMap) -> Result<&str, ApiError> {
    let auth_header = headers
        .get(header::AUTHORIZATION)
        .ok_or_else(|| ApiError::Unauthorized("Authorization header missing".to_string()))?;

    let invalid_format =
        || ApiError::Unauthorized("Invalid Authorization header format".to_string());

    let auth_str = auth_header.to_str().map_err(|_| invalid_format())?;

    match auth_str.split(' ').collect::<Vec<_>>().as_slice() {
        ["Bearer", token] => Ok(*token),
        _ => Err(invalid_format()),
    }
}
