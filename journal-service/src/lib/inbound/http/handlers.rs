use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::response::Response;
use axum::Json;
use serde::Serialize;

use crate::user::errors::UserError;

pub mod health;
pub mod login;
pub mod protected;
pub mod refresh;
pub mod register;

#[derive(Debug, Clone)]
pub struct ApiSuccess<T: Serialize + PartialEq>(StatusCode, Json<T>);

impl<T> PartialEq for ApiSuccess<T>
where
    T: Serialize + PartialEq,
{
    fn eq(&self, other: &Self) -> bool {
        self.0 == other.0 && self.1 .0 == other.1 .0
    }
}

impl<T: Serialize + PartialEq> ApiSuccess<T> {
    pub fn new(status: StatusCode, data: T) -> Self {
        ApiSuccess(status, Json(data))
    }
}

impl<T: Serialize + PartialEq> IntoResponse for ApiSuccess<T> {
    fn into_response(self) -> Response {
        (self.0, self.1).into_response()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApiError {
    InternalServerError(String),
    BadRequest(String),
    Unauthorized(String),
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        tracing::debug!(error = %rejection.body_text(), "Rejected request body");
        Self::BadRequest("Invalid request payload".to_string())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            ApiError::InternalServerError(msg) => (StatusCode::INTERNAL_SERVER_ERROR, msg),
            ApiError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg),
            ApiError::Unauthorized(msg) => (StatusCode::UNAUTHORIZED, msg),
        };

        (status, Json(ApiErrorBody { error: message })).into_response()
    }
}

impl From<UserError> for ApiError {
    fn from(err: UserError) -> Self {
        match err {
            UserError::InvalidUsername(_) | UserError::InvalidEmail(_) => {
                ApiError::BadRequest(err.to_string())
            }
            UserError::EmailAlreadyExists(_) => {
                ApiError::BadRequest("User already exists".to_string())
            }
            UserError::InvalidCredentials | UserError::NotFound(_) => {
                ApiError::Unauthorized("Invalid email or password".to_string())
            }
            UserError::InvalidRefreshToken => {
                ApiError::Unauthorized("Invalid refresh token".to_string())
            }
            UserError::PasswordHashing(ref details) => {
                tracing::error!(error = %details, "Password hashing failed");
                ApiError::InternalServerError("Error hashing password".to_string())
            }
            UserError::TokenGeneration(ref details) => {
                tracing::error!(error = %details, "Token generation failed");
                ApiError::InternalServerError("Error generating tokens".to_string())
            }
            UserError::DatabaseError(ref details) => {
                tracing::error!(error = %details, "Storage operation failed");
                ApiError::InternalServerError("Internal server error".to_string())
            }
        }
    }
}

/// Error body shared by every failing route: `{"error": "<message>"}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ApiErrorBody {
    pub error: String,
}

/// Access and refresh tokens returned by login and refresh.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TokenResponseData {
    pub access_token: String,
    pub refresh_token: String,
}

impl From<auth::TokenPair> for TokenResponseData {
    fn from(pair: auth::TokenPair) -> Self {
        Self {
            access_token: pair.access_token,
            refresh_token: pair.refresh_token,
        }
    }
}
