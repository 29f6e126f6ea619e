use thiserror::Error;

/// Error type for JWT operations.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum JwtError {
    #[error("Signing key is missing or empty")]
    MissingSigningKey,

    #[error("Failed to encode token: {0}")]
    EncodingFailed(String),

    #[error("Token is expired")]
    TokenExpired,

    #[error("Token claims do not match the expected token kind: {0}")]
    UnexpectedClaims(String),

    #[error("Token is invalid: {0}")]
    InvalidToken(String),
}
