use chrono::DateTime;
use chrono::Duration;
use chrono::Utc;
use serde::Deserialize;
use serde::Serialize;

/// Issuer label stamped into every token this service signs.
pub const ISSUER: &str = "trading-journal-backend";

/// Lifetime of an access token.
pub fn access_token_lifetime() -> Duration {
    Duration::minutes(15)
}

/// Lifetime of a refresh token.
pub fn refresh_token_lifetime() -> Duration {
    Duration::days(7)
}

/// Kind tag carried by access tokens.
///
/// Single-variant so that a refresh payload fails to deserialize as
/// `AccessClaims` even though both share the same wire layout.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum AccessKind {
    #[serde(rename = "access")]
    Access,
}

/// Kind tag carried by refresh tokens.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum RefreshKind {
    #[serde(rename = "refresh")]
    Refresh,
}

/// Claims of a short-lived access token.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct AccessClaims {
    /// Identifier of the authenticated user
    pub user_id: i64,

    /// Issuer
    pub iss: String,

    /// Issued at (Unix timestamp)
    pub iat: i64,

    /// Expiration time (Unix timestamp)
    pub exp: i64,

    pub token_type: AccessKind,
}

impl AccessClaims {
    /// Build access claims expiring 15 minutes after `issued_at`.
    pub fn new(user_id: i64, issued_at: DateTime<Utc>) -> Self {
        Self {
            user_id,
            iss: ISSUER.to_string(),
            iat: issued_at.timestamp(),
            exp: (issued_at + access_token_lifetime()).timestamp(),
            token_type: AccessKind::Access,
        }
    }

    /// Override the expiration (Unix timestamp).
    pub fn with_expiration(mut self, exp: i64) -> Self {
        self.exp = exp;
        self
    }
}

/// Claims of a long-lived refresh token.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct RefreshClaims {
    pub user_id: i64,
    pub iss: String,
    pub iat: i64,
    pub exp: i64,
    pub token_type: RefreshKind,
}

impl RefreshClaims {
    /// Build refresh claims expiring 7 days after `issued_at`.
    pub fn new(user_id: i64, issued_at: DateTime<Utc>) -> Self {
        Self {
            user_id,
            iss: ISSUER.to_string(),
            iat: issued_at.timestamp(),
            exp: (issued_at + refresh_token_lifetime()).timestamp(),
            token_type: RefreshKind::Refresh,
        }
    }

    pub fn with_expiration(mut self, exp: i64) -> Self {
        self.exp = exp;
        self
    }
}
