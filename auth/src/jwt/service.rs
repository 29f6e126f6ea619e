use chrono::Utc;

use super::claims::AccessClaims;
use super::claims::RefreshClaims;
use super::claims::ISSUER;
use super::errors::JwtError;
use super::handler::JwtHandler;
use super::key::SigningKey;

/// Freshly issued access + refresh token strings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TokenPair {
    pub access_token: String,
    pub refresh_token: String,
}

/// Issues and parses the two token kinds.
///
/// Holds no state beyond the signing key. Access and refresh tokens share the
/// HS256 wire encoding but each parse entry point only accepts its own kind.
pub struct TokenService {
    handler: JwtHandler,
}

impl TokenService {
    pub fn new(key: &SigningKey) -> Self {
        Self {
            handler: JwtHandler::new(key, ISSUER),
        }
    }

    /// Sign an access token for `user_id`, valid for 15 minutes.
    ///
    /// # Errors
    /// * `EncodingFailed` - Signing failed
    pub fn issue_access(&self, user_id: i64) -> Result<String, JwtError> {
        self.handler.encode(&AccessClaims::new(user_id, Utc::now()))
    }

    /// Sign a refresh token for `user_id`, valid for 7 days.
    ///
    /// # Errors
    /// * `EncodingFailed` - Signing failed
    pub fn issue_refresh(&self, user_id: i64) -> Result<String, JwtError> {
        self.handler.encode(&RefreshClaims::new(user_id, Utc::now()))
    }

    /// Sign a new access and refresh token for `user_id`.
    pub fn issue_pair(&self, user_id: i64) -> Result<TokenPair, JwtError> {
        Ok(TokenPair {
            access_token: self.issue_access(user_id)?,
            refresh_token: self.issue_refresh(user_id)?,
        })
    }

    /// Verify an access token and return its claims.
    ///
    /// # Errors
    /// * `TokenExpired` - Token is past its expiry
    /// * `UnexpectedClaims` - Token is not an access token
    /// * `InvalidToken` - Signature, algorithm, issuer or encoding is wrong
    pub fn parse_access(&self, token: &str) -> Result<AccessClaims, JwtError> {
        self.handler.decode(token)
    }

    /// Verify a refresh token and return its claims.
    ///
    /// # Errors
    /// * `TokenExpired` - Token is past its expiry
    /// * `UnexpectedClaims` - Token is not a refresh token
    /// * `InvalidToken` - Signature, algorithm, issuer or encoding is wrong
    pub fn parse_refresh(&self, token: &str) -> Result<RefreshClaims, JwtError> {
        self.handler.decode(token)
    }

    /// Sign arbitrary claims with the process key.
    ///
    /// Used to mint tokens with hand-picked timestamps.
    pub fn sign<T: serde::Serialize>(&self, claims: &T) -> Result<String, JwtError> {
        self.handler.encode(claims)
    }
}
