//! Authentication utilities library
//!
//! Credential and token primitives for the trading-journal backend:
//! - Password hashing (Argon2id)
//! - Access / refresh JWT issuance and validation (HS256)
//! - Authentication coordination
//!
//! # Examples
//!
//! ## Password Hashing
//! ```
//! use auth::PasswordHasher;
//!
//! let hasher = PasswordHasher::new();
//! let hash = hasher.hash("my_password").unwrap();
//! assert!(hasher.verify("my_password", &hash));
//! ```
//!
//! ## Tokens
//! ```
//! use auth::{SigningKey, TokenService};
//!
//! let key = SigningKey::new("secret_key_at_least_32_bytes_long!").unwrap();
//! let tokens = TokenService::new(&key);
//! let access = tokens.issue_access(1).unwrap();
//! assert_eq!(tokens.parse_access(&access).unwrap().user_id, 1);
//! // an access token is never accepted as a refresh token
//! assert!(tokens.parse_refresh(&access).is_err());
//! ```
//!
//! ## Complete Authentication Flow
//! ```
//! use auth::{Authenticator, SigningKey};
//!
//! let key = SigningKey::new("secret_key_at_least_32_bytes_long!").unwrap();
//! let auth = Authenticator::new(&key);
//!
//! // Register: hash password
//! let hash = auth.hash_password("password123").unwrap();
//!
//! // Login: verify and issue tokens
//! let pair = auth.authenticate("password123", &hash, 1).unwrap();
//!
//! // Refresh: verify refresh token, rotate
//! let claims = auth.validate_refresh_token(&pair.refresh_token).unwrap();
//! let rotated = auth.issue_tokens(claims.user_id).unwrap();
//! assert!(!rotated.access_token.is_empty());
//! ```

pub mod authenticator;
pub mod jwt;
pub mod password;

// Re-export commonly used items
pub use authenticator::AuthenticationError;
pub use authenticator::Authenticator;
pub use jwt::AccessClaims;
pub use jwt::JwtError;
pub use jwt::JwtHandler;
pub use jwt::RefreshClaims;
pub use jwt::SigningKey;
pub use jwt::TokenPair;
pub use jwt::TokenService;
pub use password::PasswordError;
pub use password::PasswordHasher;
