use crate::jwt::AccessClaims;
use crate::jwt::JwtError;
use crate::jwt::RefreshClaims;
use crate::jwt::SigningKey;
use crate::jwt::TokenPair;
use crate::jwt::TokenService;
use crate::password::PasswordError;
use crate::password::PasswordHasher;

/// Argon2id hash (default parameters) that no password matches.
///
/// Verified against when no account exists, so an unknown email costs the
/// same hashing work as a wrong password.
const UNKNOWN_ACCOUNT_HASH: &str =
    "$argon2id$v=19$m=19456,t=2,p=1$dW5rbm93bi1hY2NvdW50$AAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAA";

/// Authentication coordinator combining password verification and token issuance.
///
/// Owns the process signing key (through its `TokenService`); build one per
/// process and share it behind an `Arc`.
pub struct Authenticator {
    password_hasher: PasswordHasher,
    tokens: TokenService,
}

/// Authentication operation errors.
#[derive(Debug, thiserror::Error)]
pub enum AuthenticationError {
    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("JWT error: {0}")]
    JwtError(#[from] JwtError),
}

impl Authenticator {
    /// Create a new authenticator.
    ///
    /// # Arguments
    /// * `key` - Signing key for every token issued or verified
    pub fn new(key: &SigningKey) -> Self {
        Self {
            password_hasher: PasswordHasher::new(),
            tokens: TokenService::new(key),
        }
    }

    /// Hash a password for storage.
    ///
    /// # Errors
    /// * `PasswordError` - Hashing operation failed
    pub fn hash_password(&self, password: &str) -> Result<String, PasswordError> {
        self.password_hasher.hash(password)
    }

    /// Verify credentials and issue an access + refresh token pair.
    ///
    /// # Arguments
    /// * `password` - Plaintext password to verify
    /// * `stored_hash` - Stored password hash
    /// * `user_id` - Identity encoded into both tokens
    ///
    /// # Errors
    /// * `InvalidCredentials` - Password does not match (or hash is unreadable)
    /// * `JwtError` - Token generation failed
    pub fn authenticate(
        &self,
        password: &str,
        stored_hash: &str,
        user_id: i64,
    ) -> Result<TokenPair, AuthenticationError> {
        if !self.password_hasher.verify(password, stored_hash) {
            return Err(AuthenticationError::InvalidCredentials);
        }

        Ok(self.tokens.issue_pair(user_id)?)
    }

    /// Reject a login for which no account exists.
    ///
    /// Runs a full password verification before failing, so the caller
    /// cannot tell this case from a wrong password by response time.
    pub fn reject_unknown_account(&self, password: &str) -> AuthenticationError {
        let _ = self.password_hasher.verify(password, UNKNOWN_ACCOUNT_HASH);
        AuthenticationError::InvalidCredentials
    }

    /// Issue a token pair without password verification.
    ///
    /// Used by the refresh flow once the refresh token has been verified.
    pub fn issue_tokens(&self, user_id: i64) -> Result<TokenPair, JwtError> {
        self.tokens.issue_pair(user_id)
    }

    /// Validate an access token.
    pub fn validate_access_token(&self, token: &str) -> Result<AccessClaims, JwtError> {
        self.tokens.parse_access(token)
    }

    /// Validate a refresh token.
    pub fn validate_refresh_token(&self, token: &str) -> Result<RefreshClaims, JwtError> {
        self.tokens.parse_refresh(token)
    }

    /// Underlying token service.
    pub fn tokens(&self) -> &TokenService {
        &self.tokens
    }
}
