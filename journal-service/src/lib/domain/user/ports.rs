use async_trait::async_trait;
use auth::TokenPair;

use crate::domain::user::models::LoginCommand;
use crate::domain::user::models::NewUser;
use crate::domain::user::models::RegisterCommand;
use crate::domain::user::models::User;
use crate::user::errors::UserError;

/// Port for authentication operations driven by the HTTP layer.
#[async_trait]
pub trait AuthServicePort: Send + Sync + 'static {
    /// Register a new user.
    ///
    /// # Arguments
    /// * `command` - Validated command containing username, email, and password
    ///
    /// # Returns
    /// Created user entity
    ///
    /// # Errors
    /// * `PasswordHashing` - Password could not be hashed
    /// * `EmailAlreadyExists` - Email is already registered
    /// * `DatabaseError` - Storage operation failed
    async fn register(&self, command: RegisterCommand) -> Result<User, UserError>;

    /// Verify credentials and issue an access + refresh token pair.
    ///
    /// # Errors
    /// * `InvalidCredentials` - Unknown email or wrong password (indistinguishable)
    /// * `TokenGeneration` - Signing failed
    /// * `DatabaseError` - Storage operation failed
    async fn login(&self, command: LoginCommand) -> Result<TokenPair, UserError>;

    /// Exchange a refresh token for a new access + refresh token pair.
    ///
    /// The presented refresh token is not revoked; it stays valid until its
    /// own expiry.
    ///
    /// # Errors
    /// * `InvalidRefreshToken` - Token is expired, malformed, badly signed or not a refresh token
    /// * `TokenGeneration` - Signing failed
    async fn refresh(&self, refresh_token: &str) -> Result<TokenPair, UserError>;
}

/// Persistence operations for user credentials, keyed by email.
#[async_trait]
pub trait UserStore: Send + Sync + 'static {
    /// Persist a new user and assign its identifier.
    ///
    /// The uniqueness check and the insert are one atomic step: of several
    /// concurrent calls with the same email, at most one succeeds.
    ///
    /// # Errors
    /// * `EmailAlreadyExists` - Email is already registered (nothing is written)
    /// * `DatabaseError` - Storage operation failed
    async fn create_user(&self, user: NewUser) -> Result<User, UserError>;

    /// Retrieve a user by email address.
    ///
    /// # Errors
    /// * `NotFound` - No user with this email
    /// * `DatabaseError` - Storage operation failed
    async fn get_user_by_email(&self, email: &str) -> Result<User, UserError>;

    /// Number of stored users.
    async fn count(&self) -> Result<usize, UserError>;
}
