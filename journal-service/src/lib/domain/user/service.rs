use std::sync::Arc;

use async_trait::async_trait;
use auth::AuthenticationError;
use auth::Authenticator;
use auth::TokenPair;

use crate::domain::user::models::LoginCommand;
use crate::domain::user::models::NewUser;
use crate::domain::user::models::RegisterCommand;
use crate::domain::user::models::User;
use crate::user::errors::UserError;
use crate::user::ports::AuthServicePort;
use crate::user::ports::UserStore;

/// Domain service implementation for registration, login and token refresh.
///
/// Holds no per-request state; storage and signing are injected.
pub struct AuthService<S>
where
    S: UserStore,
{
    store: Arc<S>,
    authenticator: Arc<Authenticator>,
}

impl<S> AuthService<S>
where
    S: UserStore,
{
    /// Create a new auth service with injected dependencies.
    ///
    /// # Arguments
    /// * `store` - User persistence implementation
    /// * `authenticator` - Password hashing and token signing
    pub fn new(store: Arc<S>, authenticator: Arc<Authenticator>) -> Self {
        Self {
            store,
            authenticator,
        }
    }
}

#[async_trait]
impl<S> AuthServicePort for AuthService<S>
where
    S: UserStore,
{
    async fn register(&self, command: RegisterCommand) -> Result<User, UserError> {
        let password_hash = self
            .authenticator
            .hash_password(&command.password)
            .map_err(|e| UserError::PasswordHashing(e.to_string()))?;

        let user = self
            .store
            .create_user(NewUser::new(command.username, command.email, password_hash))
            .await?;

        tracing::info!(user_id = %user.id, "User registered");

        Ok(user)
    }

    async fn login(&self, command: LoginCommand) -> Result<TokenPair, UserError> {
        let user = match self.store.get_user_by_email(&command.email).await {
            Ok(user) => user,
            Err(UserError::NotFound(_)) => {
                tracing::debug!("Login attempt for unknown email");
                self.authenticator.reject_unknown_account(&command.password);
                return Err(UserError::InvalidCredentials);
            }
            Err(e) => return Err(e),
        };

        self.authenticator
            .authenticate(&command.password, &user.password_hash, user.id.0)
            .map_err(|e| match e {
                AuthenticationError::InvalidCredentials => {
                    tracing::debug!(user_id = %user.id, "Login attempt with wrong password");
                    UserError::InvalidCredentials
                }
                AuthenticationError::JwtError(err) => UserError::TokenGeneration(err.to_string()),
            })
    }

    async fn refresh(&self, refresh_token: &str) -> Result<TokenPair, UserError> {
        let claims = self
            .authenticator
            .validate_refresh_token(refresh_token)
            .map_err(|e| {
                tracing::warn!(error = %e, "Refresh token rejected");
                UserError::InvalidRefreshToken
            })?;

        self.authenticator
            .issue_tokens(claims.user_id)
            .map_err(|e| UserError::TokenGeneration(e.to_string()))
    }
}
