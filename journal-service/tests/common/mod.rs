#![allow(dead_code)]

use std::sync::Arc;

use auth::AccessClaims;
use auth::Authenticator;
use auth::RefreshClaims;
use auth::SigningKey;
use chrono::Duration;
use chrono::Utc;
use journal_service::domain::user::ports::UserStore;
use journal_service::domain::user::service::AuthService;
use journal_service::inbound::http::router::create_router;
use journal_service::outbound::repositories::InMemoryUserStore;

pub const TEST_SECRET: &str = "test-secret-key-for-jwt-signing-at-least-32-bytes";

/// Test application that spawns a real server backed by the in-memory store
pub struct TestApp {
    pub address: String,
    pub port: u16,
    pub store: Arc<InMemoryUserStore>,
    pub authenticator: Arc<Authenticator>,
    pub api_client: reqwest::Client,
}

impl TestApp {
    /// Spawn the application in a background task and return TestApp
    pub async fn spawn() -> Self {
        // Use random port (0 = OS assigns)
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind random port");
        let port = listener.local_addr().unwrap().port();
        let address = format!("http://127.0.0.1:{}", port);

        let store = Arc::new(InMemoryUserStore::new());
        let authenticator = Arc::new(Authenticator::new(
            &SigningKey::new(TEST_SECRET).expect("Invalid test signing key"),
        ));

        let auth_service = Arc::new(AuthService::new(
            Arc::clone(&store),
            Arc::clone(&authenticator),
        ));

        let router = create_router(auth_service, Arc::clone(&authenticator));

        // Spawn server in background
        tokio::spawn(async move {
            axum::serve(listener, router).await.expect("Server error");
        });

        Self {
            address,
            port,
            store,
            authenticator,
            api_client: reqwest::Client::new(),
        }
    }

    /// Helper to make GET request
    pub fn get(&self, path: &str) -> reqwest::RequestBuilder {
        self.api_client.get(format!("{}{}", self.address, path))
    }

    /// Helper to make POST request
    pub fn post(&self, path: &str) -> reqwest::RequestBuilder {
        self.api_client.post(format!("{}{}", self.address, path))
    }

    /// Helper to make GET request with Bearer token
    pub fn get_authenticated(&self, path: &str, token: &str) -> reqwest::RequestBuilder {
        self.get(path).bearer_auth(token)
    }

    pub async fn user_count(&self) -> usize {
        self.store.count().await.expect("Failed to count users")
    }

    /// Access token for `user_id` that expired an hour ago
    pub fn expired_access_token(&self, user_id: i64) -> String {
        let claims = AccessClaims::new(user_id, Utc::now() - Duration::hours(2))
            .with_expiration((Utc::now() - Duration::hours(1)).timestamp());
        self.authenticator
            .tokens()
            .sign(&claims)
            .expect("Failed to sign expired access token")
    }

    /// Refresh token for `user_id` that expired an hour ago
    pub fn expired_refresh_token(&self, user_id: i64) -> String {
        let claims = RefreshClaims::new(user_id, Utc::now() - Duration::hours(2))
            .with_expiration((Utc::now() - Duration::hours(1)).timestamp());
        self.authenticator
            .tokens()
            .sign(&claims)
            .expect("Failed to sign expired refresh token")
    }
}
