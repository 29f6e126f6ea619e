use std::sync::Arc;

use anyhow::Context;
use auth::Authenticator;
use auth::SigningKey;
use journal_service::config::Config;
use journal_service::config::StoreBackend;
use journal_service::domain::user::ports::AuthServicePort;
use journal_service::domain::user::service::AuthService;
use journal_service::inbound::http::router::create_router;
use journal_service::outbound::repositories::InMemoryUserStore;
use journal_service::outbound::repositories::PostgresUserStore;
use sqlx::postgres::PgPoolOptions;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

#[tokio::main]
async fn main() -> Result<(), anyhow::Error> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "journal_service=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!(
        service = "journal-service",
        version = env!("CARGO_PKG_VERSION"),
        "Service starting"
    );

    let config = Config::load()?;

    tracing::info!(
        http_port = config.server.http_port,
        store_backend = %config.store.backend,
        "Configuration loaded"
    );

    let signing_key = SigningKey::new(config.jwt.secret.as_bytes())
        .context("JWT signing key is not set (JWT_SECRET_KEY or JWT__SECRET)")?;
    let authenticator = Arc::new(Authenticator::new(&signing_key));

    let auth_service: Arc<dyn AuthServicePort> = match config.store.backend {
        StoreBackend::Memory => {
            tracing::info!(store = "memory", "Using in-memory user store");
            Arc::new(AuthService::new(
                Arc::new(InMemoryUserStore::new()),
                Arc::clone(&authenticator),
            ))
        }
        StoreBackend::Postgres => {
            let database_url = config
                .store
                .database_url
                .as_deref()
                .context("store.database_url is required for the postgres store")?;

            let pg_pool = PgPoolOptions::new()
                .max_connections(config.store.max_connections)
                .connect(database_url)
                .await?;
            tracing::info!(
                max_connections = config.store.max_connections,
                database = "postgresql",
                "Database connection pool created"
            );

            sqlx::migrate!("./migrations").run(&pg_pool).await?;
            tracing::info!(database = "postgresql", "Database migrations completed");

            Arc::new(AuthService::new(
                Arc::new(PostgresUserStore::new(pg_pool)),
                Arc::clone(&authenticator),
            ))
        }
    };

    let http_address = format!("0.0.0.0:{}", config.server.http_port);
    let http_listener = tokio::net::TcpListener::bind(&http_address).await?;
    tracing::info!(
        address = %http_address,
        port = config.server.http_port,
        protocol = "http",
        "Http server listening"
    );

    let http_application = create_router(auth_service, authenticator);

    axum::serve(http_listener, http_application)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Server exited successfully");

    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "Failed to listen for shutdown signal");
        return;
    }
    tracing::info!("Shutdown signal received");
}
