use std::env;
use std::fmt;

use config::builder::DefaultState;
use config::Config as ConfigBuilder;
use config::ConfigError;
use config::Environment;
use config::File;
use config::FileFormat;
use serde::Deserialize;

#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    pub server: ServerConfig,
    pub jwt: JwtConfig,
    pub store: StoreConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    pub http_port: u16,
}

#[derive(Deserialize, Clone)]
pub struct JwtConfig {
    pub secret: String,
}

impl fmt::Debug for JwtConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("JwtConfig")
            .field("secret", &"<redacted>")
            .finish()
    }
}

#[derive(Debug, Deserialize, Clone)]
pub struct StoreConfig {
    pub backend: StoreBackend,
    pub database_url: Option<String>,
    pub max_connections: u32,
}

/// Which `UserStore` implementation backs the service.
#[derive(Debug, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum StoreBackend {
    Memory,
    Postgres,
}

impl fmt::Display for StoreBackend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StoreBackend::Memory => f.write_str("memory"),
            StoreBackend::Postgres => f.write_str("postgres"),
        }
    }
}

impl Config {
    /// Load configuration from files with environment variable overrides
    ///
    /// Priority (highest to lowest):
    /// 1. `JWT_SECRET_KEY` (overrides jwt.secret)
    /// 2. Environment variables (SERVER__HTTP_PORT, STORE__BACKEND, etc.)
    /// 3. Environment-specific config file (config/{environment}.toml)
    /// 4. Default config file (config/default.toml)
    /// 5. Built-in defaults, with `DATABASE_URL` as the store.database_url fallback
    pub fn load() -> Result<Self, ConfigError> {
        let run_mode = env::var("RUN_MODE").unwrap_or_else(|_| "development".to_string());

        let mut builder = Self::defaults()?;
        if let Ok(database_url) = env::var("DATABASE_URL") {
            builder = builder.set_default("store.database_url", database_url)?;
        }

        let configuration = builder
            // Start with default configuration
            .add_source(File::with_name("config/default").required(false))
            // Layer on environment-specific configuration
            .add_source(File::with_name(&format!("config/{}", run_mode)).required(false))
            // Layer on environment variables (with __ as separator)
            // Example: STORE__BACKEND=postgres overrides store.backend
            .add_source(Environment::default().separator("__"))
            .set_override_option("jwt.secret", env::var("JWT_SECRET_KEY").ok())?
            .build()?;

        configuration.try_deserialize::<Config>()?.validated()
    }

    /// Build configuration from a TOML document layered over the built-in
    /// defaults. Ignores the environment.
    pub fn from_toml(document: &str) -> Result<Self, ConfigError> {
        Self::defaults()?
            .add_source(File::from_str(document, FileFormat::Toml))
            .build()?
            .try_deserialize::<Config>()?
            .validated()
    }

    fn defaults() -> Result<config::ConfigBuilder<DefaultState>, ConfigError> {
        ConfigBuilder::builder()
            .set_default("server.http_port", 8080)?
            .set_default("jwt.secret", "")?
            .set_default("store.backend", "memory")?
            .set_default("store.max_connections", 5)
    }

    fn validated(self) -> Result<Self, ConfigError> {
        if self.store.backend == StoreBackend::Postgres && self.store.database_url.is_none() {
            return Err(ConfigError::Message(
                "store.database_url is required when store.backend is postgres".to_string(),
            ));
        }
        Ok(self)
    }
}
