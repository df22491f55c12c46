//! Layered configuration.
//!
//! Sources, lowest precedence first:
//!
//! 1. built-in defaults (below)
//! 2. `catalog.toml` in the working directory, or the file named by
//!    `CATALOG_CONFIG`; optional
//! 3. `CATALOG__<SECTION>__<KEY>` environment variables, e.g.
//!    `CATALOG__DATABASE__HOST=db.internal`
//!
//! ```toml
//! [server]
//! host = "0.0.0.0"
//! port = 3000
//!
//! [database]
//! host = "localhost"
//! port = 5432
//! user = "postgres"
//! password = "123456"
//! name = "test"
//! max_connections = 10
//!
//! [logging]
//! level = "info"
//! format = "pretty"   # or "json"
//!
//! [http]
//! cors = true
//! max_body_bytes = 102400
//! ```

use std::fmt;
use std::net::SocketAddr;

use serde::Deserialize;
use sqlx::postgres::PgConnectOptions;
use tracing_subscriber::{EnvFilter, fmt as log_fmt};

use crate::error::Error;

const DEFAULT_FILE: &str = "catalog";
const ENV_PREFIX: &str = "CATALOG";

#[derive(Clone, Debug, Deserialize)]
pub struct Config {
    pub server: ServerConfig,
    pub database: DatabaseConfig,
    pub logging: LoggingConfig,
    pub http: HttpConfig,
}

impl Config {
    /// Loads from `$CATALOG_CONFIG` (or `catalog.toml`) and the environment.
    pub fn load() -> Result<Self, Error> {
        let path = std::env::var("CATALOG_CONFIG").unwrap_or_else(|_| DEFAULT_FILE.to_owned());
        Self::load_from(&path)
    }

    /// Loads from the given file path (extension optional) and the environment.
    pub fn load_from(path: &str) -> Result<Self, Error> {
        let settings = config::Config::builder()
            .set_default("server.host", "0.0.0.0")?
            .set_default("server.port", 3000)?
            .set_default("database.host", "localhost")?
            .set_default("database.port", 5432)?
            .set_default("database.user", "postgres")?
            .set_default("database.password", "123456")?
            .set_default("database.name", "test")?
            .set_default("database.max_connections", 10)?
            .set_default("logging.level", "info")?
            .set_default("logging.format", "pretty")?
            .set_default("http.cors", true)?
            .set_default("http.max_body_bytes", 100 * 1024)?
            .add_source(config::File::with_name(path).required(false))
            .add_source(
                config::Environment::with_prefix(ENV_PREFIX)
                    .prefix_separator("__")
                    .separator("__"),
            )
            .build()?;

        Ok(settings.try_deserialize()?)
    }
}

#[derive(Clone, Debug, Deserialize)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl ServerConfig {
    pub fn socket_addr(&self) -> Result<SocketAddr, Error> {
        let addr = format!("{}:{}", self.host, self.port);
        addr.parse().map_err(|e: std::net::AddrParseError| Error::Addr {
            reason: e.to_string(),
            addr,
        })
    }
}

/// PostgreSQL connection settings.
#[derive(Clone, Deserialize)]
pub struct DatabaseConfig {
    pub host: String,
    pub port: u16,
    pub user: String,
    pub password: String,
    pub name: String,
    pub max_connections: u32,
}

impl DatabaseConfig {
    pub fn connect_options(&self) -> PgConnectOptions {
        PgConnectOptions::new()
            .host(&self.host)
            .port(self.port)
            .username(&self.user)
            .password(&self.password)
            .database(&self.name)
    }
}

// The password stays out of logs.
impl fmt::Debug for DatabaseConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DatabaseConfig")
            .field("host", &self.host)
            .field("port", &self.port)
            .field("user", &self.user)
            .field("password", &"***")
            .field("name", &self.name)
            .field("max_connections", &self.max_connections)
            .finish()
    }
}

/// Logging configuration.
#[derive(Clone, Debug, Deserialize)]
pub struct LoggingConfig {
    pub level: String,
    pub format: String,
}

impl LoggingConfig {
    /// Initialize the tracing subscriber. `RUST_LOG` wins over `level`.
    pub fn init(&self) {
        let filter =
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&self.level));

        match self.format.as_str() {
            "json" => log_fmt().json().with_env_filter(filter).init(),
            _ => log_fmt().with_env_filter(filter).init(),
        }
    }
}

#[derive(Clone, Debug, Deserialize)]
pub struct HttpConfig {
    pub cors: bool,
    /// Larger request bodies are answered with `413`.
    pub max_body_bytes: usize,
}
