//! # catalog
//!
//! A small JSON service over two PostgreSQL tables, `categories` and
//! `products`. Each request runs exactly one parameterized statement against
//! a shared connection pool.
//!
//! The pieces, from the socket inwards:
//!
//! - [`Server`] — hyper accept loop, graceful shutdown on SIGTERM / Ctrl-C
//! - [`Router`] — radix-tree routing via [`matchit`], request tracing and CORS
//! - [`routes`] — the handlers, one per method + path
//! - [`store`] — the [`CatalogStore`](store::CatalogStore) seam and its
//!   PostgreSQL implementation
//!
//! ## Wiring it up
//!
//! ```rust,no_run
//! use std::sync::Arc;
//!
//! use catalog::store::PgStore;
//! use catalog::{Config, Server, routes};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), catalog::Error> {
//!     let config = Config::load()?;
//!     let store = Arc::new(PgStore::connect(&config.database).await?);
//!     store.init_schema().await?;
//!
//!     let app = routes::router(store).cors(config.http.cors);
//!     Server::bind(config.server.socket_addr()?).serve(app).await
//! }
//! ```

mod error;
mod handler;
mod method;
mod request;
mod response;
mod router;
mod server;
mod status;

pub mod config;
pub mod health;
pub mod middleware;
pub mod model;
pub mod page;
pub mod routes;
pub mod store;

pub use config::Config;
pub use error::{ApiError, Error, StoreError};
pub use handler::Handler;
pub use method::Method;
pub use request::Request;
pub use response::{IntoResponse, Json, Response};
pub use router::Router;
pub use server::Server;
pub use status::Status;
