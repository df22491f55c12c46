//! HTTP surface: route table and handlers.
//!
//! | Method | Path | Handler |
//! |---|---|---|
//! | GET | `/categories` | [`categories::list`] |
//! | POST | `/categories` | [`categories::create`] |
//! | PUT | `/categories/{id}` | [`categories::update`] |
//! | DELETE | `/categories/{id}` | [`categories::delete`] |
//! | GET | `/products?page&size` | [`products::list`] |
//! | POST | `/products` | [`products::create`] |
//! | PUT | `/products/{id}` | [`products::update`] |
//! | DELETE | `/products/{id}` | [`products::delete`] |
//! | GET | `/healthz`, `/readyz` | [`health`](crate::health) |

use std::sync::Arc;

use crate::health;
use crate::method::Method;
use crate::router::Router;
use crate::store::CatalogStore;

pub mod categories;
pub mod products;

/// Builds the full route table over `store`.
pub fn router<S: CatalogStore>(store: Arc<S>) -> Router<Arc<S>> {
    Router::with_state(store)
        .on(Method::Get,    "/categories",      categories::list::<S>)
        .on(Method::Post,   "/categories",      categories::create::<S>)
        .on(Method::Put,    "/categories/{id}", categories::update::<S>)
        .on(Method::Delete, "/categories/{id}", categories::delete::<S>)
        .on(Method::Get,    "/products",        products::list::<S>)
        .on(Method::Post,   "/products",        products::create::<S>)
        .on(Method::Put,    "/products/{id}",   products::update::<S>)
        .on(Method::Delete, "/products/{id}",   products::delete::<S>)
        .on(Method::Get,    "/healthz",         health::liveness::<Arc<S>>)
        .on(Method::Get,    "/readyz",          health::readiness::<S>)
}
