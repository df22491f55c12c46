//! Data access.
//!
//! [`CatalogStore`] is the seam between the HTTP handlers and the database.
//! Every method is exactly one SQL statement against the shared pool in
//! [`PgStore`]; [`MemoryStore`] (behind the `testkit` feature) reproduces the
//! same relational behaviour in memory for tests.

use std::future::Future;

use crate::error::StoreError;
use crate::model::{Category, CategoryInput, NewProduct, Product, ProductListing, ProductUpdate};
use crate::page::Page;

#[cfg(any(test, feature = "testkit"))]
mod memory;
mod postgres;

#[cfg(any(test, feature = "testkit"))]
pub use memory::MemoryStore;
pub use postgres::PgStore;

pub type Result<T> = std::result::Result<T, StoreError>;

/// Storage operations for categories and products.
///
/// # Implementation Notes
///
/// - Implementations must be thread-safe (`Send + Sync`); one instance is
///   shared by every request.
/// - Updates return `None` when no row has the given id.
/// - Deletes return the number of rows removed; callers are free to ignore it.
pub trait CatalogStore: Send + Sync + 'static {
    /// Round-trip to the database. Used by the readiness probe.
    fn ping(&self) -> impl Future<Output = Result<()>> + Send;

    /// Every category, in the database's natural order.
    fn list_categories(&self) -> impl Future<Output = Result<Vec<Category>>> + Send;

    fn create_category(&self, input: CategoryInput) -> impl Future<Output = Result<Category>> + Send;

    fn update_category(
        &self,
        id: i32,
        input: CategoryInput,
    ) -> impl Future<Output = Result<Option<Category>>> + Send;

    fn delete_category(&self, id: i32) -> impl Future<Output = Result<u64>> + Send;

    /// Products joined with their category, ordered by product id.
    ///
    /// Products without a matching category are not listed.
    fn list_products(&self, page: Page) -> impl Future<Output = Result<Vec<ProductListing>>> + Send;

    fn create_product(&self, input: NewProduct) -> impl Future<Output = Result<Product>> + Send;

    fn update_product(
        &self,
        id: i32,
        input: ProductUpdate,
    ) -> impl Future<Output = Result<Option<Product>>> + Send;

    fn delete_product(&self, id: i32) -> impl Future<Output = Result<u64>> + Send;
}
