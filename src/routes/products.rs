//! `/products` handlers.

use std::sync::Arc;

use tracing::debug;

use crate::error::ApiError;
use crate::model::{Message, NewProduct, Product, ProductListing, ProductUpdate};
use crate::page::Page;
use crate::request::Request;
use crate::response::Json;
use crate::store::CatalogStore;

type Reply<T> = Result<Json<T>, ApiError>;

/// `GET /products?page&size`
///
/// Products joined with their category, ordered by id. Bad `page`/`size`
/// values fall back to 1 and 10.
pub async fn list<S: CatalogStore>(req: Request, store: Arc<S>) -> Reply<Vec<ProductListing>> {
    let page = Page::from_request(&req);
    debug!(page = page.page, size = page.size, offset = page.offset(), "listing products");
    Ok(Json(store.list_products(page).await?))
}

/// `POST /products` with `{name, category_id}`.
pub async fn create<S: CatalogStore>(req: Request, store: Arc<S>) -> Reply<Product> {
    let input: NewProduct = req.json()?;
    Ok(Json(store.create_product(input).await?))
}

/// `PUT /products/{id}` with `{product_name, category_id}`; returns the row
/// or `null`.
pub async fn update<S: CatalogStore>(req: Request, store: Arc<S>) -> Reply<Option<Product>> {
    let id: i32 = req.param_as("id")?;
    let input: ProductUpdate = req.json()?;
    Ok(Json(store.update_product(id, input).await?))
}

/// `DELETE /products/{id}`
pub async fn delete<S: CatalogStore>(req: Request, store: Arc<S>) -> Reply<Message> {
    let id: i32 = req.param_as("id")?;
    store.delete_product(id).await?;
    Ok(Json(Message { message: "Product deleted successfully" }))
}
