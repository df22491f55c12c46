//! `/categories` handlers.

use std::sync::Arc;

use crate::error::ApiError;
use crate::model::{Category, CategoryInput, Message};
use crate::request::Request;
use crate::response::Json;
use crate::store::CatalogStore;

type Reply<T> = Result<Json<T>, ApiError>;

/// `GET /categories`
pub async fn list<S: CatalogStore>(_req: Request, store: Arc<S>) -> Reply<Vec<Category>> {
    Ok(Json(store.list_categories().await?))
}

/// `POST /categories` with `{name}`; returns the created row.
pub async fn create<S: CatalogStore>(req: Request, store: Arc<S>) -> Reply<Category> {
    let input: CategoryInput = req.json()?;
    Ok(Json(store.create_category(input).await?))
}

/// `PUT /categories/{id}` with `{name}`; returns the row, or `null` when no
/// category has that id.
pub async fn update<S: CatalogStore>(req: Request, store: Arc<S>) -> Reply<Option<Category>> {
    let id: i32 = req.param_as("id")?;
    let input: CategoryInput = req.json()?;
    Ok(Json(store.update_category(id, input).await?))
}

/// `DELETE /categories/{id}`; the message is the same whether or not a row
/// was removed.
pub async fn delete<S: CatalogStore>(req: Request, store: Arc<S>) -> Reply<Message> {
    let id: i32 = req.param_as("id")?;
    store.delete_category(id).await?;
    Ok(Json(Message { message: "Category deleted successfully" }))
}
