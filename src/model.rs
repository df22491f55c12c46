//! Rows and request bodies.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A row of `categories`.
#[derive(Clone, Debug, Serialize, Deserialize, FromRow, PartialEq, Eq)]
pub struct Category {
    pub id: i32,
    pub name: String,
}

/// A row of `products`.
#[derive(Clone, Debug, Serialize, Deserialize, FromRow, PartialEq, Eq)]
pub struct Product {
    pub id: i32,
    pub name: String,
    pub category_id: Option<i32>,
}

/// A product joined with its category, as returned by the paginated listing.
#[derive(Clone, Debug, Serialize, Deserialize, FromRow, PartialEq, Eq)]
pub struct ProductListing {
    pub product_id: i32,
    pub product_name: String,
    pub category_id: i32,
    pub category_name: String,
}

/// Body of `POST /categories` and `PUT /categories/{id}`.
///
/// Fields are optional so a missing name reaches the database as `NULL` and
/// is rejected by its `NOT NULL` constraint.
#[derive(Clone, Debug, Default, Deserialize, PartialEq, Eq)]
pub struct CategoryInput {
    pub name: Option<String>,
}

/// Body of `POST /products`.
#[derive(Clone, Debug, Default, Deserialize, PartialEq, Eq)]
pub struct NewProduct {
    pub name: Option<String>,
    pub category_id: Option<i32>,
}

/// Body of `PUT /products/{id}`.
///
/// Clients have always sent `product_name` here (unlike `name` on create);
/// `name` is accepted too, and loses when both are present.
#[derive(Clone, Debug, Default, Deserialize, PartialEq, Eq)]
pub struct ProductUpdate {
    pub product_name: Option<String>,
    pub name: Option<String>,
    pub category_id: Option<i32>,
}

impl ProductUpdate {
    /// The name to store: `product_name`, else `name`.
    pub fn new_name(&self) -> Option<&str> {
        self.product_name.as_deref().or(self.name.as_deref())
    }
}

/// Fixed body returned by the delete endpoints.
#[derive(Debug, Serialize)]
pub struct Message {
    pub message: &'static str,
}
