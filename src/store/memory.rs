//! In-memory store with the same constraints as the PostgreSQL schema.
//!
//! Mirrors what the database enforces so handler tests observe the same
//! outcomes: serial ids that are never reused (a failed insert still burns
//! one), `NOT NULL` names of at most 50 characters, and the
//! `products.category_id` foreign key in both directions.

use std::collections::BTreeMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Mutex, MutexGuard, PoisonError};

use super::{CatalogStore, Result};
use crate::error::StoreError;
use crate::model::{Category, CategoryInput, NewProduct, Product, ProductListing, ProductUpdate};
use crate::page::Page;

const NAME_MAX_CHARS: usize = 50;
const PRODUCTS_FKEY: &str = "products_category_id_fkey";

#[derive(Default)]
struct Tables {
    categories: BTreeMap<i32, String>,
    products: BTreeMap<i32, (String, Option<i32>)>,
    category_seq: i32,
    product_seq: i32,
}

/// A [`CatalogStore`] held entirely in memory.
#[derive(Default)]
pub struct MemoryStore {
    tables: Mutex<Tables>,
    unavailable: AtomicBool,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Makes every following call fail as if the database were unreachable.
    pub fn set_unavailable(&self, unavailable: bool) {
        self.unavailable.store(unavailable, Ordering::SeqCst);
    }

    /// Inserts a product row without the foreign-key check, producing the
    /// orphaned rows a database can hold after constraints were added late.
    pub fn insert_orphan_product(&self, name: &str, category_id: i32) -> Product {
        let mut t = self.lock();
        t.product_seq += 1;
        let id = t.product_seq;
        t.products.insert(id, (name.to_owned(), Some(category_id)));
        Product { id, name: name.to_owned(), category_id: Some(category_id) }
    }

    fn lock(&self) -> MutexGuard<'_, Tables> {
        self.tables.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn tables(&self) -> Result<MutexGuard<'_, Tables>> {
        if self.unavailable.load(Ordering::SeqCst) {
            return Err(StoreError::Unavailable("connection refused".into()));
        }
        Ok(self.lock())
    }
}

fn check_name(name: Option<String>, table: &str) -> Result<String> {
    let name = name.ok_or_else(|| {
        StoreError::Invalid(format!(
            "null value in column \"name\" of relation \"{table}\" violates not-null constraint"
        ))
    })?;
    if name.chars().count() > NAME_MAX_CHARS {
        return Err(StoreError::Invalid(format!(
            "value too long for type character varying({NAME_MAX_CHARS})"
        )));
    }
    Ok(name)
}

fn check_category_ref(t: &Tables, category_id: Option<i32>) -> Result<()> {
    match category_id {
        Some(id) if !t.categories.contains_key(&id) => Err(StoreError::Conflict(format!(
            "insert or update on table \"products\" violates foreign key constraint \"{PRODUCTS_FKEY}\""
        ))),
        _ => Ok(()),
    }
}

impl CatalogStore for MemoryStore {
    async fn ping(&self) -> Result<()> {
        self.tables().map(drop)
    }

    async fn list_categories(&self) -> Result<Vec<Category>> {
        let t = self.tables()?;
        Ok(t.categories.iter()
            .map(|(id, name)| Category { id: *id, name: name.clone() })
            .collect())
    }

    async fn create_category(&self, input: CategoryInput) -> Result<Category> {
        let mut t = self.tables()?;
        t.category_seq += 1;
        let id = t.category_seq;
        let name = check_name(input.name, "categories")?;
        t.categories.insert(id, name.clone());
        Ok(Category { id, name })
    }

    async fn update_category(&self, id: i32, input: CategoryInput) -> Result<Option<Category>> {
        let mut t = self.tables()?;
        if !t.categories.contains_key(&id) {
            return Ok(None);
        }
        let name = check_name(input.name, "categories")?;
        t.categories.insert(id, name.clone());
        Ok(Some(Category { id, name }))
    }

    async fn delete_category(&self, id: i32) -> Result<u64> {
        let mut t = self.tables()?;
        if t.products.values().any(|(_, category_id)| *category_id == Some(id)) {
            return Err(StoreError::Conflict(format!(
                "update or delete on table \"categories\" violates foreign key constraint \
                 \"{PRODUCTS_FKEY}\" on table \"products\""
            )));
        }
        Ok(u64::from(t.categories.remove(&id).is_some()))
    }

    async fn list_products(&self, page: Page) -> Result<Vec<ProductListing>> {
        let t = self.tables()?;
        let skip = usize::try_from(page.offset()).unwrap_or(usize::MAX);
        let take = usize::try_from(page.size).unwrap_or(usize::MAX);
        Ok(t.products.iter()
            .filter_map(|(id, (name, category_id))| {
                let category_id = (*category_id)?;
                let category_name = t.categories.get(&category_id)?;
                Some(ProductListing {
                    product_id: *id,
                    product_name: name.clone(),
                    category_id,
                    category_name: category_name.clone(),
                })
            })
            .skip(skip)
            .take(take)
            .collect())
    }

    async fn create_product(&self, input: NewProduct) -> Result<Product> {
        let mut t = self.tables()?;
        t.product_seq += 1;
        let id = t.product_seq;
        let name = check_name(input.name, "products")?;
        check_category_ref(&t, input.category_id)?;
        t.products.insert(id, (name.clone(), input.category_id));
        Ok(Product { id, name, category_id: input.category_id })
    }

    async fn update_product(&self, id: i32, input: ProductUpdate) -> Result<Option<Product>> {
        let mut t = self.tables()?;
        if !t.products.contains_key(&id) {
            return Ok(None);
        }
        let name = check_name(input.new_name().map(str::to_owned), "products")?;
        check_category_ref(&t, input.category_id)?;
        t.products.insert(id, (name.clone(), input.category_id));
        Ok(Some(Product { id, name, category_id: input.category_id }))
    }

    async fn delete_product(&self, id: i32) -> Result<u64> {
        let mut t = self.tables()?;
        Ok(u64::from(t.products.remove(&id).is_some()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn named(name: &str) -> CategoryInput {
        CategoryInput { name: Some(name.to_owned()) }
    }

    #[tokio::test]
    async fn failed_insert_still_consumes_an_id() {
        let store = MemoryStore::new();
        assert!(store.create_category(CategoryInput::default()).await.is_err());
        let created = store.create_category(named("Tools")).await.unwrap();
        assert_eq!(created.id, 2);
    }

    #[tokio::test]
    async fn names_longer_than_fifty_chars_are_rejected() {
        let store = MemoryStore::new();
        let long = "x".repeat(51);
        assert!(matches!(
            store.create_category(named(&long)).await,
            Err(StoreError::Invalid(_))
        ));
        assert!(store.create_category(named(&"x".repeat(50))).await.is_ok());
    }

    #[tokio::test]
    async fn referenced_category_cannot_be_deleted() {
        let store = MemoryStore::new();
        let cat = store.create_category(named("Garden")).await.unwrap();
        store
            .create_product(NewProduct { name: Some("Hose".into()), category_id: Some(cat.id) })
            .await
            .unwrap();
        assert!(matches!(store.delete_category(cat.id).await, Err(StoreError::Conflict(_))));
    }

    #[tokio::test]
    async fn unavailable_store_fails_every_call() {
        let store = MemoryStore::new();
        store.set_unavailable(true);
        assert!(matches!(store.ping().await, Err(StoreError::Unavailable(_))));
        store.set_unavailable(false);
        assert!(store.ping().await.is_ok());
    }
}
