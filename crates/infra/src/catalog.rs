//! Product catalog operations.
//!
//! `ProductCatalog` is the single entry point for mutating or querying the
//! catalog. Every write validates first and touches the store only once the
//! input is known good, so a failed call never leaves a partial change behind.

use chrono::{DateTime, Utc};

use coop_core::{DomainError, DomainResult, ProductId};
use coop_products::{Product, ProductDetails, ProductInput};

use crate::read_model::ProductStore;

#[derive(Debug, Clone)]
pub struct ProductCatalog<S> {
    store: S,
}

impl<S> ProductCatalog<S>
where
    S: ProductStore,
{
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// Validate `input`, assign a fresh id and the current time, and append.
    pub fn create(&self, input: ProductInput) -> DomainResult<Product> {
        self.create_at(input, Utc::now())
    }

    /// Same as [`create`](Self::create) with an explicit creation timestamp.
    pub fn create_at(&self, input: ProductInput, now: DateTime<Utc>) -> DomainResult<Product> {
        let details = ProductDetails::parse(input).map_err(|errors| {
            tracing::debug!(%errors, "product create rejected");
            DomainError::from(errors)
        })?;

        let product = Product::new(ProductId::new(), details, now);
        self.store.insert(product.clone());
        tracing::info!(product_id = %product.id_typed(), name = product.name(), "product created");
        Ok(product)
    }

    pub fn list(&self) -> Vec<Product> {
        self.store.list()
    }

    pub fn get(&self, id: &ProductId) -> DomainResult<Product> {
        self.store.get(id).ok_or_else(DomainError::not_found)
    }

    /// Full replacement of the mutable fields. An absent id is reported
    /// before the payload is looked at.
    pub fn update(&self, id: &ProductId, input: ProductInput) -> DomainResult<Product> {
        self.get(id)?;

        let details = ProductDetails::parse(input).map_err(|errors| {
            tracing::debug!(product_id = %id, %errors, "product update rejected");
            DomainError::from(errors)
        })?;

        let product = self
            .store
            .replace_details(id, details)
            .ok_or_else(DomainError::not_found)?;
        tracing::info!(product_id = %id, "product updated");
        Ok(product)
    }

    pub fn delete(&self, id: &ProductId) -> DomainResult<Product> {
        let removed = self.store.remove(id).ok_or_else(DomainError::not_found)?;
        tracing::info!(product_id = %id, "product deleted");
        Ok(removed)
    }

    /// Products carrying a category whose normalized name matches `name`.
    /// No match is an empty list, not an error.
    pub fn by_category(&self, name: &str) -> Vec<Product> {
        self.store.find_by_category(name)
    }
}
