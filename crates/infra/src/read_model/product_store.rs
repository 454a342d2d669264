use std::sync::{Arc, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use coop_core::{Entity, ProductId};
use coop_products::{Product, ProductDetails};

/// Ordered product storage.
///
/// Implementations keep insertion order for `list` and never validate: callers
/// only hand over records that already passed validation.
pub trait ProductStore: Send + Sync {
    fn insert(&self, product: Product);
    fn list(&self) -> Vec<Product>;
    fn get(&self, id: &ProductId) -> Option<Product>;
    /// Replace the mutable fields of a stored product, returning the new record
    /// (`None` if `id` is absent).
    fn replace_details(&self, id: &ProductId, details: ProductDetails) -> Option<Product>;
    fn remove(&self, id: &ProductId) -> Option<Product>;
    /// Products (in insertion order) carrying a category matching `name`.
    fn find_by_category(&self, name: &str) -> Vec<Product>;
}

impl<S> ProductStore for Arc<S>
where
    S: ProductStore + ?Sized,
{
    fn insert(&self, product: Product) {
        (**self).insert(product)
    }

    fn list(&self) -> Vec<Product> {
        (**self).list()
    }

    fn get(&self, id: &ProductId) -> Option<Product> {
        (**self).get(id)
    }

    fn replace_details(&self, id: &ProductId, details: ProductDetails) -> Option<Product> {
        (**self).replace_details(id, details)
    }

    fn remove(&self, id: &ProductId) -> Option<Product> {
        (**self).remove(id)
    }

    fn find_by_category(&self, name: &str) -> Vec<Product> {
        (**self).find_by_category(name)
    }
}

/// In-memory store: a `Vec` behind a `RwLock`, searched linearly.
///
/// Contents are lost when the process exits.
#[derive(Debug, Default)]
pub struct InMemoryProductStore {
    inner: RwLock<Vec<Product>>,
}

impl InMemoryProductStore {
    pub fn new() -> Self {
        Self::default()
    }

    // A panic while holding the lock cannot leave a half-written `Product` in
    // the vec, so poisoned guards are safe to reuse.
    fn read(&self) -> RwLockReadGuard<'_, Vec<Product>> {
        self.inner.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, Vec<Product>> {
        self.inner.write().unwrap_or_else(PoisonError::into_inner)
    }
}

impl ProductStore for InMemoryProductStore {
    fn insert(&self, product: Product) {
        self.write().push(product);
    }

    fn list(&self) -> Vec<Product> {
        self.read().clone()
    }

    fn get(&self, id: &ProductId) -> Option<Product> {
        self.read().iter().find(|p| p.id() == id).cloned()
    }

    fn replace_details(&self, id: &ProductId, details: ProductDetails) -> Option<Product> {
        let mut items = self.write();
        let product = items.iter_mut().find(|p| p.id() == id)?;
        product.replace_details(details);
        Some(product.clone())
    }

    fn remove(&self, id: &ProductId) -> Option<Product> {
        let mut items = self.write();
        let pos = items.iter().position(|p| p.id() == id)?;
        Some(items.remove(pos))
    }

    fn find_by_category(&self, name: &str) -> Vec<Product> {
        self.read()
            .iter()
            .filter(|p| p.has_category(name))
            .cloned()
            .collect()
    }
}
