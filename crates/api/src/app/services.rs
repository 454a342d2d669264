use std::sync::Arc;

use coop_infra::{InMemoryProductStore, ProductCatalog, ProductStore};

pub type SharedCatalog = ProductCatalog<Arc<dyn ProductStore>>;

/// Process-wide services shared by all handlers.
///
/// The catalog lives exactly as long as the process; nothing is persisted.
pub struct AppServices {
    catalog: SharedCatalog,
}

impl AppServices {
    pub fn new(store: Arc<dyn ProductStore>) -> Self {
        Self {
            catalog: ProductCatalog::new(store),
        }
    }

    pub fn in_memory() -> Self {
        Self::new(Arc::new(InMemoryProductStore::new()))
    }

    pub fn catalog(&self) -> &SharedCatalog {
        &self.catalog
    }
}
