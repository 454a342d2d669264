//! Infrastructure layer: product storage and the catalog operations built on it.

pub mod catalog;
pub mod read_model;

pub use catalog::ProductCatalog;
pub use read_model::{InMemoryProductStore, ProductStore};
