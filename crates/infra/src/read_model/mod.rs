//! Process-memory product storage.

pub mod product_store;

pub use product_store::{InMemoryProductStore, ProductStore};
