//! Products domain module.
//!
//! This crate contains the validation rules for catalog records, implemented
//! purely as deterministic domain logic (no IO, no HTTP, no storage). Raw input
//! goes in; a normalized, validated value or the full list of field errors
//! comes out.

pub mod category;
pub mod product;
pub mod text;

pub use category::{Category, CategoryInput};
pub use product::{Product, ProductDetails, ProductInput};
pub use text::normalize_title;
