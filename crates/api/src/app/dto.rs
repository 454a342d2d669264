use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use coop_products::{Category, CategoryInput, Product, ProductInput};

// -------------------------
// Request DTOs
// -------------------------

/// Category as submitted; the Spanish field names are accepted as aliases.
#[derive(Debug, Deserialize)]
pub struct CategoryRequest {
    #[serde(alias = "nombre")]
    pub name: String,
    #[serde(default, alias = "descripcion")]
    pub description: Option<String>,
}

/// Body of `POST /products/` and `PUT /products/{id}`. Any `id` or
/// `created_at` sent by the client is ignored.
#[derive(Debug, Deserialize)]
pub struct ProductRequest {
    #[serde(alias = "nombre")]
    pub name: String,
    #[serde(alias = "precio")]
    pub price: f64,
    #[serde(alias = "categorias")]
    pub categories: Vec<CategoryRequest>,
    pub stock: i64,
}

impl From<CategoryRequest> for CategoryInput {
    fn from(value: CategoryRequest) -> Self {
        Self {
            name: value.name,
            description: value.description,
        }
    }
}

impl From<ProductRequest> for ProductInput {
    fn from(value: ProductRequest) -> Self {
        Self {
            name: value.name,
            price: value.price,
            categories: value.categories.into_iter().map(Into::into).collect(),
            stock: value.stock,
        }
    }
}

// -------------------------
// Response DTOs
// -------------------------

#[derive(Debug, Serialize)]
pub struct CategoryResponse {
    pub name: String,
    pub description: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct ProductResponse {
    pub id: String,
    pub name: String,
    #[serde(with = "rust_decimal::serde::float")]
    pub price: Decimal,
    pub categories: Vec<CategoryResponse>,
    pub stock: u32,
    pub created_at: DateTime<Utc>,
}

impl From<&Category> for CategoryResponse {
    fn from(value: &Category) -> Self {
        Self {
            name: value.name().to_string(),
            description: value.description().map(str::to_string),
        }
    }
}

impl From<&Product> for ProductResponse {
    fn from(value: &Product) -> Self {
        Self {
            id: value.id_typed().to_string(),
            name: value.name().to_string(),
            price: value.price(),
            categories: value.categories().iter().map(Into::into).collect(),
            stock: value.stock(),
            created_at: value.created_at(),
        }
    }
}

pub fn products_to_response(products: &[Product]) -> Vec<ProductResponse> {
    products.iter().map(ProductResponse::from).collect()
}
