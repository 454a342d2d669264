use std::sync::Arc;

use axum::{
    extract::{rejection::JsonRejection, Extension, Path},
    http::StatusCode,
    response::IntoResponse,
    routing::get,
    Json, Router,
};

use coop_core::ProductId;

use crate::app::{dto, errors};
use crate::app::services::AppServices;

pub fn router() -> Router {
    Router::new()
        .route("/products", get(list_products).post(create_product))
        .route("/products/", get(list_products).post(create_product))
        .route("/products/category/:name", get(products_by_category))
        .route(
            "/products/:id",
            get(get_product).put(update_product).delete(delete_product),
        )
}

pub async fn create_product(
    Extension(services): Extension<Arc<AppServices>>,
    body: Result<Json<dto::ProductRequest>, JsonRejection>,
) -> axum::response::Response {
    let Json(body) = match body {
        Ok(b) => b,
        Err(rejection) => return errors::json_rejection_to_response(rejection),
    };

    match services.catalog().create(body.into()) {
        Ok(product) => (
            StatusCode::CREATED,
            Json(dto::ProductResponse::from(&product)),
        )
            .into_response(),
        Err(e) => errors::domain_error_to_response(e),
    }
}

pub async fn list_products(
    Extension(services): Extension<Arc<AppServices>>,
) -> axum::response::Response {
    let items = dto::products_to_response(&services.catalog().list());
    (StatusCode::OK, Json(items)).into_response()
}

pub async fn get_product(
    Extension(services): Extension<Arc<AppServices>>,
    Path(id): Path<String>,
) -> axum::response::Response {
    let result = id
        .parse::<ProductId>()
        .and_then(|id| services.catalog().get(&id));

    match result {
        Ok(product) => (StatusCode::OK, Json(dto::ProductResponse::from(&product))).into_response(),
        Err(e) => errors::domain_error_to_response(e),
    }
}

pub async fn update_product(
    Extension(services): Extension<Arc<AppServices>>,
    Path(id): Path<String>,
    body: Result<Json<dto::ProductRequest>, JsonRejection>,
) -> axum::response::Response {
    let id: ProductId = match id.parse() {
        Ok(v) => v,
        Err(e) => return errors::domain_error_to_response(e),
    };

    // An unknown id wins over a malformed body; a well-formed body gets the
    // existence check inside `update`.
    let Json(body) = match body {
        Ok(b) => b,
        Err(rejection) => {
            return match services.catalog().get(&id) {
                Ok(_) => errors::json_rejection_to_response(rejection),
                Err(e) => errors::domain_error_to_response(e),
            };
        }
    };

    match services.catalog().update(&id, body.into()) {
        Ok(product) => (StatusCode::OK, Json(dto::ProductResponse::from(&product))).into_response(),
        Err(e) => errors::domain_error_to_response(e),
    }
}

pub async fn delete_product(
    Extension(services): Extension<Arc<AppServices>>,
    Path(id): Path<String>,
) -> axum::response::Response {
    let result = id
        .parse::<ProductId>()
        .and_then(|id| services.catalog().delete(&id));

    match result {
        Ok(removed) => (
            StatusCode::OK,
            Json(serde_json::json!({
                "message": "product deleted",
                "id": removed.id_typed().to_string(),
            })),
        )
            .into_response(),
        Err(e) => errors::domain_error_to_response(e),
    }
}

pub async fn products_by_category(
    Extension(services): Extension<Arc<AppServices>>,
    Path(name): Path<String>,
) -> axum::response::Response {
    let items = dto::products_to_response(&services.catalog().by_category(&name));
    (StatusCode::OK, Json(items)).into_response()
}
