use axum::{http::StatusCode, response::IntoResponse, Json};

pub const API_TITLE: &str = "Agricultural Cooperative API";

pub async fn health() -> StatusCode {
    StatusCode::OK
}

pub async fn root() -> impl IntoResponse {
    Json(serde_json::json!({
        "message": "Agricultural cooperative product registry",
        "title": API_TITLE,
        "version": env!("CARGO_PKG_VERSION"),
    }))
}
