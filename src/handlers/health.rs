use axum::{response::Json, routing::get, Router};
use serde_json::json;
use crate::service::OfferService;

pub fn router() -> Router<OfferService> {
    Router::new().route("/health", get(health_check))
}

async fn health_check() -> Json<serde_json::Value> {
    Json(json!({
        "status": "healthy",
        "message": "Ofertas API is healthy"
    }))
}
