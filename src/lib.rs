pub mod client;
pub mod config;
pub mod constants;
pub mod error;
pub mod filters;
pub mod handlers;
pub mod models;
pub mod repository;
pub mod service;

use axum::{routing::get, Router};
use handlers::{health, offer};
use service::OfferService;
use tower_http::cors::CorsLayer;

/// Builds the HTTP application around an already constructed service.
pub fn app(service: OfferService) -> Router {
    Router::new()
        .route("/", get(|| async { "Backend do Leilão de Imóveis está rodando!" }))
        .nest("/api/ofertas", offer::router())
        .nest("/api", health::router())
        .layer(CorsLayer::permissive())
        .with_state(service)
}
