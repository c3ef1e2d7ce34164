use axum::{
    extract::{Path, State},
    response::Json,
    routing::{get, patch},
    Router,
};

use crate::constants::API_NAME;
use crate::error::AppError;
use crate::models::{FavoriteToggle, Offer};
use crate::service::OfferService;

pub fn router() -> Router<OfferService> {
    Router::new()
        .route("/", get(list_offers))
        .route("/:id/favorito", patch(toggle_favorite))
}

async fn list_offers(
    State(service): State<OfferService>,
) -> Result<Json<Vec<Offer>>, AppError> {
    let offers = service.list_offers().await?;
    Ok(Json(offers))
}

async fn toggle_favorite(
    State(service): State<OfferService>,
    Path(raw_id): Path<String>,
) -> Result<Json<FavoriteToggle>, AppError> {
    let id = parse_offer_id(&raw_id)?;

    tracing::info!("{} Toggling favorito for offer {}", API_NAME, id);

    let toggle = service.toggle_favorite(id).await?;
    Ok(Json(toggle))
}

fn parse_offer_id(raw: &str) -> Result<i64, AppError> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Err(AppError::Validation("Offer id is required".to_string()));
    }
    match raw.parse::<i64>() {
        Ok(id) if id > 0 => Ok(id),
        _ => Err(AppError::Validation(format!("Invalid offer id: {}", raw))),
    }
}
