use crate::constants::API_NAME;
use crate::error::AppError;
use crate::models::{FavoriteToggle, NewOffer, Offer};
use crate::repository::{DuplicateOfferError, OfferRepository};
use validator::Validate;

#[derive(Clone)]
pub struct OfferService {
    offer_repo: OfferRepository,
}

impl OfferService {
    pub fn new(offer_repo: OfferRepository) -> Self {
        Self { offer_repo }
    }

    pub async fn list_offers(&self) -> Result<Vec<Offer>, AppError> {
        let offers = self.offer_repo.find_all().await.map_err(|e| {
            tracing::error!(operation = "list_offers", error = %e, "{} Failed to list offers", API_NAME);
            AppError::StoreUnavailable(e)
        })?;

        tracing::debug!("{} Listed {} offers", API_NAME, offers.len());
        Ok(offers)
    }

    pub async fn get_offer(&self, id: i64) -> Result<Offer, AppError> {
        self.offer_repo
            .find_by_id(id)
            .await
            .map_err(|e| {
                tracing::error!(operation = "get_offer", id, error = %e, "{} Failed to load offer", API_NAME);
                AppError::StoreUnavailable(e)
            })?
            .ok_or_else(|| AppError::NotFound(format!("Offer {} not found", id)))
    }

    /// Flips the favorite flag of offer `id` and returns the post-toggle value.
    pub async fn toggle_favorite(&self, id: i64) -> Result<FavoriteToggle, AppError> {
        let toggled = self.offer_repo.toggle_favorite(id).await.map_err(|e| {
            tracing::error!(operation = "toggle_favorite", id, error = %e, "{} Failed to toggle favorite", API_NAME);
            AppError::StoreUnavailable(e)
        })?;

        match toggled {
            Some(toggle) => {
                tracing::info!(
                    "{} Offer {} favorito changed to {}",
                    API_NAME,
                    toggle.id,
                    u8::from(toggle.is_favorite)
                );
                Ok(toggle)
            }
            None => {
                tracing::warn!(operation = "toggle_favorite", id, "{} Offer not found", API_NAME);
                Err(AppError::NotFound(format!("Offer {} not found", id)))
            }
        }
    }

    /// Validates and stores a new offer. A repeated `idleilao` is rejected.
    pub async fn create_offer(&self, new_offer: NewOffer) -> Result<Offer, AppError> {
        new_offer
            .validate()
            .map_err(|e| AppError::Validation(e.to_string()))?;

        let auction_id = new_offer.auction_id;
        let offer = self.offer_repo.insert(&new_offer).await.map_err(|e| {
            if OfferRepository::check_duplicate_error(&e).is_some() {
                let duplicate = DuplicateOfferError::new(auction_id);
                tracing::warn!(operation = "create_offer", auction_id, "{} {}", API_NAME, duplicate);
                AppError::Conflict(duplicate.to_string())
            } else {
                tracing::error!(operation = "create_offer", auction_id, error = %e, "{} Failed to insert offer", API_NAME);
                AppError::StoreUnavailable(e)
            }
        })?;

        tracing::info!("{} Created offer {} for idleilao {}", API_NAME, offer.id, auction_id);
        Ok(offer)
    }
}
