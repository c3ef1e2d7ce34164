//! Consumer side of the API: an HTTP client for the offer endpoints and the
//! in-memory list a UI keeps between requests.

use reqwest::StatusCode;
use thiserror::Error;

use crate::filters::{apply_filters, FilterOptions, OfferFilters};
use crate::models::{FavoriteToggle, Offer};

pub const DEFAULT_API_BASE_URL: &str = "http://localhost:3001/api";

#[derive(Debug, Error)]
pub enum ClientError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Offer {id} not found")]
    NotFound { id: i64 },

    #[error("Unexpected status {status}: {message}")]
    Status { status: StatusCode, message: String },
}

#[derive(Clone)]
pub struct OffersClient {
    http: reqwest::Client,
    base_url: String,
}

impl OffersClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self::with_client(reqwest::Client::new(), base_url)
    }

    pub fn with_client(http: reqwest::Client, base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self { http, base_url }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub async fn list_offers(&self) -> Result<Vec<Offer>, ClientError> {
        let response = self
            .http
            .get(format!("{}/ofertas", self.base_url))
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(status_error(response).await);
        }
        Ok(response.json().await?)
    }

    pub async fn toggle_favorite(&self, id: i64) -> Result<FavoriteToggle, ClientError> {
        let response = self
            .http
            .patch(format!("{}/ofertas/{}/favorito", self.base_url, id))
            .send()
            .await?;

        match response.status() {
            status if status.is_success() => Ok(response.json().await?),
            StatusCode::NOT_FOUND => Err(ClientError::NotFound { id }),
            _ => Err(status_error(response).await),
        }
    }
}

async fn status_error(response: reqwest::Response) -> ClientError {
    let status = response.status();
    let message = response.text().await.unwrap_or_default();
    tracing::warn!("Offers API returned {}: {}", status, message);
    ClientError::Status { status, message }
}

/// The consumer's copy of the offer list.
#[derive(Debug, Clone, Default)]
pub struct OfferBook {
    offers: Vec<Offer>,
}

impl OfferBook {
    pub fn new(offers: Vec<Offer>) -> Self {
        let mut book = Self::default();
        book.replace(offers);
        book
    }

    /// Replaces the list with a fresh fetch, newest first. The sort is stable
    /// so equal timestamps keep the order the server sent.
    pub fn replace(&mut self, mut offers: Vec<Offer>) {
        offers.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        self.offers = offers;
    }

    /// Writes a server-confirmed toggle into the matching row. Returns false
    /// when the id is not in the list.
    pub fn apply_toggle(&mut self, toggle: &FavoriteToggle) -> bool {
        match self.offers.iter_mut().find(|offer| offer.id == toggle.id) {
            Some(offer) => {
                offer.is_favorite = toggle.is_favorite;
                true
            }
            None => false,
        }
    }

    pub fn offers(&self) -> &[Offer] {
        &self.offers
    }

    pub fn visible(&self, filters: &OfferFilters) -> Vec<Offer> {
        apply_filters(&self.offers, filters)
    }

    pub fn options(&self) -> FilterOptions {
        FilterOptions::from_offers(&self.offers)
    }

    pub fn favorites(&self) -> impl Iterator<Item = &Offer> {
        self.offers.iter().filter(|offer| offer.is_favorite)
    }

    /// Fetches the current list from the API into the book.
    pub async fn refresh(&mut self, client: &OffersClient) -> Result<usize, ClientError> {
        let offers = client.list_offers().await?;
        self.replace(offers);
        Ok(self.offers.len())
    }

    /// Toggles `id` through the API and mirrors the result locally.
    pub async fn toggle(
        &mut self,
        client: &OffersClient,
        id: i64,
    ) -> Result<FavoriteToggle, ClientError> {
        let toggle = client.toggle_favorite(id).await?;
        self.apply_toggle(&toggle);
        Ok(toggle)
    }
}
