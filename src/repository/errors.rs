use thiserror::Error;

#[derive(Debug, Error)]
#[error("Offer with idleilao '{auction_id}' already exists")]
pub struct DuplicateOfferError {
    pub auction_id: i64,
}

impl DuplicateOfferError {
    pub fn new(auction_id: i64) -> Self {
        Self { auction_id }
    }
}
