pub mod errors;
pub mod offer_repo;

pub use errors::DuplicateOfferError;
pub use offer_repo::OfferRepository;
