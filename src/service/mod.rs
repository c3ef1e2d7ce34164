pub mod offer_service;

pub use offer_service::OfferService;
