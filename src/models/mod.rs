pub mod offer;

pub use offer::{FavoriteToggle, NewOffer, Offer};
