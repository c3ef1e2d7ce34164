pub mod health;
pub mod offer;
