//! Client-side filtering over an in-memory offer list.
//!
//! Filters hold the raw strings a user typed. An empty or unparseable value
//! leaves its constraint inactive, and all active constraints must hold.

use std::collections::BTreeSet;
use std::str::FromStr;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::models::Offer;

const DATE_FORMAT: &str = "%Y-%m-%d";

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct OfferFilters {
    #[serde(rename = "bairro")]
    pub neighborhood: String,
    #[serde(rename = "tipoImovel")]
    pub property_type: String,
    #[serde(rename = "tipoLeilao")]
    pub auction_type: String,
    #[serde(rename = "valorMin")]
    pub min_value: String,
    #[serde(rename = "valorMax")]
    pub max_value: String,
    #[serde(rename = "dataInicio")]
    pub start_date: String,
    #[serde(rename = "dataFim")]
    pub end_date: String,
}

impl OfferFilters {
    /// True when no constraint would be applied.
    pub fn is_empty(&self) -> bool {
        Criteria::from(self).is_empty()
    }
}

/// Parsed form of [`OfferFilters`]; `None` means "no constraint".
#[derive(Debug, Default)]
struct Criteria<'a> {
    neighborhood: Option<&'a str>,
    property_type: Option<&'a str>,
    auction_type: Option<&'a str>,
    min_value: Option<Decimal>,
    max_value: Option<Decimal>,
    start_date: Option<NaiveDate>,
    end_date: Option<NaiveDate>,
}

impl<'a> From<&'a OfferFilters> for Criteria<'a> {
    fn from(filters: &'a OfferFilters) -> Self {
        Criteria {
            neighborhood: non_empty(&filters.neighborhood),
            property_type: non_empty(&filters.property_type),
            auction_type: non_empty(&filters.auction_type),
            min_value: parse_value(&filters.min_value),
            max_value: parse_value(&filters.max_value),
            start_date: parse_date(&filters.start_date),
            end_date: parse_date(&filters.end_date),
        }
    }
}

impl Criteria<'_> {
    fn is_empty(&self) -> bool {
        self.neighborhood.is_none()
            && self.property_type.is_none()
            && self.auction_type.is_none()
            && self.min_value.is_none()
            && self.max_value.is_none()
            && self.start_date.is_none()
            && self.end_date.is_none()
    }

    fn matches(&self, offer: &Offer) -> bool {
        // Dates compare at day granularity in UTC.
        let created_on = offer.created_at.date_naive();

        self.neighborhood.map_or(true, |n| offer.neighborhood == n)
            && self.property_type.map_or(true, |t| offer.property_type == t)
            && self.auction_type.map_or(true, |t| offer.auction_type == t)
            && self.min_value.map_or(true, |min| offer.value >= min)
            && self.max_value.map_or(true, |max| offer.value <= max)
            && self.start_date.map_or(true, |start| created_on >= start)
            && self.end_date.map_or(true, |end| created_on <= end)
    }
}

fn non_empty(value: &str) -> Option<&str> {
    (!value.is_empty()).then_some(value)
}

fn parse_value(raw: &str) -> Option<Decimal> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }
    Decimal::from_str(raw)
        .or_else(|_| Decimal::from_scientific(raw))
        .ok()
}

fn parse_date(raw: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(raw.trim(), DATE_FORMAT).ok()
}

/// Returns the offers satisfying every active constraint, in input order.
/// The source slice is left untouched.
pub fn apply_filters(offers: &[Offer], filters: &OfferFilters) -> Vec<Offer> {
    let criteria = Criteria::from(filters);
    offers
        .iter()
        .filter(|offer| criteria.matches(offer))
        .cloned()
        .collect()
}

/// Fields that feed the selector option lists.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OfferField {
    Neighborhood,
    PropertyType,
    AuctionType,
}

impl OfferField {
    fn project(self, offer: &Offer) -> &str {
        match self {
            OfferField::Neighborhood => &offer.neighborhood,
            OfferField::PropertyType => &offer.property_type,
            OfferField::AuctionType => &offer.auction_type,
        }
    }
}

/// Distinct non-empty values of `field`, sorted lexicographically.
pub fn unique_values(offers: &[Offer], field: OfferField) -> Vec<String> {
    offers
        .iter()
        .map(|offer| field.project(offer))
        .filter(|value| !value.is_empty())
        .collect::<BTreeSet<_>>()
        .into_iter()
        .map(str::to_string)
        .collect()
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct FilterOptions {
    #[serde(rename = "bairros")]
    pub neighborhoods: Vec<String>,
    #[serde(rename = "tiposImovel")]
    pub property_types: Vec<String>,
    #[serde(rename = "tiposLeilao")]
    pub auction_types: Vec<String>,
}

impl FilterOptions {
    pub fn from_offers(offers: &[Offer]) -> Self {
        FilterOptions {
            neighborhoods: unique_values(offers, OfferField::Neighborhood),
            property_types: unique_values(offers, OfferField::PropertyType),
            auction_types: unique_values(offers, OfferField::AuctionType),
        }
    }
}
