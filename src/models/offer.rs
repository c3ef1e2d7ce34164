use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

/// One auction listing. Field names on the wire and in the table follow the
/// `ofertasleiloesimoveis` columns.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct Offer {
    pub id: i64,
    #[serde(rename = "idleilao")]
    #[sqlx(rename = "idleilao")]
    pub auction_id: i64,
    #[serde(rename = "bairro")]
    #[sqlx(rename = "bairro")]
    pub neighborhood: String,
    #[serde(rename = "tipoimovel")]
    #[sqlx(rename = "tipoimovel")]
    pub property_type: String,
    #[serde(rename = "tipoleilao")]
    #[sqlx(rename = "tipoleilao")]
    pub auction_type: String,
    #[serde(rename = "descricao")]
    #[sqlx(rename = "descricao")]
    pub description: String,
    #[serde(rename = "valor")]
    #[sqlx(rename = "valor")]
    pub value: Decimal,
    #[serde(rename = "endereco")]
    #[sqlx(rename = "endereco")]
    pub address: String,
    #[serde(rename = "favorito", with = "favorite_flag")]
    #[sqlx(rename = "favorito")]
    pub is_favorite: bool,
    pub link: String,
    #[serde(rename = "datacriacao")]
    #[sqlx(rename = "datacriacao")]
    pub created_at: DateTime<Utc>,
}

/// Result of a favorite toggle: the offer id and its post-toggle flag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct FavoriteToggle {
    pub id: i64,
    #[serde(rename = "favorito", with = "favorite_flag")]
    #[sqlx(rename = "favorito")]
    pub is_favorite: bool,
}

/// Insertion payload used by ingestion. `created_at` defaults to the store's
/// clock when absent.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct NewOffer {
    #[serde(rename = "idleilao")]
    #[validate(range(min = 1, message = "idleilao must be positive"))]
    pub auction_id: i64,
    #[serde(rename = "bairro")]
    #[validate(length(min = 1, max = 120))]
    pub neighborhood: String,
    #[serde(rename = "tipoimovel")]
    #[validate(length(min = 1, max = 60))]
    pub property_type: String,
    #[serde(rename = "tipoleilao")]
    #[validate(length(min = 1, max = 60))]
    pub auction_type: String,
    #[serde(rename = "descricao")]
    #[validate(length(min = 1, max = 255))]
    pub description: String,
    #[serde(rename = "valor")]
    pub value: Decimal,
    #[serde(rename = "endereco")]
    #[validate(length(min = 1, max = 255))]
    pub address: String,
    #[validate(url, length(max = 512))]
    pub link: String,
    #[serde(rename = "datacriacao", default)]
    pub created_at: Option<DateTime<Utc>>,
}

/// `favorito` travels as `0`/`1`; `true`/`false` is accepted on input.
mod favorite_flag {
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S>(value: &bool, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_u8(u8::from(*value))
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<bool, D::Error>
    where
        D: Deserializer<'de>,
    {
        use serde::de::Error;

        #[derive(Deserialize)]
        #[serde(untagged)]
        enum FlagOrInt {
            Flag(bool),
            Int(i64),
        }

        match FlagOrInt::deserialize(deserializer)? {
            FlagOrInt::Flag(flag) => Ok(flag),
            FlagOrInt::Int(0) => Ok(false),
            FlagOrInt::Int(1) => Ok(true),
            FlagOrInt::Int(other) => Err(D::Error::custom(format!(
                "Invalid favorito value: {}",
                other
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use serde_json::json;

    fn sample_offer() -> Offer {
        Offer {
            id: 1,
            auction_id: 42,
            neighborhood: "Centro".to_string(),
            property_type: "Apartamento".to_string(),
            auction_type: "Judicial".to_string(),
            description: "Apartamento 2 quartos".to_string(),
            value: Decimal::new(10_000_000, 2),
            address: "Rua Direita, 10".to_string(),
            is_favorite: false,
            link: "https://leiloes.example.com/42".to_string(),
            created_at: Utc.with_ymd_and_hms(2024, 3, 1, 12, 0, 0).unwrap(),
        }
    }

    #[test]
    fn offer_serializes_with_column_names() {
        let value = serde_json::to_value(sample_offer()).unwrap();
        assert_eq!(value["idleilao"], 42);
        assert_eq!(value["bairro"], "Centro");
        assert_eq!(value["valor"], "100000.00");
        assert_eq!(value["favorito"], 0);
        assert_eq!(value["datacriacao"], "2024-03-01T12:00:00Z");
    }

    #[test]
    fn favorite_flag_accepts_integers_and_booleans() {
        let from_int: FavoriteToggle =
            serde_json::from_value(json!({ "id": 3, "favorito": 1 })).unwrap();
        let from_bool: FavoriteToggle =
            serde_json::from_value(json!({ "id": 3, "favorito": false })).unwrap();
        assert!(from_int.is_favorite);
        assert!(!from_bool.is_favorite);

        let invalid = serde_json::from_value::<FavoriteToggle>(json!({ "id": 3, "favorito": 2 }));
        assert!(invalid.is_err());
    }

    #[test]
    fn toggle_serializes_flag_as_integer() {
        let toggle = FavoriteToggle {
            id: 9,
            is_favorite: true,
        };
        assert_eq!(
            serde_json::to_value(toggle).unwrap(),
            json!({ "id": 9, "favorito": 1 })
        );
    }

    #[test]
    fn new_offer_validation_enforces_column_limits() {
        let mut new_offer = NewOffer {
            auction_id: 42,
            neighborhood: "Centro".to_string(),
            property_type: "Casa".to_string(),
            auction_type: "Extrajudicial".to_string(),
            description: "Casa térrea".to_string(),
            value: Decimal::new(9_000_000, 2),
            address: "Av. Brasil, 100".to_string(),
            link: "https://leiloes.example.com/42".to_string(),
            created_at: None,
        };
        assert!(new_offer.validate().is_ok());

        new_offer.neighborhood = "x".repeat(121);
        assert!(new_offer.validate().is_err());

        new_offer.neighborhood = "Centro".to_string();
        new_offer.link = "not a url".to_string();
        assert!(new_offer.validate().is_err());
    }
}
