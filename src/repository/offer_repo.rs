use crate::models::{FavoriteToggle, NewOffer, Offer};
use sqlx::PgPool;

const OFFER_COLUMNS: &str = "id, idleilao, bairro, tipoimovel, tipoleilao, descricao, valor, \
                             endereco, favorito, link, datacriacao";

#[derive(Clone)]
pub struct OfferRepository {
    pool: PgPool,
}

impl OfferRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Creates the offers table if it is absent. Safe to run on every start.
    pub async fn bootstrap(&self) -> Result<(), sqlx::migrate::MigrateError> {
        sqlx::migrate!("./migrations").run(&self.pool).await
    }

    /// Newest first; rows sharing a timestamp keep insertion order.
    pub async fn find_all(&self) -> Result<Vec<Offer>, sqlx::Error> {
        let query = format!(
            "SELECT {} FROM ofertasleiloesimoveis ORDER BY datacriacao DESC, id ASC",
            OFFER_COLUMNS
        );
        sqlx::query_as::<_, Offer>(&query)
            .fetch_all(&self.pool)
            .await
    }

    pub async fn find_by_id(&self, id: i64) -> Result<Option<Offer>, sqlx::Error> {
        let query = format!(
            "SELECT {} FROM ofertasleiloesimoveis WHERE id = $1",
            OFFER_COLUMNS
        );
        sqlx::query_as::<_, Offer>(&query)
            .bind(id)
            .fetch_optional(&self.pool)
            .await
    }

    /// Negates `favorito` in a single statement so the row lock serializes
    /// concurrent toggles. `None` means no row matched.
    pub async fn toggle_favorite(&self, id: i64) -> Result<Option<FavoriteToggle>, sqlx::Error> {
        sqlx::query_as::<_, FavoriteToggle>(
            "UPDATE ofertasleiloesimoveis SET favorito = NOT favorito WHERE id = $1 RETURNING id, favorito",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
    }

    pub async fn insert(&self, offer: &NewOffer) -> Result<Offer, sqlx::Error> {
        let query = format!(
            "INSERT INTO ofertasleiloesimoveis \
             (idleilao, bairro, tipoimovel, tipoleilao, descricao, valor, endereco, link, datacriacao) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, COALESCE($9::timestamptz, NOW())) \
             RETURNING {}",
            OFFER_COLUMNS
        );
        sqlx::query_as::<_, Offer>(&query)
            .bind(offer.auction_id)
            .bind(&offer.neighborhood)
            .bind(&offer.property_type)
            .bind(&offer.auction_type)
            .bind(&offer.description)
            .bind(offer.value)
            .bind(&offer.address)
            .bind(&offer.link)
            .bind(offer.created_at)
            .fetch_one(&self.pool)
            .await
    }

    pub async fn count_by_auction_id(&self, auction_id: i64) -> Result<i64, sqlx::Error> {
        sqlx::query_scalar::<_, i64>(
            "SELECT COUNT(*) FROM ofertasleiloesimoveis WHERE idleilao = $1",
        )
        .bind(auction_id)
        .fetch_one(&self.pool)
        .await
    }

    pub fn check_duplicate_error(err: &sqlx::Error) -> Option<String> {
        if let sqlx::Error::Database(db_err) = err {
            if db_err.code().as_deref() == Some("23505") {
                return Some(db_err.message().to_string());
            }
        }
        None
    }
}
