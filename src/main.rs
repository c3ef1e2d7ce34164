use anyhow::Context;
use ofertas_api::{
    app, config::Config, constants::API_NAME, repository::OfferRepository,
    service::OfferService,
};
use sqlx::postgres::PgPoolOptions;
use std::net::SocketAddr;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables
    dotenvy::dotenv().ok();

    let config = Config::from_env();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| config.log_level.clone().into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("{} Starting Ofertas API on port {}", API_NAME, config.server_port);

    // Bounded pool: a request waits at most `acquire_timeout` for a connection.
    let pool = PgPoolOptions::new()
        .max_connections(config.pool_max_connections)
        .acquire_timeout(config.acquire_timeout)
        .connect(&config.database_url())
        .await
        .context("Failed to connect to database")?;

    tracing::info!(
        "{} Connected to database {} at {}:{}",
        API_NAME,
        config.db_name,
        config.db_host,
        config.db_port
    );

    let offer_repo = OfferRepository::new(pool);
    offer_repo
        .bootstrap()
        .await
        .context("Failed to create offers table")?;

    tracing::info!("{} Offers table ready", API_NAME);

    let service = OfferService::new(offer_repo);
    let app = app(service);

    let addr = SocketAddr::from(([0, 0, 0, 0], config.server_port));
    tracing::info!("{} Server listening on {}", API_NAME, addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
