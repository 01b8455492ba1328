use dotenv::dotenv;
use talent_ranking_service::common::{config::Config, database::setup_database};
use talent_ranking_service::http_server::start_http_server;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("info,tower_http=debug")),
        )
        .init();

    let config = Config::from_env()?;
    let pool = setup_database(&config.database_url).await?;

    start_http_server(pool, &config.bind_address).await
}
