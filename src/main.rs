use color_eyre::eyre::Result;
use dotenv::dotenv;
use jamroom_api::config::ApiConfig;
use jamroom_db::{create_pool, schema::initialize_database};

#[tokio::main]
async fn main() -> Result<()> {
    color_eyre::install()?;
    dotenv().ok();

    let config = ApiConfig::from_env()?;

    let db_pool = create_pool(&config.database_url).await?;

    // Tables and seeded rooms are created idempotently on every start
    initialize_database(&db_pool).await?;

    jamroom_api::start_server(config, db_pool).await?;

    Ok(())
}
