use std::sync::Arc;
use tracing::info;
use tracing_subscriber::{EnvFilter, fmt};
use dungeondex::core::config::Config;
use dungeondex::core::database::Database;
use dungeondex::graphql::server;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    fmt().with_env_filter(filter).init();

    let config = Config::from_env()?;

    info!("Opening database...");
    let db = Arc::new(Database::open(config)?);
    info!(
        "Database ready: {} monsters, {} users",
        db.monsters().len(),
        db.users().len()
    );

    server::serve(db).await?;
    Ok(())
}
