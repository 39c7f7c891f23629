//! Hawaiian Weather API - Main Entry Point

use tracing::info;
use weather_api::{init_logging, parse_level, run_server, ServerError, Settings};

#[tokio::main]
async fn main() -> Result<(), ServerError> {
    let settings = Settings::load()?;
    init_logging(parse_level(&settings.log_level)?)?;

    info!("=== Hawaiian Weather API v{} ===", env!("CARGO_PKG_VERSION"));
    info!("Database: {}", settings.database.path);

    run_server(&settings).await?;

    Ok(())
}
