use std::error::Error;

use meal_planner::config::Config;
use tracing::info;
use tracing_subscriber::{fmt, EnvFilter};

#[rocket::main]
async fn main() -> Result<(), Box<dyn Error>> {
    fmt().with_env_filter(EnvFilter::from_default_env()).init();

    let config = Config::load()?;
    let db = config.open_store().await?;

    info!("Allowing cross-origin requests from {:?}", config.allowed_origins);
    let _rocket = meal_planner::build(db, config.allowed_origins)
        .launch()
        .await?;
    Ok(())
}
