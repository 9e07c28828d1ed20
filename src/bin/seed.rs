use std::error::Error;

use meal_planner::{config::Config, infra::RecipeStore, samples::sample_recipes};
use tracing::info;
use tracing_subscriber::{fmt, EnvFilter};

#[rocket::main]
async fn main() -> Result<(), Box<dyn Error>> {
    fmt().with_env_filter(EnvFilter::from_default_env()).init();

    let config = Config::load()?;
    let db = config.open_store().await?;

    for recipe in sample_recipes() {
        let id = db.create(recipe).await?;
        info!("Inserted recipe with id: {id}");
    }
    Ok(())
}
