#[macro_use]
extern crate rocket;

pub mod config;
pub mod infra;
pub mod samples;

use infra::*;
use rocket::fairing::AdHoc;
use rocket::{Build, Rocket};
use tracing::info;

/// Assembles the HTTP service around an already opened store.
pub fn build(db: RecipeDb, allowed_origins: Vec<String>) -> Rocket<Build> {
    rocket::build()
        .manage(db)
        .mount(
            "/",
            routes![
                index,
                get_recipes,
                create_recipe,
                get_recipe,
                update_recipe,
                delete_recipe,
                get_recipe_ingredients,
                get_recipe_instructions,
                get_recipe_reviews
            ],
        )
        .register("/", catchers![not_found, internal_error])
        .attach(CORS::new(allowed_origins))
        .attach(AdHoc::on_shutdown("Recipe store", |rocket| {
            Box::pin(async move {
                if let Some(db) = rocket.state::<RecipeDb>() {
                    info!("Shutting down, closing the recipe store");
                    db.close().await;
                }
            })
        }))
}
