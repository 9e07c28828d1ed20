pub mod cors;
pub mod memory;
pub mod mongo;
pub mod routes;
pub mod store;

pub use cors::CORS;
pub use memory::MemoryRep;
pub use mongo::{MongoRep, Recipe};
pub use routes::*;
pub use store::{RecipeRepError, RecipeStore};
