pub mod api;
pub mod types;

pub use api::MongoRep;
pub use types::Recipe;
