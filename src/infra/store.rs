use mongodb::{bson::Document, error::Error as mongoError};
use thiserror::Error;

use super::Recipe;

#[derive(Error, Debug)]
pub enum RecipeRepError {
    #[error("error querying value")]
    QueryError(#[from] mongoError),
    #[error("invalid recipe identifier {0}")]
    InvalidIdentifier(String),
    #[error("stored recipe has no object identifier")]
    UnexpectedIdentifier(),
}

/// Access to the `recipes` collection. Identifiers cross this boundary as
/// hex strings; implementations translate them to the store's own type.
#[rocket::async_trait]
pub trait RecipeStore: Send + Sync {
    async fn list_all(&self) -> Result<Vec<Recipe>, RecipeRepError>;

    /// `Ok(None)` when the identifier is well formed but matches nothing.
    async fn get(&self, id: &str) -> Result<Option<Recipe>, RecipeRepError>;

    /// Persists `recipe` as-is and returns the identifier the store assigned.
    async fn create(&self, recipe: Document) -> Result<String, RecipeRepError>;

    /// Sets the fields named in `partial`, leaving the others untouched.
    ///
    /// Returns the modified count. Zero covers a malformed identifier, a
    /// missing recipe and an update whose values were already stored.
    async fn update(&self, id: &str, partial: Document) -> Result<u64, RecipeRepError>;

    async fn delete(&self, id: &str) -> Result<u64, RecipeRepError>;

    /// Releases the connection. Called once, when the service shuts down.
    async fn close(&self) {}
}
