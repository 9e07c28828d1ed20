use mongodb::bson::{oid::ObjectId, Document};
use parking_lot::RwLock;

use super::mongo::types::{parse_id, strip_id, Recipe};
use super::store::{RecipeRepError, RecipeStore};

/// In-process recipe collection with the same counting rules as MongoDB.
///
/// Keys of a partial update are taken literally, dotted paths are not
/// expanded into nested documents.
#[derive(Default)]
pub struct MemoryRep {
    recipes: RwLock<Vec<Recipe>>,
}

impl MemoryRep {
    pub fn new() -> Self {
        Self::default()
    }
}

#[rocket::async_trait]
impl RecipeStore for MemoryRep {
    async fn list_all(&self) -> Result<Vec<Recipe>, RecipeRepError> {
        Ok(self.recipes.read().clone())
    }

    async fn get(&self, id: &str) -> Result<Option<Recipe>, RecipeRepError> {
        let id = parse_id(id)?;
        let recipes = self.recipes.read();
        Ok(recipes.iter().find(|recipe| recipe.id == id).cloned())
    }

    async fn create(&self, recipe: Document) -> Result<String, RecipeRepError> {
        let id = ObjectId::new();
        self.recipes.write().push(Recipe {
            id,
            fields: strip_id(recipe),
        });
        Ok(id.to_hex())
    }

    async fn update(&self, id: &str, partial: Document) -> Result<u64, RecipeRepError> {
        let Ok(id) = parse_id(id) else {
            return Ok(0);
        };
        let mut recipes = self.recipes.write();
        let Some(recipe) = recipes.iter_mut().find(|recipe| recipe.id == id) else {
            return Ok(0);
        };
        let mut modified = false;
        for (key, value) in strip_id(partial) {
            if recipe.fields.get(&key) != Some(&value) {
                recipe.fields.insert(key, value);
                modified = true;
            }
        }
        Ok(modified as u64)
    }

    async fn delete(&self, id: &str) -> Result<u64, RecipeRepError> {
        let id = parse_id(id)?;
        let mut recipes = self.recipes.write();
        let before = recipes.len();
        recipes.retain(|recipe| recipe.id != id);
        Ok((before - recipes.len()) as u64)
    }
}
