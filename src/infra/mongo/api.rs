use super::types::{parse_id, strip_id, Recipe};
use crate::infra::store::{RecipeRepError, RecipeStore};
use futures::TryStreamExt;
use mongodb::{
    bson::{doc, Bson, Document},
    Client, Collection,
};
use tracing::{debug, info, warn};

pub const RECIPES_COLLECTION: &str = "recipes";

pub struct MongoRep {
    client: Client,
    pub recipes: Collection<Document>,
}

impl MongoRep {
    pub async fn init(uri: &str, database: &str) -> Result<Self, RecipeRepError> {
        let client = Client::with_uri_str(uri).await?;
        let recipes = client.database(database).collection(RECIPES_COLLECTION);
        let rep = MongoRep { client, recipes };
        return Ok(rep);
    }
}

/// Keeps the documents that carry an object identifier. Anything else was
/// written by another tool and cannot be addressed through this service.
pub fn collect_recipes(documents: Vec<Document>) -> Vec<Recipe> {
    documents
        .into_iter()
        .filter_map(|document| {
            let id = document.get("_id").cloned();
            match Recipe::from_document(document) {
                Ok(recipe) => Some(recipe),
                Err(e) => {
                    warn!("skipping recipe with _id {id:?}: {e}");
                    None
                }
            }
        })
        .collect()
}

#[rocket::async_trait]
impl RecipeStore for MongoRep {
    async fn list_all(&self) -> Result<Vec<Recipe>, RecipeRepError> {
        let cursor = self
            .recipes
            .find(None, None)
            .await
            .map_err(RecipeRepError::from)?;
        let documents: Vec<Document> = cursor.try_collect().await?;
        Ok(collect_recipes(documents))
    }

    async fn get(&self, id: &str) -> Result<Option<Recipe>, RecipeRepError> {
        let id = parse_id(id)?;
        match self
            .recipes
            .find_one(doc! {"_id": id}, None)
            .await
            .map_err(RecipeRepError::from)?
        {
            Some(document) => Recipe::from_document(document).map(Some),
            None => Ok(None),
        }
    }

    async fn create(&self, recipe: Document) -> Result<String, RecipeRepError> {
        let result = self.recipes.insert_one(strip_id(recipe), None).await?;
        match result.inserted_id {
            Bson::ObjectId(id) => Ok(id.to_hex()),
            _ => Err(RecipeRepError::UnexpectedIdentifier()),
        }
    }

    async fn update(&self, id: &str, partial: Document) -> Result<u64, RecipeRepError> {
        let id = match parse_id(id) {
            Ok(id) => id,
            Err(e) => {
                debug!("{e}, nothing to update");
                return Ok(0);
            }
        };
        let partial = strip_id(partial);
        if partial.is_empty() {
            return Ok(0);
        }
        let result = self
            .recipes
            .update_one(doc! {"_id": id}, doc! {"$set": partial}, None)
            .await?;
        Ok(result.modified_count)
    }

    async fn delete(&self, id: &str) -> Result<u64, RecipeRepError> {
        let id = parse_id(id)?;
        let result = self.recipes.delete_one(doc! {"_id": id}, None).await?;
        Ok(result.deleted_count)
    }

    async fn close(&self) {
        info!("Closing the MongoDB client");
        self.client.clone().shutdown().await;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::samples::sample_recipes;
    use mongodb::bson::oid::ObjectId;

    async fn init_repo(database: &str) -> MongoRep {
        MongoRep::init("mongodb://localhost:27017/", database)
            .await
            .unwrap()
    }

    #[rocket::async_test]
    #[ignore = "requires a mongod listening on localhost:27017"]
    async fn test_create_then_get_passes() {
        let mongo_rep = init_repo("meal_planner_test").await;
        let chili = sample_recipes().remove(0);
        let id = mongo_rep.create(chili.clone()).await.unwrap();
        let recipe = mongo_rep.get(&id).await.unwrap().unwrap();
        assert_eq!(id, recipe.id.to_hex());
        assert_eq!(chili, recipe.fields);
        assert_eq!(1, mongo_rep.delete(&id).await.unwrap());
    }

    #[rocket::async_test]
    #[ignore = "requires a mongod listening on localhost:27017"]
    async fn test_update_reports_unchanged_values_as_zero() {
        let mongo_rep = init_repo("meal_planner_test").await;
        let id = mongo_rep
            .create(doc! {"name": "Pancakes", "meal_type": "breakfast"})
            .await
            .unwrap();
        assert_eq!(1, mongo_rep.update(&id, doc! {"name": "Pancakes v2"}).await.unwrap());
        assert_eq!(0, mongo_rep.update(&id, doc! {"name": "Pancakes v2"}).await.unwrap());
        let recipe = mongo_rep.get(&id).await.unwrap().unwrap();
        assert_eq!("breakfast", recipe.fields.get_str("meal_type").unwrap());
        mongo_rep.delete(&id).await.unwrap();
    }

    #[rocket::async_test]
    #[ignore = "requires a mongod listening on localhost:27017"]
    async fn test_delete_twice_returns_zero() {
        let mongo_rep = init_repo("meal_planner_test").await;
        let id = mongo_rep.create(doc! {"name": "Toast"}).await.unwrap();
        assert_eq!(1, mongo_rep.delete(&id).await.unwrap());
        assert_eq!(0, mongo_rep.delete(&id).await.unwrap());
        assert!(mongo_rep.get(&id).await.unwrap().is_none());
    }

    #[rocket::async_test]
    async fn test_get_invalid_identifier() {
        let mongo_rep = init_repo("meal_planner_test").await;
        assert!(matches!(
            mongo_rep.get("hello").await,
            Err(RecipeRepError::InvalidIdentifier(_))
        ));
        assert!(matches!(
            mongo_rep.delete("hello").await,
            Err(RecipeRepError::InvalidIdentifier(_))
        ));
    }

    #[test]
    fn test_collect_recipes_skips_foreign_identifiers() {
        let id = ObjectId::new();
        let recipes = collect_recipes(vec![
            doc! {"_id": "imported-by-hand", "name": "Toast"},
            doc! {"_id": id, "name": "Pancakes"},
            doc! {"name": "No identifier"},
        ]);
        assert_eq!(1, recipes.len());
        assert_eq!(id, recipes[0].id);
        assert_eq!(doc! {"name": "Pancakes"}, recipes[0].fields);
    }

    #[rocket::async_test]
    #[ignore = "requires a mongod listening on localhost:27017"]
    async fn test_close_after_use() {
        let mongo_rep = init_repo("meal_planner_test").await;
        mongo_rep.list_all().await.unwrap();
        mongo_rep.close().await;
    }

    #[rocket::async_test]
    async fn test_update_invalid_identifier_is_zero() {
        let mongo_rep = init_repo("meal_planner_test").await;
        assert_eq!(0, mongo_rep.update("hello", doc! {"name": "x"}).await.unwrap());
    }
}
