use super::mongo::types::document_from_json;
use super::{Recipe, RecipeRepError, RecipeStore};
use rocket::serde::json::{Error as JsonError, Json};
use rocket::{http::Status, Request, State};
use serde::Serialize;
use serde_json::{Map, Value};
use std::io::ErrorKind;
use tracing::{debug, error, info, warn};

/// The store handle shared by every request.
pub type RecipeDb = Box<dyn RecipeStore>;

/// A request body: any JSON object.
type JsonBody<'r> = Result<Json<Map<String, Value>>, JsonError<'r>>;

#[derive(Debug, Serialize)]
pub struct ErrorMessage {
    pub error: String,
}

impl ErrorMessage {
    pub fn new(error: &str) -> Self {
        ErrorMessage {
            error: String::from(error),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct Message {
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
}

pub type ApiError = (Status, Json<ErrorMessage>);

fn recipe_not_found() -> ApiError {
    (Status::NotFound, Json(ErrorMessage::new("Recipe not found")))
}

// Malformed identifiers are reported exactly like missing recipes.
fn failure(err: RecipeRepError) -> ApiError {
    match err {
        RecipeRepError::InvalidIdentifier(id) => {
            debug!("rejecting malformed recipe id {id}");
            recipe_not_found()
        }
        err => {
            error!("recipe store failure: {err}");
            (
                Status::InternalServerError,
                Json(ErrorMessage::new("Internal server error")),
            )
        }
    }
}

fn malformed_body(err: JsonError<'_>) -> ApiError {
    match err {
        // Rocket reports a body cut off at the json limit as an early EOF.
        JsonError::Io(e) if e.kind() == ErrorKind::UnexpectedEof => {
            warn!("request body too large: {e}");
            (
                Status::PayloadTooLarge,
                Json(ErrorMessage::new("Request body too large")),
            )
        }
        err => {
            warn!("malformed request body: {err}");
            (
                Status::BadRequest,
                Json(ErrorMessage::new("Malformed request body")),
            )
        }
    }
}

#[get("/")]
pub fn index() -> &'static str {
    "Welcome to the Meal Planner API!"
}

#[get("/recipes")]
pub async fn get_recipes(db: &State<RecipeDb>) -> Result<Json<Vec<Recipe>>, ApiError> {
    match db.list_all().await {
        Ok(recipes) => Ok(Json(recipes)),
        Err(e) => Err(failure(e)),
    }
}

#[post("/recipes", data = "<recipe>")]
pub async fn create_recipe(
    db: &State<RecipeDb>,
    recipe: JsonBody<'_>,
) -> Result<(Status, Json<Message>), ApiError> {
    let recipe = document_from_json(recipe.map_err(malformed_body)?.into_inner());

    match db.create(recipe).await {
        Ok(id) => {
            info!("created recipe {id}");
            Ok((
                Status::Created,
                Json(Message {
                    message: String::from("Recipe created successfully"),
                    id: Some(id),
                }),
            ))
        }
        Err(e) => Err(failure(e)),
    }
}

#[get("/recipes/<id>")]
pub async fn get_recipe(db: &State<RecipeDb>, id: &str) -> Result<Json<Recipe>, ApiError> {
    match db.get(id).await {
        Ok(Some(recipe)) => Ok(Json(recipe)),
        Ok(None) => Err(recipe_not_found()),
        Err(e) => Err(failure(e)),
    }
}

#[put("/recipes/<id>", data = "<partial>")]
pub async fn update_recipe(
    db: &State<RecipeDb>,
    id: &str,
    partial: JsonBody<'_>,
) -> Result<Json<Message>, ApiError> {
    let partial = document_from_json(partial.map_err(malformed_body)?.into_inner());

    match db.update(id, partial).await {
        Ok(0) => Err(recipe_not_found()),
        Ok(_) => Ok(Json(Message {
            message: format!("Recipe {id} updated successfully"),
            id: None,
        })),
        Err(e) => Err(failure(e)),
    }
}

#[delete("/recipes/<id>")]
pub async fn delete_recipe(db: &State<RecipeDb>, id: &str) -> Result<Status, ApiError> {
    match db.delete(id).await {
        Ok(0) => Err(recipe_not_found()),
        Ok(_) => {
            info!("deleted recipe {id}");
            Ok(Status::NoContent)
        }
        Err(e) => Err(failure(e)),
    }
}

#[get("/recipes/<id>/ingredients")]
pub fn get_recipe_ingredients(id: &str) -> String {
    format!("Ingredients for recipe {id}")
}

#[get("/recipes/<id>/instructions")]
pub fn get_recipe_instructions(id: &str) -> String {
    format!("Instructions for recipe {id}")
}

#[get("/recipes/<id>/reviews")]
pub fn get_recipe_reviews(id: &str) -> String {
    format!("Reviews for recipe {id}")
}

#[catch(404)]
pub fn not_found(_request: &Request<'_>) -> Json<ErrorMessage> {
    Json(ErrorMessage::new("Not found"))
}

#[catch(500)]
pub fn internal_error(_request: &Request<'_>) -> Json<ErrorMessage> {
    Json(ErrorMessage::new("Internal server error"))
}
