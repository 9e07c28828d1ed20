use mongodb::bson::{
    oid::ObjectId, serde_helpers::serialize_object_id_as_hex_string, Bson, Document,
};
use serde::Serialize;
use serde_json::{Map, Value};

use crate::infra::store::RecipeRepError;

/// Key under which the store keeps the identifier of a document.
pub const ID_KEY: &str = "_id";

/// A stored recipe. Only the identifier is typed, every other key is kept as
/// submitted by the client.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Recipe {
    #[serde(rename = "_id", serialize_with = "serialize_object_id_as_hex_string")]
    pub id: ObjectId,
    #[serde(flatten)]
    pub fields: Document,
}

impl Recipe {
    pub fn from_document(mut document: Document) -> Result<Self, RecipeRepError> {
        match document.remove(ID_KEY) {
            Some(Bson::ObjectId(id)) => Ok(Recipe {
                id,
                fields: document,
            }),
            _ => Err(RecipeRepError::UnexpectedIdentifier()),
        }
    }
}

/// Parses the external string form of an identifier.
pub fn parse_id(id: &str) -> Result<ObjectId, RecipeRepError> {
    ObjectId::parse_str(id).map_err(|_| RecipeRepError::InvalidIdentifier(String::from(id)))
}

/// Builds a document from a request body, key by key.
///
/// Keys such as `$oid` or `$date` stay plain keys: extended JSON is never
/// interpreted, so the document holds exactly what the client sent.
pub fn document_from_json(object: Map<String, Value>) -> Document {
    object
        .into_iter()
        .map(|(key, value)| (key, bson_from_json(value)))
        .collect()
}

fn bson_from_json(value: Value) -> Bson {
    match value {
        Value::Null => Bson::Null,
        Value::Bool(b) => Bson::Boolean(b),
        Value::Number(n) => match n.as_i64() {
            Some(i) => i32::try_from(i).map_or(Bson::Int64(i), Bson::Int32),
            None => n.as_f64().map_or(Bson::Null, Bson::Double),
        },
        Value::String(s) => Bson::String(s),
        Value::Array(values) => Bson::Array(values.into_iter().map(bson_from_json).collect()),
        Value::Object(object) => Bson::Document(document_from_json(object)),
    }
}

/// Drops any client-supplied identifier from a request body.
pub fn strip_id(mut document: Document) -> Document {
    document.remove(ID_KEY);
    document
}

#[cfg(test)]
mod tests {
    use mongodb::bson::doc;

    use super::*;

    #[test]
    fn test_parse_id_passes() {
        let id = parse_id("637be8b4942c929a6d8710c9").unwrap();
        assert_eq!("637be8b4942c929a6d8710c9", id.to_hex());
    }

    #[test]
    #[should_panic(expected = "InvalidIdentifier")]
    fn test_parse_id_rejects_short_hex() {
        parse_id("637be8b4").unwrap();
    }

    #[test]
    #[should_panic(expected = "InvalidIdentifier")]
    fn test_parse_id_rejects_non_hex() {
        parse_id("not-a-recipe-identifier!").unwrap();
    }

    #[test]
    fn test_from_document_splits_identifier() {
        let id = ObjectId::new();
        let recipe = Recipe::from_document(doc! {"_id": id, "name": "Pancakes"}).unwrap();
        assert_eq!(id, recipe.id);
        assert_eq!(doc! {"name": "Pancakes"}, recipe.fields);
    }

    #[test]
    #[should_panic(expected = "UnexpectedIdentifier")]
    fn test_from_document_requires_object_id() {
        Recipe::from_document(doc! {"_id": "pancakes", "name": "Pancakes"}).unwrap();
    }

    #[test]
    fn test_recipe_serializes_identifier_as_string() {
        let id = ObjectId::parse_str("637be8b4942c929a6d8710c9").unwrap();
        let recipe = Recipe {
            id,
            fields: doc! {"name": "Pancakes", "tags": ["vegetarian"]},
        };
        let json = rocket::serde::json::to_value(&recipe).unwrap();
        assert_eq!(
            rocket::serde::json::json!({
                "_id": "637be8b4942c929a6d8710c9",
                "name": "Pancakes",
                "tags": ["vegetarian"],
            }),
            json
        );
    }

    #[test]
    fn test_document_from_json_keeps_dollar_keys() {
        let body = rocket::serde::json::json!({
            "qty": {"$numberLong": "5"},
            "when": {"$date": "2020-01-01T00:00:00Z"},
            "ref": {"$oid": "nothex"},
        });
        let Value::Object(object) = body else {
            panic!("not an object");
        };
        assert_eq!(
            doc! {
                "qty": {"$numberLong": "5"},
                "when": {"$date": "2020-01-01T00:00:00Z"},
                "ref": {"$oid": "nothex"},
            },
            document_from_json(object)
        );
    }

    #[test]
    fn test_document_from_json_numbers() {
        let body = rocket::serde::json::json!({
            "calories": 350,
            "big": 5_000_000_000_i64,
            "fat": 10.5,
            "huge": u64::MAX,
            "tags": ["vegan", null, true],
        });
        let Value::Object(object) = body else {
            panic!("not an object");
        };
        let document = document_from_json(object);
        assert_eq!(Some(&Bson::Int32(350)), document.get("calories"));
        assert_eq!(Some(&Bson::Int64(5_000_000_000)), document.get("big"));
        assert_eq!(Some(&Bson::Double(10.5)), document.get("fat"));
        assert_eq!(Some(&Bson::Double(u64::MAX as f64)), document.get("huge"));
        assert_eq!(
            Some(&Bson::Array(vec![
                Bson::String(String::from("vegan")),
                Bson::Null,
                Bson::Boolean(true),
            ])),
            document.get("tags")
        );
    }

    #[test]
    fn test_strip_id_removes_client_identifier() {
        let body = strip_id(doc! {"_id": "mine", "name": "Pancakes"});
        assert_eq!(doc! {"name": "Pancakes"}, body);
    }
}
