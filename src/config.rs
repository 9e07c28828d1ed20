use std::{env, fmt::Display, str::FromStr};

use thiserror::Error;
use tracing::{info, warn};

use crate::infra::{MemoryRep, MongoRep, RecipeRepError, RecipeStore};

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("invalid {key} value: {reason}")]
    InvalidValue { key: &'static str, reason: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreKind {
    Mongo,
    Memory,
}

impl FromStr for StoreKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "mongo" | "mongodb" => Ok(StoreKind::Mongo),
            "memory" => Ok(StoreKind::Memory),
            other => Err(format!("unknown store {other}, expected mongo or memory")),
        }
    }
}

#[derive(Debug, Clone)]
pub struct Config {
    pub mongo_uri: String,
    pub database: String,
    pub store: StoreKind,
    pub allowed_origins: Vec<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            mongo_uri: String::from("mongodb://localhost:27017/"),
            database: String::from("meal_planner"),
            store: StoreKind::Mongo,
            allowed_origins: vec![String::from("https://meal-planner-1-hk0m.onrender.com")],
        }
    }
}

impl Config {
    /// Reads the process environment, after merging in a `.env` file if one exists.
    pub fn load() -> Result<Self, ConfigError> {
        if let Ok(path) = dotenv::dotenv() {
            info!("Loaded environment from {}", path.display());
        }

        let defaults = Self::default();
        Ok(Self {
            mongo_uri: try_load("MONGO_URI", defaults.mongo_uri)?,
            database: try_load("MONGO_DATABASE", defaults.database)?,
            store: try_load("RECIPE_STORE", defaults.store)?,
            allowed_origins: match env::var("ALLOWED_ORIGINS") {
                Ok(origins) => parse_origins(&origins),
                Err(_) => {
                    info!("ALLOWED_ORIGINS not set, using default: {:?}", defaults.allowed_origins);
                    defaults.allowed_origins
                }
            },
        })
    }

    /// Opens the store this configuration points at.
    pub async fn open_store(&self) -> Result<Box<dyn RecipeStore>, RecipeRepError> {
        match self.store {
            StoreKind::Mongo => {
                info!("Connecting to MongoDB database {}", self.database);
                let rep = MongoRep::init(&self.mongo_uri, &self.database).await?;
                Ok(Box::new(rep))
            }
            StoreKind::Memory => {
                warn!("Using the in-memory recipe store, nothing will be persisted");
                Ok(Box::new(MemoryRep::new()))
            }
        }
    }
}

fn try_load<T: FromStr>(key: &'static str, default: T) -> Result<T, ConfigError>
where
    T::Err: Display,
{
    match env::var(key) {
        Ok(value) => value.parse().map_err(|e: T::Err| {
            warn!("Invalid {key} value: {e}");
            ConfigError::InvalidValue {
                key,
                reason: e.to_string(),
            }
        }),
        Err(_) => {
            info!("{key} not set, using default");
            Ok(default)
        }
    }
}

fn parse_origins(origins: &str) -> Vec<String> {
    origins
        .split(',')
        .map(str::trim)
        .filter(|origin| !origin.is_empty())
        .map(|origin| origin.trim_end_matches('/').to_string())
        .collect()
}
