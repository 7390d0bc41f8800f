pub mod in_memory_todo_store;
pub mod mongo_todo_store;

use crate::app_env::{AppConfig, StoreBackend};
use crate::db;
use crate::domain::todo::driven_ports::TodoStore;
use anyhow::anyhow;
use mongodb::bson::oid::ObjectId;
use tracing::info;

/// Builds the todo store selected by [AppConfig::store_backend]. For MongoDB this
/// connects to the configured database.
pub async fn connect_todo_store(config: &AppConfig) -> Result<Box<dyn TodoStore>, anyhow::Error> {
    match config.store_backend {
        StoreBackend::MongoDb => {
            let database = db::connect_mongo(&config.mongodb_url).await?;
            info!(database = database.name(), "Storing todos in MongoDB");

            Ok(Box::new(mongo_todo_store::MongoTodoStore::new(&database)))
        }
        StoreBackend::Memory => {
            info!("Storing todos in memory, they will be lost on shutdown");

            Ok(Box::new(in_memory_todo_store::InMemoryTodoStore::new()))
        }
    }
}

/// Converts a todo ID from the API into the ObjectId todos are keyed by. IDs that aren't
/// 24 hex digits are a store failure, not a missing todo.
fn cast_todo_id(id: &str) -> Result<ObjectId, anyhow::Error> {
    ObjectId::parse_str(id).map_err(|_| {
        anyhow!(
            "Cast to ObjectId failed for value \"{id}\" (type string) at path \"_id\" for model \"Todo\""
        )
    })
}
