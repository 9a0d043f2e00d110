use crate::models::{MenuItem, MENU_ITEMS_COLLECTION};
use mongodb::{Client as MongoClient, Collection, Database};
use service_core::error::AppError;

/// Handle on the service database. Cloning shares the underlying pool.
#[derive(Clone)]
pub struct MongoDb {
    client: MongoClient,
    db: Database,
}

impl MongoDb {
    /// Parses `uri` and prepares a client. No connection is made here; an
    /// unreachable server surfaces on the first operation instead.
    pub async fn connect(uri: &str, database: &str) -> Result<Self, AppError> {
        tracing::info!(database = %database, "Creating MongoDB client");
        let client = MongoClient::with_uri_str(uri).await.map_err(|e| {
            tracing::error!("Invalid MongoDB connection string: {}", e);
            AppError::from(e)
        })?;
        let db = client.database(database);
        Ok(Self { client, db })
    }

    pub fn menu_items(&self) -> Collection<MenuItem> {
        self.db.collection(MENU_ITEMS_COLLECTION)
    }

    pub fn client(&self) -> &MongoClient {
        &self.client
    }

    pub fn database(&self) -> &Database {
        &self.db
    }
}
