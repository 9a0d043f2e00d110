use crate::models::MenuItem;
use crate::services::MongoDb;
use async_trait::async_trait;
use futures::TryStreamExt;
use mongodb::{
    bson::{doc, oid::ObjectId},
    Collection,
};
use service_core::error::AppError;

/// Storage operations for menu items, one store primitive per method.
///
/// Absence is never an error here: `get_by_id` yields `None`, and `update`
/// and `delete` on a missing id succeed without touching anything.
#[async_trait]
pub trait MenuItemRepository: Send + Sync {
    async fn get_all(&self) -> Result<Vec<MenuItem>, AppError>;
    async fn get_by_id(&self, id: &str) -> Result<Option<MenuItem>, AppError>;
    /// Inserts `item`, assigning a fresh id when it has none, and returns the
    /// stored record.
    async fn create(&self, item: MenuItem) -> Result<MenuItem, AppError>;
    async fn update(&self, item: MenuItem) -> Result<(), AppError>;
    async fn delete(&self, id: &str) -> Result<(), AppError>;
}

pub(crate) fn assign_id(item: &mut MenuItem) {
    if !item.has_id() {
        item.id = ObjectId::new().to_hex();
    }
}

#[derive(Clone)]
pub struct MongoMenuItemRepository {
    collection: Collection<MenuItem>,
}

impl MongoMenuItemRepository {
    pub fn new(db: &MongoDb) -> Self {
        Self {
            collection: db.menu_items(),
        }
    }
}

#[async_trait]
impl MenuItemRepository for MongoMenuItemRepository {
    async fn get_all(&self) -> Result<Vec<MenuItem>, AppError> {
        let cursor = self.collection.find(None, None).await?;
        let items: Vec<MenuItem> = cursor.try_collect().await?;
        Ok(items)
    }

    async fn get_by_id(&self, id: &str) -> Result<Option<MenuItem>, AppError> {
        let item = self.collection.find_one(doc! { "_id": id }, None).await?;
        Ok(item)
    }

    async fn create(&self, mut item: MenuItem) -> Result<MenuItem, AppError> {
        assign_id(&mut item);
        self.collection.insert_one(&item, None).await.map_err(|e| {
            tracing::error!(menu_item_id = %item.id, "Failed to insert menu item: {}", e);
            AppError::from(e)
        })?;
        Ok(item)
    }

    async fn update(&self, item: MenuItem) -> Result<(), AppError> {
        let result = self
            .collection
            .replace_one(doc! { "_id": &item.id }, &item, None)
            .await?;
        tracing::debug!(
            menu_item_id = %item.id,
            matched = result.matched_count,
            "Replaced menu item"
        );
        Ok(())
    }

    async fn delete(&self, id: &str) -> Result<(), AppError> {
        let result = self.collection.delete_one(doc! { "_id": id }, None).await?;
        tracing::debug!(
            menu_item_id = %id,
            deleted = result.deleted_count,
            "Deleted menu item"
        );
        Ok(())
    }
}
