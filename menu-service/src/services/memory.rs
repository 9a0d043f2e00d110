use crate::models::MenuItem;
use crate::services::repository::{assign_id, MenuItemRepository};
use async_trait::async_trait;
use service_core::error::AppError;
use std::sync::Arc;
use tokio::sync::RwLock;

/// Process-local repository keeping records in insertion order.
///
/// Mirrors the MongoDB repository's semantics; used for tests and for running
/// the service without a database.
#[derive(Clone, Default)]
pub struct InMemoryMenuItemRepository {
    items: Arc<RwLock<Vec<MenuItem>>>,
}

impl InMemoryMenuItemRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn len(&self) -> usize {
        self.items.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.items.read().await.is_empty()
    }
}

#[async_trait]
impl MenuItemRepository for InMemoryMenuItemRepository {
    async fn get_all(&self) -> Result<Vec<MenuItem>, AppError> {
        Ok(self.items.read().await.clone())
    }

    async fn get_by_id(&self, id: &str) -> Result<Option<MenuItem>, AppError> {
        Ok(self
            .items
            .read()
            .await
            .iter()
            .find(|item| item.id == id)
            .cloned())
    }

    async fn create(&self, mut item: MenuItem) -> Result<MenuItem, AppError> {
        assign_id(&mut item);

        let mut items = self.items.write().await;
        if items.iter().any(|existing| existing.id == item.id) {
            return Err(AppError::DatabaseError(anyhow::anyhow!(
                "Duplicate key: menu item {} already exists",
                item.id
            )));
        }
        items.push(item.clone());
        Ok(item)
    }

    async fn update(&self, item: MenuItem) -> Result<(), AppError> {
        let mut items = self.items.write().await;
        if let Some(existing) = items.iter_mut().find(|existing| existing.id == item.id) {
            *existing = item;
        }
        Ok(())
    }

    async fn delete(&self, id: &str) -> Result<(), AppError> {
        self.items.write().await.retain(|item| item.id != id);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal::Decimal;

    fn item(name: &str) -> MenuItem {
        MenuItem::new(
            name.to_string(),
            format!("{} description", name),
            Decimal::new(1250, 2),
            "Main".to_string(),
            true,
        )
    }

    #[tokio::test]
    async fn create_assigns_object_id_and_returns_stored_record() {
        let repo = InMemoryMenuItemRepository::new();
        let created = repo.create(item("Pizza")).await.unwrap();

        assert_eq!(created.id.len(), 24);
        assert!(created.id.chars().all(|c| c.is_ascii_hexdigit()));
        assert_eq!(repo.get_by_id(&created.id).await.unwrap(), Some(created));
    }

    #[tokio::test]
    async fn get_all_preserves_insertion_order() {
        let repo = InMemoryMenuItemRepository::new();
        for name in ["Soup", "Salad", "Steak"] {
            repo.create(item(name)).await.unwrap();
        }

        let names: Vec<String> = repo
            .get_all()
            .await
            .unwrap()
            .into_iter()
            .map(|i| i.name)
            .collect();
        assert_eq!(names, vec!["Soup", "Salad", "Steak"]);
    }

    #[tokio::test]
    async fn duplicate_id_is_rejected() {
        let repo = InMemoryMenuItemRepository::new();
        let created = repo.create(item("Pizza")).await.unwrap();

        let mut clash = item("Other");
        clash.id = created.id.clone();
        let err = repo.create(clash).await.unwrap_err();
        assert!(matches!(err, AppError::DatabaseError(_)));
        assert_eq!(repo.len().await, 1);
    }

    #[tokio::test]
    async fn update_replaces_every_field() {
        let repo = InMemoryMenuItemRepository::new();
        let created = repo.create(item("Pizza")).await.unwrap();

        let replacement = MenuItem {
            id: created.id.clone(),
            name: "Calzone".to_string(),
            description: "Folded".to_string(),
            price: Decimal::new(999, 2),
            category: "Specials".to_string(),
            is_available: false,
        };
        repo.update(replacement.clone()).await.unwrap();

        assert_eq!(
            repo.get_by_id(&created.id).await.unwrap(),
            Some(replacement)
        );
    }

    #[tokio::test]
    async fn update_of_missing_id_does_not_insert() {
        let repo = InMemoryMenuItemRepository::new();
        let mut ghost = item("Ghost");
        ghost.id = "does-not-exist".to_string();

        repo.update(ghost).await.unwrap();
        assert!(repo.is_empty().await);
    }

    #[tokio::test]
    async fn delete_is_idempotent() {
        let repo = InMemoryMenuItemRepository::new();
        let created = repo.create(item("Pizza")).await.unwrap();

        repo.delete(&created.id).await.unwrap();
        repo.delete(&created.id).await.unwrap();
        assert_eq!(repo.get_by_id(&created.id).await.unwrap(), None);
    }
}
