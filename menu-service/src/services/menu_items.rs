use crate::models::MenuItem;
use crate::services::MenuItemRepository;
use service_core::error::AppError;
use std::sync::Arc;

/// Seam between the HTTP layer and storage. Forwards every call unchanged.
#[derive(Clone)]
pub struct MenuItemService {
    repository: Arc<dyn MenuItemRepository>,
}

impl MenuItemService {
    pub fn new(repository: Arc<dyn MenuItemRepository>) -> Self {
        Self { repository }
    }

    pub async fn get_all(&self) -> Result<Vec<MenuItem>, AppError> {
        self.repository.get_all().await
    }

    pub async fn get_by_id(&self, id: &str) -> Result<Option<MenuItem>, AppError> {
        self.repository.get_by_id(id).await
    }

    pub async fn create(&self, item: MenuItem) -> Result<MenuItem, AppError> {
        self.repository.create(item).await
    }

    pub async fn update(&self, item: MenuItem) -> Result<(), AppError> {
        self.repository.update(item).await
    }

    pub async fn delete(&self, id: &str) -> Result<(), AppError> {
        self.repository.delete(id).await
    }
}
