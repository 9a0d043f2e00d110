pub mod database;
pub mod memory;
pub mod menu_items;
pub mod metrics;
pub mod repository;

pub use database::MongoDb;
pub use memory::InMemoryMenuItemRepository;
pub use menu_items::MenuItemService;
pub use metrics::{get_metrics, init_metrics};
pub use repository::{MenuItemRepository, MongoMenuItemRepository};
