pub mod health;
pub mod menu_items;
pub mod metrics;

pub use health::{health_check, not_found};
pub use menu_items::MENU_ITEMS_PATH;
pub use metrics::metrics_endpoint;
