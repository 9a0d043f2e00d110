pub mod menu_items;

pub use menu_items::{CreateMenuItemRequest, MenuItemResponse, UpdateMenuItemRequest};
