pub mod menu_item;

pub use menu_item::{MenuItem, MENU_ITEMS_COLLECTION};
