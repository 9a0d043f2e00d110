use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

pub const MENU_ITEMS_COLLECTION: &str = "MenuItems";

/// A stored menu item. `id` maps to the document `_id` and is assigned by
/// the repository on insert.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct MenuItem {
    #[serde(rename = "_id")]
    pub id: String,
    pub name: String,
    pub description: String,
    #[serde(with = "rust_decimal::serde::float")]
    pub price: Decimal,
    pub category: String,
    pub is_available: bool,
}

impl MenuItem {
    /// Builds an item that has not been stored yet (empty `id`).
    pub fn new(
        name: String,
        description: String,
        price: Decimal,
        category: String,
        is_available: bool,
    ) -> Self {
        Self {
            id: String::new(),
            name,
            description,
            price,
            category,
            is_available,
        }
    }

    pub fn has_id(&self) -> bool {
        !self.id.is_empty()
    }
}
