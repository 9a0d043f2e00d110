use crate::models::MenuItem;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::borrow::Cow;
use validator::{Validate, ValidationError};

pub const NAME_MAX_LENGTH: usize = 100;
pub const DESCRIPTION_MAX_LENGTH: usize = 500;

/// POST payload. Every field is optional at the serde level so that absence
/// is reported by validation rather than as a parse failure.
#[derive(Debug, Default, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateMenuItemRequest {
    #[validate(
        required(message = "Name is required."),
        custom(function = "validate_name")
    )]
    pub name: Option<String>,
    #[validate(
        required(message = "Description is required."),
        custom(function = "validate_description")
    )]
    pub description: Option<String>,
    #[validate(
        required(message = "Price must be greater than zero."),
        custom(function = "validate_price")
    )]
    #[serde(default, with = "rust_decimal::serde::float_option")]
    pub price: Option<Decimal>,
    #[validate(
        required(message = "Category is required."),
        custom(function = "validate_category")
    )]
    pub category: Option<String>,
    #[validate(required(message = "IsAvailable is required."))]
    #[serde(rename = "isAvailable")]
    pub is_available: Option<bool>,
}

fn validate_name(value: &str) -> Result<(), ValidationError> {
    check_text(value, "Name", Some(NAME_MAX_LENGTH))
}

fn validate_description(value: &str) -> Result<(), ValidationError> {
    check_text(value, "Description", Some(DESCRIPTION_MAX_LENGTH))
}

fn validate_category(value: &str) -> Result<(), ValidationError> {
    check_text(value, "Category", None)
}

fn validate_price(price: &Decimal) -> Result<(), ValidationError> {
    if *price > Decimal::ZERO {
        Ok(())
    } else {
        Err(field_error("range", "Price must be greater than zero."))
    }
}

/// Whitespace-only counts as missing; length is counted in characters.
fn check_text(value: &str, label: &str, max_length: Option<usize>) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(field_error("required", format!("{} is required.", label)));
    }

    match max_length {
        Some(max) if value.chars().count() > max => {
            let mut error = field_error(
                "length",
                format!("{} must not exceed {} characters.", label, max),
            );
            error.add_param(Cow::Borrowed("max"), &max);
            Err(error)
        }
        _ => Ok(()),
    }
}

fn field_error(code: &'static str, message: impl Into<Cow<'static, str>>) -> ValidationError {
    ValidationError::new(code).with_message(message.into())
}

impl CreateMenuItemRequest {
    /// Converts a validated payload into an unsaved [`MenuItem`].
    pub fn into_menu_item(self) -> MenuItem {
        MenuItem::new(
            self.name.unwrap_or_default(),
            self.description.unwrap_or_default(),
            self.price.unwrap_or_default(),
            self.category.unwrap_or_default(),
            self.is_available.unwrap_or_default(),
        )
    }
}

/// PUT payload: a full record. Any `id` in the body is ignored in favour of
/// the path parameter.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateMenuItemRequest {
    #[serde(default)]
    pub id: Option<String>,
    pub name: String,
    pub description: String,
    #[serde(with = "rust_decimal::serde::float")]
    pub price: Decimal,
    pub category: String,
    pub is_available: bool,
}

impl UpdateMenuItemRequest {
    pub fn into_menu_item(self, id: String) -> MenuItem {
        MenuItem {
            id,
            name: self.name,
            description: self.description,
            price: self.price,
            category: self.category,
            is_available: self.is_available,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct MenuItemResponse {
    pub id: String,
    pub name: String,
    pub description: String,
    #[serde(with = "rust_decimal::serde::float")]
    pub price: Decimal,
    pub category: String,
    pub is_available: bool,
}

impl From<MenuItem> for MenuItemResponse {
    fn from(item: MenuItem) -> Self {
        Self {
            id: item.id,
            name: item.name,
            description: item.description,
            price: item.price,
            category: item.category,
            is_available: item.is_available,
        }
    }
}
