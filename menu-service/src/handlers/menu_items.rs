//! `/api/menuitems` handlers.

use axum::{
    extract::{Path, State},
    http::{header, StatusCode},
    response::IntoResponse,
    Json,
};
use service_core::error::AppError;

use crate::dtos::{CreateMenuItemRequest, MenuItemResponse, UpdateMenuItemRequest};
use crate::startup::AppState;
use crate::utils::{AppJson, ValidatedJson};

pub const MENU_ITEMS_PATH: &str = "/api/menuitems";

/// GET /api/menuitems
#[tracing::instrument(skip(state))]
pub async fn list_menu_items(
    State(state): State<AppState>,
) -> Result<Json<Vec<MenuItemResponse>>, AppError> {
    let items = state.menu_items.get_all().await?;
    tracing::info!(count = items.len(), "Fetched {} menu items", items.len());

    Ok(Json(items.into_iter().map(MenuItemResponse::from).collect()))
}

/// GET /api/menuitems/:id
#[tracing::instrument(skip(state))]
pub async fn get_menu_item(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<MenuItemResponse>, AppError> {
    let item = state
        .menu_items
        .get_by_id(&id)
        .await?
        .ok_or_else(|| AppError::NotFound(anyhow::anyhow!("Menu item {} not found", id)))?;

    Ok(Json(MenuItemResponse::from(item)))
}

/// POST /api/menuitems
#[tracing::instrument(skip(state, request))]
pub async fn create_menu_item(
    State(state): State<AppState>,
    ValidatedJson(request): ValidatedJson<CreateMenuItemRequest>,
) -> Result<impl IntoResponse, AppError> {
    let item = state.menu_items.create(request.into_menu_item()).await?;

    tracing::info!(
        menu_item_id = %item.id,
        name = %item.name,
        category = %item.category,
        "Menu item created"
    );

    let location = format!("{}/{}", MENU_ITEMS_PATH, item.id);
    Ok((
        StatusCode::CREATED,
        [(header::LOCATION, location)],
        Json(MenuItemResponse::from(item)),
    ))
}

/// PUT /api/menuitems/:id
///
/// Full replacement. The path id always wins over any id in the body, and an
/// unknown id is not created.
#[tracing::instrument(skip(state, request))]
pub async fn update_menu_item(
    State(state): State<AppState>,
    Path(id): Path<String>,
    AppJson(request): AppJson<UpdateMenuItemRequest>,
) -> Result<StatusCode, AppError> {
    if let Some(body_id) = request.id.as_deref().filter(|body_id| *body_id != id) {
        tracing::debug!(body_id = %body_id, "Ignoring payload id in favour of path id");
    }

    state.menu_items.update(request.into_menu_item(id.clone())).await?;
    tracing::info!(menu_item_id = %id, "Menu item updated");

    Ok(StatusCode::NO_CONTENT)
}

/// DELETE /api/menuitems/:id
#[tracing::instrument(skip(state))]
pub async fn delete_menu_item(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<StatusCode, AppError> {
    state.menu_items.delete(&id).await?;
    tracing::info!(menu_item_id = %id, "Menu item deleted");

    Ok(StatusCode::NO_CONTENT)
}
