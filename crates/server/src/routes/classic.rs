//! Classic binding: every body field is optional and updates are partial.
//!
//! A missing field on create becomes an empty string; on update it keeps the
//! stored value. Ids that are not non-negative integers are reported as missing
//! items, the same as unknown ids.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::get,
    Json, Router,
};
use serde::Deserialize;
use service::items::{Item, ItemChanges, NewItem};
use tracing::info;

use super::AppState;
use crate::errors::JsonApiError;
use crate::Binding;

const BINDING: Binding = Binding::Classic;

#[derive(Debug, Default, Deserialize)]
pub struct ItemBody {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
}

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/api/items", get(list_items).post(create_item))
        .route("/api/items/:id", get(get_item).put(update_item).delete(delete_item))
}

fn parse_id(raw: &str) -> Result<u64, JsonApiError> {
    raw.parse::<u64>().map_err(|_| JsonApiError::not_found(BINDING))
}

pub async fn list_items(State(state): State<AppState>) -> Result<Json<Vec<Item>>, JsonApiError> {
    common::metrics::record_request(BINDING.name(), "list");
    let items = state.items.list().await.map_err(|e| JsonApiError::from_service(BINDING, e))?;
    Ok(Json(items))
}

pub async fn create_item(
    State(state): State<AppState>,
    Json(body): Json<ItemBody>,
) -> Result<(StatusCode, Json<Item>), JsonApiError> {
    common::metrics::record_request(BINDING.name(), "create");
    let input = NewItem {
        name: body.name.unwrap_or_default(),
        description: body.description.unwrap_or_default(),
    };
    let created = state.items.create(input).await.map_err(|e| JsonApiError::from_service(BINDING, e))?;
    info!(id = created.id, binding = BINDING.name(), "created item");
    Ok((StatusCode::CREATED, Json(created)))
}

pub async fn get_item(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Item>, JsonApiError> {
    common::metrics::record_request(BINDING.name(), "get");
    let id = parse_id(&id)?;
    let item = state.items.get(id).await.map_err(|e| JsonApiError::from_service(BINDING, e))?;
    Ok(Json(item))
}

pub async fn update_item(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(body): Json<ItemBody>,
) -> Result<Json<Item>, JsonApiError> {
    common::metrics::record_request(BINDING.name(), "update");
    let id = parse_id(&id)?;
    let changes = ItemChanges { name: body.name, description: body.description };
    let updated = state.items.update(id, changes).await.map_err(|e| JsonApiError::from_service(BINDING, e))?;
    info!(id, binding = BINDING.name(), "updated item");
    Ok(Json(updated))
}

pub async fn delete_item(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Item>, JsonApiError> {
    common::metrics::record_request(BINDING.name(), "delete");
    let id = parse_id(&id)?;
    let removed = state.items.delete(id).await.map_err(|e| JsonApiError::from_service(BINDING, e))?;
    info!(id, binding = BINDING.name(), "deleted item");
    Ok(Json(removed))
}
