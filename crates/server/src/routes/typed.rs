//! Typed binding: request bodies must carry both fields, updates replace the
//! whole record, and every rejection is rendered as `{"detail": ...}` with 422.

use axum::{
    extract::{rejection::{JsonRejection, PathRejection}, Path, State},
    http::StatusCode,
    routing::get,
    Json, Router,
};
use serde::{Deserialize, Serialize};
use service::items::{Item, ItemChanges, NewItem};
use tracing::info;
use utoipa::OpenApi;

use super::AppState;
use crate::errors::JsonApiError;
use crate::openapi::ApiDoc;
use crate::Binding;

const BINDING: Binding = Binding::Typed;

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ItemBody {
    pub name: String,
    pub description: String,
}

impl From<ItemBody> for NewItem {
    fn from(body: ItemBody) -> Self {
        NewItem { name: body.name, description: body.description }
    }
}

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/api/items", get(list_items).post(create_item))
        .route("/api/items/:item_id", get(get_item).put(update_item).delete(delete_item))
        .route("/openapi.json", get(openapi_json))
}

fn bind_path(path: Result<Path<u64>, PathRejection>) -> Result<u64, JsonApiError> {
    path.map(|Path(id)| id).map_err(|r| JsonApiError::unprocessable(BINDING, r.body_text()))
}

fn bind_body(body: Result<Json<ItemBody>, JsonRejection>) -> Result<ItemBody, JsonApiError> {
    body.map(|Json(b)| b).map_err(|r| JsonApiError::unprocessable(BINDING, r.body_text()))
}

async fn openapi_json() -> Json<utoipa::openapi::OpenApi> {
    Json(ApiDoc::openapi())
}

#[utoipa::path(
    get, path = "/api/items", tag = "items",
    responses((status = 200, description = "All items", body = [crate::openapi::ItemDoc]))
)]
pub async fn list_items(State(state): State<AppState>) -> Result<Json<Vec<Item>>, JsonApiError> {
    common::metrics::record_request(BINDING.name(), "list");
    let items = state.items.list().await.map_err(|e| JsonApiError::from_service(BINDING, e))?;
    Ok(Json(items))
}

#[utoipa::path(
    post, path = "/api/items", tag = "items",
    request_body = crate::openapi::ItemInputDoc,
    responses(
        (status = 201, description = "Created", body = crate::openapi::ItemDoc),
        (status = 422, description = "Validation Error", body = crate::openapi::DetailDoc)
    )
)]
pub async fn create_item(
    State(state): State<AppState>,
    body: Result<Json<ItemBody>, JsonRejection>,
) -> Result<(StatusCode, Json<Item>), JsonApiError> {
    common::metrics::record_request(BINDING.name(), "create");
    let body = bind_body(body)?;
    let created = state.items.create(body.into()).await.map_err(|e| JsonApiError::from_service(BINDING, e))?;
    info!(id = created.id, binding = BINDING.name(), "created item");
    Ok((StatusCode::CREATED, Json(created)))
}

#[utoipa::path(
    get, path = "/api/items/{item_id}", tag = "items",
    params(("item_id" = u64, Path, description = "Item id")),
    responses(
        (status = 200, description = "OK", body = crate::openapi::ItemDoc),
        (status = 404, description = "Not Found", body = crate::openapi::DetailDoc),
        (status = 422, description = "Validation Error", body = crate::openapi::DetailDoc)
    )
)]
pub async fn get_item(
    State(state): State<AppState>,
    path: Result<Path<u64>, PathRejection>,
) -> Result<Json<Item>, JsonApiError> {
    common::metrics::record_request(BINDING.name(), "get");
    let id = bind_path(path)?;
    let item = state.items.get(id).await.map_err(|e| JsonApiError::from_service(BINDING, e))?;
    Ok(Json(item))
}

#[utoipa::path(
    put, path = "/api/items/{item_id}", tag = "items",
    params(("item_id" = u64, Path, description = "Item id")),
    request_body = crate::openapi::ItemInputDoc,
    responses(
        (status = 200, description = "Updated", body = crate::openapi::ItemDoc),
        (status = 404, description = "Not Found", body = crate::openapi::DetailDoc),
        (status = 422, description = "Validation Error", body = crate::openapi::DetailDoc)
    )
)]
pub async fn update_item(
    State(state): State<AppState>,
    path: Result<Path<u64>, PathRejection>,
    body: Result<Json<ItemBody>, JsonRejection>,
) -> Result<Json<Item>, JsonApiError> {
    common::metrics::record_request(BINDING.name(), "update");
    let id = bind_path(path)?;
    let body = bind_body(body)?;
    let changes = ItemChanges::from(NewItem::from(body));
    let updated = state.items.update(id, changes).await.map_err(|e| JsonApiError::from_service(BINDING, e))?;
    info!(id, binding = BINDING.name(), "updated item");
    Ok(Json(updated))
}

#[utoipa::path(
    delete, path = "/api/items/{item_id}", tag = "items",
    params(("item_id" = u64, Path, description = "Item id")),
    responses(
        (status = 200, description = "Deleted item", body = crate::openapi::ItemDoc),
        (status = 404, description = "Not Found", body = crate::openapi::DetailDoc)
    )
)]
pub async fn delete_item(
    State(state): State<AppState>,
    path: Result<Path<u64>, PathRejection>,
) -> Result<Json<Item>, JsonApiError> {
    common::metrics::record_request(BINDING.name(), "delete");
    let id = bind_path(path)?;
    let removed = state.items.delete(id).await.map_err(|e| JsonApiError::from_service(BINDING, e))?;
    info!(id, binding = BINDING.name(), "deleted item");
    Ok(Json(removed))
}
