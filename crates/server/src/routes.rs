use std::sync::Arc;

use axum::{extract::State, routing::get, Json, Router};
use common::types::{ApiDescription, EndpointInfo, Health};
use service::items::{InMemoryItemStore, ItemRepository};
use tower_http::{
    cors::CorsLayer,
    trace::{DefaultMakeSpan, DefaultOnFailure, DefaultOnRequest, DefaultOnResponse, TraceLayer},
};
use tracing::Level;

use crate::Binding;

pub mod classic;
pub mod typed;

/// Router state: the injected item store plus which binding is being served.
#[derive(Clone)]
pub struct AppState {
    pub items: Arc<dyn ItemRepository>,
    pub binding: Binding,
}

impl AppState {
    pub fn new(binding: Binding, items: Arc<dyn ItemRepository>) -> Self {
        Self { items, binding }
    }

    /// Fresh state holding the two seed items.
    pub fn seeded(binding: Binding) -> Self {
        Self::new(binding, InMemoryItemStore::seeded())
    }
}

#[utoipa::path(get, path = "/health", tag = "health", responses((status = 200, description = "OK", body = crate::openapi::HealthResponse)))]
pub async fn health() -> Json<Health> {
    Json(Health::ok())
}

async fn metrics() -> (axum::http::StatusCode, String) {
    common::metrics::encode_metrics()
}

/// Greeting plus the endpoint listing for the binding.
pub fn describe(binding: Binding) -> ApiDescription {
    let item_path = format!("/api/items/{}", binding.id_placeholder());
    let endpoint = |method, path: &str, description| EndpointInfo { method, path: path.to_string(), description };
    ApiDescription {
        message: format!("Welcome to the {} API", binding.title()),
        endpoints: vec![
            endpoint("GET", "/", "API information"),
            endpoint("GET", "/api/items", "Get all items"),
            endpoint("POST", "/api/items", "Create a new item"),
            endpoint("GET", &item_path, "Get item by ID"),
            endpoint("PUT", &item_path, "Update item by ID"),
            endpoint("DELETE", &item_path, "Delete item by ID"),
        ],
    }
}

async fn welcome(State(state): State<AppState>) -> Json<ApiDescription> {
    Json(describe(state.binding))
}

/// Build the full application router for the binding carried by `state`.
pub fn build_router(state: AppState, cors: CorsLayer) -> Router {
    let api = match state.binding {
        Binding::Classic => classic::routes(),
        Binding::Typed => typed::routes(),
    };

    Router::new()
        .route("/", get(welcome))
        .route("/health", get(health))
        .route("/metrics", get(metrics))
        .merge(api)
        .with_state(state)
        .layer(cors)
        .layer(
            TraceLayer::new_for_http()
                // 每次请求创建 span，包含方法和路径等，日志级别为 INFO
                .make_span_with(
                    DefaultMakeSpan::new()
                        .level(Level::INFO)
                        .include_headers(false),
                )
                .on_request(DefaultOnRequest::new().level(Level::INFO))
                // 响应返回时打点，包含状态码与耗时
                .on_response(
                    DefaultOnResponse::new()
                        .level(Level::INFO)
                        .include_headers(false),
                )
                // 失败（5xx 等）时以 ERROR 记录
                .on_failure(DefaultOnFailure::new().level(Level::ERROR)),
        )
}
