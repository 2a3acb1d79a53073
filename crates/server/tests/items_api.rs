use axum::{
    body::{to_bytes, Body},
    http::{header, Method, Request, StatusCode},
    Router,
};
use serde_json::{json, Value};
use server::routes::{build_router, describe, AppState};
use server::Binding;
use tower::ServiceExt;
use tower_http::cors::CorsLayer;

fn app(binding: Binding) -> Router {
    build_router(AppState::seeded(binding), CorsLayer::very_permissive())
}

async fn send(app: &Router, method: Method, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let mut req = Request::builder().method(method).uri(uri);
    let body = match body {
        Some(v) => {
            req = req.header(header::CONTENT_TYPE, "application/json");
            Body::from(v.to_string())
        }
        None => Body::empty(),
    };
    let res = app.clone().oneshot(req.body(body).unwrap()).await.unwrap();
    let status = res.status();
    let bytes = to_bytes(res.into_body(), usize::MAX).await.unwrap();
    let value = if bytes.is_empty() { Value::Null } else { serde_json::from_slice(&bytes).unwrap_or(Value::Null) };
    (status, value)
}

#[tokio::test]
async fn list_returns_seed_items_for_both_bindings() {
    for binding in [Binding::Classic, Binding::Typed] {
        let app = app(binding);
        let (status, body) = send(&app, Method::GET, "/api/items", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(
            body,
            json!([
                {"id": 1, "name": "Item 1", "description": "This is item 1"},
                {"id": 2, "name": "Item 2", "description": "This is item 2"}
            ])
        );
    }
}

#[tokio::test]
async fn create_then_get_assigns_next_id() {
    for binding in [Binding::Classic, Binding::Typed] {
        let app = app(binding);
        let (status, created) =
            send(&app, Method::POST, "/api/items", Some(json!({"name": "Pen", "description": "Blue ink"}))).await;
        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(created, json!({"id": 3, "name": "Pen", "description": "Blue ink"}));

        let (status, fetched) = send(&app, Method::GET, "/api/items/3", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(fetched, created);
    }
}

#[tokio::test]
async fn classic_create_fills_missing_fields_with_empty_strings() {
    let app = app(Binding::Classic);
    let (status, created) = send(&app, Method::POST, "/api/items", Some(json!({"name": "Only name"}))).await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(created, json!({"id": 3, "name": "Only name", "description": ""}));
}

#[tokio::test]
async fn classic_update_is_partial() {
    let app = app(Binding::Classic);
    let (status, updated) = send(&app, Method::PUT, "/api/items/1", Some(json!({"name": "Renamed"}))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(updated, json!({"id": 1, "name": "Renamed", "description": "This is item 1"}));
}

#[tokio::test]
async fn typed_update_replaces_record_and_requires_both_fields() {
    let app = app(Binding::Typed);
    let (status, body) = send(&app, Method::PUT, "/api/items/1", Some(json!({"name": "Renamed"}))).await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert!(body.get("detail").is_some());

    let (status, updated) =
        send(&app, Method::PUT, "/api/items/1", Some(json!({"name": "A", "description": "B"}))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(updated, json!({"id": 1, "name": "A", "description": "B"}));
}

#[tokio::test]
async fn missing_item_renders_binding_specific_body() {
    let (status, body) = send(&app(Binding::Classic), Method::GET, "/api/items/99", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body, json!({"message": "Item not found"}));

    let (status, body) = send(&app(Binding::Typed), Method::GET, "/api/items/99", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body, json!({"detail": "Item not found"}));
}

#[tokio::test]
async fn update_of_missing_item_leaves_collection_unchanged() {
    for binding in [Binding::Classic, Binding::Typed] {
        let app = app(binding);
        let (status, _) =
            send(&app, Method::PUT, "/api/items/42", Some(json!({"name": "X", "description": "Y"}))).await;
        assert_eq!(status, StatusCode::NOT_FOUND);

        let (_, list) = send(&app, Method::GET, "/api/items", None).await;
        assert_eq!(list.as_array().map(Vec::len), Some(2));
    }
}

#[tokio::test]
async fn delete_returns_item_and_id_is_not_reused() {
    for binding in [Binding::Classic, Binding::Typed] {
        let app = app(binding);
        let (status, removed) = send(&app, Method::DELETE, "/api/items/2", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(removed["id"], 2);

        let (status, _) = send(&app, Method::GET, "/api/items/2", None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        let (status, _) = send(&app, Method::DELETE, "/api/items/2", None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);

        let (_, created) =
            send(&app, Method::POST, "/api/items", Some(json!({"name": "n", "description": "d"}))).await;
        assert_eq!(created["id"], 3);
    }
}

#[tokio::test]
async fn non_integer_id_differs_between_bindings() {
    let (status, body) = send(&app(Binding::Classic), Method::GET, "/api/items/abc", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body, json!({"message": "Item not found"}));

    let (status, body) = send(&app(Binding::Typed), Method::GET, "/api/items/abc", None).await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert!(body["detail"].is_string());
}

#[tokio::test]
async fn typed_create_rejects_incomplete_body() {
    let app = app(Binding::Typed);
    let (status, body) = send(&app, Method::POST, "/api/items", Some(json!({"name": "no description"}))).await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert!(body["detail"].is_string());

    let (_, list) = send(&app, Method::GET, "/api/items", None).await;
    assert_eq!(list.as_array().map(Vec::len), Some(2));
}

#[tokio::test]
async fn welcome_lists_endpoints_in_binding_notation() {
    let (status, body) = send(&app(Binding::Classic), Method::GET, "/", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "Welcome to the Classic API");
    let endpoints = body["endpoints"].as_array().unwrap();
    assert_eq!(endpoints.len(), 6);
    assert!(endpoints.iter().any(|e| e["path"] == "/api/items/<id>" && e["method"] == "DELETE"));

    let typed = describe(Binding::Typed);
    assert_eq!(typed.message, "Welcome to the Typed API");
    assert!(typed.endpoints.iter().any(|e| e.path == "/api/items/{item_id}"));
}

#[tokio::test]
async fn health_metrics_and_openapi() {
    let app = app(Binding::Typed);
    let (status, body) = send(&app, Method::GET, "/health", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({"status": "ok"}));

    let _ = send(&app, Method::GET, "/api/items/77", None).await;
    let res = app
        .clone()
        .oneshot(Request::builder().uri("/metrics").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    let text = String::from_utf8(to_bytes(res.into_body(), usize::MAX).await.unwrap().to_vec()).unwrap();
    assert!(text.contains("item_api_requests_total"));
    assert!(text.contains("item_api_not_found_total"));

    let (status, doc) = send(&app, Method::GET, "/openapi.json", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(doc["info"]["title"], "Item API (typed)");
    assert!(doc["paths"]["/api/items/{item_id}"].is_object());

    let (status, _) = send(&crate::app(Binding::Classic), Method::GET, "/openapi.json", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}
