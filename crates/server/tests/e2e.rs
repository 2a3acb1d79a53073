use std::net::SocketAddr;

use reqwest::StatusCode as HttpStatusCode;
use serde_json::{json, Value};
use tokio::net::TcpListener;

use server::Binding;

struct TestApp {
    base_url: String,
}

async fn start_server(binding: Binding) -> anyhow::Result<TestApp> {
    let app = server::startup::app(binding);
    let listener = TcpListener::bind((std::net::Ipv4Addr::LOCALHOST, 0)).await?;
    let addr: SocketAddr = listener.local_addr()?;
    let base_url = format!("http://{}:{}", addr.ip(), addr.port());

    tokio::spawn(async move {
        if let Err(e) = axum::serve(listener, app).await {
            eprintln!("server error: {}", e);
        }
    });

    Ok(TestApp { base_url })
}

fn client() -> reqwest::Client {
    reqwest::Client::builder().build().expect("reqwest client")
}

#[tokio::test]
async fn e2e_classic_crud_flow() -> anyhow::Result<()> {
    let app = start_server(Binding::Classic).await?;
    let c = client();

    let res = c.get(format!("{}/health", app.base_url)).send().await?;
    assert_eq!(res.status(), HttpStatusCode::OK);

    let res = c
        .post(format!("{}/api/items", app.base_url))
        .json(&json!({"name": "Lamp", "description": "Desk lamp"}))
        .send()
        .await?;
    assert_eq!(res.status(), HttpStatusCode::CREATED);
    let created: Value = res.json().await?;
    assert_eq!(created["id"], 3);

    let res = c
        .put(format!("{}/api/items/3", app.base_url))
        .json(&json!({"description": "Floor lamp"}))
        .send()
        .await?;
    assert_eq!(res.status(), HttpStatusCode::OK);
    let updated: Value = res.json().await?;
    assert_eq!(updated, json!({"id": 3, "name": "Lamp", "description": "Floor lamp"}));

    let res = c.delete(format!("{}/api/items/3", app.base_url)).send().await?;
    assert_eq!(res.status(), HttpStatusCode::OK);

    let res = c.get(format!("{}/api/items/3", app.base_url)).send().await?;
    assert_eq!(res.status(), HttpStatusCode::NOT_FOUND);
    let body: Value = res.json().await?;
    assert_eq!(body, json!({"message": "Item not found"}));
    Ok(())
}

#[tokio::test]
async fn e2e_typed_validation_and_cors() -> anyhow::Result<()> {
    let app = start_server(Binding::Typed).await?;
    let c = client();

    let res = c
        .post(format!("{}/api/items", app.base_url))
        .json(&json!({"description": "nameless"}))
        .send()
        .await?;
    assert_eq!(res.status(), HttpStatusCode::UNPROCESSABLE_ENTITY);
    let body: Value = res.json().await?;
    assert!(body["detail"].is_string());

    let res = c
        .get(format!("{}/api/items", app.base_url))
        .header("Origin", "http://example.test")
        .send()
        .await?;
    assert_eq!(res.status(), HttpStatusCode::OK);
    assert!(res.headers().contains_key("access-control-allow-origin"));
    let items: Vec<Value> = res.json().await?;
    assert_eq!(items.len(), 2);
    Ok(())
}
