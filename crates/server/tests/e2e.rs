use std::net::SocketAddr;
use std::path::PathBuf;

use reqwest::StatusCode as HttpStatusCode;
use serde_json::{json, Value};
use todo_configs::{StoreBackend, StoreConfig};
use todo_server::{build_store, routes, AppState};
use tokio::net::TcpListener;
use uuid::Uuid;

struct TestApp {
    base_url: String,
    data_file: PathBuf,
}

/// Serve the full app over a real socket, backed by a fresh JSON file.
async fn start_server() -> anyhow::Result<TestApp> {
    let data_file = std::env::temp_dir()
        .join(format!("todo_e2e_{}", Uuid::new_v4()))
        .join("todos.json");
    let store = build_store(&StoreConfig { backend: StoreBackend::File, data_file: data_file.clone() }).await?;

    let app = routes::build_router(
        AppState::new(store),
        tower_http::cors::CorsLayer::very_permissive(),
        std::path::Path::new("/nonexistent-frontend-for-tests"),
    );
    let listener = TcpListener::bind((std::net::Ipv4Addr::LOCALHOST, 0)).await?;
    let addr: SocketAddr = listener.local_addr()?;
    let base_url = format!("http://{}:{}", addr.ip(), addr.port());

    tokio::spawn(async move {
        if let Err(e) = axum::serve(listener, app).await { eprintln!("server error: {}", e); }
    });

    Ok(TestApp { base_url, data_file })
}

#[tokio::test]
async fn e2e_file_backed_crud() -> anyhow::Result<()> {
    let app = start_server().await?;
    let c = reqwest::Client::new();
    let todos_url = format!("{}/api/todos", app.base_url);

    // starts empty
    let body: Value = c.get(&todos_url).send().await?.json().await?;
    assert_eq!(body, json!({"todos": []}));

    // create
    let res = c.post(&todos_url).json(&json!({"title": "ship it", "description": " soon "})).send().await?;
    assert_eq!(res.status(), HttpStatusCode::CREATED);
    let created: Value = res.json().await?;
    let id = created["todo"]["id"].as_str().expect("id").to_string();
    assert_eq!(created["todo"]["description"], "soon");

    // the file on disk has it, camelCase and pretty-printed
    let raw = tokio::fs::read_to_string(&app.data_file).await?;
    assert!(raw.contains("\"createdAt\""));
    assert!(raw.contains('\n'));

    // complete
    let res = c.patch(format!("{todos_url}/{id}")).json(&json!({"completed": true})).send().await?;
    assert_eq!(res.status(), HttpStatusCode::OK);
    let updated: Value = res.json().await?;
    assert_eq!(updated["todo"]["completed"], true);
    assert_eq!(updated["todo"]["title"], "ship it");

    // delete
    let res = c.delete(format!("{todos_url}/{id}")).send().await?;
    assert_eq!(res.status(), HttpStatusCode::NO_CONTENT);
    let res = c.get(format!("{todos_url}/{id}")).send().await?;
    assert_eq!(res.status(), HttpStatusCode::NOT_FOUND);

    if let Some(dir) = app.data_file.parent() {
        let _ = tokio::fs::remove_dir_all(dir).await;
    }
    Ok(())
}

#[tokio::test]
async fn e2e_public_health() -> anyhow::Result<()> {
    let app = start_server().await?;
    let res = reqwest::get(format!("{}/health", app.base_url)).await?;
    assert_eq!(res.status(), HttpStatusCode::OK);
    let body = res.json::<Value>().await?;
    assert_eq!(body["status"], "ok");
    Ok(())
}
