//! End-to-end tests against a bound listener and a real data file.

use std::net::SocketAddr;

use cached_collection::{api::create_router, store::JsonFileStore, AppState, Config};
use serde_json::{json, Value};

async fn spawn_server(config: &Config) -> SocketAddr {
    JsonFileStore::new(config.data_file.clone())
        .ensure_exists()
        .await
        .unwrap();

    let app = create_router(AppState::from_config(config));
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    addr
}

#[tokio::test]
async fn test_crud_round_against_file() {
    let dir = tempfile::tempdir().unwrap();
    let config = Config {
        data_file: dir.path().join("large-file.json"),
        ..Config::default()
    };
    let addr = spawn_server(&config).await;
    let client = reqwest::Client::new();
    let base = format!("http://{}", addr);

    let listed: Value = client
        .get(format!("{}/api/data", base))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(listed, json!([]));

    let created = client
        .post(format!("{}/api/data", base))
        .json(&json!({"id": 1, "name": "x"}))
        .send()
        .await
        .unwrap();
    assert_eq!(created.status(), reqwest::StatusCode::OK);

    let updated = client
        .put(format!("{}/api/data/1", base))
        .json(&json!({"name": "y"}))
        .send()
        .await
        .unwrap();
    assert_eq!(updated.status(), reqwest::StatusCode::OK);

    let on_disk = tokio::fs::read_to_string(&config.data_file).await.unwrap();
    assert_eq!(on_disk, "[\n  {\n    \"id\": 1,\n    \"name\": \"y\"\n  }\n]");

    let listed: Value = client
        .get(format!("{}/api/data", base))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(listed, json!([{"id": 1, "name": "y"}]));

    let missing = client
        .delete(format!("{}/api/data/2", base))
        .send()
        .await
        .unwrap();
    assert_eq!(missing.status(), reqwest::StatusCode::NOT_FOUND);

    let flushed = client
        .post(format!("{}/api/invalidate-cache", base))
        .send()
        .await
        .unwrap()
        .text()
        .await
        .unwrap();
    assert_eq!(flushed, "Cache invalidated");
}

#[tokio::test]
async fn test_missing_nested_file_is_created_empty() {
    let dir = tempfile::tempdir().unwrap();
    let config = Config {
        data_file: dir.path().join("data").join("nested").join("large-file.json"),
        ..Config::default()
    };
    spawn_server(&config).await;

    let on_disk = tokio::fs::read_to_string(&config.data_file).await.unwrap();
    assert_eq!(on_disk, "[]");
}
