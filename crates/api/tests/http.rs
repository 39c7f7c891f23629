//! End-to-end tests against a live listener

use serde_json::Value;
use std::net::SocketAddr;
use std::sync::Arc;
use tempfile::TempDir;
use weather_api::{create_router, AppState};
use weather_storage::testing::{sample_measurements, sample_stations, seed_database};
use weather_storage::Repository;

async fn spawn_server() -> (TempDir, SocketAddr) {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("hawaii.sqlite");
    seed_database(&path, &sample_stations(), &sample_measurements())
        .await
        .unwrap();

    let repository = Repository::open(&path, 4).await.unwrap();
    let app = create_router(Arc::new(AppState::new(repository)));

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    (dir, addr)
}

#[tokio::test]
async fn test_root_is_html() {
    let (_dir, addr) = spawn_server().await;
    let response = reqwest::get(format!("http://{}/", addr)).await.unwrap();

    assert!(response.status().is_success());
    let content_type = response.headers()["content-type"].to_str().unwrap().to_string();
    assert!(content_type.starts_with("text/html"));
    assert!(response.text().await.unwrap().contains("/api/v1.0/stations"));
}

#[tokio::test]
async fn test_json_routes() {
    let (_dir, addr) = spawn_server().await;

    let stations: Value = reqwest::get(format!("http://{}/api/v1.0/stations", addr))
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(stations.as_array().unwrap().len(), 3);

    let range = reqwest::get(format!("http://{}/api/v1.0/2011-08-11/2011-08-12", addr))
        .await
        .unwrap();
    assert_eq!(
        range.headers()["content-type"].to_str().unwrap(),
        "application/json"
    );
    let range: Value = range.json().await.unwrap();
    assert_eq!(range.as_array().unwrap().len(), 1);
    assert_eq!(range[0]["Maximum Temperature"], 80.0);
}

#[tokio::test]
async fn test_concurrent_reads_agree() {
    let (_dir, addr) = spawn_server().await;
    let url = format!("http://{}/api/v1.0/tobs", addr);

    let bodies = fetch_concurrently(&url).await;
    assert!(bodies.windows(2).all(|w| w[0] == w[1]));
}

async fn fetch_concurrently(url: &str) -> Vec<String> {
    let mut handles = Vec::new();
    for _ in 0..8 {
        let url = url.to_string();
        handles.push(tokio::spawn(async move {
            reqwest::get(url).await.unwrap().text().await.unwrap()
        }));
    }

    let mut bodies = Vec::new();
    for handle in handles {
        bodies.push(handle.await.unwrap());
    }
    bodies
}
