// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use axum::http::StatusCode;
use serde_json::Value;

use crate::integration::helpers::{create_test_app, create_test_app_missing_kb};

#[tokio::test]
async fn test_health_reports_snapshot_summary() {
    let app = create_test_app(
        "{\"title\":\"苔の観察会\",\"text\":\"本文\",\"date\":\"2020-04-01\"}\n",
    )
    .await;

    let response = app.server.get("/health").await;
    assert_eq!(response.status_code(), StatusCode::OK);
    let body: Value = response.json();
    assert_eq!(body["ok"], true);
    assert_eq!(body["ready"], true);
    assert_eq!(body["kb_size"], 1);
    assert!(body["kb_fingerprint"].as_str().unwrap().len() == 64);
}

#[tokio::test]
async fn test_health_stays_200_without_snapshot() {
    let app = create_test_app_missing_kb().await;

    let response = app.server.get("/health").await;
    assert_eq!(response.status_code(), StatusCode::OK);
    let body: Value = response.json();
    assert_eq!(body["ok"], true);
    assert_eq!(body["ready"], false);
    assert_eq!(body["kb_size"], 0);
}

#[tokio::test]
async fn test_ready_flips_with_snapshot() {
    let missing = create_test_app_missing_kb().await;
    let response = missing.server.get("/ready").await;
    assert_eq!(response.status_code(), StatusCode::SERVICE_UNAVAILABLE);

    let loaded = create_test_app("{\"title\":\"a\",\"text\":\"b\"}\n").await;
    let response = loaded.server.get("/ready").await;
    assert_eq!(response.status_code(), StatusCode::OK);
}

#[tokio::test]
async fn test_version_returns_package_version() {
    let app = create_test_app("{\"title\":\"a\",\"text\":\"b\"}\n").await;
    let response = app.server.get("/version").await;
    assert_eq!(response.status_code(), StatusCode::OK);
    assert_eq!(response.text(), env!("CARGO_PKG_VERSION"));
}
