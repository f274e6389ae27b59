// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use axum::http::StatusCode;
use serde_json::Value;

use crate::integration::helpers::{
    create_test_app, create_test_app_missing_kb, create_test_app_with_synonyms,
};

fn kb_line(title: &str, body: &str, date: &str, url: &str) -> String {
    serde_json::to_string(&serde_json::json!({
        "title": title,
        "text": body,
        "date": date,
        "url": url,
    }))
    .unwrap()
}

#[tokio::test]
async fn test_search_returns_envelope() {
    let app = create_test_app(&kb_line("苔の観察会", "今月は苔を観察した", "2020-04-01", "https://example.jp/1")).await;

    let response = app.server.get("/api/search").add_query_param("q", "苔").await;
    assert_eq!(response.status_code(), StatusCode::OK);

    let body: Value = response.json();
    assert_eq!(body["total_hits"], 1);
    assert_eq!(body["error"], Value::Null);
    assert_eq!(body["items"][0]["rank"], 1);
    assert!(body["items"][0]["title"]
        .as_str()
        .unwrap()
        .contains("<mark>苔</mark>"));
}

#[tokio::test]
async fn test_synonym_and_kana_variants_hit_equally() {
    let jsonl = [
        kb_line("苔の手入れ", "胞子", "2020-01-01", "https://example.jp/a"),
        kb_line("コケの育て方", "水やり", "2021-01-01", "https://example.jp/b"),
        kb_line("こけ玉づくり", "実演", "2022-01-01", "https://example.jp/c"),
    ]
    .join("\n");
    let app =
        create_test_app_with_synonyms(&jsonl, &[("苔", "コケ"), ("苔", "こけ")]).await;

    for q in ["苔", "コケ", "こけ"] {
        let response = app.server.get("/api/search").add_query_param("q", q).await;
        let body: Value = response.json();
        assert_eq!(body["total_hits"], 3, "query {q} should hit every variant");
    }
}

#[tokio::test]
async fn test_pagination_covers_every_hit() {
    let jsonl: Vec<String> = (1..=12)
        .map(|i| {
            kb_line(
                &format!("盆栽展 第{i}回"),
                "会員の盆栽を展示",
                &format!("20{i:02}-05-01"),
                &format!("https://example.jp/bonsai/{i}"),
            )
        })
        .collect();
    let app = create_test_app(&jsonl.join("\n")).await;

    let p1: Value = app
        .server
        .get("/api/search")
        .add_query_param("q", "盆栽")
        .await
        .json();
    assert_eq!(p1["total_hits"], 12);
    assert_eq!(p1["items"].as_array().unwrap().len(), 5);
    assert_eq!(p1["has_more"], true);
    assert_eq!(p1["next_page"], 2);

    let p3: Value = app
        .server
        .get("/api/search")
        .add_query_param("q", "盆栽")
        .add_query_param("page", "3")
        .await
        .json();
    assert_eq!(p3["items"].as_array().unwrap().len(), 2);
    assert_eq!(p3["has_more"], false);
    assert_eq!(p3["items"][0]["rank"], 11);

    // A page past the end is an empty success, not an error.
    let p9: Value = app
        .server
        .get("/api/search")
        .add_query_param("q", "盆栽")
        .add_query_param("page", "9")
        .await
        .json();
    assert_eq!(p9["items"].as_array().unwrap().len(), 0);
    assert_eq!(p9["error"], Value::Null);
}

#[tokio::test]
async fn test_trailing_year_range_filters_results() {
    let jsonl = [
        kb_line("剪定講習会", "松の剪定", "1999-03-01", "https://example.jp/1999"),
        kb_line("剪定講習会", "梅の剪定", "2001-03-01", "https://example.jp/2001"),
        kb_line("剪定講習会", "桜の剪定", "2005-03-01", "https://example.jp/2005"),
    ]
    .join("\n");
    let app = create_test_app(&jsonl).await;

    let body: Value = app
        .server
        .get("/api/search")
        .add_query_param("q", "剪定 1999-2001")
        .await
        .json();
    assert_eq!(body["total_hits"], 2);
}

#[tokio::test]
async fn test_tracking_params_do_not_duplicate_results() {
    let jsonl = [
        kb_line("苔玉教室", "苔玉を作る", "2020-04-01", "https://example.jp/koke"),
        kb_line(
            "苔玉教室",
            "苔玉を作る",
            "2020-04-01",
            "https://example.jp/koke?utm_source=newsletter&utm_medium=mail",
        ),
    ]
    .join("\n");
    let app = create_test_app(&jsonl).await;

    let body: Value = app
        .server
        .get("/api/search")
        .add_query_param("q", "苔玉")
        .await
        .json();
    assert_eq!(body["total_hits"], 1);
}

#[tokio::test]
async fn test_missing_kb_reports_error_code_with_200() {
    let app = create_test_app_missing_kb().await;

    let response = app.server.get("/api/search").add_query_param("q", "苔").await;
    assert_eq!(response.status_code(), StatusCode::OK);
    let body: Value = response.json();
    assert_eq!(body["error"], "kb_missing");
    assert_eq!(body["total_hits"], 0);
}

#[tokio::test]
async fn test_unloaded_kb_reports_not_ready() {
    let app = create_test_app_missing_kb().await;
    // The file now exists but no snapshot has been published yet.
    std::fs::write(&app.kb_path, kb_line("苔", "x", "2020-01-01", "")).unwrap();

    let body: Value = app
        .server
        .get("/api/search")
        .add_query_param("q", "苔")
        .await
        .json();
    assert_eq!(body["error"], "not_ready");
}

#[tokio::test]
async fn test_refresh_publishes_new_snapshot() {
    let app = create_test_app(&kb_line("苔の観察会", "本文", "2020-04-01", "https://example.jp/1")).await;
    let old_version = app.store.current().unwrap().version;

    std::fs::write(
        &app.kb_path,
        [
            kb_line("苔の観察会", "本文", "2020-04-01", "https://example.jp/1"),
            kb_line("新しい記事", "追加の本文", "2024-04-01", "https://example.jp/2"),
        ]
        .join("\n"),
    )
    .unwrap();

    let response = app.server.post("/api/refresh").await;
    assert_eq!(response.status_code(), StatusCode::ACCEPTED);

    for _ in 0..100 {
        if app.store.current().unwrap().version > old_version {
            break;
        }
        tokio::time::sleep(std::time::Duration::from_millis(10)).await;
    }
    assert!(app.store.current().unwrap().version > old_version);

    let body: Value = app
        .server
        .get("/api/search")
        .add_query_param("q", "新しい記事")
        .await
        .json();
    assert_eq!(body["total_hits"], 1);
}

#[tokio::test]
async fn test_empty_query_is_an_empty_success() {
    let app = create_test_app(&kb_line("苔", "本文", "2020-01-01", "")).await;

    let body: Value = app
        .server
        .get("/api/search")
        .add_query_param("q", "   ")
        .await
        .json();
    assert_eq!(body["total_hits"], 0);
    assert_eq!(body["error"], Value::Null);
}

#[tokio::test]
async fn test_latest_order_and_page_size_clamp() {
    let jsonl = [
        kb_line("苔の観察 春", "苔", "2019-04-01", "https://example.jp/1"),
        kb_line("苔の観察 秋", "苔", "2023-10-01", "https://example.jp/2"),
    ]
    .join("\n");
    let app = create_test_app(&jsonl).await;

    let body: Value = app
        .server
        .get("/api/search")
        .add_query_param("q", "苔")
        .add_query_param("order", "latest")
        .add_query_param("page_size", "500")
        .await
        .json();
    assert_eq!(body["order_used"], "latest");
    assert_eq!(body["page_size"], 50);
    assert_eq!(body["items"][0]["date_primary"], "2023-10-01");
}
