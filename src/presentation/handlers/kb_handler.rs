// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use axum::{
    extract::Extension, http::StatusCode, response::IntoResponse, Json,
};
use serde_json::json;
use std::sync::Arc;

use crate::infrastructure::kb::store::SnapshotStore;

/// `GET /health`
///
/// Liveness plus a summary of the published snapshot. Always 200 so a
/// probe never kills a process that is merely waiting for its data.
pub async fn health(Extension(store): Extension<Arc<SnapshotStore>>) -> impl IntoResponse {
    let snapshot = store.current();
    Json(json!({
        "ok": true,
        "ready": snapshot.is_some(),
        "kb_size": snapshot.as_ref().map(|s| s.len()).unwrap_or(0),
        "kb_fingerprint": snapshot.as_ref().map(|s| s.fingerprint.clone()),
    }))
}

/// `GET /ready`
///
/// 503 until a snapshot has been published.
pub async fn ready(Extension(store): Extension<Arc<SnapshotStore>>) -> impl IntoResponse {
    if store.is_ready() {
        (StatusCode::OK, "OK")
    } else {
        (StatusCode::SERVICE_UNAVAILABLE, "loading")
    }
}

/// `POST /api/refresh`
///
/// Triggers an async snapshot reload and answers immediately.
pub async fn refresh(Extension(store): Extension<Arc<SnapshotStore>>) -> impl IntoResponse {
    store.spawn_reload();
    (StatusCode::ACCEPTED, Json(json!({ "status": "reloading" })))
}
