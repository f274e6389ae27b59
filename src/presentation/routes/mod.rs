// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use std::sync::Arc;

use axum::{
    routing::{get, post},
    Extension, Router,
};
use tower_http::trace::TraceLayer;

use crate::domain::services::search_service::SearchService;
use crate::infrastructure::kb::store::SnapshotStore;
use crate::presentation::handlers::{kb_handler, search_handler};

/// Build the application router with its shared state attached.
pub fn routes(service: Arc<SearchService>, store: Arc<SnapshotStore>) -> Router {
    let public_routes = Router::new()
        .route("/health", get(kb_handler::health))
        .route("/ready", get(kb_handler::ready))
        .route("/version", get(version));

    let api_routes = Router::new()
        .route("/api/search", get(search_handler::search))
        .route("/api/refresh", post(kb_handler::refresh));

    Router::new()
        .merge(public_routes)
        .merge(api_routes)
        .layer(TraceLayer::new_for_http())
        .layer(Extension(service))
        .layer(Extension(store))
}

/// Version information endpoint
pub async fn version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
