// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use axum::{
    extract::{Extension, Query},
    http::{header, StatusCode},
    response::IntoResponse,
    Json,
};
use std::panic::{catch_unwind, AssertUnwindSafe};
use std::sync::Arc;
use tracing::error;

use crate::{
    application::dto::search_request::{SearchRequestDto, SearchResponseDto},
    domain::services::search_service::SearchService,
    infrastructure::kb::store::SnapshotStore,
};

/// `GET /api/search`
///
/// Always answers HTTP 200 with a well-formed envelope; a knowledge
/// base that is missing or still loading is reported through the
/// `error` field, never through the status code.
pub async fn search(
    Extension(service): Extension<Arc<SearchService>>,
    Extension(store): Extension<Arc<SnapshotStore>>,
    Query(params): Query<SearchRequestDto>,
) -> impl IntoResponse {
    let req = params.clamped();
    if req.refresh {
        store.spawn_reload();
    }
    // This is the single boundary where any failure becomes a payload
    // error code; the caller always gets a well-formed 200 envelope.
    let body = match catch_unwind(AssertUnwindSafe(|| service.execute(&req))) {
        Ok(Ok(resp)) => resp,
        Ok(Err(e)) => SearchResponseDto::error(e.code(), req.page, req.page_size, req.order),
        Err(panic) => {
            let reason = panic
                .downcast_ref::<&str>()
                .copied()
                .or_else(|| panic.downcast_ref::<String>().map(String::as_str))
                .unwrap_or("unknown");
            error!(reason, query = %req.q, "search pipeline panicked");
            SearchResponseDto::error("exception", req.page, req.page_size, req.order)
        }
    };
    (
        StatusCode::OK,
        [(header::CACHE_CONTROL, "no-store")],
        Json(body),
    )
}
