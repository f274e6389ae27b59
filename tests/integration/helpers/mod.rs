// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use std::sync::Arc;

use axum_test::TestServer;
use tempfile::TempDir;

use bulletin_search::config::settings::{KbSettings, SearchSettings};
use bulletin_search::domain::search::synonyms::SynonymTable;
use bulletin_search::domain::services::search_service::SearchService;
use bulletin_search::infrastructure::kb::store::SnapshotStore;
use bulletin_search::presentation::routes;

#[allow(dead_code)]
pub struct TestApp {
    pub server: TestServer,
    pub store: Arc<SnapshotStore>,
    pub kb_path: std::path::PathBuf,
    // Keep the KB directory alive for the test's duration
    dir: TempDir,
}

/// Spin up the app over a temporary KB file containing `jsonl`.
pub async fn create_test_app(jsonl: &str) -> TestApp {
    create_test_app_with_synonyms(jsonl, &[]).await
}

pub async fn create_test_app_with_synonyms(jsonl: &str, pairs: &[(&str, &str)]) -> TestApp {
    let dir = tempfile::tempdir().unwrap();
    let kb_path = dir.path().join("kb.jsonl");
    std::fs::write(&kb_path, jsonl).unwrap();

    let store = Arc::new(SnapshotStore::new(
        KbSettings {
            path: kb_path.to_string_lossy().into_owned(),
            url: None,
            synonyms_path: None,
        },
        4000,
    ));
    store.reload().await.unwrap();

    let synonyms =
        SynonymTable::from_pairs(pairs.iter().map(|(c, v)| (c.to_string(), v.to_string())));
    let service = Arc::new(SearchService::new(
        store.clone(),
        synonyms,
        SearchSettings::default(),
    ));

    let server = TestServer::new(routes::routes(service, store.clone())).unwrap();
    TestApp {
        server,
        store,
        kb_path,
        dir,
    }
}

/// An app whose KB file does not exist at all.
pub async fn create_test_app_missing_kb() -> TestApp {
    let dir = tempfile::tempdir().unwrap();
    let kb_path = dir.path().join("absent.jsonl");

    let store = Arc::new(SnapshotStore::new(
        KbSettings {
            path: kb_path.to_string_lossy().into_owned(),
            url: None,
            synonyms_path: None,
        },
        4000,
    ));
    let service = Arc::new(SearchService::new(
        store.clone(),
        SynonymTable::empty(),
        SearchSettings::default(),
    ));

    let server = TestServer::new(routes::routes(service, store.clone())).unwrap();
    TestApp {
        server,
        store,
        kb_path,
        dir,
    }
}
