// Copyright 2025 Kirky.X
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

use std::path::Path;
use std::sync::Arc;

use tokio::net::TcpListener;
use tracing::{info, warn};

use bulletin_search::config::settings::Settings;
use bulletin_search::domain::search::synonyms::SynonymTable;
use bulletin_search::domain::services::search_service::SearchService;
use bulletin_search::infrastructure::kb::store::SnapshotStore;
use bulletin_search::presentation::routes;
use bulletin_search::utils::telemetry;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // 1. Initialize logging
    telemetry::init_telemetry();
    info!("Starting bulletin-search...");

    // 2. Load configuration
    let settings = Settings::new()?;
    info!("Configuration loaded");

    // 3. Load the synonym table; a missing file degrades to an empty table
    let synonyms = settings
        .kb
        .synonyms_path
        .as_deref()
        .map(|p| SynonymTable::load(Path::new(p)))
        .unwrap_or_else(SynonymTable::empty);
    info!(pairs = synonyms.pair_count(), "Synonym table loaded");

    // 4. Initialize the snapshot store and attempt the initial load.
    //    A failure leaves the service answering "not ready" rather
    //    than aborting startup.
    let store = Arc::new(SnapshotStore::new(
        settings.kb.clone(),
        settings.search.body_fold_prefix,
    ));
    match store.reload().await {
        Ok(snapshot) => info!(documents = snapshot.len(), "Knowledge base loaded"),
        Err(e) => warn!(error = %e, "Initial knowledge base load failed, serving not-ready"),
    }

    let service = Arc::new(SearchService::new(
        store.clone(),
        synonyms,
        settings.search.clone(),
    ));

    // 5. Start HTTP server
    let app = routes::routes(service, store);
    let addr = format!("{}:{}", settings.server.host, settings.server.port);
    let listener = TcpListener::bind(&addr).await?;
    info!("Server listening on {}", addr);

    axum::serve(listener, app).await?;

    Ok(())
}
