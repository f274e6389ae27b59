// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

//! Atomically-swapped snapshot store.
//!
//! A reload builds the whole new snapshot off to the side and swaps the
//! shared pointer at the end; queries keep whichever snapshot they read
//! for their full duration. A failed reload leaves the previous
//! snapshot published (fail-open).

use std::path::Path;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::Arc;

use parking_lot::RwLock;
use thiserror::Error;
use tracing::{error, info, warn};

use crate::config::settings::KbSettings;
use crate::domain::models::snapshot::Snapshot;

use super::loader::parse_snapshot;

#[derive(Debug, Error)]
pub enum ReloadError {
    #[error("kb download failed: {0}")]
    Download(#[from] reqwest::Error),
    #[error("kb file unavailable: {0}")]
    Io(#[from] std::io::Error),
}

pub struct SnapshotStore {
    kb: KbSettings,
    body_fold_prefix: usize,
    current: RwLock<Option<Arc<Snapshot>>>,
    next_version: AtomicU64,
    reload_in_flight: AtomicBool,
}

impl SnapshotStore {
    pub fn new(kb: KbSettings, body_fold_prefix: usize) -> Self {
        Self {
            kb,
            body_fold_prefix,
            current: RwLock::new(None),
            next_version: AtomicU64::new(1),
            reload_in_flight: AtomicBool::new(false),
        }
    }

    /// The currently published snapshot, if any.
    pub fn current(&self) -> Option<Arc<Snapshot>> {
        self.current.read().clone()
    }

    pub fn is_ready(&self) -> bool {
        self.current.read().is_some()
    }

    /// Whether the KB source file exists at all. Distinguishes
    /// "missing" from "present but not loaded yet".
    pub fn kb_file_exists(&self) -> bool {
        Path::new(&self.kb.path).exists()
    }

    /// Download (when a URL is configured), parse and publish a new
    /// snapshot. On error the previously published snapshot stays
    /// untouched.
    pub async fn reload(&self) -> Result<Arc<Snapshot>, ReloadError> {
        if let Some(url) = self.kb.url.as_deref().filter(|u| u.starts_with("http")) {
            let bytes = reqwest::get(url).await?.error_for_status()?.bytes().await?;
            if let Some(parent) = Path::new(&self.kb.path).parent() {
                tokio::fs::create_dir_all(parent).await?;
            }
            tokio::fs::write(&self.kb.path, &bytes).await?;
            info!(url, bytes = bytes.len(), "kb downloaded");
        }

        let bytes = tokio::fs::read(&self.kb.path).await?;
        let version = self.next_version.fetch_add(1, Ordering::Relaxed);
        let snapshot = Arc::new(parse_snapshot(&bytes, version, self.body_fold_prefix));
        info!(
            version,
            documents = snapshot.len(),
            fingerprint = %snapshot.fingerprint,
            "snapshot published"
        );
        *self.current.write() = Some(snapshot.clone());
        Ok(snapshot)
    }

    #[cfg(test)]
    pub fn publish_for_tests(&self, snapshot: Snapshot) {
        *self.current.write() = Some(Arc::new(snapshot));
    }

    /// Fire-and-forget reload; concurrent triggers collapse into one.
    pub fn spawn_reload(self: &Arc<Self>) {
        if self.reload_in_flight.swap(true, Ordering::SeqCst) {
            warn!("kb reload already in flight, ignoring trigger");
            return;
        }
        let store = Arc::clone(self);
        tokio::spawn(async move {
            if let Err(e) = store.reload().await {
                // Fail-open: the old snapshot stays valid.
                error!(error = %e, "kb reload failed, keeping previous snapshot");
            }
            store.reload_in_flight.store(false, Ordering::SeqCst);
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn store_for(path: &Path) -> SnapshotStore {
        SnapshotStore::new(
            KbSettings {
                path: path.to_string_lossy().into_owned(),
                url: None,
                synonyms_path: None,
            },
            4000,
        )
    }

    #[tokio::test]
    async fn test_reload_publishes_snapshot() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("kb.jsonl");
        std::fs::write(&path, "{\"title\":\"苔\",\"text\":\"本文\"}\n").unwrap();

        let store = store_for(&path);
        assert!(!store.is_ready());
        let snap = store.reload().await.unwrap();
        assert_eq!(snap.len(), 1);
        assert!(store.is_ready());
    }

    #[tokio::test]
    async fn test_reload_replaces_version() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("kb.jsonl");
        std::fs::write(&path, "{\"title\":\"a\",\"text\":\"x\"}\n").unwrap();

        let store = store_for(&path);
        let first = store.reload().await.unwrap();
        std::fs::write(&path, "{\"title\":\"b\",\"text\":\"y\"}\n").unwrap();
        let second = store.reload().await.unwrap();
        assert!(second.version > first.version);
        assert_ne!(first.fingerprint, second.fingerprint);
        assert_eq!(store.current().unwrap().version, second.version);
    }

    #[tokio::test]
    async fn test_failed_reload_keeps_old_snapshot() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("kb.jsonl");
        std::fs::write(&path, "{\"title\":\"a\",\"text\":\"x\"}\n").unwrap();

        let store = store_for(&path);
        let first = store.reload().await.unwrap();
        std::fs::remove_file(&path).unwrap();
        assert!(store.reload().await.is_err());
        let current = store.current().unwrap();
        assert_eq!(current.version, first.version);
    }
}
