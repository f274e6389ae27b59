// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use std::sync::Arc;

use chrono::{DateTime, Utc};

use super::document::Document;

/// An immutable, versioned view of the whole document collection.
///
/// A reload builds a brand-new snapshot off to the side; readers keep
/// whichever snapshot they picked up for the full duration of a query.
#[derive(Debug)]
pub struct Snapshot {
    pub documents: Vec<Arc<Document>>,
    /// SHA-256 over the source bytes the snapshot was built from.
    pub fingerprint: String,
    pub version: u64,
    pub loaded_at: DateTime<Utc>,
}

impl Snapshot {
    pub fn new(documents: Vec<Arc<Document>>, fingerprint: String, version: u64) -> Self {
        Self {
            documents,
            fingerprint,
            version,
            loaded_at: Utc::now(),
        }
    }

    pub fn len(&self) -> usize {
        self.documents.len()
    }

    pub fn is_empty(&self) -> bool {
        self.documents.is_empty()
    }
}
