// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use std::sync::Arc;

use chrono::NaiveDate;

use super::document::Document;

/// Result of evaluating one document against one structured query.
///
/// A proper sum type: exclusion is never encoded as a sentinel score.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchOutcome {
    Excluded,
    Included { score: i64 },
}

/// One included document, carried through dedup and ranking.
///
/// For a fixed query and snapshot the set of hits and their scores is a
/// pure function of the two inputs.
#[derive(Debug, Clone)]
pub struct Hit {
    pub score: i64,
    pub date_primary: Option<NaiveDate>,
    pub document: Arc<Document>,
}

impl Hit {
    pub fn new(score: i64, document: Arc<Document>) -> Self {
        Self {
            score,
            date_primary: document.date_primary,
            document,
        }
    }

    pub fn doc_id(&self) -> &str {
        &self.document.doc_id
    }
}
