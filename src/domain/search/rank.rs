// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

//! Duplicate collapsing and deterministic result ordering.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::domain::models::hit::Hit;

/// The two supported total orders. Both end on `doc_id` ascending,
/// which makes pagination stable even under score/date ties.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    #[default]
    Relevance,
    Latest,
}

impl SortOrder {
    pub fn as_str(self) -> &'static str {
        match self {
            SortOrder::Relevance => "relevance",
            SortOrder::Latest => "latest",
        }
    }
}

/// Collapse hits sharing a `doc_id` to one representative: higher score
/// wins, ties go to the more recent primary date (no date sorts as the
/// oldest possible).
pub fn dedup_hits(hits: Vec<Hit>) -> Vec<Hit> {
    let mut best: Vec<Hit> = Vec::with_capacity(hits.len());
    let mut index_by_id: HashMap<String, usize> = HashMap::new();
    for hit in hits {
        match index_by_id.get(hit.doc_id()) {
            Some(&i) => {
                let current = &best[i];
                if (hit.score, hit.date_primary) > (current.score, current.date_primary) {
                    best[i] = hit;
                }
            }
            None => {
                index_by_id.insert(hit.doc_id().to_string(), best.len());
                best.push(hit);
            }
        }
    }
    best
}

/// Sort into the requested total order.
pub fn sort_hits(hits: &mut [Hit], order: SortOrder) {
    match order {
        SortOrder::Relevance => hits.sort_by(|a, b| {
            b.score
                .cmp(&a.score)
                .then(b.date_primary.cmp(&a.date_primary))
                .then_with(|| a.doc_id().cmp(b.doc_id()))
        }),
        SortOrder::Latest => hits.sort_by(|a, b| {
            b.date_primary
                .cmp(&a.date_primary)
                .then(b.score.cmp(&a.score))
                .then_with(|| a.doc_id().cmp(b.doc_id()))
        }),
    }
}

/// Convenience for the service: dedup then sort.
pub fn dedup_and_sort(hits: Vec<Hit>, order: SortOrder) -> Vec<Hit> {
    let mut unique = dedup_hits(hits);
    sort_hits(&mut unique, order);
    unique
}
