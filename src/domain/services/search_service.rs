// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

//! The full search pipeline: parse, filter, match, dedup, rank,
//! paginate, render.

use std::sync::Arc;

use chrono::Datelike;
use thiserror::Error;
use tracing::debug;

use crate::application::dto::search_request::{
    SearchItemDto, SearchRequestDto, SearchResponseDto,
};
use crate::config::settings::SearchSettings;
use crate::domain::models::document::Document;
use crate::domain::models::hit::{Hit, MatchOutcome};
use crate::domain::search::matcher::{evaluate, MatchOptions};
use crate::domain::search::query::parse_query;
use crate::domain::search::rank::dedup_and_sort;
use crate::domain::search::snippet::{render_content, render_title, SnippetBudgets};
use crate::domain::search::synonyms::SynonymTable;
use crate::infrastructure::kb::store::SnapshotStore;

/// Why a search could not produce results. Mapped to an error code at
/// the HTTP boundary; never surfaced as a non-200 status.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum SearchServiceError {
    #[error("knowledge base file is missing")]
    KbMissing,
    #[error("knowledge base is not loaded yet")]
    NotReady,
}

impl SearchServiceError {
    pub fn code(&self) -> &'static str {
        match self {
            SearchServiceError::KbMissing => "kb_missing",
            SearchServiceError::NotReady => "not_ready",
        }
    }
}

pub struct SearchService {
    store: Arc<SnapshotStore>,
    synonyms: SynonymTable,
    settings: SearchSettings,
}

impl SearchService {
    pub fn new(store: Arc<SnapshotStore>, synonyms: SynonymTable, settings: SearchSettings) -> Self {
        Self {
            store,
            synonyms,
            settings,
        }
    }

    /// Run one search. The request must already be clamped.
    pub fn execute(&self, req: &SearchRequestDto) -> Result<SearchResponseDto, SearchServiceError> {
        let snapshot = match self.store.current() {
            Some(s) => s,
            None if !self.store.kb_file_exists() => return Err(SearchServiceError::KbMissing),
            None => return Err(SearchServiceError::NotReady),
        };

        let query = parse_query(&req.q, &self.synonyms);
        if query.is_empty() {
            return Ok(SearchResponseDto::empty(req.page, req.page_size, req.order));
        }
        // Explicit year parameters beat a trailing year in the query.
        let year_range = req.explicit_year_range().or(query.year_range);

        let opts = MatchOptions {
            fuzzy_enabled: self.settings.fuzzy_enabled,
        };
        let mut hits = Vec::new();
        for doc in &snapshot.documents {
            if let Some(range) = year_range {
                if !self.matches_year(doc, range) {
                    continue;
                }
            }
            if let MatchOutcome::Included { score } = evaluate(doc, &query, opts) {
                hits.push(Hit::new(score, Arc::clone(doc)));
            }
        }

        let hits = dedup_and_sort(hits, req.order);
        let total_hits = hits.len();
        debug!(
            query = %req.q,
            total_hits,
            snapshot_version = snapshot.version,
            "search evaluated"
        );

        let start = (req.page as usize - 1) * req.page_size as usize;
        let end = (start + req.page_size as usize).min(total_hits);
        let page_hits: &[Hit] = if start < total_hits {
            &hits[start..end]
        } else {
            &[]
        };
        let has_more = end < total_hits;

        let budgets = SnippetBudgets {
            first_chars: self.settings.snippet_first_chars,
            other_chars: self.settings.snippet_other_chars,
            side_chars: self.settings.snippet_side_chars,
            slack_chars: self.settings.snippet_slack_chars,
        };
        let terms = &query.highlight_terms;
        let items = page_hits
            .iter()
            .enumerate()
            .map(|(i, hit)| {
                let doc = &hit.document;
                let is_first = req.page == 1 && i == 0;
                SearchItemDto {
                    title: render_title(&doc.title.norm, terms),
                    content: render_content(&doc.body.norm, terms, is_first, budgets),
                    url: doc.raw.url.clone().unwrap_or_default(),
                    rank: start + i + 1,
                    date: doc.date.norm.clone(),
                    date_primary: doc.date_primary.map(|d| d.format("%Y-%m-%d").to_string()),
                }
            })
            .collect();

        Ok(SearchResponseDto {
            items,
            total_hits,
            page: req.page,
            page_size: req.page_size,
            has_more,
            next_page: has_more.then(|| req.page + 1),
            error: None,
            order_used: req.order.as_str().to_string(),
        })
    }

    fn matches_year(&self, doc: &Document, (lo, hi): (i32, i32)) -> bool {
        if self.settings.year_filter_scans_text {
            doc.years.iter().any(|&y| lo <= y && y <= hi)
        } else {
            doc.date_primary
                .map(|d| lo <= d.year() && d.year() <= hi)
                .unwrap_or(false)
        }
    }
}
