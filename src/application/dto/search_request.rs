// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use serde::{Deserialize, Serialize};

use crate::domain::search::rank::SortOrder;

/// Page size bounds; out-of-range request values are clamped, never
/// rejected, so the endpoint stays a plain 200 for every caller.
pub const MIN_PAGE_SIZE: u32 = 1;
pub const MAX_PAGE_SIZE: u32 = 50;
pub const DEFAULT_PAGE_SIZE: u32 = 5;

/// Query parameters of `GET /api/search`.
#[derive(Debug, Clone, Deserialize)]
pub struct SearchRequestDto {
    #[serde(default)]
    pub q: String,
    #[serde(default = "default_page")]
    pub page: u32,
    #[serde(default = "default_page_size")]
    pub page_size: u32,
    #[serde(default)]
    pub order: SortOrder,
    /// Explicit year filter; takes precedence over a trailing year in `q`.
    pub year: Option<i32>,
    pub year_from: Option<i32>,
    pub year_to: Option<i32>,
    /// Triggers an async snapshot reload; never blocks this request.
    #[serde(default)]
    pub refresh: bool,
}

fn default_page() -> u32 {
    1
}

fn default_page_size() -> u32 {
    DEFAULT_PAGE_SIZE
}

impl SearchRequestDto {
    /// Clamp pagination to the supported bounds.
    pub fn clamped(mut self) -> Self {
        self.page = self.page.max(1);
        self.page_size = self.page_size.clamp(MIN_PAGE_SIZE, MAX_PAGE_SIZE);
        self
    }

    /// Explicit year parameters, when any is present. A single `year`
    /// beats `year_from`/`year_to`.
    pub fn explicit_year_range(&self) -> Option<(i32, i32)> {
        if let Some(y) = self.year {
            return Some((y, y));
        }
        match (self.year_from, self.year_to) {
            (None, None) => None,
            (from, to) => {
                let lo = from.unwrap_or(i32::MIN);
                let hi = to.unwrap_or(i32::MAX);
                Some((lo.min(hi), lo.max(hi)))
            }
        }
    }
}

/// One rendered result row.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchItemDto {
    /// HTML-escaped, highlighted title.
    pub title: String,
    /// HTML-escaped, highlighted excerpt.
    pub content: String,
    pub url: String,
    /// 1-based position in the full deduplicated, sorted result list.
    pub rank: usize,
    /// The bulletin's raw date string.
    pub date: String,
    /// ISO form of the parsed primary date, when one exists.
    pub date_primary: Option<String>,
}

/// The response envelope. Always well-formed, always HTTP 200; failures
/// surface through `error`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchResponseDto {
    pub items: Vec<SearchItemDto>,
    pub total_hits: usize,
    pub page: u32,
    pub page_size: u32,
    pub has_more: bool,
    pub next_page: Option<u32>,
    pub error: Option<String>,
    pub order_used: String,
}

impl SearchResponseDto {
    /// An empty success response.
    pub fn empty(page: u32, page_size: u32, order: SortOrder) -> Self {
        Self {
            items: Vec::new(),
            total_hits: 0,
            page,
            page_size,
            has_more: false,
            next_page: None,
            error: None,
            order_used: order.as_str().to_string(),
        }
    }

    /// An empty response carrying an error code.
    pub fn error(code: &str, page: u32, page_size: u32, order: SortOrder) -> Self {
        Self {
            error: Some(code.to_string()),
            ..Self::empty(page, page_size, order)
        }
    }
}
