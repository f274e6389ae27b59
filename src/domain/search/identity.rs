// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

//! Stable document identity.
//!
//! Two ingestions of the same underlying source item must agree on the
//! id; distinct documents must essentially never collide. Precedence:
//! explicit id, canonical URL, content hash.

use sha2::{Digest, Sha256};
use url::Url;

use super::normalize::normalize;

/// Query parameters stripped during URL canonicalization.
const TRACKING_PARAMS: &[&str] = &["source"];

/// Stable identity for a document.
///
/// Precedence: `id://<explicit>` when an external id is present,
/// `url://<canonical>` when a usable URL is present, otherwise
/// `hash://<sha256>` over the normalized `(title, date_raw, author)`
/// triple.
pub fn assign_doc_id(
    explicit_id: Option<&str>,
    url: Option<&str>,
    title: &str,
    date_raw: Option<&str>,
    author: Option<&str>,
) -> String {
    if let Some(id) = explicit_id.map(str::trim).filter(|s| !s.is_empty()) {
        return format!("id://{id}");
    }
    if let Some(canonical) = url.and_then(canonical_url) {
        return format!("url://{canonical}");
    }
    let mut hasher = Sha256::new();
    hasher.update(normalize(title).as_bytes());
    hasher.update(b"\n");
    hasher.update(normalize(date_raw.unwrap_or_default()).as_bytes());
    hasher.update(b"\n");
    hasher.update(normalize(author.unwrap_or_default()).as_bytes());
    format!("hash://{}", hex::encode(hasher.finalize()))
}

/// Canonical form of a URL for equality comparison: lower-cased
/// scheme/host, no fragment, known tracking query parameters removed.
/// Placeholder values (empty, `-`, unparseable) yield `None`.
pub fn canonical_url(raw: &str) -> Option<String> {
    let raw = raw.trim();
    if raw.is_empty() || raw == "-" || raw == "#" {
        return None;
    }
    let mut url = Url::parse(raw).ok()?;
    if url.host_str().map_or(true, str::is_empty) {
        return None;
    }
    url.set_fragment(None);
    let kept: Vec<(String, String)> = url
        .query_pairs()
        .filter(|(k, _)| !is_tracking_param(k))
        .map(|(k, v)| (k.into_owned(), v.into_owned()))
        .collect();
    if kept.is_empty() {
        url.set_query(None);
    } else {
        url.query_pairs_mut().clear().extend_pairs(kept);
    }
    Some(url.to_string())
}

fn is_tracking_param(key: &str) -> bool {
    TRACKING_PARAMS.contains(&key) || key.starts_with("utm_")
}
