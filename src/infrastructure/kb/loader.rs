// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

//! JSONL knowledge-base ingestion.
//!
//! One JSON object per line. Field names vary between exports, so each
//! logical field is resolved through a fixed alias family (first present
//! non-empty alias wins) into a strongly-typed document. Malformed lines
//! are skipped, never fatal.

use std::sync::Arc;

use serde_json::Value;
use sha2::{Digest, Sha256};
use tracing::{debug, warn};

use crate::domain::models::document::{Document, RawDocument};
use crate::domain::models::snapshot::Snapshot;

const TITLE_KEYS: &[&str] = &[
    "title", "Title", "名前", "タイトル", "題名", "見出し", "subject", "headline",
];
const BODY_KEYS: &[&str] = &[
    "content", "text", "body", "本文", "内容", "記事", "description", "summary", "excerpt",
];
const DATE_KEYS: &[&str] = &[
    "開催日/発行日",
    "date",
    "Date",
    "published_at",
    "published",
    "created_at",
    "日付",
    "開催日",
    "発行日",
    "date_primary",
];
const URL_KEYS: &[&str] = &["url", "URL", "link", "permalink", "出典URL", "公開URL", "source"];
const AUTHOR_KEYS: &[&str] = &["author", "Author", "著者", "講師/著者", "講師", "writer"];
const CATEGORY_KEYS: &[&str] = &["category", "Category", "tags", "タグ", "分類", "カテゴリ"];
const ISSUE_KEYS: &[&str] = &["issue", "Issue", "会報号", "号"];
const ID_KEYS: &[&str] = &["id", "Id", "ID", "_id", "doc_id", "notion_id"];

/// Build a snapshot from raw JSONL bytes. The fingerprint is the
/// SHA-256 of exactly these bytes.
pub fn parse_snapshot(bytes: &[u8], version: u64, body_fold_prefix: usize) -> Snapshot {
    let fingerprint = hex::encode(Sha256::digest(bytes));
    let text = String::from_utf8_lossy(bytes);

    let mut documents = Vec::new();
    let mut skipped = 0usize;
    for (lineno, line) in text.lines().enumerate() {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        let value: Value = match serde_json::from_str(line) {
            Ok(v) => v,
            Err(e) => {
                warn!(line = lineno + 1, error = %e, "skipping malformed kb line");
                skipped += 1;
                continue;
            }
        };
        match resolve_record(&value) {
            Some(raw) => documents.push(Arc::new(Document::from_raw(raw, body_fold_prefix))),
            None => {
                debug!(line = lineno + 1, "skipping record with no title and no body");
                skipped += 1;
            }
        }
    }

    if skipped > 0 {
        warn!(skipped, kept = documents.len(), "kb load finished with skipped lines");
    }
    Snapshot::new(documents, fingerprint, version)
}

/// Resolve one JSON record through the alias families. Returns `None`
/// for records with neither a title nor a body.
fn resolve_record(value: &Value) -> Option<RawDocument> {
    let obj = value.as_object()?;
    let pick = |keys: &[&str]| -> Option<String> {
        for key in keys {
            if let Some(v) = obj.get(*key) {
                let text = textify(v);
                if !text.is_empty() {
                    return Some(text);
                }
            }
        }
        None
    };

    let title = pick(TITLE_KEYS).unwrap_or_default();
    let body = pick(BODY_KEYS).unwrap_or_default();
    if title.is_empty() && body.is_empty() {
        return None;
    }
    Some(RawDocument {
        title,
        body,
        url: pick(URL_KEYS),
        author: pick(AUTHOR_KEYS),
        date_raw: pick(DATE_KEYS),
        category: pick(CATEGORY_KEYS),
        issue: pick(ISSUE_KEYS),
        explicit_id: pick(ID_KEYS),
    })
}

/// String form of a JSON value; arrays join their scalar elements.
fn textify(v: &Value) -> String {
    match v {
        Value::String(s) => s.trim().to_string(),
        Value::Number(n) => n.to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Array(items) => items
            .iter()
            .map(textify)
            .filter(|s| !s.is_empty())
            .collect::<Vec<_>>()
            .join(","),
        _ => String::new(),
    }
}
