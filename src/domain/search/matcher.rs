// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

//! Per-document query evaluation: NOT gate, AND gate with weighted
//! occurrence scoring, phrase gate, and a bounded edit-distance fallback.

use crate::domain::models::document::{Document, Field};
use crate::domain::models::hit::MatchOutcome;

use super::normalize::fold_kana;
use super::query::StructuredQuery;

/// Fixed bonus for a phrase found in the title.
const PHRASE_TITLE_BONUS: i64 = 100;
/// Fixed bonus for a phrase found only in the body.
const PHRASE_BODY_BONUS: i64 = 60;

/// Matching options taken from the search settings.
#[derive(Debug, Clone, Copy)]
pub struct MatchOptions {
    pub fuzzy_enabled: bool,
}

impl Default for MatchOptions {
    fn default() -> Self {
        Self { fuzzy_enabled: true }
    }
}

/// Evaluate one document against one structured query.
///
/// Pure: the outcome depends only on the document and the query.
pub fn evaluate(doc: &Document, query: &StructuredQuery, opts: MatchOptions) -> MatchOutcome {
    if query.is_empty() {
        return MatchOutcome::Excluded;
    }

    // 1. NOT gate: any variant hit anywhere excludes the document.
    for group in &query.not_groups {
        for variant in group {
            let folded = fold_kana(variant);
            for (_, field) in doc.weighted_fields() {
                if count_occurrences(&field.norm, variant) > 0
                    || count_occurrences(&field.fold, &folded) > 0
                {
                    return MatchOutcome::Excluded;
                }
            }
        }
    }

    // 2. AND gate with occurrence-weighted scoring.
    let mut score: i64 = 0;
    for group in &query.and_groups {
        let mut group_hit = false;
        for variant in group {
            let folded = fold_kana(variant);
            for (kind, field) in doc.weighted_fields() {
                let count = count_occurrences(&field.norm, variant)
                    + count_occurrences(&field.fold, &folded);
                if count > 0 {
                    score += kind.weight() * count as i64;
                    group_hit = true;
                }
            }
        }
        // 4. Fuzzy fallback: only consulted when the group found no
        // exact/fold hit at all; a hit earns half credit.
        if !group_hit && opts.fuzzy_enabled {
            for variant in group {
                let folded = fold_kana(variant);
                if folded.chars().count() < 2 {
                    continue;
                }
                for (kind, field) in [(Field::Title, &doc.title), (Field::Body, &doc.body)] {
                    if fuzzy_contains(&field.fold, &folded) {
                        score += kind.weight() / 2;
                        group_hit = true;
                    }
                }
            }
        }
        if !group_hit {
            return MatchOutcome::Excluded;
        }
    }

    // 3. Phrase gate: every phrase must appear verbatim (normalized or
    // kana-folded) in the title or body.
    for phrase in &query.phrases {
        let folded = fold_kana(phrase);
        if doc.title.norm.contains(phrase.as_str()) || doc.title.fold.contains(&folded) {
            score += PHRASE_TITLE_BONUS;
        } else if doc.body.norm.contains(phrase.as_str()) || doc.body.fold.contains(&folded) {
            score += PHRASE_BODY_BONUS;
        } else {
            return MatchOutcome::Excluded;
        }
    }

    MatchOutcome::Included { score }
}

/// Non-overlapping occurrence count of `needle` in `hay`.
fn count_occurrences(hay: &str, needle: &str) -> usize {
    if needle.is_empty() || hay.is_empty() {
        return 0;
    }
    hay.matches(needle).count()
}

/// Does `hay` contain a substring within ±1 of `needle`'s length whose
/// edit distance to `needle` is at most 1?
fn fuzzy_contains(hay: &str, needle: &str) -> bool {
    let hay_chars: Vec<char> = hay.chars().collect();
    let needle_len = needle.chars().count();
    if needle_len < 2 || hay_chars.is_empty() {
        return false;
    }
    for window_len in needle_len.saturating_sub(1)..=needle_len + 1 {
        if window_len == 0 || window_len > hay_chars.len() {
            continue;
        }
        let mut window = String::with_capacity(window_len * 3);
        for start in 0..=hay_chars.len() - window_len {
            window.clear();
            window.extend(&hay_chars[start..start + window_len]);
            if strsim::levenshtein(&window, needle) <= 1 {
                return true;
            }
        }
    }
    false
}
