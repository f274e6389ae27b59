// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

//! Raw query string → structured query.
//!
//! Whitespace-delimited tokens form AND groups, a `-` prefix forms NOT
//! groups, `|` splits a token into OR parts, and `"..."` marks a phrase
//! required verbatim after normalization. Each term is expanded into an
//! OR-set of variants (kana fold + synonyms). A trailing bare year or
//! year range becomes the year filter and is removed before
//! tokenization.

use once_cell::sync::Lazy;
use regex::Regex;

use super::normalize::{fold_kana, normalize};
use super::synonyms::SynonymTable;

static YEAR_RANGE_TAIL: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?:^|\s)(\d{4})\s*(?:[-–—~〜～]|\.\.)\s*(\d{4})$").unwrap()
});
static YEAR_TAIL: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?:^|\s)(\d{4})$").unwrap());
static COMPOUND_RESULT: Lazy<Regex> = Lazy::new(|| Regex::new(r"^(.+)結果$").unwrap());

/// The parsed form of a query. Empty AND/NOT groups and phrases mean
/// "match nothing", never "match everything".
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StructuredQuery {
    /// Each inner list is an OR-set of term variants; every group must hit.
    pub and_groups: Vec<Vec<String>>,
    /// Any hit from any group excludes the document.
    pub not_groups: Vec<Vec<String>>,
    /// Quoted substrings required verbatim after normalization.
    pub phrases: Vec<String>,
    /// Inclusive year filter; a single year is `(y, y)`.
    pub year_range: Option<(i32, i32)>,
    /// Sorted, deduplicated union of all AND variants, for highlighting.
    pub highlight_terms: Vec<String>,
}

impl StructuredQuery {
    /// True when the query can never match anything.
    pub fn is_empty(&self) -> bool {
        self.and_groups.is_empty() && self.not_groups.is_empty() && self.phrases.is_empty()
    }
}

/// Parse a raw query string, expanding terms through the synonym table.
pub fn parse_query(raw: &str, synonyms: &SynonymTable) -> StructuredQuery {
    let normalized = normalize(raw);
    let (rest, year_range) = split_trailing_year(&normalized);

    let mut query = StructuredQuery {
        year_range,
        ..Default::default()
    };

    for token in tokenize(&rest) {
        match token {
            Token::Phrase(phrase) => {
                if phrase.is_empty() {
                    continue;
                }
                // The phrase itself must appear verbatim; its words still
                // join the AND groups so they score and highlight.
                for word in phrase.split_whitespace() {
                    query.and_groups.push(expand_variants(word, synonyms));
                }
                query.phrases.push(phrase);
            }
            Token::Not(term) => {
                query.not_groups.push(expand_variants(&term, synonyms));
            }
            Token::Term(term) => {
                for part in term.split('|').filter(|p| !p.is_empty()) {
                    // 「○○結果」 compounds split into two required groups
                    if !term.contains('|') {
                        if let Some(c) = COMPOUND_RESULT.captures(part) {
                            let left = c.get(1).map(|m| m.as_str()).unwrap_or_default();
                            if !left.is_empty() && left != part {
                                query.and_groups.push(expand_variants(left, synonyms));
                                query.and_groups.push(expand_variants("結果", synonyms));
                                continue;
                            }
                        }
                    }
                    query.and_groups.push(expand_variants(part, synonyms));
                }
            }
        }
    }

    let mut highlight: Vec<String> = query.and_groups.iter().flatten().cloned().collect();
    highlight.sort();
    highlight.dedup();
    query.highlight_terms = highlight;

    query
}

/// Strip a trailing bare year (`YYYY`) or year range (`YYYY-YYYY`, also
/// `–—~〜～` and `..` separators) and return the remaining query.
fn split_trailing_year(s: &str) -> (String, Option<(i32, i32)>) {
    if let Some(c) = YEAR_RANGE_TAIL.captures(s) {
        let (a, b): (i32, i32) = match (c[1].parse(), c[2].parse()) {
            (Ok(a), Ok(b)) => (a, b),
            _ => return (s.to_string(), None),
        };
        let rest = s[..c.get(0).map_or(0, |m| m.start())].trim().to_string();
        return (rest, Some((a.min(b), a.max(b))));
    }
    if let Some(c) = YEAR_TAIL.captures(s) {
        if let Ok(y) = c[1].parse::<i32>() {
            let rest = s[..c.get(0).map_or(0, |m| m.start())].trim().to_string();
            return (rest, Some((y, y)));
        }
    }
    (s.to_string(), None)
}

#[derive(Debug, PartialEq)]
enum Token {
    Term(String),
    Not(String),
    Phrase(String),
}

/// Split on whitespace, special-casing double-quoted phrases (an
/// unterminated quote runs to the end of the string).
fn tokenize(s: &str) -> Vec<Token> {
    let mut tokens = Vec::new();
    let mut chars = s.chars().peekable();
    let mut current = String::new();

    while let Some(ch) = chars.next() {
        match ch {
            '"' => {
                flush(&mut current, &mut tokens);
                let mut phrase = String::new();
                for pc in chars.by_ref() {
                    if pc == '"' {
                        break;
                    }
                    phrase.push(pc);
                }
                tokens.push(Token::Phrase(phrase.trim().to_string()));
            }
            c if c.is_whitespace() => flush(&mut current, &mut tokens),
            c => current.push(c),
        }
    }
    flush(&mut current, &mut tokens);
    tokens
}

fn flush(current: &mut String, tokens: &mut Vec<Token>) {
    if current.is_empty() {
        return;
    }
    let token = std::mem::take(current);
    if let Some(stripped) = token.strip_prefix('-') {
        if !stripped.is_empty() {
            tokens.push(Token::Not(stripped.to_string()));
        }
    } else {
        tokens.push(Token::Term(token));
    }
}

/// OR-set for one term: the term, its kana fold, and the synonym
/// expansions of both, deduplicated in insertion order.
fn expand_variants(term: &str, synonyms: &SynonymTable) -> Vec<String> {
    let mut variants = vec![term.to_string()];
    let folded = fold_kana(term);
    if folded != term {
        variants.push(folded.clone());
    }
    for source in [term, folded.as_str()] {
        for syn in synonyms.expand(source) {
            if !variants.contains(&syn) {
                variants.push(syn);
            }
        }
    }
    variants
}
