// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

//! Display-only excerpt rendering with `<mark>` highlighting.
//!
//! The first result on the first page gets a head excerpt; every other
//! result gets a window around its first highlighted hit, falling back
//! to a shorter head excerpt when no hit position exists. All output is
//! HTML-escaped and length-capped on the visible (markup-stripped) text.

use once_cell::sync::Lazy;
use regex::Regex;

static TAG: Lazy<Regex> = Lazy::new(|| Regex::new(r"<[^>]+>").unwrap());

const ELLIPSIS: char = '…';
/// How far the window edges may be nudged looking for a safe boundary.
const BOUNDARY_SCAN: usize = 12;

/// Snippet length budgets, in visible characters.
#[derive(Debug, Clone, Copy)]
pub struct SnippetBudgets {
    /// Head budget for the first result on the first page.
    pub first_chars: usize,
    /// Budget for every other result (also the no-hit fallback).
    pub other_chars: usize,
    /// Window half-width around the first hit.
    pub side_chars: usize,
    /// Slack allowed over budget before the hard re-truncation.
    pub slack_chars: usize,
}

impl Default for SnippetBudgets {
    fn default() -> Self {
        Self {
            first_chars: 300,
            other_chars: 160,
            side_chars: 80,
            slack_chars: 40,
        }
    }
}

/// HTML-escape `text` and wrap every occurrence of each term in
/// `<mark>`. Longer terms are placed first so a short term never
/// corrupts a longer overlapping match.
pub fn highlight(text: &str, terms: &[String]) -> String {
    let ranges = mark_ranges(text, terms);
    render_with_marks(text, &ranges)
}

/// Render the title line: highlighted, `(無題)` when empty.
pub fn render_title(title_norm: &str, terms: &[String]) -> String {
    if title_norm.is_empty() {
        return html_escape::encode_text("(無題)").to_string();
    }
    highlight(title_norm, terms)
}

/// Render the content excerpt for one result.
pub fn render_content(
    body_norm: &str,
    terms: &[String],
    is_first_on_first_page: bool,
    budgets: SnippetBudgets,
) -> String {
    if body_norm.is_empty() {
        return String::new();
    }
    let chars: Vec<char> = body_norm.chars().collect();

    if is_first_on_first_page {
        return head_snippet(&chars, terms, budgets.first_chars, budgets.slack_chars);
    }

    let ranges = mark_ranges(body_norm, terms);
    let Some(&(first_start, _)) = ranges.first() else {
        return head_snippet(&chars, terms, budgets.other_chars, budgets.slack_chars);
    };
    let pos = body_norm[..first_start].chars().count();

    let mut start = pos.saturating_sub(budgets.side_chars);
    let mut end = (pos + budgets.side_chars).min(chars.len());
    start = nudge_start(&chars, start);
    end = nudge_end(&chars, end);

    let mut window: String = chars[start..end].iter().collect();
    if start > 0 {
        window.insert(0, ELLIPSIS);
    }
    if end < chars.len() {
        window.push(ELLIPSIS);
    }

    let marked = highlight(&window, terms);
    enforce_cap(marked, budgets.other_chars, budgets.slack_chars)
}

/// Visible text of a rendered snippet (markup stripped).
pub fn visible_text(html: &str) -> String {
    let stripped = TAG.replace_all(html, "");
    html_escape::decode_html_entities(&stripped).to_string()
}

fn head_snippet(chars: &[char], terms: &[String], budget: usize, slack: usize) -> String {
    let mut end = budget.min(chars.len());
    if end < chars.len() {
        end = nudge_end(chars, end);
    }
    let mut head: String = chars[..end].iter().collect();
    if end < chars.len() {
        head.push(ELLIPSIS);
    }
    let marked = highlight(&head, terms);
    enforce_cap(marked, budget, slack)
}

/// Re-truncate on plain text whenever markup pushed the visible length
/// over budget + slack, and re-escape without marks.
fn enforce_cap(marked: String, budget: usize, slack: usize) -> String {
    let plain = visible_text(&marked);
    if plain.chars().count() <= budget + slack {
        return marked;
    }
    let mut capped: String = plain.chars().take(budget).collect();
    capped.push(ELLIPSIS);
    html_escape::encode_text(&capped).to_string()
}

/// Non-overlapping byte ranges to mark, longest term first.
fn mark_ranges(text: &str, terms: &[String]) -> Vec<(usize, usize)> {
    let mut order: Vec<&String> = terms.iter().filter(|t| !t.is_empty()).collect();
    order.sort_by(|a, b| {
        b.chars()
            .count()
            .cmp(&a.chars().count())
            .then_with(|| a.cmp(b))
    });
    order.dedup();

    let mut ranges: Vec<(usize, usize)> = Vec::new();
    for term in order {
        for (start, m) in text.match_indices(term.as_str()) {
            let end = start + m.len();
            if !ranges.iter().any(|&(s, e)| start < e && s < end) {
                ranges.push((start, end));
            }
        }
    }
    ranges.sort_unstable();
    ranges
}

fn render_with_marks(text: &str, ranges: &[(usize, usize)]) -> String {
    let mut out = String::with_capacity(text.len() + ranges.len() * 13);
    let mut cursor = 0;
    for &(start, end) in ranges {
        out.push_str(&html_escape::encode_text(&text[cursor..start]));
        out.push_str("<mark>");
        out.push_str(&html_escape::encode_text(&text[start..end]));
        out.push_str("</mark>");
        cursor = end;
    }
    out.push_str(&html_escape::encode_text(&text[cursor..]));
    out
}

fn is_safe_boundary(c: char) -> bool {
    c.is_whitespace()
        || matches!(
            c,
            '。' | '、' | '．' | '！' | '？' | '!' | '?' | '.' | '\n' | '…' | '・' | '•'
        )
}

/// Move the window start forward to just past the nearest boundary so a
/// sentence or list marker is not cut mid-way. Stays put when no
/// boundary is near.
fn nudge_start(chars: &[char], start: usize) -> usize {
    if start == 0 {
        return 0;
    }
    let scan_end = (start + BOUNDARY_SCAN).min(chars.len());
    for i in start..scan_end {
        if is_safe_boundary(chars[i]) {
            return (i + 1).min(chars.len());
        }
    }
    start
}

/// Extend the window end to include the nearest boundary character.
fn nudge_end(chars: &[char], end: usize) -> usize {
    if end >= chars.len() {
        return chars.len();
    }
    let scan_end = (end + BOUNDARY_SCAN).min(chars.len());
    for i in end..scan_end {
        if is_safe_boundary(chars[i]) {
            return i + 1;
        }
    }
    end
}
