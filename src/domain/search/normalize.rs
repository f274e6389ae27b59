// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

//! Text canonicalization used by every other search component.
//!
//! `normalize` brings heterogeneous input (full-width forms, stray
//! newlines) to one comparable shape; `fold_kana` additionally collapses
//! Japanese orthographic variants so that 苔/コケ/こけ style spellings of
//! the same word compare equal. Both are pure and idempotent.

use once_cell::sync::Lazy;
use regex::Regex;
use unicode_normalization::UnicodeNormalization;

static WS_RUN: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s+").unwrap());

/// NFKC normalization, full-width space to half-width, whitespace runs
/// collapsed to a single space, trimmed. Empty input yields an empty
/// string.
pub fn normalize(s: &str) -> String {
    if s.is_empty() {
        return String::new();
    }
    let nfkc: String = s.nfkc().collect();
    let spaced = nfkc.replace('\u{3000}', " ");
    WS_RUN.replace_all(&spaced, " ").trim().to_string()
}

/// Kana folding: katakana to hiragana, small kana to their base forms,
/// long-vowel marks resolved to the preceding vowel, combining voicing
/// marks stripped, ASCII lower-cased.
///
/// A long-vowel mark with no preceding kana vowel is left untouched.
pub fn fold_kana(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for ch in s.chars() {
        let ch = small_to_base(kata_to_hira(ch));
        if ch == 'ー' {
            if let Some(v) = out.chars().next_back().and_then(vowel_of) {
                out.push(v);
                continue;
            }
            out.push(ch);
            continue;
        }
        if ch.is_ascii() {
            out.push(ch.to_ascii_lowercase());
        } else {
            out.push(ch);
        }
    }
    strip_voicing(&out)
}

/// Katakana block maps onto hiragana by a fixed offset (ァ..ヶ → ぁ..ゖ).
fn kata_to_hira(c: char) -> char {
    match c {
        'ァ'..='ヶ' => char::from_u32(c as u32 - 0x60).unwrap_or(c),
        _ => c,
    }
}

fn small_to_base(c: char) -> char {
    match c {
        'ぁ' => 'あ',
        'ぃ' => 'い',
        'ぅ' => 'う',
        'ぇ' => 'え',
        'ぉ' => 'お',
        'ゃ' => 'や',
        'ゅ' => 'ゆ',
        'ょ' => 'よ',
        'っ' => 'つ',
        'ゎ' => 'わ',
        'ゕ' => 'か',
        'ゖ' => 'け',
        _ => c,
    }
}

/// Vowel class of a (possibly voiced) hiragana character.
fn vowel_of(c: char) -> Option<char> {
    let base: char = c
        .nfd()
        .find(|d| !matches!(d, '\u{3099}' | '\u{309a}'))
        .unwrap_or(c);
    match base {
        'あ' | 'か' | 'さ' | 'た' | 'な' | 'は' | 'ま' | 'や' | 'ら' | 'わ' => Some('あ'),
        'い' | 'き' | 'し' | 'ち' | 'に' | 'ひ' | 'み' | 'り' | 'ゐ' => Some('い'),
        'う' | 'く' | 'す' | 'つ' | 'ぬ' | 'ふ' | 'む' | 'ゆ' | 'る' | 'ゔ' => Some('う'),
        'え' | 'け' | 'せ' | 'て' | 'ね' | 'へ' | 'め' | 'れ' | 'ゑ' => Some('え'),
        'お' | 'こ' | 'そ' | 'と' | 'の' | 'ほ' | 'も' | 'よ' | 'ろ' | 'を' => Some('お'),
        _ => None,
    }
}

/// Drop combining dakuten/handakuten (U+3099/U+309A) via NFD round-trip.
fn strip_voicing(s: &str) -> String {
    s.nfd()
        .filter(|c| !matches!(c, '\u{3099}' | '\u{309a}'))
        .nfc()
        .collect()
}
