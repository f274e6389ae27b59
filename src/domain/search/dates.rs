// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

//! Primary-date parsing and free-text year extraction.
//!
//! `parse_primary_date` only ever reads the bulletin's explicit date
//! field; "no match" is `None`, never a guessed date. `extract_years` is
//! the deliberately permissive counterpart used to broaden year-filter
//! recall.

use std::collections::BTreeSet;

use chrono::NaiveDate;
use once_cell::sync::Lazy;
use regex::Regex;

use super::normalize::normalize;

static ISO_FULL: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(\d{4})[-/.](\d{1,2})[-/.](\d{1,2})").unwrap());
static ISO_YM: Lazy<Regex> = Lazy::new(|| Regex::new(r"^(\d{4})[-/.](\d{1,2})").unwrap());
static KANJI: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(\d{4})年(?:(\d{1,2})月(?:(\d{1,2})日)?)?").unwrap());
static ERA: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(令和|平成|昭和)(元|\d{1,2})年(?:(\d{1,2})月(?:(\d{1,2})日)?)?").unwrap()
});
static ISO_YEAR: Lazy<Regex> = Lazy::new(|| Regex::new(r"^(\d{4})").unwrap());
static FOUR_DIGITS: Lazy<Regex> = Lazy::new(|| Regex::new(r"\d+").unwrap());

/// A recognized date form, normalized to one canonical `NaiveDate`
/// (missing month/day default to 1).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParsedDate {
    Exact(NaiveDate),
    YearMonth(NaiveDate),
    YearOnly(NaiveDate),
    Era(NaiveDate),
}

impl ParsedDate {
    pub fn date(self) -> NaiveDate {
        match self {
            ParsedDate::Exact(d)
            | ParsedDate::YearMonth(d)
            | ParsedDate::YearOnly(d)
            | ParsedDate::Era(d) => d,
        }
    }

    pub fn year(self) -> i32 {
        use chrono::Datelike;
        self.date().year()
    }
}

/// Parse the bulletin's primary date field.
///
/// Recognized in order: `YYYY-MM-DD` (also `/` and `.` separators) and
/// its year-month/year-only truncations, `YYYY年MM月DD日` with optional
/// month/day, and era forms (令和/平成/昭和). Anything else is `None`.
pub fn parse_primary_date(raw: &str) -> Option<ParsedDate> {
    let s = normalize(raw);
    if s.is_empty() {
        return None;
    }

    if let Some(c) = ISO_FULL.captures(&s) {
        if let Some(d) = ymd(num(&c, 1)?, num(&c, 2)?, num(&c, 3)?) {
            return Some(ParsedDate::Exact(d));
        }
    }
    if let Some(c) = KANJI.captures(&s) {
        let year = num(&c, 1)?;
        match (c.get(2), c.get(3)) {
            (Some(_), Some(_)) => {
                if let Some(d) = ymd(year, num(&c, 2)?, num(&c, 3)?) {
                    return Some(ParsedDate::Exact(d));
                }
            }
            (Some(_), None) => {
                if let Some(d) = ymd(year, num(&c, 2)?, 1) {
                    return Some(ParsedDate::YearMonth(d));
                }
            }
            _ => {
                if let Some(d) = ymd(year, 1, 1) {
                    return Some(ParsedDate::YearOnly(d));
                }
            }
        }
    }
    if let Some(c) = ERA.captures(&s) {
        let offset = match c.get(1).map(|m| m.as_str()) {
            Some("令和") => 2018,
            Some("平成") => 1988,
            Some("昭和") => 1925,
            _ => return None,
        };
        let era_year: i32 = match c.get(2).map(|m| m.as_str()) {
            Some("元") => 1,
            Some(n) => n.parse().ok()?,
            None => return None,
        };
        let month = num(&c, 3).unwrap_or(1);
        let day = num(&c, 4).unwrap_or(1);
        if let Some(d) = ymd(offset + era_year, month, day) {
            return Some(ParsedDate::Era(d));
        }
    }
    if let Some(c) = ISO_YM.captures(&s) {
        if let Some(d) = ymd(num(&c, 1)?, num(&c, 2)?, 1) {
            return Some(ParsedDate::YearMonth(d));
        }
    }
    if let Some(c) = ISO_YEAR.captures(&s) {
        if let Some(d) = ymd(num(&c, 1)?, 1, 1) {
            return Some(ParsedDate::YearOnly(d));
        }
    }
    None
}

/// Every 4-digit 19xx/20xx/21xx token in the text, as a set.
///
/// Used only to widen year-filter recall, never to establish a
/// document's canonical date.
pub fn extract_years(text: &str) -> BTreeSet<i32> {
    let mut years = BTreeSet::new();
    for m in FOUR_DIGITS.find_iter(text) {
        if m.as_str().len() != 4 {
            continue;
        }
        if let Ok(y) = m.as_str().parse::<i32>() {
            if (1900..=2199).contains(&y) {
                years.insert(y);
            }
        }
    }
    years
}

fn num(c: &regex::Captures<'_>, i: usize) -> Option<i32> {
    c.get(i)?.as_str().parse().ok()
}

fn ymd(year: i32, month: i32, day: i32) -> Option<NaiveDate> {
    NaiveDate::from_ymd_opt(year, u32::try_from(month).ok()?, u32::try_from(day).ok()?)
}
