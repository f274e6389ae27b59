// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use std::collections::BTreeSet;

use chrono::NaiveDate;

use crate::domain::search::dates::{extract_years, parse_primary_date};
use crate::domain::search::identity::assign_doc_id;
use crate::domain::search::normalize::{fold_kana, normalize};

/// Raw field values resolved from one ingested record, before any
/// derivation. Produced by the JSONL loader.
#[derive(Debug, Clone, Default)]
pub struct RawDocument {
    pub title: String,
    pub body: String,
    pub url: Option<String>,
    pub author: Option<String>,
    pub date_raw: Option<String>,
    pub category: Option<String>,
    pub issue: Option<String>,
    pub explicit_id: Option<String>,
}

/// A weighted searchable field of a document.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    Title,
    Body,
    Author,
    Issue,
    Category,
    Date,
}

impl Field {
    /// Scoring weight. The weights only shape the score; the AND/NOT
    /// gates treat every field equally.
    pub fn weight(self) -> i64 {
        match self {
            Field::Title => 12,
            Field::Body => 8,
            Field::Author => 5,
            Field::Issue => 3,
            Field::Category => 3,
            Field::Date => 2,
        }
    }
}

/// Normalized and kana-folded forms of one field, precomputed at load.
#[derive(Debug, Clone, Default)]
pub struct FieldText {
    pub norm: String,
    pub fold: String,
}

impl FieldText {
    fn new(raw: &str) -> Self {
        let norm = normalize(raw);
        let fold = fold_kana(&norm);
        Self { norm, fold }
    }

    /// Body variant: folding is bounded to a fixed prefix of the
    /// normalized text for cost control.
    fn bounded(raw: &str, fold_prefix: usize) -> Self {
        let norm = normalize(raw);
        let head: String = norm.chars().take(fold_prefix).collect();
        let fold = fold_kana(&head);
        Self { norm, fold }
    }
}

/// An immutable archive document with its precomputed search fields.
///
/// Created once at snapshot load; a query never mutates a document.
#[derive(Debug, Clone)]
pub struct Document {
    pub raw: RawDocument,
    pub title: FieldText,
    pub body: FieldText,
    pub author: FieldText,
    pub issue: FieldText,
    pub category: FieldText,
    pub date: FieldText,
    /// Parsed from `date_raw` only, never guessed from other fields.
    pub date_primary: Option<NaiveDate>,
    /// Primary-date year plus every 19xx/20xx/21xx token in
    /// title/body/url. Used only for year filtering.
    pub years: BTreeSet<i32>,
    pub doc_id: String,
}

impl Document {
    pub fn from_raw(raw: RawDocument, body_fold_prefix: usize) -> Self {
        use chrono::Datelike;

        let title = FieldText::new(&raw.title);
        let body = FieldText::bounded(&raw.body, body_fold_prefix);
        let author = FieldText::new(raw.author.as_deref().unwrap_or_default());
        let issue = FieldText::new(raw.issue.as_deref().unwrap_or_default());
        let category = FieldText::new(raw.category.as_deref().unwrap_or_default());
        let date = FieldText::new(raw.date_raw.as_deref().unwrap_or_default());

        let date_primary = raw
            .date_raw
            .as_deref()
            .and_then(parse_primary_date)
            .map(|p| p.date());

        let mut years = BTreeSet::new();
        if let Some(d) = date_primary {
            years.insert(d.year());
        }
        years.extend(extract_years(&title.norm));
        years.extend(extract_years(&body.norm));
        if let Some(url) = raw.url.as_deref() {
            years.extend(extract_years(url));
        }

        let doc_id = assign_doc_id(
            raw.explicit_id.as_deref(),
            raw.url.as_deref(),
            &raw.title,
            raw.date_raw.as_deref(),
            raw.author.as_deref(),
        );

        Self {
            raw,
            title,
            body,
            author,
            issue,
            category,
            date,
            date_primary,
            years,
            doc_id,
        }
    }

    /// Every weighted field with its precomputed text forms.
    pub fn weighted_fields(&self) -> [(Field, &FieldText); 6] {
        [
            (Field::Title, &self.title),
            (Field::Body, &self.body),
            (Field::Author, &self.author),
            (Field::Issue, &self.issue),
            (Field::Category, &self.category),
            (Field::Date, &self.date),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn doc(raw: RawDocument) -> Document {
        Document::from_raw(raw, 4000)
    }

    #[test]
    fn test_derived_fields() {
        let d = doc(RawDocument {
            title: "苔の　育て方".to_string(),
            body: "コケは湿度が大切。".to_string(),
            date_raw: Some("2020-05-01".to_string()),
            ..Default::default()
        });
        assert_eq!(d.title.norm, "苔の 育て方");
        assert_eq!(d.body.fold, "こけは湿度か大切。");
        assert_eq!(d.date_primary, NaiveDate::from_ymd_opt(2020, 5, 1));
        assert!(d.years.contains(&2020));
        assert!(d.doc_id.starts_with("hash://"));
    }

    #[test]
    fn test_years_widened_from_text() {
        let d = doc(RawDocument {
            title: "1999年コンテスト結果".to_string(),
            body: "2001年の大会も参照。".to_string(),
            url: Some("https://example.com/2005/report".to_string()),
            date_raw: Some("2020-05-01".to_string()),
            ..Default::default()
        });
        let years: Vec<i32> = d.years.iter().copied().collect();
        assert_eq!(years, vec![1999, 2001, 2005, 2020]);
    }

    #[test]
    fn test_body_fold_prefix_bound() {
        let body = "あ".repeat(50) + "カタカナ";
        let d = Document::from_raw(
            RawDocument {
                title: "t".to_string(),
                body,
                ..Default::default()
            },
            50,
        );
        // The fold index stops at the prefix; the normalized body does not
        assert_eq!(d.body.fold.chars().count(), 50);
        assert_eq!(d.body.norm.chars().count(), 54);
    }
}
