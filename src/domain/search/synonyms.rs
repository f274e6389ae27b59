// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use std::collections::HashMap;
use std::path::Path;

use tracing::warn;

use super::normalize::normalize;

/// Bidirectional canonical/variant term table, loaded once at startup.
///
/// `expand` returns the symmetric closure within one hop of the table:
/// the term itself, its direct variants, and for a variant term its
/// canonical plus the canonical's other variants.
#[derive(Debug, Default)]
pub struct SynonymTable {
    canonical_to_variants: HashMap<String, Vec<String>>,
    variant_to_canonicals: HashMap<String, Vec<String>>,
}

impl SynonymTable {
    pub fn empty() -> Self {
        Self::default()
    }

    /// Build from `(canonical, variant)` pairs. Duplicate pairs are
    /// ignored; terms are normalized before insertion.
    pub fn from_pairs<I, S>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (S, S)>,
        S: AsRef<str>,
    {
        let mut table = Self::default();
        for (canonical, variant) in pairs {
            let canonical = normalize(canonical.as_ref());
            let variant = normalize(variant.as_ref());
            if canonical.is_empty() || variant.is_empty() || canonical == variant {
                continue;
            }
            push_unique(
                table.canonical_to_variants.entry(canonical.clone()).or_default(),
                &variant,
            );
            push_unique(
                table.variant_to_canonicals.entry(variant).or_default(),
                &canonical,
            );
        }
        table
    }

    /// Load a two-column `canonical,variant` CSV. A missing or unreadable
    /// file degrades to an empty table; malformed rows are skipped.
    pub fn load(path: &Path) -> Self {
        let content = match std::fs::read_to_string(path) {
            Ok(content) => content,
            Err(e) => {
                warn!(path = %path.display(), error = %e, "synonym table unavailable, continuing without synonyms");
                return Self::empty();
            }
        };
        let mut pairs = Vec::new();
        for (lineno, line) in content.lines().enumerate() {
            let line = line.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }
            match line.split_once(',') {
                Some((canonical, variant)) => {
                    pairs.push((canonical.trim().to_string(), variant.trim().to_string()));
                }
                None => {
                    warn!(path = %path.display(), line = lineno + 1, "skipping malformed synonym row");
                }
            }
        }
        Self::from_pairs(pairs)
    }

    /// All terms equivalent to `term`, the term itself first. Lookup
    /// happens on the normalized term; an unknown term expands to itself.
    pub fn expand(&self, term: &str) -> Vec<String> {
        let term = normalize(term);
        if term.is_empty() {
            return Vec::new();
        }
        let mut out = vec![term.clone()];
        if let Some(variants) = self.canonical_to_variants.get(&term) {
            for v in variants {
                push_unique(&mut out, v);
            }
        }
        if let Some(canonicals) = self.variant_to_canonicals.get(&term) {
            for c in canonicals {
                push_unique(&mut out, c);
                if let Some(siblings) = self.canonical_to_variants.get(c) {
                    for s in siblings {
                        push_unique(&mut out, s);
                    }
                }
            }
        }
        out
    }

    pub fn is_empty(&self) -> bool {
        self.canonical_to_variants.is_empty()
    }

    pub fn pair_count(&self) -> usize {
        self.canonical_to_variants.values().map(Vec::len).sum()
    }
}

fn push_unique(list: &mut Vec<String>, value: &str) {
    if !list.iter().any(|x| x == value) {
        list.push(value.to_string());
    }
}
