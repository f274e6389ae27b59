// Copyright 2025 Kirky.X
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;

/// Application configuration
///
/// Covers the HTTP server, the knowledge-base source and the search
/// engine tunables
#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    /// HTTP server settings
    pub server: ServerSettings,
    /// Knowledge-base source settings
    pub kb: KbSettings,
    /// Search engine tunables
    pub search: SearchSettings,
}

/// HTTP server settings
#[derive(Debug, Clone, Deserialize)]
pub struct ServerSettings {
    /// Listen host
    pub host: String,
    /// Listen port
    pub port: u16,
}

/// Knowledge-base source settings
#[derive(Debug, Clone, Deserialize)]
pub struct KbSettings {
    /// Local path of the JSONL snapshot file
    pub path: String,
    /// Optional HTTP(S) URL the snapshot is downloaded from on reload
    pub url: Option<String>,
    /// Optional path of the `canonical,variant` synonym table
    pub synonyms_path: Option<String>,
}

/// Search engine tunables
#[derive(Debug, Clone, Deserialize)]
pub struct SearchSettings {
    /// Number of leading characters of the normalized body that get a
    /// kana-folded index (cost bound for very long articles)
    pub body_fold_prefix: usize,
    /// When true the year filter consults every year mentioned in
    /// title/body/url; when false only the primary date counts
    pub year_filter_scans_text: bool,
    /// Enable the bounded edit-distance fallback for AND terms
    pub fuzzy_enabled: bool,
    /// Head snippet budget for the first result on the first page
    pub snippet_first_chars: usize,
    /// Snippet budget for every other result
    pub snippet_other_chars: usize,
    /// Characters kept on each side of the first highlighted hit
    pub snippet_side_chars: usize,
    /// Slack allowed over the budget before the hard re-truncation
    pub snippet_slack_chars: usize,
}

impl Settings {
    /// Load configuration from defaults, optional config files and
    /// `BULLETIN__`-prefixed environment variables
    pub fn new() -> Result<Self, ConfigError> {
        let env = std::env::var("APP_ENVIRONMENT").unwrap_or_else(|_| "default".to_string());
        let builder = Config::builder()
            // Start with default settings
            .set_default("server.host", "0.0.0.0")?
            .set_default("server.port", 8000)?
            // Default KB settings
            .set_default("kb.path", "data/kb.jsonl")?
            // Default search tunables
            .set_default("search.body_fold_prefix", 4000)?
            .set_default("search.year_filter_scans_text", true)?
            .set_default("search.fuzzy_enabled", true)?
            .set_default("search.snippet_first_chars", 300)?
            .set_default("search.snippet_other_chars", 160)?
            .set_default("search.snippet_side_chars", 80)?
            .set_default("search.snippet_slack_chars", 40)?
            .add_source(File::with_name("config/default").required(false))
            .add_source(File::with_name(&format!("config/{}", env)).required(false))
            .add_source(Environment::with_prefix("BULLETIN").separator("__"));

        builder.build()?.try_deserialize()
    }
}

impl Default for SearchSettings {
    fn default() -> Self {
        Self {
            body_fold_prefix: 4000,
            year_filter_scans_text: true,
            fuzzy_enabled: true,
            snippet_first_chars: 300,
            snippet_other_chars: 160,
            snippet_side_chars: 80,
            snippet_slack_chars: 40,
        }
    }
}
