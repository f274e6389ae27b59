// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

/// HTTP request handlers
///
/// Each handler maps one endpoint onto the search service or the
/// snapshot store and shapes the JSON response
pub mod kb_handler;
pub mod search_handler;
