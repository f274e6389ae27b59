// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

/// Application layer
///
/// Request/response DTOs exchanged with the HTTP layer
pub mod application;

/// Configuration module
///
/// Application settings loaded from files and environment variables
pub mod config;

/// Domain module
///
/// Core search logic: normalization, query parsing, matching, ranking
pub mod domain;

/// Infrastructure module
///
/// Knowledge-base loading and the atomically-swapped snapshot store
pub mod infrastructure;

/// Presentation layer
///
/// HTTP routes and handlers
pub mod presentation;

/// Utility module
///
/// Telemetry initialization and shared helpers
pub mod utils;
