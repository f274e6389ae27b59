// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

pub mod dates;
pub mod identity;
pub mod matcher;
pub mod normalize;
pub mod query;
pub mod rank;
pub mod snippet;
pub mod synonyms;
