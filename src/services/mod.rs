// SPDX-License-Identifier: BSD-3-Clause
// Copyright (c) 2026 Gida Search contributors

pub mod cache;
pub mod content;
pub mod index;
pub mod matcher;
pub mod results;
pub mod search;
