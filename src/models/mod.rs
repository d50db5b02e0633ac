// SPDX-License-Identifier: BSD-3-Clause
// Copyright (c) 2026 Gida Search contributors

pub mod content;
pub mod search;
pub mod version;
