// SPDX-License-Identifier: BSD-3-Clause
// Copyright (c) 2026 Gida Search contributors

//! Frontmatter and FAQ record shapes as they appear in the content tree.
//!
//! The three content kinds form a closed set; each is mapped explicitly into
//! the common [`crate::models::search::SearchDocument`] shape at index-build
//! time rather than inspected for fields at query time.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Locales the content tree is authored in.
pub const LOCALES: &[&str] = &["en", "tr"];

/// The kind of content a search document originated from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ContentKind {
    Blog,
    Guide,
    Faq,
}

/// YAML frontmatter of a blog post file.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BlogFrontmatter {
    pub title: String,
    pub excerpt: String,
    pub publish_date: NaiveDate,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub update_date: Option<NaiveDate>,
    pub author: String,
    pub category: String,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub featured_image: Option<String>,
}

/// YAML frontmatter of a guide file.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GuideFrontmatter {
    pub title: String,
    pub description: String,
    pub difficulty: String,
    #[serde(default)]
    pub topics: Vec<String>,
    #[serde(default)]
    pub related_standards: Vec<String>,
    pub last_updated: NaiveDate,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub icon: Option<String>,
}

/// One FAQ entry, stored as JSON per locale (`faq-en.json`, `faq-tr.json`).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FaqEntry {
    pub id: String,
    pub question: String,
    pub answer: String,
    pub category: String,
}

/// A content file after frontmatter parsing: metadata plus the markdown body.
#[derive(Debug, Clone)]
pub struct ContentItem<F> {
    pub slug: String,
    pub locale: String,
    pub front: F,
    pub body: String,
}
