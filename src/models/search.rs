// SPDX-License-Identifier: BSD-3-Clause
// Copyright (c) 2026 Gida Search contributors

//! Search documents, matches, and the HTTP response shapes.

use serde::{Deserialize, Serialize};

use crate::models::content::ContentKind;

/// The flattened, homogeneous record the matcher works on.  One per blog
/// post, guide, or FAQ entry.  `(type, slug, locale)` is unique across the
/// whole collection; `type` determines how `url` was derived.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchDocument {
    #[serde(rename = "type")]
    pub kind: ContentKind,
    pub slug: String,
    pub locale: String,
    pub title: String,
    pub excerpt: String,
    pub content: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tags: Option<Vec<String>>,
    pub url: String,
}

/// Where a query matched inside one field of a document.  `indices` are
/// half-open byte ranges into `value`, ascending and aligned to character
/// boundaries, so they can be used directly for highlighting.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldMatch {
    pub field: String,
    pub value: String,
    pub indices: Vec<(usize, usize)>,
}

/// One ranked search result.  `score` is an opaque ordering key: lower is
/// better.  `highlighted_*` are filled in by the result post-processor.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchHit {
    #[serde(flatten)]
    pub document: SearchDocument,
    pub score: f32,
    pub matches: Vec<FieldMatch>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub highlighted_title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub highlighted_excerpt: Option<String>,
}

/// Results partitioned by content kind.  Every key is present even when a
/// kind has no matches; intra-bucket order is the overall rank order.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GroupedResults {
    pub blog: Vec<SearchHit>,
    pub guide: Vec<SearchHit>,
    pub faq: Vec<SearchHit>,
}

/// Flat or grouped result list, depending on the `groupByType` request flag.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum SearchResults {
    Flat(Vec<SearchHit>),
    Grouped(GroupedResults),
}

impl SearchResults {
    pub fn len(&self) -> usize {
        match self {
            SearchResults::Flat(hits) => hits.len(),
            SearchResults::Grouped(g) => g.blog.len() + g.guide.len() + g.faq.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Body of a `GET /api/search` response.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchResponse {
    pub results: SearchResults,
    pub query: String,
    /// Milliseconds spent computing a fresh result; absent on cache hits.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub search_time: Option<u64>,
    pub cached: bool,
}

/// Body of a `GET /api/search/suggestions` response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SuggestionsResponse {
    pub suggestions: Vec<String>,
    /// Absent for short-circuited (too short) queries.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cached: Option<bool>,
}

/// Generic error body; the message never carries internal details.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
}
