// SPDX-License-Identifier: BSD-3-Clause
// Copyright (c) 2026 Gida Search contributors

//! Weighted multi-field fuzzy matcher over a [`SearchDocument`] collection.
//!
//! Query and field text are tokenized into lowercase unicode words.  A field
//! token matches a query term exactly, as a substring hit, or approximately
//! via Jaro-Winkler similarity above [`FUZZY_THRESHOLD`].  A document's score
//! is `1.0 / Σ(field weight × field similarity)` over its matched fields, so
//! lower scores rank better and a title hit outranks a body-only hit.  Match
//! position within a field never affects the score.

use crate::models::search::{FieldMatch, SearchDocument, SearchHit};
use unicode_segmentation::UnicodeSegmentation;

/// Queries shorter than this (trimmed) short-circuit to an empty result set.
pub const MIN_QUERY_LEN: usize = 2;

/// Tokens shorter than this are ignored on both sides of the match to avoid
/// over-matching single letters.
const MIN_TOKEN_CHARS: usize = 2;

/// Minimum Jaro-Winkler similarity for an approximate token match.  Tuned to
/// catch reasonable typos ("hacpp" for "haccp") while excluding dissimilar
/// text.
const FUZZY_THRESHOLD: f64 = 0.8;

const WEIGHT_TITLE: f64 = 3.0;
const WEIGHT_EXCERPT: f64 = 2.0;
const WEIGHT_TAGS: f64 = 1.5;
const WEIGHT_CONTENT: f64 = 1.0;
const WEIGHT_CATEGORY: f64 = 1.0;

/// Rank every document of the (already locale-filtered) collection against
/// `query`.  Ascending by score, ties kept in collection order.
pub fn search_documents(docs: &[SearchDocument], query: &str) -> Vec<SearchHit> {
    if query.trim().chars().count() < MIN_QUERY_LEN {
        return Vec::new();
    }
    let terms = query_terms(query);
    if terms.is_empty() {
        return Vec::new();
    }

    let mut hits: Vec<SearchHit> = docs
        .iter()
        .filter_map(|doc| match_document(doc, &terms))
        .collect();
    // Vec::sort_by is stable, so equal scores keep collection order.
    hits.sort_by(|a, b| a.score.partial_cmp(&b.score).unwrap_or(std::cmp::Ordering::Equal));
    hits
}

/// Lowercased query tokens of at least [`MIN_TOKEN_CHARS`] characters.
pub fn query_terms(query: &str) -> Vec<String> {
    query
        .unicode_words()
        .map(|word| word.to_lowercase())
        .filter(|term| term.chars().count() >= MIN_TOKEN_CHARS)
        .collect()
}

fn match_document(doc: &SearchDocument, terms: &[String]) -> Option<SearchHit> {
    let mut weighted_similarity = 0.0;
    let mut matches = Vec::new();

    let scalar_fields = [
        ("title", doc.title.as_str(), WEIGHT_TITLE),
        ("excerpt", doc.excerpt.as_str(), WEIGHT_EXCERPT),
        ("content", doc.content.as_str(), WEIGHT_CONTENT),
    ];
    for (name, text, weight) in scalar_fields {
        if let Some((similarity, indices)) = match_text(text, terms) {
            weighted_similarity += weight * similarity;
            matches.push(FieldMatch {
                field: name.to_string(),
                value: text.to_string(),
                indices,
            });
        }
    }

    if let Some(category) = doc.category.as_deref() {
        if let Some((similarity, indices)) = match_text(category, terms) {
            weighted_similarity += WEIGHT_CATEGORY * similarity;
            matches.push(FieldMatch {
                field: "category".to_string(),
                value: category.to_string(),
                indices,
            });
        }
    }

    if let Some(tags) = doc.tags.as_deref() {
        let mut best_tag_similarity = 0.0f64;
        for tag in tags {
            if let Some((similarity, indices)) = match_text(tag, terms) {
                best_tag_similarity = best_tag_similarity.max(similarity);
                matches.push(FieldMatch {
                    field: "tags".to_string(),
                    value: tag.clone(),
                    indices,
                });
            }
        }
        weighted_similarity += WEIGHT_TAGS * best_tag_similarity;
    }

    if matches.is_empty() {
        return None;
    }
    Some(SearchHit {
        document: doc.clone(),
        score: (1.0 / weighted_similarity) as f32,
        matches,
        highlighted_title: None,
        highlighted_excerpt: None,
    })
}

/// Match one field's text against the query terms.  Returns the best token
/// similarity and the byte spans of every matching token, in text order.
fn match_text(text: &str, terms: &[String]) -> Option<(f64, Vec<(usize, usize)>)> {
    let mut best = 0.0f64;
    let mut spans = Vec::new();

    for (start, word) in text.unicode_word_indices() {
        let token = word.to_lowercase();
        if token.chars().count() < MIN_TOKEN_CHARS {
            continue;
        }
        let similarity = best_term_similarity(&token, terms);
        if similarity >= FUZZY_THRESHOLD {
            spans.push((start, start + word.len()));
            best = best.max(similarity);
        }
    }

    (best >= FUZZY_THRESHOLD).then_some((best, spans))
}

fn best_term_similarity(token: &str, terms: &[String]) -> f64 {
    let mut best = 0.0f64;
    for term in terms {
        let similarity = if token == term.as_str() || token.contains(term.as_str()) {
            1.0
        } else if lengths_comparable(token, term) {
            strsim::jaro_winkler(token, term)
        } else {
            continue;
        };
        best = best.max(similarity);
        if best >= 1.0 {
            break;
        }
    }
    best
}

/// Length-based pruning: skip pairs more than 50% apart in length, which can
/// never clear the similarity threshold.
fn lengths_comparable(a: &str, b: &str) -> bool {
    let (short, long) = if a.len() < b.len() {
        (a.len(), b.len())
    } else {
        (b.len(), a.len())
    };
    (long - short) * 2 <= long
}
