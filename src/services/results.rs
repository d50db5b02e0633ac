// SPDX-License-Identifier: BSD-3-Clause
// Copyright (c) 2026 Gida Search contributors

//! Result post-processing: `<mark>` highlighting, context snippets for
//! body-only matches, grouping by content kind, and title suggestions.

use crate::models::content::ContentKind;
use crate::models::search::{GroupedResults, SearchDocument, SearchHit};
use std::collections::HashSet;

/// Snippet window width in bytes, centered on the first content match.
pub const SNIPPET_CONTEXT: usize = 150;

/// Wrap each matched span of `text` in `<mark>…</mark>`, interleaved with
/// the unmatched text.  Spans are half-open byte ranges; they are sorted by
/// start before use.  No spans returns the text unchanged.
pub fn highlight_spans(text: &str, spans: &[(usize, usize)]) -> String {
    if spans.is_empty() {
        return text.to_string();
    }

    let mut sorted: Vec<(usize, usize)> = spans.to_vec();
    sorted.sort_by_key(|span| span.0);

    let mut out = String::with_capacity(text.len() + sorted.len() * "<mark></mark>".len());
    let mut cursor = 0;
    for (start, end) in sorted {
        if start < cursor || end > text.len() || start >= end {
            continue;
        }
        out.push_str(&text[cursor..start]);
        out.push_str("<mark>");
        out.push_str(&text[start..end]);
        out.push_str("</mark>");
        cursor = end;
    }
    out.push_str(&text[cursor..]);
    out
}

/// A window of `context` bytes around the first match, clipped to character
/// boundaries, with `...` on each side that was truncated.  Without spans the
/// snippet is simply the head of the text.
pub fn context_snippet(text: &str, spans: &[(usize, usize)], context: usize) -> String {
    let Some(&(match_start, _)) = spans.first() else {
        let end = floor_char_boundary(text, context.min(text.len()));
        let mut head = text[..end].to_string();
        if end < text.len() {
            head.push_str("...");
        }
        return head;
    };

    let start = floor_char_boundary(text, match_start.saturating_sub(context / 2));
    let end = floor_char_boundary(text, (match_start + context / 2).min(text.len()));

    let mut snippet = String::new();
    if start > 0 {
        snippet.push_str("...");
    }
    snippet.push_str(&text[start..end]);
    if end < text.len() {
        snippet.push_str("...");
    }
    snippet
}

/// Fill `highlighted_title` and `highlighted_excerpt` on every hit.
///
/// The excerpt falls back in order: highlighted excerpt match, content
/// snippet around the first content match, raw excerpt.
pub fn apply_highlighting(hits: &mut [SearchHit]) {
    for hit in hits {
        let title_spans = field_spans(hit, "title");
        hit.highlighted_title = Some(match title_spans {
            Some(spans) => highlight_spans(&hit.document.title, &spans),
            None => hit.document.title.clone(),
        });

        hit.highlighted_excerpt = Some(if let Some(spans) = field_spans(hit, "excerpt") {
            highlight_spans(&hit.document.excerpt, &spans)
        } else if let Some(spans) = field_spans(hit, "content") {
            context_snippet(&hit.document.content, &spans, SNIPPET_CONTEXT)
        } else {
            hit.document.excerpt.clone()
        });
    }
}

fn field_spans(hit: &SearchHit, field: &str) -> Option<Vec<(usize, usize)>> {
    hit.matches
        .iter()
        .find(|m| m.field == field)
        .map(|m| m.indices.clone())
}

/// Partition ranked hits into per-kind buckets, preserving rank order inside
/// each bucket.  Nothing is duplicated or dropped.
pub fn group_by_kind(hits: Vec<SearchHit>) -> GroupedResults {
    let mut grouped = GroupedResults::default();
    for hit in hits {
        match hit.document.kind {
            ContentKind::Blog => grouped.blog.push(hit),
            ContentKind::Guide => grouped.guide.push(hit),
            ContentKind::Faq => grouped.faq.push(hit),
        }
    }
    grouped
}

/// Unique document titles containing `query` case-insensitively, in
/// collection order, truncated to `limit`.
pub fn unique_titles(docs: &[SearchDocument], query: &str, limit: usize) -> Vec<String> {
    let needle = query.trim().to_lowercase();
    let mut seen = HashSet::new();
    let mut titles = Vec::new();
    for doc in docs {
        if titles.len() == limit {
            break;
        }
        if doc.title.to_lowercase().contains(&needle) && seen.insert(doc.title.clone()) {
            titles.push(doc.title.clone());
        }
    }
    titles
}

fn floor_char_boundary(text: &str, mut index: usize) -> usize {
    while index > 0 && !text.is_char_boundary(index) {
        index -= 1;
    }
    index
}
