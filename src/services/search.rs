// SPDX-License-Identifier: BSD-3-Clause
// Copyright (c) 2026 Gida Search contributors

//! `SearchService`: the request-facing pipeline.  Rebuilds the document
//! collection for the request's locale, runs the matcher, post-processes the
//! hits, and fronts the whole thing with short-TTL caches.

use crate::models::search::{SearchDocument, SearchHit, SearchResults};
use crate::services::cache::TtlCache;
use crate::services::index::DocumentSource;
use crate::services::matcher::{search_documents, MIN_QUERY_LEN};
use crate::services::results::{apply_highlighting, group_by_kind, unique_titles};
use anyhow::{Context, Result};
use parking_lot::Mutex;
use std::time::Duration;

pub const RESULTS_CACHE_CAPACITY: usize = 100;
pub const RESULTS_CACHE_TTL: Duration = Duration::from_secs(5 * 60);
pub const SUGGESTIONS_CACHE_CAPACITY: usize = 200;
pub const SUGGESTIONS_CACHE_TTL: Duration = Duration::from_secs(10 * 60);

pub const DEFAULT_LOCALE: &str = "en";
pub const DEFAULT_SUGGESTION_LIMIT: usize = 5;

/// Per-request search options beyond the query string itself.
#[derive(Debug, Clone)]
pub struct SearchOptions {
    pub locale: String,
    pub group_by_type: bool,
    pub limit: Option<usize>,
}

impl Default for SearchOptions {
    fn default() -> Self {
        Self {
            locale: DEFAULT_LOCALE.to_string(),
            group_by_type: false,
            limit: None,
        }
    }
}

pub struct SearchService {
    source: DocumentSource,
    results_cache: Mutex<TtlCache<SearchResults>>,
    suggestions_cache: Mutex<TtlCache<Vec<String>>>,
}

impl SearchService {
    pub fn new(source: DocumentSource) -> Self {
        Self::with_cache_params(
            source,
            (RESULTS_CACHE_CAPACITY, RESULTS_CACHE_TTL),
            (SUGGESTIONS_CACHE_CAPACITY, SUGGESTIONS_CACHE_TTL),
        )
    }

    /// Construct with explicit cache parameters so tests can use isolated,
    /// small, or fast-expiring caches.
    pub fn with_cache_params(
        source: DocumentSource,
        results_cache: (usize, Duration),
        suggestions_cache: (usize, Duration),
    ) -> Self {
        Self {
            source,
            results_cache: Mutex::new(TtlCache::new(results_cache.0, results_cache.1)),
            suggestions_cache: Mutex::new(TtlCache::new(suggestions_cache.0, suggestions_cache.1)),
        }
    }

    /// Full search.  Returns the (possibly grouped) results and whether they
    /// were served from cache.
    pub async fn search(&self, query: &str, opts: &SearchOptions) -> Result<(SearchResults, bool)> {
        let query = query.trim();
        if query.chars().count() < MIN_QUERY_LEN {
            return Ok((SearchResults::Flat(Vec::new()), false));
        }
        // A zero limit is treated as unset, not as "no results".
        let limit = opts.limit.filter(|&l| l > 0);

        let key = cache_key(&[
            query,
            &opts.locale,
            &opts.group_by_type.to_string(),
            &limit.map_or_else(|| "none".to_string(), |l| l.to_string()),
        ]);
        if let Some(cached) = self.results_cache.lock().get(&key) {
            return Ok((cached, true));
        }

        let mut hits = self.ranked_hits(query, &opts.locale).await?;
        if let Some(limit) = limit {
            hits.truncate(limit);
        }
        let results = if opts.group_by_type {
            SearchResults::Grouped(group_by_kind(hits))
        } else {
            SearchResults::Flat(hits)
        };

        self.results_cache.lock().insert(key, results.clone());
        Ok((results, false))
    }

    /// Title suggestions for a partial query, deduplicated and capped.
    pub async fn suggestions(
        &self,
        query: &str,
        locale: &str,
        limit: usize,
    ) -> Result<(Vec<String>, bool)> {
        let query = query.trim();
        if query.chars().count() < MIN_QUERY_LEN {
            return Ok((Vec::new(), false));
        }

        let key = cache_key(&[query, locale, &limit.to_string()]);
        if let Some(cached) = self.suggestions_cache.lock().get(&key) {
            return Ok((cached, true));
        }

        let docs = self.locale_documents(locale).await?;
        let suggestions = unique_titles(&docs, query, limit);
        self.suggestions_cache.lock().insert(key, suggestions.clone());
        Ok((suggestions, false))
    }

    async fn ranked_hits(&self, query: &str, locale: &str) -> Result<Vec<SearchHit>> {
        let docs = self.locale_documents(locale).await?;
        let mut hits = search_documents(&docs, query);
        apply_highlighting(&mut hits);
        Ok(hits)
    }

    /// Document loading reads the filesystem, so it runs on the blocking
    /// pool rather than stalling a runtime worker thread.
    async fn locale_documents(&self, locale: &str) -> Result<Vec<SearchDocument>> {
        let source = self.source.clone();
        let locale = locale.to_string();
        tokio::task::spawn_blocking(move || {
            let mut docs = source.documents();
            docs.retain(|doc| doc.locale == locale);
            docs
        })
        .await
        .context("load documents")
    }
}

/// Cache key with length-prefixed parts, so a delimiter inside the query or
/// locale cannot make two different requests share an entry.
fn cache_key(parts: &[&str]) -> String {
    let mut key = String::new();
    for part in parts {
        key.push_str(&part.len().to_string());
        key.push(':');
        key.push_str(part);
        key.push('|');
    }
    key
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::content::ContentKind;
    use crate::models::search::SearchDocument;
    use crate::services::index;
    use std::sync::Arc;
    use tempfile::TempDir;

    fn doc(kind: ContentKind, slug: &str, locale: &str, title: &str) -> SearchDocument {
        SearchDocument {
            kind,
            slug: slug.to_string(),
            locale: locale.to_string(),
            title: title.to_string(),
            excerpt: format!("About {title}"),
            content: format!("Body text for {title}."),
            category: None,
            tags: None,
            url: format!("/x/{slug}"),
        }
    }

    /// Service backed by a fixed artifact, so tests control the collection.
    fn service_with_docs(docs: &[SearchDocument]) -> (TempDir, SearchService) {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("search-index.json");
        index::write_artifact(docs, &path).unwrap();
        let service = SearchService::with_cache_params(
            DocumentSource::Artifact(path),
            (4, Duration::from_secs(60)),
            (4, Duration::from_secs(60)),
        );
        (tmp, service)
    }

    fn bilingual_corpus() -> Vec<SearchDocument> {
        vec![
            doc(ContentKind::Guide, "haccp-basics", "en", "HACCP Basics"),
            doc(ContentKind::Guide, "haccp-basics", "tr", "HACCP Temelleri"),
            doc(ContentKind::Blog, "fridge", "en", "Fridge Temperatures"),
        ]
    }

    #[tokio::test]
    async fn test_locale_isolation() {
        let (_tmp, service) = service_with_docs(&bilingual_corpus());
        let opts = SearchOptions::default();
        let (results, _) = service.search("haccp", &opts).await.unwrap();
        let SearchResults::Flat(hits) = results else {
            panic!("expected flat results");
        };
        assert!(hits.iter().all(|h| h.document.locale == "en"));
        assert_eq!(hits.len(), 1);

        let tr_opts = SearchOptions {
            locale: "tr".to_string(),
            ..SearchOptions::default()
        };
        let (results, _) = service.search("haccp", &tr_opts).await.unwrap();
        let SearchResults::Flat(hits) = results else {
            panic!("expected flat results");
        };
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].document.locale, "tr");
    }

    #[tokio::test]
    async fn test_second_identical_search_is_cache_served() {
        let (_tmp, service) = service_with_docs(&bilingual_corpus());
        let opts = SearchOptions::default();
        let (first, cached_first) = service.search("haccp", &opts).await.unwrap();
        let (second, cached_second) = service.search("haccp", &opts).await.unwrap();
        assert!(!cached_first);
        assert!(cached_second);
        assert_eq!(
            serde_json::to_value(&first).unwrap(),
            serde_json::to_value(&second).unwrap()
        );
    }

    #[tokio::test]
    async fn test_cache_expiry_recomputes() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("search-index.json");
        index::write_artifact(&bilingual_corpus(), &path).unwrap();
        let service = SearchService::with_cache_params(
            DocumentSource::Artifact(path),
            (4, Duration::from_millis(10)),
            (4, Duration::from_millis(10)),
        );
        let opts = SearchOptions::default();
        service.search("haccp", &opts).await.unwrap();
        tokio::time::sleep(Duration::from_millis(20)).await;
        let (_, cached) = service.search("haccp", &opts).await.unwrap();
        assert!(!cached);
    }

    #[tokio::test]
    async fn test_short_query_never_reaches_matcher_or_cache() {
        let (_tmp, service) = service_with_docs(&bilingual_corpus());
        let (results, cached) = service
            .search("h", &SearchOptions::default())
            .await
            .unwrap();
        assert!(results.is_empty());
        assert!(!cached);
        let (suggestions, _) = service.suggestions("h", "en", 5).await.unwrap();
        assert!(suggestions.is_empty());
    }

    #[tokio::test]
    async fn test_grouped_results_preserve_all_hits() {
        let (_tmp, service) = service_with_docs(&bilingual_corpus());
        let opts = SearchOptions {
            group_by_type: true,
            ..SearchOptions::default()
        };
        let (flat, _) = service
            .search("haccp", &SearchOptions::default())
            .await
            .unwrap();
        let (grouped, _) = service.search("haccp", &opts).await.unwrap();
        assert_eq!(flat.len(), grouped.len());
        assert!(matches!(grouped, SearchResults::Grouped(_)));
    }

    #[tokio::test]
    async fn test_limit_caps_results() {
        let (_tmp, service) = service_with_docs(&bilingual_corpus());
        let opts = SearchOptions {
            limit: Some(1),
            ..SearchOptions::default()
        };
        let (results, _) = service.search("temperatures", &opts).await.unwrap();
        assert!(results.len() <= 1);
    }

    #[tokio::test]
    async fn test_zero_limit_is_treated_as_unset() {
        let (_tmp, service) = service_with_docs(&bilingual_corpus());
        let opts = SearchOptions {
            limit: Some(0),
            ..SearchOptions::default()
        };
        let (results, _) = service.search("haccp", &opts).await.unwrap();
        assert_eq!(results.len(), 1);

        // Same request with no limit must share the cache entry.
        let (_, cached) = service
            .search("haccp", &SearchOptions::default())
            .await
            .unwrap();
        assert!(cached);
    }

    #[tokio::test]
    async fn test_delimiter_in_query_does_not_collide_in_cache() {
        let (_tmp, service) = service_with_docs(&bilingual_corpus());
        let first = SearchOptions::default();
        service.search("ab|x", &first).await.unwrap();

        // Shifting the delimiter into the locale must be a different entry.
        let second = SearchOptions {
            locale: "x|en".to_string(),
            ..SearchOptions::default()
        };
        let (_, cached) = service.search("ab", &second).await.unwrap();
        assert!(!cached);
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 2)]
    async fn test_concurrent_searches_on_shared_service() {
        let (_tmp, service) = service_with_docs(&bilingual_corpus());
        let service = Arc::new(service);
        let mut handles = Vec::new();
        for _ in 0..4 {
            let service = Arc::clone(&service);
            handles.push(tokio::spawn(async move {
                service.search("haccp", &SearchOptions::default()).await
            }));
        }
        for handle in handles {
            let (results, _) = handle.await.unwrap().unwrap();
            assert_eq!(results.len(), 1);
        }
    }

    #[tokio::test]
    async fn test_suggestions_cached_and_deduplicated() {
        let mut docs = bilingual_corpus();
        docs.push(doc(ContentKind::Faq, "dup", "en", "HACCP Basics"));
        let (_tmp, service) = service_with_docs(&docs);
        let (first, cached_first) = service.suggestions("haccp", "en", 5).await.unwrap();
        assert_eq!(first, vec!["HACCP Basics"]);
        assert!(!cached_first);
        let (_, cached_second) = service.suggestions("haccp", "en", 5).await.unwrap();
        assert!(cached_second);
    }
}
