// SPDX-License-Identifier: BSD-3-Clause
// Copyright (c) 2026 Gida Search contributors

//! Index builder: flattens blog posts, guides, and FAQ entries into one
//! homogeneous [`SearchDocument`] collection, and persists/loads it as the
//! JSON artifact consumed by the client-side search.

use crate::models::content::{ContentKind, LOCALES};
use crate::models::search::SearchDocument;
use crate::services::content::ContentStore;
use anyhow::{Context, Result};
use std::fs;
use std::path::Path;

/// How much of an FAQ answer becomes the excerpt.
const FAQ_EXCERPT_CHARS: usize = 200;

/// Where documents come from at serve time: rebuilt from the content tree on
/// every request, or loaded from a previously persisted artifact.
#[derive(Clone)]
pub enum DocumentSource {
    Content(ContentStore),
    Artifact(std::path::PathBuf),
}

impl DocumentSource {
    pub fn documents(&self) -> Vec<SearchDocument> {
        match self {
            DocumentSource::Content(store) => build_documents(store),
            DocumentSource::Artifact(path) => load_artifact(path),
        }
    }
}

/// Build the full document collection, all locales tagged per-document.
/// Collection order is not meaningful; the matcher re-ranks.
pub fn build_documents(store: &ContentStore) -> Vec<SearchDocument> {
    let mut docs = Vec::new();

    for post in store.blog_posts() {
        docs.push(SearchDocument {
            kind: ContentKind::Blog,
            url: format!("/blog/{}", post.slug),
            slug: post.slug,
            locale: post.locale,
            title: post.front.title,
            excerpt: post.front.excerpt,
            content: post.body,
            category: Some(post.front.category),
            tags: Some(post.front.tags),
        });
    }

    for guide in store.guides() {
        docs.push(SearchDocument {
            kind: ContentKind::Guide,
            url: format!("/guides/{}", guide.slug),
            slug: guide.slug,
            locale: guide.locale,
            title: guide.front.title,
            excerpt: guide.front.description,
            content: guide.body,
            category: Some(guide.front.difficulty),
            tags: Some(guide.front.topics),
        });
    }

    for locale in LOCALES {
        for faq in store.faqs(locale) {
            docs.push(SearchDocument {
                kind: ContentKind::Faq,
                url: format!("/faq#{}", faq.id),
                slug: faq.id,
                locale: (*locale).to_string(),
                title: faq.question,
                excerpt: truncate_chars(&faq.answer, FAQ_EXCERPT_CHARS),
                content: faq.answer,
                category: Some(faq.category),
                tags: None,
            });
        }
    }

    docs
}

/// Serialize the collection to `path` as pretty-printed JSON, creating the
/// parent directory if needed.  The artifact is replaced wholesale.
pub fn write_artifact(docs: &[SearchDocument], path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .with_context(|| format!("create directory {}", parent.display()))?;
    }
    let json = serde_json::to_string_pretty(docs).context("serialize search index")?;
    fs::write(path, json).with_context(|| format!("write {}", path.display()))?;
    Ok(())
}

/// Load a persisted artifact.  A missing or corrupt file degrades to an
/// empty collection (search then returns no results) rather than an error.
pub fn load_artifact(path: &Path) -> Vec<SearchDocument> {
    let raw = match fs::read_to_string(path) {
        Ok(raw) => raw,
        Err(e) => {
            tracing::warn!(path = %path.display(), error = %e, "search index artifact unreadable");
            return Vec::new();
        }
    };
    match serde_json::from_str(&raw) {
        Ok(docs) => docs,
        Err(e) => {
            tracing::warn!(path = %path.display(), error = %e, "search index artifact corrupt");
            Vec::new()
        }
    }
}

fn truncate_chars(text: &str, max_chars: usize) -> String {
    text.chars().take(max_chars).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn fixture_store() -> (TempDir, ContentStore) {
        let tmp = TempDir::new().unwrap();
        let blog = tmp.path().join("content/blog");
        let guides = tmp.path().join("content/guides");
        let data = tmp.path().join("data");
        fs::create_dir_all(&blog).unwrap();
        fs::create_dir_all(&guides).unwrap();
        fs::create_dir_all(&data).unwrap();

        fs::write(
            blog.join("cooking-tips.mdx"),
            "---\ntitle: Cooking Tips\nexcerpt: Heat matters\npublishDate: 2026-02-01\n\
             author: Elif\ncategory: kitchen\ntags:\n  - cooking\n---\nCook thoroughly.\n",
        )
        .unwrap();
        fs::write(
            guides.join("haccp-basics.mdx"),
            "---\ntitle: HACCP Basics\ndescription: Intro to HACCP\ndifficulty: beginner\n\
             topics:\n  - haccp\nlastUpdated: 2026-01-05\n---\nHazard analysis from scratch.\n",
        )
        .unwrap();
        fs::write(
            data.join("faq-en.json"),
            r#"[{"id":"fridge-temp","question":"What temperature?","answer":"Keep your fridge at or below 4 degrees Celsius to slow bacterial growth.","category":"storage"}]"#,
        )
        .unwrap();

        let store = ContentStore::new(tmp.path().join("content"), data);
        (tmp, store)
    }

    #[test]
    fn test_field_mapping_per_kind() {
        let (_tmp, store) = fixture_store();
        let docs = build_documents(&store);
        assert_eq!(docs.len(), 3);

        let blog = docs.iter().find(|d| d.kind == ContentKind::Blog).unwrap();
        assert_eq!(blog.url, "/blog/cooking-tips");
        assert_eq!(blog.excerpt, "Heat matters");
        assert_eq!(blog.category.as_deref(), Some("kitchen"));
        assert_eq!(blog.tags.as_deref(), Some(&["cooking".to_string()][..]));

        let guide = docs.iter().find(|d| d.kind == ContentKind::Guide).unwrap();
        assert_eq!(guide.url, "/guides/haccp-basics");
        assert_eq!(guide.excerpt, "Intro to HACCP");
        assert_eq!(guide.category.as_deref(), Some("beginner"));

        let faq = docs.iter().find(|d| d.kind == ContentKind::Faq).unwrap();
        assert_eq!(faq.url, "/faq#fridge-temp");
        assert_eq!(faq.title, "What temperature?");
        assert_eq!(faq.excerpt, faq.content);
        assert!(faq.tags.is_none());
    }

    #[test]
    fn test_faq_excerpt_truncated_to_200_chars() {
        let long_answer = "a".repeat(300);
        assert_eq!(truncate_chars(&long_answer, FAQ_EXCERPT_CHARS).len(), 200);
        // Multi-byte input must not split a character.
        let turkish = "ğ".repeat(300);
        assert_eq!(
            truncate_chars(&turkish, FAQ_EXCERPT_CHARS).chars().count(),
            200
        );
    }

    #[test]
    fn test_artifact_round_trip_creates_parent_dir() {
        let (_tmp, store) = fixture_store();
        let docs = build_documents(&store);

        let out = TempDir::new().unwrap();
        let path = out.path().join("public/search-index.json");
        write_artifact(&docs, &path).unwrap();

        let loaded = load_artifact(&path);
        assert_eq!(loaded, docs);
    }

    #[test]
    fn test_missing_artifact_degrades_to_empty() {
        let tmp = TempDir::new().unwrap();
        assert!(load_artifact(&tmp.path().join("absent.json")).is_empty());
        let bad = tmp.path().join("bad.json");
        fs::write(&bad, "not json").unwrap();
        assert!(load_artifact(&bad).is_empty());
    }
}
