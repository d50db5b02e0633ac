// SPDX-License-Identifier: BSD-3-Clause
// Copyright (c) 2026 Gida Search contributors

//! Content store: reads markdown files with YAML frontmatter and the
//! per-locale FAQ JSON files from the local content tree.
//!
//! A malformed file is skipped with a warning; it never fails the batch.

use crate::models::content::{BlogFrontmatter, ContentItem, FaqEntry, GuideFrontmatter};
use anyhow::{anyhow, Context, Result};
use serde::de::DeserializeOwned;
use std::fs;
use std::path::{Path, PathBuf};

/// Reads blog posts, guides, and FAQ entries from disk.
#[derive(Clone)]
pub struct ContentStore {
    content_dir: PathBuf,
    data_dir: PathBuf,
}

impl ContentStore {
    pub fn new(content_dir: impl Into<PathBuf>, data_dir: impl Into<PathBuf>) -> Self {
        Self {
            content_dir: content_dir.into(),
            data_dir: data_dir.into(),
        }
    }

    /// All blog posts across locales, newest first.
    pub fn blog_posts(&self) -> Vec<ContentItem<BlogFrontmatter>> {
        let mut posts = self.load_items::<BlogFrontmatter>("blog");
        posts.sort_by(|a, b| b.front.publish_date.cmp(&a.front.publish_date));
        posts
    }

    /// All guides across locales, in directory order.
    pub fn guides(&self) -> Vec<ContentItem<GuideFrontmatter>> {
        self.load_items::<GuideFrontmatter>("guides")
    }

    /// FAQ entries for one locale, from `<data_dir>/faq-{locale}.json`.
    /// A missing or unreadable file yields an empty list.
    pub fn faqs(&self, locale: &str) -> Vec<FaqEntry> {
        let path = self.data_dir.join(format!("faq-{locale}.json"));
        match read_faq_file(&path) {
            Ok(entries) => entries,
            Err(e) => {
                tracing::warn!(path = %path.display(), error = %e, "skipping FAQ file");
                Vec::new()
            }
        }
    }

    fn load_items<F: DeserializeOwned>(&self, subdir: &str) -> Vec<ContentItem<F>> {
        let dir = self.content_dir.join(subdir);
        let mut items = Vec::new();
        for path in markdown_files(&dir) {
            match read_content_file::<F>(&path) {
                Ok(item) => items.push(item),
                Err(e) => {
                    tracing::warn!(path = %path.display(), error = %e, "skipping content file");
                }
            }
        }
        items
    }
}

/// Markdown files in a directory, sorted by name for a stable order.
/// A missing directory is treated as empty.
fn markdown_files(dir: &Path) -> Vec<PathBuf> {
    let Ok(entries) = fs::read_dir(dir) else {
        return Vec::new();
    };
    let mut files: Vec<PathBuf> = entries
        .filter_map(|entry| entry.ok().map(|e| e.path()))
        .filter(|path| {
            matches!(
                path.extension().and_then(|ext| ext.to_str()),
                Some("md" | "mdx")
            )
        })
        .collect();
    files.sort();
    files
}

fn read_faq_file(path: &Path) -> Result<Vec<FaqEntry>> {
    let raw = fs::read_to_string(path).with_context(|| format!("read {}", path.display()))?;
    serde_json::from_str(&raw).with_context(|| format!("parse {}", path.display()))
}

fn read_content_file<F: DeserializeOwned>(path: &Path) -> Result<ContentItem<F>> {
    let raw = fs::read_to_string(path).with_context(|| format!("read {}", path.display()))?;
    let (front_raw, body) =
        split_frontmatter(&raw).ok_or_else(|| anyhow!("missing frontmatter fences"))?;
    let front: F = serde_yaml::from_str(front_raw).context("parse frontmatter")?;

    let filename = path
        .file_name()
        .and_then(|name| name.to_str())
        .ok_or_else(|| anyhow!("non-UTF-8 filename"))?;
    let (slug, locale) = slug_and_locale(filename);

    Ok(ContentItem {
        slug,
        locale,
        front,
        body: body.to_string(),
    })
}

/// Split a raw file into its YAML frontmatter block and the markdown body.
/// The frontmatter sits between a leading `---` line and the next `---` line.
fn split_frontmatter(raw: &str) -> Option<(&str, &str)> {
    let rest = raw.strip_prefix("---")?;
    let rest = rest.strip_prefix("\r\n").or_else(|| rest.strip_prefix('\n'))?;
    let end = rest.find("\n---")?;
    let front = rest[..end].trim_end_matches('\r');
    let body = &rest[end + "\n---".len()..];
    let body = body
        .strip_prefix("\r\n")
        .or_else(|| body.strip_prefix('\n'))
        .unwrap_or(body);
    Some((front, body))
}

/// Derive `(slug, locale)` from a content filename.  The locale rides on the
/// filename as a suffix: `haccp-basics.tr.mdx` is Turkish, everything else
/// (including an explicit `.en.` suffix) is English.
pub fn slug_and_locale(filename: &str) -> (String, String) {
    let stem = filename
        .strip_suffix(".mdx")
        .or_else(|| filename.strip_suffix(".md"))
        .unwrap_or(filename);
    if let Some(slug) = stem.strip_suffix(".tr") {
        (slug.to_string(), "tr".to_string())
    } else if let Some(slug) = stem.strip_suffix(".en") {
        (slug.to_string(), "en".to_string())
    } else {
        (stem.to_string(), "en".to_string())
    }
}
