//! Paginator and indexer: orders the eligible records, splits them into
//! pages and derives the category / tag / year groups.
//!
//! Everything here is pure: the index is fully determined by the records and
//! the build mode, so two builds over the same content produce identical
//! output.

use crate::config::BuildMode;
use crate::extract::PostRecord;
use serde::Serialize;
use std::cmp::Ordering;
use std::collections::BTreeMap;

/// Group maps, keyed by category or tag name
pub type GroupIndex = BTreeMap<String, Vec<PostRecord>>;
/// Year groups for the archive listing
pub type ArchiveIndex = BTreeMap<u16, Vec<PostRecord>>;

// ============================================================================
// Output Types
// ============================================================================

/// One listing page.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Page {
    /// 1-based page number
    pub index: usize,
    /// Total number of pages
    pub total: usize,
    pub has_prev: bool,
    pub has_next: bool,
    pub posts: Vec<PostRecord>,
}

/// Everything the pipeline hands to the renderer.
#[derive(Debug, PartialEq)]
pub struct PostIndex {
    pub pages: Vec<Page>,
    pub categories: GroupIndex,
    pub tags: GroupIndex,
    pub archive: ArchiveIndex,
    /// Scanned but not listed: undated records, plus drafts in production.
    /// Their routes stay resolvable even though no listing links them.
    pub unlisted: Vec<PostRecord>,
}

impl PostIndex {
    /// Number of listed posts across all pages.
    pub fn post_count(&self) -> usize {
        self.pages.iter().map(|page| page.posts.len()).sum()
    }
}

// ============================================================================
// Index Construction
// ============================================================================

/// Build the full index from extracted records.
///
/// `records` may arrive in any order; the output depends only on their
/// contents and `mode`.
pub fn build_index(records: Vec<PostRecord>, page_size: usize, mode: BuildMode) -> PostIndex {
    let (mut listed, mut unlisted) = partition(records, mode);

    listed.sort_by(compare_records);
    unlisted.sort_by(|a, b| a.route.cmp(&b.route));

    let pages = paginate(&listed, page_size);
    let (categories, tags, archive) = build_groups(&listed);

    PostIndex {
        pages,
        categories,
        tags,
        archive,
        unlisted,
    }
}

/// Split records into listing-eligible and unlisted.
///
/// Undated records are never listed. Draft records are listed in development
/// (preview) and unlisted in production. The split is total: every record
/// lands in exactly one of the two buckets.
fn partition(records: Vec<PostRecord>, mode: BuildMode) -> (Vec<PostRecord>, Vec<PostRecord>) {
    records.into_iter().partition(|record| {
        record.date.is_some() && (!record.draft || mode == BuildMode::Development)
    })
}

/// Compare two records for listing order (newest first).
///
/// - Dated records come before undated ones
/// - Equal dates fall back to the route, ascending
fn compare_records(a: &PostRecord, b: &PostRecord) -> Ordering {
    match (&a.date, &b.date) {
        (Some(date_a), Some(date_b)) => date_b.cmp(date_a).then_with(|| a.route.cmp(&b.route)),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => a.route.cmp(&b.route),
    }
}

/// Split the ordered records into pages of `page_size` posts.
///
/// Page numbering is 1-based; zero records produce zero pages. `page_size`
/// must be at least 1 (enforced at config validation).
fn paginate(records: &[PostRecord], page_size: usize) -> Vec<Page> {
    let total = records.len().div_ceil(page_size);

    records
        .chunks(page_size)
        .enumerate()
        .map(|(i, chunk)| Page {
            index: i + 1,
            total,
            has_prev: i > 0,
            has_next: i + 1 < total,
            posts: chunk.to_vec(),
        })
        .collect()
}

/// Derive the category, tag and year groups from the listed records.
///
/// `listed` is already in listing order, so each group inherits it; a record
/// with several tags appears in each of those tag groups.
fn build_groups(listed: &[PostRecord]) -> (GroupIndex, GroupIndex, ArchiveIndex) {
    let mut categories = GroupIndex::new();
    let mut tags = GroupIndex::new();
    let mut archive = ArchiveIndex::new();

    for record in listed {
        if let Some(category) = &record.category {
            categories
                .entry(category.clone())
                .or_default()
                .push(record.clone());
        }

        for tag in &record.tags {
            tags.entry(tag.clone()).or_default().push(record.clone());
        }

        if let Some(date) = record.date {
            archive.entry(date.year).or_default().push(record.clone());
        }
    }

    (categories, tags, archive)
}

// ============================================================================
// Tests
// ============================================================================
