//! Pipeline orchestration.
//!
//! Coordinates scanning, extraction and indexing, then writes the data files.
//!
//! # Architecture
//!
//! ```text
//! run_build() / run_check()
//!     │
//!     ├── build_site()
//!     │       │
//!     │       ├── scan_documents()  ──► candidate paths, exclusions applied
//!     │       ├── extract_file()    ──► one record per candidate (parallel)
//!     │       └── build_index()     ──► pages + groups + unlisted
//!     │
//!     └── data::write_to_disk() ──► <data>/*.json   (build only)
//! ```

use crate::{
    config::{BuildMode, SiteConfig},
    data,
    extract::extract_file,
    index::{PostIndex, build_index},
    log,
    scan::{ContentPath, ExcludeRules, scan_documents},
};
use anyhow::{Result, bail};
use rayon::prelude::*;

/// Outcome of the scan + extract + index stages.
#[derive(Debug)]
pub struct BuildReport {
    pub index: PostIndex,
    /// Candidates that survived the scan
    pub document_count: usize,
    /// Extraction problems: unreadable files plus header issues
    pub issue_count: usize,
}

/// Run the full pipeline for `mode` without touching the disk.
///
/// Every extraction problem is logged as a warning; none of them aborts the
/// build, so one malformed header cannot take the whole listing down.
pub fn build_site(config: &SiteConfig, mode: BuildMode) -> Result<BuildReport> {
    let root = &config.content.root;
    let rules = ExcludeRules::compile(&config.content.exclude, mode)?;

    log!("scan"; "scanning {} ({mode})", root.display());
    let candidates: Vec<ContentPath> = scan_documents(root, &rules)?.into_iter().collect();
    log!("scan"; "found {} documents", candidates.len());

    // ========================================================================
    // Extract metadata from all candidates
    // ========================================================================
    // Reads and header parsing are independent per file, so they run on the
    // rayon pool. Results come back in candidate order, which keeps the
    // warning log stable across runs.
    let results: Vec<_> = candidates
        .par_iter()
        .map(|document| (document, extract_file(document)))
        .collect();

    let mut records = Vec::with_capacity(results.len());
    let mut issue_count = 0;

    for (document, result) in results {
        match result {
            Ok(extraction) => {
                for issue in &extraction.issues {
                    issue_count += 1;
                    log!("warn"; "{}: {issue}", document.relative);
                }
                records.push(extraction.record);
            }
            Err(err) => {
                issue_count += 1;
                log!("warn"; "{:#}", anyhow::Error::new(err));
            }
        }
    }

    let index = build_index(records, config.content.page_size, mode);

    Ok(BuildReport {
        index,
        document_count: candidates.len(),
        issue_count,
    })
}

/// Build the index and write the data files.
pub fn run_build(config: &SiteConfig, mode: BuildMode) -> Result<()> {
    let report = build_site(config, mode)?;

    data::write_to_disk(config, &report.index)?;

    log_summary(&report);
    log!(
        "build";
        "wrote {} data files to {}",
        data::DATA_FILES.len(),
        config.content.data.display()
    );

    Ok(())
}

/// Run the pipeline without writing anything and fail if issues were found.
pub fn run_check(config: &SiteConfig, mode: BuildMode) -> Result<()> {
    let report = build_site(config, mode)?;

    log_summary(&report);

    if report.issue_count > 0 {
        bail!(
            "found {} issue(s) in {} document(s)",
            report.issue_count,
            report.document_count
        );
    }

    log!("check"; "ok");
    Ok(())
}

fn log_summary(report: &BuildReport) {
    let index = &report.index;
    log!(
        "index";
        "{} posts on {} pages, {} categories, {} tags, {} unlisted",
        index.post_count(),
        index.pages.len(),
        index.categories.len(),
        index.tags.len(),
        index.unlisted.len()
    );
}

// ============================================================================
// Tests
// ============================================================================
