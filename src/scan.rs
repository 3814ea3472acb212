//! Document scanner: walks the content root and produces the ordered set of
//! markdown candidates surviving the mode's exclusion rules.
//!
//! Exclusion patterns match the forward-slash path relative to the content
//! root. Hidden (dot-prefixed) files and directories and `node_modules` are
//! never candidates, ahead of any configured pattern.

use crate::config::{BuildMode, ConfigError, ExcludePatterns};
use crate::log;
use anyhow::{Context, Result, bail};
use globset::{GlobBuilder, GlobSet, GlobSetBuilder};
use std::{
    cmp::Ordering,
    collections::BTreeSet,
    path::{Path, PathBuf},
};
use walkdir::{DirEntry, WalkDir};

/// Directory names skipped during traversal
const SKIPPED_DIRS: &[&str] = &["node_modules"];

// ============================================================================
// Content Paths
// ============================================================================

/// One markdown document candidate.
#[derive(Debug, Clone)]
pub struct ContentPath {
    /// Absolute path on disk
    pub source: PathBuf,
    /// Forward-slash path relative to the content root
    pub relative: String,
}

impl ContentPath {
    /// Build from an absolute file path under `root`.
    ///
    /// Returns `None` when the path does not decode as UTF-8 relative to the
    /// root; such files cannot carry a route.
    fn new(root: &Path, source: PathBuf) -> Option<Self> {
        let relative = source
            .strip_prefix(root)
            .ok()?
            .components()
            .map(|c| c.as_os_str().to_str())
            .collect::<Option<Vec<_>>>()?
            .join("/");
        Some(Self { source, relative })
    }

    /// Route the derived record will carry: `/` + relative path with the
    /// `.md` suffix swapped for `.html`.
    pub fn route(&self) -> String {
        let stem = self.relative.strip_suffix(".md").unwrap_or(&self.relative);
        format!("/{stem}.html")
    }
}

// Candidates are identified and ordered by their relative path; the absolute
// source is derived from it under a single root.
impl PartialEq for ContentPath {
    fn eq(&self, other: &Self) -> bool {
        self.relative == other.relative
    }
}

impl Eq for ContentPath {}

impl PartialOrd for ContentPath {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for ContentPath {
    fn cmp(&self, other: &Self) -> Ordering {
        self.relative.cmp(&other.relative)
    }
}

// ============================================================================
// Exclusion Rules
// ============================================================================

/// Compiled exclusion rules for one build mode.
#[derive(Debug)]
pub struct ExcludeRules {
    globs: GlobSet,
}

impl ExcludeRules {
    /// Compile the effective pattern set for `mode`.
    ///
    /// `*` stays within one path segment, `**` recurses. Every pattern `p`
    /// is also compiled as `p/**`, so a pattern naming a directory drops the
    /// whole subtree.
    pub fn compile(patterns: &ExcludePatterns, mode: BuildMode) -> Result<Self> {
        let mut builder = GlobSetBuilder::new();

        for pattern in patterns.for_mode(mode) {
            for expanded in [pattern.clone(), format!("{pattern}/**")] {
                let glob = GlobBuilder::new(&expanded)
                    .literal_separator(true)
                    .build()
                    .map_err(|err| ConfigError::Glob(pattern.clone(), err))?;
                builder.add(glob);
            }
        }

        let globs = builder
            .build()
            .context("failed to combine exclusion patterns")?;
        Ok(Self { globs })
    }

    /// Whether the root-relative path is excluded.
    pub fn is_excluded(&self, relative: &str) -> bool {
        self.globs.is_match(relative)
    }
}

// ============================================================================
// Scanning
// ============================================================================

/// Collect every markdown document under `root` that survives `rules`,
/// ordered and deduplicated by relative path.
///
/// An unreadable root is fatal; an unreadable entry further down logs a
/// warning and is skipped.
pub fn scan_documents(root: &Path, rules: &ExcludeRules) -> Result<BTreeSet<ContentPath>> {
    if !root.is_dir() {
        bail!("content root is not a directory: {}", root.display());
    }

    let mut documents = BTreeSet::new();
    let walker = WalkDir::new(root)
        .into_iter()
        .filter_entry(|e| e.depth() == 0 || !is_skipped(e));

    for entry in walker {
        let entry = match entry {
            Ok(entry) => entry,
            Err(err) if err.depth() == 0 => {
                return Err(err)
                    .with_context(|| format!("failed to read content root {}", root.display()));
            }
            Err(err) => {
                log!("warn"; "skipping unreadable entry: {err}");
                continue;
            }
        };

        if !entry.file_type().is_file() {
            continue;
        }
        if entry.path().extension().is_none_or(|ext| ext != "md") {
            continue;
        }

        let Some(path) = ContentPath::new(root, entry.into_path()) else {
            log!("warn"; "skipping non-UTF-8 path under {}", root.display());
            continue;
        };

        if rules.is_excluded(&path.relative) {
            continue;
        }
        documents.insert(path);
    }

    Ok(documents)
}

/// Hidden entries and skipped directories are never candidates
fn is_skipped(entry: &DirEntry) -> bool {
    let name = entry.file_name().to_str().unwrap_or_default();
    name.starts_with('.') || SKIPPED_DIRS.contains(&name)
}

// ============================================================================
// Tests
// ============================================================================
