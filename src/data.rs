//! Data file output: renders the finished index into `<data>/*.json`.
//!
//! | File              | Shape                                        |
//! |-------------------|----------------------------------------------|
//! | `pages.json`      | array of listing pages                       |
//! | `categories.json` | object keyed by category name                |
//! | `tags.json`       | object keyed by tag name                     |
//! | `archive.json`    | object keyed by year                         |
//! | `unlisted.json`   | array of records outside every listing       |
//! | `site.json`       | site metadata (`[base]` and `[theme]`)       |
//!
//! Record ordering inside each file follows the index, so repeated builds
//! over the same content write byte-identical output.

use crate::config::{BaseConfig, SiteConfig, ThemeConfig};
use crate::index::PostIndex;
use anyhow::{Context, Result};
use serde::Serialize;
use std::fs;

type DataFileRenderer = fn(&SiteConfig, &PostIndex) -> String;

/// Every data file the build emits, with its renderer.
pub const DATA_FILES: &[(&str, DataFileRenderer)] = &[
    ("pages.json", render_pages),
    ("categories.json", render_categories),
    ("tags.json", render_tags),
    ("archive.json", render_archive),
    ("unlisted.json", render_unlisted),
    ("site.json", render_site),
];

/// Write all data files into the configured data directory.
///
/// Creates the directory if needed and overwrites any previous output.
pub fn write_to_disk(config: &SiteConfig, index: &PostIndex) -> Result<()> {
    let data_dir = &config.content.data;

    fs::create_dir_all(data_dir)
        .with_context(|| format!("failed to create data directory `{}`", data_dir.display()))?;

    for (name, renderer) in DATA_FILES {
        let path = data_dir.join(name);
        fs::write(&path, renderer(config, index))
            .with_context(|| format!("failed to write `{}`", path.display()))?;
    }

    Ok(())
}

// ============================================================================
// Renderers
// ============================================================================

fn render_pages(_config: &SiteConfig, index: &PostIndex) -> String {
    to_json(&index.pages, "[]")
}

fn render_categories(_config: &SiteConfig, index: &PostIndex) -> String {
    to_json(&index.categories, "{}")
}

fn render_tags(_config: &SiteConfig, index: &PostIndex) -> String {
    to_json(&index.tags, "{}")
}

fn render_archive(_config: &SiteConfig, index: &PostIndex) -> String {
    to_json(&index.archive, "{}")
}

fn render_unlisted(_config: &SiteConfig, index: &PostIndex) -> String {
    to_json(&index.unlisted, "[]")
}

/// Site metadata mirrored into the data directory so templates can read
/// `[base]` and `[theme]` without parsing the TOML config.
#[derive(Serialize)]
struct SiteMeta<'a> {
    base: &'a BaseConfig,
    theme: &'a ThemeConfig,
}

fn render_site(config: &SiteConfig, _index: &PostIndex) -> String {
    let meta = SiteMeta {
        base: &config.base,
        theme: &config.theme,
    };
    to_json(&meta, "{}")
}

fn to_json<T: Serialize>(value: &T, fallback: &str) -> String {
    serde_json::to_string_pretty(value).unwrap_or_else(|_| fallback.to_string())
}

// ============================================================================
// Tests
// ============================================================================
