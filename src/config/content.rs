//! `[content]` section configuration.
//!
//! Contains the content root, pagination size, data output directory and the
//! mode-partitioned exclusion pattern sets.

use super::defaults;
use clap::ValueEnum;
use educe::Educe;
use serde::{Deserialize, Serialize};
use std::{fmt, path::PathBuf};

// ============================================================================
// Build Mode
// ============================================================================

/// Build mode selecting which exclusion set applies and whether drafts are
/// listed.
///
/// The mode is always an explicit parameter (CLI `--mode`); it is never read
/// from the process environment.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum BuildMode {
    /// Published output: full exclusion set, drafts dropped.
    #[default]
    Production,
    /// Local preview: reduced exclusion set, drafts listed.
    Development,
}

impl fmt::Display for BuildMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Production => write!(f, "production"),
            Self::Development => write!(f, "development"),
        }
    }
}

// ============================================================================
// Main ContentConfig
// ============================================================================

/// `[content]` section in lectern.toml - indexing pipeline configuration.
///
/// # Example
/// ```toml
/// [content]
/// root = "docs"        # Markdown source directory
/// page_size = 10       # Posts per page
/// data = "_data"       # JSON output directory
///
/// [content.exclude]
/// always = ["README.md"]
/// production = ["**/draft/**/*.md"]
/// ```
#[derive(Debug, Clone, Educe, Serialize, Deserialize)]
#[educe(Default)]
#[serde(default, deny_unknown_fields)]
pub struct ContentConfig {
    /// Markdown source directory, relative to the project root.
    #[serde(default = "defaults::content::root")]
    #[educe(Default = defaults::content::root())]
    pub root: PathBuf,

    /// Number of posts per listing page. Must be at least 1.
    #[serde(default = "defaults::content::page_size")]
    #[educe(Default = defaults::content::page_size())]
    pub page_size: usize,

    /// Output directory for the generated JSON data files.
    #[serde(default = "defaults::content::data")]
    #[educe(Default = defaults::content::data())]
    pub data: PathBuf,

    /// Exclusion pattern sets, partitioned by build mode.
    #[serde(default)]
    pub exclude: ExcludePatterns,
}

// ============================================================================
// Exclusion Patterns
// ============================================================================

/// `[content.exclude]` - glob patterns removing documents from the index.
///
/// Patterns match against the forward-slash path relative to the content
/// root. The effective set for a mode is built by union: production builds
/// apply all three lists, development builds apply `always` and
/// `development`. Production therefore always excludes at least what
/// development excludes.
#[derive(Debug, Clone, Educe, Serialize, Deserialize)]
#[educe(Default)]
#[serde(default, deny_unknown_fields)]
pub struct ExcludePatterns {
    /// Patterns applied in every mode.
    #[serde(default = "defaults::content::exclude::always")]
    #[educe(Default = defaults::content::exclude::always())]
    pub always: Vec<String>,

    /// Additional patterns applied only in production.
    #[serde(default = "defaults::content::exclude::production")]
    #[educe(Default = defaults::content::exclude::production())]
    pub production: Vec<String>,

    /// Additional patterns applied in development (and, by union, in
    /// production).
    #[serde(default = "defaults::content::exclude::development")]
    #[educe(Default = defaults::content::exclude::development())]
    pub development: Vec<String>,
}

impl ExcludePatterns {
    /// Effective pattern list for the given mode.
    pub fn for_mode(&self, mode: BuildMode) -> Vec<String> {
        let mut patterns = self.always.clone();
        patterns.extend_from_slice(&self.development);
        if mode == BuildMode::Production {
            patterns.extend_from_slice(&self.production);
        }
        patterns
    }
}

#[cfg(test)]
mod tests {
    use super::super::SiteConfig;
    use super::*;

    #[test]
    fn test_content_config_defaults() {
        let config = r#"
            [base]
            title = "Test"
        "#;
        let config: SiteConfig = toml::from_str(config).unwrap();

        assert_eq!(config.content.root, PathBuf::from("docs"));
        assert_eq!(config.content.page_size, 10);
        assert_eq!(config.content.data, PathBuf::from("_data"));
        assert_eq!(config.content.exclude.always, vec!["README.md"]);
        assert_eq!(
            config.content.exclude.production,
            vec![
                "**/trash/**/*.md",
                "**/draft/**/*.md",
                "**/private-notes/*.md"
            ]
        );
        assert!(config.content.exclude.development.is_empty());
    }

    #[test]
    fn test_content_config_full() {
        let config = r#"
            [base]
            title = "Test"

            [content]
            root = "posts"
            page_size = 5
            data = "generated"

            [content.exclude]
            always = ["index.md"]
            production = ["wip/**"]
            development = ["bench/**"]
        "#;
        let config: SiteConfig = toml::from_str(config).unwrap();

        assert_eq!(config.content.root, PathBuf::from("posts"));
        assert_eq!(config.content.page_size, 5);
        assert_eq!(config.content.data, PathBuf::from("generated"));
        assert_eq!(config.content.exclude.always, vec!["index.md"]);
        assert_eq!(config.content.exclude.production, vec!["wip/**"]);
        assert_eq!(config.content.exclude.development, vec!["bench/**"]);
    }

    #[test]
    fn test_exclude_for_mode_is_union() {
        let exclude = ExcludePatterns {
            always: vec!["README.md".into()],
            production: vec!["draft/**".into()],
            development: vec!["bench/**".into()],
        };

        let dev = exclude.for_mode(BuildMode::Development);
        assert_eq!(dev, vec!["README.md", "bench/**"]);

        let prod = exclude.for_mode(BuildMode::Production);
        assert_eq!(prod, vec!["README.md", "bench/**", "draft/**"]);

        // Production covers everything development covers
        for pattern in &dev {
            assert!(prod.contains(pattern));
        }
    }

    #[test]
    fn test_build_mode_display() {
        assert_eq!(BuildMode::Production.to_string(), "production");
        assert_eq!(BuildMode::Development.to_string(), "development");
    }

    #[test]
    fn test_build_mode_deserialize() {
        #[derive(Deserialize)]
        struct Wrapper {
            mode: BuildMode,
        }
        let w: Wrapper = toml::from_str(r#"mode = "development""#).unwrap();
        assert_eq!(w.mode, BuildMode::Development);
    }

    #[test]
    fn test_unknown_exclude_field_rejection() {
        let config = r#"
            [base]
            title = "Test"

            [content.exclude]
            staging = ["a.md"]
        "#;
        let result: Result<SiteConfig, _> = toml::from_str(config);
        assert!(result.is_err());
    }
}
