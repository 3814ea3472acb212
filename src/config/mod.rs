//! Site configuration management for `lectern.toml`.
//!
//! # Sections
//!
//! | Section     | Purpose                                       |
//! |-------------|-----------------------------------------------|
//! | `[base]`    | Site metadata (title, description, url)       |
//! | `[content]` | Content root, page size, exclusion patterns   |
//! | `[theme]`   | Renderer-facing settings (nav, search, etc.)  |
//! | `[extra]`   | User-defined custom fields                    |
//!
//! # Example
//!
//! ```toml
//! [base]
//! title = "My Blog"
//! url = "https://example.com"
//!
//! [content]
//! root = "docs"
//! page_size = 10
//!
//! [content.exclude]
//! production = ["**/draft/**/*.md"]
//!
//! [theme]
//! nav = [{ text = "Home", link = "/" }]
//!
//! [extra]
//! analytics_id = "UA-12345"
//! ```

mod base;
mod content;
pub mod defaults;
mod error;
mod theme;

// Re-export public types used by other modules
pub use base::BaseConfig;
pub use content::{BuildMode, ContentConfig, ExcludePatterns};
pub use error::ConfigError;
pub use theme::{SearchProvider, ThemeConfig};

use crate::cli::Cli;
use anyhow::{Result, bail};
use educe::Educe;
use serde::{Deserialize, Serialize};
use std::{
    collections::HashMap,
    fs,
    path::{Path, PathBuf},
};

// ============================================================================
// Root Configuration
// ============================================================================

/// Root configuration structure representing lectern.toml
#[derive(Debug, Clone, Educe, Serialize, Deserialize)]
#[educe(Default)]
#[serde(deny_unknown_fields)]
pub struct SiteConfig {
    /// CLI arguments reference
    #[serde(skip)]
    pub cli: Option<&'static Cli>,

    /// Absolute path to the config file (set after loading)
    #[serde(skip)]
    pub config_path: PathBuf,

    /// Project root directory (set from CLI `--root` or the cwd)
    #[serde(skip)]
    root: Option<PathBuf>,

    /// Basic site information
    #[serde(default)]
    pub base: BaseConfig,

    /// Indexing pipeline settings
    #[serde(default)]
    pub content: ContentConfig,

    /// Renderer-facing settings
    #[serde(default)]
    pub theme: ThemeConfig,

    /// User-defined extra fields
    #[serde(default)]
    pub extra: HashMap<String, toml::Value>,
}

impl SiteConfig {
    /// Parse configuration from TOML string
    pub fn from_str(content: &str) -> Result<Self> {
        let config: SiteConfig = toml::from_str(content).map_err(ConfigError::Toml)?;
        Ok(config)
    }

    /// Load configuration from file path
    pub fn from_path(path: &Path) -> Result<Self> {
        let content =
            fs::read_to_string(path).map_err(|err| ConfigError::Io(path.to_path_buf(), err))?;
        Self::from_str(&content)
    }

    /// Get the root directory path
    pub fn get_root(&self) -> &Path {
        self.root.as_deref().unwrap_or(Path::new("./"))
    }

    /// Set the root directory path
    pub fn set_root(&mut self, path: &Path) {
        self.root = Some(path.to_path_buf())
    }

    /// Get CLI arguments reference
    pub fn get_cli(&self) -> &'static Cli {
        self.cli.unwrap()
    }

    /// Update configuration with CLI arguments
    pub fn update_with_cli(&mut self, cli: &'static Cli) {
        self.cli = Some(cli);

        let root = cli
            .root
            .as_ref()
            .cloned()
            .unwrap_or_else(|| self.get_root().to_owned());

        self.set_root(&root);
        self.update_path_with_root(&root);

        Self::update_option(&mut self.content.page_size, cli.page_size.as_ref());
    }

    /// Update config option if CLI value is provided
    fn update_option<T: Clone>(config_option: &mut T, cli_option: Option<&T>) {
        if let Some(option) = cli_option {
            *config_option = option.clone();
        }
    }

    /// Update all paths relative to root directory and normalize to absolute paths
    fn update_path_with_root(&mut self, root: &Path) {
        let cli = self.get_cli();

        // Apply CLI overrides first
        Self::update_option(&mut self.content.root, cli.content.as_ref());

        // Normalize root to absolute path
        let root = Self::normalize_path(root);
        self.set_root(&root);

        // Normalize config path
        self.config_path = Self::normalize_path(&root.join(&cli.config));

        // Normalize all directory paths
        self.content.root = Self::normalize_path(&root.join(&self.content.root));
        self.content.data = Self::normalize_path(&root.join(&self.content.data));
    }

    /// Normalize a path to absolute, using canonicalize if the path exists
    fn normalize_path(path: &Path) -> PathBuf {
        path.canonicalize().unwrap_or_else(|_| {
            // For non-existent paths, manually make them absolute
            if path.is_absolute() {
                path.to_path_buf()
            } else {
                std::env::current_dir()
                    .map(|cwd| cwd.join(path))
                    .unwrap_or_else(|_| path.to_path_buf())
            }
        })
    }

    /// Validate configuration before the pipeline runs
    pub fn validate(&self) -> Result<()> {
        if !self.config_path.exists() {
            bail!("Config file not found");
        }

        if self.content.page_size == 0 {
            bail!(ConfigError::Validation(
                "[content.page_size] must be at least 1".into()
            ));
        }

        if let Some(base_url) = &self.base.url
            && !base_url.starts_with("http")
        {
            bail!(ConfigError::Validation(
                "[base.url] must start with http:// or https://".into()
            ));
        }

        if !self.content.root.is_dir() {
            bail!(ConfigError::Validation(format!(
                "[content.root] is not a directory: {}",
                self.content.root.display()
            )));
        }

        self.theme.validate()?;

        Ok(())
    }
}

// ============================================================================
// Tests
// ============================================================================
