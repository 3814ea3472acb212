//! `[theme]` section configuration.
//!
//! Declarative settings the downstream renderer consumes: navigation bar,
//! social links, search provider and comment widget wiring. Lectern validates
//! and re-emits these; it never interprets them.

use super::{defaults, error::ConfigError};
use anyhow::{Result, bail};
use educe::Educe;
use serde::{Deserialize, Serialize};

/// `[theme]` section in lectern.toml - renderer-facing site settings.
///
/// # Example
/// ```toml
/// [theme]
/// website = "https://github.com/alice/blog"
/// nav = [
///     { text = "Home", link = "/" },
///     { text = "Archive", link = "/pages/archives" },
/// ]
/// social = [{ icon = "github", link = "https://github.com/alice" }]
///
/// [theme.search]
/// provider = "local"
///
/// [theme.comment]
/// repo = "alice/blog"
/// repo_id = "MDEwOlJlcG9zaXRvcnkz"
/// category_id = "DIC_kwDOFshSIs4C"
/// ```
#[derive(Debug, Clone, Educe, Serialize, Deserialize)]
#[educe(Default)]
#[serde(default, deny_unknown_fields)]
pub struct ThemeConfig {
    /// Copyright link shown in the site footer.
    #[serde(default = "defaults::theme::website")]
    #[educe(Default = defaults::theme::website())]
    pub website: Option<String>,

    /// Navigation bar entries, in display order.
    #[serde(default)]
    pub nav: Vec<NavItem>,

    /// Social links shown in the header.
    #[serde(default)]
    pub social: Vec<SocialLink>,

    /// Search settings.
    #[serde(default)]
    pub search: SearchConfig,

    /// Comment widget (giscus) wiring. Absent section disables comments.
    #[serde(default)]
    pub comment: Option<CommentConfig>,

    /// Outline settings.
    #[serde(default)]
    pub outline: OutlineConfig,
}

/// One navigation bar entry.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct NavItem {
    pub text: String,
    pub link: String,
}

/// One social link (icon name + target).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SocialLink {
    pub icon: String,
    pub link: String,
}

/// `[theme.search]` - search provider selection.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SearchConfig {
    #[serde(default = "defaults::theme::search::provider")]
    pub provider: SearchProvider,
}

/// Search backend the renderer should wire up.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SearchProvider {
    /// Client-side local index (default).
    #[default]
    Local,
    /// No search UI.
    None,
}

/// `[theme.comment]` - giscus comment widget parameters.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CommentConfig {
    /// GitHub repository in `owner/name` form.
    pub repo: String,
    pub repo_id: String,
    pub category_id: String,
}

/// `[theme.outline]` - page outline labelling.
#[derive(Debug, Clone, Educe, Serialize, Deserialize)]
#[educe(Default)]
#[serde(default, deny_unknown_fields)]
pub struct OutlineConfig {
    #[serde(default = "defaults::theme::outline::label")]
    #[educe(Default = defaults::theme::outline::label())]
    pub label: String,
}

impl ThemeConfig {
    /// Validate renderer-facing settings before they are emitted.
    pub fn validate(&self) -> Result<()> {
        for item in &self.nav {
            if item.text.is_empty() || item.link.is_empty() {
                bail!(ConfigError::Validation(
                    "[theme.nav] entries need both `text` and `link`".into()
                ));
            }
        }

        for link in &self.social {
            if link.icon.is_empty() || link.link.is_empty() {
                bail!(ConfigError::Validation(
                    "[theme.social] entries need both `icon` and `link`".into()
                ));
            }
        }

        if let Some(comment) = &self.comment
            && (comment.repo.is_empty()
                || comment.repo_id.is_empty()
                || comment.category_id.is_empty())
        {
            bail!(ConfigError::Validation(
                "[theme.comment] requires `repo`, `repo_id` and `category_id`".into()
            ));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::super::SiteConfig;
    use super::*;

    #[test]
    fn test_theme_config_full() {
        let config = r#"
            [base]
            title = "Test"

            [theme]
            website = "https://github.com/alice/blog"
            nav = [
                { text = "Home", link = "/" },
                { text = "Tags", link = "/pages/tags" },
            ]
            social = [{ icon = "github", link = "https://github.com/alice" }]

            [theme.search]
            provider = "local"

            [theme.comment]
            repo = "alice/blog"
            repo_id = "MDEwOlJlcG9zaXRvcnkz"
            category_id = "DIC_kwDOFshSIs4C"

            [theme.outline]
            label = "文章摘要"
        "#;
        let config: SiteConfig = toml::from_str(config).unwrap();

        assert_eq!(config.theme.nav.len(), 2);
        assert_eq!(config.theme.nav[1].link, "/pages/tags");
        assert_eq!(config.theme.social[0].icon, "github");
        assert_eq!(config.theme.search.provider, SearchProvider::Local);
        assert_eq!(
            config.theme.comment.as_ref().map(|c| c.repo.as_str()),
            Some("alice/blog")
        );
        assert_eq!(config.theme.outline.label, "文章摘要");
        assert!(config.theme.validate().is_ok());
    }

    #[test]
    fn test_theme_config_defaults() {
        let config = r#"
            [base]
            title = "Test"
        "#;
        let config: SiteConfig = toml::from_str(config).unwrap();

        assert!(config.theme.website.is_none());
        assert!(config.theme.nav.is_empty());
        assert!(config.theme.social.is_empty());
        assert_eq!(config.theme.search.provider, SearchProvider::Local);
        assert!(config.theme.comment.is_none());
        assert_eq!(config.theme.outline.label, "On this page");
    }

    #[test]
    fn test_theme_search_provider_none() {
        let config = r#"
            [base]
            title = "Test"

            [theme.search]
            provider = "none"
        "#;
        let config: SiteConfig = toml::from_str(config).unwrap();
        assert_eq!(config.theme.search.provider, SearchProvider::None);
    }

    #[test]
    fn test_theme_nav_validation() {
        let theme = ThemeConfig {
            nav: vec![NavItem {
                text: "Home".into(),
                link: String::new(),
            }],
            ..Default::default()
        };
        assert!(theme.validate().is_err());
    }

    #[test]
    fn test_theme_comment_validation() {
        let theme = ThemeConfig {
            comment: Some(CommentConfig {
                repo: "alice/blog".into(),
                repo_id: String::new(),
                category_id: "DIC".into(),
            }),
            ..Default::default()
        };
        assert!(theme.validate().is_err());
    }

    #[test]
    fn test_theme_comment_missing_field_rejection() {
        let config = r#"
            [base]
            title = "Test"

            [theme.comment]
            repo = "alice/blog"
        "#;
        let result: Result<SiteConfig, _> = toml::from_str(config);
        assert!(result.is_err());
    }
}
