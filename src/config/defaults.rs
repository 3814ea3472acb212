//! Default values for configuration fields.
//!
//! These functions are used by serde for default deserialization.

// ============================================================================
// [base] Section Defaults
// ============================================================================

pub mod base {
    pub fn url() -> Option<String> {
        None
    }

    pub fn language() -> String {
        "en-US".into()
    }
}

// ============================================================================
// [content] Section Defaults
// ============================================================================

pub mod content {
    use std::path::PathBuf;

    pub fn root() -> PathBuf {
        "docs".into()
    }

    pub fn data() -> PathBuf {
        "_data".into()
    }

    pub fn page_size() -> usize {
        10
    }

    pub mod exclude {
        pub fn always() -> Vec<String> {
            vec!["README.md".into()]
        }

        pub fn production() -> Vec<String> {
            vec![
                "**/trash/**/*.md".into(),
                "**/draft/**/*.md".into(),
                "**/private-notes/*.md".into(),
            ]
        }

        pub fn development() -> Vec<String> {
            Vec::new()
        }
    }
}

// ============================================================================
// [theme] Section Defaults
// ============================================================================

pub mod theme {
    pub fn website() -> Option<String> {
        None
    }

    pub mod search {
        use crate::config::SearchProvider;

        pub fn provider() -> SearchProvider {
            SearchProvider::default()
        }
    }

    pub mod outline {
        pub fn label() -> String {
            "On this page".into()
        }
    }
}
