//! Metadata extractor: splits the optional YAML front-matter header from a
//! markdown document and derives the normalized post record.
//!
//! The header contract is stable: the block starts with `---` as the first
//! line (after an optional BOM) and ends at the next `---` line. Recognized
//! fields are `title`, `date`, `category`, `tags`, `draft` and `excerpt`;
//! unknown fields are ignored. Header problems degrade to fallbacks and are
//! reported as [`HeaderIssue`]s, never as hard errors.

use crate::scan::ContentPath;
use crate::utils::date::PostDate;
use serde::{Deserialize, Serialize};
use std::{fs, io};
use thiserror::Error;

/// Byte-order mark some editors prepend
const BOM: &str = "\u{feff}";
/// Maximum generated excerpt length, in characters
const EXCERPT_MAX_CHARS: usize = 200;

// ============================================================================
// Errors and Issues
// ============================================================================

/// Failure to read a document at all; the scanner entry is skipped.
#[derive(Debug, Error)]
pub enum ExtractError {
    #[error("failed to read `{0}`")]
    Io(String, #[source] io::Error),
}

/// Recoverable header problems. The record is still produced, with the
/// affected fields falling back to their defaults.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum HeaderIssue {
    #[error("header opened with `---` but never closed")]
    UnterminatedHeader,

    #[error("header is not valid YAML: {0}")]
    InvalidHeader(String),

    #[error("unrecognized date `{0}`")]
    InvalidDate(String),
}

// ============================================================================
// Records
// ============================================================================

/// Normalized, render-ready description of one post.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PostRecord {
    /// Site-absolute route: `/` + relative path, `.md` swapped for `.html`
    pub route: String,

    pub title: String,

    /// `None` for undated posts; they never appear in listings.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date: Option<PostDate>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,

    /// Trimmed, deduplicated, first occurrence order.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub tags: Vec<String>,

    /// Draft posts are listed in development builds only.
    pub draft: bool,

    pub excerpt: String,
}

/// One successful extraction: the record plus any issues hit deriving it.
#[derive(Debug)]
pub struct Extraction {
    pub record: PostRecord,
    pub issues: Vec<HeaderIssue>,
}

/// Recognized front-matter fields. Unknown fields are ignored.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct Header {
    title: Option<String>,
    date: Option<String>,
    category: Option<String>,
    tags: Vec<String>,
    draft: bool,
    excerpt: Option<String>,
}

// ============================================================================
// Extraction
// ============================================================================

/// Read and extract one scanned document.
pub fn extract_file(document: &ContentPath) -> Result<Extraction, ExtractError> {
    let text = fs::read_to_string(&document.source)
        .map_err(|err| ExtractError::Io(document.relative.clone(), err))?;
    Ok(extract(document, &text))
}

/// Derive the record from the document text.
///
/// Pure given the text; all I/O stays in [`extract_file`].
pub fn extract(document: &ContentPath, text: &str) -> Extraction {
    let mut issues = Vec::new();
    let text = text.strip_prefix(BOM).unwrap_or(text);

    let (header, body) = split_header(text, &mut issues);

    let date = header.date.as_deref().map(str::trim).and_then(|raw| {
        let parsed = PostDate::parse(raw);
        if parsed.is_none() {
            issues.push(HeaderIssue::InvalidDate(raw.to_string()));
        }
        parsed
    });

    let title = header
        .title
        .as_deref()
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .map(str::to_string)
        .unwrap_or_else(|| title_from_relative(&document.relative));

    let category = header
        .category
        .as_deref()
        .map(str::trim)
        .filter(|c| !c.is_empty())
        .map(str::to_string);

    let mut tags: Vec<String> = Vec::new();
    for tag in header.tags.iter().map(|t| t.trim()).filter(|t| !t.is_empty()) {
        if !tags.iter().any(|t| t == tag) {
            tags.push(tag.to_string());
        }
    }

    let excerpt = header
        .excerpt
        .as_deref()
        .map(str::trim)
        .filter(|e| !e.is_empty())
        .map(str::to_string)
        .unwrap_or_else(|| excerpt_from_body(body));

    Extraction {
        record: PostRecord {
            route: document.route(),
            title,
            date,
            category,
            tags,
            draft: header.draft,
            excerpt,
        },
        issues,
    }
}

// ============================================================================
// Header Splitting
// ============================================================================

/// Split the optional header block from the body.
///
/// An unterminated header is reported and the whole text becomes the body.
/// A terminated but invalid YAML header keeps the split; the header falls
/// back to defaults.
fn split_header<'a>(text: &'a str, issues: &mut Vec<HeaderIssue>) -> (Header, &'a str) {
    let rest = match text
        .strip_prefix("---\n")
        .or_else(|| text.strip_prefix("---\r\n"))
    {
        Some(rest) => rest,
        None => return (Header::default(), text),
    };

    let Some((raw_header, body)) = split_terminated(rest) else {
        issues.push(HeaderIssue::UnterminatedHeader);
        return (Header::default(), text);
    };

    if raw_header.trim().is_empty() {
        return (Header::default(), body);
    }

    match serde_yaml_ng::from_str::<Header>(raw_header) {
        Ok(header) => (header, body),
        Err(err) => {
            issues.push(HeaderIssue::InvalidHeader(err.to_string()));
            (Header::default(), body)
        }
    }
}

/// Find the closing `---` line in the text after the opener.
///
/// Returns `(header, body)` or `None` when the header never closes.
fn split_terminated(rest: &str) -> Option<(&str, &str)> {
    // Closing delimiter directly after the opener (empty header)
    for open in ["---\n", "---\r\n"] {
        if let Some(body) = rest.strip_prefix(open) {
            return Some(("", body));
        }
    }
    if rest == "---" || rest == "---\r" {
        return Some(("", ""));
    }

    for close in ["\n---\n", "\n---\r\n"] {
        if let Some(idx) = rest.find(close) {
            return Some((&rest[..idx], &rest[idx + close.len()..]));
        }
    }

    // Closing delimiter at end of file without a trailing newline
    for close in ["\n---", "\n---\r"] {
        if let Some(header) = rest.strip_suffix(close) {
            return Some((header, ""));
        }
    }

    None
}

// ============================================================================
// Fallbacks
// ============================================================================

/// Fallback title: file stem with separators spaced and words capitalized.
fn title_from_relative(relative: &str) -> String {
    let name = relative.rsplit('/').next().unwrap_or(relative);
    let stem = name.strip_suffix(".md").unwrap_or(name);

    stem.split(['-', '_'])
        .filter(|word| !word.is_empty())
        .map(capitalize)
        .collect::<Vec<_>>()
        .join(" ")
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Fallback excerpt: the first paragraph of the body that is not a heading,
/// flattened to one line and cut at a word boundary.
fn excerpt_from_body(body: &str) -> String {
    let mut parts: Vec<&str> = Vec::new();

    for line in body.lines().map(str::trim) {
        if line.is_empty() || line.starts_with('#') {
            if parts.is_empty() {
                continue;
            }
            break;
        }
        parts.push(line);
    }

    truncate_words(&parts.join(" "), EXCERPT_MAX_CHARS)
}

/// Cut at a word boundary within `max_chars` characters, or at the character
/// limit when not even the first word fits (unspaced prose, e.g. CJK). No
/// ellipsis; the renderer decides how to mark continuation.
fn truncate_words(text: &str, max_chars: usize) -> String {
    if text.chars().count() <= max_chars {
        return text.to_string();
    }

    let mut result = String::new();
    let mut count = 0;
    for word in text.split_whitespace() {
        let needed = word.chars().count() + usize::from(count > 0);
        if count + needed > max_chars {
            break;
        }
        if count > 0 {
            result.push(' ');
        }
        result.push_str(word);
        count += needed;
    }

    // No word boundary inside the limit: cut mid-word instead of dropping
    // the paragraph.
    if result.is_empty() {
        return text.chars().take(max_chars).collect();
    }
    result
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn document(relative: &str) -> ContentPath {
        ContentPath {
            source: PathBuf::from("/content").join(relative),
            relative: relative.to_string(),
        }
    }

    fn record(relative: &str, text: &str) -> PostRecord {
        let extraction = extract(&document(relative), text);
        assert!(
            extraction.issues.is_empty(),
            "unexpected issues: {:?}",
            extraction.issues
        );
        extraction.record
    }

    #[test]
    fn test_extract_full_header() {
        let text = "---\n\
                    title: Hello World\n\
                    date: 2024-06-15\n\
                    category: rust\n\
                    tags: [systems, tooling]\n\
                    draft: true\n\
                    excerpt: A hand-written summary.\n\
                    ---\n\
                    Body text here.\n";
        let record = record("posts/hello.md", text);

        assert_eq!(record.route, "/posts/hello.html");
        assert_eq!(record.title, "Hello World");
        assert_eq!(record.date, Some(PostDate::from_ymd(2024, 6, 15)));
        assert_eq!(record.category.as_deref(), Some("rust"));
        assert_eq!(record.tags, vec!["systems", "tooling"]);
        assert!(record.draft);
        assert_eq!(record.excerpt, "A hand-written summary.");
    }

    #[test]
    fn test_extract_unknown_fields_ignored() {
        let text = "---\ntitle: Post\nlayout: wide\nsidebar: false\n---\nBody.\n";
        let record = record("a.md", text);
        assert_eq!(record.title, "Post");
    }

    #[test]
    fn test_extract_without_header() {
        let text = "Just a body, no front matter.\n";
        let record = record("notes/quick-note.md", text);

        assert_eq!(record.title, "Quick Note");
        assert_eq!(record.date, None);
        assert!(!record.draft);
        assert_eq!(record.excerpt, "Just a body, no front matter.");
    }

    #[test]
    fn test_title_fallback_from_stem() {
        assert_eq!(title_from_relative("my-first_post.md"), "My First Post");
        assert_eq!(title_from_relative("2024/hello-world.md"), "Hello World");
        assert_eq!(title_from_relative("a--b.md"), "A B");
        assert_eq!(title_from_relative("état-des-lieux.md"), "État Des Lieux");
    }

    #[test]
    fn test_excerpt_skips_headings_and_flattens() {
        let text = "---\ntitle: T\n---\n\
                    # Heading\n\
                    \n\
                    ## Another heading\n\
                    First line of the paragraph\n\
                    second line of the paragraph.\n\
                    \n\
                    Next paragraph is not included.\n";
        let record = record("a.md", text);

        assert_eq!(
            record.excerpt,
            "First line of the paragraph second line of the paragraph."
        );
    }

    #[test]
    fn test_excerpt_cut_at_word_boundary() {
        let word = "word ".repeat(60); // 300 chars of 4-letter words
        let text = format!("---\ntitle: T\n---\n{word}\n");
        let record = record("a.md", &text);

        assert!(record.excerpt.chars().count() <= 200);
        assert!(record.excerpt.ends_with("word"));
        assert!(!record.excerpt.ends_with(' '));
        assert!(!record.excerpt.contains("..."));
    }

    #[test]
    fn test_excerpt_unspaced_prose_cut_at_char_limit() {
        // 210 chars with no word boundary anywhere, like CJK prose
        let body = "博".repeat(210);
        let text = format!("---\ntitle: T\n---\n{body}\n");
        let record = record("a.md", &text);

        assert_eq!(record.excerpt, "博".repeat(200));
    }

    #[test]
    fn test_excerpt_empty_body() {
        let record = record("a.md", "---\ntitle: T\n---\n");
        assert_eq!(record.excerpt, "");
    }

    #[test]
    fn test_unterminated_header_reported() {
        let text = "---\ntitle: Never closed\n\nSome text.\n";
        let extraction = extract(&document("draft-note.md"), text);

        assert_eq!(extraction.issues, vec![HeaderIssue::UnterminatedHeader]);
        // The whole text is body: the title fell back, the opener shows up
        // in the generated excerpt.
        assert_eq!(extraction.record.title, "Draft Note");
        assert!(extraction.record.excerpt.starts_with("---"));
    }

    #[test]
    fn test_invalid_yaml_header_reported() {
        let text = "---\ntitle: [unclosed\n---\nBody after the header.\n";
        let extraction = extract(&document("bad.md"), text);

        assert_eq!(extraction.issues.len(), 1);
        assert!(matches!(
            extraction.issues[0],
            HeaderIssue::InvalidHeader(_)
        ));
        // Split is kept: body is the text after the closing delimiter
        assert_eq!(extraction.record.title, "Bad");
        assert_eq!(extraction.record.excerpt, "Body after the header.");
    }

    #[test]
    fn test_invalid_date_reported_rest_of_header_kept() {
        let text = "---\ntitle: Kept\ndate: 15-06-2024\n---\nBody.\n";
        let extraction = extract(&document("a.md"), text);

        assert_eq!(
            extraction.issues,
            vec![HeaderIssue::InvalidDate("15-06-2024".into())]
        );
        assert_eq!(extraction.record.title, "Kept");
        assert_eq!(extraction.record.date, None);
    }

    #[test]
    fn test_empty_header_is_not_an_issue() {
        let extraction = extract(&document("a.md"), "---\n---\nBody.\n");
        assert!(extraction.issues.is_empty());
        assert_eq!(extraction.record.excerpt, "Body.");
    }

    #[test]
    fn test_bom_stripped() {
        let text = "\u{feff}---\ntitle: BOM\n---\nBody.\n";
        let record = record("a.md", text);
        assert_eq!(record.title, "BOM");
    }

    #[test]
    fn test_crlf_lines_tolerated() {
        let text = "---\r\ntitle: Windows\r\ndate: 2024-01-02\r\n---\r\nBody line.\r\n";
        let record = record("a.md", text);

        assert_eq!(record.title, "Windows");
        assert_eq!(record.date, Some(PostDate::from_ymd(2024, 1, 2)));
        assert_eq!(record.excerpt, "Body line.");
    }

    #[test]
    fn test_header_closing_at_eof() {
        let record = record("a.md", "---\ntitle: Tight\n---");
        assert_eq!(record.title, "Tight");
        assert_eq!(record.excerpt, "");
    }

    #[test]
    fn test_date_formats() {
        for (raw, expected) in [
            ("2024/06/15", PostDate::from_ymd(2024, 6, 15)),
            ("2024-06-15 08:30:00", PostDate::new(2024, 6, 15, 8, 30, 0)),
            ("2024-06-15T08:30:00Z", PostDate::new(2024, 6, 15, 8, 30, 0)),
        ] {
            let text = format!("---\ndate: \"{raw}\"\n---\n");
            let record = record("a.md", &text);
            assert_eq!(record.date, Some(expected), "for {raw}");
        }
    }

    #[test]
    fn test_tags_trimmed_and_empties_dropped() {
        let text = "---\ntags: [\" rust \", \"\", \"cli\"]\n---\n";
        let record = record("a.md", text);
        assert_eq!(record.tags, vec!["rust", "cli"]);
    }

    #[test]
    fn test_duplicate_tags_collapsed() {
        let text = "---\ntags: [go, go, \" go \", network]\n---\n";
        let record = record("a.md", text);

        // First occurrence wins; trimming happens before the duplicate check
        assert_eq!(record.tags, vec!["go", "network"]);
    }

    #[test]
    fn test_undated_record_serializes_without_date_key() {
        let undated = record("a.md", "Body.\n");
        let json = serde_json::to_string(&undated).unwrap();
        assert!(!json.contains("\"date\""));

        let dated = record("b.md", "---\ndate: 2024-06-15\n---\n");
        let json = serde_json::to_string(&dated).unwrap();
        assert!(json.contains("\"date\":\"2024-06-15\""));
    }

    #[test]
    fn test_extract_file_missing_is_error() {
        let missing = ContentPath {
            source: PathBuf::from("/nonexistent/really/not-here.md"),
            relative: "not-here.md".to_string(),
        };
        let err = extract_file(&missing).unwrap_err();
        assert!(err.to_string().contains("not-here.md"));
    }
}
