//! Frontmatter parsing from post files.

use crate::models::PostMetadata;
use regex::Regex;
use std::sync::OnceLock;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum FrontmatterError {
    #[error("Invalid YAML: {0}")]
    YamlError(#[from] serde_yaml::Error),

    #[error("Missing required field: {0}")]
    MissingField(String),

    #[error("Missing frontmatter block")]
    Missing,
}

static FRONTMATTER_REGEX: OnceLock<Regex> = OnceLock::new();

fn frontmatter_regex() -> &'static Regex {
    FRONTMATTER_REGEX.get_or_init(|| {
        Regex::new(r"(?s)^---\s*\n(.*?)\n---\s*\n?(.*)$").expect("frontmatter pattern is valid")
    })
}

/// Parse frontmatter from a post file
///
/// Returns a tuple of (metadata, markdown_body). Posts must start with a
/// `---` delimited YAML block carrying at least a `title`.
///
/// # Example
///
/// ```
/// use byline_core::frontmatter::parse_frontmatter;
///
/// let content = "---\ntitle: My Post\npublished_at: 2025-01-01\n---\n# Hello World\n";
///
/// let (meta, body) = parse_frontmatter(content).unwrap();
/// assert_eq!(meta.title, "My Post");
/// assert_eq!(meta.published_at, Some("2025-01-01".to_string()));
/// assert!(body.trim().starts_with("# Hello World"));
/// ```
pub fn parse_frontmatter(content: &str) -> Result<(PostMetadata, String), FrontmatterError> {
    let captures = frontmatter_regex()
        .captures(content)
        .ok_or(FrontmatterError::Missing)?;

    let yaml = captures.get(1).map_or("", |m| m.as_str());
    let body = captures.get(2).map_or("", |m| m.as_str());

    let metadata: PostMetadata = match serde_yaml::from_str(yaml) {
        Ok(meta) => meta,
        Err(e) => {
            if e.to_string().contains("missing field `title`") {
                return Err(FrontmatterError::MissingField("title".to_string()));
            }
            return Err(FrontmatterError::YamlError(e));
        }
    };

    if metadata.title.trim().is_empty() {
        return Err(FrontmatterError::MissingField("title".to_string()));
    }

    Ok((metadata, body.to_string()))
}
