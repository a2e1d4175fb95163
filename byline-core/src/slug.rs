//! Author slug derivation.

use regex::Regex;
use std::sync::OnceLock;

static WHITESPACE_REGEX: OnceLock<Regex> = OnceLock::new();

fn whitespace_regex() -> &'static Regex {
    WHITESPACE_REGEX.get_or_init(|| Regex::new(r"\s+").expect("whitespace pattern is valid"))
}

/// Convert an author display name to a URL slug
///
/// Rules:
/// - Lowercase
/// - Drop leading/trailing whitespace
/// - Replace each run of whitespace with a single hyphen
///
/// Nothing else is normalized: punctuation and accents are kept as-is, so
/// two names that only differ in case or spacing map to the same author.
///
/// # Examples
///
/// ```
/// use byline_core::slugify;
///
/// assert_eq!(slugify("John Doe"), "john-doe");
/// assert_eq!(slugify("  Multi   Space  Name"), "multi-space-name");
/// ```
pub fn slugify(name: &str) -> String {
    let lowercased = name.trim().to_lowercase();
    whitespace_regex().replace_all(&lowercased, "-").into_owned()
}

/// Whether a slug maps to exactly one directory in the generated site
///
/// Post and author pages are written to `blog/{slug}/` and
/// `blog/author/{slug}/`, so a slug must not be empty, `.`, `..`, or
/// contain a path separator.
pub fn is_path_segment(slug: &str) -> bool {
    !slug.is_empty() && slug != "." && slug != ".." && !slug.contains(['/', '\\'])
}
