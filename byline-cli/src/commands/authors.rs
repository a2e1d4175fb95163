//! List author route parameters.

use super::build::load_blog;
use anyhow::Result;
use std::path::Path;

/// Print the distinct author slugs, one per line or as `[{"slug": ...}]`
pub fn list_authors(config_path: &Path, json: bool) -> Result<()> {
    let (_config, blog) = load_blog(config_path)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&blog.author_params())?);
        return Ok(());
    }

    for slug in blog.author_slugs() {
        let count = blog.posts_by_author(&slug).len();
        println!("{}\t{} post{}", slug, count, if count == 1 { "" } else { "s" });
    }
    Ok(())
}
