//! Askama page template definitions.

use askama::Template;

/// Site-wide values every page layout needs
#[derive(Debug, Clone)]
pub struct SiteChrome {
    pub title: String,
    pub description: String,
    pub lang: &'static str,
    pub year: i32,
    /// Normalized base URL, also the asset prefix
    pub base_url: String,
}

/// A post entry for display in lists
#[derive(Debug, Clone)]
pub struct PostEntry {
    pub url: String,
    pub title: String,
    pub date: Option<String>,
    pub summary: Option<String>,
    pub author_name: String,
    /// Absent when the author has no generated page
    pub author_url: Option<String>,
}

/// Blog index listing every published post
#[derive(Template)]
#[template(path = "index.html")]
pub struct IndexTemplate {
    pub site: SiteChrome,
    pub heading: String,
    pub posts: Vec<PostEntry>,
}

/// Single post page
#[derive(Template)]
#[template(path = "post.html")]
pub struct PostTemplate {
    pub site: SiteChrome,
    pub title: String,
    pub date: Option<String>,
    pub tags: Vec<String>,

    /// Rendered markdown
    pub content: String,

    /// Pre-rendered author profile fragment
    pub profile_html: String,
}

/// Posts by a single author
#[derive(Template)]
#[template(path = "author.html")]
pub struct AuthorTemplate {
    pub site: SiteChrome,
    pub author_name: String,
    pub posts: Vec<PostEntry>,
    pub profile_html: String,
}

/// 404 error page
#[derive(Template)]
#[template(path = "404.html")]
pub struct NotFoundTemplate {
    pub site: SiteChrome,
}
