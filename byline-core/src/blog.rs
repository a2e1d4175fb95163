//! Post collection with author lookups.

use serde::Serialize;
use std::collections::HashSet;
use thiserror::Error;

use crate::models::{AuthorInfo, Post};
use crate::slug::is_path_segment;

#[derive(Error, Debug, PartialEq, Eq)]
pub enum BlogError {
    #[error("No posts found for author: {0}")]
    AuthorNotFound(String),
}

/// Route parameter for a pre-generated author page
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AuthorParam {
    pub slug: String,
}

/// An author together with the posts they wrote
#[derive(Debug, Clone)]
pub struct AuthorPosts<'a> {
    pub slug: String,
    pub author: &'a AuthorInfo,
    pub posts: Vec<&'a Post>,
}

/// All loaded posts plus the author used when a post declares none
#[derive(Debug, Clone)]
pub struct Blog {
    posts: Vec<Post>,
    default_author: AuthorInfo,
}

impl Blog {
    /// Posts are kept newest first; undated posts sort last
    pub fn new(mut posts: Vec<Post>, default_author: AuthorInfo) -> Self {
        posts.sort_by(|a, b| b.date.cmp(&a.date).then_with(|| a.slug.cmp(&b.slug)));
        Self {
            posts,
            default_author,
        }
    }

    pub fn posts(&self) -> &[Post] {
        &self.posts
    }

    /// Posts that should appear on the public site
    pub fn published(&self) -> impl Iterator<Item = &Post> {
        self.posts.iter().filter(|p| !p.is_draft())
    }

    pub fn find_by_slug(&self, slug: &str) -> Option<&Post> {
        self.posts.iter().find(|p| p.slug == slug)
    }

    /// Declared author of a post, or the default author
    pub fn effective_author<'a>(&'a self, post: &'a Post) -> &'a AuthorInfo {
        post.metadata.author.as_ref().unwrap_or(&self.default_author)
    }

    /// Published posts whose effective author slugifies to `slug`
    pub fn posts_by_author(&self, slug: &str) -> Vec<&Post> {
        self.published()
            .filter(|post| self.effective_author(post).slug() == slug)
            .collect()
    }

    /// Resolve an author page, failing when the slug matches no posts
    pub fn author_page(&self, slug: &str) -> Result<AuthorPosts<'_>, BlogError> {
        let posts = self.posts_by_author(slug);
        let first = posts
            .first()
            .copied()
            .ok_or_else(|| BlogError::AuthorNotFound(slug.to_string()))?;

        Ok(AuthorPosts {
            slug: slug.to_string(),
            author: self.effective_author(first),
            posts,
        })
    }

    /// Distinct author slugs across published posts, in first-seen order
    pub fn author_slugs(&self) -> Vec<String> {
        let mut seen = HashSet::new();
        self.published()
            .map(|post| self.effective_author(post).slug())
            .filter(|slug| seen.insert(slug.clone()))
            .collect()
    }

    /// Author slugs that get a generated page, in route-parameter form
    ///
    /// Slugs that are not a single path segment (a name like "AC/DC") are
    /// left out; such authors are still listed by `author_slugs`.
    pub fn author_params(&self) -> Vec<AuthorParam> {
        self.author_slugs()
            .into_iter()
            .filter(|slug| is_path_segment(slug))
            .map(|slug| AuthorParam { slug })
            .collect()
    }

    /// Slug of the post's author page, if that author gets one
    pub fn author_route(&self, post: &Post) -> Option<String> {
        let slug = self.effective_author(post).slug();
        is_path_segment(&slug).then_some(slug)
    }
}
