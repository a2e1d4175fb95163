//! Content model structs for posts and authors.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::slug::slugify;

/// Supported social platforms, in display order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SocialPlatform {
    GitHub,
    Twitter,
    LinkedIn,
    Website,
}

impl SocialPlatform {
    /// Fixed rendering order for social links
    pub const ALL: [SocialPlatform; 4] = [
        SocialPlatform::GitHub,
        SocialPlatform::Twitter,
        SocialPlatform::LinkedIn,
        SocialPlatform::Website,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            SocialPlatform::GitHub => "github",
            SocialPlatform::Twitter => "twitter",
            SocialPlatform::LinkedIn => "linkedin",
            SocialPlatform::Website => "website",
        }
    }

    /// Human-readable label shown as link text
    pub fn label(&self) -> &'static str {
        match self {
            SocialPlatform::GitHub => "GitHub",
            SocialPlatform::Twitter => "Twitter",
            SocialPlatform::LinkedIn => "LinkedIn",
            SocialPlatform::Website => "Website",
        }
    }
}

/// Optional external profile URLs for an author
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct SocialProfiles {
    #[serde(default)]
    pub github: Option<String>,

    #[serde(default)]
    pub twitter: Option<String>,

    #[serde(default)]
    pub linkedin: Option<String>,

    #[serde(default)]
    pub website: Option<String>,
}

impl SocialProfiles {
    /// URL for a platform; empty strings count as absent
    pub fn url(&self, platform: SocialPlatform) -> Option<&str> {
        let value = match platform {
            SocialPlatform::GitHub => &self.github,
            SocialPlatform::Twitter => &self.twitter,
            SocialPlatform::LinkedIn => &self.linkedin,
            SocialPlatform::Website => &self.website,
        };
        value.as_deref().filter(|url| !url.is_empty())
    }

    /// Present platforms with their URLs, in `SocialPlatform::ALL` order
    pub fn entries(&self) -> Vec<(SocialPlatform, &str)> {
        SocialPlatform::ALL
            .iter()
            .filter_map(|&platform| self.url(platform).map(|url| (platform, url)))
            .collect()
    }

    pub fn is_empty(&self) -> bool {
        SocialPlatform::ALL.iter().all(|&p| self.url(p).is_none())
    }
}

/// Author of a blog post
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthorInfo {
    pub name: String,

    /// Avatar image path or URL
    pub avatar: String,

    #[serde(default)]
    pub bio: String,

    #[serde(default)]
    pub social: Option<SocialProfiles>,
}

impl AuthorInfo {
    /// URL slug for this author's page
    pub fn slug(&self) -> String {
        slugify(&self.name)
    }
}

/// Frontmatter metadata from a post file
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct PostMetadata {
    pub title: String,

    #[serde(default, alias = "publishedAt")]
    pub published_at: Option<String>,

    #[serde(default)]
    pub summary: Option<String>,

    #[serde(default)]
    pub image: Option<String>,

    #[serde(default)]
    pub tags: Vec<String>,

    #[serde(default)]
    pub slug: Option<String>,

    #[serde(default)]
    pub draft: bool,

    /// Declared author; the blog's default author applies when absent
    #[serde(default)]
    pub author: Option<AuthorInfo>,
}

/// A single blog post
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Post {
    /// URL slug (e.g., "hello-world")
    pub slug: String,

    /// Original frontmatter
    pub metadata: PostMetadata,

    /// Publication date
    pub date: Option<NaiveDate>,

    /// Rendered HTML content
    pub content_html: String,

    /// Raw markdown body (without frontmatter)
    pub raw_body: String,

    /// Source path relative to the content directory
    pub source_path: Option<String>,
}

impl Post {
    pub fn title(&self) -> &str {
        &self.metadata.title
    }

    /// Output path relative to the site root (no leading slash)
    pub fn output_rel_path(&self) -> String {
        format!("blog/{}/index.html", self.slug)
    }

    /// URL for this post including a base path
    pub fn url_with_base(&self, base_url: &str) -> String {
        format!("{}blog/{}", base_url, self.slug)
    }

    pub fn is_draft(&self) -> bool {
        self.metadata.draft
    }
}
