//! Page assembly from loaded posts.

use askama::Template;
use byline_core::{Blog, BlogError, Config, Post};
use thiserror::Error;

use crate::labels::html_lang;
use crate::profile::{author_url, render_author_profile, ProfileOptions};
use crate::templates::{
    AuthorTemplate, IndexTemplate, NotFoundTemplate, PostEntry, PostTemplate, SiteChrome,
};

#[derive(Error, Debug)]
pub enum PageError {
    #[error(transparent)]
    NotFound(#[from] BlogError),

    #[error("Template error: {0}")]
    Render(#[from] askama::Error),
}

const DATE_FORMAT: &str = "%B %-d, %Y";

/// Everything needed to render pages for one site
#[derive(Debug, Clone)]
pub struct PageContext {
    pub site: SiteChrome,
    pub profile: ProfileOptions,
}

impl PageContext {
    pub fn new(config: &Config, year: i32) -> Self {
        let base_url = config.normalized_base_url();
        Self {
            site: SiteChrome {
                title: config.site.title.clone(),
                description: config.site.description.clone(),
                lang: html_lang(config.site.locale),
                year,
                base_url,
            },
            profile: ProfileOptions::from_config(config),
        }
    }

    fn base_url(&self) -> &str {
        &self.site.base_url
    }

    /// List entry for a post, linking its effective author
    pub fn post_entry(&self, blog: &Blog, post: &Post) -> PostEntry {
        let author = blog.effective_author(post);
        PostEntry {
            url: post.url_with_base(self.base_url()),
            title: post.title().to_string(),
            date: post.date.map(|d| d.format(DATE_FORMAT).to_string()),
            summary: post.metadata.summary.clone(),
            author_name: author.name.clone(),
            author_url: blog
                .author_route(post)
                .map(|slug| author_url(self.base_url(), &slug)),
        }
    }

    pub fn render_index(&self, blog: &Blog) -> Result<String, PageError> {
        let template = IndexTemplate {
            site: self.site.clone(),
            heading: self.site.title.clone(),
            posts: blog.published().map(|p| self.post_entry(blog, p)).collect(),
        };
        Ok(template.render()?)
    }

    /// Post page; the author profile links to the author's page when one is generated
    pub fn render_post(&self, blog: &Blog, post: &Post) -> Result<String, PageError> {
        let author = blog.effective_author(post);
        let author_slug = blog.author_route(post);
        let profile_html = render_author_profile(author, author_slug.as_deref(), &self.profile)?;

        let template = PostTemplate {
            site: self.site.clone(),
            title: post.title().to_string(),
            date: post.date.map(|d| d.format(DATE_FORMAT).to_string()),
            tags: post.metadata.tags.clone(),
            content: post.content_html.clone(),
            profile_html,
        };
        Ok(template.render()?)
    }

    /// Author page, or `PageError::NotFound` when no post matches the slug
    pub fn render_author(&self, blog: &Blog, slug: &str) -> Result<String, PageError> {
        let page = blog.author_page(slug)?;
        let profile_html = render_author_profile(page.author, None, &self.profile)?;

        let template = AuthorTemplate {
            site: self.site.clone(),
            author_name: page.author.name.clone(),
            posts: page
                .posts
                .iter()
                .map(|p| self.post_entry(blog, p))
                .collect(),
            profile_html,
        };
        Ok(template.render()?)
    }

    pub fn render_not_found(&self) -> Result<String, PageError> {
        let template = NotFoundTemplate {
            site: self.site.clone(),
        };
        Ok(template.render()?)
    }
}
