//! Author profile component.
//!
//! Renders an author's avatar, name, bio and social links as a labelled
//! `<article>`. Every optional input only ever suppresses markup, so
//! rendering is total over well-formed `AuthorInfo` values.

use askama::Template;
use byline_core::{AuthorInfo, Config, Locale, SocialPlatform, SocialProfiles};

use crate::labels::ProfileLabels;

/// Avatar width and height in pixels
pub const AVATAR_SIZE: u32 = 64;

const NAME_CLASS: &str = "author-name";
const NAME_HOVER_CLASS: &str = "author-name--hover";

/// A rendered social link
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SocialLink {
    pub platform: SocialPlatform,
    pub href: String,
    pub label: &'static str,
    pub aria_label: &'static str,
}

/// Link wrapping the author's name
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProfileLink {
    pub href: String,
    pub label: String,
}

/// Presentation settings shared by every profile on a site
#[derive(Debug, Clone)]
pub struct ProfileOptions {
    pub locale: Locale,
    /// Normalized base URL ("/" or "/prefix/")
    pub base_url: String,
    pub name_suffix: Option<String>,
}

impl ProfileOptions {
    pub fn from_config(config: &Config) -> Self {
        Self {
            locale: config.site.locale,
            base_url: config.normalized_base_url(),
            name_suffix: config.profile.name_suffix.clone(),
        }
    }
}

impl Default for ProfileOptions {
    fn default() -> Self {
        Self {
            locale: Locale::En,
            base_url: "/".to_string(),
            name_suffix: Some(byline_core::config::DEFAULT_NAME_SUFFIX.to_string()),
        }
    }
}

/// Build social links for the present platforms, in `SocialPlatform::ALL` order
pub fn social_links(social: Option<&SocialProfiles>, labels: &ProfileLabels) -> Vec<SocialLink> {
    let Some(social) = social else {
        return Vec::new();
    };

    social
        .entries()
        .into_iter()
        .map(|(platform, href)| SocialLink {
            platform,
            href: href.to_string(),
            label: platform.label(),
            aria_label: labels.social(platform),
        })
        .collect()
}

/// URL of an author's page
pub fn author_url(base_url: &str, author_slug: &str) -> String {
    format!("{}blog/author/{}", base_url, author_slug)
}

#[derive(Template, Debug)]
#[template(path = "author_profile.html")]
pub struct AuthorProfile {
    pub region_label: String,

    pub avatar_src: String,
    pub avatar_alt: String,
    pub avatar_size: u32,

    pub display_name: String,
    pub name_class: String,
    pub profile_link: Option<ProfileLink>,

    pub bio: String,

    pub social_label: String,
    pub social_links: Vec<SocialLink>,
}

impl AuthorProfile {
    /// Build the profile view; an empty `author_slug` counts as absent
    pub fn new(author: &AuthorInfo, author_slug: Option<&str>, options: &ProfileOptions) -> Self {
        let labels = ProfileLabels::for_locale(options.locale);

        let display_name = match options.name_suffix.as_deref() {
            Some(suffix) if !suffix.is_empty() => format!("{} {}", author.name, suffix),
            _ => author.name.clone(),
        };

        let profile_link = author_slug
            .filter(|slug| !slug.is_empty())
            .map(|slug| ProfileLink {
                href: author_url(&options.base_url, slug),
                label: labels.profile_link(&author.name),
            });

        let name_class = if profile_link.is_some() {
            format!("{} {}", NAME_CLASS, NAME_HOVER_CLASS)
        } else {
            NAME_CLASS.to_string()
        };

        Self {
            region_label: labels.region.to_string(),
            avatar_src: author.avatar.clone(),
            avatar_alt: labels.avatar_alt(&author.name),
            avatar_size: AVATAR_SIZE,
            display_name,
            name_class,
            profile_link,
            bio: author.bio.clone(),
            social_label: labels.social_nav.to_string(),
            social_links: social_links(author.social.as_ref(), labels),
        }
    }
}

/// Render an author profile to an HTML fragment
pub fn render_author_profile(
    author: &AuthorInfo,
    author_slug: Option<&str>,
    options: &ProfileOptions,
) -> askama::Result<String> {
    AuthorProfile::new(author, author_slug, options).render()
}
