//! # byline-render
//!
//! Template rendering library for byline.
//!
//! This crate handles HTML rendering using Askama: the author profile
//! component and the blog's page layouts.

pub mod labels;
pub mod pages;
pub mod profile;
pub mod templates;

pub use labels::ProfileLabels;
pub use pages::{PageContext, PageError};
pub use profile::{
    render_author_profile, social_links, AuthorProfile, ProfileOptions, SocialLink, AVATAR_SIZE,
};
pub use templates::{PostEntry, SiteChrome};
