//! # byline-core
//!
//! Core library for the byline blog generator.
//!
//! This crate loads markdown posts, manages site configuration and answers
//! author queries (slug derivation, per-author filtering, route enumeration).

pub mod blog;
pub mod config;
pub mod frontmatter;
pub mod loader;
pub mod markdown;
pub mod models;
pub mod slug;

pub use blog::{AuthorParam, AuthorPosts, Blog, BlogError};
pub use config::{Config, Locale};
pub use loader::{LoadError, PostLoader};
pub use models::{AuthorInfo, Post, PostMetadata, SocialPlatform, SocialProfiles};
pub use slug::{is_path_segment, slugify};
