//! Post discovery and parsing.

use crate::{
    blog::Blog, config::Config, frontmatter::parse_frontmatter, markdown::MarkdownProcessor,
    models::Post, slug::is_path_segment,
};
use chrono::NaiveDate;
use regex::Regex;
use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;
use walkdir::WalkDir;

#[derive(Error, Debug)]
pub enum LoadError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Frontmatter error: {0}")]
    Frontmatter(#[from] crate::frontmatter::FrontmatterError),

    #[error("Duplicate post slug: {0}")]
    DuplicateSlug(String),

    #[error("Post slug {0:?} is not a single path segment")]
    InvalidSlug(String),
}

const POST_EXTENSIONS: &[&str] = &["md", "mdx"];

/// Loads every post under the configured content directory
pub struct PostLoader {
    config: Config,
    processor: MarkdownProcessor,
}

impl PostLoader {
    pub fn new(config: Config) -> Self {
        Self {
            config,
            processor: MarkdownProcessor::new(),
        }
    }

    /// Load all posts into a `Blog`, injecting the configured default author
    pub fn load(&self) -> Result<Blog, LoadError> {
        let files = self.discover_post_files()?;
        tracing::info!("Found {} post files", files.len());

        let mut posts = Vec::with_capacity(files.len());
        let mut seen = HashSet::new();

        for path in &files {
            match self.parse_post(path) {
                Ok(post) => {
                    if !seen.insert(post.slug.clone()) {
                        tracing::warn!("Duplicate slug: {}", post.slug);
                        return Err(LoadError::DuplicateSlug(post.slug));
                    }
                    posts.push(post);
                }
                Err(e) => {
                    tracing::error!("Failed to parse {:?}: {}", path, e);
                }
            }
        }

        tracing::info!("Loaded {} posts", posts.len());

        Ok(Blog::new(posts, self.config.default_author.clone()))
    }

    fn discover_post_files(&self) -> Result<Vec<PathBuf>, LoadError> {
        let content_dir = self.config.content_dir();
        if !content_dir.is_dir() {
            tracing::warn!("Content directory {:?} does not exist", content_dir);
            return Ok(Vec::new());
        }

        let ignore_patterns = compile_ignore_patterns(&self.config.ignore_patterns);
        let mut files = Vec::new();

        for entry in WalkDir::new(&content_dir)
            .sort_by_file_name()
            .into_iter()
            .filter_map(|e| e.ok())
            .filter(|e| e.file_type().is_file())
        {
            let is_post = entry
                .path()
                .extension()
                .and_then(|ext| ext.to_str())
                .is_some_and(|ext| POST_EXTENSIONS.contains(&ext));
            if !is_post {
                continue;
            }

            let rel = relative_path(entry.path(), &content_dir);
            if should_ignore(&rel, &ignore_patterns) {
                tracing::debug!("Ignoring {} due to ignore_patterns", rel);
                continue;
            }

            files.push(entry.path().to_path_buf());
        }

        Ok(files)
    }

    fn parse_post(&self, path: &Path) -> Result<Post, LoadError> {
        let content = fs::read_to_string(path)?;
        let (mut metadata, body) = parse_frontmatter(&content)?;

        let slug = metadata.slug.clone().unwrap_or_else(|| {
            path.file_stem()
                .and_then(|s| s.to_str())
                .unwrap_or("untitled")
                .to_string()
        });
        if !is_path_segment(&slug) {
            return Err(LoadError::InvalidSlug(slug));
        }

        let date = metadata.published_at.as_deref().and_then(|d| {
            let parsed = NaiveDate::parse_from_str(d.trim(), "%Y-%m-%d").ok();
            if parsed.is_none() {
                tracing::warn!("Unparseable published_at '{}' in {:?}", d, path);
            }
            parsed
        });

        if metadata.summary.is_none() {
            metadata.summary = self.processor.first_paragraph(&body);
        }

        let content_html = self.processor.convert(&body);
        let source_path = Some(relative_path(path, &self.config.content_dir()));

        Ok(Post {
            slug,
            metadata,
            date,
            content_html,
            raw_body: body,
            source_path,
        })
    }
}

fn relative_path(path: &Path, root: &Path) -> String {
    path.strip_prefix(root)
        .unwrap_or(path)
        .to_string_lossy()
        .replace('\\', "/")
}

fn compile_ignore_patterns(patterns: &[String]) -> Vec<Regex> {
    let mut compiled = Vec::new();
    for pat in patterns {
        match Regex::new(pat) {
            Ok(re) => compiled.push(re),
            Err(err) => tracing::warn!("Invalid ignore pattern '{}': {}", pat, err),
        }
    }
    compiled
}

fn should_ignore(path: &str, ignores: &[Regex]) -> bool {
    ignores.iter().any(|re| re.is_match(path))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn setup(extra_config: &str) -> (TempDir, Config) {
        let dir = tempfile::tempdir().unwrap();
        let config_path = dir.path().join("byline.yml");
        fs::create_dir_all(dir.path().join("posts")).unwrap();
        fs::write(
            &config_path,
            format!(
                r#"
site:
  title: Test
paths:
  content: posts
  output: dist
default_author:
  name: Site Owner
  avatar: /images/owner.png
  bio: Default bio
{}"#,
                extra_config
            ),
        )
        .unwrap();
        let config = Config::from_file(&config_path).unwrap();
        (dir, config)
    }

    fn write_post(dir: &TempDir, name: &str, content: &str) {
        let path = dir.path().join("posts").join(name);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).unwrap();
        }
        fs::write(path, content).unwrap();
    }

    #[test]
    fn test_loads_posts_and_defaults_author() {
        let (dir, config) = setup("");
        write_post(
            &dir,
            "hello.md",
            "---\ntitle: Hello\npublished_at: \"2025-01-02\"\n---\nFirst paragraph.\n",
        );
        write_post(
            &dir,
            "nested/by-jane.mdx",
            "---\ntitle: By Jane\nauthor:\n  name: Jane Roe\n  avatar: /j.png\n  bio: Hi\n---\nBody\n",
        );

        let blog = PostLoader::new(config).load().unwrap();
        assert_eq!(blog.posts().len(), 2);

        let hello = blog.find_by_slug("hello").unwrap();
        assert_eq!(hello.date, NaiveDate::from_ymd_opt(2025, 1, 2));
        assert_eq!(hello.metadata.summary.as_deref(), Some("First paragraph."));
        assert_eq!(blog.effective_author(hello).name, "Site Owner");

        let jane = blog.find_by_slug("by-jane").unwrap();
        assert_eq!(jane.source_path.as_deref(), Some("nested/by-jane.mdx"));
        assert_eq!(blog.author_slugs(), vec!["site-owner", "jane-roe"]);
    }

    #[test]
    fn test_frontmatter_slug_overrides_filename() {
        let (dir, config) = setup("");
        write_post(&dir, "file-name.md", "---\ntitle: T\nslug: custom\n---\nBody\n");

        let blog = PostLoader::new(config).load().unwrap();
        assert!(blog.find_by_slug("custom").is_some());
    }

    #[test]
    fn test_invalid_posts_are_skipped() {
        let (dir, config) = setup("");
        write_post(&dir, "good.md", "---\ntitle: Good\n---\nBody\n");
        write_post(&dir, "bad.md", "no frontmatter at all\n");
        write_post(&dir, "notes.txt", "---\ntitle: Not a post\n---\n");

        let blog = PostLoader::new(config).load().unwrap();
        let slugs: Vec<_> = blog.posts().iter().map(|p| p.slug.as_str()).collect();
        assert_eq!(slugs, vec!["good"]);
    }

    #[test]
    fn test_slugs_outside_the_output_dir_are_skipped() {
        let (dir, config) = setup("");
        write_post(&dir, "escape.md", "---\ntitle: Escape\nslug: ../../../escaped\n---\nBody\n");
        write_post(&dir, "dot.md", "---\ntitle: Dot\nslug: \"..\"\n---\nBody\n");
        write_post(&dir, "safe.md", "---\ntitle: Safe\n---\nBody\n");

        let blog = PostLoader::new(config.clone()).load().unwrap();
        let slugs: Vec<_> = blog.posts().iter().map(|p| p.slug.as_str()).collect();
        assert_eq!(slugs, vec!["safe"]);

        let loader = PostLoader::new(config);
        match loader.parse_post(&dir.path().join("posts/escape.md")) {
            Err(LoadError::InvalidSlug(slug)) => assert_eq!(slug, "../../../escaped"),
            other => panic!("expected invalid slug error, got {:?}", other.map(|p| p.slug)),
        }
    }

    #[test]
    fn test_duplicate_slugs_fail() {
        let (dir, config) = setup("");
        write_post(&dir, "a.md", "---\ntitle: A\nslug: same\n---\n");
        write_post(&dir, "b.md", "---\ntitle: B\nslug: same\n---\n");

        match PostLoader::new(config).load() {
            Err(LoadError::DuplicateSlug(slug)) => assert_eq!(slug, "same"),
            other => panic!("expected duplicate slug error, got {:?}", other.map(|_| ())),
        }
    }

    #[test]
    fn test_ignore_patterns() {
        let (dir, config) = setup("ignore_patterns:\n  - \"^drafts/\"\n");
        write_post(&dir, "drafts/wip.md", "---\ntitle: WIP\n---\n");
        write_post(&dir, "live.md", "---\ntitle: Live\n---\n");

        let blog = PostLoader::new(config).load().unwrap();
        assert!(blog.find_by_slug("wip").is_none());
        assert!(blog.find_by_slug("live").is_some());
    }

    #[test]
    fn test_missing_content_dir_loads_nothing() {
        let (dir, config) = setup("");
        fs::remove_dir_all(dir.path().join("posts")).unwrap();

        let blog = PostLoader::new(config).load().unwrap();
        assert!(blog.posts().is_empty());
    }
}
