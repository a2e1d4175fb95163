//! Build command implementation.

use anyhow::{Context, Result};
use byline_core::{AuthorParam, Blog, Config, PostLoader};
use byline_render::PageContext;
use chrono::Datelike;
use include_dir::{include_dir, Dir};
use std::fs;
use std::path::Path;
use walkdir::WalkDir;

// Embed the stylesheet at compile time so it's available after cargo install
static STATIC_ASSETS: Dir<'_> = include_dir!("$CARGO_MANIFEST_DIR/static");

const AUTHORS_FILENAME: &str = "authors.json";

/// Build the static site (writes output) and discard the loaded posts
pub fn build_site(config_path: &Path) -> Result<()> {
    build_site_with_blog(config_path).map(|_| ())
}

/// Build the static site and return the loaded posts alongside the config
pub fn build_site_with_blog(config_path: &Path) -> Result<(Config, Blog)> {
    tracing::info!("Loading config from {:?}", config_path);
    let config = Config::from_file(config_path).context("Failed to load configuration")?;
    build_site_with_config(config)
}

/// Load posts without writing anything
pub fn load_blog(config_path: &Path) -> Result<(Config, Blog)> {
    let config = Config::from_file(config_path).context("Failed to load configuration")?;
    let blog = PostLoader::new(config.clone())
        .load()
        .context("Failed to load posts")?;
    Ok((config, blog))
}

/// Page context for the current year
pub fn page_context(config: &Config) -> PageContext {
    PageContext::new(config, chrono::Utc::now().year())
}

/// Build the site from an already loaded config
pub fn build_site_with_config(config: Config) -> Result<(Config, Blog)> {
    tracing::info!("Building site: {}", config.site.title);

    let blog = PostLoader::new(config.clone())
        .load()
        .context("Failed to load posts")?;
    let pages = page_context(&config);

    let output_dir = config.output_dir();
    fs::create_dir_all(&output_dir).context("Failed to create output directory")?;

    // Listings
    let index_html = pages.render_index(&blog).context("Failed to render blog index")?;
    write_page(&output_dir, "index.html", &index_html)?;
    write_page(&output_dir, "blog/index.html", &index_html)?;

    // Post pages
    let mut post_count = 0;
    for post in blog.published() {
        let html = pages
            .render_post(&blog, post)
            .with_context(|| format!("Failed to render post {}", post.slug))?;
        write_page(&output_dir, &post.output_rel_path(), &html)?;
        tracing::debug!("Rendered post: {}", post.slug);
        post_count += 1;
    }

    // Author pages, one per route parameter
    let author_params = blog.author_params();
    for unroutable in blog
        .author_slugs()
        .iter()
        .filter(|slug| !author_params.iter().any(|p| &p.slug == *slug))
    {
        tracing::warn!("Skipping author page for unsafe slug {:?}", unroutable);
    }
    for AuthorParam { slug } in &author_params {
        let html = pages
            .render_author(&blog, slug)
            .with_context(|| format!("Failed to render author page {}", slug))?;
        write_page(&output_dir, &format!("blog/author/{}/index.html", slug), &html)?;
        tracing::debug!("Rendered author: {}", slug);
    }

    let not_found = pages
        .render_not_found()
        .context("Failed to render 404 page")?;
    write_page(&output_dir, "404.html", &not_found)?;

    generate_authors_json(&output_dir, &author_params)?;
    copy_assets(&config)?;

    tracing::info!("✓ Built {} posts and {} author pages", post_count, author_params.len());
    tracing::info!("✓ Output written to {:?}", output_dir);

    Ok((config, blog))
}

fn write_page(output_dir: &Path, rel_path: &str, html: &str) -> Result<()> {
    let output_path = output_dir.join(rel_path);
    if let Some(parent) = output_path.parent() {
        fs::create_dir_all(parent).with_context(|| format!("Failed to create {:?}", parent))?;
    }
    fs::write(&output_path, html).with_context(|| format!("Failed to write {:?}", output_path))
}

/// Write the author route parameters for external tooling
fn generate_authors_json(output_dir: &Path, params: &[AuthorParam]) -> Result<()> {
    let json = serde_json::to_string_pretty(params)
        .context("Failed to serialize author params")?;
    let output_path = output_dir.join(AUTHORS_FILENAME);
    fs::write(&output_path, json).with_context(|| format!("Failed to write {:?}", output_path))?;

    tracing::info!("Generated {}", AUTHORS_FILENAME);
    Ok(())
}

/// Copy the embedded stylesheet and the user's public directory
fn copy_assets(config: &Config) -> Result<()> {
    let output_dir = config.output_dir();

    for file in STATIC_ASSETS.files() {
        let dest = output_dir.join(file.path());
        if let Some(parent) = dest.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&dest, file.contents()).with_context(|| format!("Failed to write {:?}", dest))?;
    }

    let public_dir = config.public_dir();
    if public_dir.is_dir() {
        copy_dir(&public_dir, &output_dir)?;
        tracing::info!("Copied public assets from {:?}", public_dir);
    }

    Ok(())
}

fn copy_dir(src: &Path, dest: &Path) -> Result<()> {
    for entry in WalkDir::new(src).into_iter().filter_map(|e| e.ok()) {
        let rel = entry.path().strip_prefix(src).unwrap_or(entry.path());
        let target = dest.join(rel);

        if entry.file_type().is_dir() {
            fs::create_dir_all(&target)?;
        } else {
            fs::copy(entry.path(), &target)
                .with_context(|| format!("Failed to copy {:?}", entry.path()))?;
        }
    }
    Ok(())
}
