//! Init command implementation.

use anyhow::{Context, Result};
use std::fs;
use std::path::Path;

const DEFAULT_CONFIG: &str = include_str!("../../../byline.yml.example");

/// Initialize a new byline project
pub fn init_project(path: Option<&Path>) -> Result<()> {
    let root = path.unwrap_or_else(|| Path::new("."));
    fs::create_dir_all(root).with_context(|| format!("Failed to create {:?}", root))?;

    write_config(root)?;
    scaffold_posts(root)?;

    println!("✓ byline initialized in {:?}", root);
    println!("  - Edit byline.yml to set the site title and default author");
    println!("  - Write posts in posts/");
    Ok(())
}

fn write_config(root: &Path) -> Result<()> {
    let config_path = root.join("byline.yml");
    if config_path.exists() {
        println!("byline.yml already exists at {:?}", config_path);
        return Ok(());
    }

    fs::write(&config_path, DEFAULT_CONFIG)
        .with_context(|| format!("Failed to write {:?}", config_path))?;
    println!("Created {:?}", config_path);
    Ok(())
}

fn scaffold_posts(root: &Path) -> Result<()> {
    let posts = root.join("posts");
    let public = root.join("public");

    for dir in [&posts, &public] {
        fs::create_dir_all(dir).with_context(|| format!("Failed to create {:?}", dir))?;
    }

    // Starter post
    let sample = posts.join("hello-world.md");
    if !sample.exists() {
        fs::write(&sample, SAMPLE_POST)
            .with_context(|| format!("Failed to write {:?}", sample))?;
        println!("Created {:?}", sample);
    }

    Ok(())
}

const SAMPLE_POST: &str = r#"---
title: Hello, world
published_at: "2025-01-01"
summary: The first post on a new byline blog.
tags: [intro]
---

Welcome to your new blog. Posts without an `author:` block are credited to
the `default_author` from `byline.yml`. To credit someone else, add:

```yaml
author:
  name: Jane Roe
  avatar: /images/jane-roe.jpg
  bio: Writes about systems.
  social:
    github: https://github.com/janeroe
```

Then run:

```bash
byline build
byline dev
```
"#;
