//! Dev server command implementation.

use super::build::{build_site_with_blog, page_context};
use anyhow::{Context, Result};
use axum::{
    body::Body,
    extract::{Path as AxumPath, State},
    http::{header, StatusCode, Uri},
    response::{Html, IntoResponse, Response},
    routing::get,
    Router,
};
use byline_core::{Blog, Config};
use byline_render::{PageContext, PageError};
use notify::{RecommendedWatcher, RecursiveMode, Watcher};
use std::path::{Component, Path, PathBuf};
use std::sync::Arc;
use tokio::fs;
use tokio::sync::{mpsc, RwLock};
use tower_http::trace::TraceLayer;

#[derive(Clone)]
struct AppState {
    output_dir: PathBuf,
    data: Arc<RwLock<SiteData>>,
}

struct SiteData {
    blog: Blog,
    pages: PageContext,
}

impl SiteData {
    fn new(config: &Config, blog: Blog) -> Self {
        Self {
            pages: page_context(config),
            blog,
        }
    }
}

/// Start development server with file watching
pub async fn dev_server(config_path: &Path, port: Option<u16>) -> Result<()> {
    // Initial build
    let (config, blog) = build_site_with_blog(config_path).context("Failed to build site")?;
    let port = port.unwrap_or(config.server.port);
    let output_dir = config.output_dir();
    let config_path_buf = config_path.to_path_buf();
    let shared_data = Arc::new(RwLock::new(SiteData::new(&config, blog)));

    tracing::info!("Starting dev server on http://localhost:{}", port);
    println!("\nServing at http://localhost:{}", port);
    println!("   Press Ctrl+C to stop\n");

    // Set up file watching for live rebuilds
    let (tx, mut rx) = mpsc::unbounded_channel();
    let mut _watcher = RecommendedWatcher::new(
        move |res| {
            let _ = tx.send(res);
        },
        notify::Config::default(),
    )
    .context("Failed to initialize file watcher")?;

    for (path, mode) in watch_targets(&config, config_path) {
        _watcher
            .watch(&path, mode)
            .with_context(|| format!("Failed to watch {:?}", path))?;
        tracing::debug!("Watching {:?}", path);
    }

    tokio::spawn({
        let data_handle = shared_data.clone();
        async move {
            while let Some(event) = rx.recv().await {
                match event {
                    Ok(_ev) => {
                        // Debounce a bit by draining pending events
                        while rx.try_recv().is_ok() {}
                        tracing::info!("Change detected, rebuilding site...");
                        let res = tokio::task::spawn_blocking({
                            let config_path = config_path_buf.clone();
                            move || build_site_with_blog(&config_path)
                        })
                        .await;

                        match res {
                            Ok(Ok((config, blog))) => {
                                let mut data = data_handle.write().await;
                                *data = SiteData::new(&config, blog);
                                tracing::info!("Rebuild complete");
                            }
                            Ok(Err(e)) => tracing::error!("Rebuild failed: {:?}", e),
                            Err(e) => tracing::error!("Rebuild task panicked: {}", e),
                        }
                    }
                    Err(err) => tracing::warn!("Watcher error: {}", err),
                }
            }
        }
    });

    let state = AppState {
        output_dir,
        data: shared_data,
    };

    // Start server
    let addr = format!("127.0.0.1:{}", port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind to {}", addr))?;

    axum::serve(listener, router(state))
        .await
        .context("Server error")?;

    Ok(())
}

/// Paths whose changes trigger a rebuild: posts, public assets and the config file
fn watch_targets(config: &Config, config_path: &Path) -> Vec<(PathBuf, RecursiveMode)> {
    let mut targets = Vec::new();

    for dir in [config.content_dir(), config.public_dir()] {
        if dir.is_dir() {
            targets.push((dir, RecursiveMode::Recursive));
        } else {
            tracing::warn!("{:?} does not exist; changes there will not be picked up", dir);
        }
    }

    if config_path.is_file() {
        targets.push((config_path.to_path_buf(), RecursiveMode::NonRecursive));
    }

    targets
}

fn router(state: AppState) -> Router {
    Router::new()
        .route("/blog/author/{slug}", get(serve_author))
        .route("/{*path}", get(serve_with_404))
        .route("/", get(serve_index))
        .fallback(serve_404)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Render an author page from the in-memory posts
async fn serve_author(AxumPath(slug): AxumPath<String>, State(state): State<AppState>) -> Response {
    let rendered = {
        let data = state.data.read().await;
        data.pages.render_author(&data.blog, &slug)
    };

    match rendered {
        Ok(html) => Html(html).into_response(),
        Err(PageError::NotFound(err)) => {
            tracing::debug!("{}", err);
            serve_404_inner(state).await
        }
        Err(err) => {
            tracing::error!("Failed to render author page {}: {}", slug, err);
            (StatusCode::INTERNAL_SERVER_ERROR, "Failed to render page").into_response()
        }
    }
}

/// Serve index.html for root path
async fn serve_index(State(state): State<AppState>) -> Response {
    let index_path = state.output_dir.join("index.html");
    match fs::read_to_string(&index_path).await {
        Ok(content) => Html(content).into_response(),
        Err(_) => (StatusCode::NOT_FOUND, "Index not found").into_response(),
    }
}

/// Serve files from the output directory, falling back to the custom 404 page
async fn serve_with_404(State(state): State<AppState>, uri: Uri) -> Response {
    let path = uri.path().trim_start_matches('/');
    let Some(file_path) = resolve_output_path(&state.output_dir, path) else {
        return serve_404_inner(state).await;
    };

    // Pretty URLs map to directory index files
    let file_path = if fs::metadata(&file_path)
        .await
        .map(|m| m.is_dir())
        .unwrap_or(false)
    {
        file_path.join("index.html")
    } else {
        file_path
    };

    match fs::read(&file_path).await {
        Ok(content) => (
            StatusCode::OK,
            [(header::CONTENT_TYPE, content_type_for_path(&file_path))],
            Body::from(content),
        )
            .into_response(),
        Err(_) => serve_404_inner(state).await,
    }
}

/// Serve custom 404 page
async fn serve_404(State(state): State<AppState>) -> Response {
    serve_404_inner(state).await
}

async fn serve_404_inner(state: AppState) -> Response {
    let not_found_path = state.output_dir.join("404.html");

    match fs::read_to_string(&not_found_path).await {
        Ok(content) => (
            StatusCode::NOT_FOUND,
            [(header::CONTENT_TYPE, "text/html; charset=utf-8")],
            content,
        )
            .into_response(),
        // Fallback if 404.html doesn't exist
        Err(_) => (StatusCode::NOT_FOUND, "404 Not Found").into_response(),
    }
}

/// Join a request path onto the output dir, rejecting anything but plain segments
fn resolve_output_path(output_dir: &Path, request_path: &str) -> Option<PathBuf> {
    let rel = Path::new(request_path);
    if rel
        .components()
        .any(|c| !matches!(c, Component::Normal(_)))
    {
        return None;
    }
    Some(output_dir.join(rel))
}

fn content_type_for_path(path: &Path) -> &'static str {
    match path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_lowercase()
        .as_str()
    {
        "html" => "text/html; charset=utf-8",
        "css" => "text/css; charset=utf-8",
        "js" => "application/javascript; charset=utf-8",
        "json" => "application/json; charset=utf-8",
        "png" => "image/png",
        "jpg" | "jpeg" => "image/jpeg",
        "gif" => "image/gif",
        "webp" => "image/webp",
        "svg" => "image/svg+xml",
        "ico" => "image/x-icon",
        "woff" => "font/woff",
        "woff2" => "font/woff2",
        _ => "application/octet-stream",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::to_bytes;
    use byline_core::{AuthorInfo, Post, PostMetadata};
    use tempfile::tempdir;

    const CONFIG: &str = r#"
site:
  title: "Test"
paths:
  content: posts
  output: dist
default_author:
  name: Site Owner
  avatar: /images/owner.png
  bio: Runs the site.
"#;

    fn post(slug: &str, author: Option<&str>) -> Post {
        Post {
            slug: slug.into(),
            metadata: PostMetadata {
                title: format!("Title {slug}"),
                author: author.map(|name| AuthorInfo {
                    name: name.into(),
                    avatar: "/images/a.png".into(),
                    bio: String::new(),
                    social: None,
                }),
                ..Default::default()
            },
            date: None,
            content_html: "<p>Body</p>".into(),
            raw_body: "Body".into(),
            source_path: None,
        }
    }

    fn sample_state(output_dir: PathBuf) -> AppState {
        let config = Config::from_yaml(CONFIG).unwrap();
        let blog = Blog::new(
            vec![post("hello", Some("John Doe")), post("notes", None)],
            config.default_author.clone(),
        );

        AppState {
            output_dir,
            data: Arc::new(RwLock::new(SiteData::new(&config, blog))),
        }
    }

    async fn body_text(response: Response) -> String {
        let body = to_bytes(response.into_body(), 1024 * 1024).await.unwrap();
        String::from_utf8(body.to_vec()).unwrap()
    }

    #[tokio::test]
    async fn author_route_renders_matching_posts() {
        let tmp = tempdir().unwrap();
        let state = sample_state(tmp.path().to_path_buf());

        let response = serve_author(AxumPath("john-doe".into()), State(state)).await;
        assert_eq!(response.status(), StatusCode::OK);
        let html = body_text(response).await;
        assert!(html.contains("Title hello"));
        assert!(!html.contains("Title notes"));
    }

    #[tokio::test]
    async fn unknown_author_serves_404_page() {
        let tmp = tempdir().unwrap();
        std::fs::write(tmp.path().join("404.html"), "custom missing page").unwrap();
        let state = sample_state(tmp.path().to_path_buf());

        let response = serve_author(AxumPath("nobody".into()), State(state)).await;
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        assert_eq!(body_text(response).await, "custom missing page");
    }

    #[tokio::test]
    async fn directories_resolve_to_index_files() {
        let tmp = tempdir().unwrap();
        let post_dir = tmp.path().join("blog/hello");
        std::fs::create_dir_all(&post_dir).unwrap();
        std::fs::write(post_dir.join("index.html"), "<p>hello</p>").unwrap();
        let state = sample_state(tmp.path().to_path_buf());

        let response = serve_with_404(State(state), Uri::from_static("/blog/hello")).await;
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            response.headers()[header::CONTENT_TYPE],
            "text/html; charset=utf-8"
        );
        assert_eq!(body_text(response).await, "<p>hello</p>");
    }

    #[test]
    fn watches_content_public_and_config() {
        let tmp = tempdir().unwrap();
        let config_path = tmp.path().join("byline.yml");
        std::fs::write(&config_path, CONFIG).unwrap();
        std::fs::create_dir_all(tmp.path().join("posts")).unwrap();
        std::fs::create_dir_all(tmp.path().join("public")).unwrap();
        let config = Config::from_file(&config_path).unwrap();

        let targets = watch_targets(&config, &config_path);
        assert_eq!(
            targets,
            vec![
                (tmp.path().join("posts"), RecursiveMode::Recursive),
                (tmp.path().join("public"), RecursiveMode::Recursive),
                (config_path.clone(), RecursiveMode::NonRecursive),
            ]
        );
    }

    #[test]
    fn missing_directories_are_not_watched() {
        let tmp = tempdir().unwrap();
        let config_path = tmp.path().join("byline.yml");
        std::fs::write(&config_path, CONFIG).unwrap();
        let config = Config::from_file(&config_path).unwrap();

        let targets = watch_targets(&config, &config_path);
        assert_eq!(targets, vec![(config_path.clone(), RecursiveMode::NonRecursive)]);
    }

    #[test]
    fn parent_segments_are_rejected() {
        let root = Path::new("/srv/dist");
        assert!(resolve_output_path(root, "../secret").is_none());
        assert!(resolve_output_path(root, "blog/../../x").is_none());
        assert_eq!(
            resolve_output_path(root, "style.css"),
            Some(root.join("style.css"))
        );
    }

    #[test]
    fn content_types() {
        assert_eq!(content_type_for_path(Path::new("a/style.css")), "text/css; charset=utf-8");
        assert_eq!(content_type_for_path(Path::new("authors.json")), "application/json; charset=utf-8");
        assert_eq!(content_type_for_path(Path::new("blob")), "application/octet-stream");
    }
}
