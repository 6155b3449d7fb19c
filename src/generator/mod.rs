//! Generator module - assembles full HTML documents from content
//!
//! Components produce fragments; the generator places them into the
//! embedded Tera site shell. Used by both the HTTP server and the static
//! `generate` command.

use anyhow::Result;
use std::fs;
use std::path::{Path, PathBuf};

use crate::config::SiteConfig;
use crate::content::{Page, PortableBlock, Post, PostSummary, SiteSettings};
use crate::helpers::{full_url_for, page_path, post_path, truncate, POSTS_PATH};
use crate::render::{self, PostCard, Renderer};
use crate::templates::{LayoutData, SiteData, TemplateRenderer};

/// Length of generated meta descriptions
const DESCRIPTION_LENGTH: usize = 160;

/// HTML document generator
pub struct Generator {
    config: SiteConfig,
    renderer: Renderer,
    templates: TemplateRenderer,
}

impl Generator {
    /// Create a new generator
    pub fn new(config: &SiteConfig) -> Result<Self> {
        Ok(Self {
            config: config.clone(),
            renderer: Renderer::new(config),
            templates: TemplateRenderer::new()?,
        })
    }

    /// Layout values common to every page
    fn layout(
        &self,
        page_title: Option<&str>,
        description: Option<String>,
        path: Option<&str>,
        draft_mode: bool,
    ) -> LayoutData {
        LayoutData {
            site: SiteData::from(&self.config),
            page_title: page_title.map(str::to_string),
            canonical: path.map(|p| full_url_for(&self.config, p)),
            description: description.unwrap_or_else(|| self.config.description.clone()),
            header: render::header(&self.config),
            draft_banner: render::disable_draft_mode(draft_mode),
            version: env!("CARGO_PKG_VERSION"),
        }
    }

    /// Home page: the designated builder page, or the fallback landing
    pub fn home(&self, settings: Option<&SiteSettings>, draft_mode: bool) -> Result<String> {
        let home_page = settings.and_then(|s| s.home_page.as_ref());
        let builder = home_page
            .filter(|page| page.blocks().is_some_and(|blocks| !blocks.is_empty()))
            .map(|page| self.renderer.page_builder(page.blocks(), &page.id, &page.kind));

        let mut context = self
            .layout(
                home_page.and_then(|p| render::text(&p.title)),
                None,
                Some("/"),
                draft_mode,
            )
            .into_context();
        context.insert("builder", &builder);
        self.templates.render("home.html", &context)
    }

    /// Posts index. Posts without a slug are logged and left out.
    pub fn posts_index(&self, posts: &[PostSummary], draft_mode: bool) -> Result<String> {
        let cards: Vec<String> = posts
            .iter()
            .filter_map(|post| match PostCard::try_from(post) {
                Ok(card) => Some(self.renderer.post_card(&card)),
                Err(e) => {
                    tracing::warn!("Skipping post card: {}", e);
                    None
                }
            })
            .collect();

        let mut context = self
            .layout(Some("Posts"), None, Some(POSTS_PATH), draft_mode)
            .into_context();
        context.insert("heading", &render::title(&self.config.posts_title));
        context.insert("cards", &cards);
        self.templates.render("posts.html", &context)
    }

    /// Post detail page for the post served at `/posts/{slug}`
    pub fn post_page(&self, post: &Post, slug: &str, draft_mode: bool) -> Result<String> {
        let description = post.body.as_deref().and_then(excerpt);
        let path = post_path(slug);
        let mut context = self
            .layout(
                render::text(&post.title),
                description,
                Some(path.as_str()),
                draft_mode,
            )
            .into_context();
        context.insert("post", &self.renderer.post(post));
        self.templates.render("post.html", &context)
    }

    /// Builder page
    pub fn builder_page(&self, page: &Page, draft_mode: bool) -> Result<String> {
        let path = page.slug.as_ref().and_then(|s| s.as_str()).map(page_path);
        let mut context = self
            .layout(render::text(&page.title), None, path.as_deref(), draft_mode)
            .into_context();
        context.insert(
            "builder",
            &self.renderer.page_builder(page.blocks(), &page.id, &page.kind),
        );
        self.templates.render("page.html", &context)
    }

    pub fn not_found(&self, draft_mode: bool) -> Result<String> {
        let context = self
            .layout(Some("Not Found"), None, None, draft_mode)
            .into_context();
        self.templates.render("not_found.html", &context)
    }

    pub fn error_page(&self) -> Result<String> {
        let context = self.layout(Some("Error"), None, None, false).into_context();
        self.templates.render("error.html", &context)
    }
}

/// Plain-text excerpt of a rich-text body for meta descriptions
fn excerpt(body: &[PortableBlock]) -> Option<String> {
    let text = body
        .iter()
        .filter_map(|block| match block {
            PortableBlock::Text(b) => Some(b.plain_text()),
            _ => None,
        })
        .filter(|t| !t.trim().is_empty())
        .collect::<Vec<_>>()
        .join(" ");

    if text.trim().is_empty() {
        None
    } else {
        Some(truncate(text.trim(), DESCRIPTION_LENGTH, None))
    }
}

/// Output file for a route, `index.html` inside the route directory
pub fn route_output_path(public_dir: &Path, route: &str) -> PathBuf {
    let relative = route.trim_matches('/');
    if relative.is_empty() {
        public_dir.join("index.html")
    } else {
        public_dir.join(relative).join("index.html")
    }
}

/// Write a rendered route below the public directory
pub fn write_route(public_dir: &Path, route: &str, html: &str) -> Result<PathBuf> {
    let output_path = route_output_path(public_dir, route);
    if let Some(parent) = output_path.parent() {
        fs::create_dir_all(parent)?;
    }
    fs::write(&output_path, html)?;
    tracing::debug!("Generated: {:?}", output_path);
    Ok(output_path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn generator() -> Generator {
        let mut config = SiteConfig::default();
        config.title = "Research".to_string();
        config.sanity.project_id = "proj".to_string();
        Generator::new(&config).unwrap()
    }

    #[test]
    fn test_home_fallback_without_settings() {
        let html = generator().home(None, false).unwrap();
        assert!(html.contains("Posts index"));
        assert!(html.contains(r#"<link rel="canonical" href="http://localhost:3000/">"#));
        assert!(!html.contains("page-builder"));
        assert!(!html.contains("Disable Draft Mode"));
    }

    #[test]
    fn test_home_renders_builder_page() {
        let settings: SiteSettings = serde_json::from_value(json!({
            "homePage": {
                "_id": "home",
                "_type": "page",
                "title": "Welcome",
                "content": [{ "_type": "hero", "_key": "h", "title": "Big hello" }]
            }
        }))
        .unwrap();
        let html = generator().home(Some(&settings), true).unwrap();
        assert!(html.contains("Big hello"));
        assert!(html.contains(r#"data-document-id="home""#));
        assert!(!html.contains("Posts index"));
        assert!(html.contains("Disable Draft Mode"));
    }

    #[test]
    fn test_home_with_empty_content_uses_fallback() {
        let settings: SiteSettings = serde_json::from_value(json!({
            "homePage": { "_id": "home", "_type": "page", "content": [] }
        }))
        .unwrap();
        let html = generator().home(Some(&settings), false).unwrap();
        assert!(html.contains("Posts index"));
        assert!(!html.contains("page-builder"));
    }

    #[test]
    fn test_posts_index_skips_posts_without_slug() {
        let posts: Vec<PostSummary> = serde_json::from_value(json!([
            { "_id": "1", "title": "Hello", "slug": { "current": "hello" } },
            { "_id": "2", "title": "Orphan" }
        ]))
        .unwrap();
        let html = generator().posts_index(&posts, false).unwrap();
        assert!(html.contains(r#"href="/posts/hello""#));
        assert!(!html.contains("Orphan"));
        assert!(html.contains("AI Research, Advance, Deployment"));
    }

    #[test]
    fn test_post_page_description() {
        let post: Post = serde_json::from_value(json!({
            "_id": "p1",
            "title": "Hello",
            "body": [{ "_type": "block", "children": [{ "_type": "span", "text": "Short intro." }] }]
        }))
        .unwrap();
        let html = generator().post_page(&post, "hello", false).unwrap();
        assert!(html.contains(r#"<meta name="description" content="Short intro.">"#));
        assert!(html.contains("<title>Hello | Research</title>"));
        assert!(html.contains(r#"<link rel="canonical" href="http://localhost:3000/posts/hello">"#));
    }

    #[test]
    fn test_post_page_canonical_from_route_slug() {
        // Shape of a POST_QUERY result: no slug field
        let post: Post = serde_json::from_value(json!({
            "_id": "p2",
            "title": "Routing",
            "body": null,
            "mainImage": null,
            "publishedAt": "2024-05-01T00:00:00Z",
            "categories": null,
            "author": { "name": "Ada", "image": null },
            "relatedPosts": []
        }))
        .unwrap();
        assert!(post.slug().is_none());

        let html = generator().post_page(&post, "a b", false).unwrap();
        assert!(html.contains(r#"<link rel="canonical" href="http://localhost:3000/posts/a%20b">"#));
    }

    #[test]
    fn test_route_output_path() {
        let public = Path::new("/tmp/public");
        assert_eq!(
            route_output_path(public, "/"),
            PathBuf::from("/tmp/public/index.html")
        );
        assert_eq!(
            route_output_path(public, "/posts/a"),
            PathBuf::from("/tmp/public/posts/a/index.html")
        );
    }

    #[test]
    fn test_write_route() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_route(dir.path(), "/posts", "<html></html>").unwrap();
        assert_eq!(fs::read_to_string(path).unwrap(), "<html></html>");
    }
}
