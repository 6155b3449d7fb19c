//! Site shell templates using the Tera template engine
//!
//! Templates are embedded directly in the binary. Components render
//! their own escaped markup, so autoescaping is off and templates escape
//! plain config strings explicitly.

use anyhow::Result;
use serde::Serialize;
use tera::{Context, Tera};

use crate::config::SiteConfig;

/// Template renderer with the embedded site shell
pub struct TemplateRenderer {
    tera: Tera,
}

impl TemplateRenderer {
    /// Create a new renderer with all templates loaded
    pub fn new() -> Result<Self> {
        let mut tera = Tera::default();

        tera.autoescape_on(vec![]);

        tera.add_raw_templates(vec![
            ("layout.html", include_str!("site/layout.html")),
            ("home.html", include_str!("site/home.html")),
            ("posts.html", include_str!("site/posts.html")),
            ("post.html", include_str!("site/post.html")),
            ("page.html", include_str!("site/page.html")),
            ("not_found.html", include_str!("site/not_found.html")),
            ("error.html", include_str!("site/error.html")),
        ])?;

        Ok(Self { tera })
    }

    /// Render a template with given context
    pub fn render(&self, template_name: &str, context: &Context) -> Result<String> {
        Ok(self.tera.render(template_name, context)?)
    }
}

/// Data structures for template context

#[derive(Debug, Clone, Serialize)]
pub struct SiteData {
    pub title: String,
    pub description: String,
    pub language: String,
}

impl From<&SiteConfig> for SiteData {
    fn from(config: &SiteConfig) -> Self {
        Self {
            title: config.title.clone(),
            description: config.description.clone(),
            language: config.language.clone(),
        }
    }
}

/// Values shared by every page rendered into `layout.html`
#[derive(Debug, Clone, Serialize)]
pub struct LayoutData {
    pub site: SiteData,
    pub page_title: Option<String>,
    pub description: String,
    /// Absolute URL of the page, when it has a stable route
    pub canonical: Option<String>,
    /// Pre-rendered header component
    pub header: String,
    /// Pre-rendered draft-mode exit link (empty outside draft mode)
    pub draft_banner: String,
    pub version: &'static str,
}

impl LayoutData {
    /// Start a Tera context from the layout values
    pub fn into_context(self) -> Context {
        let mut context = Context::new();
        context.insert("site", &self.site);
        context.insert("page_title", &self.page_title);
        context.insert("description", &self.description);
        context.insert("canonical", &self.canonical);
        context.insert("header", &self.header);
        context.insert("draft_banner", &self.draft_banner);
        context.insert("version", self.version);
        context
    }
}
