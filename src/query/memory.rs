//! In-memory content source for tests

use async_trait::async_trait;
use std::sync::Mutex;

use super::{ContentError, ContentSource, Perspective, QueryContext};
use crate::content::{Page, Post, PostSlug, PostSummary, SiteSettings};

#[derive(Default)]
pub struct MemorySource {
    pub summaries: Vec<PostSummary>,
    /// Full posts keyed by slug, shaped like `POST_QUERY` results
    pub posts: Vec<(String, Post)>,
    pub pages: Vec<Page>,
    pub settings: Option<SiteSettings>,
    /// Answer every query with a backend failure
    pub unavailable: bool,
    /// Perspective of every query received, in order
    pub seen: Mutex<Vec<Perspective>>,
}

impl MemorySource {
    fn record(&self, ctx: &QueryContext) -> Result<(), ContentError> {
        self.seen.lock().unwrap().push(ctx.perspective);
        if self.unavailable {
            return Err(ContentError::Status {
                status: reqwest::StatusCode::SERVICE_UNAVAILABLE,
                body: "unavailable".to_string(),
            });
        }
        Ok(())
    }

    pub fn perspectives(&self) -> Vec<Perspective> {
        self.seen.lock().unwrap().clone()
    }
}

#[async_trait]
impl ContentSource for MemorySource {
    async fn posts(&self, ctx: &QueryContext) -> Result<Vec<PostSummary>, ContentError> {
        self.record(ctx)?;
        Ok(self.summaries.clone())
    }

    async fn post(&self, ctx: &QueryContext, slug: &str) -> Result<Option<Post>, ContentError> {
        self.record(ctx)?;
        Ok(self
            .posts
            .iter()
            .find(|(key, _)| key == slug)
            .map(|(_, post)| post.clone()))
    }

    async fn post_slugs(&self) -> Result<Vec<PostSlug>, ContentError> {
        self.record(&QueryContext::published())?;
        Ok(self
            .posts
            .iter()
            .map(|(slug, _)| PostSlug {
                slug: Some(slug.clone()),
            })
            .collect())
    }

    async fn page(&self, ctx: &QueryContext, slug: &str) -> Result<Option<Page>, ContentError> {
        self.record(ctx)?;
        Ok(self
            .pages
            .iter()
            .find(|p| p.slug.as_ref().and_then(|s| s.as_str()) == Some(slug))
            .cloned())
    }

    async fn home_page(&self, ctx: &QueryContext) -> Result<Option<SiteSettings>, ContentError> {
        self.record(ctx)?;
        Ok(self.settings.clone())
    }
}
