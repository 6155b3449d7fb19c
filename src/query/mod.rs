//! Content query layer
//!
//! Typed, read-only queries against the Sanity content API. Each call
//! takes a request-scoped [`QueryContext`] so concurrent requests in
//! draft and published mode never influence each other.

mod client;
mod error;
#[cfg(test)]
pub(crate) mod memory;
pub mod queries;

pub use client::SanityClient;
pub use error::ContentError;

use async_trait::async_trait;

use crate::content::{Page, Post, PostSlug, PostSummary, SiteSettings};

/// Which content snapshot a query resolves against
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Perspective {
    #[default]
    Published,
    /// Unpublished edits layered over published documents
    Drafts,
}

impl Perspective {
    /// Value of the `perspective` query parameter
    pub fn as_param(&self) -> &'static str {
        match self {
            Perspective::Published => "published",
            Perspective::Drafts => "previewDrafts",
        }
    }
}

/// Per-request query settings
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct QueryContext {
    pub perspective: Perspective,
}

impl QueryContext {
    pub fn published() -> Self {
        Self {
            perspective: Perspective::Published,
        }
    }

    pub fn drafts() -> Self {
        Self {
            perspective: Perspective::Drafts,
        }
    }

    pub fn from_draft_mode(enabled: bool) -> Self {
        if enabled {
            Self::drafts()
        } else {
            Self::published()
        }
    }

    pub fn is_draft(&self) -> bool {
        self.perspective == Perspective::Drafts
    }
}

/// Source of site content. Implemented over HTTP by [`SanityClient`];
/// tests substitute in-memory fixtures.
#[async_trait]
pub trait ContentSource: Send + Sync {
    /// Newest posts that have a slug (`POSTS_QUERY`)
    async fn posts(&self, ctx: &QueryContext) -> Result<Vec<PostSummary>, ContentError>;

    /// A single post by slug (`POST_QUERY`), `None` when not found
    async fn post(&self, ctx: &QueryContext, slug: &str) -> Result<Option<Post>, ContentError>;

    /// Every post slug (`POSTS_SLUGS_QUERY`). Never served from a cache.
    async fn post_slugs(&self) -> Result<Vec<PostSlug>, ContentError>;

    /// A builder page by slug (`PAGE_QUERY`), `None` when not found
    async fn page(&self, ctx: &QueryContext, slug: &str) -> Result<Option<Page>, ContentError>;

    /// Site settings with the designated home page (`HOME_PAGE_QUERY`)
    async fn home_page(&self, ctx: &QueryContext) -> Result<Option<SiteSettings>, ContentError>;
}
