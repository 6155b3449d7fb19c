//! HTTP client for the Sanity query API

use async_trait::async_trait;
use reqwest::Client;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use std::time::Instant;

use super::queries::{HOME_PAGE_QUERY, PAGE_QUERY, POSTS_QUERY, POSTS_SLUGS_QUERY, POST_QUERY};
use super::{ContentError, ContentSource, QueryContext};
use crate::config::SanityConfig;
use crate::content::{Page, Post, PostSlug, PostSummary, SiteSettings};

/// Envelope of every query response
#[derive(Debug, Deserialize)]
struct QueryResponse<T> {
    result: Option<T>,
}

/// A GROQ query and how it may be routed
#[derive(Debug, Clone, Copy)]
struct NamedQuery {
    name: &'static str,
    groq: &'static str,
    /// Allow the API CDN (published reads only)
    cacheable: bool,
}

const POSTS: NamedQuery = NamedQuery {
    name: "POSTS_QUERY",
    groq: POSTS_QUERY,
    cacheable: true,
};

const POST: NamedQuery = NamedQuery {
    name: "POST_QUERY",
    groq: POST_QUERY,
    cacheable: true,
};

/// Route enumeration must see every published slug, never a cached list
const POST_SLUGS: NamedQuery = NamedQuery {
    name: "POSTS_SLUGS_QUERY",
    groq: POSTS_SLUGS_QUERY,
    cacheable: false,
};

const PAGE: NamedQuery = NamedQuery {
    name: "PAGE_QUERY",
    groq: PAGE_QUERY,
    cacheable: true,
};

const HOME_PAGE: NamedQuery = NamedQuery {
    name: "HOME_PAGE_QUERY",
    groq: HOME_PAGE_QUERY,
    cacheable: true,
};

/// Sanity content API client
#[derive(Clone)]
pub struct SanityClient {
    client: Client,
    config: SanityConfig,
}

impl SanityClient {
    /// Create a new client from the project configuration
    pub fn new(config: &SanityConfig) -> Result<Self, ContentError> {
        if config.project_id.is_empty() && config.api_host.is_none() {
            return Err(ContentError::MissingProject);
        }

        let client = Client::builder()
            .user_agent(concat!("sanity-site/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self {
            client,
            config: config.clone(),
        })
    }

    /// Query endpoint, on the API CDN or the live API
    fn endpoint(&self, use_cdn: bool) -> String {
        let host = match &self.config.api_host {
            Some(host) => host.trim_end_matches('/').to_string(),
            None => {
                let api = if use_cdn { "apicdn" } else { "api" };
                format!("https://{}.{}.sanity.io", self.config.project_id, api)
            }
        };

        format!(
            "{}/v{}/data/query/{}",
            host,
            self.config.api_version.trim_start_matches('v'),
            self.config.dataset
        )
    }

    /// The API CDN serves only cacheable published reads
    fn use_cdn(&self, query: &NamedQuery, ctx: &QueryContext) -> bool {
        query.cacheable && self.config.use_cdn && !ctx.is_draft()
    }

    /// Run a GROQ query and decode its `result`
    async fn fetch<T>(
        &self,
        query: &NamedQuery,
        params: &[(&str, &str)],
        ctx: &QueryContext,
    ) -> Result<Option<T>, ContentError>
    where
        T: DeserializeOwned,
    {
        let start = Instant::now();
        let use_cdn = self.use_cdn(query, ctx);
        let url = self.endpoint(use_cdn);

        let mut pairs: Vec<(String, String)> = vec![
            ("query".to_string(), query.groq.to_string()),
            (
                "perspective".to_string(),
                ctx.perspective.as_param().to_string(),
            ),
        ];
        for (key, value) in params {
            // Parameters travel as JSON literals
            let encoded = serde_json::Value::String(value.to_string()).to_string();
            pairs.push((format!("${}", key), encoded));
        }

        let mut request = self.client.get(&url).query(&pairs);
        if ctx.is_draft() {
            let token = self
                .config
                .token
                .as_deref()
                .ok_or(ContentError::MissingToken)?;
            request = request.bearer_auth(token);
        }

        let response = request.send().await?;
        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            return Err(ContentError::Status { status, body });
        }

        let text = response.text().await?;
        let decoded: QueryResponse<T> = serde_json::from_str(&text)
            .map_err(|source| ContentError::Decode {
                query: query.name,
                source,
            })?;

        tracing::debug!(
            "Fetched {} ({}, cdn={}) in {}ms",
            query.name,
            ctx.perspective.as_param(),
            use_cdn,
            start.elapsed().as_millis()
        );

        Ok(decoded.result)
    }
}

#[async_trait]
impl ContentSource for SanityClient {
    async fn posts(&self, ctx: &QueryContext) -> Result<Vec<PostSummary>, ContentError> {
        let posts = self.fetch(&POSTS, &[], ctx).await?;
        Ok(posts.unwrap_or_default())
    }

    async fn post(&self, ctx: &QueryContext, slug: &str) -> Result<Option<Post>, ContentError> {
        self.fetch(&POST, &[("slug", slug)], ctx).await
    }

    async fn post_slugs(&self) -> Result<Vec<PostSlug>, ContentError> {
        let slugs = self
            .fetch(&POST_SLUGS, &[], &QueryContext::published())
            .await?;
        Ok(slugs.unwrap_or_default())
    }

    async fn page(&self, ctx: &QueryContext, slug: &str) -> Result<Option<Page>, ContentError> {
        self.fetch(&PAGE, &[("slug", slug)], ctx).await
    }

    async fn home_page(&self, ctx: &QueryContext) -> Result<Option<SiteSettings>, ContentError> {
        self.fetch(&HOME_PAGE, &[], ctx).await
    }
}
