//! HTTP server rendering pages from the content backend on each request

use anyhow::Result;
use axum::{
    extract::{Path as UrlPath, Query, State},
    http::{header, HeaderMap, StatusCode},
    response::{Html, IntoResponse, Redirect, Response},
    routing::get,
    Router,
};
use percent_encoding::{utf8_percent_encode, NON_ALPHANUMERIC};
use serde::Deserialize;
use subtle::ConstantTimeEq;
use std::net::SocketAddr;
use std::path::Path;
use std::sync::Arc;
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;

use crate::generator::Generator;
use crate::helpers::is_local_path;
use crate::query::{ContentError, ContentSource, QueryContext};
use crate::render::DISABLE_DRAFT_MODE_PATH;
use crate::Site;

/// Cookie carrying the draft-mode grant
pub const DRAFT_MODE_COOKIE: &str = "sanity_draft_mode";

pub const ENABLE_DRAFT_MODE_PATH: &str = "/api/draft-mode/enable";

/// Errors a page handler can end in
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("not found")]
    NotFound,
    #[error("content backend: {0}")]
    Content(#[from] ContentError),
    #[error(transparent)]
    Render(#[from] anyhow::Error),
}

impl AppError {
    fn status(&self) -> StatusCode {
        match self {
            AppError::NotFound => StatusCode::NOT_FOUND,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

/// Plain response, used when the styled error pages cannot be rendered
impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        let body = match self {
            AppError::NotFound => "Not found",
            _ => "Server error",
        };
        (status, body).into_response()
    }
}

/// Server state shared by all handlers. Read-only after startup.
pub struct AppState {
    source: Arc<dyn ContentSource>,
    generator: Generator,
    preview_secret: Option<String>,
}

impl AppState {
    pub fn new(
        source: Arc<dyn ContentSource>,
        generator: Generator,
        preview_secret: Option<String>,
    ) -> Self {
        Self {
            source,
            generator,
            preview_secret: preview_secret.filter(|s| !s.is_empty()),
        }
    }

    /// Whether the request carries a valid draft-mode cookie
    fn draft_mode(&self, headers: &HeaderMap) -> bool {
        let Some(secret) = self.preview_secret.as_deref() else {
            return false;
        };
        cookie_value(headers, DRAFT_MODE_COOKIE)
            .is_some_and(|given| secrets_match(&cookie_token(secret), given))
    }

    fn respond(&self, draft_mode: bool, result: Result<String, AppError>) -> Response {
        match result {
            Ok(html) => Html(html).into_response(),
            Err(err) => self.error_response(err, draft_mode),
        }
    }

    fn error_response(&self, err: AppError, draft_mode: bool) -> Response {
        let page = match &err {
            AppError::NotFound => self.generator.not_found(draft_mode),
            _ => {
                tracing::error!("Request failed: {}", err);
                self.generator.error_page()
            }
        };

        match page {
            Ok(html) => (err.status(), Html(html)).into_response(),
            Err(e) => {
                tracing::error!("Failed to render error page: {}", e);
                err.into_response()
            }
        }
    }
}

type SharedState = Arc<AppState>;

/// Build the application router
pub fn router(state: SharedState, static_dir: &Path) -> Router {
    Router::new()
        .route("/", get(home))
        .route("/posts", get(posts_index))
        .route("/posts/:slug", get(post_detail))
        .route(ENABLE_DRAFT_MODE_PATH, get(enable_draft_mode))
        .route(DISABLE_DRAFT_MODE_PATH, get(disable_draft_mode))
        .route("/:slug", get(builder_page))
        .nest_service("/static", ServeDir::new(static_dir))
        .fallback(fallback_handler)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Start the server
pub async fn start(site: &Site, ip: &str, port: u16) -> Result<()> {
    let state = Arc::new(AppState::new(
        Arc::new(site.client()?),
        Generator::new(&site.config)?,
        site.config.sanity.preview_secret.clone(),
    ));
    let app = router(state, &site.static_dir);

    // Parse address - handle "localhost" specially
    let bind_ip = if ip == "localhost" { "127.0.0.1" } else { ip };
    let addr: SocketAddr = format!("{}:{}", bind_ip, port).parse()?;

    println!("Server running at http://{}:{}", ip, port);
    println!("Press Ctrl+C to stop.");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

async fn home(State(state): State<SharedState>, headers: HeaderMap) -> Response {
    let draft_mode = state.draft_mode(&headers);
    let result = render_home(&state, draft_mode).await;
    state.respond(draft_mode, result)
}

async fn render_home(state: &AppState, draft_mode: bool) -> Result<String, AppError> {
    let ctx = QueryContext::from_draft_mode(draft_mode);
    let settings = state.source.home_page(&ctx).await?;
    Ok(state.generator.home(settings.as_ref(), draft_mode)?)
}

async fn posts_index(State(state): State<SharedState>, headers: HeaderMap) -> Response {
    let draft_mode = state.draft_mode(&headers);
    let result = render_posts_index(&state, draft_mode).await;
    state.respond(draft_mode, result)
}

async fn render_posts_index(state: &AppState, draft_mode: bool) -> Result<String, AppError> {
    let ctx = QueryContext::from_draft_mode(draft_mode);
    let posts = state.source.posts(&ctx).await?;
    Ok(state.generator.posts_index(&posts, draft_mode)?)
}

async fn post_detail(
    State(state): State<SharedState>,
    UrlPath(slug): UrlPath<String>,
    headers: HeaderMap,
) -> Response {
    let draft_mode = state.draft_mode(&headers);
    let result = render_post(&state, &slug, draft_mode).await;
    state.respond(draft_mode, result)
}

async fn render_post(state: &AppState, slug: &str, draft_mode: bool) -> Result<String, AppError> {
    let ctx = QueryContext::from_draft_mode(draft_mode);
    let post = state.source.post(&ctx, slug).await?.ok_or(AppError::NotFound)?;
    Ok(state.generator.post_page(&post, slug, draft_mode)?)
}

async fn builder_page(
    State(state): State<SharedState>,
    UrlPath(slug): UrlPath<String>,
    headers: HeaderMap,
) -> Response {
    let draft_mode = state.draft_mode(&headers);
    let result = render_page(&state, &slug, draft_mode).await;
    state.respond(draft_mode, result)
}

async fn render_page(state: &AppState, slug: &str, draft_mode: bool) -> Result<String, AppError> {
    let ctx = QueryContext::from_draft_mode(draft_mode);
    let page = state.source.page(&ctx, slug).await?.ok_or(AppError::NotFound)?;
    Ok(state.generator.builder_page(&page, draft_mode)?)
}

async fn fallback_handler(State(state): State<SharedState>, headers: HeaderMap) -> Response {
    let draft_mode = state.draft_mode(&headers);
    state.error_response(AppError::NotFound, draft_mode)
}

#[derive(Debug, Deserialize)]
struct EnableParams {
    secret: Option<String>,
    redirect: Option<String>,
}

/// Grant draft mode to a caller holding the preview secret
async fn enable_draft_mode(
    State(state): State<SharedState>,
    Query(params): Query<EnableParams>,
) -> Response {
    let secret = match (state.preview_secret.as_deref(), params.secret.as_deref()) {
        (Some(expected), Some(given)) if secrets_match(expected, given) => expected,
        _ => {
            tracing::warn!("Rejected draft mode request");
            return (StatusCode::UNAUTHORIZED, "Invalid secret").into_response();
        }
    };

    let target = params
        .redirect
        .filter(|r| is_local_path(r))
        .unwrap_or_else(|| "/".to_string());
    let cookie = format!(
        "{}={}; Path=/; HttpOnly; SameSite=Lax",
        DRAFT_MODE_COOKIE,
        cookie_token(secret)
    );

    tracing::info!("Draft mode enabled, redirecting to {}", target);
    ([(header::SET_COOKIE, cookie)], Redirect::temporary(&target)).into_response()
}

async fn disable_draft_mode() -> Response {
    let cookie = format!(
        "{}=; Path=/; HttpOnly; SameSite=Lax; Max-Age=0",
        DRAFT_MODE_COOKIE
    );
    ([(header::SET_COOKIE, cookie)], Redirect::temporary("/")).into_response()
}

/// Cookie-safe form of the preview secret
fn cookie_token(secret: &str) -> String {
    utf8_percent_encode(secret, NON_ALPHANUMERIC).to_string()
}

/// Constant-time comparison for secret material
fn secrets_match(expected: &str, given: &str) -> bool {
    expected.as_bytes().ct_eq(given.as_bytes()).into()
}

fn cookie_value<'h>(headers: &'h HeaderMap, name: &str) -> Option<&'h str> {
    headers
        .get_all(header::COOKIE)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .flat_map(|value| value.split(';'))
        .filter_map(|pair| pair.trim().split_once('='))
        .find(|(key, _)| *key == name)
        .map(|(_, value)| value)
}
