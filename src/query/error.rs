//! Content query errors

use thiserror::Error;

/// Failure talking to the content backend. Not-found is not an error:
/// single-document queries return `Ok(None)` instead.
#[derive(Debug, Error)]
pub enum ContentError {
    #[error("content request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("content API returned {status}: {body}")]
    Status {
        status: reqwest::StatusCode,
        body: String,
    },

    #[error("failed to decode {query} response: {source}")]
    Decode {
        query: &'static str,
        #[source]
        source: serde_json::Error,
    },

    #[error("draft content requested but no read token is configured")]
    MissingToken,

    #[error("sanity project_id is not configured")]
    MissingProject,
}
