//! URL helper functions

use percent_encoding::{utf8_percent_encode, AsciiSet, CONTROLS};

use crate::config::SiteConfig;

/// Characters escaped inside a single path segment
const SEGMENT: &AsciiSet = &CONTROLS
    .add(b' ')
    .add(b'"')
    .add(b'#')
    .add(b'%')
    .add(b'/')
    .add(b'<')
    .add(b'>')
    .add(b'?')
    .add(b'`')
    .add(b'{')
    .add(b'}');

/// Index of all posts
pub const POSTS_PATH: &str = "/posts";

/// Encode a value for use as one URL path segment
pub fn encode_segment(segment: &str) -> String {
    utf8_percent_encode(segment, SEGMENT).to_string()
}

/// Route of a post detail page
///
/// # Examples
/// ```ignore
/// post_path("hello") // -> "/posts/hello"
/// ```
pub fn post_path(slug: &str) -> String {
    format!("{}/{}", POSTS_PATH, encode_segment(slug))
}

/// Route of a builder page
pub fn page_path(slug: &str) -> String {
    format!("/{}", encode_segment(slug))
}

/// Generate a full URL including the domain
///
/// # Examples
/// ```ignore
/// full_url_for(&config, "/posts/") // -> "https://example.com/posts/"
/// ```
pub fn full_url_for(config: &SiteConfig, path: &str) -> String {
    let base = config.url.trim_end_matches('/');
    format!("{}/{}", base, path.trim_start_matches('/'))
}

/// Only same-origin absolute paths are accepted as redirect targets
pub fn is_local_path(path: &str) -> bool {
    path.starts_with('/') && !path.starts_with("//") && !path.contains('\\')
}

/// Link targets allowed in authored content: relative, `http(s):` or `mailto:`
pub fn is_safe_href(href: &str) -> bool {
    let href = href.trim();
    match href.find([':', '/', '?', '#']) {
        Some(i) if href[i..].starts_with(':') => matches!(
            href[..i].to_ascii_lowercase().as_str(),
            "http" | "https" | "mailto"
        ),
        _ => true,
    }
}
