//! HTML rendering of content
//!
//! Components are plain functions from content to markup. Optional
//! sub-sections all go through [`present`], so a missing author, image
//! or category list renders nothing instead of a placeholder.

mod blocks;
mod components;
mod faq;
mod page_builder;
mod portable_text;
mod post;

pub use components::{disable_draft_mode, header, title, DISABLE_DRAFT_MODE_PATH};
pub use faq::{DisclosureState, FaqAccordion};
pub use page_builder::{BlockContext, RenderedBlock};
pub use post::PostCard;

use chrono_tz::Tz;

use crate::config::SiteConfig;
use crate::content::ImageRef;
use crate::helpers::{ImageUrl, ImageUrlBuilder};

/// Render `value` with `render` when present, otherwise nothing
pub fn present<T>(value: Option<T>, render: impl FnOnce(T) -> String) -> String {
    value.map(render).unwrap_or_default()
}

/// A string field counts as present only when non-empty
pub fn text(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|s| !s.trim().is_empty())
}

/// Site-wide rendering settings shared by all components
#[derive(Debug, Clone)]
pub struct Renderer {
    images: ImageUrlBuilder,
    timezone: Option<Tz>,
}

impl Renderer {
    pub fn new(config: &SiteConfig) -> Self {
        Self {
            images: ImageUrlBuilder::new(&config.sanity),
            timezone: config.display_timezone(),
        }
    }

    pub fn timezone(&self) -> Option<Tz> {
        self.timezone
    }

    /// CDN URL for an image that passes the readiness guard.
    ///
    /// `None` for pending uploads, missing assets and malformed refs.
    pub fn image_url<'a, F>(&'a self, image: Option<&'a ImageRef>, options: F) -> Option<String>
    where
        F: FnOnce(ImageUrl<'a>) -> ImageUrl<'a>,
    {
        let ready = image?.ready()?;
        match options(self.images.image(ready)).url() {
            Ok(url) => Some(url),
            Err(e) => {
                tracing::warn!("Skipping image: {}", e);
                None
            }
        }
    }
}


#[cfg(test)]
mod tests {
    use super::test_support::renderer;
    use super::*;
    use serde_json::json;

    #[test]
    fn test_present() {
        assert_eq!(present(Some("x"), |v| format!("<b>{}</b>", v)), "<b>x</b>");
        assert_eq!(present(None::<&str>, |v| v.to_string()), "");
    }

    #[test]
    fn test_text() {
        assert_eq!(text(&Some("hi".to_string())), Some("hi"));
        assert_eq!(text(&Some("  ".to_string())), None);
        assert_eq!(text(&None), None);
    }

    #[test]
    fn test_image_url_is_guarded() {
        let renderer = renderer();
        let ready: ImageRef =
            serde_json::from_value(json!({ "asset": { "_ref": "image-a-10x10-png" } })).unwrap();
        let uploading: ImageRef = serde_json::from_value(json!({
            "asset": { "_ref": "image-a-10x10-png" },
            "_upload": { "progress": 10 }
        }))
        .unwrap();
        let malformed: ImageRef =
            serde_json::from_value(json!({ "asset": { "_ref": "image-" } })).unwrap();

        assert!(renderer.image_url(Some(&ready), |u| u.width(5)).is_some());
        assert!(renderer.image_url(Some(&uploading), |u| u).is_none());
        assert!(renderer.image_url(Some(&malformed), |u| u).is_none());
        assert!(renderer.image_url(None, |u| u).is_none());
    }
}
