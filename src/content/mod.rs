//! Content module - Sanity document shapes as returned by the query layer
//!
//! Every type here is read-only once fetched. Optional CMS fields are
//! `Option`s or default to empty so that partially authored documents
//! still deserialize.

mod image;
mod page;
mod portable_text;
mod post;

pub use image::{
    has_valid_image_asset, is_image_ready, AssetRef, ImageReadiness, ImageRef, ReadyImage,
};
pub use page::{
    ContentBlock, Faq, FaqsBlock, FeatureItem, FeaturesBlock, HeroBlock, Orientation, Page,
    SiteSettings, SplitImageBlock,
};
pub use portable_text::{MarkDef, PortableBlock, PortableText, Span, TextBlock};
pub use post::{Author, Category, MissingSlug, Post, PostSlug, PostSummary, RelatedPost, Slug};

use serde::{Deserialize, Deserializer};

/// Treat an explicit `null` the same as a missing field
pub(crate) fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}
