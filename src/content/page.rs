//! Page-builder documents: pages, content blocks and site settings

use serde::{Deserialize, Deserializer, Serialize};

use super::{null_as_default, ImageRef, PortableText, Slug};

/// A page assembled from content blocks
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Page {
    #[serde(rename = "_id")]
    pub id: String,
    #[serde(rename = "_type")]
    pub kind: String,
    pub title: Option<String>,
    pub slug: Option<Slug>,
    #[serde(deserialize_with = "lenient_blocks")]
    pub content: Option<Vec<ContentBlock>>,
}

/// One element of a page's `content` array, discriminated by `_type`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "_type")]
pub enum ContentBlock {
    #[serde(rename = "hero")]
    Hero(HeroBlock),
    #[serde(rename = "splitImage")]
    SplitImage(SplitImageBlock),
    #[serde(rename = "faqs")]
    Faqs(FaqsBlock),
    #[serde(rename = "features")]
    Features(FeaturesBlock),
    /// Any block type this build does not know how to render
    #[serde(other)]
    Unknown,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HeroBlock {
    #[serde(rename = "_key")]
    pub key: Option<String>,
    pub title: Option<String>,
    pub text: Option<PortableText>,
    pub image: Option<ImageRef>,
}

/// Which side of a split-image block the image sits on
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum Orientation {
    #[default]
    #[serde(rename = "imageLeft")]
    ImageLeft,
    #[serde(rename = "imageRight")]
    ImageRight,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SplitImageBlock {
    #[serde(rename = "_key")]
    pub key: Option<String>,
    pub title: Option<String>,
    pub image: Option<ImageRef>,
    #[serde(deserialize_with = "null_as_default")]
    pub orientation: Orientation,
}

/// A referenced FAQ document
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Faq {
    #[serde(rename = "_id")]
    pub id: Option<String>,
    pub title: Option<String>,
    pub body: Option<PortableText>,
    pub image: Option<ImageRef>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FaqsBlock {
    #[serde(rename = "_key")]
    pub key: Option<String>,
    pub title: Option<String>,
    /// Dangling references come back as `null` entries
    pub faqs: Option<Vec<Option<Faq>>>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FeatureItem {
    #[serde(rename = "_key")]
    pub key: Option<String>,
    pub title: Option<String>,
    pub text: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FeaturesBlock {
    #[serde(rename = "_key")]
    pub key: Option<String>,
    pub title: Option<String>,
    pub features: Option<Vec<FeatureItem>>,
}

/// The `siteSettings` singleton projected by `HOME_PAGE_QUERY`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct SiteSettings {
    pub home_page: Option<Page>,
}

impl ContentBlock {
    /// The `_type` tag this block was authored with
    pub fn type_name(&self) -> &'static str {
        match self {
            ContentBlock::Hero(_) => "hero",
            ContentBlock::SplitImage(_) => "splitImage",
            ContentBlock::Faqs(_) => "faqs",
            ContentBlock::Features(_) => "features",
            ContentBlock::Unknown => "unknown",
        }
    }

    pub fn key(&self) -> Option<&str> {
        match self {
            ContentBlock::Hero(b) => b.key.as_deref(),
            ContentBlock::SplitImage(b) => b.key.as_deref(),
            ContentBlock::Faqs(b) => b.key.as_deref(),
            ContentBlock::Features(b) => b.key.as_deref(),
            ContentBlock::Unknown => None,
        }
    }
}

impl Faq {
    /// Both `_id` and `title` are present and non-empty
    pub fn is_complete(&self) -> bool {
        let filled = |v: &Option<String>| v.as_deref().is_some_and(|s| !s.is_empty());
        filled(&self.id) && filled(&self.title)
    }
}

impl FaqsBlock {
    /// FAQ entries that can be rendered, in authored order
    pub fn complete_faqs(&self) -> impl Iterator<Item = &Faq> {
        self.faqs
            .iter()
            .flatten()
            .flatten()
            .filter(|faq| faq.is_complete())
    }
}

impl Page {
    pub fn blocks(&self) -> Option<&[ContentBlock]> {
        self.content.as_deref()
    }
}

/// Decode each block on its own so a malformed block degrades to
/// `Unknown` instead of failing the whole page.
fn lenient_blocks<'de, D>(deserializer: D) -> Result<Option<Vec<ContentBlock>>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw: Option<Vec<serde_json::Value>> = Option::deserialize(deserializer)?;
    Ok(raw.map(|values| {
        values
            .into_iter()
            .map(|value| {
                let tag = value
                    .get("_type")
                    .and_then(|t| t.as_str())
                    .unwrap_or("<missing>")
                    .to_string();
                ContentBlock::deserialize(value).unwrap_or_else(|e| {
                    tracing::warn!("Malformed {} block, skipping: {}", tag, e);
                    ContentBlock::Unknown
                })
            })
            .collect()
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_parse_content_blocks() {
        let page: Page = serde_json::from_value(json!({
            "_id": "home",
            "_type": "page",
            "content": [
                { "_type": "hero", "_key": "h", "title": "Welcome" },
                { "_type": "carousel", "_key": "c", "slides": [] },
                { "_type": "splitImage", "_key": "s", "orientation": "imageRight" },
                { "_type": "faqs", "_key": "f", "faqs": [{ "_id": "1", "title": "Q1" }, null] },
                { "_type": "features", "_key": "x", "features": [{ "_key": "a", "title": "Fast" }] }
            ]
        }))
        .unwrap();

        let blocks = page.blocks().unwrap();
        let types: Vec<_> = blocks.iter().map(ContentBlock::type_name).collect();
        assert_eq!(
            types,
            vec!["hero", "unknown", "splitImage", "faqs", "features"]
        );

        match &blocks[2] {
            ContentBlock::SplitImage(b) => assert_eq!(b.orientation, Orientation::ImageRight),
            other => panic!("unexpected block {:?}", other),
        }
        match &blocks[3] {
            ContentBlock::Faqs(b) => assert_eq!(b.complete_faqs().count(), 1),
            other => panic!("unexpected block {:?}", other),
        }
    }

    #[test]
    fn test_malformed_block_becomes_unknown() {
        let page: Page = serde_json::from_value(json!({
            "_id": "p",
            "content": [
                { "_key": "no-type" },
                { "_type": "hero", "title": 42 },
                { "_type": "hero", "title": "ok" }
            ]
        }))
        .unwrap();
        let blocks = page.blocks().unwrap();
        assert_eq!(blocks[0], ContentBlock::Unknown);
        assert_eq!(blocks[1], ContentBlock::Unknown);
        assert_eq!(blocks[2].type_name(), "hero");
    }

    #[test]
    fn test_null_content_and_orientation() {
        let page: Page = serde_json::from_value(json!({ "_id": "p", "content": null })).unwrap();
        assert!(page.blocks().is_none());

        let split: SplitImageBlock =
            serde_json::from_value(json!({ "orientation": null })).unwrap();
        assert_eq!(split.orientation, Orientation::ImageLeft);
    }

    #[test]
    fn test_complete_faq_filter() {
        let block: FaqsBlock = serde_json::from_value(json!({
            "faqs": [
                { "_id": "1", "title": "Q1" },
                { "_id": "2" },
                { "title": "Q3" },
                { "_id": "4", "title": "" },
                null,
                { "_id": "5", "title": "Q5" }
            ]
        }))
        .unwrap();
        let ids: Vec<_> = block
            .complete_faqs()
            .map(|f| f.id.as_deref().unwrap())
            .collect();
        assert_eq!(ids, vec!["1", "5"]);
    }

    #[test]
    fn test_site_settings() {
        let settings: SiteSettings = serde_json::from_value(json!({
            "homePage": { "_id": "home", "_type": "page", "content": [] }
        }))
        .unwrap();
        assert_eq!(settings.home_page.unwrap().id, "home");
    }
}
