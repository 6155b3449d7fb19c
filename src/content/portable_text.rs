//! Portable text (Sanity rich text) structures

use serde::{Deserialize, Serialize};

use super::{null_as_default, ImageRef};

/// A rich-text value: an ordered list of blocks
pub type PortableText = Vec<PortableBlock>;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "_type")]
pub enum PortableBlock {
    #[serde(rename = "block")]
    Text(TextBlock),
    #[serde(rename = "image")]
    Image(ImageRef),
    #[serde(other)]
    Unknown,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct TextBlock {
    #[serde(rename = "_key")]
    pub key: Option<String>,
    pub style: Option<String>,
    /// `bullet` or `number` when the block is a list item
    pub list_item: Option<String>,
    pub level: Option<u32>,
    #[serde(deserialize_with = "null_as_default")]
    pub children: Vec<Span>,
    #[serde(deserialize_with = "null_as_default")]
    pub mark_defs: Vec<MarkDef>,
}

/// An inline run of text with decorator and annotation marks
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Span {
    #[serde(rename = "_type")]
    pub kind: Option<String>,
    pub text: Option<String>,
    #[serde(deserialize_with = "null_as_default")]
    pub marks: Vec<String>,
}

/// Annotation definition referenced by a span mark key
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MarkDef {
    #[serde(rename = "_key")]
    pub key: String,
    #[serde(rename = "_type")]
    pub kind: String,
    pub href: Option<String>,
}

impl TextBlock {
    pub fn mark_def(&self, key: &str) -> Option<&MarkDef> {
        self.mark_defs.iter().find(|def| def.key == key)
    }

    /// Concatenated text of all spans
    pub fn plain_text(&self) -> String {
        self.children
            .iter()
            .filter_map(|span| span.text.as_deref())
            .collect()
    }
}
