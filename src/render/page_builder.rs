//! Page-builder dispatcher
//!
//! Maps a page's ordered content blocks to their renderers. Output order
//! is input order. Block types this build does not know render nothing,
//! so new block types added in the Studio do not break deployed sites.

use std::borrow::Cow;

use super::Renderer;
use crate::content::ContentBlock;
use crate::helpers::html_escape;

/// Identity handed to every block renderer
#[derive(Debug, Clone)]
pub struct BlockContext<'a> {
    /// Stable per-block key (`_key`, or the position when missing)
    pub key: Cow<'a, str>,
    pub block_type: &'static str,
    /// Owning document, passed through for nested interactive widgets
    pub document_id: &'a str,
    pub document_type: &'a str,
}

/// Output of one dispatched block
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedBlock {
    pub key: String,
    pub block_type: &'static str,
    pub html: String,
}

impl Renderer {
    /// Render one block through the renderer for its type
    fn render_block(&self, ctx: &BlockContext<'_>, block: &ContentBlock) -> Option<String> {
        match block {
            ContentBlock::Hero(b) => Some(self.hero(ctx, b)),
            ContentBlock::SplitImage(b) => Some(self.split_image(ctx, b)),
            ContentBlock::Faqs(b) => Some(self.faqs(ctx, b)),
            ContentBlock::Features(b) => Some(self.features(ctx, b)),
            ContentBlock::Unknown => {
                tracing::debug!(
                    "Skipping unsupported block {} on {} {}",
                    ctx.key,
                    ctx.document_type,
                    ctx.document_id
                );
                None
            }
        }
    }

    /// Dispatch every block in order; unknown blocks produce no entry
    pub fn render_blocks(
        &self,
        blocks: &[ContentBlock],
        document_id: &str,
        document_type: &str,
    ) -> Vec<RenderedBlock> {
        blocks
            .iter()
            .enumerate()
            .filter_map(|(index, block)| {
                let key = match block.key() {
                    Some(key) if !key.is_empty() => Cow::Borrowed(key),
                    _ => Cow::Owned(index.to_string()),
                };
                let ctx = BlockContext {
                    key,
                    block_type: block.type_name(),
                    document_id,
                    document_type,
                };
                let html = self.render_block(&ctx, block)?;
                Some(RenderedBlock {
                    key: ctx.key.into_owned(),
                    block_type: ctx.block_type,
                    html,
                })
            })
            .collect()
    }

    /// Render a page's content. Absent content renders nothing.
    pub fn page_builder(
        &self,
        blocks: Option<&[ContentBlock]>,
        document_id: &str,
        document_type: &str,
    ) -> String {
        let Some(blocks) = blocks else {
            return String::new();
        };

        let html: String = self
            .render_blocks(blocks, document_id, document_type)
            .into_iter()
            .map(|block| block.html)
            .collect();

        format!(
            r#"<div class="page-builder" data-document-id="{}" data-document-type="{}">{}</div>"#,
            html_escape(document_id),
            html_escape(document_type),
            html
        )
    }
}

#[cfg(test)]
mod tests {
    use super::super::test_support::renderer;
    use super::*;
    use crate::content::Page;
    use serde_json::json;

    fn page(content: serde_json::Value) -> Page {
        serde_json::from_value(json!({ "_id": "page-1", "_type": "page", "content": content }))
            .unwrap()
    }

    #[test]
    fn test_unknown_blocks_are_skipped_in_order() {
        let page = page(json!([
            { "_type": "hero", "_key": "a", "title": "Hero" },
            { "_type": "unknown", "_key": "b" },
            { "_type": "faqs", "_key": "c", "faqs": [{ "_id": "1", "title": "Q1" }] }
        ]));
        let rendered = renderer().render_blocks(page.blocks().unwrap(), &page.id, &page.kind);

        let types: Vec<_> = rendered.iter().map(|b| b.block_type).collect();
        assert_eq!(types, vec!["hero", "faqs"]);

        let html = renderer().page_builder(page.blocks(), &page.id, &page.kind);
        assert_eq!(html.matches("<section").count(), 2);
        let hero = html.find(r#"data-block-type="hero""#).unwrap();
        let faqs = html.find(r#"data-block-type="faqs""#).unwrap();
        assert!(hero < faqs);
        assert!(html.contains("Q1"));
    }

    #[test]
    fn test_order_and_duplicates_preserved() {
        let page = page(json!([
            { "_type": "features", "_key": "f1" },
            { "_type": "hero", "_key": "h1" },
            { "_type": "features", "_key": "f1" },
            { "_type": "splitImage", "_key": "s1" }
        ]));
        let rendered = renderer().render_blocks(page.blocks().unwrap(), "page-1", "page");
        let keys: Vec<_> = rendered.iter().map(|b| b.key.as_str()).collect();
        assert_eq!(keys, vec!["f1", "h1", "f1", "s1"]);
    }

    #[test]
    fn test_missing_key_uses_position() {
        let page = page(json!([
            { "_type": "carousel" },
            { "_type": "hero", "title": "No key" }
        ]));
        let rendered = renderer().render_blocks(page.blocks().unwrap(), "page-1", "page");
        assert_eq!(rendered.len(), 1);
        assert_eq!(rendered[0].key, "1");
    }

    #[test]
    fn test_absent_content_renders_nothing() {
        assert_eq!(renderer().page_builder(None, "page-1", "page"), "");
        let html = renderer().page_builder(Some(&[]), "page-1", "page");
        assert_eq!(
            html,
            r#"<div class="page-builder" data-document-id="page-1" data-document-type="page"></div>"#
        );
    }

    #[test]
    fn test_output_never_exceeds_input() {
        let page = page(json!([
            { "_type": "a" }, { "_type": "b" }, { "_type": "hero" }
        ]));
        let blocks = page.blocks().unwrap();
        let rendered = renderer().render_blocks(blocks, "page-1", "page");
        assert!(rendered.len() <= blocks.len());
        assert_eq!(rendered.len(), 1);
    }
}
