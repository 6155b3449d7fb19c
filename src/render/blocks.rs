//! Block renderers, one per content block type
//!
//! Each renderer produces exactly one `<section>` carrying the block key
//! and type.

use super::page_builder::BlockContext;
use super::{present, text, FaqAccordion, Renderer};
use crate::content::{
    Faq, FaqsBlock, FeaturesBlock, HeroBlock, Orientation, SplitImageBlock,
};
use crate::helpers::{html_escape, image_tag};

fn section(ctx: &BlockContext<'_>, class: &str, inner: String) -> String {
    format!(
        r#"<section class="block {}" data-block-key="{}" data-block-type="{}">{}</section>"#,
        class,
        html_escape(&ctx.key),
        ctx.block_type,
        inner
    )
}

impl Renderer {
    pub fn hero(&self, ctx: &BlockContext<'_>, block: &HeroBlock) -> String {
        let inner = format!(
            r#"<div class="hero-copy">{}{}</div>{}"#,
            present(text(&block.title), |title| format!(
                "<h1>{}</h1>",
                html_escape(title)
            )),
            present(block.text.as_deref(), |body| format!(
                r#"<div class="prose">{}</div>"#,
                self.portable_text(body)
            )),
            present(
                self.image_url(block.image.as_ref(), |url| url.width(1600).height(800)),
                |src| {
                    let alt = block.image.as_ref().and_then(|i| text(&i.alt)).unwrap_or("");
                    image_tag(&src, alt, 1600, 800, Some("hero-image"))
                }
            )
        );
        section(ctx, "hero", inner)
    }

    pub fn split_image(&self, ctx: &BlockContext<'_>, block: &SplitImageBlock) -> String {
        let orientation = match block.orientation {
            Orientation::ImageLeft => "image-left",
            Orientation::ImageRight => "image-right",
        };
        let figure = present(
            self.image_url(block.image.as_ref(), |url| url.width(800).height(600)),
            |src| {
                let alt = block.image.as_ref().and_then(|i| text(&i.alt)).unwrap_or("");
                format!(
                    r#"<figure class="split-image-media">{}</figure>"#,
                    image_tag(&src, alt, 800, 600, None)
                )
            },
        );
        let copy = format!(
            r#"<div class="split-image-copy">{}</div>"#,
            present(text(&block.title), |title| format!(
                "<h2>{}</h2>",
                html_escape(title)
            ))
        );

        let inner = match block.orientation {
            Orientation::ImageLeft => format!("{}{}", figure, copy),
            Orientation::ImageRight => format!("{}{}", copy, figure),
        };
        section(ctx, &format!("split-image {}", orientation), inner)
    }

    pub fn features(&self, ctx: &BlockContext<'_>, block: &FeaturesBlock) -> String {
        let grid = present(block.features.as_deref(), |features| {
            let cards: String = features
                .iter()
                .map(|feature| {
                    format!(
                        r#"<div class="feature">{}{}</div>"#,
                        present(text(&feature.title), |t| format!(
                            "<h3>{}</h3>",
                            html_escape(t)
                        )),
                        present(text(&feature.text), |t| format!(
                            "<p>{}</p>",
                            html_escape(t)
                        ))
                    )
                })
                .collect();
            format!(r#"<div class="features-grid">{}</div>"#, cards)
        });

        let inner = format!(
            "{}{}",
            present(text(&block.title), |title| format!(
                "<h2>{}</h2>",
                html_escape(title)
            )),
            grid
        );
        section(ctx, "features", inner)
    }

    /// FAQs block with every item collapsed
    pub fn faqs(&self, ctx: &BlockContext<'_>, block: &FaqsBlock) -> String {
        self.faq_accordion(ctx, block, &FaqAccordion::new(block))
    }

    /// FAQs block rendered from an explicit disclosure state
    pub fn faq_accordion(
        &self,
        ctx: &BlockContext<'_>,
        block: &FaqsBlock,
        accordion: &FaqAccordion<'_>,
    ) -> String {
        let list = present(block.faqs.as_ref(), |_| {
            let items: String = accordion
                .items()
                .map(|(faq, state)| self.faq_item(faq, state.is_open()))
                .collect();
            format!(r#"<div class="faq-list">{}</div>"#, items)
        });

        let inner = format!(
            "{}{}",
            present(text(&block.title), |title| format!(
                "<h2>{}</h2>",
                html_escape(title)
            )),
            list
        );
        section(ctx, "faqs", inner)
    }

    fn faq_item(&self, faq: &Faq, open: bool) -> String {
        let title = text(&faq.title).unwrap_or("");
        let image = present(
            self.image_url(faq.image.as_ref(), |url| {
                url.width(600).height(400).quality(80).auto_format()
            }),
            |src| {
                let alt = faq
                    .image
                    .as_ref()
                    .and_then(|i| text(&i.alt))
                    .or(text(&faq.title))
                    .unwrap_or("FAQ image");
                format!(
                    r#"<div class="faq-image">{}</div>"#,
                    image_tag(&src, alt, 600, 400, None)
                )
            },
        );

        format!(
            concat!(
                r#"<details class="faq" data-faq-id="{}"{}>"#,
                r#"<summary>{}<span class="faq-icon" aria-hidden="true">&larr;</span></summary>"#,
                r#"<div class="faq-body">{}{}</div>"#,
                "</details>"
            ),
            html_escape(faq.id.as_deref().unwrap_or("")),
            if open { " open" } else { "" },
            html_escape(title),
            image,
            present(faq.body.as_deref(), |body| self.portable_text(body))
        )
    }
}

#[cfg(test)]
mod tests {
    use super::super::test_support::renderer;
    use super::*;
    use serde_json::json;
    use std::borrow::Cow;

    fn ctx(block_type: &'static str) -> BlockContext<'static> {
        BlockContext {
            key: Cow::Borrowed("k1"),
            block_type,
            document_id: "page-1",
            document_type: "page",
        }
    }

    #[test]
    fn test_hero() {
        let block: HeroBlock = serde_json::from_value(json!({
            "title": "Welcome",
            "text": [{ "_type": "block", "children": [{ "_type": "span", "text": "Hi" }] }],
            "image": { "asset": { "_ref": "image-h-1600x800-jpg" } }
        }))
        .unwrap();
        let html = renderer().hero(&ctx("hero"), &block);
        assert!(html.starts_with(r#"<section class="block hero" data-block-key="k1" data-block-type="hero">"#));
        assert!(html.contains("<h1>Welcome</h1>"));
        assert!(html.contains("<p>Hi</p>"));
        assert!(html.contains("hero-image"));
    }

    #[test]
    fn test_split_image_orientation() {
        let left: SplitImageBlock = serde_json::from_value(json!({
            "title": "Left",
            "image": { "asset": { "_ref": "image-s-800x600-jpg" } }
        }))
        .unwrap();
        let html = renderer().split_image(&ctx("splitImage"), &left);
        assert!(html.contains("image-left"));
        assert!(html.find("<figure").unwrap() < html.find("<h2>").unwrap());

        let right = SplitImageBlock {
            orientation: Orientation::ImageRight,
            ..left
        };
        let html = renderer().split_image(&ctx("splitImage"), &right);
        assert!(html.contains("image-right"));
        assert!(html.find("<h2>").unwrap() < html.find("<figure").unwrap());
    }

    #[test]
    fn test_features() {
        let block: FeaturesBlock = serde_json::from_value(json!({
            "title": "Why",
            "features": [
                { "_key": "a", "title": "Fast", "text": "Very" },
                { "_key": "b", "title": "Safe" }
            ]
        }))
        .unwrap();
        let html = renderer().features(&ctx("features"), &block);
        assert_eq!(html.matches(r#"class="feature""#).count(), 2);
        assert!(html.contains("<p>Very</p>"));
    }

    #[test]
    fn test_faqs_filter_and_independent_disclosures() {
        let block: FaqsBlock = serde_json::from_value(json!({
            "title": "Questions",
            "faqs": [
                { "_id": "1", "title": "Q1" },
                { "_id": "2" },
                null,
                { "_id": "3", "title": "Q3", "image": { "asset": { "_ref": "image-f-600x400-png" }, "_upload": {} } }
            ]
        }))
        .unwrap();
        let html = renderer().faqs(&ctx("faqs"), &block);
        assert_eq!(html.matches("<details").count(), 2);
        assert!(!html.contains(" open>"));
        assert!(!html.contains("name="));
        assert!(!html.contains("<img"));

        let mut accordion = FaqAccordion::new(&block);
        accordion.toggle("3");
        let html = renderer().faq_accordion(&ctx("faqs"), &block, &accordion);
        assert!(html.contains(r#"<details class="faq" data-faq-id="1">"#));
        assert!(html.contains(r#"<details class="faq" data-faq-id="3" open>"#));
    }

    #[test]
    fn test_faq_image_alt_fallback() {
        let block: FaqsBlock = serde_json::from_value(json!({
            "faqs": [{
                "_id": "1",
                "title": "Q1",
                "image": { "asset": { "_ref": "image-f-600x400-png" } }
            }]
        }))
        .unwrap();
        let html = renderer().faqs(&ctx("faqs"), &block);
        assert!(html.contains(r#"alt="Q1""#));
        assert!(html.contains("q=80&amp;auto=format"));
    }

    #[test]
    fn test_faqs_without_array() {
        let block: FaqsBlock = serde_json::from_value(json!({ "title": "Empty" })).unwrap();
        let html = renderer().faqs(&ctx("faqs"), &block);
        assert!(html.contains("<h2>Empty</h2>"));
        assert!(!html.contains("faq-list"));
    }
}
