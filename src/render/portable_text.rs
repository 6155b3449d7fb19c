//! Portable text to HTML

use super::Renderer;
use crate::content::{PortableBlock, Span, TextBlock};
use crate::helpers::{html_escape, is_safe_href};

impl Renderer {
    /// Render a rich-text value. Unknown block kinds are skipped.
    pub fn portable_text(&self, blocks: &[PortableBlock]) -> String {
        let mut out = String::new();
        let mut lists: Vec<OpenList> = Vec::new();

        for block in blocks {
            match block {
                PortableBlock::Text(b) if b.list_item.is_some() => {
                    let tag = list_tag(b.list_item.as_deref());
                    let level = b.level.unwrap_or(1).max(1) as usize;

                    while lists.len() > level {
                        close_list(&mut out, &mut lists);
                    }
                    if lists.len() == level && lists[level - 1].tag != tag {
                        close_list(&mut out, &mut lists);
                    }
                    if lists.len() == level {
                        if let Some(current) = lists.last_mut() {
                            close_item(&mut out, current);
                        }
                    }
                    // Deeper lists open inside the still-open parent item
                    while lists.len() < level {
                        out.push_str(&format!("<{}>", tag));
                        lists.push(OpenList {
                            tag,
                            item_open: false,
                        });
                    }
                    out.push_str(&format!("<li>{}", spans(b)));
                    if let Some(current) = lists.last_mut() {
                        current.item_open = true;
                    }
                }
                PortableBlock::Text(b) => {
                    close_all(&mut out, &mut lists);
                    let tag = block_tag(b.style.as_deref());
                    out.push_str(&format!("<{0}>{1}</{0}>", tag, spans(b)));
                }
                PortableBlock::Image(image) => {
                    close_all(&mut out, &mut lists);
                    if let Some(src) = self.image_url(Some(image), |url| url.width(800).auto_format())
                    {
                        let ready = image.ready();
                        let alt = ready.and_then(|r| r.alt()).unwrap_or("");
                        out.push_str(&format!(
                            r#"<figure><img src="{}" alt="{}" loading="lazy"></figure>"#,
                            html_escape(&src),
                            html_escape(alt)
                        ));
                    }
                }
                PortableBlock::Unknown => {}
            }
        }

        close_all(&mut out, &mut lists);
        out
    }
}

/// A list being emitted and whether its last `<li>` is still open
struct OpenList {
    tag: &'static str,
    item_open: bool,
}

fn list_tag(list_item: Option<&str>) -> &'static str {
    match list_item {
        Some("number") => "ol",
        _ => "ul",
    }
}

fn block_tag(style: Option<&str>) -> &'static str {
    match style {
        Some("h1") => "h1",
        Some("h2") => "h2",
        Some("h3") => "h3",
        Some("h4") => "h4",
        Some("h5") => "h5",
        Some("h6") => "h6",
        Some("blockquote") => "blockquote",
        _ => "p",
    }
}

fn close_item(out: &mut String, list: &mut OpenList) {
    if list.item_open {
        out.push_str("</li>");
        list.item_open = false;
    }
}

fn close_list(out: &mut String, lists: &mut Vec<OpenList>) {
    if let Some(mut list) = lists.pop() {
        close_item(out, &mut list);
        out.push_str(&format!("</{}>", list.tag));
    }
}

fn close_all(out: &mut String, lists: &mut Vec<OpenList>) {
    while !lists.is_empty() {
        close_list(out, lists);
    }
}

fn spans(block: &TextBlock) -> String {
    block.children.iter().map(|span| span_html(block, span)).collect()
}

fn span_html(block: &TextBlock, span: &Span) -> String {
    let mut html = html_escape(span.text.as_deref().unwrap_or("")).replace('\n', "<br>");

    for mark in &span.marks {
        html = match mark.as_str() {
            "strong" => format!("<strong>{}</strong>", html),
            "em" => format!("<em>{}</em>", html),
            "code" => format!("<code>{}</code>", html),
            "underline" => format!("<u>{}</u>", html),
            "strike-through" => format!("<s>{}</s>", html),
            key => match block.mark_def(key) {
                Some(def) if def.kind == "link" => match def.href.as_deref() {
                    Some(href) if is_safe_href(href) => {
                        format!(r#"<a href="{}">{}</a>"#, html_escape(href), html)
                    }
                    Some(href) => {
                        tracing::warn!("Dropping link with unsupported scheme: {:?}", href);
                        html
                    }
                    None => html,
                },
                _ => html,
            },
        };
    }

    html
}
