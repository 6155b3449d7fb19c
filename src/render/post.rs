//! Post page and post card components

use super::components::{categories, title};
use super::{present, text, Renderer};
use crate::content::{MissingSlug, Post, PostSummary, RelatedPost};
use crate::helpers::{html_escape, image_tag, link_to, post_path, POSTS_PATH};

/// A listed post that is known to be linkable
#[derive(Debug, Clone, Copy)]
pub struct PostCard<'a> {
    post: &'a PostSummary,
    slug: &'a str,
}

impl<'a> TryFrom<&'a PostSummary> for PostCard<'a> {
    type Error = MissingSlug;

    fn try_from(post: &'a PostSummary) -> Result<Self, Self::Error> {
        let slug = post.slug().ok_or_else(|| MissingSlug {
            id: post.id.clone(),
        })?;
        Ok(Self { post, slug })
    }
}

impl<'a> PostCard<'a> {
    pub fn slug(&self) -> &'a str {
        self.slug
    }

    /// Route of the post this card links to
    pub fn href(&self) -> String {
        post_path(self.slug)
    }
}

impl Renderer {
    /// Summary card on the posts index
    pub fn post_card(&self, card: &PostCard<'_>) -> String {
        let post = card.post;
        let title = text(&post.title);

        let image = self
            .image_url(post.main_image.as_ref(), |url| url.width(600).height(400))
            .map(|src| {
                let alt = post
                    .main_image
                    .as_ref()
                    .and_then(|img| text(&img.alt))
                    .or(title)
                    .unwrap_or("");
                image_tag(&src, alt, 600, 400, Some("post-card-image"))
            });

        format!(
            concat!(
                r#"<a class="post-card" href="{}"><article>"#,
                r#"<div class="post-card-categories">{}</div>"#,
                r#"<div class="post-card-body"><h2>{}</h2>"#,
                r#"<div class="post-card-meta">{}{}</div></div>"#,
                r#"<div class="post-card-media">{}</div>"#,
                r#"</article></a>"#
            ),
            html_escape(&card.href()),
            categories(&post.categories),
            html_escape(title.unwrap_or("")),
            self.author(post.author.as_ref()),
            self.published_at(post.published_date()),
            image.unwrap_or_default()
        )
    }

    /// Full post
    pub fn post(&self, post: &Post) -> String {
        let figure = present(
            self.image_url(post.main_image.as_ref(), |url| url.width(400).height(300)),
            |src| {
                format!(
                    r#"<figure class="post-image">{}{}</figure>"#,
                    image_tag(&src, "", 400, 300, None),
                    link_to(POSTS_PATH, "&larr; Back to Posts", Some("back-link"))
                )
            },
        );

        let body = present(post.body.as_deref(), |body| {
            format!(
                r#"<div class="post-body prose">{}{}</div>"#,
                self.portable_text(body),
                self.related_posts(&post.related_posts, &post.id, "post")
            )
        });

        format!(
            concat!(
                r#"<article class="post">"#,
                r#"<header><div class="post-meta">{}{}</div>{}{}</header>"#,
                "{}{}",
                "</article>"
            ),
            categories(&post.categories),
            self.published_at(post.published_date()),
            present(text(&post.title), title),
            self.author(post.author.as_ref()),
            figure,
            body
        )
    }

    /// Links to related posts. `document_id`/`document_type` identify the
    /// owning document for interactive editing overlays.
    pub fn related_posts(
        &self,
        related: &[RelatedPost],
        document_id: &str,
        document_type: &str,
    ) -> String {
        let items: String = related
            .iter()
            .filter_map(|post| {
                let slug = post.slug()?;
                let label = text(&post.title).unwrap_or(slug);
                Some(format!(
                    r#"<li data-key="{}">{}</li>"#,
                    html_escape(post.key.as_deref().unwrap_or(slug)),
                    link_to(&post_path(slug), &html_escape(label), None)
                ))
            })
            .collect();

        if items.is_empty() {
            return String::new();
        }

        format!(
            r#"<aside class="related-posts" data-document-id="{}" data-document-type="{}"><h2>Related Posts</h2><ul>{}</ul></aside>"#,
            html_escape(document_id),
            html_escape(document_type),
            items
        )
    }
}
