//! Leaf components: title, author, categories, dates, header

use super::{present, text, Renderer};
use crate::config::SiteConfig;
use crate::content::{Author, Category};
use crate::helpers::{html_escape, image_tag, link_to, time_tag, Fit, POSTS_PATH};

/// Endpoint that leaves draft mode
pub const DISABLE_DRAFT_MODE_PATH: &str = "/api/draft-mode/disable";

/// Page heading
pub fn title(value: &str) -> String {
    format!(r#"<h1 class="title">{}</h1>"#, html_escape(value))
}

/// Category pills, one per category that has a title
pub fn categories(categories: &[Category]) -> String {
    categories
        .iter()
        .map(|category| {
            present(text(&category.title), |title| {
                format!(
                    r#"<span class="category" data-category-id="{}">{}</span>"#,
                    html_escape(&category.id),
                    html_escape(title)
                )
            })
        })
        .collect()
}

/// Site header with navigation
pub fn header(config: &SiteConfig) -> String {
    let logo = present(config.logo.as_deref(), |src| {
        image_tag(src, &config.logo_alt, 32, 32, Some("logo"))
    });
    let studio = present(config.studio_url.as_deref(), |href| {
        format!("<li>{}</li>", link_to(href, "Studio", Some("nav-link")))
    });

    format!(
        r#"<div class="site-header"><header><div class="brand">{}{}</div><ul class="nav"><li>{}</li>{}</ul></header></div>"#,
        logo,
        link_to("/", &html_escape(&config.title), Some("site-title")),
        link_to(POSTS_PATH, "Posts", Some("nav-link")),
        studio
    )
}

/// Floating link out of draft mode, shown only while previewing
pub fn disable_draft_mode(draft_mode: bool) -> String {
    if !draft_mode {
        return String::new();
    }
    format!(
        r#"<a class="disable-draft-mode" href="{}">Disable Draft Mode</a>"#,
        DISABLE_DRAFT_MODE_PATH
    )
}

impl Renderer {
    /// Author byline. Nothing when neither a name nor a ready image exists.
    pub fn author(&self, author: Option<&Author>) -> String {
        let Some(author) = author else {
            return String::new();
        };
        let name = text(&author.name);
        let image = self.image_url(author.image.as_ref(), |url| {
            url.width(80).height(80).fit(Fit::Crop)
        });
        if name.is_none() && image.is_none() {
            return String::new();
        }

        format!(
            r#"<div class="author">{}{}</div>"#,
            present(image, |src| image_tag(
                &src,
                name.unwrap_or(""),
                80,
                80,
                Some("author-image")
            )),
            present(name, |name| format!(
                r#"<p class="author-name">{}</p>"#,
                html_escape(name)
            ))
        )
    }

    /// Publication date label
    pub fn published_at(&self, date: Option<chrono::DateTime<chrono::Utc>>) -> String {
        present(date, |date| {
            time_tag(&date, self.timezone(), Some("published-at"))
        })
    }
}
