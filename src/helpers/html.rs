//! HTML helper functions

/// Escape HTML special characters
pub fn html_escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}

/// Generate an anchor tag. `text` is inserted as-is.
///
/// # Examples
/// ```ignore
/// link_to("/posts", "Posts", Some("nav-link")) // -> <a class="nav-link" href="/posts">Posts</a>
/// ```
pub fn link_to(href: &str, text: &str, class: Option<&str>) -> String {
    let class_attr = class
        .map(|c| format!(r#" class="{}""#, html_escape(c)))
        .unwrap_or_default();

    if href.starts_with("http://") || href.starts_with("https://") {
        format!(
            r#"<a{} href="{}" target="_blank" rel="noopener">{}</a>"#,
            class_attr,
            html_escape(href),
            text
        )
    } else {
        format!(r#"<a{} href="{}">{}</a>"#, class_attr, html_escape(href), text)
    }
}

/// Generate an image tag with explicit dimensions
pub fn image_tag(src: &str, alt: &str, width: u32, height: u32, class: Option<&str>) -> String {
    let class_attr = class
        .map(|c| format!(r#" class="{}""#, html_escape(c)))
        .unwrap_or_default();

    format!(
        r#"<img{} src="{}" alt="{}" width="{}" height="{}" loading="lazy">"#,
        class_attr,
        html_escape(src),
        html_escape(alt),
        width,
        height
    )
}

/// Truncate a string to a specified length
pub fn truncate(s: &str, length: usize, omission: Option<&str>) -> String {
    let omission = omission.unwrap_or("...");

    if s.chars().count() <= length {
        s.to_string()
    } else {
        let truncated: String = s
            .chars()
            .take(length.saturating_sub(omission.len()))
            .collect();
        format!("{}{}", truncated.trim_end(), omission)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_html_escape() {
        assert_eq!(
            html_escape(r#"<a href="x">Tom & 'Jerry'</a>"#),
            "&lt;a href=&quot;x&quot;&gt;Tom &amp; &#39;Jerry&#39;&lt;/a&gt;"
        );
    }

    #[test]
    fn test_link_to() {
        assert_eq!(link_to("/posts", "Posts", None), r#"<a href="/posts">Posts</a>"#);
        assert!(link_to("https://example.com", "x", None).contains(r#"rel="noopener""#));
        assert!(link_to("/", "Home", Some("logo")).starts_with(r#"<a class="logo""#));
    }

    #[test]
    fn test_image_tag() {
        let tag = image_tag("https://cdn/x.jpg?w=1&h=2", "A \"cat\"", 1, 2, None);
        assert_eq!(
            tag,
            r#"<img src="https://cdn/x.jpg?w=1&amp;h=2" alt="A &quot;cat&quot;" width="1" height="2" loading="lazy">"#
        );
    }

    #[test]
    fn test_truncate() {
        assert_eq!(truncate("Hello World", 8, None), "Hello...");
        assert_eq!(truncate("Hi", 10, None), "Hi");
    }
}
