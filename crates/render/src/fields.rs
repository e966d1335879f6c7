//! Per-comment field accessors exposed to templates.

use domain::html::escape_html;
use domain::Comment;

pub const DEFAULT_DATE_FORMAT: &str = "%A, %B %d, %Y";

/// Value of a named comment attribute, escaped for interpolation into
/// markup. `content_html` is the already-rendered form and passes through
/// untouched. Unknown names render as nothing.
pub fn field(comment: &Comment, name: &str) -> String {
    match name {
        "id" => comment.id.to_string(),
        "author" => escape_html(&comment.author),
        "author_email" => escape_html(&comment.author_email),
        "author_url" => escape_html(comment.author_url.as_deref().unwrap_or("")),
        "content" => escape_html(&comment.content),
        "content_html" => comment.content_html.clone(),
        "filter_id" => escape_html(comment.filter_id.as_deref().unwrap_or("")),
        _ => String::new(),
    }
}

pub fn date(comment: &Comment, format: Option<&str>) -> String {
    comment
        .created_at
        .format(format.unwrap_or(DEFAULT_DATE_FORMAT))
        .to_string()
}

/// An anchor when the author left a URL, otherwise just the name.
pub fn author_link(comment: &Comment) -> String {
    match comment.author_url.as_deref().filter(|u| !u.is_empty()) {
        Some(url) => format!(
            r#"<a href="{}">{}</a>"#,
            escape_html(url),
            escape_html(&comment.author)
        ),
        None => escape_html(&comment.author),
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct GravatarOptions<'a> {
    pub size: Option<&'a str>,
    pub rating: Option<&'a str>,
    pub default: Option<&'a str>,
    pub format: Option<&'a str>,
}

/// Deterministic avatar URL for an author email. Query parameters appear
/// only when supplied.
pub fn gravatar_url(email: &str, opts: &GravatarOptions<'_>) -> String {
    let digest = md5::compute(email.trim());
    let mut url = format!("http://www.gravatar.com/avatar/{:x}", digest);
    if let Some(format) = opts.format {
        url.push('.');
        url.push_str(&format.to_lowercase());
    }
    let mut params = Vec::new();
    if let Some(size) = opts.size {
        params.push(format!("s={}", size));
    }
    if let Some(default) = opts.default {
        params.push(format!("d={}", default));
    }
    if let Some(rating) = opts.rating {
        params.push(format!("r={}", rating.to_lowercase()));
    }
    if !params.is_empty() {
        url.push('?');
        url.push_str(&params.join("&"));
    }
    url
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::context::fixtures;

    #[test]
    fn field_accessors() {
        let mut c = fixtures::comment(7, true);
        c.author = "A & B".into();
        assert_eq!(field(&c, "id"), "7");
        assert_eq!(field(&c, "author"), "A &amp; B");
        assert_eq!(field(&c, "content_html"), "<p>comment 7</p>");
        assert_eq!(field(&c, "author_url"), "");
        assert_eq!(field(&c, "no_such_field"), "");
    }

    #[test]
    fn date_formats() {
        let c = fixtures::comment(1, true);
        assert_eq!(date(&c, None), "Saturday, March 14, 2009");
        assert_eq!(date(&c, Some("%Y-%m-%d")), "2009-03-14");
    }

    #[test]
    fn author_link_prefers_url() {
        let mut c = fixtures::comment(1, true);
        assert_eq!(author_link(&c), "author-1");
        c.author_url = Some("http://example.com/".into());
        assert_eq!(
            author_link(&c),
            r#"<a href="http://example.com/">author-1</a>"#
        );
    }

    #[test]
    fn gravatar_url_shapes() {
        let bare = gravatar_url("ada@example.com", &GravatarOptions::default());
        assert!(bare.starts_with("http://www.gravatar.com/avatar/"));
        assert!(!bare.contains('?'));

        // surrounding whitespace never changes the identity
        assert_eq!(
            gravatar_url(" ada@example.com ", &GravatarOptions::default()),
            bare
        );

        let full = gravatar_url(
            "ada@example.com",
            &GravatarOptions {
                size: Some("80"),
                rating: Some("PG"),
                default: Some("identicon"),
                format: Some("PNG"),
            },
        );
        assert!(full.contains(".png?"));
        assert!(full.ends_with("s=80&d=identicon&r=pg"));
    }
}
