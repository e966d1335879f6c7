//! Comment form fragment builders. Field names follow the original wire
//! format (`comment[author]`, `comment_author` ids) so existing form markup
//! keeps working, and every field echoes the last failed submission before
//! falling back to a template-supplied default.

use domain::html::escape_html;
use domain::spam;

use crate::context::RenderContext;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputKind {
    Text,
    Password,
    Hidden,
}

impl InputKind {
    fn as_str(self) -> &'static str {
        match self {
            InputKind::Text => "text",
            InputKind::Password => "password",
            InputKind::Hidden => "hidden",
        }
    }
}

pub fn form_open(ctx: &RenderContext, id: Option<&str>, class: Option<&str>) -> String {
    let mut action = ctx.form_action();
    if let Some(id) = id {
        action.push('#');
        action.push_str(id);
    }
    let mut r = format!(r#"<form action="{}" method="post""#, escape_html(&action));
    if let Some(id) = id {
        r.push_str(&format!(r#" id="{}""#, escape_html(id)));
    }
    if let Some(class) = class {
        r.push_str(&format!(r#" class="{}""#, escape_html(class)));
    }
    r.push('>');
    r
}

pub fn form_close() -> &'static str {
    "</form>"
}

pub fn input_tag(
    ctx: &RenderContext,
    kind: InputKind,
    name: &str,
    default: Option<&str>,
    class: Option<&str>,
) -> String {
    let mut r = format!(
        r#"<input type="{}" id="comment_{}" name="comment[{}]""#,
        kind.as_str(),
        escape_html(name),
        escape_html(name),
    );
    if let Some(class) = class {
        r.push_str(&format!(r#" class="{}""#, escape_html(class)));
    }
    if let Some(value) = ctx.last_value(name).or(default) {
        r.push_str(&format!(r#" value="{}""#, escape_html(value)));
    }
    r.push_str(" />");
    r
}

pub fn text_area_tag(
    ctx: &RenderContext,
    name: &str,
    default: Option<&str>,
    class: Option<&str>,
    rows: Option<&str>,
    cols: Option<&str>,
) -> String {
    let mut r = format!(
        r#"<textarea id="comment_{}" name="comment[{}]""#,
        escape_html(name),
        escape_html(name),
    );
    if let Some(class) = class {
        r.push_str(&format!(r#" class="{}""#, escape_html(class)));
    }
    if let Some(rows) = rows {
        r.push_str(&format!(r#" rows="{}""#, escape_html(rows)));
    }
    if let Some(cols) = cols {
        r.push_str(&format!(r#" cols="{}""#, escape_html(cols)));
    }
    r.push('>');
    if let Some(content) = ctx.last_value(name).or(default) {
        r.push_str(&escape_html(content));
    }
    r.push_str("</textarea>");
    r
}

fn button_tag(kind: &str, name: &str, value: Option<&str>, class: Option<&str>) -> String {
    let mut r = format!(
        r#"<input type="{}" id="{}" name="{}""#,
        kind,
        escape_html(name),
        escape_html(name),
    );
    if let Some(class) = class {
        r.push_str(&format!(r#" class="{}""#, escape_html(class)));
    }
    if let Some(value) = value {
        r.push_str(&format!(r#" value="{}""#, escape_html(value)));
    }
    r.push_str(" />");
    r
}

pub fn submit_tag(name: &str, value: Option<&str>, class: Option<&str>) -> String {
    button_tag("submit", name, value, class)
}

pub fn reset_tag(name: &str, value: Option<&str>, class: Option<&str>) -> String {
    button_tag("reset", name, value, class)
}

/// Drop-down over the registered content filters, with the previous choice
/// (failed submission first, then the supplied default) selected.
pub fn filter_box_tag(
    ctx: &RenderContext,
    name: &str,
    default: Option<&str>,
    class: Option<&str>,
) -> String {
    let selected = ctx.last_value("filter_id").or(default);
    let mut r = format!(r#"<select name="comment[{}]""#, escape_html(name));
    if let Some(class) = class {
        r.push_str(&format!(r#" class="{}""#, escape_html(class)));
    }
    r.push('>');
    for id in ctx.settings.filters.ids() {
        r.push_str(&format!(r#"<option value="{}""#, escape_html(id)));
        if selected == Some(id) {
            r.push_str(r#" selected="selected""#);
        }
        r.push_str(&format!(">{}</option>", escape_html(id)));
    }
    r.push_str("</select>");
    r
}

/// The spam-challenge pair: a visible answer input (echoing a failed
/// attempt) and a hidden field carrying the expected answer's digest. The
/// digest is recomputed on every render, never cached.
pub fn spam_answer_tag(ctx: &RenderContext, answer: Option<&str>, class: Option<&str>) -> String {
    let expected = answer
        .filter(|a| !a.is_empty())
        .unwrap_or(if ctx.settings.spam_answer.is_empty() {
            spam::FALLBACK_ANSWER
        } else {
            ctx.settings.spam_answer.as_str()
        });
    let digest = spam::answer_digest(expected);

    let mut r =
        String::from(r#"<input type="text" id="comment_spam_answer" name="comment[spam_answer]""#);
    if let Some(class) = class {
        r.push_str(&format!(r#" class="{}""#, escape_html(class)));
    }
    if let Some(value) = ctx.last_value("spam_answer") {
        r.push_str(&format!(r#" value="{}""#, escape_html(value)));
    }
    r.push_str(" />");
    r.push_str(&format!(
        r#"<input type="hidden" name="comment[valid_spam_answer]" value="{}" />"#,
        digest
    ));
    r
}

/// Error text for a failed submission: the message recorded against `on`,
/// or a whole-form summary when `on` is None. None when the last
/// submission (if any) was fine.
pub fn error_message(ctx: &RenderContext, on: Option<&str>) -> Option<String> {
    match on {
        Some(field) => ctx.error_on(field).map(|m| escape_html(m)),
        None => {
            if ctx.has_errors() {
                let failed = ctx.page_ctx.last_comment.as_ref()?;
                Some(escape_html(&failed.errors.to_string()))
            } else {
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::context::fixtures::{comment, context};
    use crate::context::FailedSubmission;
    use domain::{CommentDraft, FieldErrors};

    fn failed_ctx() -> crate::context::RenderContext {
        let mut ctx = context(vec![], 0);
        let mut errors = FieldErrors::new();
        errors.add("author", "is required");
        ctx.page_ctx.last_comment = Some(FailedSubmission {
            draft: CommentDraft {
                author: String::new(),
                author_email: "ada@example.com".into(),
                author_url: None,
                content: "echo me".into(),
                filter_id: Some("plain".into()),
                spam_answer: "tuesday".into(),
                valid_spam_answer: "x".into(),
            },
            errors,
        });
        ctx
    }

    #[test]
    fn form_open_targets_the_comments_endpoint() {
        let ctx = context(vec![], 0);
        assert_eq!(
            form_open(&ctx, Some("comment_form"), Some("comments")),
            r#"<form action="/blog/hello/comments#comment_form" method="post" id="comment_form" class="comments">"#
        );
    }

    #[test]
    fn input_uses_default_when_nothing_was_submitted() {
        let ctx = context(vec![], 0);
        let html = input_tag(&ctx, InputKind::Text, "author", Some("Anonymous"), None);
        assert_eq!(
            html,
            r#"<input type="text" id="comment_author" name="comment[author]" value="Anonymous" />"#
        );
    }

    #[test]
    fn failed_submission_beats_the_default() {
        let ctx = failed_ctx();
        let html = input_tag(&ctx, InputKind::Text, "author_email", Some("x@y"), None);
        assert!(html.contains(r#"value="ada@example.com""#));

        // blank submitted author still echoes (as empty), not the default
        let html = input_tag(&ctx, InputKind::Text, "author", Some("Anonymous"), None);
        assert!(html.contains(r#"value="""#));

        let area = text_area_tag(&ctx, "content", None, None, Some("6"), Some("40"));
        assert!(area.contains(r#"rows="6""#));
        assert!(area.ends_with(">echo me</textarea>"));
    }

    #[test]
    fn buttons_render_without_context() {
        assert_eq!(
            submit_tag("commit", Some("Post"), None),
            r#"<input type="submit" id="commit" name="commit" value="Post" />"#
        );
        assert!(reset_tag("reset", None, Some("small")).contains(r#"class="small""#));
    }

    #[test]
    fn filter_box_marks_previous_choice() {
        let ctx = failed_ctx();
        let html = filter_box_tag(&ctx, "filter_id", None, None);
        assert!(html.starts_with(r#"<select name="comment[filter_id]">"#));
        assert!(html.contains(r#"<option value="plain" selected="selected">plain</option>"#));

        let ctx = context(vec![], 0);
        let html = filter_box_tag(&ctx, "filter_id", None, None);
        assert!(!html.contains("selected"));
    }

    #[test]
    fn spam_answer_tag_carries_fresh_digest() {
        let ctx = context(vec![], 0);
        let html = spam_answer_tag(&ctx, Some("New York"), None);
        let digest = domain::spam::answer_digest("new york");
        assert!(html.contains(r#"name="comment[spam_answer]""#));
        assert!(html.contains(&format!(
            r#"<input type="hidden" name="comment[valid_spam_answer]" value="{}" />"#,
            digest
        )));

        // falls back to the configured answer, then the built-in one
        let html = spam_answer_tag(&ctx, None, None);
        assert!(html.contains(&domain::spam::answer_digest("tuesday")));
    }

    #[test]
    fn spam_answer_tag_echoes_failed_attempt() {
        let ctx = failed_ctx();
        let html = spam_answer_tag(&ctx, None, None);
        assert!(html.contains(r#" value="tuesday""#));
    }

    #[test]
    fn error_messages_per_field_and_whole_form() {
        let ctx = failed_ctx();
        assert_eq!(error_message(&ctx, Some("author")), Some("is required".into()));
        assert_eq!(error_message(&ctx, Some("content")), None);
        assert!(error_message(&ctx, None).unwrap().contains("author is required"));

        let clean = context(vec![comment(1, true)], 1);
        assert_eq!(error_message(&clean, None), None);
    }
}
