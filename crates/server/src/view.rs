//! Default page markup, composed from the render crate's fragment builders.
//! This is the built-in consumer of the tag contract; a host template layer
//! can call the same builders and ignore this file entirely.

use domain::html::escape_html;
use render::fields::{self, GravatarOptions};
use render::forms::{self, InputKind};
use render::paginate::{self, PaginationOptions};
use render::RenderContext;

use crate::config::CommentSettings;

pub fn render_page(ctx: &RenderContext, settings: &CommentSettings) -> String {
    let page = ctx.page();
    let mut html = String::with_capacity(4096);

    html.push_str("<!DOCTYPE html>\n<html>\n<head>\n");
    html.push_str(&format!("<title>{}</title>\n", escape_html(&page.title)));
    html.push_str("</head>\n<body>\n");
    html.push_str(&format!("<h1>{}</h1>\n", escape_html(&page.title)));

    if ctx.has_visible_comments() {
        html.push_str(&format!(
            "<h2>{} comments</h2>\n",
            ctx.visible_comment_count()
        ));
        html.push_str("<div class=\"comments\">\n");
        for (index, comment) in ctx.each_comment() {
            html.push_str(&render_comment(ctx, index, comment));
        }
        html.push_str("</div>\n");
        html.push_str(&paginate::pagination_links(ctx, &PaginationOptions::default()));
        html.push('\n');
    }

    if ctx.comments_enabled() {
        html.push_str(&render_form(ctx, settings));
    }

    html.push_str("</body>\n</html>\n");
    html
}

fn render_comment(ctx: &RenderContext, index: usize, comment: &domain::Comment) -> String {
    let mut html = format!(
        "<div class=\"comment\" id=\"{}\">\n",
        escape_html(&comment.anchor())
    );
    html.push_str(&format!(
        "<img class=\"gravatar\" src=\"{}\" alt=\"\" />\n",
        escape_html(&fields::gravatar_url(
            &comment.author_email,
            &GravatarOptions {
                size: Some("40"),
                default: Some("identicon"),
                ..Default::default()
            },
        ))
    ));
    html.push_str(&format!(
        "<p class=\"meta\"><span class=\"index\">{}.</span> {} on {}</p>\n",
        index + 1,
        fields::author_link(comment),
        fields::date(comment, None),
    ));
    html.push_str(&comment.content_html);
    html.push('\n');
    if ctx.is_selected(comment) && !comment.is_approved() {
        html.push_str("<p class=\"pending\">Your comment is awaiting moderation.</p>\n");
    }
    html.push_str("</div>\n");
    html
}

fn render_form(ctx: &RenderContext, settings: &CommentSettings) -> String {
    let mut html = String::new();
    html.push_str("<h2>Leave a comment</h2>\n");
    if let Some(summary) = forms::error_message(ctx, None) {
        html.push_str(&format!("<p class=\"error\">{}</p>\n", summary));
    }
    html.push_str(&forms::form_open(ctx, Some("comment_form"), Some("comments")));
    html.push('\n');

    for (label, name) in [
        ("Name", "author"),
        ("Email", "author_email"),
        ("Website", "author_url"),
    ] {
        html.push_str(&format!(
            "<label for=\"comment_{name}\">{label}</label>\n{input}\n",
            name = name,
            label = label,
            input = forms::input_tag(ctx, InputKind::Text, name, None, None),
        ));
        if let Some(error) = forms::error_message(ctx, Some(name)) {
            html.push_str(&format!("<span class=\"error\">{}</span>\n", error));
        }
    }

    html.push_str(&format!(
        "<label for=\"comment_content\">Comment</label>\n{}\n",
        forms::text_area_tag(ctx, "content", None, None, Some("6"), Some("40")),
    ));
    if let Some(error) = forms::error_message(ctx, Some("content")) {
        html.push_str(&format!("<span class=\"error\">{}</span>\n", error));
    }

    html.push_str(&forms::filter_box_tag(ctx, "filter_id", None, None));
    html.push('\n');

    html.push_str(&format!(
        "<label for=\"comment_spam_answer\">{}</label>\n{}\n",
        escape_html(&settings.spam_question),
        forms::spam_answer_tag(ctx, None, None),
    ));
    if let Some(error) = forms::error_message(ctx, Some("spam_answer")) {
        html.push_str(&format!("<span class=\"error\">{}</span>\n", error));
    }

    html.push_str(&forms::submit_tag("commit", Some("Post comment"), None));
    html.push('\n');
    html.push_str(forms::form_close());
    html.push('\n');
    html
}
