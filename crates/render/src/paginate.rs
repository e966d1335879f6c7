//! Windowed pagination links: a run of pages around the current one, a run
//! at each end, gap markers between them, and previous/next links. Link
//! targets come from the same URL builder that request parsing uses, so the
//! two can never disagree about what page N is called.

use domain::html::escape_html;

use crate::context::RenderContext;

#[derive(Debug, Clone)]
pub struct PaginationOptions {
    pub id: Option<String>,
    pub class: String,
    pub previous_label: String,
    pub next_label: String,
    /// Links shown on each side of the current page.
    pub inner_window: u32,
    /// Links shown at each end of the page range.
    pub outer_window: u32,
    pub separator: String,
    /// When false, only previous/next are rendered.
    pub page_links: bool,
    /// When false, the links are not wrapped in a containing div.
    pub container: bool,
}

impl Default for PaginationOptions {
    fn default() -> Self {
        Self {
            id: None,
            class: "pagination".to_string(),
            previous_label: "&#171; Previous".to_string(),
            next_label: "Next &#187;".to_string(),
            inner_window: 4,
            outer_window: 1,
            separator: " ".to_string(),
            page_links: true,
            container: true,
        }
    }
}

/// Render the pagination links for the current window. Empty when there is
/// only one page, matching the original widget.
pub fn pagination_links(ctx: &RenderContext, opts: &PaginationOptions) -> String {
    let total = ctx.window.total_pages();
    if total <= 1 {
        return String::new();
    }
    let current = ctx.window.spec.page_number;

    let mut items: Vec<String> = Vec::new();

    if current > 1 {
        items.push(format!(
            r#"<a href="{}" class="previous_page">{}</a>"#,
            escape_html(&ctx.page_link(current - 1)),
            opts.previous_label,
        ));
    } else {
        items.push(format!(
            r#"<span class="previous_page disabled">{}</span>"#,
            opts.previous_label,
        ));
    }

    if opts.page_links {
        for entry in visible_pages(current, total, opts.inner_window, opts.outer_window) {
            match entry {
                Some(p) if p == current => {
                    items.push(format!(r#"<span class="current">{}</span>"#, p));
                }
                Some(p) => {
                    items.push(format!(
                        r#"<a href="{}">{}</a>"#,
                        escape_html(&ctx.page_link(p)),
                        p,
                    ));
                }
                None => items.push(r#"<span class="gap">&#8230;</span>"#.to_string()),
            }
        }
    }

    if current < total {
        items.push(format!(
            r#"<a href="{}" class="next_page">{}</a>"#,
            escape_html(&ctx.page_link(current + 1)),
            opts.next_label,
        ));
    } else {
        items.push(format!(
            r#"<span class="next_page disabled">{}</span>"#,
            opts.next_label,
        ));
    }

    let joined = items.join(&opts.separator);
    if !opts.container {
        return joined;
    }
    let mut r = format!(r#"<div class="{}""#, escape_html(&opts.class));
    if let Some(id) = &opts.id {
        r.push_str(&format!(r#" id="{}""#, escape_html(id)));
    }
    r.push('>');
    r.push_str(&joined);
    r.push_str("</div>");
    r
}

/// Page numbers to show, in order, with None marking a gap between
/// non-adjacent runs.
fn visible_pages(current: u32, total: u32, inner: u32, outer: u32) -> Vec<Option<u32>> {
    let mut out = Vec::new();
    let mut last_visible = 0u32;
    for p in 1..=total {
        let in_left = p <= outer + 1;
        let in_right = p + outer + 1 > total;
        let in_inner = p.abs_diff(current) <= inner;
        if in_left || in_right || in_inner {
            if last_visible != 0 && p != last_visible + 1 {
                out.push(None);
            }
            out.push(Some(p));
            last_visible = p;
        }
    }
    out
}
