//! Content text filters. An explicit registry populated at startup stands in
//! for the original's runtime subclass enumeration: templates list the
//! registered ids in a drop-down, and the pipeline renders submitted content
//! through the chosen filter.

use crate::html::escape_html;

pub trait TextFilter: Send + Sync {
    /// Identifier stored on the comment and shown in the filter drop-down.
    fn id(&self) -> &str;
    /// Render raw submitted text to HTML.
    fn filter(&self, input: &str) -> String;
}

/// Escapes everything, then turns blank-line-separated blocks into
/// paragraphs and single newlines into `<br />`.
pub struct PlainFilter;

impl TextFilter for PlainFilter {
    fn id(&self) -> &str {
        "plain"
    }

    fn filter(&self, input: &str) -> String {
        let escaped = escape_html(input.trim());
        escaped
            .split("\n\n")
            .filter(|block| !block.trim().is_empty())
            .map(|block| format!("<p>{}</p>", block.trim().replace('\n', "<br />")))
            .collect::<Vec<_>>()
            .join("\n")
    }
}

pub struct FilterRegistry {
    filters: Vec<Box<dyn TextFilter>>,
}

impl FilterRegistry {
    /// Registry with the built-in plain filter, which doubles as the
    /// fallback for unknown ids.
    pub fn new() -> Self {
        let mut registry = Self { filters: Vec::new() };
        registry.register(Box::new(PlainFilter));
        registry
    }

    pub fn register(&mut self, filter: Box<dyn TextFilter>) {
        self.filters.push(filter);
    }

    pub fn get(&self, id: &str) -> Option<&dyn TextFilter> {
        self.filters.iter().find(|f| f.id() == id).map(Box::as_ref)
    }

    /// Registration order, for stable drop-down rendering.
    pub fn ids(&self) -> Vec<&str> {
        self.filters.iter().map(|f| f.id()).collect()
    }

    /// Render content through the named filter, falling back to the first
    /// registered filter when the id is missing or unknown.
    pub fn render(&self, filter_id: Option<&str>, content: &str) -> String {
        let filter = filter_id
            .and_then(|id| self.get(id))
            .or_else(|| self.filters.first().map(Box::as_ref));
        match filter {
            Some(f) => f.filter(content),
            None => escape_html(content),
        }
    }
}

impl Default for FilterRegistry {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct ShoutFilter;
    impl TextFilter for ShoutFilter {
        fn id(&self) -> &str {
            "shout"
        }
        fn filter(&self, input: &str) -> String {
            escape_html(&input.to_uppercase())
        }
    }

    #[test]
    fn plain_filter_escapes_and_paragraphs() {
        let html = PlainFilter.filter("first <b>line</b>\nsecond\n\nnext block");
        assert_eq!(
            html,
            "<p>first &lt;b&gt;line&lt;/b&gt;<br />second</p>\n<p>next block</p>"
        );
    }

    #[test]
    fn registry_lists_ids_in_registration_order() {
        let mut registry = FilterRegistry::new();
        registry.register(Box::new(ShoutFilter));
        assert_eq!(registry.ids(), vec!["plain", "shout"]);
        assert!(registry.get("shout").is_some());
        assert!(registry.get("markdown").is_none());
    }

    #[test]
    fn render_falls_back_to_first_filter() {
        let registry = FilterRegistry::new();
        assert_eq!(registry.render(Some("nope"), "hi"), "<p>hi</p>");
        assert_eq!(registry.render(None, "hi"), "<p>hi</p>");
    }

    #[test]
    fn render_uses_named_filter() {
        let mut registry = FilterRegistry::new();
        registry.register(Box::new(ShoutFilter));
        assert_eq!(registry.render(Some("shout"), "hi"), "HI");
    }
}
