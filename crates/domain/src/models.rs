use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// The external content entity a comment thread hangs off.
/// Only the fields needed to anchor comments and build URLs are kept here.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Page {
    pub id: i64,
    pub slug: String,
    /// Canonical absolute path, with trailing slash (e.g. "/blog/hello/").
    pub url: String,
    pub title: String,
    pub comments_enabled: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Comment {
    pub id: i64,
    pub page_id: i64,
    pub author: String,
    pub author_email: String,
    pub author_url: Option<String>,
    pub content: String,
    pub content_html: String,
    pub filter_id: Option<String>,
    pub approved: bool,
    pub created_at: NaiveDateTime,
}

impl Comment {
    /// Attribute names a template may sort by. `order_by` resolution is
    /// checked against this list, so arbitrary strings never reach SQL.
    pub const FIELDS: &'static [&'static str] = &[
        "id",
        "page_id",
        "author",
        "author_email",
        "author_url",
        "content",
        "content_html",
        "filter_id",
        "approved",
        "created_at",
    ];

    pub fn is_approved(&self) -> bool {
        self.approved
    }

    pub fn anchor(&self) -> String {
        format!("comment-{}", self.id)
    }
}

/// A raw submission as it came off the form. Held onto for the lifetime of
/// one request when validation fails, so the form can be repopulated.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CommentDraft {
    pub author: String,
    pub author_email: String,
    pub author_url: Option<String>,
    pub content: String,
    pub filter_id: Option<String>,
    pub spam_answer: String,
    pub valid_spam_answer: String,
}

impl CommentDraft {
    /// Submitted value for a named form field, used to echo prior input
    /// back into the rebuilt form.
    pub fn field(&self, name: &str) -> Option<&str> {
        match name {
            "author" => Some(&self.author),
            "author_email" => Some(&self.author_email),
            "author_url" => self.author_url.as_deref(),
            "content" => Some(&self.content),
            "filter_id" => self.filter_id.as_deref(),
            "spam_answer" => Some(&self.spam_answer),
            "valid_spam_answer" => Some(&self.valid_spam_answer),
            _ => None,
        }
    }
}

/// A validated, filter-rendered comment ready to be persisted.
#[derive(Debug, Clone)]
pub struct NewComment {
    pub page_id: i64,
    pub author: String,
    pub author_email: String,
    pub author_url: Option<String>,
    pub content: String,
    pub content_html: String,
    pub filter_id: Option<String>,
    pub approved: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn draft_field_lookup() {
        let draft = CommentDraft {
            author: "Ada".into(),
            author_email: "ada@example.com".into(),
            author_url: None,
            content: "hello".into(),
            filter_id: Some("plain".into()),
            spam_answer: "tuesday".into(),
            valid_spam_answer: "abc".into(),
        };
        assert_eq!(draft.field("author"), Some("Ada"));
        assert_eq!(draft.field("author_url"), None);
        assert_eq!(draft.field("filter_id"), Some("plain"));
        assert_eq!(draft.field("nope"), None);
    }

    #[test]
    fn fields_whitelist_contains_ordering_keys() {
        assert!(Comment::FIELDS.contains(&"created_at"));
        assert!(Comment::FIELDS.contains(&"author"));
        assert!(!Comment::FIELDS.contains(&"droptable"));
    }
}
