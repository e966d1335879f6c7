use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

/// Per-field validation messages, in stable field order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldErrors {
    errors: BTreeMap<String, Vec<String>>,
}

impl FieldErrors {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, field: impl Into<String>, message: impl Into<String>) {
        self.errors.entry(field.into()).or_default().push(message.into());
    }

    /// First message recorded against a field, if any.
    pub fn on(&self, field: &str) -> Option<&str> {
        self.errors.get(field).and_then(|m| m.first()).map(String::as_str)
    }

    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.errors
            .iter()
            .flat_map(|(field, msgs)| msgs.iter().map(move |m| (field.as_str(), m.as_str())))
    }
}

impl fmt::Display for FieldErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for (field, msg) in self.iter() {
            if !first {
                write!(f, "; ")?;
            }
            write!(f, "{} {}", field, msg)?;
            first = false;
        }
        Ok(())
    }
}

#[derive(Debug, thiserror::Error)]
pub enum CommentsError {
    /// A submission failed validation. Recovered by the submission pipeline
    /// and turned into a form re-render; never an HTTP fault.
    #[error("comment validation failed: {0}")]
    ValidationFailed(FieldErrors),

    /// A template asked for an impossible window (bad per_page, unknown
    /// order_by, bad direction). Operator error, surfaced loudly.
    #[error("invalid pagination config: {0}")]
    InvalidPaginationConfig(String),

    /// Persistence-layer fault. Fatal for the request; nothing partial is
    /// left behind.
    #[error("storage failure")]
    Storage(#[source] anyhow::Error),
}

impl From<anyhow::Error> for CommentsError {
    fn from(e: anyhow::Error) -> Self {
        CommentsError::Storage(e)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn field_errors_collects_and_displays() {
        let mut errs = FieldErrors::new();
        errs.add("author", "is required");
        errs.add("content", "is required");
        errs.add("content", "looks like spam");

        assert!(!errs.is_empty());
        assert_eq!(errs.on("author"), Some("is required"));
        assert_eq!(errs.on("content"), Some("is required"));
        assert_eq!(errs.on("author_email"), None);
        let display = errs.to_string();
        assert!(display.contains("author is required"));
        assert!(display.contains("content looks like spam"));
    }
}
