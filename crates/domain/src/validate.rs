use crate::errors::FieldErrors;
use crate::models::CommentDraft;
use crate::spam;

#[derive(Debug, Clone)]
pub struct ValidationConfig {
    /// Reject link-stuffed content outright.
    pub simple_spam_filter: bool,
    /// How many "http" occurrences the simple filter tolerates.
    pub max_links: usize,
}

impl Default for ValidationConfig {
    fn default() -> Self {
        Self {
            simple_spam_filter: true,
            max_links: 3,
        }
    }
}

/// Field-level validation of a raw submission. Empty result means valid.
/// The duplicate check lives in the pipeline since it needs storage.
pub fn validate(draft: &CommentDraft, cfg: &ValidationConfig) -> FieldErrors {
    let mut errors = FieldErrors::new();

    if draft.author.trim().is_empty() {
        errors.add("author", "is required");
    }
    if draft.author_email.trim().is_empty() {
        errors.add("author_email", "is required");
    }
    if draft.content.trim().is_empty() {
        errors.add("content", "is required");
    }

    // Every rendered form carries the challenge pair, so a submission
    // without the digest has stripped it and fails the challenge outright.
    if !spam::matches_challenge(&draft.spam_answer, &draft.valid_spam_answer) {
        errors.add("spam_answer", "is not correct");
    }

    if cfg.simple_spam_filter {
        let links = draft.content.to_lowercase().matches("http").count();
        if links > cfg.max_links {
            errors.add("content", "contains too many links");
        }
    }

    errors
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid_draft() -> CommentDraft {
        CommentDraft {
            author: "Ada".into(),
            author_email: "ada@example.com".into(),
            author_url: None,
            content: "Nice post.".into(),
            filter_id: None,
            spam_answer: "Tuesday".into(),
            valid_spam_answer: spam::answer_digest("tuesday"),
        }
    }

    #[test]
    fn accepts_a_complete_submission() {
        assert!(validate(&valid_draft(), &ValidationConfig::default()).is_empty());
    }

    #[test]
    fn requires_author_email_and_content() {
        let draft = CommentDraft::default();
        let errors = validate(&draft, &ValidationConfig::default());
        assert_eq!(errors.on("author"), Some("is required"));
        assert_eq!(errors.on("author_email"), Some("is required"));
        assert_eq!(errors.on("content"), Some("is required"));
    }

    #[test]
    fn blank_fields_do_not_pass_as_whitespace() {
        let mut draft = valid_draft();
        draft.author = "   ".into();
        let errors = validate(&draft, &ValidationConfig::default());
        assert_eq!(errors.on("author"), Some("is required"));
    }

    #[test]
    fn wrong_spam_answer_is_rejected() {
        let mut draft = valid_draft();
        draft.spam_answer = "Wednesday".into();
        let errors = validate(&draft, &ValidationConfig::default());
        assert_eq!(errors.on("spam_answer"), Some("is not correct"));
    }

    #[test]
    fn stripped_challenge_fields_fail_the_challenge() {
        // a client that drops both challenge fields is not waved through
        let mut draft = valid_draft();
        draft.spam_answer = String::new();
        draft.valid_spam_answer = String::new();
        let errors = validate(&draft, &ValidationConfig::default());
        assert_eq!(errors.on("spam_answer"), Some("is not correct"));

        // dropping only the hidden digest fails the same way
        let mut draft = valid_draft();
        draft.valid_spam_answer = String::new();
        let errors = validate(&draft, &ValidationConfig::default());
        assert_eq!(errors.on("spam_answer"), Some("is not correct"));
    }

    #[test]
    fn link_stuffed_content_trips_simple_filter() {
        let mut draft = valid_draft();
        draft.content = "http://a http://b http://c http://d".into();
        let errors = validate(&draft, &ValidationConfig::default());
        assert_eq!(errors.on("content"), Some("contains too many links"));

        let lenient = ValidationConfig {
            simple_spam_filter: false,
            ..Default::default()
        };
        assert!(validate(&draft, &lenient).is_empty());
    }
}
