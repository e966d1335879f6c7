//! The spam challenge: a question rendered by the template, answered by the
//! submitter, checked against a digest the form itself carried. The digest is
//! echoed by the client, so this only filters bots that drop the hidden
//! field. It is a heuristic, not an anti-forgery token.

/// Answer used when a template renders a challenge without supplying one.
pub const FALLBACK_ANSWER: &str = "hemidemisemiquaver";

/// Normal form for challenge answers: lowercase alphanumeric runs joined by
/// hyphens, so "  New  York " and "new-york" compare equal.
pub fn to_slug(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut pending_sep = false;
    for c in s.chars() {
        if c.is_alphanumeric() {
            if pending_sep && !out.is_empty() {
                out.push('-');
            }
            pending_sep = false;
            for lc in c.to_lowercase() {
                out.push(lc);
            }
        } else {
            pending_sep = true;
        }
    }
    out
}

/// Digest embedded in the hidden form field for an expected answer.
pub fn answer_digest(answer: &str) -> String {
    format!("{:x}", md5::compute(to_slug(answer)))
}

/// Does a submitted answer match the digest the form carried?
pub fn matches_challenge(candidate: &str, expected_digest: &str) -> bool {
    answer_digest(candidate) == expected_digest
}
