//! Field checks. Pure predicates, no side effects.

use std::sync::LazyLock;

use regex::Regex;

/// Minimum trimmed length of the contact name.
pub const MIN_NAME_LEN: usize = 2;

/// Minimum trimmed length of the contact message.
pub const MIN_MESSAGE_LEN: usize = 10;

static EMAIL_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("email pattern is valid"));

/// Syntactic email sanity check: `local@domain.tld`, no whitespace, exactly
/// one `@`. Not RFC 5322 validation. Callers trim first.
pub fn is_valid_email(s: &str) -> bool {
    EMAIL_RE.is_match(s)
}

/// True when `s`, trimmed, has at least `min` characters.
pub fn meets_min_len(s: &str, min: usize) -> bool {
    s.trim().chars().count() >= min
}
