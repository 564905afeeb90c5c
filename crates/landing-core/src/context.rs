//! Form identity and per-attempt identifiers.

use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};

use serde::{Deserialize, Serialize};

/// The forms on the landing page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FormKind {
    /// Waitlist signup.
    Waitlist,
    /// Contact message.
    Contact,
}

impl FormKind {
    /// All forms, in page order.
    pub const ALL: [FormKind; 2] = [FormKind::Waitlist, FormKind::Contact];

    /// Short name used in logs and analytics.
    pub fn name(&self) -> &'static str {
        match self {
            FormKind::Waitlist => "waitlist",
            FormKind::Contact => "contact",
        }
    }

    /// DOM id of the `<form>` element.
    pub fn form_id(&self) -> &'static str {
        match self {
            FormKind::Waitlist => "waitlistForm",
            FormKind::Contact => "contactForm",
        }
    }

    /// Stable index, used for per-form slots.
    pub fn index(&self) -> usize {
        match self {
            FormKind::Waitlist => 0,
            FormKind::Contact => 1,
        }
    }
}

impl fmt::Display for FormKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

static NEXT_SUBMISSION: AtomicU64 = AtomicU64::new(1);

/// Identifier for a single submission attempt.
///
/// Only used to correlate the log lines of one attempt; it never leaves the
/// client.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SubmissionId(pub String);

impl SubmissionId {
    /// Allocate the next id for a form.
    pub fn next(kind: FormKind) -> Self {
        let seq = NEXT_SUBMISSION.fetch_add(1, Ordering::Relaxed);
        Self(format!("{}-{}", kind.name(), seq))
    }
}

impl fmt::Display for SubmissionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_form_kind_names() {
        assert_eq!(FormKind::Waitlist.name(), "waitlist");
        assert_eq!(FormKind::Contact.form_id(), "contactForm");
        assert_ne!(FormKind::Waitlist.index(), FormKind::Contact.index());
    }

    #[test]
    fn test_submission_ids_are_unique() {
        let a = SubmissionId::next(FormKind::Waitlist);
        let b = SubmissionId::next(FormKind::Waitlist);
        assert_ne!(a, b);
        assert!(a.to_string().starts_with("waitlist-"));
    }
}
