//! Form error types.

use serde::Serialize;
use thiserror::Error;

use crate::flow::SubmissionState;

/// A field check that failed before any request was made.
///
/// `Display` is the text shown to the visitor.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ValidationError {
    /// Waitlist email left empty.
    #[error("Please enter your email address.")]
    EmailMissing,

    /// Email present but malformed (or missing on the contact form).
    #[error("Please enter a valid email address.")]
    EmailInvalid,

    /// Contact name shorter than the minimum.
    #[error("Please enter your name (minimum 2 characters).")]
    NameTooShort,

    /// Contact message shorter than the minimum.
    #[error("Please enter a message (minimum 10 characters).")]
    MessageTooShort,
}

/// Errors from the submission machinery itself.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FormError {
    /// A submission attempt tried to move between states out of order.
    #[error("Invalid submission transition from {from} to {to}")]
    InvalidTransition {
        from: SubmissionState,
        to: SubmissionState,
    },
}
