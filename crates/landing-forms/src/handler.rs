//! Per-form behavior: what to read, how to check it, what to say.

use landing_core::FormKind;
use landing_data::{FetchError, Response};
use serde::Serialize;
use serde_json::Value;

use crate::analytics::{AnalyticsEvent, CONTACT_FORM, JOIN_WAITLIST};
use crate::scope::{Field, FormScope};
use crate::submission::{ContactFields, ContactSubmission, WaitlistFields, WaitlistSubmission};
use crate::ValidationError;

/// Shown when the request never produced a readable reply.
pub const NETWORK_ERROR_MESSAGE: &str =
    "Network error. Please check your connection and try again.";

/// Fallback texts and conversion event for one form.
#[derive(Debug, Clone, Copy)]
pub struct FormCopy {
    /// Shown on 2xx when the reply has no `message`.
    pub success: &'static str,
    /// Shown on non-2xx when the reply has no `error`.
    pub failure: &'static str,
    /// Tracked after a success.
    pub event: AnalyticsEvent,
}

/// A form the controller knows how to submit.
///
/// Everything here is pure apart from `read`, which only reads the scope.
pub trait FormHandler {
    const KIND: FormKind;
    const COPY: FormCopy;

    type Fields;
    type Submission: Serialize;

    /// Read raw values from the form.
    fn read<S: FormScope>(scope: &S) -> Self::Fields;

    /// Check values and build the request body.
    fn validate(fields: Self::Fields) -> Result<Self::Submission, ValidationError>;
}

/// Waitlist signup.
#[derive(Debug, Clone, Copy)]
pub struct WaitlistForm;

impl FormHandler for WaitlistForm {
    const KIND: FormKind = FormKind::Waitlist;
    const COPY: FormCopy = FormCopy {
        success: "Successfully joined the waitlist! 🎉",
        failure: "Failed to join waitlist. Please try again.",
        event: JOIN_WAITLIST,
    };

    type Fields = WaitlistFields;
    type Submission = WaitlistSubmission;

    fn read<S: FormScope>(scope: &S) -> WaitlistFields {
        WaitlistFields {
            email: scope.value(Field::WaitlistEmail),
            name: scope.value(Field::WaitlistName),
            profession: scope.value(Field::WaitlistProfession),
            notify_ios: scope.checked(Field::NotifyIos),
            interested_android: scope.checked(Field::InterestedAndroid),
        }
    }

    fn validate(fields: WaitlistFields) -> Result<WaitlistSubmission, ValidationError> {
        WaitlistSubmission::try_from(fields)
    }
}

/// Contact message.
#[derive(Debug, Clone, Copy)]
pub struct ContactForm;

impl FormHandler for ContactForm {
    const KIND: FormKind = FormKind::Contact;
    const COPY: FormCopy = FormCopy {
        success: "Message sent successfully! We'll get back to you soon. 📧",
        failure: "Failed to send message. Please try again.",
        event: CONTACT_FORM,
    };

    type Fields = ContactFields;
    type Submission = ContactSubmission;

    fn read<S: FormScope>(scope: &S) -> ContactFields {
        ContactFields {
            name: scope.value(Field::ContactName),
            email: scope.value(Field::ContactEmail),
            message: scope.value(Field::ContactMessage),
        }
    }

    fn validate(fields: ContactFields) -> Result<ContactSubmission, ValidationError> {
        ContactSubmission::try_from(fields)
    }
}

/// The parts of an edge function reply the page uses.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EdgeReply {
    pub message: Option<String>,
    pub error: Option<String>,
}

impl EdgeReply {
    /// Parse a reply body. The body must be JSON other than `null`;
    /// non-string or empty `message`/`error` values count as absent.
    pub fn parse(body: &[u8]) -> Result<Self, FetchError> {
        let value: Value =
            serde_json::from_slice(body).map_err(|e| FetchError::ParseError(e.to_string()))?;
        if value.is_null() {
            return Err(FetchError::ParseError("reply body is null".to_string()));
        }
        // A number or object under `message`/`error` falls back to the
        // form's default text instead of being shown.
        Ok(Self {
            message: text_field(&value, "message"),
            error: text_field(&value, "error"),
        })
    }
}

fn text_field(value: &Value, key: &str) -> Option<String> {
    value
        .get(key)
        .and_then(Value::as_str)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
}

/// What a settled response means for the visitor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolution {
    Accepted { message: String },
    Refused { status: u16, message: String },
}

/// Interpret a response using a form's fallback texts.
pub fn resolve(copy: &FormCopy, response: &Response) -> Result<Resolution, FetchError> {
    let reply = EdgeReply::parse(response.bytes())?;

    if response.is_success() {
        Ok(Resolution::Accepted {
            message: reply.message.unwrap_or_else(|| copy.success.to_string()),
        })
    } else {
        Ok(Resolution::Refused {
            status: response.status,
            message: reply.error.unwrap_or_else(|| copy.failure.to_string()),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn response(status: u16, body: &str) -> Response {
        Response::new(status, body)
    }

    #[test]
    fn test_reply_fields() {
        let reply = EdgeReply::parse(br#"{"message": "Welcome!", "error": ""}"#).unwrap();
        assert_eq!(reply.message.as_deref(), Some("Welcome!"));
        assert_eq!(reply.error, None);

        let reply = EdgeReply::parse(br#"{"message": 42}"#).unwrap();
        assert_eq!(reply.message, None);

        let reply = EdgeReply::parse(b"[1, 2]").unwrap();
        assert_eq!(reply, EdgeReply::default());
    }

    #[test]
    fn test_reply_must_be_json() {
        assert!(EdgeReply::parse(b"").is_err());
        assert!(EdgeReply::parse(b"<html>").is_err());
    }

    #[test]
    fn test_null_reply_is_unreadable() {
        assert!(matches!(
            EdgeReply::parse(b"null"),
            Err(FetchError::ParseError(_))
        ));
        assert!(resolve(&WaitlistForm::COPY, &response(200, " null ")).is_err());
        assert!(resolve(&ContactForm::COPY, &response(409, "null")).is_err());
    }

    #[test]
    fn test_resolve_success_uses_message_or_default() {
        assert_eq!(
            resolve(&WaitlistForm::COPY, &response(200, r#"{"message": "Welcome!"}"#)).unwrap(),
            Resolution::Accepted {
                message: "Welcome!".to_string()
            }
        );
        assert_eq!(
            resolve(&ContactForm::COPY, &response(201, "{}")).unwrap(),
            Resolution::Accepted {
                message: ContactForm::COPY.success.to_string()
            }
        );
    }

    #[test]
    fn test_resolve_failure_uses_error_or_default() {
        assert_eq!(
            resolve(
                &WaitlistForm::COPY,
                &response(409, r#"{"error": "Email already registered"}"#)
            )
            .unwrap(),
            Resolution::Refused {
                status: 409,
                message: "Email already registered".to_string()
            }
        );
        assert_eq!(
            resolve(&WaitlistForm::COPY, &response(500, r#"{"message": "ignored"}"#)).unwrap(),
            Resolution::Refused {
                status: 500,
                message: "Failed to join waitlist. Please try again.".to_string()
            }
        );
    }

    #[test]
    fn test_resolve_unreadable_body_is_an_error() {
        assert!(resolve(&ContactForm::COPY, &response(200, "OK")).is_err());
    }
}
