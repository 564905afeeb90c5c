//! Submission payloads and the field checks that gate them.

use serde::Serialize;

use crate::validate::{is_valid_email, meets_min_len, MIN_MESSAGE_LEN, MIN_NAME_LEN};
use crate::ValidationError;

/// Raw waitlist form values, as read from the page.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WaitlistFields {
    pub email: String,
    pub name: String,
    pub profession: String,
    pub notify_ios: bool,
    pub interested_android: bool,
}

/// Body of a `join-waitlist` request.
///
/// Only constructible through [`WaitlistSubmission::try_from`], so an
/// instance always carries a checked email.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct WaitlistSubmission {
    email: String,
    name: Option<String>,
    profession: Option<String>,
    notify_ios: bool,
    interested_android: bool,
}

impl WaitlistSubmission {
    pub fn email(&self) -> &str {
        &self.email
    }

    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    pub fn profession(&self) -> Option<&str> {
        self.profession.as_deref()
    }

    pub fn notify_ios(&self) -> bool {
        self.notify_ios
    }

    pub fn interested_android(&self) -> bool {
        self.interested_android
    }
}

fn non_empty(s: String) -> Option<String> {
    if s.is_empty() {
        None
    } else {
        Some(s)
    }
}

impl TryFrom<WaitlistFields> for WaitlistSubmission {
    type Error = ValidationError;

    fn try_from(fields: WaitlistFields) -> Result<Self, Self::Error> {
        let email = fields.email.trim().to_string();
        if email.is_empty() {
            return Err(ValidationError::EmailMissing);
        }
        if !is_valid_email(&email) {
            return Err(ValidationError::EmailInvalid);
        }

        Ok(Self {
            email,
            name: non_empty(fields.name.trim().to_string()),
            // Select values are taken verbatim.
            profession: non_empty(fields.profession),
            notify_ios: fields.notify_ios,
            interested_android: fields.interested_android,
        })
    }
}

/// Raw contact form values, as read from the page.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ContactFields {
    pub name: String,
    pub email: String,
    pub message: String,
}

/// Body of a `submit-contact` request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ContactSubmission {
    name: String,
    email: String,
    message: String,
}

impl ContactSubmission {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn email(&self) -> &str {
        &self.email
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

impl TryFrom<ContactFields> for ContactSubmission {
    type Error = ValidationError;

    /// Checks run in page order and stop at the first failure.
    fn try_from(fields: ContactFields) -> Result<Self, Self::Error> {
        let name = fields.name.trim().to_string();
        if !meets_min_len(&name, MIN_NAME_LEN) {
            return Err(ValidationError::NameTooShort);
        }

        let email = fields.email.trim().to_string();
        if !is_valid_email(&email) {
            return Err(ValidationError::EmailInvalid);
        }

        let message = fields.message.trim().to_string();
        if !meets_min_len(&message, MIN_MESSAGE_LEN) {
            return Err(ValidationError::MessageTooShort);
        }

        Ok(Self {
            name,
            email,
            message,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn waitlist(email: &str) -> WaitlistFields {
        WaitlistFields {
            email: email.to_string(),
            ..Default::default()
        }
    }

    fn contact(name: &str, email: &str, message: &str) -> ContactFields {
        ContactFields {
            name: name.to_string(),
            email: email.to_string(),
            message: message.to_string(),
        }
    }

    // === Waitlist ===

    #[test]
    fn test_waitlist_requires_email() {
        assert_eq!(
            WaitlistSubmission::try_from(waitlist("   ")),
            Err(ValidationError::EmailMissing)
        );
        assert_eq!(
            WaitlistSubmission::try_from(waitlist("not-an-email")),
            Err(ValidationError::EmailInvalid)
        );
    }

    #[test]
    fn test_waitlist_optional_fields_become_null() {
        let submission = WaitlistSubmission::try_from(WaitlistFields {
            email: "  ada@example.com ".to_string(),
            name: "   ".to_string(),
            profession: String::new(),
            notify_ios: true,
            interested_android: false,
        })
        .unwrap();

        assert_eq!(submission.email(), "ada@example.com");
        assert_eq!(
            serde_json::to_value(&submission).unwrap(),
            serde_json::json!({
                "email": "ada@example.com",
                "name": null,
                "profession": null,
                "notify_ios": true,
                "interested_android": false,
            })
        );
    }

    #[test]
    fn test_waitlist_keeps_name_and_profession() {
        let submission = WaitlistSubmission::try_from(WaitlistFields {
            email: "ada@example.com".to_string(),
            name: " Ada ".to_string(),
            profession: "therapist".to_string(),
            notify_ios: false,
            interested_android: true,
        })
        .unwrap();

        assert_eq!(submission.name(), Some("Ada"));
        assert_eq!(submission.profession(), Some("therapist"));
        assert!(submission.interested_android());
    }

    // === Contact ===

    #[test]
    fn test_contact_name_too_short() {
        assert_eq!(
            ContactSubmission::try_from(contact("A", "a@b.co", "hello there, friend")),
            Err(ValidationError::NameTooShort)
        );
    }

    #[test]
    fn test_contact_reports_first_failure_only() {
        // Every field is bad; only the name is reported.
        assert_eq!(
            ContactSubmission::try_from(contact("", "", "")),
            Err(ValidationError::NameTooShort)
        );
        assert_eq!(
            ContactSubmission::try_from(contact("Ada", "", "short")),
            Err(ValidationError::EmailInvalid)
        );
        assert_eq!(
            ContactSubmission::try_from(contact("Ada", "ada@example.com", " short   ")),
            Err(ValidationError::MessageTooShort)
        );
    }

    #[test]
    fn test_contact_trims_everything() {
        let submission = ContactSubmission::try_from(contact(
            " Ada ",
            " ada@example.com ",
            "  I would like a demo.  ",
        ))
        .unwrap();

        assert_eq!(submission.name(), "Ada");
        assert_eq!(submission.email(), "ada@example.com");
        assert_eq!(submission.message(), "I would like a demo.");
    }

    #[test]
    fn test_validation_messages() {
        assert_eq!(
            ValidationError::EmailMissing.to_string(),
            "Please enter your email address."
        );
        assert_eq!(
            ValidationError::NameTooShort.to_string(),
            "Please enter your name (minimum 2 characters)."
        );
    }
}
