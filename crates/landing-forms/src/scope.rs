//! The DOM edge: what the controller may read from and write to a form.

use landing_core::{FormKind, MaybeSendSync};
use serde::Serialize;

/// Form controls the controller reads.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Field {
    WaitlistEmail,
    WaitlistName,
    WaitlistProfession,
    NotifyIos,
    InterestedAndroid,
    ContactName,
    ContactEmail,
    ContactMessage,
}

const WAITLIST_FIELDS: [Field; 5] = [
    Field::WaitlistEmail,
    Field::WaitlistName,
    Field::WaitlistProfession,
    Field::NotifyIos,
    Field::InterestedAndroid,
];

const CONTACT_FIELDS: [Field; 3] = [Field::ContactName, Field::ContactEmail, Field::ContactMessage];

impl Field {
    /// CSS selector of the control, relative to its form.
    pub fn selector(&self) -> &'static str {
        match self {
            Field::WaitlistEmail => "#waitlist-email",
            Field::WaitlistName => "#waitlist-name",
            Field::WaitlistProfession => "#waitlist-profession",
            Field::NotifyIos => r#"input[name="notify_ios"]"#,
            Field::InterestedAndroid => r#"input[name="interested_android"]"#,
            Field::ContactName => "#contact-name",
            Field::ContactEmail => "#contact-email",
            Field::ContactMessage => "#contact-message",
        }
    }

    /// The form this control belongs to.
    pub fn form(&self) -> FormKind {
        match self {
            Field::WaitlistEmail
            | Field::WaitlistName
            | Field::WaitlistProfession
            | Field::NotifyIos
            | Field::InterestedAndroid => FormKind::Waitlist,
            Field::ContactName | Field::ContactEmail | Field::ContactMessage => FormKind::Contact,
        }
    }

    /// Checkbox controls are read with [`FormScope::checked`].
    pub fn is_checkbox(&self) -> bool {
        matches!(self, Field::NotifyIos | Field::InterestedAndroid)
    }

    /// Every control a form must expose.
    pub fn for_form(kind: FormKind) -> &'static [Field] {
        match kind {
            FormKind::Waitlist => &WAITLIST_FIELDS,
            FormKind::Contact => &CONTACT_FIELDS,
        }
    }
}

/// Selector of the submit button inside a form.
pub const SUBMIT_BUTTON_SELECTOR: &str = r#"button[type="submit"]"#;

/// Selector of the status region inside a form.
pub const STATUS_REGION_SELECTOR: &str = ".form-message";

/// Semantic category of a status message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum MessageKind {
    Success,
    Error,
}

impl MessageKind {
    /// Class added next to `form-message` on the status region.
    pub fn css_class(&self) -> &'static str {
        match self {
            MessageKind::Success => "success",
            MessageKind::Error => "error",
        }
    }

    /// Success messages hide themselves; errors stay until replaced.
    pub fn auto_hides(&self) -> bool {
        matches!(self, MessageKind::Success)
    }
}

/// One form's subtree as seen by the controller.
///
/// Implementations touch only their own form. Handles are cloned into the
/// auto-hide timer, so they should be cheap to clone.
pub trait FormScope: Clone + MaybeSendSync + 'static {
    /// Current value of a text/select control. Missing controls read as empty.
    fn value(&self, field: Field) -> String;

    /// Checked state of a checkbox. Missing controls read as unchecked.
    fn checked(&self, field: Field) -> bool;

    /// Set the status region's text and kind, and make it visible.
    fn show_status(&self, text: &str, kind: MessageKind);

    /// Hide the status region.
    fn hide_status(&self);

    /// Put the submit button in (or out of) its loading + disabled state.
    fn set_loading(&self, loading: bool);

    /// Clear every control back to its initial value.
    fn reset(&self);
}
