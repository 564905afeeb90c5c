//! Best-effort conversion tracking.

use landing_core::MaybeSendSync;
use serde::Serialize;
use thiserror::Error;

/// A conversion event, shaped like a `gtag('event', ...)` call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct AnalyticsEvent {
    /// Event action name.
    pub name: &'static str,
    /// `event_category` parameter.
    pub category: &'static str,
    /// `event_label` parameter.
    pub label: &'static str,
}

/// Fired after a successful waitlist signup.
pub const JOIN_WAITLIST: AnalyticsEvent = AnalyticsEvent {
    name: "join_waitlist",
    category: "engagement",
    label: "waitlist_signup",
};

/// Fired after a successful contact message.
pub const CONTACT_FORM: AnalyticsEvent = AnalyticsEvent {
    name: "contact_form",
    category: "engagement",
    label: "contact_submission",
};

/// Why an event was not recorded. Never shown to visitors.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AnalyticsError {
    /// No reporting function on the page.
    #[error("analytics reporter unavailable")]
    Unavailable,

    /// The reporter threw or refused the event.
    #[error("analytics reporter failed: {0}")]
    Rejected(String),
}

/// Reports conversion events.
///
/// Must return promptly; callers ignore failures beyond logging them.
pub trait Analytics: MaybeSendSync {
    fn track(&self, event: &AnalyticsEvent) -> Result<(), AnalyticsError>;
}

/// Drops every event.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopAnalytics;

impl Analytics for NoopAnalytics {
    fn track(&self, _event: &AnalyticsEvent) -> Result<(), AnalyticsError> {
        Ok(())
    }
}
