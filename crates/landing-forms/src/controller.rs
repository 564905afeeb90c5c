//! Runs submission attempts for both landing page forms.

use std::sync::Arc;

use landing_core::{BackendConfig, FormKind, LandingConfig};
use landing_data::{FetchClient, FetchError};
use landing_observability::StructuredLogger;
use serde::Serialize;

use crate::analytics::{Analytics, NoopAnalytics};
use crate::flow::{SubmissionAttempt, SubmissionState};
use crate::handler::{
    resolve, ContactForm, FormHandler, Resolution, WaitlistForm, NETWORK_ERROR_MESSAGE,
};
use crate::loading::InFlight;
use crate::scope::{FormScope, MessageKind};
use crate::status::{StatusRenderer, Timer};
use crate::ValidationError;

/// How a submission attempt ended.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum SubmissionOutcome {
    /// A field check failed; no request was made.
    Rejected {
        reason: ValidationError,
        message: String,
    },
    /// The backend answered 2xx.
    Succeeded { message: String },
    /// The backend answered with a non-2xx status.
    Failed { status: u16, message: String },
    /// The request failed or the reply was unreadable.
    NetworkError { message: String, cause: String },
    /// A request for this form was already in flight.
    Busy,
}

impl SubmissionOutcome {
    pub fn is_success(&self) -> bool {
        matches!(self, SubmissionOutcome::Succeeded { .. })
    }

    /// Text shown in the status region, if any.
    pub fn message(&self) -> Option<&str> {
        match self {
            SubmissionOutcome::Rejected { message, .. }
            | SubmissionOutcome::Succeeded { message }
            | SubmissionOutcome::Failed { message, .. }
            | SubmissionOutcome::NetworkError { message, .. } => Some(message),
            SubmissionOutcome::Busy => None,
        }
    }

    /// Kind of status message shown, if any.
    pub fn kind(&self) -> Option<MessageKind> {
        match self {
            SubmissionOutcome::Succeeded { .. } => Some(MessageKind::Success),
            SubmissionOutcome::Busy => None,
            _ => Some(MessageKind::Error),
        }
    }
}

struct FormSlot {
    status: StatusRenderer,
    in_flight: InFlight,
}

/// Owns per-form status and in-flight state and submits forms to the
/// backend.
///
/// The two forms share nothing mutable; each has its own renderer and
/// in-flight flag.
pub struct FormSubmissionController {
    client: FetchClient,
    backend: BackendConfig,
    analytics: Arc<dyn Analytics>,
    analytics_enabled: bool,
    logger: StructuredLogger,
    slots: [FormSlot; 2],
}

impl std::fmt::Debug for FormSubmissionController {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FormSubmissionController")
            .field("client", &self.client)
            .field("backend", &self.backend)
            .field("analytics_enabled", &self.analytics_enabled)
            .finish_non_exhaustive()
    }
}

impl FormSubmissionController {
    /// Create a controller from configuration.
    pub fn new(config: &LandingConfig, client: FetchClient, timer: impl Timer + 'static) -> Self {
        let timer: Arc<dyn Timer> = Arc::new(timer);
        let hide_after = config.status.success_hide_delay();
        let slot = || FormSlot {
            status: StatusRenderer::new(hide_after, Arc::clone(&timer)),
            in_flight: InFlight::new(),
        };

        Self {
            client,
            backend: config.backend.clone(),
            analytics: Arc::new(NoopAnalytics),
            analytics_enabled: config.analytics.enabled,
            logger: StructuredLogger::new(),
            slots: [slot(), slot()],
        }
    }

    /// Report conversions to `analytics`.
    pub fn with_analytics(mut self, analytics: impl Analytics + 'static) -> Self {
        self.analytics = Arc::new(analytics);
        self
    }

    /// Use `logger` for diagnostics.
    pub fn with_logger(mut self, logger: StructuredLogger) -> Self {
        self.logger = logger;
        self
    }

    /// Logger used for diagnostics.
    pub fn logger(&self) -> &StructuredLogger {
        &self.logger
    }

    /// Whether a request for `kind` is in flight.
    pub fn is_in_flight(&self, kind: FormKind) -> bool {
        self.slot(kind).in_flight.is_active()
    }

    /// Submit the waitlist form.
    pub async fn submit_waitlist<S: FormScope>(&self, scope: &S) -> SubmissionOutcome {
        self.submit::<WaitlistForm, S>(scope).await
    }

    /// Submit the contact form.
    pub async fn submit_contact<S: FormScope>(&self, scope: &S) -> SubmissionOutcome {
        self.submit::<ContactForm, S>(scope).await
    }

    /// Submit whichever form `kind` names.
    pub async fn submit_kind<S: FormScope>(&self, kind: FormKind, scope: &S) -> SubmissionOutcome {
        match kind {
            FormKind::Waitlist => self.submit_waitlist(scope).await,
            FormKind::Contact => self.submit_contact(scope).await,
        }
    }

    /// Run one submission attempt for form `H`.
    ///
    /// Writes to `scope` only: the status region, the submit button, and on
    /// success a reset.
    pub async fn submit<H: FormHandler, S: FormScope>(&self, scope: &S) -> SubmissionOutcome {
        let slot = self.slot(H::KIND);
        let mut attempt = SubmissionAttempt::new(H::KIND);
        let logger = self
            .logger
            .clone()
            .with_form(H::KIND)
            .with_submission(attempt.id().clone());

        if slot.in_flight.is_active() {
            logger.debug("submission ignored; request already in flight");
            return SubmissionOutcome::Busy;
        }

        self.step(&mut attempt, SubmissionState::Validating, &logger);
        let submission = match H::validate(H::read(scope)) {
            Ok(submission) => submission,
            Err(reason) => {
                self.step(&mut attempt, SubmissionState::Rejected, &logger);
                let message = reason.to_string();
                logger
                    .debug_builder("submission rejected")
                    .field("reason", message.clone())
                    .emit();
                slot.status.show(scope, &message, MessageKind::Error);
                self.settle(&mut attempt, &logger);
                return SubmissionOutcome::Rejected { reason, message };
            }
        };

        let Some(_loading) = slot.in_flight.try_begin(scope) else {
            logger.debug("submission ignored; request already in flight");
            return SubmissionOutcome::Busy;
        };
        self.step(&mut attempt, SubmissionState::Submitting, &logger);

        let url = self.backend.endpoint_url(H::KIND);
        let result = self.post(&url, &submission).await;

        let outcome = match result.and_then(|response| resolve(&H::COPY, &response)) {
            Ok(Resolution::Accepted { message }) => {
                self.step(&mut attempt, SubmissionState::Succeeded, &logger);
                logger.info("submission accepted");
                slot.status.show(scope, &message, MessageKind::Success);
                scope.reset();
                self.track::<H>(&logger);
                SubmissionOutcome::Succeeded { message }
            }
            Ok(Resolution::Refused { status, message }) => {
                self.step(&mut attempt, SubmissionState::Failed, &logger);
                logger
                    .warn_builder("submission refused")
                    .field_i64("status", i64::from(status))
                    .field("error", message.clone())
                    .emit();
                slot.status.show(scope, &message, MessageKind::Error);
                SubmissionOutcome::Failed { status, message }
            }
            Err(err) => {
                self.step(&mut attempt, SubmissionState::Failed, &logger);
                let cause = err.to_string();
                logger
                    .error_builder("submission failed")
                    .field("url", url.clone())
                    .field("error", cause.clone())
                    .emit();
                slot.status.show(scope, NETWORK_ERROR_MESSAGE, MessageKind::Error);
                SubmissionOutcome::NetworkError {
                    message: NETWORK_ERROR_MESSAGE.to_string(),
                    cause,
                }
            }
        };

        self.settle(&mut attempt, &logger);
        outcome
    }

    async fn post<T: Serialize>(
        &self,
        url: &str,
        body: &T,
    ) -> Result<landing_data::Response, FetchError> {
        self.client.post(url).json(body)?.send().await
    }

    fn track<H: FormHandler>(&self, logger: &StructuredLogger) {
        if !self.analytics_enabled {
            return;
        }
        if let Err(err) = self.analytics.track(&H::COPY.event) {
            logger
                .debug_builder("analytics event dropped")
                .field("event", H::COPY.event.name)
                .field("error", err.to_string())
                .emit();
        }
    }

    fn step(&self, attempt: &mut SubmissionAttempt, next: SubmissionState, logger: &StructuredLogger) {
        if let Err(err) = attempt.advance(next) {
            logger.warn(&err.to_string());
        }
    }

    fn settle(&self, attempt: &mut SubmissionAttempt, logger: &StructuredLogger) {
        if let Err(err) = attempt.finish() {
            logger.warn(&err.to_string());
        }
        let path: Vec<&str> = attempt.history().iter().map(|s| s.as_str()).collect();
        logger
            .debug_builder("attempt settled")
            .field("states", path.join(" -> "))
            .emit();
    }

    fn slot(&self, kind: FormKind) -> &FormSlot {
        &self.slots[kind.index()]
    }
}
