//! Submission attempt state machine.

use std::fmt;

use landing_core::{FormKind, SubmissionId};
use serde::Serialize;

use crate::FormError;

/// States of a single submission attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SubmissionState {
    /// Nothing in progress.
    Idle,
    /// Reading and checking fields.
    Validating,
    /// A field check failed; no request was made.
    Rejected,
    /// Request in flight.
    Submitting,
    /// Backend accepted the submission.
    Succeeded,
    /// Backend refused it, or the request never completed.
    Failed,
}

impl SubmissionState {
    pub fn as_str(&self) -> &'static str {
        match self {
            SubmissionState::Idle => "idle",
            SubmissionState::Validating => "validating",
            SubmissionState::Rejected => "rejected",
            SubmissionState::Submitting => "submitting",
            SubmissionState::Succeeded => "succeeded",
            SubmissionState::Failed => "failed",
        }
    }

    /// Check whether `next` may follow this state.
    pub fn can_transition_to(&self, next: SubmissionState) -> bool {
        use SubmissionState::*;
        matches!(
            (*self, next),
            (Idle, Validating)
                | (Validating, Rejected)
                | (Validating, Submitting)
                | (Submitting, Succeeded)
                | (Submitting, Failed)
                | (Rejected, Idle)
                | (Succeeded, Idle)
                | (Failed, Idle)
        )
    }

    /// Terminal states of an attempt, before returning to idle.
    pub fn is_settled(&self) -> bool {
        matches!(
            self,
            SubmissionState::Rejected | SubmissionState::Succeeded | SubmissionState::Failed
        )
    }
}

impl fmt::Display for SubmissionState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One pass through the state machine for one form.
#[derive(Debug, Clone)]
pub struct SubmissionAttempt {
    id: SubmissionId,
    state: SubmissionState,
    history: Vec<SubmissionState>,
}

impl SubmissionAttempt {
    /// Start a new attempt in `Idle`.
    pub fn new(kind: FormKind) -> Self {
        Self {
            id: SubmissionId::next(kind),
            state: SubmissionState::Idle,
            history: vec![SubmissionState::Idle],
        }
    }

    /// Move to `next`.
    pub fn advance(&mut self, next: SubmissionState) -> Result<(), FormError> {
        if !self.state.can_transition_to(next) {
            return Err(FormError::InvalidTransition {
                from: self.state,
                to: next,
            });
        }
        self.state = next;
        self.history.push(next);
        Ok(())
    }

    /// Return to `Idle` from a settled state.
    pub fn finish(&mut self) -> Result<(), FormError> {
        self.advance(SubmissionState::Idle)
    }

    pub fn id(&self) -> &SubmissionId {
        &self.id
    }

    pub fn state(&self) -> SubmissionState {
        self.state
    }

    /// Every state visited, starting with `Idle`.
    pub fn history(&self) -> &[SubmissionState] {
        &self.history
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use SubmissionState::*;

    #[test]
    fn test_happy_path() {
        let mut attempt = SubmissionAttempt::new(FormKind::Waitlist);
        attempt.advance(Validating).unwrap();
        attempt.advance(Submitting).unwrap();
        attempt.advance(Succeeded).unwrap();
        assert!(attempt.state().is_settled());
        attempt.finish().unwrap();

        assert_eq!(
            attempt.history(),
            &[Idle, Validating, Submitting, Succeeded, Idle]
        );
    }

    #[test]
    fn test_rejected_never_submits() {
        let mut attempt = SubmissionAttempt::new(FormKind::Contact);
        attempt.advance(Validating).unwrap();
        attempt.advance(Rejected).unwrap();

        assert_eq!(
            attempt.advance(Submitting),
            Err(FormError::InvalidTransition {
                from: Rejected,
                to: Submitting
            })
        );
        assert_eq!(attempt.state(), Rejected);
    }

    #[test]
    fn test_cannot_skip_validation() {
        let mut attempt = SubmissionAttempt::new(FormKind::Waitlist);
        assert!(attempt.advance(Submitting).is_err());
        assert!(attempt.finish().is_err());
    }
}
