//! # Submission Workflow
//!
//! The state machine a booking submission moves through.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                                                                         │
//! │   Idle ──submit──► Validating ──ok──► Submitting ──2xx──► Confirmed    │
//! │    ▲                   │                   │                  │         │
//! │    │                invalid            non-2xx /              │         │
//! │    │                   │               network                │         │
//! │    │◄──────────────────┘                   ▼                  │         │
//! │    │◄──────────── acknowledge ──────── Failed                 │         │
//! │    │◄──────────────────────────── reset (new form) ───────────┘         │
//! │                                                                         │
//! │   While Submitting, any further submit is refused.                      │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::fmt;

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::error::{CoreError, CoreResult};

/// Where a submission currently is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export)]
pub enum SubmissionState {
    #[default]
    Idle,
    Validating,
    Submitting,
    Confirmed,
    Failed,
}

impl SubmissionState {
    pub const fn as_str(&self) -> &'static str {
        match self {
            SubmissionState::Idle => "idle",
            SubmissionState::Validating => "validating",
            SubmissionState::Submitting => "submitting",
            SubmissionState::Confirmed => "confirmed",
            SubmissionState::Failed => "failed",
        }
    }

    /// True while a request is outstanding.
    pub fn is_busy(&self) -> bool {
        matches!(self, SubmissionState::Validating | SubmissionState::Submitting)
    }

    /// Whether `self → next` is an edge of the machine.
    pub fn can_transition_to(&self, next: SubmissionState) -> bool {
        use SubmissionState::*;
        matches!(
            (self, next),
            (Idle, Validating)
                | (Validating, Idle)
                | (Validating, Submitting)
                | (Submitting, Confirmed)
                | (Submitting, Failed)
                | (Submitting, Idle)
                | (Failed, Idle)
                | (Confirmed, Idle)
        )
    }
}

impl fmt::Display for SubmissionState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Tracks one form's submission state and refuses illegal moves.
///
/// `(Submitting, Idle)` exists for abandonment: the user left the page
/// and any late response must be dropped.
#[derive(Debug, Clone, Default)]
pub struct Submission {
    state: SubmissionState,
}

impl Submission {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> SubmissionState {
        self.state
    }

    /// Starts a submit attempt.
    ///
    /// ## Errors
    /// [`CoreError::SubmissionInProgress`] if one is already running.
    pub fn begin(&mut self) -> CoreResult<()> {
        if self.state.is_busy() {
            return Err(CoreError::SubmissionInProgress);
        }
        // A previous failure or confirmation is implicitly acknowledged.
        if matches!(self.state, SubmissionState::Failed | SubmissionState::Confirmed) {
            self.state = SubmissionState::Idle;
        }
        self.transition(SubmissionState::Validating)
    }

    /// Validation failed: back to idle with errors shown.
    pub fn reject(&mut self) -> CoreResult<()> {
        self.transition(SubmissionState::Idle)
    }

    /// Validation passed: the request is going out.
    pub fn send(&mut self) -> CoreResult<()> {
        self.transition(SubmissionState::Submitting)
    }

    pub fn confirm(&mut self) -> CoreResult<()> {
        self.transition(SubmissionState::Confirmed)
    }

    pub fn fail(&mut self) -> CoreResult<()> {
        self.transition(SubmissionState::Failed)
    }

    /// User dismissed the failure message or the confirmation.
    pub fn acknowledge(&mut self) -> CoreResult<()> {
        self.transition(SubmissionState::Idle)
    }

    /// The user navigated away. Returns whether a request was in flight.
    pub fn abandon(&mut self) -> bool {
        let was_busy = self.state.is_busy();
        self.state = SubmissionState::Idle;
        was_busy
    }

    fn transition(&mut self, to: SubmissionState) -> CoreResult<()> {
        if !self.state.can_transition_to(to) {
            return Err(CoreError::InvalidTransition {
                from: self.state,
                to,
            });
        }
        self.state = to;
        Ok(())
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_happy_path() {
        let mut s = Submission::new();
        s.begin().unwrap();
        assert_eq!(s.state(), SubmissionState::Validating);
        s.send().unwrap();
        assert_eq!(s.state(), SubmissionState::Submitting);
        s.confirm().unwrap();
        assert_eq!(s.state(), SubmissionState::Confirmed);
        s.acknowledge().unwrap();
        assert_eq!(s.state(), SubmissionState::Idle);
    }

    #[test]
    fn test_double_submit_refused() {
        let mut s = Submission::new();
        s.begin().unwrap();
        s.send().unwrap();
        assert_eq!(s.begin(), Err(CoreError::SubmissionInProgress));
        assert_eq!(s.state(), SubmissionState::Submitting);
    }

    #[test]
    fn test_invalid_form_returns_to_idle() {
        let mut s = Submission::new();
        s.begin().unwrap();
        s.reject().unwrap();
        assert_eq!(s.state(), SubmissionState::Idle);
    }

    #[test]
    fn test_retry_after_failure() {
        let mut s = Submission::new();
        s.begin().unwrap();
        s.send().unwrap();
        s.fail().unwrap();
        assert_eq!(s.state(), SubmissionState::Failed);
        s.begin().unwrap();
        assert_eq!(s.state(), SubmissionState::Validating);
    }

    #[test]
    fn test_illegal_transition() {
        let mut s = Submission::new();
        let err = s.confirm().unwrap_err();
        assert_eq!(
            err.to_string(),
            "cannot move booking submission from idle to confirmed"
        );
    }

    #[test]
    fn test_abandon_reports_in_flight() {
        let mut s = Submission::new();
        assert!(!s.abandon());
        s.begin().unwrap();
        s.send().unwrap();
        assert!(s.abandon());
        assert_eq!(s.state(), SubmissionState::Idle);
    }
}
