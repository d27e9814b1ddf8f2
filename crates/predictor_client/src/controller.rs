//! Form state and the prediction request lifecycle.

use chrono::Local;

use crate::{
    error::PredictError,
    protocol::{PredictRequest, PredictionResult},
};

/// Placeholder flight code shown on first launch.
pub const DEFAULT_FLIGHT_NUMBER: &str = "UA245";

/// User-editable inputs. The flight number is upper-cased on every write;
/// the date is the raw ISO calendar-date string from the date control.
/// Never persisted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormInput {
    flight_number: String,
    flight_date: String,
}

impl FormInput {
    /// Mount-time defaults: placeholder flight code and the current local
    /// date.
    pub fn with_today() -> Self {
        Self {
            flight_number: DEFAULT_FLIGHT_NUMBER.to_string(),
            flight_date: Local::now().format("%Y-%m-%d").to_string(),
        }
    }

    pub fn flight_number(&self) -> &str {
        &self.flight_number
    }

    pub fn flight_date(&self) -> &str {
        &self.flight_date
    }

    /// The submit gate: both fields non-empty. No further validation here;
    /// the server owns format checking.
    pub fn is_complete(&self) -> bool {
        !self.flight_number.trim().is_empty() && !self.flight_date.trim().is_empty()
    }
}

/// Lifecycle of the current prediction cycle. Exactly one variant holds at
/// any time; only [`PredictController::begin_submission`] and
/// [`PredictController::complete`] transition it.
#[derive(Debug, Clone, PartialEq)]
pub enum RequestState {
    Idle,
    Loading { submission: u64 },
    Success(PredictionResult),
    Error(String),
}

/// Owns the form and request state and enforces the
/// single-outstanding-request policy itself, independent of the submit
/// control being disabled in the presentation layer.
#[derive(Debug)]
pub struct PredictController {
    form: FormInput,
    state: RequestState,
    last_submission: u64,
}

impl Default for PredictController {
    fn default() -> Self {
        Self::new()
    }
}

impl PredictController {
    pub fn new() -> Self {
        Self {
            form: FormInput::with_today(),
            state: RequestState::Idle,
            last_submission: 0,
        }
    }

    pub fn form(&self) -> &FormInput {
        &self.form
    }

    pub fn state(&self) -> &RequestState {
        &self.state
    }

    pub fn is_loading(&self) -> bool {
        matches!(self.state, RequestState::Loading { .. })
    }

    pub fn set_flight_number(&mut self, value: &str) {
        self.form.flight_number = value.to_uppercase();
    }

    pub fn set_flight_date(&mut self, value: &str) {
        self.form.flight_date = value.to_string();
    }

    /// Starts a new cycle: discards any previous result or error, moves to
    /// Loading, and returns the numbered request snapshot for the caller to
    /// dispatch. Refuses while a request is already in flight or while a
    /// required field is empty; exactly one outbound request corresponds to
    /// each `Some` return.
    pub fn begin_submission(&mut self) -> Option<(u64, PredictRequest)> {
        if self.is_loading() || !self.form.is_complete() {
            return None;
        }

        self.last_submission += 1;
        let submission = self.last_submission;
        self.state = RequestState::Loading { submission };
        Some((
            submission,
            PredictRequest {
                flight_number: self.form.flight_number.clone(),
                flight_date: self.form.flight_date.clone(),
            },
        ))
    }

    /// Applies a resolution and reports whether it was accepted. Only the
    /// resolution of the submission currently in flight is observable;
    /// anything else (a response arriving after the cycle restarted, or a
    /// duplicate) is dropped without touching the state.
    pub fn complete(
        &mut self,
        submission: u64,
        outcome: Result<PredictionResult, PredictError>,
    ) -> bool {
        match self.state {
            RequestState::Loading {
                submission: current,
            } if current == submission => {
                self.state = match outcome {
                    Ok(result) => RequestState::Success(result),
                    Err(err) => RequestState::Error(err.to_string()),
                };
                true
            }
            _ => {
                tracing::debug!(submission, "ignoring stale prediction resolution");
                false
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    fn success_result() -> PredictionResult {
        serde_json::from_value(json!({
            "delayed_probability": 0.73,
            "delayed_label": 1,
            "model_version": "gbm-2024-05"
        }))
        .expect("deserialize")
    }

    #[test]
    fn starts_idle_with_placeholder_flight_and_todays_date() {
        let controller = PredictController::new();
        assert_eq!(controller.state(), &RequestState::Idle);
        assert_eq!(controller.form().flight_number(), "UA245");
        assert_eq!(
            controller.form().flight_date(),
            Local::now().format("%Y-%m-%d").to_string()
        );
    }

    #[test]
    fn flight_number_is_upper_cased_on_write() {
        let mut controller = PredictController::new();
        controller.set_flight_number("ua245");
        assert_eq!(controller.form().flight_number(), "UA245");
    }

    #[test]
    fn empty_fields_refuse_submission() {
        let mut controller = PredictController::new();
        controller.set_flight_number("  ");
        assert!(controller.begin_submission().is_none());
        assert_eq!(controller.state(), &RequestState::Idle);
    }

    #[test]
    fn submission_snapshots_the_form_and_enters_loading() {
        let mut controller = PredictController::new();
        controller.set_flight_number("aa100");
        controller.set_flight_date("2026-08-06");

        let (submission, request) = controller.begin_submission().expect("submission");
        assert_eq!(request.flight_number, "AA100");
        assert_eq!(request.flight_date, "2026-08-06");
        assert!(controller.is_loading());

        // Edits after submit do not touch the snapshot already taken.
        controller.set_flight_number("DL9");
        assert_eq!(request.flight_number, "AA100");

        assert!(controller.complete(submission, Ok(success_result())));
        assert!(matches!(controller.state(), RequestState::Success(_)));
    }

    #[test]
    fn refuses_resubmission_while_loading() {
        let mut controller = PredictController::new();
        let (submission, _) = controller.begin_submission().expect("submission");
        assert!(controller.begin_submission().is_none());

        assert!(controller.complete(submission, Ok(success_result())));
        // A fresh cycle is valid again from Success.
        assert!(controller.begin_submission().is_some());
    }

    #[test]
    fn failure_enters_error_and_stays_resubmittable() {
        let mut controller = PredictController::new();
        let (submission, _) = controller.begin_submission().expect("submission");
        assert!(controller.complete(
            submission,
            Err(PredictError::Api("invalid flight number".to_string()))
        ));
        assert_eq!(
            controller.state(),
            &RequestState::Error("invalid flight number".to_string())
        );
        assert!(controller.begin_submission().is_some());
    }

    #[test]
    fn status_fallback_message_is_rendered_when_server_sends_no_text() {
        let mut controller = PredictController::new();
        let (submission, _) = controller.begin_submission().expect("submission");
        controller.complete(submission, Err(PredictError::Status(400)));
        assert_eq!(controller.state(), &RequestState::Error("HTTP 400".to_string()));
    }

    #[test]
    fn stale_resolution_is_ignored_after_the_cycle_restarts() {
        let mut controller = PredictController::new();
        let (first, _) = controller.begin_submission().expect("submission");
        controller.complete(first, Err(PredictError::Status(502)));

        let (second, _) = controller.begin_submission().expect("submission");
        assert_ne!(first, second);

        // The first request's response straggles in after resubmission and
        // must not overwrite the in-flight cycle.
        assert!(!controller.complete(first, Ok(success_result())));
        assert_eq!(controller.state(), &RequestState::Loading { submission: second });

        assert!(controller.complete(second, Ok(success_result())));
        assert!(matches!(controller.state(), RequestState::Success(_)));
    }

    #[test]
    fn duplicate_resolution_is_dropped() {
        let mut controller = PredictController::new();
        let (submission, _) = controller.begin_submission().expect("submission");
        assert!(controller.complete(submission, Ok(success_result())));
        assert!(!controller.complete(
            submission,
            Err(PredictError::Transport("connection reset".to_string()))
        ));
        assert!(matches!(controller.state(), RequestState::Success(_)));
    }
}
