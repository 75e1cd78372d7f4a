//! Form controller: wires UI events to the validation engine and the
//! submitter.

use std::collections::HashMap;

use tracing::{error, info, warn};

use formguard_core::{
    FieldState, FieldStatus, FormError, Normalizer, Result, Rule, Trigger, ValidationEngine,
    ValidationResult,
};

use crate::counter::CounterReading;
use crate::error::SubmitError;
use crate::notification::Notification;
use crate::progress::Progress;
use crate::submit::{Ack, Submission, Submitter};

/// Lifecycle of the submit button.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SubmitState {
    /// Ready to submit.
    #[default]
    Idle,
    /// Waiting for the submitter.
    Submitting,
    /// Last submission was accepted.
    Succeeded,
    /// Last submission failed.
    Failed,
}

impl SubmitState {
    /// Returns whether a new submit is accepted in this state.
    pub fn accepts_submit(self) -> bool {
        matches!(self, Self::Idle | Self::Failed)
    }
}

/// What a call to [`FormController::submit`] did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// A submission is in flight or has just succeeded.
    Ignored,
    /// Some fields are invalid; nothing was sent.
    Invalid {
        /// First invalid field, to focus.
        focus: String,
        /// Full validation result.
        result: ValidationResult,
        /// Notification to show.
        notification: Notification,
    },
    /// The submitter accepted the form. Fields have been reset.
    Sent {
        /// Acknowledgement from the submitter.
        ack: Ack,
        /// Notification to show.
        notification: Notification,
    },
    /// The submitter failed. Values are kept.
    Failed {
        /// The submitter's error.
        error: SubmitError,
        /// Notification to show.
        notification: Notification,
    },
}

impl SubmitOutcome {
    /// Returns the notification to show, if any.
    pub fn notification(&self) -> Option<&Notification> {
        match self {
            Self::Ignored => None,
            Self::Invalid { notification, .. }
            | Self::Sent { notification, .. }
            | Self::Failed { notification, .. } => Some(notification),
        }
    }
}

/// Marks a submission as in flight. Dropped before [`finish`](Self::finish),
/// it puts the state back to idle.
struct InFlight<'a> {
    state: &'a mut SubmitState,
    pending: bool,
}

impl<'a> InFlight<'a> {
    fn start(state: &'a mut SubmitState) -> Self {
        *state = SubmitState::Submitting;
        Self {
            state,
            pending: true,
        }
    }

    fn finish(mut self) {
        self.pending = false;
    }
}

impl Drop for InFlight<'_> {
    fn drop(&mut self) {
        if self.pending {
            warn!("submission cancelled");
            *self.state = SubmitState::Idle;
        }
    }
}

/// Holds the live values and states of a form.
///
/// The controller observes three kinds of events: `input` while the user
/// types, `blur` when a field loses focus, and `submit`.
pub struct FormController<S> {
    engine: ValidationEngine,
    submitter: S,
    states: Vec<FieldState>,
    submit_state: SubmitState,
}

impl<S: Submitter> FormController<S> {
    /// Creates a controller with every field empty and unvalidated.
    pub fn new(engine: ValidationEngine, submitter: S) -> Self {
        let states = engine.spec().field_names().map(FieldState::new).collect();
        Self {
            engine,
            submitter,
            states,
            submit_state: SubmitState::Idle,
        }
    }

    /// Returns the engine.
    pub fn engine(&self) -> &ValidationEngine {
        &self.engine
    }

    /// Returns the submitter.
    pub fn submitter(&self) -> &S {
        &self.submitter
    }

    /// Returns every field state in declaration order.
    pub fn states(&self) -> &[FieldState] {
        &self.states
    }

    /// Returns a field's state.
    pub fn state(&self, field: &str) -> Option<&FieldState> {
        self.states.iter().find(|state| state.field == field)
    }

    /// Returns the current values keyed by field name.
    pub fn values(&self) -> HashMap<String, String> {
        self.states
            .iter()
            .map(|state| (state.field.clone(), state.value.clone()))
            .collect()
    }

    /// Returns the submit lifecycle state.
    pub fn submit_state(&self) -> SubmitState {
        self.submit_state
    }

    /// Handles typing in a field.
    ///
    /// Applies input-time normalizers and clears an error shown on the
    /// field; the new value is not validated until blur or submit.
    pub fn input(&mut self, field: &str, value: &str) -> Result<&FieldState> {
        let normalizer = self.normalizer(field)?;
        let value = match normalizer {
            Some(normalizer) if normalizer.trigger() == Trigger::Input => normalizer.apply(value),
            _ => value.to_string(),
        };

        let state = self.state_mut(field)?;
        state.value = value;
        if state.is_invalid() {
            state.status = FieldStatus::Unvalidated;
        }
        Ok(&*state)
    }

    /// Handles a field losing focus: applies blur-time normalizers, then
    /// validates the field.
    pub fn blur(&mut self, field: &str) -> Result<&FieldState> {
        let normalizer = self.normalizer(field)?;
        let current = self.state_mut(field)?.value.clone();
        let value = match normalizer {
            Some(normalizer) if normalizer.trigger() == Trigger::Blur => normalizer.apply(&current),
            _ => current,
        };

        let validated = self.engine.validate_field(field, &value)?;
        let state = self.state_mut(field)?;
        *state = validated;
        Ok(&*state)
    }

    /// Validates every field and stores the resulting states.
    pub fn validate(&mut self) -> ValidationResult {
        let result = self.engine.validate_form(&self.values());
        self.states.clone_from(&result.fields);
        result
    }

    /// Validates and, when every field is valid, sends the form.
    ///
    /// Submits are ignored while one is in flight and after a success until
    /// [`reset_submit`](Self::reset_submit) is called. A failed submit can
    /// be retried straight away. Dropping the future while the submitter
    /// is pending returns the controller to [`SubmitState::Idle`].
    pub async fn submit(&mut self) -> SubmitOutcome {
        if !self.submit_state.accepts_submit() {
            return SubmitOutcome::Ignored;
        }

        let result = self.validate();
        if let Some(focus) = result.first_error().map(|state| state.field.clone()) {
            warn!(errors = ?result.errors, "submit blocked by invalid fields");
            return SubmitOutcome::Invalid {
                focus,
                result,
                notification: Notification::invalid_form(),
            };
        }

        let submission = Submission::from_states(&self.states);
        info!(fields = submission.len(), "submitting form");

        let in_flight = InFlight::start(&mut self.submit_state);
        let sent = self.submitter.submit(&submission).await;
        in_flight.finish();

        match sent {
            Ok(ack) => {
                info!(reference = %ack.reference, "form submitted");
                self.submit_state = SubmitState::Succeeded;
                self.reset();
                SubmitOutcome::Sent {
                    ack,
                    notification: Notification::sent(),
                }
            }
            Err(err) => {
                error!(error = %err, "form submission failed");
                self.submit_state = SubmitState::Failed;
                SubmitOutcome::Failed {
                    error: err,
                    notification: Notification::submit_failed(),
                }
            }
        }
    }

    /// Clears every value and returns every field to unvalidated.
    pub fn reset(&mut self) {
        for state in &mut self.states {
            *state = FieldState::new(state.field.clone());
        }
    }

    /// Returns the submit button to idle.
    pub fn reset_submit(&mut self) {
        self.submit_state = SubmitState::Idle;
    }

    /// Returns the completion of the required fields.
    pub fn progress(&self) -> Progress {
        Progress::measure(self.engine.spec(), &self.values())
    }

    /// Returns a character counter reading for a field with a maximum
    /// length rule.
    pub fn counter(&self, field: &str) -> Option<CounterReading> {
        let max = self
            .engine
            .spec()
            .field(field)?
            .rules
            .iter()
            .find_map(|rule| match rule {
                Rule::MaxLength(max) => Some(*max),
                _ => None,
            })?;
        let value = self.state(field).map_or("", |state| state.value.as_str());
        Some(CounterReading::measure(value, max))
    }

    fn normalizer(&self, field: &str) -> Result<Option<Normalizer>> {
        self.engine
            .spec()
            .field(field)
            .map(|spec| spec.normalizer)
            .ok_or_else(|| FormError::UnknownField(field.to_string()))
    }

    fn state_mut(&mut self, field: &str) -> Result<&mut FieldState> {
        self.states
            .iter_mut()
            .find(|state| state.field == field)
            .ok_or_else(|| FormError::UnknownField(field.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use std::sync::{Arc, Mutex};
    use std::time::Duration;

    use futures::future::BoxFuture;

    use super::*;
    use crate::counter::CounterTone;
    use formguard_core::contact::fields::{EMAIL, MENSAJE, NOMBRE, TELEFONO};
    use formguard_core::contact_form;

    /// Records submissions and answers with a fixed result.
    struct Recorder {
        sent: Mutex<Vec<Submission>>,
        answer: std::result::Result<Ack, SubmitError>,
    }

    impl Recorder {
        fn accepting() -> Arc<Self> {
            Arc::new(Self {
                sent: Mutex::new(Vec::new()),
                answer: Ok(Ack {
                    reference: "ref-1".to_string(),
                }),
            })
        }

        fn failing() -> Arc<Self> {
            Arc::new(Self {
                sent: Mutex::new(Vec::new()),
                answer: Err(SubmitError::Transport("offline".to_string())),
            })
        }

        fn count(&self) -> usize {
            self.sent.lock().unwrap().len()
        }
    }

    impl Submitter for Recorder {
        fn submit<'a>(
            &'a self,
            submission: &'a Submission,
        ) -> BoxFuture<'a, std::result::Result<Ack, SubmitError>> {
            Box::pin(async move {
                self.sent.lock().unwrap().push(submission.clone());
                self.answer.clone()
            })
        }
    }

    fn controller(submitter: Arc<Recorder>) -> FormController<Arc<Recorder>> {
        FormController::new(ValidationEngine::new(contact_form()), submitter)
    }

    fn fill_valid(form: &mut FormController<Arc<Recorder>>) {
        form.input(NOMBRE, "ana garcía").unwrap();
        form.input(EMAIL, "Ana@Example.com").unwrap();
        form.input(MENSAJE, "Hola, quiero un presupuesto").unwrap();
    }

    #[test]
    fn test_initial_states() {
        let form = controller(Recorder::accepting());
        assert_eq!(form.states().len(), 6);
        assert!(form
            .states()
            .iter()
            .all(|s| s.status == FieldStatus::Unvalidated));
        assert_eq!(form.submit_state(), SubmitState::Idle);
    }

    #[test]
    fn test_unknown_field() {
        let mut form = controller(Recorder::accepting());
        assert!(matches!(
            form.input("fax", "1"),
            Err(FormError::UnknownField(_))
        ));
        assert!(matches!(form.blur("fax"), Err(FormError::UnknownField(_))));
    }

    #[test]
    fn test_blur_validates() {
        let mut form = controller(Recorder::accepting());
        form.input(NOMBRE, "J").unwrap();
        assert_eq!(form.state(NOMBRE).unwrap().status, FieldStatus::Unvalidated);

        let state = form.blur(NOMBRE).unwrap();
        assert_eq!(
            state.message(),
            Some("El nombre debe tener al menos 2 caracteres")
        );
    }

    #[test]
    fn test_input_clears_error() {
        let mut form = controller(Recorder::accepting());
        form.blur(EMAIL).unwrap();
        assert!(form.state(EMAIL).unwrap().is_invalid());

        form.input(EMAIL, "a").unwrap();
        assert_eq!(form.state(EMAIL).unwrap().status, FieldStatus::Unvalidated);
    }

    #[test]
    fn test_input_keeps_valid_status() {
        let mut form = controller(Recorder::accepting());
        form.input(EMAIL, "a@b.co").unwrap();
        form.blur(EMAIL).unwrap();
        form.input(EMAIL, "a@b.com").unwrap();
        assert_eq!(form.state(EMAIL).unwrap().status, FieldStatus::Valid);
    }

    #[test]
    fn test_normalizers() {
        let mut form = controller(Recorder::accepting());

        let phone = form.input(TELEFONO, "555-123-4567").unwrap();
        assert_eq!(phone.value, "(555) 123-4567");

        form.input(NOMBRE, "josé núñez").unwrap();
        assert_eq!(form.state(NOMBRE).unwrap().value, "josé núñez");
        let name = form.blur(NOMBRE).unwrap();
        assert_eq!(name.value, "José Núñez");
        assert!(name.is_valid());

        form.input(EMAIL, "  Ana@X.COM ").unwrap();
        assert_eq!(form.blur(EMAIL).unwrap().value, "ana@x.com");
    }

    #[tokio::test]
    async fn test_submit_invalid() {
        let recorder = Recorder::accepting();
        let mut form = controller(recorder.clone());
        form.input(EMAIL, "ana@x.com").unwrap();

        let outcome = form.submit().await;
        match outcome {
            SubmitOutcome::Invalid {
                focus,
                result,
                notification,
            } => {
                assert_eq!(focus, NOMBRE);
                assert_eq!(result.errors, vec![NOMBRE, MENSAJE]);
                assert_eq!(notification, Notification::invalid_form());
            }
            other => panic!("Expected invalid outcome, got {other:?}"),
        }
        assert_eq!(recorder.count(), 0);
        assert_eq!(form.submit_state(), SubmitState::Idle);
        assert!(form.state(NOMBRE).unwrap().is_invalid());
        assert!(form.state(EMAIL).unwrap().is_valid());
    }

    #[tokio::test]
    async fn test_submit_success_resets() {
        let recorder = Recorder::accepting();
        let mut form = controller(recorder.clone());
        fill_valid(&mut form);

        let outcome = form.submit().await;
        assert!(matches!(outcome, SubmitOutcome::Sent { ref ack, .. } if ack.reference == "ref-1"));
        assert_eq!(outcome.notification(), Some(&Notification::sent()));
        assert_eq!(form.submit_state(), SubmitState::Succeeded);

        let sent = recorder.sent.lock().unwrap()[0].clone();
        assert_eq!(sent.len(), 6);
        assert_eq!(sent.get(MENSAJE), Some("Hola, quiero un presupuesto"));

        assert!(form
            .states()
            .iter()
            .all(|s| s.value.is_empty() && s.status == FieldStatus::Unvalidated));
    }

    #[tokio::test]
    async fn test_submit_ignored_until_reset() {
        let recorder = Recorder::accepting();
        let mut form = controller(recorder.clone());
        fill_valid(&mut form);
        form.submit().await;

        fill_valid(&mut form);
        assert_eq!(form.submit().await, SubmitOutcome::Ignored);
        assert_eq!(recorder.count(), 1);

        form.reset_submit();
        assert!(matches!(form.submit().await, SubmitOutcome::Sent { .. }));
        assert_eq!(recorder.count(), 2);
    }

    #[tokio::test]
    async fn test_submit_failure_keeps_values() {
        let recorder = Recorder::failing();
        let mut form = controller(recorder.clone());
        fill_valid(&mut form);

        let outcome = form.submit().await;
        assert!(matches!(
            outcome,
            SubmitOutcome::Failed { error: SubmitError::Transport(_), .. }
        ));
        assert_eq!(outcome.notification(), Some(&Notification::submit_failed()));
        assert_eq!(form.submit_state(), SubmitState::Failed);
        assert_eq!(form.state(MENSAJE).unwrap().value, "Hola, quiero un presupuesto");

        // Failed submits can be retried immediately.
        assert!(matches!(form.submit().await, SubmitOutcome::Failed { .. }));
        assert_eq!(recorder.count(), 2);
    }

    /// Never answers.
    struct Stalled;

    impl Submitter for Stalled {
        fn submit<'a>(
            &'a self,
            _submission: &'a Submission,
        ) -> BoxFuture<'a, std::result::Result<Ack, SubmitError>> {
            Box::pin(futures::future::pending())
        }
    }

    #[tokio::test(start_paused = true)]
    async fn test_cancelled_submit_returns_to_idle() {
        let mut form = FormController::new(ValidationEngine::new(contact_form()), Stalled);
        form.input(NOMBRE, "Ana").unwrap();
        form.input(EMAIL, "ana@x.com").unwrap();
        form.input(MENSAJE, "Hola, quiero un presupuesto").unwrap();

        let attempt = tokio::time::timeout(Duration::from_secs(5), form.submit()).await;
        assert!(attempt.is_err());
        assert_eq!(form.submit_state(), SubmitState::Idle);
        assert_eq!(form.state(NOMBRE).unwrap().value, "Ana");

        // A new submit reaches the submitter again instead of being ignored.
        let retry = tokio::time::timeout(Duration::from_secs(5), form.submit()).await;
        assert!(retry.is_err());
        assert_eq!(form.submit_state(), SubmitState::Idle);
    }

    #[test]
    fn test_progress_and_counter() {
        let mut form = controller(Recorder::accepting());
        form.input(NOMBRE, "Ana").unwrap();
        assert_eq!(form.progress().percent, 33);

        form.input(MENSAJE, &"x".repeat(460)).unwrap();
        let reading = form.counter(MENSAJE).unwrap();
        assert_eq!(reading.length, 460);
        assert_eq!(reading.max, 500);
        assert_eq!(reading.tone, CounterTone::Danger);

        assert!(form.counter(TELEFONO).is_none());
    }

    #[test]
    fn test_reset() {
        let mut form = controller(Recorder::accepting());
        fill_valid(&mut form);
        form.validate();
        form.reset();
        assert_eq!(form.progress().percent, 0);
        assert!(form.states().iter().all(|s| s.status == FieldStatus::Unvalidated));
    }
}
