//! Form controller: live validation and the submission state machine
//!
//! A submit attempt validates every field, then takes the page-wide guard,
//! puts the submit control in its busy state and waits out the pre-submit
//! delay. Once the delay has passed the form is serialized and posted on a
//! spawned task. The settled outcome is picked up by [`FormController::tick`]
//! (or awaited with [`FormController::settle`]), which shows the matching
//! toast and always restores the submit control and releases the guard.

use crate::i18n::Catalog;
use crate::state::{validate, FormPayload, NotificationCenter, Severity, SiteForm};
use crate::submit::{SubmitError, SubmitGuard, SubmitPermit, SubmitTransport};
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::oneshot;

/// Where a form is in its submission lifecycle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SubmissionState {
    #[default]
    Idle,
    Validating,
    Submitting,
    Succeeded,
    Failed,
}

/// Result of a single submit attempt
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmitAttempt {
    /// Validation failed; nothing was sent
    Invalid { errors: usize },
    /// A submission is already in flight on this page
    Dropped,
    /// The form is submitting
    Started,
}

/// How a posted submission settled
#[derive(Debug)]
pub enum SubmitOutcome {
    Accepted,
    Rejected { message: Option<String> },
    TransportFailed(SubmitError),
}

/// Scheduled navigation after a successful submission
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Redirect {
    pub destination: String,
    pub at: Instant,
}

impl Redirect {
    pub fn is_due(&self, now: Instant) -> bool {
        now >= self.at
    }
}

/// Fixed delays of the submission flow
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubmitTiming {
    /// Pause between entering the busy state and sending the request
    pub submit_delay: Duration,
    /// Pause between the success toast and the redirect
    pub redirect_delay: Duration,
    pub thank_you_path: String,
}

impl Default for SubmitTiming {
    fn default() -> Self {
        Self {
            submit_delay: Duration::from_millis(800),
            redirect_delay: Duration::from_millis(1000),
            thank_you_path: "thank_you.html".to_string(),
        }
    }
}

enum Stage {
    Delaying { ready_at: Instant },
    Sending(oneshot::Receiver<SubmitOutcome>),
}

/// An accepted submit attempt; dropping it releases the page guard
struct InFlight {
    stage: Stage,
    _permit: SubmitPermit,
}

/// Post the payload once and classify the result
pub async fn send(transport: &dyn SubmitTransport, payload: &FormPayload) -> SubmitOutcome {
    match transport.post_json(payload).await {
        Ok(response) if response.success => SubmitOutcome::Accepted,
        Ok(response) => SubmitOutcome::Rejected {
            message: response.message.filter(|m| !m.is_empty()),
        },
        Err(err) => SubmitOutcome::TransportFailed(err),
    }
}

/// Drives one form on the page
pub struct FormController {
    form: SiteForm,
    guard: SubmitGuard,
    transport: Arc<dyn SubmitTransport>,
    timing: SubmitTiming,
    catalog: &'static Catalog,
    state: SubmissionState,
    last_settled: Option<SubmissionState>,
    in_flight: Option<InFlight>,
}

impl FormController {
    pub fn new(
        form: SiteForm,
        guard: SubmitGuard,
        transport: Arc<dyn SubmitTransport>,
        timing: SubmitTiming,
        catalog: &'static Catalog,
    ) -> Self {
        Self {
            form,
            guard,
            transport,
            timing,
            catalog,
            state: SubmissionState::Idle,
            last_settled: None,
            in_flight: None,
        }
    }

    pub fn form(&self) -> &SiteForm {
        &self.form
    }

    pub fn form_mut(&mut self) -> &mut SiteForm {
        &mut self.form
    }

    pub fn state(&self) -> SubmissionState {
        self.state
    }

    /// Outcome of the most recent settled submission
    pub fn last_settled(&self) -> Option<SubmissionState> {
        self.last_settled
    }

    pub fn is_submitting(&self) -> bool {
        self.in_flight.is_some()
    }

    /// Validate the field at `index` and show or clear its error
    pub fn blur(&mut self, index: usize) {
        let catalog = self.catalog;
        if let Some(field) = self.form.get_field_mut(index) {
            match validate(field) {
                Some(error) => field.show_error(&error.message(catalog)),
                None => field.clear_error(),
            }
        }
    }

    /// Re-check a field after an edit; only ever clears an error
    pub fn input(&mut self, index: usize) {
        if let Some(field) = self.form.get_field_mut(index) {
            if field.is_invalid() && validate(field).is_none() {
                field.clear_error();
            }
        }
    }

    /// Handle a submit event on the form
    pub fn submit(&mut self, notifications: &mut NotificationCenter, now: Instant) -> SubmitAttempt {
        self.state = SubmissionState::Validating;

        let catalog = self.catalog;
        let mut errors = 0;
        for field in self.form.fields.iter_mut() {
            match validate(field) {
                Some(error) => {
                    field.show_error(&error.message(catalog));
                    errors += 1;
                }
                None => field.clear_error(),
            }
        }

        if errors > 0 {
            self.state = self.resting_state();
            self.form.validated = true;
            notifications.show_at(catalog.check_fields, Severity::Danger, now);
            tracing::info!(form = %self.form.id, errors, "form failed validation");
            return SubmitAttempt::Invalid { errors };
        }

        let permit = match self.in_flight {
            Some(_) => None,
            None => self.guard.try_acquire(),
        };
        let Some(permit) = permit else {
            self.state = self.resting_state();
            tracing::debug!(form = %self.form.id, "submit dropped, submission in flight");
            return SubmitAttempt::Dropped;
        };

        self.form.submit.enter_busy(catalog.sending);
        self.in_flight = Some(InFlight {
            stage: Stage::Delaying {
                ready_at: now + self.timing.submit_delay,
            },
            _permit: permit,
        });
        self.state = SubmissionState::Submitting;
        tracing::info!(form = %self.form.id, "form submitting");
        SubmitAttempt::Started
    }

    /// Advance the in-flight submission; returns a redirect once it succeeds
    pub fn tick(&mut self, notifications: &mut NotificationCenter, now: Instant) -> Option<Redirect> {
        let outcome = match &mut self.in_flight.as_mut()?.stage {
            Stage::Delaying { ready_at } => {
                if now >= *ready_at {
                    self.launch();
                }
                return None;
            }
            Stage::Sending(rx) => match rx.try_recv() {
                Ok(outcome) => outcome,
                Err(oneshot::error::TryRecvError::Empty) => return None,
                Err(oneshot::error::TryRecvError::Closed) => {
                    SubmitOutcome::TransportFailed(SubmitError::Interrupted)
                }
            },
        };
        self.finish(outcome, notifications, now)
    }

    /// Wait for the in-flight submission to settle and apply its outcome
    #[cfg(test)]
    pub async fn settle(&mut self, notifications: &mut NotificationCenter) -> Option<Redirect> {
        let ready_at = match self.in_flight.as_ref().map(|f| &f.stage) {
            Some(Stage::Delaying { ready_at }) => Some(*ready_at),
            _ => None,
        };
        if let Some(ready_at) = ready_at {
            tokio::time::sleep_until(tokio::time::Instant::from_std(ready_at)).await;
            self.launch();
        }

        let outcome = match self.in_flight.as_mut().map(|f| &mut f.stage) {
            Some(Stage::Sending(rx)) => rx
                .await
                .unwrap_or(SubmitOutcome::TransportFailed(SubmitError::Interrupted)),
            _ => return None,
        };
        self.finish(outcome, notifications, Instant::now())
    }

    /// Serialize the form and post it on a background task
    fn launch(&mut self) {
        let Some(in_flight) = self.in_flight.as_mut() else {
            return;
        };

        let payload = self.form.to_payload();
        let transport = Arc::clone(&self.transport);
        let (tx, rx) = oneshot::channel();
        let form_id = self.form.id.clone();

        tokio::spawn(async move {
            tracing::info!(form = %form_id, fields = payload.len(), "sending form");
            let outcome = send(transport.as_ref(), &payload).await;
            let _ = tx.send(outcome);
        });

        in_flight.stage = Stage::Sending(rx);
    }

    /// Apply a settled outcome. The submit control is restored and the guard
    /// released whatever the outcome was.
    fn finish(
        &mut self,
        outcome: SubmitOutcome,
        notifications: &mut NotificationCenter,
        now: Instant,
    ) -> Option<Redirect> {
        let in_flight = self.in_flight.take();
        let catalog = self.catalog;

        let redirect = match outcome {
            SubmitOutcome::Accepted => {
                self.state = SubmissionState::Succeeded;
                notifications.show_at(catalog.sent, Severity::Success, now);
                tracing::info!(form = %self.form.id, "form accepted");
                Some(Redirect {
                    destination: self.timing.thank_you_path.clone(),
                    at: now + self.timing.redirect_delay,
                })
            }
            SubmitOutcome::Rejected { message } => {
                self.state = SubmissionState::Failed;
                tracing::warn!(form = %self.form.id, ?message, "form rejected by server");
                let text = message.unwrap_or_else(|| catalog.generic_failure.to_string());
                notifications.show_at(text, Severity::Danger, now);
                None
            }
            SubmitOutcome::TransportFailed(err) => {
                self.state = SubmissionState::Failed;
                tracing::warn!(
                    form = %self.form.id,
                    error = %err,
                    timeout = err.is_timeout(),
                    "form submission failed"
                );
                notifications.show_at(catalog.transport_failed, Severity::Danger, now);
                None
            }
        };

        self.form.submit.restore();
        drop(in_flight);
        self.last_settled = Some(self.state);
        self.state = SubmissionState::Idle;
        redirect
    }

    fn resting_state(&self) -> SubmissionState {
        if self.in_flight.is_some() {
            SubmissionState::Submitting
        } else {
            SubmissionState::Idle
        }
    }
}
