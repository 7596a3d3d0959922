//! Submit lifecycle: validate, disable, send, report, reset

use crate::state::{ContactForm, Notifier, Severity, SubmissionState};
use crate::transport::{Submission, Transport, TransportError};
use std::sync::Arc;
use std::time::Instant;
use tokio::sync::oneshot::{self, error::TryRecvError};
use tokio::task::JoinHandle;

pub const INVALID_FORM_MESSAGE: &str = "Please correct the errors and try again";
pub const SUCCESS_MESSAGE: &str =
    "Thank you! Your message has been sent successfully. We'll get back to you soon.";
pub const FAILURE_MESSAGE: &str =
    "Sorry, there was an error sending your message. Please try again or contact us directly.";

/// What a submit request led to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// Validation failed, nothing was sent
    Invalid,
    /// Another send is still in flight, the request was ignored
    AlreadySubmitting,
    /// Send started in the background
    Dispatched,
    Sent,
    Failed,
}

/// A send running on the runtime
struct PendingSend {
    handle: JoinHandle<()>,
    result: oneshot::Receiver<Result<(), TransportError>>,
}

/// Drives a form through submission against a transport
pub struct Submitter {
    transport: Arc<dyn Transport>,
    pending: Option<PendingSend>,
}

impl Submitter {
    pub fn new(transport: Arc<dyn Transport>) -> Self {
        Self {
            transport,
            pending: None,
        }
    }

    /// Whether a background send has not reported back yet
    pub fn is_in_flight(&self) -> bool {
        self.pending.is_some()
    }

    /// Submit and wait for the transport to answer
    #[allow(dead_code)] // the UI loop uses dispatch/poll so key handling never blocks
    pub async fn submit(
        &mut self,
        form: &mut ContactForm,
        notifier: &mut Notifier,
    ) -> SubmitOutcome {
        let submission = match self.begin(form, notifier, Instant::now()) {
            Ok(submission) => submission,
            Err(outcome) => return outcome,
        };
        let result = self.transport.send(&submission).await;
        self.finish(form, notifier, result, Instant::now())
    }

    /// Submit without blocking the caller; the result is collected by [`Submitter::poll`]
    pub fn dispatch(
        &mut self,
        form: &mut ContactForm,
        notifier: &mut Notifier,
        now: Instant,
    ) -> SubmitOutcome {
        let submission = match self.begin(form, notifier, now) {
            Ok(submission) => submission,
            Err(outcome) => return outcome,
        };

        let transport = Arc::clone(&self.transport);
        let (tx, rx) = oneshot::channel();
        let handle = tokio::spawn(async move {
            let result = transport.send(&submission).await;
            // The receiver is gone only after teardown
            let _ = tx.send(result);
        });

        self.pending = Some(PendingSend { handle, result: rx });
        SubmitOutcome::Dispatched
    }

    /// Apply the result of a background send once it has arrived
    pub fn poll(
        &mut self,
        form: &mut ContactForm,
        notifier: &mut Notifier,
        now: Instant,
    ) -> Option<SubmitOutcome> {
        let pending = self.pending.as_mut()?;
        let result = match pending.result.try_recv() {
            Ok(result) => result,
            Err(TryRecvError::Empty) => return None,
            Err(TryRecvError::Closed) => Err(TransportError::Interrupted),
        };
        self.pending = None;
        Some(self.finish(form, notifier, result, now))
    }

    /// Abort a background send, if any
    pub fn teardown(&mut self) {
        if let Some(pending) = self.pending.take() {
            tracing::debug!("aborting in-flight submission");
            pending.handle.abort();
        }
    }

    fn begin(
        &mut self,
        form: &mut ContactForm,
        notifier: &mut Notifier,
        now: Instant,
    ) -> Result<Submission, SubmitOutcome> {
        if form.is_submitting() {
            tracing::warn!("submit ignored, a submission is already in flight");
            return Err(SubmitOutcome::AlreadySubmitting);
        }

        if !form.validate_form() {
            notifier.show(INVALID_FORM_MESSAGE, Severity::Error, now);
            if let Some(index) = form.first_invalid() {
                form.move_focus(index);
            }
            return Err(SubmitOutcome::Invalid);
        }

        form.submission = SubmissionState::Submitting;
        match form.submit_button.as_mut() {
            Some(button) => button.set_busy(),
            None => tracing::warn!("form has no submit control, skipping busy state"),
        }
        Ok(Submission::new(form.values()))
    }

    fn finish(
        &mut self,
        form: &mut ContactForm,
        notifier: &mut Notifier,
        result: Result<(), TransportError>,
        now: Instant,
    ) -> SubmitOutcome {
        form.submission = SubmissionState::Done;
        if let Some(button) = form.submit_button.as_mut() {
            button.restore();
        }

        match result {
            Ok(()) => {
                notifier.show(SUCCESS_MESSAGE, Severity::Success, now);
                form.reset();
                SubmitOutcome::Sent
            }
            Err(err) => {
                tracing::error!("form submission failed: {err}");
                notifier.show(FAILURE_MESSAGE, Severity::Error, now);
                SubmitOutcome::Failed
            }
        }
    }
}

impl Drop for Submitter {
    fn drop(&mut self) {
        self.teardown();
    }
}
