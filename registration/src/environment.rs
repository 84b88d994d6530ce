//! Injected dependencies for the registration wizard.
//!
//! The wizard reaches the outside world through exactly one collaborator:
//! the confirmation sender that receives the completed draft after a
//! successful submission. Everything else (clock, simulated latency) is
//! configuration.

use crate::types::RegistrationDraft;
use std::future::Future;
use std::pin::Pin;
use std::sync::{Arc, Mutex, PoisonError};
use std::time::Duration;
use techconf_core::environment::Clock;

/// Simulated network round trip for a submission, matching the marketing
/// site's fixed delay
pub const DEFAULT_SUBMISSION_LATENCY: Duration = Duration::from_millis(1500);

/// Receives the completed draft after a successful submission
///
/// The wizard hands the draft over and does not observe the result; the
/// send is expected to succeed. A failure path (retry policy, error
/// surface, idempotency keys) is a deliberate extension point, not current
/// behavior.
pub trait ConfirmationSender: Send + Sync {
    /// Send a registration confirmation for the given draft
    fn send_confirmation(
        &self,
        draft: RegistrationDraft,
    ) -> Pin<Box<dyn Future<Output = ()> + Send + '_>>;
}

/// Production sender: logs the confirmation
///
/// Stands in for real email delivery, which is out of scope.
#[derive(Debug, Clone, Copy, Default)]
pub struct LoggingConfirmationSender;

impl ConfirmationSender for LoggingConfirmationSender {
    fn send_confirmation(
        &self,
        draft: RegistrationDraft,
    ) -> Pin<Box<dyn Future<Output = ()> + Send + '_>> {
        Box::pin(async move {
            tracing::info!(
                attendee = %draft.full_name(),
                email = %draft.email,
                tier = %draft.ticket_type,
                "Confirmation email queued"
            );
        })
    }
}

/// Test sender: records every draft it receives
///
/// Lets tests assert the exact shape handed to the collaborator on submit.
#[derive(Debug, Clone, Default)]
pub struct RecordingConfirmationSender {
    sent: Arc<Mutex<Vec<RegistrationDraft>>>,
}

impl RecordingConfirmationSender {
    /// Create an empty recorder
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// All drafts received so far, in order
    #[must_use]
    pub fn sent(&self) -> Vec<RegistrationDraft> {
        self.sent
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}

impl ConfirmationSender for RecordingConfirmationSender {
    fn send_confirmation(
        &self,
        draft: RegistrationDraft,
    ) -> Pin<Box<dyn Future<Output = ()> + Send + '_>> {
        Box::pin(async move {
            self.sent
                .lock()
                .unwrap_or_else(PoisonError::into_inner)
                .push(draft);
        })
    }
}

/// Dependencies injected into the registration reducer
///
/// Generic over the clock so tests can pin time.
#[derive(Clone)]
pub struct RegistrationEnvironment<C: Clock> {
    /// Clock for timestamping submissions
    pub clock: C,
    /// Simulated latency between `Submit` and the completed transition
    pub submission_latency: Duration,
    /// The confirmation collaborator
    pub confirmations: Arc<dyn ConfirmationSender>,
}

impl<C: Clock> RegistrationEnvironment<C> {
    /// Create an environment with the default latency and logging sender
    #[must_use]
    pub fn new(clock: C) -> Self {
        Self {
            clock,
            submission_latency: DEFAULT_SUBMISSION_LATENCY,
            confirmations: Arc::new(LoggingConfirmationSender),
        }
    }

    /// Override the simulated submission latency
    #[must_use]
    pub const fn with_submission_latency(mut self, latency: Duration) -> Self {
        self.submission_latency = latency;
        self
    }

    /// Override the confirmation collaborator
    #[must_use]
    pub fn with_confirmation_sender(mut self, sender: Arc<dyn ConfirmationSender>) -> Self {
        self.confirmations = sender;
        self
    }
}

impl<C: Clock + std::fmt::Debug> std::fmt::Debug for RegistrationEnvironment<C> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RegistrationEnvironment")
            .field("clock", &self.clock)
            .field("submission_latency", &self.submission_latency)
            .finish_non_exhaustive()
    }
}
