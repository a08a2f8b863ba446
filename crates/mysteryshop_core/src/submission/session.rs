//! Form session: document ownership plus the submission state machine.
//!
//! # Responsibility
//! - Own one document exclusively for the lifetime of an open form.
//! - Drive `Idle -> Validating -> (Invalid -> Idle) | (Submitting -> Submitted | Failed -> Idle)`.
//!
//! # Invariants
//! - At most one submission is in flight per session.
//! - The document cannot be edited while a submission is in flight.
//! - Invalid documents never reach the gateway.
//! - A failed write leaves the document exactly as it was before submitting.

use super::gateway::{DocumentKind, GatewayError, Receipt, SubmissionEnvelope, SubmissionGateway};
use crate::editor::{EditError, EditResult};
use crate::validation::ValidationReport;
use log::{debug, info, warn};
use serde::Serialize;
use std::error::Error;
use std::fmt::{Display, Formatter};
use uuid::Uuid;

/// Document that a [`FormSession`] can validate, serialize and reset.
pub trait SubmittableDocument: Clone {
    /// Wire kind of the envelope.
    const KIND: DocumentKind;
    /// Notification text shown after a successful write.
    const SUCCESS_MESSAGE: &'static str;

    /// Serialized body type.
    type Payload: Serialize;

    fn validate(&self) -> ValidationReport;
    fn payload(&self) -> Self::Payload;
    /// Document shown after a successful submission.
    fn reset(&self) -> Self;
}

/// Pipeline state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SubmissionState {
    Idle,
    Validating,
    Invalid,
    Submitting,
    Submitted,
    Failed,
}

/// Severity of a user-visible notification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum NotificationLevel {
    Success,
    Error,
}

/// Message for the user, drained by the caller.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Notification {
    pub level: NotificationLevel,
    pub title: String,
    pub message: String,
}

/// Reasons a submission never reached the gateway or could not be completed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitRejected {
    /// Another submission of this session is still pending.
    InFlight,
    /// Document failed validation; violations are attached to the session too.
    Invalid(ValidationReport),
    /// Payload could not be serialized.
    Encoding(String),
    /// Completion received for a submission that is not pending on this session.
    StaleTicket,
}

impl Display for SubmitRejected {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InFlight => write!(f, "a submission is already in flight"),
            Self::Invalid(report) => write!(f, "document is invalid: {}", report.summary()),
            Self::Encoding(message) => write!(f, "failed to encode document: {message}"),
            Self::StaleTicket => write!(f, "submission ticket is not pending"),
        }
    }
}

impl Error for SubmitRejected {}

/// Final result of one submit attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// Gateway accepted; the document was reset.
    Submitted(Receipt),
    /// Gateway failed; the document is unchanged.
    Failed(GatewayError),
    /// Gateway was never called (or the completion was refused).
    Rejected(SubmitRejected),
}

impl SubmitOutcome {
    pub fn is_submitted(&self) -> bool {
        matches!(self, Self::Submitted(_))
    }
}

/// Ticket for a submission between `begin_submit` and `complete_submit`.
///
/// Not cloneable: exactly one completion is accepted per ticket, and only by
/// the session that issued it.
#[derive(Debug)]
pub struct PendingSubmission {
    session: Uuid,
    sequence: u64,
    envelope: SubmissionEnvelope,
}

impl PendingSubmission {
    /// Envelope to hand to the gateway.
    pub fn envelope(&self) -> &SubmissionEnvelope {
        &self.envelope
    }
}

/// One open form owning its document.
#[derive(Debug)]
pub struct FormSession<D: SubmittableDocument> {
    id: Uuid,
    document: D,
    state: SubmissionState,
    violations: ValidationReport,
    trace: Vec<SubmissionState>,
    notifications: Vec<Notification>,
    pending: Option<u64>,
    next_sequence: u64,
}

impl<D: SubmittableDocument> FormSession<D> {
    /// Opens a session over `document` in `Idle` state.
    pub fn with_document(document: D) -> Self {
        Self {
            id: Uuid::new_v4(),
            document,
            state: SubmissionState::Idle,
            violations: ValidationReport::new(),
            trace: vec![SubmissionState::Idle],
            notifications: Vec::new(),
            pending: None,
            next_sequence: 1,
        }
    }

    pub fn document(&self) -> &D {
        &self.document
    }

    pub fn state(&self) -> SubmissionState {
        self.state
    }

    /// Whether the submit control should be disabled.
    pub fn is_submitting(&self) -> bool {
        self.pending.is_some()
    }

    /// Violations from the most recent validation pass.
    pub fn violations(&self) -> &ValidationReport {
        &self.violations
    }

    /// States entered since the latest submit attempt began.
    pub fn trace(&self) -> &[SubmissionState] {
        &self.trace
    }

    /// Returns queued notifications and clears the queue.
    pub fn take_notifications(&mut self) -> Vec<Notification> {
        std::mem::take(&mut self.notifications)
    }

    /// Validates, serializes and locks the document for one external write.
    ///
    /// # Errors
    /// - `InFlight` when a previous ticket is still pending; nothing changes.
    /// - `Invalid` when validation fails; state returns to `Idle`.
    /// - `Encoding` when serialization fails; state returns to `Idle`.
    pub fn begin_submit(&mut self) -> Result<PendingSubmission, SubmitRejected> {
        if self.pending.is_some() {
            debug!(
                "event=submit_begin module=submission status=rejected kind={} reason=in_flight",
                D::KIND.label()
            );
            return Err(SubmitRejected::InFlight);
        }

        self.trace = vec![self.state];
        self.enter(SubmissionState::Validating);
        let report = self.document.validate();
        if !report.is_valid() {
            info!(
                "event=submit_validate module=submission status=invalid kind={} violations={}",
                D::KIND.label(),
                report.len()
            );
            self.violations = report.clone();
            self.enter(SubmissionState::Invalid);
            self.enter(SubmissionState::Idle);
            return Err(SubmitRejected::Invalid(report));
        }
        self.violations = ValidationReport::new();

        let body = match serde_json::to_string(&self.document.payload()) {
            Ok(body) => body,
            Err(err) => {
                warn!(
                    "event=submit_encode module=submission status=error kind={} error={}",
                    D::KIND.label(),
                    err
                );
                self.enter(SubmissionState::Failed);
                self.notify(NotificationLevel::Error, "Error", err.to_string());
                self.enter(SubmissionState::Idle);
                return Err(SubmitRejected::Encoding(err.to_string()));
            }
        };

        let sequence = self.next_sequence;
        self.next_sequence += 1;
        self.pending = Some(sequence);
        self.enter(SubmissionState::Submitting);
        info!(
            "event=submit_begin module=submission status=ok kind={} sequence={} bytes={}",
            D::KIND.label(),
            sequence,
            body.len()
        );

        Ok(PendingSubmission {
            session: self.id,
            sequence,
            envelope: SubmissionEnvelope {
                kind: D::KIND,
                body,
            },
        })
    }

    /// Applies the gateway result of a pending submission.
    ///
    /// On success the document is reset and a success notification is queued.
    /// On failure an error notification is queued, state returns to `Idle` and
    /// the document is kept for a retry.
    pub fn complete_submit(
        &mut self,
        pending: PendingSubmission,
        result: Result<Receipt, GatewayError>,
    ) -> SubmitOutcome {
        if pending.session != self.id || self.pending != Some(pending.sequence) {
            warn!(
                "event=submit_complete module=submission status=rejected kind={} sequence={} reason=stale_ticket",
                D::KIND.label(),
                pending.sequence
            );
            return SubmitOutcome::Rejected(SubmitRejected::StaleTicket);
        }
        self.pending = None;

        match result {
            Ok(receipt) => {
                self.document = self.document.reset();
                self.enter(SubmissionState::Submitted);
                self.notify(NotificationLevel::Success, "Success", D::SUCCESS_MESSAGE);
                info!(
                    "event=submit_complete module=submission status=ok kind={} sequence={} reference={}",
                    D::KIND.label(),
                    pending.sequence,
                    receipt.reference
                );
                SubmitOutcome::Submitted(receipt)
            }
            Err(err) => {
                self.enter(SubmissionState::Failed);
                self.notify(NotificationLevel::Error, "Error", err.to_string());
                self.enter(SubmissionState::Idle);
                warn!(
                    "event=submit_complete module=submission status=error kind={} sequence={} error={}",
                    D::KIND.label(),
                    pending.sequence,
                    err
                );
                SubmitOutcome::Failed(err)
            }
        }
    }

    /// Runs the whole pipeline with exactly one gateway write for a valid document.
    pub fn submit(&mut self, gateway: &dyn SubmissionGateway) -> SubmitOutcome {
        match self.begin_submit() {
            Ok(pending) => {
                let result = gateway.write(pending.envelope());
                self.complete_submit(pending, result)
            }
            Err(rejected) => SubmitOutcome::Rejected(rejected),
        }
    }

    /// Mutable document access for edits; refused while a submission is pending.
    pub(crate) fn document_mut(&mut self) -> EditResult<&mut D> {
        if self.pending.is_some() {
            debug!(
                "event=edit_rejected module=submission kind={} reason=in_flight",
                D::KIND.label()
            );
            return Err(EditError::SubmissionInFlight);
        }
        Ok(&mut self.document)
    }

    fn enter(&mut self, state: SubmissionState) {
        self.state = state;
        self.trace.push(state);
    }

    fn notify(&mut self, level: NotificationLevel, title: &str, message: impl Into<String>) {
        self.notifications.push(Notification {
            level,
            title: title.to_string(),
            message: message.into(),
        });
    }
}
