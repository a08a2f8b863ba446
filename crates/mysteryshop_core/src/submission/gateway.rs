//! Submission boundary.
//!
//! # Responsibility
//! - Define the external write contract used by form sessions.
//! - Provide the simulated gateway standing in for the real backend.
//!
//! # Invariants
//! - A gateway receives the already-serialized document; it never sees editor state.
//! - Only payload sizes are logged, never payload content.

use log::{info, warn};
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;
use std::time::{Duration, Instant};
use uuid::Uuid;

/// Default latency of [`SimulatedGateway`].
pub const DEFAULT_SIMULATED_DELAY: Duration = Duration::from_millis(300);

/// Kind of document carried by an envelope.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DocumentKind {
    Checklist,
    Response,
}

impl DocumentKind {
    pub fn label(self) -> &'static str {
        match self {
            Self::Checklist => "checklist",
            Self::Response => "response",
        }
    }
}

/// Serialized document handed to the gateway.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubmissionEnvelope {
    pub kind: DocumentKind,
    /// JSON text of the document payload.
    pub body: String,
}

impl SubmissionEnvelope {
    pub fn byte_len(&self) -> usize {
        self.body.len()
    }
}

/// Acknowledgement returned by a successful write.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Receipt {
    pub reference: Uuid,
    pub kind: DocumentKind,
    pub accepted_bytes: usize,
}

/// Failure reported by the external collaborator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GatewayError {
    /// Collaborator could not be reached; retrying may succeed.
    Unavailable(String),
    /// Collaborator refused the document.
    Rejected(String),
}

impl Display for GatewayError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Unavailable(reason) => write!(f, "submission service unavailable: {reason}"),
            Self::Rejected(reason) => write!(f, "submission rejected: {reason}"),
        }
    }
}

impl Error for GatewayError {}

/// External write used by the submission pipeline.
pub trait SubmissionGateway {
    /// Performs exactly one write of `envelope`.
    fn write(&self, envelope: &SubmissionEnvelope) -> Result<Receipt, GatewayError>;
}

/// In-process gateway that waits a fixed delay and accepts (or fails) every write.
#[derive(Debug)]
pub struct SimulatedGateway {
    delay: Duration,
    failure: Option<GatewayError>,
    writes: AtomicUsize,
    last: Mutex<Option<SubmissionEnvelope>>,
}

impl SimulatedGateway {
    /// Gateway accepting every write after `delay`.
    pub fn new(delay: Duration) -> Self {
        Self {
            delay,
            failure: None,
            writes: AtomicUsize::new(0),
            last: Mutex::new(None),
        }
    }

    /// Gateway failing every write with `error` after `delay`.
    pub fn failing(delay: Duration, error: GatewayError) -> Self {
        Self {
            failure: Some(error),
            ..Self::new(delay)
        }
    }

    /// Number of writes attempted so far.
    pub fn write_count(&self) -> usize {
        self.writes.load(Ordering::SeqCst)
    }

    /// Last envelope received, if any.
    pub fn last_envelope(&self) -> Option<SubmissionEnvelope> {
        self.last.lock().ok().and_then(|guard| guard.clone())
    }
}

impl Default for SimulatedGateway {
    fn default() -> Self {
        Self::new(DEFAULT_SIMULATED_DELAY)
    }
}

impl SubmissionGateway for SimulatedGateway {
    fn write(&self, envelope: &SubmissionEnvelope) -> Result<Receipt, GatewayError> {
        let started_at = Instant::now();
        self.writes.fetch_add(1, Ordering::SeqCst);
        if let Ok(mut last) = self.last.lock() {
            *last = Some(envelope.clone());
        }
        if !self.delay.is_zero() {
            std::thread::sleep(self.delay);
        }

        if let Some(error) = &self.failure {
            warn!(
                "event=gateway_write module=submission status=error kind={} bytes={} duration_ms={} error={}",
                envelope.kind.label(),
                envelope.byte_len(),
                started_at.elapsed().as_millis(),
                error
            );
            return Err(error.clone());
        }

        info!(
            "event=gateway_write module=submission status=ok kind={} bytes={} duration_ms={}",
            envelope.kind.label(),
            envelope.byte_len(),
            started_at.elapsed().as_millis()
        );
        Ok(Receipt {
            reference: Uuid::new_v4(),
            kind: envelope.kind,
            accepted_bytes: envelope.byte_len(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::{DocumentKind, GatewayError, SimulatedGateway, SubmissionEnvelope, SubmissionGateway};
    use std::time::Duration;

    fn envelope() -> SubmissionEnvelope {
        SubmissionEnvelope {
            kind: DocumentKind::Checklist,
            body: "{\"name\":\"x\"}".to_string(),
        }
    }

    #[test]
    fn accepting_gateway_counts_writes_and_echoes_size() {
        let gateway = SimulatedGateway::new(Duration::ZERO);
        let receipt = gateway.write(&envelope()).expect("write should succeed");
        assert_eq!(receipt.accepted_bytes, envelope().byte_len());
        assert_eq!(receipt.kind, DocumentKind::Checklist);
        assert_eq!(gateway.write_count(), 1);
        assert_eq!(gateway.last_envelope(), Some(envelope()));
    }

    #[test]
    fn failing_gateway_returns_configured_error() {
        let gateway = SimulatedGateway::failing(
            Duration::ZERO,
            GatewayError::Unavailable("offline".to_string()),
        );
        let err = gateway.write(&envelope()).expect_err("write should fail");
        assert_eq!(err, GatewayError::Unavailable("offline".to_string()));
        assert_eq!(gateway.write_count(), 1);
    }
}
