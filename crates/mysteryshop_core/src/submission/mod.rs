//! Submission pipeline.
//!
//! # Responsibility
//! - Orchestrate validate -> serialize -> external write -> reset-or-report.
//! - Keep the external collaborator behind the `SubmissionGateway` trait.
//!
//! # Invariants
//! - At most one in-flight submission per form session.
//! - No timeout is applied here; a caller holding a `PendingSubmission`
//!   decides when the write has finished.

pub mod gateway;
pub mod session;

pub use gateway::{
    DocumentKind, GatewayError, Receipt, SimulatedGateway, SubmissionEnvelope, SubmissionGateway,
    DEFAULT_SIMULATED_DELAY,
};
pub use session::{
    FormSession, Notification, NotificationLevel, PendingSubmission, SubmissionState,
    SubmitOutcome, SubmitRejected, SubmittableDocument,
};
